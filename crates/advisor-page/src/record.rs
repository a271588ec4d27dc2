//! Profile record model.
//!
//! A [`Record`] is one financial professional entity as materialized by the
//! content fetch step, restricted to the fields declared in
//! [`STREAM_FIELDS`](crate::STREAM_FIELDS). Field names follow the content
//! graph (`mainPhone`, `c_languagesV2`, ...) on the wire and get Rust names
//! here.
//!
//! `name` and `address` are required: a document missing either fails to
//! parse. Every other field is optional, and list fields treat `null` the
//! same as absent.

use advisor_richtext::RichText;
use serde::{Deserialize, Deserializer};

use crate::hours::Hours;

/// Error returned when a record document cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Malformed JSON or a missing required field.
    #[error("Invalid record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One financial professional profile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Entity id.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Globally unique entity id, used by the edit link.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub uid: Option<String>,
    pub meta: Option<EntityMeta>,
    /// Locale of the generated document.
    pub locale: Option<String>,
    /// Site-level entity shared by every page.
    #[serde(rename = "_site")]
    pub site: Option<SiteEntity>,

    pub name: String,
    pub address: Address,
    pub main_phone: Option<String>,
    pub hours: Option<Hours>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub geocoded_coordinate: Option<Coordinate>,
    #[serde(default, deserialize_with = "nullable")]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub photo_gallery: Vec<ImageField>,

    // Dashboard fields
    #[serde(rename = "c_advisorBio")]
    pub advisor_bio: Option<RichText>,
    #[serde(rename = "c_aboutAdvisorShortDescription")]
    pub about_short_description: Option<String>,
    #[serde(rename = "c_clientFocuses", default, deserialize_with = "nullable")]
    pub client_focuses: Vec<String>,
    #[serde(rename = "c_hobbiesAndInterests")]
    pub hobbies_and_interests: Option<serde_json::Value>,
    #[serde(rename = "c_volunteeringDisplay")]
    pub volunteering: Option<serde_json::Value>,
    #[serde(rename = "c_expertiseCommentsRTv2")]
    pub expertise_comments: Option<RichText>,
    #[serde(rename = "c_fAQs", default, deserialize_with = "nullable")]
    pub faqs: Vec<Faq>,
    #[serde(rename = "c_awardsDashboard")]
    pub awards: Option<serde_json::Value>,
    #[serde(rename = "c_industryLevelOfExperience")]
    pub industry_experience: Option<String>,
    #[serde(rename = "c_educationDisplay", default, deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(rename = "c_photoGallery", default, deserialize_with = "nullable")]
    pub dashboard_photos: Vec<ImageField>,
    #[serde(rename = "c_matchFinderPhoto")]
    pub match_finder_photo: Option<ImageField>,
    #[serde(rename = "c_assetRanges")]
    pub asset_ranges: Option<serde_json::Value>,
    #[serde(rename = "c_preferredFirstName")]
    pub preferred_first_name: Option<String>,
    #[serde(rename = "c_recognitionTitle")]
    pub recognition_title: Option<String>,
    #[serde(rename = "c_languagesV2", default, deserialize_with = "nullable")]
    pub languages: Vec<String>,
    #[serde(rename = "c_jobTitle")]
    pub job_title: Option<String>,

    // Related content
    #[serde(rename = "c_associatedBlogs", default, deserialize_with = "nullable")]
    pub related_blogs: Vec<RelatedItem>,
    #[serde(
        rename = "c_associatedClientStories",
        default,
        deserialize_with = "nullable"
    )]
    pub related_client_stories: Vec<RelatedItem>,
    #[serde(rename = "c_associatedFAQs", default, deserialize_with = "nullable")]
    pub related_faqs: Vec<Faq>,
    #[serde(rename = "c_associatedInsights", default, deserialize_with = "nullable")]
    pub related_insights: Vec<RelatedItem>,
    #[serde(rename = "c_associatedSolutions", default, deserialize_with = "nullable")]
    pub related_solutions: Vec<RelatedItem>,
}

impl Record {
    /// Parse a record from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill in the locale when the document does not carry one.
    #[must_use]
    pub fn with_default_locale(mut self, locale: &str) -> Self {
        if self.locale().is_none() {
            self.locale = Some(locale.to_owned());
        }
        self
    }

    /// Document locale, falling back to the entity meta locale.
    pub fn locale(&self) -> Option<&str> {
        self.locale
            .as_deref()
            .or_else(|| self.meta.as_ref()?.locale.as_deref())
            .filter(|l| !l.is_empty())
    }

    /// Entity type id from the meta block, if present.
    pub fn entity_type(&self) -> Option<&str> {
        self.meta
            .as_ref()?
            .entity_type
            .as_ref()
            .map(|t| t.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Entity metadata block.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityMeta {
    pub entity_type: Option<EntityType>,
    pub locale: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EntityType {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
}

/// Site-level entity (`_site`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteEntity {
    pub primary_photo: Option<ImageField>,
    #[serde(rename = "c_deskHeader")]
    pub desktop_header: Option<ImageField>,
    #[serde(rename = "c_mobHeader")]
    pub mobile_header: Option<ImageField>,
    #[serde(rename = "c_deskFooter")]
    pub desktop_footer: Option<ImageField>,
    #[serde(rename = "c_mobFooter")]
    pub mobile_footer: Option<ImageField>,
}

/// Postal address.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(deserialize_with = "nullable")]
    pub line1: String,
    pub line2: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub city: String,
    #[serde(deserialize_with = "nullable")]
    pub region: String,
    #[serde(deserialize_with = "nullable")]
    pub postal_code: String,
    pub country_code: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Image data.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub alternate_text: Option<String>,
}

/// An image field: either a bare image or a gallery entry wrapping one.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Gallery {
        image: Image,
        details: Option<String>,
        #[serde(rename = "clickthroughUrl")]
        clickthrough_url: Option<String>,
    },
    Bare(Image),
}

impl ImageField {
    pub fn image(&self) -> &Image {
        match self {
            Self::Gallery { image, .. } | Self::Bare(image) => image,
        }
    }

    /// Alternate text, falling back to the gallery details.
    pub fn alt_text(&self) -> &str {
        let image = self.image();
        match self {
            Self::Gallery { details, .. } => image
                .alternate_text
                .as_deref()
                .or(details.as_deref())
                .unwrap_or_default(),
            Self::Bare(_) => image.alternate_text.as_deref().unwrap_or_default(),
        }
    }
}

/// One education entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub school: String,
}

/// Question and answer pair.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Faq {
    #[serde(deserialize_with = "nullable")]
    pub question: String,
    pub answer: Option<RichText>,
}

/// Partial sub-record of a related-content collection.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedItem {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub landing_page_url: Option<String>,
    #[serde(rename = "c_category", deserialize_with = "string_or_list")]
    pub category: Vec<String>,
    #[serde(rename = "c_datePublished")]
    pub date_published: Option<String>,
    pub external_article_post_date: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub photo_gallery: Vec<ImageField>,
}

impl RelatedItem {
    /// Display heading: `title`, falling back to `name`.
    pub fn heading(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Publication date from either date field.
    pub fn date(&self) -> Option<&str> {
        self.date_published
            .as_deref()
            .or(self.external_article_post_date.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(d)?.map(String::from))
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn string_or_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(d)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}
