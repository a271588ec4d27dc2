//! Stream declaration: which entities become pages and which of their
//! fields the content fetch step materializes.

use serde::Serialize;

use crate::Record;

/// Field paths fetched for every record.
///
/// Nested paths (`c_associatedBlogs.name`) select a single field of a linked
/// entity. Apart from the platform-supplied `locale` and `_site`, a field
/// missing from this list is never present on a [`Record`].
pub const STREAM_FIELDS: &[&str] = &[
    "id",
    "uid",
    "meta",
    "name",
    "address",
    "mainPhone",
    "hours",
    "description",
    "slug",
    "geocodedCoordinate",
    "services",
    "photoGallery",
    "c_advisorBio",
    "c_associatedBlogs.landingPageUrl",
    "c_associatedBlogs.description",
    "c_associatedBlogs.name",
    "c_associatedBlogs.c_category",
    "c_associatedBlogs.c_datePublished",
    "c_associatedBlogs.photoGallery",
    "c_associatedClientStories.landingPageUrl",
    "c_associatedClientStories.title",
    "c_associatedClientStories.description",
    "c_associatedClientStories.name",
    "c_associatedClientStories.photoGallery",
    "c_associatedFAQs.answer",
    "c_associatedFAQs.question",
    "c_associatedInsights.title",
    "c_associatedInsights.description",
    "c_associatedInsights.name",
    "c_associatedInsights.externalArticlePostDate",
    "c_associatedInsights.c_category",
    "c_associatedInsights.photoGallery",
    "c_associatedSolutions.landingPageUrl",
    "c_associatedSolutions.title",
    "c_associatedSolutions.description",
    "c_associatedSolutions.name",
    "c_associatedSolutions.c_category",
    "c_associatedSolutions.photoGallery",
    // Dashboard fields
    "c_aboutAdvisorShortDescription",
    "c_clientFocuses",
    "c_hobbiesAndInterests",
    "c_volunteeringDisplay",
    "c_expertiseCommentsRTv2",
    "c_fAQs.question",
    "c_fAQs.answer",
    "c_awardsDashboard",
    "c_industryLevelOfExperience",
    "c_educationDisplay.school",
    "c_educationDisplay.degree",
    "c_photoGallery",
    "c_matchFinderPhoto",
    "c_assetRanges",
    "c_preferredFirstName",
    "c_recognitionTitle",
    "c_languagesV2",
    "c_jobTitle",
];

/// Entity type of financial professional profiles.
pub const ENTITY_TYPE: &str = "financialProfessional";

/// Saved filter selecting the published profiles.
pub const SAVED_FILTER_ID: &str = "1306250257";

/// Stream configuration handed to the hosting platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamConfig {
    #[serde(rename = "$id")]
    pub id: String,
    pub fields: Vec<String>,
    pub filter: StreamFilter,
    pub localization: Localization,
}

/// Scope of entities that qualify for the stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFilter {
    pub entity_types: Vec<String>,
    pub saved_filter_ids: Vec<String>,
}

/// Language profiles documents are generated for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Localization {
    pub locales: Vec<String>,
    pub primary: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            id: "my-stream-id-1".to_owned(),
            fields: STREAM_FIELDS.iter().map(|&f| f.to_owned()).collect(),
            filter: StreamFilter::default(),
            localization: Localization::default(),
        }
    }
}

impl Default for StreamFilter {
    fn default() -> Self {
        Self {
            entity_types: vec![ENTITY_TYPE.to_owned()],
            saved_filter_ids: vec![SAVED_FILTER_ID.to_owned()],
        }
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_owned()],
            primary: false,
        }
    }
}

impl StreamFilter {
    /// Check the record's entity type against the filter.
    ///
    /// Records without a meta entity type are admitted; saved filter
    /// membership is not visible on a record and is left to the platform.
    pub fn admits(&self, record: &Record) -> bool {
        record
            .entity_type()
            .is_none_or(|kind| self.entity_types.iter().any(|t| t == kind))
    }
}

impl Localization {
    /// Check the record's locale against the configured locales.
    pub fn admits(&self, record: &Record) -> bool {
        record
            .locale()
            .is_none_or(|locale| self.locales.iter().any(|l| l == locale))
    }

    /// Locale used when a record carries none.
    pub fn default_locale(&self) -> &str {
        self.locales.first().map_or("en", String::as_str)
    }
}
