//! schema.org structured data for a profile.

use serde_json::{Map, Value, json};

use crate::Record;
use crate::hours::Weekday;

/// Build a schema.org `FinancialService` object for the record.
///
/// Only fields present on the record are emitted.
pub fn structured_data(record: &Record) -> Value {
    let mut data = Map::new();
    data.insert("@context".to_owned(), json!("https://schema.org"));
    data.insert("@type".to_owned(), json!("FinancialService"));
    data.insert("name".to_owned(), json!(record.name));

    if let Some(description) = record.description.as_deref().filter(|d| !d.is_empty()) {
        data.insert("description".to_owned(), json!(description));
    }
    if let Some(phone) = record.main_phone.as_deref().filter(|p| !p.is_empty()) {
        data.insert("telephone".to_owned(), json!(phone));
    }

    let address = &record.address;
    let street = match address.line2.as_deref().filter(|l| !l.is_empty()) {
        Some(line2) => format!("{}, {line2}", address.line1),
        None => address.line1.clone(),
    };
    let mut postal = json!({
        "@type": "PostalAddress",
        "streetAddress": street,
        "addressLocality": address.city,
        "addressRegion": address.region,
        "postalCode": address.postal_code,
    });
    if let Some(country) = address.country_code.as_deref() {
        postal["addressCountry"] = json!(country);
    }
    data.insert("address".to_owned(), postal);

    if let Some(coordinate) = record.geocoded_coordinate {
        data.insert(
            "geo".to_owned(),
            json!({
                "@type": "GeoCoordinates",
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
            }),
        );
    }

    if let Some(photo) = record.photo_gallery.first() {
        data.insert("image".to_owned(), json!(photo.image().url));
    }

    if !record.services.is_empty() {
        let offers: Vec<Value> = record
            .services
            .iter()
            .map(|service| {
                json!({
                    "@type": "Offer",
                    "itemOffered": {"@type": "Service", "name": service},
                })
            })
            .collect();
        data.insert("makesOffer".to_owned(), Value::Array(offers));
    }

    if let Some(hours) = &record.hours {
        let specs: Vec<Value> = hours
            .days()
            .filter(|(_, day)| !day.is_closed)
            .flat_map(|(weekday, day)| {
                day.open_intervals.iter().map(move |interval| {
                    json!({
                        "@type": "OpeningHoursSpecification",
                        "dayOfWeek": Weekday::schema_url(weekday),
                        "opens": interval.start,
                        "closes": interval.end,
                    })
                })
            })
            .collect();
        if !specs.is_empty() {
            data.insert("openingHoursSpecification".to_owned(), Value::Array(specs));
        }
    }

    Value::Object(data)
}

/// Render structured data as an embeddable JSON-LD script element.
pub fn render_script(record: &Record) -> String {
    // `</` would close the script element early.
    let body = structured_data(record).to_string().replace("</", "<\\/");
    format!("<script type=\"application/ld+json\">{body}</script>\n")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(extra: serde_json::Value) -> Record {
        let mut doc = json!({
            "id": "1",
            "name": "Jane Doe",
            "address": {"line1": "5th Ave", "line2": "Suite 2", "city": "NYC", "region": "NY", "postalCode": "10001"}
        });
        for (key, value) in extra.as_object().unwrap() {
            doc[key] = value.clone();
        }
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn test_minimal_structured_data() {
        let data = structured_data(&record(json!({})));
        assert_eq!(data["@type"], "FinancialService");
        assert_eq!(data["name"], "Jane Doe");
        assert_eq!(data["address"]["streetAddress"], "5th Ave, Suite 2");
        assert_eq!(data["address"]["postalCode"], "10001");
        assert!(data.get("telephone").is_none());
        assert!(data.get("geo").is_none());
        assert!(data.get("openingHoursSpecification").is_none());
    }

    #[test]
    fn test_full_structured_data() {
        let data = structured_data(&record(json!({
            "mainPhone": "+14155551234",
            "geocodedCoordinate": {"latitude": 40.7, "longitude": -73.9},
            "services": ["Retirement Planning"],
            "photoGallery": [{"image": {"url": "https://img/1.jpg"}}],
            "hours": {
                "monday": {"openIntervals": [{"start": "09:00", "end": "17:00"}]},
                "sunday": {"isClosed": true}
            }
        })));
        assert_eq!(data["telephone"], "+14155551234");
        assert_eq!(data["geo"]["latitude"], 40.7);
        assert_eq!(data["image"], "https://img/1.jpg");
        assert_eq!(
            data["makesOffer"][0]["itemOffered"]["name"],
            "Retirement Planning"
        );
        let specs = data["openingHoursSpecification"].as_array().unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0]["dayOfWeek"], "https://schema.org/Monday");
        assert_eq!(specs[0]["opens"], "09:00");
    }

    #[test]
    fn test_script_escapes_closing_tags() {
        let html = render_script(&record(json!({"description": "</script><b>"})));
        assert!(html.starts_with("<script type=\"application/ld+json\">"));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
    }
}
