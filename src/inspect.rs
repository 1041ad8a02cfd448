//! Reading saved property responses
//!
//! Used by the `bs-properties` tool; kept in the library so any caller that
//! loads a response from disk gets the same envelope handling.

use std::io::Read;
use std::path::Path;

use basespace_types::{Property, PropertyContainer, PropertyValue};
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientSettings;
use crate::error::Result;
use crate::response::decode_response;

/// Read a saved response from `path`, or from stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        text = std::fs::read_to_string(path)?;
    }
    Ok(text)
}

/// Accept either a full response envelope or a bare property container
pub fn parse_container(text: &str) -> Result<PropertyContainer> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("Response").is_some() || value.get("ResponseStatus").is_some() {
        return decode_response(200, text);
    }
    Ok(serde_json::from_value(value)?)
}

/// One line of a property listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySummary {
    pub name: String,
    pub property_type: String,
    pub value: String,
    pub truncated: bool,
    /// Absolute URL of the remaining items, for truncated lists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_url: Option<String>,
}

pub fn summarize(property: &Property, settings: &ClientSettings) -> Result<PropertySummary> {
    let value = match &property.value {
        Some(PropertyValue::Content(content)) => content.to_string(),
        Some(PropertyValue::Items(_)) => format!(
            "{} of {} items",
            property.items_displayed_count.unwrap_or(0),
            property.items_total_count.unwrap_or(0)
        ),
        None => String::new(),
    };

    let truncated = property.is_truncated();
    let items_url = match (&property.href_items, truncated) {
        (Some(href), true) => Some(settings.resolve_href(href)?.to_string()),
        _ => None,
    };

    Ok(PropertySummary {
        name: property.name.clone(),
        property_type: property.type_tag().to_string(),
        value,
        truncated,
        items_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BaseSpaceError;
    use basespace_types::PropertyContent;
    use std::io::Write;

    #[test]
    fn accepts_envelope_or_bare_container() {
        let bare = r#"{"Items": [{"Type": "string", "Name": "A", "Content": "1"}],
                       "DisplayedCount": 1, "TotalCount": 1}"#;
        let wrapped = format!(r#"{{"Response": {}}}"#, bare);

        assert_eq!(parse_container(bare).unwrap().len(), 1);
        assert_eq!(parse_container(&wrapped).unwrap().len(), 1);
        assert!(matches!(
            parse_container("42"),
            Err(BaseSpaceError::Decode(_))
        ));
    }

    #[test]
    fn reads_saved_response_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Response": {{"Items": [], "DisplayedCount": 0, "TotalCount": 2}}}}"#
        )
        .unwrap();

        let text = read_input(file.path()).unwrap();
        let container = parse_container(&text).unwrap();
        assert!(container.is_empty());
        assert!(container.is_truncated());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_input(Path::new("/nonexistent/response.json")).unwrap_err();
        assert!(matches!(err, BaseSpaceError::Io(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn truncated_list_reports_items_url() {
        let mut property = Property::multi("Input.Samples", "sample[]", vec![], 0, 3);
        property.href_items = Some("v1pre3/appsessions/1/properties/Input.Samples/items".into());

        let summary = summarize(&property, &ClientSettings::default()).unwrap();
        assert!(summary.truncated);
        assert_eq!(summary.value, "0 of 3 items");
        assert_eq!(
            summary.items_url.as_deref(),
            Some("https://api.basespace.illumina.com/v1pre3/appsessions/1/properties/Input.Samples/items")
        );
    }

    #[test]
    fn complete_property_has_no_items_url() {
        let mut property = Property::single("BarcodeId", "string", PropertyContent::literal("7"));
        property.href_items = Some("v1pre3/appsessions/1/properties/BarcodeId/items".into());

        let summary = summarize(&property, &ClientSettings::default()).unwrap();
        assert!(!summary.truncated);
        assert_eq!(summary.value, "7");
        assert!(summary.items_url.is_none());
    }
}
