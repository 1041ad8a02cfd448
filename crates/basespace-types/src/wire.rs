//! JSON shape of a property and its mapping onto the typed model
//!
//! The server sends `Content` / `Items` as untyped JSON. Which elements are
//! literals and which are embedded records is decided here, once, from the
//! property's type tag:
//!
//! - JSON string            -> literal
//! - JSON number / boolean  -> literal holding the JSON text
//! - JSON object, known tag -> record of that kind
//! - JSON object, other tag -> literal holding the compact JSON text
//! - `null`                 -> no content / element skipped
//!
//! A record that does not decode as its tagged kind is kept as a literal of
//! its JSON text, so narrowing drops that one element and the rest of the
//! property (and container) survives.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::content::PropertyContent;
use crate::property::{Property, PropertyValue};
use crate::property_types::LIST_SUFFIX;
use crate::resources::ResourceReference;

#[derive(Debug, Error)]
pub enum PropertyDecodeError {
    #[error("property '{name}' has both Content and Items")]
    ContentAndItems { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PropertyWire {
    #[serde(rename = "Type", default)]
    property_type: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    href_items: Option<String>,
    #[serde(default)]
    items_displayed_count: Option<i32>,
    #[serde(default)]
    items_total_count: Option<i32>,
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    items: Option<Vec<Value>>,
}

impl TryFrom<PropertyWire> for Property {
    type Error = PropertyDecodeError;

    fn try_from(wire: PropertyWire) -> Result<Self, Self::Error> {
        let name = wire.name.unwrap_or_default();
        let tag = wire.property_type.as_deref().unwrap_or_default();
        let underlying = tag.strip_suffix(LIST_SUFFIX).unwrap_or(tag);

        let value = match (wire.content, wire.items) {
            (Some(_), Some(_)) => {
                return Err(PropertyDecodeError::ContentAndItems { name });
            }
            (Some(content), None) => {
                decode_content(&name, underlying, content).map(PropertyValue::Content)
            }
            (None, Some(items)) => Some(PropertyValue::Items(
                items
                    .into_iter()
                    .filter_map(|item| decode_content(&name, underlying, item))
                    .collect(),
            )),
            (None, None) => None,
        };

        Ok(Property {
            property_type: wire.property_type,
            name,
            description: wire.description,
            href: wire.href,
            href_items: wire.href_items,
            items_displayed_count: wire.items_displayed_count,
            items_total_count: wire.items_total_count,
            value,
        })
    }
}

fn decode_content(name: &str, underlying: &str, value: Value) -> Option<PropertyContent> {
    let content = match value {
        Value::Null => return None,
        Value::String(raw) => PropertyContent::Literal(raw),
        Value::Object(_) if ResourceReference::is_known_tag(underlying) => {
            let raw = value.to_string();
            match ResourceReference::decode(underlying, value) {
                Ok(reference) => PropertyContent::Reference(reference),
                Err(e) => {
                    debug!(
                        property = %name,
                        type_tag = %underlying,
                        error = %e,
                        "record does not decode as its tagged kind, keeping it as a literal"
                    );
                    PropertyContent::Literal(raw)
                }
            }
        }
        other => PropertyContent::Literal(other.to_string()),
    };
    Some(content)
}

/// Borrowed serialization view, the inverse of [`PropertyWire`]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PropertyWireRef<'a> {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    property_type: Option<&'a str>,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    href: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    href_items: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items_displayed_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items_total_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a PropertyContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<&'a [PropertyContent]>,
}

impl<'a> From<&'a Property> for PropertyWireRef<'a> {
    fn from(property: &'a Property) -> Self {
        Self {
            property_type: property.property_type.as_deref(),
            name: &property.name,
            description: property.description.as_deref(),
            href: property.href.as_deref(),
            href_items: property.href_items.as_deref(),
            items_displayed_count: property.items_displayed_count,
            items_total_count: property.items_total_count,
            content: property.content(),
            items: property.items(),
        }
    }
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
