//! Properties and property containers
//!
//! A [`PropertyContainer`] is the page of properties returned with a resource.
//! Each [`Property`] is either single-valued (one [`PropertyContent`]) or
//! multi-valued (a page of items plus displayed/total counters). Which one is
//! decided by the type tag: a trailing `[]` marks a list.
//!
//! Everything here is a read-only snapshot built by the deserializer.

use serde::{Deserialize, Serialize};

use crate::content::PropertyContent;
use crate::property_types::LIST_SUFFIX;
use crate::wire::{self, PropertyWire};

/// Value slot of a property. Content and items cannot both be present.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Content(PropertyContent),
    Items(Vec<PropertyContent>),
}

/// One named, server-defined attribute of a resource
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "PropertyWire")]
pub struct Property {
    /// Type tag as sent, e.g. `string`, `sample[]`
    pub property_type: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub href: Option<String>,
    /// Where the full item list can be paged from
    pub href_items: Option<String>,
    pub items_displayed_count: Option<i32>,
    pub items_total_count: Option<i32>,
    pub value: Option<PropertyValue>,
}

impl Property {
    /// Single-valued property
    pub fn single(
        name: impl Into<String>,
        property_type: impl Into<String>,
        content: PropertyContent,
    ) -> Self {
        Self {
            property_type: Some(property_type.into()),
            name: name.into(),
            value: Some(PropertyValue::Content(content)),
            ..Self::default()
        }
    }

    /// Multi-valued property with its paging counters
    pub fn multi(
        name: impl Into<String>,
        property_type: impl Into<String>,
        items: Vec<PropertyContent>,
        displayed_count: i32,
        total_count: i32,
    ) -> Self {
        Self {
            property_type: Some(property_type.into()),
            name: name.into(),
            items_displayed_count: Some(displayed_count),
            items_total_count: Some(total_count),
            value: Some(PropertyValue::Items(items)),
            ..Self::default()
        }
    }

    /// Type tag, or `""` when the server sent none
    pub fn type_tag(&self) -> &str {
        self.property_type.as_deref().unwrap_or_default()
    }

    pub fn is_multi_valued(&self) -> bool {
        self.type_tag().ends_with(LIST_SUFFIX)
    }

    pub fn content(&self) -> Option<&PropertyContent> {
        match &self.value {
            Some(PropertyValue::Content(content)) => Some(content),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[PropertyContent]> {
        match &self.value {
            Some(PropertyValue::Items(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// True if paging left some of this property's items on the server.
    ///
    /// Single-valued properties are never truncated. Missing counters count as 0.
    pub fn is_truncated(&self) -> bool {
        if self.content().is_some() {
            return false;
        }
        self.items_displayed_count.unwrap_or(0) < self.items_total_count.unwrap_or(0)
    }

    /// Scalar type name: `sample[]` gives `sample`, `string` stays `string`.
    pub fn underlying_type(&self) -> &str {
        let tag = self.type_tag();
        tag.strip_suffix(LIST_SUFFIX).unwrap_or(tag)
    }
}

impl Serialize for Property {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        wire::PropertyWireRef::from(self).serialize(serializer)
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property: '{}'; Type: {}; ", self.name, self.type_tag())?;
        match &self.value {
            Some(PropertyValue::Content(content)) => write!(f, "Content: {};", content),
            Some(PropertyValue::Items(_)) => write!(
                f,
                "#Items: {}/{};",
                self.items_displayed_count.unwrap_or(0),
                self.items_total_count.unwrap_or(0)
            ),
            None => f.write_str(";"),
        }
    }
}

/// Page of properties attached to a resource response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyContainer {
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub items: Vec<Property>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub displayed_count: i32,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub total_count: i32,
}

impl PropertyContainer {
    /// Container holding all of `items` (nothing left on the server)
    pub fn new(items: Vec<Property>) -> Self {
        let count = i32::try_from(items.len()).unwrap_or(i32::MAX);
        Self {
            items,
            displayed_count: count,
            total_count: count,
        }
    }

    /// First property named `name`. Duplicate names are not rejected; the earliest wins.
    pub fn find_property(&self, name: &str) -> Option<&Property> {
        self.items.iter().find(|p| p.name == name)
    }

    /// True if the server holds properties that were not returned on this page
    pub fn is_truncated(&self) -> bool {
        self.displayed_count != self.total_count
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropertyContainer {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
