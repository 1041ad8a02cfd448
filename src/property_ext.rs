//! Typed narrowing of properties
//!
//! Every operation first checks the property's type tag against the exact tag it
//! expects (`string`, `string[]`, `sample[]`, ...). A mismatch short-circuits to
//! `None` / an empty vector. Once the tag matches, each element is narrowed on
//! its own and elements that do not fit are left out of the result.

use basespace_types::property_types::{LIST_SUFFIX, STRING};
use basespace_types::{
    AppResultCompact, AppSessionCompact, ApplicationCompact, FileCompact, ProjectCompact,
    Property, PropertyContent, ResourceKind, RunCompact, SampleCompact, UserCompact,
};
use chrono::{DateTime, Utc};

/// Narrowing operations on a [`Property`]
pub trait PropertyExt {
    /// Literal text of a `string` property
    fn to_string_value(&self) -> Option<&str>;

    /// `string` property parsed as i32
    fn to_int(&self) -> Option<i32>;

    /// `string` property parsed as i64
    fn to_long(&self) -> Option<i64>;

    /// `string` property parsed as a timestamp
    fn to_date_time(&self) -> Option<DateTime<Utc>>;

    /// Single embedded record of a property tagged with `R`'s bare type tag
    fn to_resource<R: ResourceKind>(&self) -> Option<&R>;

    /// Literal items of a `string[]` property
    fn to_string_array(&self) -> Vec<&str>;

    /// Items of a `string[]` property that parse as i32
    fn to_int_array(&self) -> Vec<i32>;

    /// Items of a `string[]` property that parse as i64
    fn to_long_array(&self) -> Vec<i64>;

    /// Items holding an `R` record, whatever the property's type tag says.
    ///
    /// Prefer [`PropertyExt::to_resource_array`], which also checks the tag.
    fn resource_items<R: ResourceKind>(&self) -> Vec<&R>;

    /// Items of an `R[]` property holding an `R` record
    fn to_resource_array<R: ResourceKind>(&self) -> Vec<&R>;

    fn to_sample_array(&self) -> Vec<&SampleCompact> {
        self.to_resource_array()
    }

    fn to_app_result_array(&self) -> Vec<&AppResultCompact> {
        self.to_resource_array()
    }

    fn to_project_array(&self) -> Vec<&ProjectCompact> {
        self.to_resource_array()
    }

    fn to_app_session_array(&self) -> Vec<&AppSessionCompact> {
        self.to_resource_array()
    }

    fn to_run_array(&self) -> Vec<&RunCompact> {
        self.to_resource_array()
    }

    fn to_application_array(&self) -> Vec<&ApplicationCompact> {
        self.to_resource_array()
    }

    fn to_user_array(&self) -> Vec<&UserCompact> {
        self.to_resource_array()
    }

    fn to_file_array(&self) -> Vec<&FileCompact> {
        self.to_resource_array()
    }
}

impl PropertyExt for Property {
    fn to_string_value(&self) -> Option<&str> {
        scalar(self, STRING)?.as_literal()
    }

    fn to_int(&self) -> Option<i32> {
        scalar(self, STRING)?.to_int()
    }

    fn to_long(&self) -> Option<i64> {
        scalar(self, STRING)?.to_long()
    }

    fn to_date_time(&self) -> Option<DateTime<Utc>> {
        scalar(self, STRING)?.to_date_time()
    }

    fn to_resource<R: ResourceKind>(&self) -> Option<&R> {
        scalar(self, R::TYPE_TAG)?.to_resource::<R>()
    }

    fn to_string_array(&self) -> Vec<&str> {
        if !is_list_of(self, STRING) {
            return Vec::new();
        }
        narrow_items(self, PropertyContent::as_literal)
    }

    fn to_int_array(&self) -> Vec<i32> {
        if !is_list_of(self, STRING) {
            return Vec::new();
        }
        narrow_items(self, PropertyContent::to_int)
    }

    fn to_long_array(&self) -> Vec<i64> {
        if !is_list_of(self, STRING) {
            return Vec::new();
        }
        narrow_items(self, PropertyContent::to_long)
    }

    fn resource_items<R: ResourceKind>(&self) -> Vec<&R> {
        narrow_items(self, PropertyContent::to_resource::<R>)
    }

    fn to_resource_array<R: ResourceKind>(&self) -> Vec<&R> {
        if !is_list_of(self, R::TYPE_TAG) {
            return Vec::new();
        }
        self.resource_items::<R>()
    }
}

/// Content of a single-valued property whose tag is exactly `tag`
fn scalar<'a>(property: &'a Property, tag: &str) -> Option<&'a PropertyContent> {
    if property.type_tag() != tag {
        return None;
    }
    property.content()
}

/// Tag is exactly `<scalar>[]`
fn is_list_of(property: &Property, scalar: &str) -> bool {
    property
        .type_tag()
        .strip_suffix(LIST_SUFFIX)
        .is_some_and(|underlying| underlying == scalar)
}

fn narrow_items<'a, T>(
    property: &'a Property,
    narrow: impl Fn(&'a PropertyContent) -> Option<T>,
) -> Vec<T> {
    let Some(items) = property.items() else {
        return Vec::new();
    };

    let narrowed: Vec<T> = items.iter().filter_map(narrow).collect();
    let dropped = items.len() - narrowed.len();
    if dropped > 0 {
        tracing::trace!(
            property = %property.name,
            property_type = property.type_tag(),
            dropped,
            "dropped property items that did not narrow"
        );
    }
    narrowed
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> PropertyContent {
        PropertyContent::reference(SampleCompact {
            id: id.into(),
            href: format!("v1pre3/samples/{}", id),
            name: None,
            sample_id: None,
            experiment_name: None,
            status: None,
            date_created: None,
        })
    }

    fn app_result(id: &str) -> PropertyContent {
        PropertyContent::reference(AppResultCompact {
            id: id.into(),
            href: format!("v1pre3/appresults/{}", id),
            name: None,
            status: None,
            date_created: None,
        })
    }

    fn literals(values: &[&str]) -> Vec<PropertyContent> {
        values.iter().map(|v| PropertyContent::literal(*v)).collect()
    }

    #[test]
    fn scalar_int_round_trip() {
        let ok = Property::single("N", "string", PropertyContent::literal("42"));
        assert_eq!(ok.to_int(), Some(42));
        assert_eq!(ok.to_long(), Some(42));
        assert_eq!(ok.to_string_value(), Some("42"));

        let bad = Property::single("N", "string", PropertyContent::literal("abc"));
        assert_eq!(bad.to_int(), None);

        let empty = Property::single("N", "string", PropertyContent::literal(""));
        assert_eq!(empty.to_int(), None);
    }

    #[test]
    fn scalar_gate_is_exact() {
        let upper = Property::single("N", "String", PropertyContent::literal("42"));
        assert_eq!(upper.to_int(), None);
        assert_eq!(upper.to_string_value(), None);

        let list = Property::multi("N", "string[]", literals(&["42"]), 1, 1);
        assert_eq!(list.to_int(), None);
    }

    #[test]
    fn scalar_date_time() {
        let property = Property::single(
            "Started",
            "string",
            PropertyContent::literal("2013-04-05T18:42:21Z"),
        );
        assert!(property.to_date_time().is_some());
        assert!(property.to_int().is_none());
    }

    #[test]
    fn single_resource_needs_bare_tag() {
        let property = Property::single("Input.Sample", "sample", sample("3"));
        assert_eq!(property.to_resource::<SampleCompact>().map(|s| s.id.as_str()), Some("3"));
        assert!(property.to_resource::<AppResultCompact>().is_none());
        assert!(property.to_int().is_none());

        let mistagged = Property::single("Input.Sample", "project", sample("3"));
        assert!(mistagged.to_resource::<SampleCompact>().is_none());
    }

    #[test]
    fn int_array_drops_unparseable_items() {
        let property = Property::multi("Lanes", "string[]", literals(&["1", "x", "3", ""]), 4, 4);
        assert_eq!(property.to_int_array(), vec![1, 3]);
        assert_eq!(property.to_long_array(), vec![1, 3]);
        assert_eq!(property.to_string_array(), vec!["1", "x", "3", ""]);
    }

    #[test]
    fn numeric_arrays_require_string_list_tag() {
        for tag in ["string", "String[]", "sample[]", "string[][]", ""] {
            let property = Property::multi("Lanes", tag, literals(&["1", "2"]), 2, 2);
            assert!(property.to_int_array().is_empty(), "tag {:?}", tag);
            assert!(property.to_long_array().is_empty(), "tag {:?}", tag);
            assert!(property.to_string_array().is_empty(), "tag {:?}", tag);
        }
    }

    #[test]
    fn sample_array_keeps_order_and_drops_other_kinds() {
        let items = vec![
            sample("1"),
            app_result("2"),
            PropertyContent::literal("3"),
            sample("4"),
        ];
        let property = Property::multi("Related", "sample[]", items, 4, 4);

        let ids: Vec<&str> = property
            .to_sample_array()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert!(property.to_app_result_array().is_empty());
    }

    #[test]
    fn resource_items_ignores_tag() {
        let property = Property::multi("Mixed", "file[]", vec![sample("1"), app_result("2")], 2, 2);

        assert_eq!(property.resource_items::<SampleCompact>().len(), 1);
        assert!(property.to_sample_array().is_empty());
        assert!(property.to_file_array().is_empty());
    }

    #[test]
    fn single_valued_has_no_array_view() {
        let property = Property::single("Related", "sample[]", sample("1"));
        assert!(property.to_sample_array().is_empty());
        assert!(property.resource_items::<SampleCompact>().is_empty());
    }
}
