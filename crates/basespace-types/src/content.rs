//! Atomic property content: a literal or an embedded resource record

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::resources::{ResourceKind, ResourceReference};

/// One value of a property.
///
/// Literals keep the server's raw text; numeric and date views are parsed on
/// demand and come back as `None` when the text does not fit. Reading a
/// literal as a resource (or a resource as a literal) is also just `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyContent {
    Literal(String),
    Reference(ResourceReference),
}

impl PropertyContent {
    pub fn literal(raw: impl Into<String>) -> Self {
        Self::Literal(raw.into())
    }

    pub fn reference<R: ResourceKind>(record: R) -> Self {
        Self::Reference(record.into_reference())
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Raw literal text
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(raw) => Some(raw.as_str()),
            Self::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ResourceReference> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Literal(_) => None,
        }
    }

    pub fn to_int(&self) -> Option<i32> {
        self.as_literal()?.parse().ok()
    }

    pub fn to_long(&self) -> Option<i64> {
        self.as_literal()?.parse().ok()
    }

    /// Parse the literal as a timestamp.
    ///
    /// Accepts RFC 3339, or an ISO-8601 date-time without offset which is read as UTC.
    pub fn to_date_time(&self) -> Option<DateTime<Utc>> {
        parse_date_time(self.as_literal()?)
    }

    /// Borrow the embedded record if it is exactly of kind `R`.
    pub fn to_resource<R: ResourceKind>(&self) -> Option<&R> {
        R::from_reference(self.as_reference()?)
    }
}

fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl std::fmt::Display for PropertyContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(raw) => f.write_str(raw),
            Self::Reference(reference) => write!(f, "{}", reference),
        }
    }
}
