//! Compact resource records embedded in property values
//!
//! A property whose type tag names a resource kind (`sample`, `appresult[]`, ...)
//! carries the compact form of that resource instead of a literal. The records
//! here are deliberately thin: ids, hrefs and a handful of summary fields. The
//! full resource DTOs live with the request layer, not in the property model.
//!
//! The set of kinds is closed. [`ResourceReference`] has one variant per kind and
//! [`ResourceKind`] is sealed, so generic narrowing (`to_resource::<SampleCompact>()`)
//! can only ever be asked for a kind the deserializer knows how to produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::property_types;

// ============================================================================
// RECORDS
// ============================================================================

/// Sample as embedded in a `sample` / `sample[]` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SampleCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sample_id: Option<String>,
    #[serde(default)]
    pub experiment_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// App result as embedded in an `appresult` / `appresult[]` property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppResultCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Application summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub href_logo: Option<String>,
    #[serde(default)]
    pub homepage_uri: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// App session summary, including the application that launched it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSessionCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub application: Option<ApplicationCompact>,
    #[serde(default)]
    pub user_created_by: Option<UserCompact>,
    /// Running, Complete, NeedsAttention or Aborted - kept as sent
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_summary: Option<String>,
    /// Server timestamps are not always offset-qualified, so they stay as text
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub experiment_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileCompact {
    pub id: String,
    pub href: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub path: Option<String>,
}

// ============================================================================
// KIND DISPATCH
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// A compact record kind that can appear inside a property.
///
/// Sealed: implemented exactly once per [`ResourceReference`] variant.
pub trait ResourceKind: sealed::Sealed + Sized {
    /// Bare type tag for this kind, e.g. `"sample"`.
    const TYPE_TAG: &'static str;

    /// Borrow the record if `reference` holds this kind.
    fn from_reference(reference: &ResourceReference) -> Option<&Self>;

    fn into_reference(self) -> ResourceReference;
}

macro_rules! resource_kinds {
    ($($variant:ident($record:ty) => $tag:path;)+) => {
        /// One embedded resource record. Exactly one kind, fixed at decode time.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(untagged)]
        pub enum ResourceReference {
            $($variant($record),)+
        }

        impl ResourceReference {
            /// Bare type tag of the held record
            pub fn type_tag(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $tag,)+
                }
            }

            pub fn id(&self) -> &str {
                match self {
                    $(Self::$variant(r) => &r.id,)+
                }
            }

            pub fn href(&self) -> &str {
                match self {
                    $(Self::$variant(r) => &r.href,)+
                }
            }

            pub fn name(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(r) => r.name.as_deref(),)+
                }
            }

            /// True if `type_tag` (without the list suffix) names a record kind.
            pub fn is_known_tag(type_tag: &str) -> bool {
                matches!(type_tag, $($tag)|+)
            }

            /// Decode a JSON object as the record kind named by `type_tag`.
            pub fn decode(type_tag: &str, value: Value) -> serde_json::Result<Self> {
                match type_tag {
                    $($tag => serde_json::from_value::<$record>(value).map(Self::$variant),)+
                    other => Err(serde::de::Error::custom(format!(
                        "'{}' is not a resource type",
                        other
                    ))),
                }
            }
        }

        $(
            impl sealed::Sealed for $record {}

            impl ResourceKind for $record {
                const TYPE_TAG: &'static str = $tag;

                fn from_reference(reference: &ResourceReference) -> Option<&Self> {
                    match reference {
                        ResourceReference::$variant(r) => Some(r),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn into_reference(self) -> ResourceReference {
                    ResourceReference::$variant(self)
                }
            }
        )+
    };
}

resource_kinds! {
    Sample(SampleCompact) => property_types::SAMPLE;
    AppResult(AppResultCompact) => property_types::APPRESULT;
    Project(ProjectCompact) => property_types::PROJECT;
    AppSession(AppSessionCompact) => property_types::APPSESSION;
    Run(RunCompact) => property_types::RUN;
    Application(ApplicationCompact) => property_types::APPLICATION;
    User(UserCompact) => property_types::USER;
    File(FileCompact) => property_types::FILE;
}

impl std::fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} {} ({})", self.type_tag(), self.id(), name),
            None => write!(f, "{} {}", self.type_tag(), self.id()),
        }
    }
}
