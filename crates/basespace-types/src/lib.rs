//! BaseSpace property model
//!
//! Resources (samples, runs, app sessions, ...) carry an open-ended set of
//! server-defined properties. This crate is the typed, read-only snapshot of
//! those properties as delivered on the wire.
//!
//! ## Shape
//!
//! ```text
//! PropertyContainer ── Items ──► Property ── Content ──► PropertyContent
//!   DisplayedCount                 Type                    Literal("7")
//!   TotalCount                     ItemsDisplayedCount     Reference(SampleCompact)
//!                                  ItemsTotalCount
//!                                  ── Items ──► [PropertyContent]
//! ```
//!
//! ## Rules
//!
//! 1. The type tag decides everything: `string` vs `string[]`, `sample` vs `sample[]`
//! 2. Content and Items never coexist (enforced by [`PropertyValue`])
//! 3. Reading a value as the wrong shape yields `None`, never an error

pub mod content;
pub mod property;
pub mod resources;
pub mod wire;

pub use content::PropertyContent;
pub use property::{Property, PropertyContainer, PropertyValue};
pub use resources::*;
pub use wire::PropertyDecodeError;

/// Type tags the server uses for property values
pub mod property_types {
    pub const STRING: &str = "string";
    pub const SAMPLE: &str = "sample";
    pub const APPRESULT: &str = "appresult";
    pub const PROJECT: &str = "project";
    pub const APPSESSION: &str = "appsession";
    pub const RUN: &str = "run";
    pub const APPLICATION: &str = "application";
    pub const USER: &str = "user";
    pub const FILE: &str = "file";

    /// Marks a multi-valued property: `sample[]`
    pub const LIST_SUFFIX: &str = "[]";
}
