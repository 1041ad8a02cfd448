//! BaseSpace client property layer
//!
//! Resources returned by BaseSpace carry server-defined properties. The typed
//! model lives in [`basespace_types`]; this crate adds what a client needs on
//! top of it:
//!
//! - [`PropertyExt`] - narrowing a [`Property`] into scalars, arrays and records
//! - [`decode_response`] - unwrapping a response body, or classifying the failure
//! - [`ClientSettings`] - endpoints from the environment
//! - [`inspect`] - loading saved responses from disk
//! - [`logging`] - tracing subscriber setup for binaries
//!
//! ## Quick Start
//!
//! ```rust
//! use basespace_sdk::{decode_response, PropertyContainer, PropertyExt};
//!
//! let body = r#"{"Response": {
//!     "Items": [{"Type": "string", "Name": "BarcodeId", "Content": "7"}],
//!     "DisplayedCount": 1, "TotalCount": 1
//! }}"#;
//!
//! let container: PropertyContainer = decode_response(200, body).unwrap();
//! let barcode = container.find_property("BarcodeId").unwrap();
//! assert_eq!(barcode.to_int(), Some(7));
//! assert!(barcode.to_sample_array().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod property_ext;
pub mod response;

pub use basespace_types::{
    property_types, AppResultCompact, AppSessionCompact, ApplicationCompact, FileCompact,
    ProjectCompact, Property, PropertyContainer, PropertyContent, PropertyDecodeError,
    PropertyValue, ResourceKind, ResourceReference, RunCompact, SampleCompact, UserCompact,
};
pub use config::ClientSettings;
pub use error::{BaseSpaceError, ResponseStatus, Result};
pub use property_ext::PropertyExt;
pub use response::{decode_response, ResponseEnvelope};
