//! Service definition draft handling
//!
//! This module provides the draft document model, the TypeName-keyed
//! extension lookup and the patch operations applied before staging.

pub mod errors;
pub mod document;
pub mod extension;
pub mod capabilities;
pub mod properties;
pub mod patcher;
pub mod inspect;
pub mod constants;
#[cfg(test)]
pub(crate) mod tests;

pub use errors::{DraftError, DraftResult};
pub use document::{DraftDocument, Element, XmlNode};
pub use capabilities::{Capability, CapabilitySet};
pub use properties::{timezone_properties, PropertyEntry};
pub use patcher::{DraftPatcher, PatchOutcome};
pub use inspect::{inspect, DraftReport, ExtensionSummary};
pub use constants::type_names;
