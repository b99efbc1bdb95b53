pub mod draft;
pub mod publish;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::DraftKit;

pub use draft::{DraftDocument, DraftError, DraftPatcher, DraftResult, PatchOutcome, PropertyEntry};
pub use publish::{GisToolkit, PublishConfig, Publisher, ServiceRequest};
