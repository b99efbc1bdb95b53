//! Service publishing workflows
//!
//! This module wires the draft patcher between the export, staging and
//! upload steps performed by an external GIS toolkit.

pub mod config;
pub mod toolkit;
pub mod request;
pub mod pipeline;

pub use config::{PortalSettings, PublishConfig, ServiceSettings, SharingSettings};
pub use toolkit::{GisToolkit, PublishedService, ServiceItem};
pub use request::{ServiceMetadata, ServiceRequest};
pub use pipeline::{OverwriteSummary, PublishReport, Publisher};
