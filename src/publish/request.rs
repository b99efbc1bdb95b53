//! Publishing requests

use std::path::PathBuf;

use crate::publish::config::{ServiceSettings, SharingSettings};

/// Item properties written into the exported draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetadata {
    pub service_name: String,
    pub summary: String,
    pub tags: String,
    pub description: String,
    pub credits: String,
    pub use_limitations: String,
    /// Replace an existing service of the same name
    pub overwrite: bool,
}

impl ServiceMetadata {
    /// Metadata taken from configured service defaults
    pub fn from_settings(service_name: &str, settings: &ServiceSettings) -> Self {
        ServiceMetadata {
            service_name: service_name.to_string(),
            summary: settings.summary.clone(),
            tags: settings.tags.clone(),
            description: settings.description.clone(),
            credits: settings.credits.clone(),
            use_limitations: settings.use_limitations.clone(),
            overwrite: settings.overwrite,
        }
    }
}

/// Everything needed to publish one map as a hosted feature service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Name of the map in the project
    pub map: String,
    pub metadata: ServiceMetadata,
    pub editing: bool,
    pub sync: bool,
    pub wfs: bool,
    /// Timezone ID for date fields
    pub timezone: Option<String>,
    pub sharing: SharingSettings,
    /// Directory receiving the draft and the staged package
    pub output_dir: PathBuf,
}

impl ServiceRequest {
    /// Build a request from configuration defaults
    pub fn from_settings(
        map: &str,
        service_name: &str,
        settings: &ServiceSettings,
        sharing: &SharingSettings,
        output_dir: PathBuf,
    ) -> Self {
        let timezone = Some(settings.timezone.trim())
            .filter(|tz| !tz.is_empty())
            .map(str::to_string);

        ServiceRequest {
            map: map.to_string(),
            metadata: ServiceMetadata::from_settings(service_name, settings),
            editing: settings.editing,
            sync: settings.sync,
            wfs: settings.wfs,
            timezone,
            sharing: sharing.clone(),
            output_dir,
        }
    }
}
