//! External GIS toolkit interface
//!
//! Exporting maps to drafts, staging, uploading and sharing are performed by
//! an external GIS toolkit. The publishing pipeline only talks to it through
//! this trait and exchanges file paths and opaque identifiers.

use std::path::Path;

use crate::draft::errors::DraftResult;
use crate::publish::config::{PortalSettings, SharingSettings};
use crate::publish::request::ServiceMetadata;

/// A service definition item found on the portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceItem {
    pub id: String,
    /// Item name, usually `<service>.sd`
    pub name: String,
}

/// A hosted service produced by publishing a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedService {
    pub title: String,
    pub url: String,
}

/// Operations delegated to the external GIS toolkit
pub trait GisToolkit {
    /// Sign in to the portal at `portal.url` as `portal.user`
    ///
    /// # Returns
    /// The user name reported by the portal
    fn sign_in(&mut self, portal: &PortalSettings, password: &str) -> DraftResult<String>;

    /// Names of the maps in the current project
    fn list_maps(&self) -> DraftResult<Vec<String>>;

    /// Export a map as a hosted feature service draft
    fn export_draft(&mut self, map: &str, metadata: &ServiceMetadata, draft_path: &Path) -> DraftResult<()>;

    /// Stage a draft into a service definition package
    fn stage_service(&mut self, draft_path: &Path, definition_path: &Path) -> DraftResult<()>;

    /// Upload a package to a portal folder, applying sharing
    ///
    /// # Returns
    /// The REST endpoint of the published service
    fn upload_definition(&mut self, definition_path: &Path, folder: &str, sharing: &SharingSettings) -> DraftResult<String>;

    /// Service definition items owned by `owner`
    fn search_service_definitions(&self, owner: &str, max_items: usize) -> DraftResult<Vec<ServiceItem>>;

    /// Replace an item's data with a package and republish it over the existing service
    fn overwrite_service(&mut self, item_id: &str, definition_path: &Path) -> DraftResult<PublishedService>;

    /// Apply sharing settings to a published service
    fn share(&mut self, service: &PublishedService, sharing: &SharingSettings) -> DraftResult<()>;
}
