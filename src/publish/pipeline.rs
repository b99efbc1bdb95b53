//! Publishing pipeline
//!
//! Drives the toolkit through export, draft patching, staging and upload,
//! and overwrites existing hosted services from the maps of a project.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::draft::errors::DraftResult;
use crate::draft::patcher::{DraftPatcher, PatchOutcome};
use crate::draft::properties::timezone_properties;
use crate::publish::config::{PortalSettings, ServiceSettings, SharingSettings};
use crate::publish::request::{ServiceMetadata, ServiceRequest};
use crate::publish::toolkit::{GisToolkit, ServiceItem};
use crate::utils::logger::Logger;
use crate::utils::name_utils::{definition_path, draft_path, service_name_from_item, validate_service_name};
use crate::utils::progress::ProgressTracker;

/// Most service definition items fetched from a portal search
pub const MAX_SEARCH_ITEMS: usize = 100;

/// Base name of the shared staging files used while overwriting
const TEMP_FILE_NAME: &str = "TempFile";

/// Result of publishing one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// REST endpoint reported by the portal
    pub endpoint: String,
    /// Draft patches applied before staging, by name
    pub patches: Vec<(String, PatchOutcome)>,
}

/// Result of overwriting one existing service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverwriteSummary {
    pub service: String,
    pub item_id: String,
    pub title: String,
    pub shared: bool,
}

/// Runs publishing workflows against a toolkit
pub struct Publisher<'a, T: GisToolkit> {
    toolkit: T,
    portal: PortalSettings,
    /// Logger for recording operations
    logger: &'a Logger,
    show_progress: bool,
    /// User name of the active portal session
    session: Option<String>,
}

impl<'a, T: GisToolkit> Publisher<'a, T> {
    pub fn new(toolkit: T, portal: &PortalSettings, logger: &'a Logger) -> Self {
        Publisher {
            toolkit,
            portal: portal.clone(),
            logger,
            show_progress: false,
            session: None,
        }
    }

    /// Draw a progress bar during batch overwrites
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn into_toolkit(self) -> T {
        self.toolkit
    }

    /// Sign in once per publisher, with the password from the environment
    fn connect(&mut self) -> DraftResult<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let password = self.portal.password()?;
        let user = self.toolkit.sign_in(&self.portal, &password)?;
        info!("Successfully logged in as: {}", user);
        self.session = Some(user);
        Ok(())
    }

    /// Publish a map as a hosted feature service
    ///
    /// # Arguments
    /// * `request` - Map, service properties, patch flags and sharing
    ///
    /// # Returns
    /// The endpoint of the published service and the patch outcomes
    pub fn publish(&mut self, request: &ServiceRequest) -> DraftResult<PublishReport> {
        let service = request.metadata.service_name.as_str();
        validate_service_name(service)?;
        self.connect()?;
        fs::create_dir_all(&request.output_dir)?;

        let draft = draft_path(&request.output_dir, service);
        self.toolkit.export_draft(&request.map, &request.metadata, &draft)?;
        info!("Service definition draft created: {}", draft.display());

        let patcher = DraftPatcher::new(self.logger);
        let mut patches = Vec::new();

        if request.editing || request.sync {
            let outcome = patcher.set_capabilities(&draft, request.editing, request.sync)?;
            patches.push(("capabilities".to_string(), outcome));
        }
        if request.wfs {
            let outcome = patcher.enable_wfs(&draft)?;
            patches.push(("wfs".to_string(), outcome));
        }
        if let Some(timezone) = request.timezone.as_deref().filter(|tz| !tz.is_empty()) {
            let outcome = patcher.set_timezone(&draft, &timezone_properties(timezone))?;
            patches.push(("timezone".to_string(), outcome));
        }

        let definition = definition_path(&request.output_dir, service);
        self.toolkit.stage_service(&draft, &definition)?;
        info!("Service definition created: {}", definition.display());

        let endpoint = self.toolkit.upload_definition(&definition, &self.portal.folder, &request.sharing)?;
        info!("Service published: {}", endpoint);
        self.logger.log(&format!("Published {} at {}", service, endpoint))?;

        Ok(PublishReport { endpoint, patches })
    }

    /// Overwrite every portal service whose name matches a project map
    ///
    /// Definitions owned by the configured portal user are matched to maps
    /// by name (item name without the `.sd` suffix). Each match is exported,
    /// staged through shared temporary files in `staging_dir` and published
    /// over the existing service.
    pub fn overwrite_all(
        &mut self,
        staging_dir: &Path,
        settings: &ServiceSettings,
        sharing: &SharingSettings,
    ) -> DraftResult<Vec<OverwriteSummary>> {
        self.connect()?;
        let maps = self.toolkit.list_maps()?;
        let items = self
            .toolkit
            .search_service_definitions(&self.portal.user, MAX_SEARCH_ITEMS)?;
        debug!("Found {} maps and {} service definition items", maps.len(), items.len());

        let matches: Vec<(String, String)> = index_services(&items)
            .into_iter()
            .filter(|(name, _)| maps.iter().any(|map| map == name))
            .collect();

        fs::create_dir_all(staging_dir)?;
        let draft = draft_path(staging_dir, TEMP_FILE_NAME);
        let definition = definition_path(staging_dir, TEMP_FILE_NAME);

        let progress = if self.show_progress {
            ProgressTracker::new(matches.len() as u64, "Overwriting services")
        } else {
            ProgressTracker::hidden(matches.len() as u64)
        };

        let mut summaries = Vec::with_capacity(matches.len());
        for (service, item_id) in matches {
            progress.set_message(&service);

            let mut metadata = ServiceMetadata::from_settings(&service, settings);
            metadata.overwrite = true;
            self.toolkit.export_draft(&service, &metadata, &draft)?;
            self.toolkit.stage_service(&draft, &definition)?;

            info!("Overwriting {}...", service);
            let published = self.toolkit.overwrite_service(&item_id, &definition)?;

            let shared = sharing.is_shared();
            if shared {
                info!("Setting sharing options...");
                self.toolkit.share(&published, sharing)?;
            }

            info!("Successfully updated {}.", published.title);
            self.logger.log(&format!("Overwrote {} ({})", service, item_id))?;

            summaries.push(OverwriteSummary {
                service,
                item_id,
                title: published.title,
                shared,
            });
            progress.increment(1);
        }
        progress.finish();

        Ok(summaries)
    }
}

/// Map service names to item IDs, keeping search order
///
/// Items not named `<service>.sd` are ignored; a later item with the same
/// service name replaces the earlier ID.
fn index_services(items: &[ServiceItem]) -> Vec<(String, String)> {
    let mut services: Vec<(String, String)> = Vec::new();

    for item in items {
        let Some(name) = service_name_from_item(&item.name) else {
            continue;
        };
        match services.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = item.id.clone(),
            None => services.push((name.to_string(), item.id.clone())),
        }
    }

    services
}
