use std::path::Path;
use log::info;
use crate::draft::errors::DraftResult;
use crate::draft::inspect::{inspect, DraftReport};
use crate::draft::patcher::{DraftPatcher, PatchOutcome};
use crate::draft::properties::{timezone_properties, PropertyEntry};
use crate::publish::config::PublishConfig;
use crate::publish::pipeline::{OverwriteSummary, PublishReport, Publisher};
use crate::publish::request::ServiceRequest;
use crate::publish::toolkit::GisToolkit;
use crate::utils::logger::Logger;

/// Main interface to the sddraftkit library
pub struct DraftKit {
    logger: Logger,
}

impl DraftKit {
    /// Create a new DraftKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "sddraftkit.log"
    ///
    /// # Returns
    /// A DraftKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> DraftResult<Self> {
        let log_path = log_file.unwrap_or("sddraftkit.log");
        let logger = Logger::new(log_path)?;
        Ok(DraftKit { logger })
    }

    /// Set feature service capabilities from the editing and sync flags
    pub fn set_capabilities<P: AsRef<Path>>(&self, draft: P, editing: bool, sync: bool) -> DraftResult<PatchOutcome> {
        DraftPatcher::new(&self.logger).set_capabilities(draft, editing, sync)
    }

    /// Enable the extension carrying `type_name`
    pub fn enable_protocol<P: AsRef<Path>>(&self, draft: P, type_name: &str) -> DraftResult<PatchOutcome> {
        DraftPatcher::new(&self.logger).enable_protocol(draft, type_name)
    }

    /// Enable WFS on the draft
    pub fn enable_wfs<P: AsRef<Path>>(&self, draft: P) -> DraftResult<PatchOutcome> {
        DraftPatcher::new(&self.logger).enable_wfs(draft)
    }

    /// Append arbitrary MapServer configuration properties
    pub fn set_properties<P: AsRef<Path>>(&self, draft: P, properties: &[PropertyEntry]) -> DraftResult<PatchOutcome> {
        DraftPatcher::new(&self.logger).set_timezone(draft, properties)
    }

    /// Make date fields use `timezone_id`, respecting daylight saving time
    pub fn set_timezone<P: AsRef<Path>>(&self, draft: P, timezone_id: &str) -> DraftResult<PatchOutcome> {
        self.set_properties(draft, &timezone_properties(timezone_id))
    }

    /// Report the current state of a draft
    pub fn inspect<P: AsRef<Path>>(&self, draft: P) -> DraftResult<DraftReport> {
        inspect(draft)
    }

    /// Publish a single map through the given toolkit
    ///
    /// # Returns
    /// The publish report, including the service endpoint
    pub fn publish<T: GisToolkit>(&self, toolkit: T, config: &PublishConfig, request: &ServiceRequest) -> DraftResult<PublishReport> {
        let mut publisher = Publisher::new(toolkit, &config.portal, &self.logger);
        let report = publisher.publish(request)?;
        info!("Published {} ({} patches)", request.metadata.service_name, report.patches.len());
        Ok(report)
    }

    /// Overwrite every hosted service matching a project map
    ///
    /// Staging files are written to the configured project folder.
    pub fn overwrite_services<T: GisToolkit>(&self, toolkit: T, config: &PublishConfig) -> DraftResult<Vec<OverwriteSummary>> {
        info!("Overwriting services owned by {} on {}", config.portal.user, config.portal.url);
        let mut publisher = Publisher::new(toolkit, &config.portal, &self.logger).with_progress(true);
        publisher.overwrite_all(&config.project_folder, &config.service, &config.sharing)
    }
}
