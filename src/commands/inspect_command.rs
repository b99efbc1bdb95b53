//! Draft inspection command
//!
//! Prints the extensions of a draft together with the values the
//! patch command manages.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::draft::errors::{DraftError, DraftResult};
use crate::draft::inspect::{inspect, DraftReport};
use crate::utils::logger::Logger;

/// Command for inspecting a draft without modifying it
pub struct InspectCommand<'a> {
    /// Path to the draft file
    input_file: String,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InspectCommand<'a> {
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> DraftResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| DraftError::GenericError("Missing input draft".to_string()))?
            .clone();

        Ok(InspectCommand {
            input_file,
            verbose: args.get_flag("verbose"),
            logger,
        })
    }

    fn display_report(&self, report: &DraftReport) {
        info!("Draft: {}", self.input_file);
        info!("  Extensions: {}", report.extensions.len());
        for extension in &report.extensions {
            info!("    {} (enabled: {})",
                  extension.type_name,
                  extension.enabled.as_deref().unwrap_or("n/a"));
        }

        if report.web_capabilities.is_empty() {
            info!("  webCapabilities: not found");
        }
        for capabilities in &report.web_capabilities {
            info!("  webCapabilities: {}", capabilities);
        }

        info!("  MapServer configuration properties: {}", report.map_server_properties.len());
        if self.verbose {
            for (key, value) in &report.map_server_properties {
                info!("    {} = {}", key, value);
            }
        }
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> DraftResult<()> {
        let report = inspect(&self.input_file)?;
        self.display_report(&report);

        let entries: Vec<(String, String)> = report.extensions.iter()
            .map(|e| (e.type_name.clone(), e.enabled.clone().unwrap_or_default()))
            .collect();
        self.logger.log_section(&format!("Extensions in {}:", self.input_file), &entries)?;

        Ok(())
    }
}
