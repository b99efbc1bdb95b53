//! Draft patching command
//!
//! This module implements the command that applies capability, protocol
//! and timezone patches to a service definition draft.

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::draft::errors::{DraftError, DraftResult};
use crate::draft::patcher::DraftPatcher;
use crate::draft::properties::timezone_properties;
use crate::draft::type_names;
use crate::publish::config::{PublishConfig, ServiceSettings};
use crate::utils::logger::Logger;

/// Command for patching a draft in place
pub struct PatchCommand<'a> {
    /// Path to the draft file
    input_file: String,
    /// Grant editing capabilities
    editing: bool,
    /// Grant sync capability
    sync: bool,
    /// Extensions to enable, by TypeName
    protocols: Vec<String>,
    /// Timezone ID for date fields
    timezone: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> PatchCommand<'a> {
    /// Create a new patch command
    ///
    /// Flags on the command line are combined with the `[service]`
    /// table of the optional configuration file; an explicit
    /// `--timezone` wins over the configured one.
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new PatchCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> DraftResult<Self> {
        let input_file = args.get_one::<String>("input")
            .ok_or_else(|| DraftError::GenericError("Missing input draft".to_string()))?
            .clone();

        let settings = match args.get_one::<String>("config") {
            Some(path) => PublishConfig::from_file(path)?.service,
            None => ServiceSettings::default(),
        };

        let mut protocols: Vec<String> = args.get_many::<String>("protocol")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let wfs = args.get_flag("wfs") || settings.wfs;
        if wfs && !protocols.iter().any(|p| p == type_names::WFS_SERVER) {
            protocols.insert(0, type_names::WFS_SERVER.to_string());
        }

        let timezone = args.get_one::<String>("timezone")
            .cloned()
            .or(Some(settings.timezone))
            .map(|tz| tz.trim().to_string())
            .filter(|tz| !tz.is_empty());

        Ok(PatchCommand {
            input_file,
            editing: args.get_flag("editing") || settings.editing,
            sync: args.get_flag("sync") || settings.sync,
            protocols,
            timezone,
            logger,
        })
    }
}

impl<'a> Command for PatchCommand<'a> {
    fn execute(&self) -> DraftResult<()> {
        let patcher = DraftPatcher::new(self.logger);
        let mut results = Vec::new();

        if self.editing || self.sync {
            let outcome = patcher.set_capabilities(&self.input_file, self.editing, self.sync)?;
            results.push(("Capabilities".to_string(), outcome.to_string()));
        }

        for protocol in &self.protocols {
            let outcome = patcher.enable_protocol(&self.input_file, protocol)?;
            results.push((protocol.clone(), outcome.to_string()));
        }

        if let Some(timezone) = &self.timezone {
            let outcome = patcher.set_timezone(&self.input_file, &timezone_properties(timezone))?;
            results.push((format!("Timezone {}", timezone), outcome.to_string()));
        }

        if results.is_empty() {
            warn!("No patches requested for {}", self.input_file);
            return Ok(());
        }

        info!("Patched {} ({} operations)", self.input_file, results.len());
        self.logger.log_section(&format!("Patch summary for {}:", self.input_file), &results)?;

        Ok(())
    }
}
