//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod patch_command;
pub mod inspect_command;

#[cfg(test)]
mod tests;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use patch_command::PatchCommand;
pub use inspect_command::InspectCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::draft::errors::DraftResult;

/// Factory for creating command instances based on CLI arguments
pub struct DraftCommandFactory;

impl DraftCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        DraftCommandFactory
    }
}

impl Default for DraftCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for DraftCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> DraftResult<Box<dyn Command + 'a>> {
        if args.get_flag("inspect") {
            Ok(Box::new(InspectCommand::new(args, logger)?))
        } else {
            // Default to patching
            Ok(Box::new(PatchCommand::new(args, logger)?))
        }
    }
}
