//! Command-line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the `sddraftkit` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("sddraftkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Patch service definition drafts before staging")
        .arg(
            Arg::new("input")
                .help("Input .sddraft file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inspect")
                .short('i')
                .long("inspect")
                .help("Show extensions and managed values without modifying the draft")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration providing default service settings")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("editing")
                .long("editing")
                .help("Grant Create, Delete, Update and Editing capabilities")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sync")
                .long("sync")
                .help("Grant the Sync capability")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("wfs")
                .long("wfs")
                .help("Enable the WFS extension")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("protocol")
                .long("protocol")
                .help("Enable the extension with this TypeName (repeatable)")
                .value_name("TYPENAME")
                .action(ArgAction::Append)
                .required(false),
        )
        .arg(
            Arg::new("timezone")
                .long("timezone")
                .help("Timezone ID for date fields (e.g. 'Pacific Standard Time')")
                .value_name("ID")
                .required(false),
        )
}
