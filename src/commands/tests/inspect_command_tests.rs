//! Tests for the inspect command

extern crate std;

use std::env;
use std::fs;

use crate::commands::{build_cli, Command, CommandFactory, DraftCommandFactory};
use crate::draft::tests::test_utils::{test_logger, write_draft, SAMPLE_DRAFT};

#[test]
fn test_inspect_logs_extensions_without_writing() {
    let draft = write_draft("cmd_inspect", SAMPLE_DRAFT);
    let matches = build_cli()
        .try_get_matches_from(["sddraftkit", draft.to_str().unwrap(), "--inspect", "--editing"])
        .unwrap();

    let logger = test_logger("cmd_inspect");
    let command = DraftCommandFactory::new().create_command(&matches, &logger).unwrap();
    command.execute().unwrap();

    // --inspect wins over patch flags
    std::assert_eq!(fs::read_to_string(&draft).unwrap(), SAMPLE_DRAFT);

    let log_path = env::temp_dir()
        .join(format!("sddraftkit-tests-{}", std::process::id()))
        .join("cmd_inspect.log");
    let log = fs::read_to_string(log_path).unwrap();
    let header = format!("Extensions in {}:", draft.display());
    let lines: Vec<&str> = log.lines().collect();
    std::assert_eq!(
        lines,
        vec![
            header.as_str(),
            "  FeatureServer: true",
            "  EnableWFSServer: false",
            "  MapServer: true",
        ]
    );
}

#[test]
fn test_inspect_missing_draft_fails() {
    let matches = build_cli()
        .try_get_matches_from(["sddraftkit", "/nonexistent/sddraftkit/missing.sddraft", "-i"])
        .unwrap();

    let logger = test_logger("cmd_inspect_missing");
    let command = DraftCommandFactory::new().create_command(&matches, &logger).unwrap();

    std::assert!(command.execute().is_err());
}
