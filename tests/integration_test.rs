//! Integration tests for the draft patching workflow

extern crate std;

use std::env;
use std::fs;
use std::path::PathBuf;

use sddraftkit::DraftKit;
use sddraftkit::PatchOutcome;

const DRAFT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<SVCManifest xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <SVCExtension>
    <Enabled>true</Enabled>
    <TypeName>FeatureServer</TypeName>
    <Definition>
      <Info>
        <PropertyArray>
          <PropertySetProperty>
            <Key>webCapabilities</Key>
            <Value>Query</Value>
          </PropertySetProperty>
        </PropertyArray>
      </Info>
    </Definition>
  </SVCExtension>
  <SVCExtension>
    <Enabled>false</Enabled>
    <TypeName>EnableWFSServer</TypeName>
  </SVCExtension>
  <SVCExtension>
    <Enabled>true</Enabled>
    <TypeName>MapServer</TypeName>
    <Definition>
      <ConfigurationProperties>
        <PropertyArray/>
      </ConfigurationProperties>
    </Definition>
  </SVCExtension>
</SVCManifest>
"#;

fn workspace(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("sddraftkit-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn test_complete_patch_workflow() {
    let log = workspace("integration_test.log");
    let kit = DraftKit::new(log.to_str()).unwrap();
    let draft = workspace("workflow.sddraft");
    fs::write(&draft, DRAFT).unwrap();

    std::assert_eq!(kit.set_capabilities(&draft, true, true).unwrap(), PatchOutcome::Applied(1));
    std::assert_eq!(kit.enable_wfs(&draft).unwrap(), PatchOutcome::Applied(1));
    std::assert_eq!(kit.set_timezone(&draft, "Eastern Standard Time").unwrap(), PatchOutcome::Applied(2));

    let report = kit.inspect(&draft).unwrap();
    std::assert_eq!(report.web_capabilities, vec!["Query,Create,Delete,Update,Editing,Sync".to_string()]);
    std::assert_eq!(report.extension("EnableWFSServer").unwrap().enabled.as_deref(), Some("true"));
    std::assert_eq!(report.map_server_properties.len(), 2);
    std::assert_eq!(report.map_server_values("dateFieldsRespectsDayLightSavingTime"), vec!["true"]);

    // The log records one line per patch
    let log_content = fs::read_to_string(&log).unwrap();
    std::assert_eq!(log_content.lines().count(), 3);
}

#[test]
fn test_unknown_protocol_is_reported() {
    let log = workspace("integration_protocol.log");
    let kit = DraftKit::new(log.to_str()).unwrap();
    let draft = workspace("protocol.sddraft");
    fs::write(&draft, DRAFT).unwrap();

    std::assert_eq!(kit.enable_protocol(&draft, "WMSServer").unwrap(), PatchOutcome::ExtensionMissing);
    std::assert_eq!(kit.inspect(&draft).unwrap().extension("EnableWFSServer").unwrap().enabled.as_deref(), Some("false"));
}
