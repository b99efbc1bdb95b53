//! Tests for the draft patch operations

extern crate std;

use std::fs;

use crate::draft::capabilities::CapabilitySet;
use crate::draft::document::{DraftDocument, Element};
use crate::draft::errors::DraftError;
use crate::draft::inspect::inspect;
use crate::draft::patcher::{apply_capabilities, apply_protocol_enable, apply_timezone, DraftPatcher, PatchOutcome};
use crate::draft::properties::{timezone_properties, PropertyEntry};
use crate::draft::tests::test_utils::{
    test_logger, write_draft, BARE_DRAFT, EMPTY_CAPABILITIES_DRAFT, SAMPLE_DRAFT,
};

#[test]
fn test_capabilities_fill_empty_value() {
    let logger = test_logger("patch_caps_empty");
    let path = write_draft("patch_caps_empty", EMPTY_CAPABILITIES_DRAFT);

    let outcome = DraftPatcher::new(&logger).set_capabilities(&path, true, false).unwrap();

    std::assert_eq!(outcome, PatchOutcome::Applied(1));
    let report = inspect(&path).unwrap();
    std::assert_eq!(report.web_capabilities, vec!["Query,Create,Delete,Update,Editing".to_string()]);
}

#[test]
fn test_capabilities_idempotent() {
    let logger = test_logger("patch_caps_twice");
    let path = write_draft("patch_caps_twice", SAMPLE_DRAFT);
    let patcher = DraftPatcher::new(&logger);

    std::assert_eq!(patcher.set_capabilities(&path, true, true).unwrap(), PatchOutcome::Applied(1));
    let first = fs::read_to_string(&path).unwrap();

    std::assert_eq!(patcher.set_capabilities(&path, true, true).unwrap(), PatchOutcome::Unchanged);
    let second = fs::read_to_string(&path).unwrap();

    std::assert_eq!(first, second);
    std::assert_eq!(
        inspect(&path).unwrap().web_capabilities,
        vec!["Query,Create,Delete,Update,Editing,Sync".to_string()]
    );
}

#[test]
fn test_capabilities_leave_other_properties_alone() {
    let mut doc = DraftDocument::parse(SAMPLE_DRAFT).unwrap();
    apply_capabilities(&mut doc.root, &CapabilitySet::from_flags(false, true));

    let xml = doc.to_xml_string().unwrap();
    std::assert!(xml.contains("<Value xsi:type=\"xs:string\">Query,Sync</Value>"));
    std::assert!(xml.contains("<Key>allowGeometryUpdates</Key>"));
    std::assert!(xml.contains("<Value xsi:type=\"xs:string\">true</Value>"));
}

#[test]
fn test_capabilities_keep_surrounding_whitespace_in_other_values() {
    let xml = SAMPLE_DRAFT.replace(
        "<Value xsi:type=\"xs:string\">true</Value>",
        "<Value xsi:type=\"xs:string\">  Roads and rails \n</Value>",
    );
    let path = write_draft("patch_caps_whitespace", &xml);
    let logger = test_logger("patch_caps_whitespace");

    DraftPatcher::new(&logger).set_capabilities(&path, true, false).unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    std::assert!(saved.contains("<Value xsi:type=\"xs:string\">  Roads and rails \n</Value>"));
}

#[test]
fn test_capabilities_update_every_property_set() {
    let xml = r#"<Root>
      <Ext><TypeName>FeatureServer</TypeName>
        <Definition><Info>
          <PropertyArray>
            <PropertySetProperty><Key>webCapabilities</Key><Value>Query</Value></PropertySetProperty>
          </PropertyArray>
          <PropertyArray>
            <PropertySetProperty><Key>webCapabilities</Key><Value/></PropertySetProperty>
          </PropertyArray>
        </Info></Definition>
      </Ext>
    </Root>"#;
    let mut doc = DraftDocument::parse(xml).unwrap();

    let outcome = apply_capabilities(&mut doc.root, &CapabilitySet::from_flags(true, false));

    std::assert_eq!(outcome, PatchOutcome::Applied(2));
}

#[test]
fn test_capabilities_skip_key_without_value_sibling() {
    let xml = r#"<Root><Ext><TypeName>FeatureServer</TypeName>
        <Definition><Info><PropertyArray>
          <PropertySetProperty><Key>webCapabilities</Key><Other>Query</Other></PropertySetProperty>
        </PropertyArray></Info></Definition>
    </Ext></Root>"#;
    let mut doc = DraftDocument::parse(xml).unwrap();
    let before = doc.clone();

    let outcome = apply_capabilities(&mut doc.root, &CapabilitySet::from_flags(true, true));

    std::assert_eq!(outcome, PatchOutcome::StructureMissing);
    std::assert_eq!(doc, before);
}

#[test]
fn test_capabilities_without_definition() {
    let xml = "<Root><Ext><TypeName>FeatureServer</TypeName><Enabled>true</Enabled></Ext></Root>";
    let mut doc = DraftDocument::parse(xml).unwrap();

    let outcome = apply_capabilities(&mut doc.root, &CapabilitySet::from_flags(true, false));
    std::assert_eq!(outcome, PatchOutcome::StructureMissing);
}

#[test]
fn test_capabilities_without_feature_server() {
    let mut doc = DraftDocument::parse(BARE_DRAFT).unwrap();
    let outcome = apply_capabilities(&mut doc.root, &CapabilitySet::from_flags(true, false));
    std::assert_eq!(outcome, PatchOutcome::ExtensionMissing);
}

#[test]
fn test_enable_wfs() {
    let logger = test_logger("patch_wfs");
    let path = write_draft("patch_wfs", SAMPLE_DRAFT);
    let patcher = DraftPatcher::new(&logger);

    std::assert_eq!(patcher.enable_wfs(&path).unwrap(), PatchOutcome::Applied(1));
    std::assert_eq!(patcher.enable_wfs(&path).unwrap(), PatchOutcome::Unchanged);

    let report = inspect(&path).unwrap();
    let wfs = report.extension("EnableWFSServer").unwrap();
    std::assert_eq!(wfs.enabled.as_deref(), Some("true"));
}

#[test]
fn test_enable_protocol_fills_empty_enabled() {
    let mut doc = DraftDocument::parse("<R><E><TypeName>X</TypeName><Enabled/></E></R>").unwrap();
    std::assert_eq!(apply_protocol_enable(&mut doc.root, "X"), PatchOutcome::Applied(1));
    let ext = doc.root.child("E").unwrap();
    std::assert_eq!(ext.child("Enabled").and_then(Element::text), Some("true"));
}

#[test]
fn test_enable_protocol_missing_extension_keeps_document() {
    let logger = test_logger("patch_wfs_missing");
    let path = write_draft("patch_wfs_missing", BARE_DRAFT);
    let original = DraftDocument::parse(BARE_DRAFT).unwrap();

    let outcome = DraftPatcher::new(&logger).enable_wfs(&path).unwrap();

    std::assert_eq!(outcome, PatchOutcome::ExtensionMissing);
    std::assert_eq!(DraftDocument::load(&path).unwrap(), original);
}

#[test]
fn test_timezone_appends_entries() {
    let logger = test_logger("patch_timezone");
    let path = write_draft("patch_timezone", SAMPLE_DRAFT);
    let patcher = DraftPatcher::new(&logger);
    let properties = timezone_properties("Pacific Standard Time");

    std::assert_eq!(patcher.set_timezone(&path, &properties).unwrap(), PatchOutcome::Applied(2));

    let report = inspect(&path).unwrap();
    std::assert_eq!(report.map_server_properties.len(), 3);
    std::assert_eq!(report.map_server_values("dateFieldsRespectsDayLightSavingTime"), vec!["true"]);
    std::assert_eq!(report.map_server_values("dateFieldsTimezoneID"), vec!["Pacific Standard Time"]);
}

#[test]
fn test_timezone_twice_appends_duplicates() {
    let logger = test_logger("patch_timezone_twice");
    let path = write_draft("patch_timezone_twice", SAMPLE_DRAFT);
    let patcher = DraftPatcher::new(&logger);
    let properties = timezone_properties("UTC");

    patcher.set_timezone(&path, &properties).unwrap();
    patcher.set_timezone(&path, &properties).unwrap();

    let report = inspect(&path).unwrap();
    // One original entry plus four appended
    std::assert_eq!(report.map_server_properties.len(), 5);
    std::assert_eq!(report.map_server_values("dateFieldsTimezoneID"), vec!["UTC", "UTC"]);
}

#[test]
fn test_timezone_node_shape() {
    let mut doc = DraftDocument::parse(SAMPLE_DRAFT).unwrap();
    apply_timezone(&mut doc.root, &[PropertyEntry::new("dateFieldsTimezoneID", "UTC")]);

    let xml = doc.to_xml_string().unwrap();
    std::assert!(xml.contains("<PropertySetProperty xsi:type=\"typens:PropertySetProperty\">"));
    std::assert!(xml.contains("<Key>dateFieldsTimezoneID</Key>"));
    std::assert!(xml.contains("<Value xsi:type=\"xs:string\">UTC</Value>"));
}

#[test]
fn test_timezone_without_map_server_adds_nothing() {
    let mut doc = DraftDocument::parse(BARE_DRAFT).unwrap();
    let before = doc.root.element_count();

    let outcome = apply_timezone(&mut doc.root, &timezone_properties("UTC"));

    std::assert_eq!(outcome, PatchOutcome::ExtensionMissing);
    std::assert_eq!(doc.root.element_count(), before);
    std::assert_eq!(doc, DraftDocument::parse(BARE_DRAFT).unwrap());
}

#[test]
fn test_timezone_with_no_entries() {
    let mut doc = DraftDocument::parse(SAMPLE_DRAFT).unwrap();
    std::assert_eq!(apply_timezone(&mut doc.root, &[]), PatchOutcome::Unchanged);
}

#[test]
fn test_malformed_draft_is_not_rewritten() {
    let logger = test_logger("patch_malformed");
    let broken = "<SVCManifest><SVCExtension></SVCManifest>";
    let path = write_draft("patch_malformed", broken);

    let result = DraftPatcher::new(&logger).set_capabilities(&path, true, false);

    std::assert!(std::matches!(result, Err(DraftError::XmlError(_))));
    std::assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_outcome_satisfaction() {
    std::assert!(PatchOutcome::Applied(3).is_satisfied());
    std::assert!(PatchOutcome::Unchanged.is_satisfied());
    std::assert!(!PatchOutcome::ExtensionMissing.is_satisfied());
    std::assert!(!PatchOutcome::StructureMissing.is_satisfied());
}
