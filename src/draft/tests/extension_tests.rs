//! Tests for TypeName-keyed extension lookup

extern crate std;

use crate::draft::document::{DraftDocument, Element};
use crate::draft::extension::{descend, find_extensions, is_extension, locate_mut};
use crate::draft::tests::test_utils::SAMPLE_DRAFT;

#[test]
fn test_find_extensions_by_type_name() {
    let doc = DraftDocument::parse(SAMPLE_DRAFT).unwrap();

    let features = find_extensions(&doc.root, "FeatureServer");
    std::assert_eq!(features.len(), 1);
    std::assert_eq!(features[0].child("Enabled").and_then(Element::text), Some("true"));

    std::assert!(find_extensions(&doc.root, "KmlServer").is_empty());
}

#[test]
fn test_type_name_must_match_exactly() {
    let ext = Element::new("SVCExtension")
        .with_child(Element::new("TypeName").with_text("MapServerX"));
    std::assert!(!is_extension(&ext, "MapServer"));
    std::assert!(is_extension(&ext, "MapServerX"));

    // TypeName without text never matches
    let empty = Element::new("SVCExtension").with_child(Element::new("TypeName"));
    std::assert!(!is_extension(&empty, ""));
}

#[test]
fn test_descend_follows_every_match() {
    let root = Element::new("Ext")
        .with_child(Element::new("Definition").with_child(Element::new("Info")))
        .with_child(Element::new("Definition").with_child(Element::new("Info")))
        .with_child(Element::new("Other").with_child(Element::new("Info")));

    std::assert_eq!(descend(&root, &["Definition", "Info"]).len(), 2);
    std::assert_eq!(descend(&root, &["Definition", "Missing"]).len(), 0);
    std::assert_eq!(descend(&root, &[]).len(), 1);
}

#[test]
fn test_locate_mut_counts() {
    let mut doc = DraftDocument::parse(SAMPLE_DRAFT).unwrap();

    let mut visited = Vec::new();
    let lookup = locate_mut(&mut doc.root, "MapServer", &["Definition", "ConfigurationProperties"], |node| {
        visited.push(node.name().to_string());
    });
    std::assert_eq!(lookup.extensions, 1);
    std::assert_eq!(lookup.targets, 1);
    std::assert_eq!(visited, vec!["ConfigurationProperties".to_string()]);

    let lookup = locate_mut(&mut doc.root, "EnableWFSServer", &["Definition"], |_| {});
    std::assert_eq!(lookup.extensions, 1);
    std::assert_eq!(lookup.targets, 0);
}
