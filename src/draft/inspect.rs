//! Read-only inspection of a service draft
//!
//! Used to verify patch post-conditions without touching the file.

use std::path::Path;

use crate::draft::constants::{keys, tags, type_names};
use crate::draft::document::{DraftDocument, Element};
use crate::draft::errors::DraftResult;
use crate::draft::extension::{descend, find_extensions};

/// Summary of a single service extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSummary {
    pub type_name: String,
    /// Text of the `Enabled` child, if present
    pub enabled: Option<String>,
}

/// What a draft currently declares for the patched fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftReport {
    pub extensions: Vec<ExtensionSummary>,
    /// Every FeatureServer `webCapabilities` value, in document order
    pub web_capabilities: Vec<String>,
    /// `PropertySetProperty` entries under MapServer configuration properties
    pub map_server_properties: Vec<(String, String)>,
}

impl DraftReport {
    /// Look up an extension by TypeName
    pub fn extension(&self, type_name: &str) -> Option<&ExtensionSummary> {
        self.extensions.iter().find(|e| e.type_name == type_name)
    }

    /// Values recorded for a MapServer configuration property key
    pub fn map_server_values(&self, key: &str) -> Vec<&str> {
        self.map_server_properties
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

fn text_of(element: &Element) -> String {
    element.text().unwrap_or_default().to_string()
}

/// Build a report from a parsed draft
pub fn inspect_document(document: &DraftDocument) -> DraftReport {
    let mut report = DraftReport::default();
    collect_summaries(&document.root, &mut report.extensions);

    for extension in find_extensions(&document.root, type_names::FEATURE_SERVER) {
        for info in descend(extension, &[tags::DEFINITION, tags::INFO]) {
            for property in descend_any(info, 2) {
                let children: Vec<&Element> = property.child_elements().collect();
                for pair in children.windows(2) {
                    if pair[0].name() == tags::KEY
                        && pair[0].text() == Some(keys::WEB_CAPABILITIES)
                        && pair[1].name() == tags::VALUE
                    {
                        report.web_capabilities.push(text_of(pair[1]));
                    }
                }
            }
        }
    }

    let array_path = [tags::DEFINITION, tags::CONFIGURATION_PROPERTIES, tags::PROPERTY_ARRAY];
    for extension in find_extensions(&document.root, type_names::MAP_SERVER) {
        for array in descend(extension, &array_path) {
            for property in array.child_elements() {
                if property.name() != tags::PROPERTY_SET_PROPERTY {
                    continue;
                }
                let key = property.child(tags::KEY).map(text_of).unwrap_or_default();
                let value = property.child(tags::VALUE).map(text_of).unwrap_or_default();
                report.map_server_properties.push((key, value));
            }
        }
    }

    report
}

/// Every element exactly `depth` levels below `element`
fn descend_any(element: &Element, depth: usize) -> Vec<&Element> {
    if depth == 0 {
        return vec![element];
    }
    element
        .child_elements()
        .flat_map(|child| descend_any(child, depth - 1))
        .collect()
}

fn collect_summaries(element: &Element, out: &mut Vec<ExtensionSummary>) {
    if let Some(type_name) = element.child(tags::TYPE_NAME).and_then(Element::text) {
        out.push(ExtensionSummary {
            type_name: type_name.to_string(),
            enabled: element.child(tags::ENABLED).map(text_of),
        });
    }
    for child in element.child_elements() {
        collect_summaries(child, out);
    }
}

/// Load a draft file and report on it
pub fn inspect<P: AsRef<Path>>(path: P) -> DraftResult<DraftReport> {
    let document = DraftDocument::load(path)?;
    Ok(inspect_document(&document))
}
