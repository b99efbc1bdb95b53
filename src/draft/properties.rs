//! Key/value property entries injected into configuration property arrays

use crate::draft::constants::{keys, tags, xsi};
use crate::draft::document::Element;

/// A key/value pair appended to a `PropertyArray`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
}

impl PropertyEntry {
    pub fn new(key: &str, value: &str) -> Self {
        PropertyEntry {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Build the typed `PropertySetProperty` node for this entry
    pub fn to_element(&self) -> Element {
        Element::new(tags::PROPERTY_SET_PROPERTY)
            .with_attr(xsi::TYPE_ATTRIBUTE, xsi::PROPERTY_SET_PROPERTY)
            .with_child(Element::new(tags::KEY).with_text(&self.key))
            .with_child(
                Element::new(tags::VALUE)
                    .with_attr(xsi::TYPE_ATTRIBUTE, xsi::STRING)
                    .with_text(&self.value),
            )
    }
}

/// Properties that make date fields use the given timezone
///
/// Daylight saving is always respected.
pub fn timezone_properties(timezone_id: &str) -> Vec<PropertyEntry> {
    vec![
        PropertyEntry::new(keys::DATE_FIELDS_RESPECT_DST, "true"),
        PropertyEntry::new(keys::DATE_FIELDS_TIMEZONE_ID, timezone_id),
    ]
}
