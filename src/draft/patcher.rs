//! Service draft patcher
//!
//! Each public operation performs a full load, mutate and save round trip
//! on the draft path. Missing structure never raises an error; the returned
//! [`PatchOutcome`] tells the caller what was found.

use std::fmt;
use std::path::Path;

use log::{info, warn};

use crate::draft::capabilities::CapabilitySet;
use crate::draft::constants::{keys, tags, type_names, ENABLED_TRUE};
use crate::draft::document::{DraftDocument, Element};
use crate::draft::errors::DraftResult;
use crate::draft::extension::{locate_mut, Lookup};
use crate::draft::properties::PropertyEntry;
use crate::utils::logger::Logger;

/// Result of applying a patch to a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The given number of nodes were rewritten or inserted
    Applied(usize),
    /// Targets were found but already held the requested content
    Unchanged,
    /// No extension carries the requested TypeName
    ExtensionMissing,
    /// The extension exists but the expected path below it does not
    StructureMissing,
}

impl PatchOutcome {
    fn from_counts(lookup: Lookup, matched: usize, changed: usize) -> Self {
        if lookup.extensions == 0 {
            PatchOutcome::ExtensionMissing
        } else if matched == 0 {
            PatchOutcome::StructureMissing
        } else if changed == 0 {
            PatchOutcome::Unchanged
        } else {
            PatchOutcome::Applied(changed)
        }
    }

    /// Whether the draft now holds the requested content
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PatchOutcome::Applied(_) | PatchOutcome::Unchanged)
    }
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Applied(n) => write!(f, "applied to {} node(s)", n),
            PatchOutcome::Unchanged => write!(f, "already up to date"),
            PatchOutcome::ExtensionMissing => write!(f, "extension not found"),
            PatchOutcome::StructureMissing => write!(f, "expected structure not found"),
        }
    }
}

/// Set the value following every `Key` child whose text is `key`
///
/// # Returns
/// A `(matched, changed)` pair of value node counts
fn set_keyed_values(property: &mut Element, key: &str, value: &str) -> (usize, usize) {
    let mut matched = 0;
    let mut changed = 0;
    let mut after_key = false;

    for child in property.child_elements_mut() {
        if after_key && child.name() == tags::VALUE {
            matched += 1;
            if child.set_text(value) {
                changed += 1;
            }
        }
        after_key = child.name() == tags::KEY && child.text() == Some(key);
    }

    (matched, changed)
}

/// Write the capability list into every FeatureServer `webCapabilities` value
pub fn apply_capabilities(root: &mut Element, capabilities: &CapabilitySet) -> PatchOutcome {
    let value = capabilities.to_string();
    let mut matched = 0;
    let mut changed = 0;

    let lookup = locate_mut(
        root,
        type_names::FEATURE_SERVER,
        &[tags::DEFINITION, tags::INFO],
        |info| {
            for property_set in info.child_elements_mut() {
                for property in property_set.child_elements_mut() {
                    let (m, c) = set_keyed_values(property, keys::WEB_CAPABILITIES, &value);
                    matched += m;
                    changed += c;
                }
            }
        },
    );

    PatchOutcome::from_counts(lookup, matched, changed)
}

/// Set `Enabled` to `true` on every extension with the given TypeName
pub fn apply_protocol_enable(root: &mut Element, type_name: &str) -> PatchOutcome {
    let mut changed = 0;

    let lookup = locate_mut(root, type_name, &[tags::ENABLED], |enabled| {
        if enabled.set_text(ENABLED_TRUE) {
            changed += 1;
        }
    });

    PatchOutcome::from_counts(lookup, lookup.targets, changed)
}

/// Append the given entries to every MapServer configuration property array
///
/// Existing entries with the same key are left in place, so repeated calls
/// accumulate duplicates.
pub fn apply_timezone(root: &mut Element, properties: &[PropertyEntry]) -> PatchOutcome {
    let mut appended = 0;

    let lookup = locate_mut(
        root,
        type_names::MAP_SERVER,
        &[tags::DEFINITION, tags::CONFIGURATION_PROPERTIES, tags::PROPERTY_ARRAY],
        |array| {
            for property in properties {
                array.append_child(property.to_element());
                appended += 1;
            }
        },
    );

    PatchOutcome::from_counts(lookup, lookup.targets, appended)
}

/// Applies patches to service draft files in place
pub struct DraftPatcher<'a> {
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> DraftPatcher<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        DraftPatcher { logger }
    }

    /// Rewrite `webCapabilities` for the FeatureServer extension
    ///
    /// # Arguments
    /// * `path` - Path to the `.sddraft` file
    /// * `editing` - Grant create, delete, update and editing
    /// * `sync` - Grant sync
    pub fn set_capabilities<P: AsRef<Path>>(&self, path: P, editing: bool, sync: bool) -> DraftResult<PatchOutcome> {
        let capabilities = CapabilitySet::from_flags(editing, sync);
        info!("Setting capabilities to {}", capabilities);
        self.patch_file(path.as_ref(), "Capabilities", |root| apply_capabilities(root, &capabilities))
    }

    /// Enable the extension identified by `type_name`
    pub fn enable_protocol<P: AsRef<Path>>(&self, path: P, type_name: &str) -> DraftResult<PatchOutcome> {
        info!("Enabling extension {}", type_name);
        self.patch_file(path.as_ref(), type_name, |root| apply_protocol_enable(root, type_name))
    }

    /// Enable the WFS extension
    pub fn enable_wfs<P: AsRef<Path>>(&self, path: P) -> DraftResult<PatchOutcome> {
        self.enable_protocol(path, type_names::WFS_SERVER)
    }

    /// Append timezone configuration properties to the MapServer extension
    pub fn set_timezone<P: AsRef<Path>>(&self, path: P, properties: &[PropertyEntry]) -> DraftResult<PatchOutcome> {
        info!("Appending {} timezone properties", properties.len());
        self.patch_file(path.as_ref(), "Timezone", |root| apply_timezone(root, properties))
    }

    /// Load the draft, apply `patch` to its root and write it back
    fn patch_file<F>(&self, path: &Path, label: &str, patch: F) -> DraftResult<PatchOutcome>
    where
        F: FnOnce(&mut Element) -> PatchOutcome,
    {
        let mut document = DraftDocument::load(path)?;
        let outcome = patch(&mut document.root);
        document.save(path)?;

        if outcome.is_satisfied() {
            info!("{} {}", label, outcome);
        } else {
            warn!("{} skipped in {}: {}", label, path.display(), outcome);
        }
        self.logger.log(&format!("{} set ({}): {}", label, path.display(), outcome))?;

        Ok(outcome)
    }
}
