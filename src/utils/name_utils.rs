//! Service and file naming helpers

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::draft::errors::{DraftError, DraftResult};

/// Longest service name the portal accepts
pub const MAX_SERVICE_NAME_LEN: usize = 120;

/// Suffix of staged service definition packages
pub const DEFINITION_SUFFIX: &str = ".sd";
/// Suffix of service definition drafts
pub const DRAFT_SUFFIX: &str = ".sddraft";

lazy_static! {
    static ref SERVICE_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
        .expect("service name pattern is valid");
}

/// Check a service name against the portal naming rules
pub fn validate_service_name(name: &str) -> DraftResult<()> {
    if name.len() > MAX_SERVICE_NAME_LEN || !SERVICE_NAME.is_match(name) {
        return Err(DraftError::InvalidServiceName(name.to_string()));
    }
    Ok(())
}

/// `<dir>/<service>.sddraft`
pub fn draft_path(dir: &Path, service: &str) -> PathBuf {
    dir.join(format!("{}{}", service, DRAFT_SUFFIX))
}

/// `<dir>/<service>.sd`
pub fn definition_path(dir: &Path, service: &str) -> PathBuf {
    dir.join(format!("{}{}", service, DEFINITION_SUFFIX))
}

/// Service name of a portal item named like `<service>.sd`
pub fn service_name_from_item(item_name: &str) -> Option<&str> {
    item_name.strip_suffix(DEFINITION_SUFFIX).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_service_name() {
        assert!(validate_service_name("Parcels_2024").is_ok());
        assert!(validate_service_name("_hidden").is_ok());
        assert!(validate_service_name("2024Parcels").is_err());
        assert!(validate_service_name("Parcel Lines").is_err());
        assert!(validate_service_name("").is_err());
        assert!(validate_service_name(&"a".repeat(MAX_SERVICE_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_item_names() {
        assert_eq!(service_name_from_item("Roads.sd"), Some("Roads"));
        assert_eq!(service_name_from_item("Roads.sddraft"), None);
        assert_eq!(service_name_from_item(".sd"), None);
        assert_eq!(
            draft_path(Path::new("/tmp/out"), "Roads"),
            PathBuf::from("/tmp/out/Roads.sddraft")
        );
        assert_eq!(
            definition_path(Path::new("/tmp/out"), "Roads"),
            PathBuf::from("/tmp/out/Roads.sd")
        );
    }
}
