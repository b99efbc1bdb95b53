//! Publishing configuration
//!
//! Portal connection, staging folder, sharing and default service settings
//! are read from a TOML file. Credentials are never stored in the file;
//! the password is taken from the environment variable it names.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::draft::errors::{DraftError, DraftResult};

/// Default environment variable holding the portal password
pub const DEFAULT_PASSWORD_ENV: &str = "SDDRAFTKIT_PASSWORD";
/// Default portal folder receiving uploaded definitions
pub const DEFAULT_PORTAL_FOLDER: &str = "My Hosted Services";

/// Portal connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSettings {
    pub url: String,
    /// Case-sensitive portal user name; also the owner searched on overwrite
    pub user: String,
    /// Name of the environment variable holding the password
    pub password_env: String,
    pub folder: String,
}

impl Default for PortalSettings {
    fn default() -> Self {
        PortalSettings {
            url: String::new(),
            user: String::new(),
            password_env: DEFAULT_PASSWORD_ENV.to_string(),
            folder: DEFAULT_PORTAL_FOLDER.to_string(),
        }
    }
}

impl PortalSettings {
    /// Read the password from the configured environment variable
    pub fn password(&self) -> DraftResult<String> {
        env::var(&self.password_env).map_err(|_| {
            DraftError::ConfigError(format!(
                "Portal password not set (expected environment variable {})",
                self.password_env
            ))
        })
    }
}

/// Who a published service is shared with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharingSettings {
    pub organization: bool,
    pub everyone: bool,
    /// Comma-separated group names
    pub groups: String,
}

impl SharingSettings {
    /// Whether any sharing needs to be applied
    pub fn is_shared(&self) -> bool {
        self.organization || self.everyone || !self.group_list().is_empty()
    }

    /// Non-blank group names
    pub fn group_list(&self) -> Vec<&str> {
        self.groups
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }
}

/// Default properties and patch flags for published services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub summary: String,
    pub tags: String,
    pub description: String,
    pub credits: String,
    pub use_limitations: String,
    pub overwrite: bool,
    pub editing: bool,
    pub sync: bool,
    pub wfs: bool,
    /// Timezone ID for date fields; empty leaves the draft untouched
    pub timezone: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            summary: String::new(),
            tags: String::new(),
            description: String::new(),
            credits: "My Credits".to_string(),
            use_limitations: "My Use Limitations".to_string(),
            overwrite: true,
            editing: false,
            sync: false,
            wfs: false,
            timezone: String::new(),
        }
    }
}

/// Complete publishing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishConfig {
    pub portal: PortalSettings,
    /// Directory receiving `.sddraft` and `.sd` files
    pub project_folder: PathBuf,
    pub sharing: SharingSettings,
    pub service: ServiceSettings,
}

impl PublishConfig {
    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> DraftResult<Self> {
        let toml_value: toml::Value = content.parse()?;
        let mut config = PublishConfig::default();

        if let Some(portal) = section(&toml_value, "portal")? {
            read_string(portal, "url", &mut config.portal.url)?;
            read_string(portal, "user", &mut config.portal.user)?;
            read_string(portal, "password_env", &mut config.portal.password_env)?;
            read_string(portal, "folder", &mut config.portal.folder)?;
        }

        if let Some(project) = section(&toml_value, "project")? {
            let mut folder = String::new();
            read_string(project, "folder", &mut folder)?;
            config.project_folder = PathBuf::from(folder);
        }

        if let Some(sharing) = section(&toml_value, "sharing")? {
            read_bool(sharing, "organization", &mut config.sharing.organization)?;
            read_bool(sharing, "everyone", &mut config.sharing.everyone)?;
            read_string(sharing, "groups", &mut config.sharing.groups)?;
        }

        if let Some(service) = section(&toml_value, "service")? {
            let settings = &mut config.service;
            read_string(service, "summary", &mut settings.summary)?;
            read_string(service, "tags", &mut settings.tags)?;
            read_string(service, "description", &mut settings.description)?;
            read_string(service, "credits", &mut settings.credits)?;
            read_string(service, "use_limitations", &mut settings.use_limitations)?;
            read_bool(service, "overwrite", &mut settings.overwrite)?;
            read_bool(service, "editing", &mut settings.editing)?;
            read_bool(service, "sync", &mut settings.sync)?;
            read_bool(service, "wfs", &mut settings.wfs)?;
            read_string(service, "timezone", &mut settings.timezone)?;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DraftResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }
}

/// Helper to fetch an optional table
fn section<'v>(value: &'v toml::Value, name: &str) -> DraftResult<Option<&'v toml::value::Table>> {
    match value.get(name) {
        None => Ok(None),
        Some(v) => v
            .as_table()
            .map(Some)
            .ok_or_else(|| DraftError::ConfigError(format!("[{}] must be a table", name))),
    }
}

fn read_string(table: &toml::value::Table, key: &str, target: &mut String) -> DraftResult<()> {
    if let Some(v) = table.get(key) {
        *target = v
            .as_str()
            .ok_or_else(|| DraftError::ConfigError(format!("'{}' must be a string", key)))?
            .to_string();
    }
    Ok(())
}

fn read_bool(table: &toml::value::Table, key: &str, target: &mut bool) -> DraftResult<()> {
    if let Some(v) = table.get(key) {
        *target = v
            .as_bool()
            .ok_or_else(|| DraftError::ConfigError(format!("'{}' must be a boolean", key)))?;
    }
    Ok(())
}
