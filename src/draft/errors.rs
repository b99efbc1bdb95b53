//! Custom error types for draft processing

use std::fmt;
use std::io;

use quick_xml::events::attributes::AttrError;

/// Draft-specific error types
#[derive(Debug)]
pub enum DraftError {
    /// I/O error
    IoError(io::Error),
    /// Malformed XML in the draft document
    XmlError(String),
    /// Document has no root element
    MissingRoot,
    /// Invalid or unreadable configuration
    ConfigError(String),
    /// Service name rejected by the portal naming rules
    InvalidServiceName(String),
    /// Failure reported by an external GIS toolkit step
    ToolkitError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::IoError(e) => write!(f, "I/O error: {}", e),
            DraftError::XmlError(msg) => write!(f, "XML error: {}", msg),
            DraftError::MissingRoot => write!(f, "Draft document has no root element"),
            DraftError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            DraftError::InvalidServiceName(name) => write!(f, "Invalid service name: '{}'", name),
            DraftError::ToolkitError(msg) => write!(f, "Toolkit error: {}", msg),
            DraftError::GenericError(msg) => write!(f, "Draft error: {}", msg),
        }
    }
}

impl std::error::Error for DraftError {}

impl From<io::Error> for DraftError {
    fn from(error: io::Error) -> Self {
        DraftError::IoError(error)
    }
}

impl From<quick_xml::Error> for DraftError {
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(e) => DraftError::IoError(io::Error::new(e.kind(), e.to_string())),
            other => DraftError::XmlError(other.to_string()),
        }
    }
}

impl From<AttrError> for DraftError {
    fn from(error: AttrError) -> Self {
        DraftError::XmlError(error.to_string())
    }
}

impl From<toml::de::Error> for DraftError {
    fn from(error: toml::de::Error) -> Self {
        DraftError::ConfigError(error.to_string())
    }
}

/// Result type for draft operations
pub type DraftResult<T> = Result<T, DraftError>;

impl From<String> for DraftError {
    fn from(msg: String) -> Self {
        DraftError::GenericError(msg)
    }
}
