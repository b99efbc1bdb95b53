//! Constants for the service draft format
//!
//! Element names, TypeName markers and attribute values used by the
//! draft patcher and inspector.

/// Element names appearing in a service draft
pub mod tags {
    pub const TYPE_NAME: &str = "TypeName";
    pub const ENABLED: &str = "Enabled";
    pub const DEFINITION: &str = "Definition";
    pub const INFO: &str = "Info";
    pub const CONFIGURATION_PROPERTIES: &str = "ConfigurationProperties";
    pub const PROPERTY_ARRAY: &str = "PropertyArray";
    pub const PROPERTY_SET_PROPERTY: &str = "PropertySetProperty";
    pub const KEY: &str = "Key";
    pub const VALUE: &str = "Value";
}

/// TypeName markers identifying service extensions
pub mod type_names {
    pub const FEATURE_SERVER: &str = "FeatureServer";
    pub const MAP_SERVER: &str = "MapServer";
    pub const WFS_SERVER: &str = "EnableWFSServer";
}

/// Property keys understood by the portal
pub mod keys {
    pub const WEB_CAPABILITIES: &str = "webCapabilities";
    pub const DATE_FIELDS_RESPECT_DST: &str = "dateFieldsRespectsDayLightSavingTime";
    pub const DATE_FIELDS_TIMEZONE_ID: &str = "dateFieldsTimezoneID";
}

/// Schema type attributes written on inserted nodes
pub mod xsi {
    pub const TYPE_ATTRIBUTE: &str = "xsi:type";
    pub const PROPERTY_SET_PROPERTY: &str = "typens:PropertySetProperty";
    pub const STRING: &str = "xs:string";
}

/// Literal written into an extension's `Enabled` element
pub const ENABLED_TRUE: &str = "true";

/// Indentation used when serializing a patched draft
pub const INDENT_CHAR: u8 = b' ';
pub const INDENT_SIZE: usize = 2;
