//! Feature service capability tokens

use std::fmt;

/// A permission token exposed by a published feature service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Query,
    Create,
    Delete,
    Update,
    Editing,
    Sync,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Query => "Query",
            Capability::Create => "Create",
            Capability::Delete => "Delete",
            Capability::Update => "Update",
            Capability::Editing => "Editing",
            Capability::Sync => "Sync",
        }
    }
}

/// Tokens granted when editing is enabled, in the order the portal expects
const EDITING_TOKENS: [Capability; 4] = [
    Capability::Create,
    Capability::Delete,
    Capability::Update,
    Capability::Editing,
];

/// Ordered capability list written into `webCapabilities`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    tokens: Vec<Capability>,
}

impl CapabilitySet {
    /// Build the capability list from the editing and sync flags
    ///
    /// `Query` is always first; editing tokens precede `Sync`.
    pub fn from_flags(editing: bool, sync: bool) -> Self {
        let mut tokens = vec![Capability::Query];
        if editing {
            tokens.extend_from_slice(&EDITING_TOKENS);
        }
        if sync {
            tokens.push(Capability::Sync);
        }
        CapabilitySet { tokens }
    }

    pub fn tokens(&self) -> &[Capability] {
        &self.tokens
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.tokens.contains(&capability)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.tokens.iter().map(Capability::as_str).collect();
        write!(f, "{}", joined.join(","))
    }
}
