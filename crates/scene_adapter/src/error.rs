//! Error types and the soft-failure taxonomy
//!
//! Hard errors only exist at the edges (file loading, object model calls).
//! Everything the diffing engine can trigger with bad input degrades to a
//! [`Diagnostic`] that is reported and swallowed.

use thiserror::Error;

pub use crate::config::ConfigError;

/// Failures reported by the object model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// No mesh builder with this identifier exists
    #[error("unknown mesh builder: {0}")]
    UnknownBuilder(String),

    /// No constructor with this identifier exists
    #[error("unknown constructor: {0}")]
    UnknownConstructor(String),

    /// A required constructor argument was not supplied
    #[error("{class}: missing constructor argument '{argument}'")]
    MissingArgument {
        /// Constructor identifier
        class: String,
        /// Name of the missing argument
        argument: String,
    },

    /// A property was assigned a value of the wrong kind
    #[error("property '{property}' rejects value {value}")]
    InvalidValue {
        /// Property name
        property: String,
        /// Rendered value
        value: String,
    },

    /// The handle does not refer to a live object or scene
    #[error("stale or foreign handle")]
    StaleHandle,
}

/// Non-fatal conditions raised while reconciling a tree
///
/// Each variant is emitted exactly once per occurrence to the
/// [`DiagnosticSink`](crate::diagnostics::DiagnosticSink); the affected node is
/// omitted or defaulted and reconciliation continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Catalog miss: the tag has no recipe
    #[error("unsupported tag (no recipe found): {tag}")]
    UnknownTag {
        /// Tag looked up
        tag: String,
    },

    /// Catalog miss: the recipe names a family outside the closed set
    #[error("unknown family '{family}' (found tag {tag})")]
    UnknownFamily {
        /// Tag looked up
        tag: String,
        /// Raw family string from the recipe
        family: String,
    },

    /// Reference miss: no mesh with this name exists in the scene
    #[error("lock target not found: {name}")]
    UnresolvedTarget {
        /// Name searched for
        name: String,
    },

    /// Reference miss: direction name not in the table, "up" was used
    #[error("cannot find direction {value}, defaulting to \"up\"")]
    UnknownDirection {
        /// Rendered value
        value: String,
    },

    /// Unsupported operation: the object model refused to build the node
    #[error("failed to construct {tag}: {source}")]
    ConstructionFailed {
        /// Tag being constructed
        tag: String,
        /// Underlying object model error
        source: BackendError,
    },

    /// Unsupported operation: the prop is not on the recipe's allow-list
    #[error("{tag}: property '{property}' is not assignable")]
    PropertyRejected {
        /// Tag of the updated node
        tag: String,
        /// Rejected prop name
        property: String,
    },

    /// Unsupported operation: the object model refused an assignment
    #[error("{tag}: failed to assign '{property}': {source}")]
    PropertyFailed {
        /// Tag of the updated node
        tag: String,
        /// Prop name
        property: String,
        /// Underlying object model error
        source: BackendError,
    },
}

impl Diagnostic {
    /// Whether this diagnostic means a node was dropped from the scene
    pub fn omits_node(&self) -> bool {
        matches!(
            self,
            Self::UnknownTag { .. } | Self::UnknownFamily { .. } | Self::ConstructionFailed { .. }
        )
    }
}

/// Errors raised while bootstrapping an adapter
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Configuration or catalog file could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_messages() {
        let diag = Diagnostic::UnknownDirection { value: "\"sideways\"".into() };
        assert_eq!(diag.to_string(), "cannot find direction \"sideways\", defaulting to \"up\"");

        let diag = Diagnostic::ConstructionFailed {
            tag: "Decal".into(),
            source: BackendError::UnknownBuilder("CreateDecal".into()),
        };
        assert_eq!(
            diag.to_string(),
            "failed to construct Decal: unknown mesh builder: CreateDecal"
        );
    }

    #[test]
    fn test_omits_node_classification() {
        assert!(Diagnostic::UnknownTag { tag: "Foo".into() }.omits_node());
        assert!(!Diagnostic::UnresolvedTarget { name: "box".into() }.omits_node());
        let rejected = Diagnostic::PropertyRejected { tag: "Box".into(), property: "size".into() };
        assert!(!rejected.omits_node());
    }
}
