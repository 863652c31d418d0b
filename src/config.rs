//! Conversion options and resource limits.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};

/// Relationship type used for edges without a `label` attribute.
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATES_TO";

/// Default maximum input size: 16 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Bounds on the size of a single conversion.
///
/// `None` means unlimited. The defaults only cap the raw input size; use
/// [`Limits::for_untrusted_input`] when the DOT text comes from an untrusted
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum source length in bytes (default: 16 MiB).
    pub max_input_bytes: Option<usize>,
    /// Maximum number of parsed statements, after edge chains and node
    /// lists are expanded (default: unlimited).
    pub max_statements: Option<usize>,
    /// Maximum number of distinct nodes (default: unlimited).
    pub max_nodes: Option<usize>,
    /// Maximum number of edges before undirected expansion (default: unlimited).
    pub max_edges: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            max_statements: None,
            max_nodes: None,
            max_edges: None,
        }
    }
}

impl Limits {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_input_bytes: None,
            max_statements: None,
            max_nodes: None,
            max_edges: None,
        }
    }

    /// Conservative bounds for DOT text from untrusted callers.
    pub fn for_untrusted_input() -> Self {
        Self {
            max_input_bytes: Some(1024 * 1024),
            max_statements: Some(100_000),
            max_nodes: Some(50_000),
            max_edges: Some(100_000),
        }
    }

    /// Fails with [`ConvertError::Limit`] when `actual` exceeds `max`.
    pub(crate) fn check(limit: &'static str, actual: usize, max: Option<usize>) -> Result<()> {
        match max {
            Some(max) if actual > max => Err(ConvertError::Limit { limit, actual, max }),
            _ => Ok(()),
        }
    }
}

/// Options for a whole conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Relationship type for edges without a `label` (default: `RELATES_TO`).
    pub default_relationship_type: String,

    /// Upper-case relationship types that are plain identifiers (default: false).
    ///
    /// Types containing any other character are always kept verbatim.
    pub uppercase_relationship_types: bool,

    /// Resource bounds checked while converting.
    pub limits: Limits,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            default_relationship_type: DEFAULT_RELATIONSHIP_TYPE.to_string(),
            uppercase_relationship_types: false,
            limits: Limits::default(),
        }
    }
}

impl ConvertOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relationship type used for edges without a `label`.
    pub fn with_default_relationship_type(mut self, rel_type: impl Into<String>) -> Self {
        self.default_relationship_type = rel_type.into();
        self
    }

    /// Enables or disables upper-casing of plain-identifier relationship types.
    pub fn with_uppercase_relationship_types(mut self, enabled: bool) -> Self {
        self.uppercase_relationship_types = enabled;
        self
    }

    /// Replaces all resource limits at once.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the maximum source length in bytes.
    pub fn with_max_input_bytes(mut self, max: usize) -> Self {
        self.limits.max_input_bytes = Some(max);
        self
    }

    /// Sets the maximum number of distinct nodes.
    pub fn with_max_nodes(mut self, max: usize) -> Self {
        self.limits.max_nodes = Some(max);
        self
    }

    /// Sets the maximum number of edges.
    pub fn with_max_edges(mut self, max: usize) -> Self {
        self.limits.max_edges = Some(max);
        self
    }

    /// Sets the maximum number of parsed statements.
    pub fn with_max_statements(mut self, max: usize) -> Self {
        self.limits.max_statements = Some(max);
        self
    }
}

/// Options for the Cypher renderer in [`crate::cypher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CypherOptions {
    /// Property that stores the DOT identifier on every node (default: `_dot_id`).
    pub id_property: String,
    /// Emit `MERGE` instead of `CREATE` for nodes (default: false).
    pub merge_nodes: bool,
    /// End the rendered script with `;` (default: true).
    pub terminate_statements: bool,
}

impl Default for CypherOptions {
    fn default() -> Self {
        Self {
            id_property: "_dot_id".to_string(),
            merge_nodes: false,
            terminate_statements: true,
        }
    }
}

impl CypherOptions {
    /// Sets the node property that stores the DOT identifier.
    pub fn with_id_property(mut self, property: impl Into<String>) -> Self {
        self.id_property = property.into();
        self
    }

    /// Chooses `MERGE` (true) or `CREATE` (false) for nodes.
    pub fn with_merge_nodes(mut self, enabled: bool) -> Self {
        self.merge_nodes = enabled;
        self
    }

    /// Chooses whether the rendered script ends with `;`.
    pub fn with_terminate_statements(mut self, enabled: bool) -> Self {
        self.terminate_statements = enabled;
        self
    }
}
