//! Canonical per-model records produced by descriptor normalization.

use serde::{Deserialize, Serialize};

use crate::descriptor::{
    PropertyDescriptor, RelationDescriptor, RemoteMethodDescriptor, ScopeTargetDescriptor,
};

/// One exposed model, after normalization.
///
/// Built in a single pass; immutable once binding synthesis completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,

    /// Plural form used for REST routes.
    pub plural_name: String,

    /// Normalized base-class name. Empty when the raw descriptor carried an
    /// opaque base; the binding stage rejects anything but the two known
    /// base types.
    pub base: String,

    /// Whether the first declared identifier property is server-generated.
    pub is_id_generated: bool,

    pub properties: Vec<PropertyDescriptor>,

    pub relations: Vec<RelationDescriptor>,

    pub scope_targets: Vec<ScopeTargetDescriptor>,

    /// Flattened method list: instance methods carry the constructor's
    /// parameters up front.
    pub methods: Vec<RemoteMethodDescriptor>,

    /// Reconstructed relation scopes, in first-seen order. `None` marks a
    /// scope that failed validation; it stays `None` for the whole run.
    pub scopes: Vec<ScopeEntry>,

    /// Passthrough settings for renderers; not interpreted here.
    pub acls: Vec<serde_json::Value>,
    pub validations: Vec<serde_json::Value>,
}

impl ModelDescriptor {
    /// Look up a scope entry by name.
    pub fn scope(&self, name: &str) -> Option<&ScopeEntry> {
        self.scopes.iter().find(|entry| entry.name == name)
    }
}

/// One named slot in a model's scope map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub name: String,

    /// `None` when scope validation failed; the warning was already
    /// reported and later methods of the same scope are skipped silently.
    pub scope: Option<ScopeDescriptor>,
}

/// A validated relation scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeDescriptor {
    /// Exposed model the scope's records belong to.
    pub target_class: String,

    pub methods: Vec<ScopeMethod>,
}

/// One operation of a scope, keyed by its composite API name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeMethod {
    /// Composite API name, e.g. `orders.destroyAll`.
    pub api_name: String,

    pub method: RemoteMethodDescriptor,
}
