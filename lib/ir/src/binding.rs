//! Objective-C enriched records consumed by the emitters.

use serde::{Deserialize, Serialize};

use crate::model::ModelDescriptor;

/// A model plus everything the emitters need to render its binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBinding {
    pub model: ModelDescriptor,

    /// Generated model class name (prefix + pascal-cased model name).
    pub objc_model_name: String,

    pub objc_repo_name: String,

    /// `LBModel` or `LBPersistedModel`.
    pub objc_base_model: String,

    /// Properties in declaration order, identifier excluded.
    pub props: Vec<PropBinding>,

    pub methods: Vec<MethodBinding>,

    /// Bindings synthesized for the relation-scope operations.
    pub scope_methods: Vec<ScopeMethodBinding>,

    /// Other generated class names this model's binding must import:
    /// relation targets and through models, first-occurrence order, never
    /// the model itself.
    pub includes: Vec<String>,
}

/// One generated `@property` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropBinding {
    pub name: String,

    /// Full property type declaration, attributes included.
    pub ty: String,
}

/// One synthesized Objective-C method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    /// Remote name as the server knows it.
    pub raw_name: String,

    /// Full method prototype, without the leading `-`.
    pub prototype: String,

    pub return_arg: Option<String>,

    pub objc_return_type: String,

    /// Element type of a declared collection return, empty otherwise.
    pub origin_objc_return_type: String,

    /// `@"arg": value` pairs for path/query parameters, joined in
    /// declaration order.
    pub param_assignments: Option<String>,

    /// Value expression for the single request-body argument.
    pub body_param_assignments: Option<String>,
}

/// A synthesized scope operation, carrying its scope context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMethodBinding {
    pub scope_name: String,

    pub target_class: String,

    /// Composite API name used for invocation, e.g. `orders.destroyAll`.
    pub api_name: String,

    pub method: MethodBinding,
}
