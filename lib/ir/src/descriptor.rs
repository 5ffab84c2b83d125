//! Raw service descriptor, as produced by the introspection tooling.
//!
//! Every optional field carries an explicit serde default; nothing in the
//! generator performs dynamic lookups against missing metadata.

use serde::{Deserialize, Serialize};

use crate::types::{BaseSpec, HttpSource, HttpSpec, PropType, ReturnType};

/// The full service description: every discovered class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub classes: Vec<ClassDescriptor>,
}

/// One discovered class, generable or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    pub name: String,

    /// Plural form used for REST routes. Defaults to `<name>s` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,

    /// Shared-constructor metadata. Classes without one are not models and
    /// are skipped during normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctor: Option<CtorDescriptor>,

    /// True for the built-in authentication entity and its subtypes; their
    /// client binding ships prebuilt with the SDK.
    #[serde(default)]
    pub inherits_user: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<BaseSpec>,

    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,

    /// Identifier-property metadata, in declaration order.
    #[serde(default)]
    pub ids: Vec<IdDescriptor>,

    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,

    /// Relation-accessor metadata: target model per scope name.
    #[serde(default)]
    pub scope_targets: Vec<ScopeTargetDescriptor>,

    #[serde(default)]
    pub methods: Vec<RemoteMethodDescriptor>,

    /// Passthrough settings for renderers; not interpreted here.
    #[serde(default)]
    pub acls: Vec<serde_json::Value>,

    #[serde(default)]
    pub validations: Vec<serde_json::Value>,
}

/// Shared-constructor metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtorDescriptor {
    /// Parameters the shared constructor accepts; prepended to every
    /// instance-scoped method during normalization.
    #[serde(default)]
    pub accepts: Vec<ParamDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: PropType,
}

/// Identifier-property metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdDescriptor {
    pub name: String,

    #[serde(default)]
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub name: String,

    /// Related model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Join model name for many-to-many relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

/// Live relation-accessor metadata for one scope name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeTargetDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_class: Option<String>,
}

/// A service-level operation exposed for client invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMethodDescriptor {
    /// Raw remote name, possibly prefixed with `prototype.`.
    pub name: String,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub accepts: Vec<ParamDescriptor>,

    /// At most one entry is meaningful; multiple return values are not
    /// supported by this generator.
    #[serde(default)]
    pub returns: Vec<ReturnDescriptor>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub internal: bool,

    /// Forces collection return-type inference. Set on derived create-many
    /// scope methods, never by the descriptor.
    #[serde(skip)]
    pub force_collection: bool,

    /// Idempotency marker set once a binding has been synthesized.
    #[serde(skip)]
    pub generated: bool,
}

impl RemoteMethodDescriptor {
    /// Derive a scope method from this one: same shape, new name, inherited
    /// `deprecated`/`internal` reset.
    pub fn derive(&self, name: impl Into<String>) -> Self {
        RemoteMethodDescriptor {
            name: name.into(),
            deprecated: false,
            internal: false,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub arg: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpSpec>,

    /// Names the model class a dictionary-shaped argument serializes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ParamDescriptor {
    /// True when the transport layer supplies this argument; such arguments
    /// never appear in generated signatures.
    pub fn is_server_computed(&self) -> bool {
        match &self.http {
            Some(HttpSpec::Custom(_)) => true,
            Some(HttpSpec::Mapping { source }) => matches!(
                source,
                Some(HttpSource::Req) | Some(HttpSource::Res) | Some(HttpSource::Context)
            ),
            None => false,
        }
    }

    pub fn http_source(&self) -> Option<HttpSource> {
        match &self.http {
            Some(HttpSpec::Mapping { source }) => *source,
            _ => None,
        }
    }

    /// True when this argument travels in the request body.
    pub fn is_body(&self) -> bool {
        self.http_source() == Some(HttpSource::Body)
    }

    /// Body arguments are implicitly required.
    pub fn is_required(&self) -> bool {
        self.required || self.is_body()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<ReturnType>,
}
