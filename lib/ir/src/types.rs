//! Shared type descriptors used across the descriptor and model layers.

use serde::{Deserialize, Serialize};

/// Property type: a named type or an array marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropType {
    /// Named type (e.g. `String`, `Number`, `ObjectID`, `Date`).
    Name(String),
    /// Array-typed property. Element descriptors are opaque; arrays map to
    /// a generic ordered collection on the client.
    Array(Vec<serde_json::Value>),
}

impl PropType {
    /// The type name, or `None` for arrays.
    pub fn name(&self) -> Option<&str> {
        match self {
            PropType::Name(name) => Some(name),
            PropType::Array(_) => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, PropType::Array(_))
    }
}

/// Declared return type of a remote method.
///
/// `Composite` covers anonymous object shapes such as
/// `{"arg": "info", "type": {"count": "number"}}`; they map to the generic
/// dictionary type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnType {
    Name(String),
    /// Collection return. The first element, when present, names the
    /// element type.
    Collection(Vec<serde_json::Value>),
    Composite(serde_json::Map<String, serde_json::Value>),
}

impl ReturnType {
    /// Element type name of a collection return, when declared.
    pub fn collection_element(&self) -> Option<&str> {
        match self {
            ReturnType::Collection(items) => items.first().and_then(|item| item.as_str()),
            _ => None,
        }
    }
}

/// Where an argument travels in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpSource {
    Body,
    Form,
    Query,
    Path,
    Header,
    Req,
    Res,
    Context,
}

/// `http` metadata attached to a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HttpSpec {
    /// Declarative mapping, e.g. `{"source": "body"}`.
    Mapping {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<HttpSource>,
    },
    /// Opaque custom mapping function on the server side, serialized by the
    /// introspection layer as a marker string. Such arguments are always
    /// server-computed.
    Custom(String),
}

/// `base` setting of a model: a plain base-class name, or an opaque
/// constructor value. The normalizer reduces the opaque form to an empty
/// name, which the binding stage rejects as an unknown base type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseSpec {
    Name(String),
    Opaque(serde_json::Value),
}
