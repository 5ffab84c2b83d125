use thiserror::Error;

/// Fatal generation errors.
///
/// Each one means the input descriptor violates the generator's
/// closed-world assumptions; the run stops rather than emit a malformed
/// binding. Recoverable conditions (non-model classes, unresolvable
/// scopes) are logged and skipped instead, never raised.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodegenError {
    #[error("unknown base type {base:?} for model {model:?}")]
    UnknownBaseType { model: String, base: String },

    #[error("unsupported property type {ty:?} for property {property:?} in model {model:?}")]
    UnsupportedPropertyType {
        model: String,
        property: String,
        ty: String,
    },

    #[error("unsupported argument type {ty:?} for argument {arg:?} in method {method:?} of model {model:?}")]
    UnsupportedArgumentType {
        model: String,
        method: String,
        arg: String,
        ty: String,
    },

    #[error("unsupported return type {ty:?} in method {method:?} of model {model:?}")]
    UnsupportedReturnType {
        model: String,
        method: String,
        ty: String,
    },

    #[error("multiple body arguments specified in method {method:?} of model {model:?}")]
    MultipleBodyArguments { model: String, method: String },
}
