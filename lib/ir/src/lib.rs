//! iosgen descriptor and binding IR
//!
//! Data structures shared between:
//! - the generation library (descriptor in, enriched bindings out)
//! - the codegen binary (JSON descriptor loading)
//!
//! Three layers:
//! 1. descriptor: the raw service description produced by introspection
//! 2. model:      canonical per-model records after normalization
//! 3. binding:    Objective-C enriched records consumed by the emitters

pub mod binding;
pub mod descriptor;
pub mod model;
pub mod types;

pub use binding::*;
pub use descriptor::*;
pub use model::*;
pub use types::*;
