//! iosgen code generation library
//!
//! Transforms a service descriptor (models, properties, relations, remote
//! methods) into an Objective-C client SDK: one model class and one
//! repository per exposed model, plus an aggregate import header.
//!
//! Pipeline:
//! 1. `normalize` turns raw class descriptors into canonical model records
//! 2. `scopes` reconstructs relation scopes from method names
//! 3. `binding` maps types and synthesizes method signatures
//!    (via `typemap` and `signature`)
//! 4. `objc_model` / `objc_repo` / `objc_imports` render source text
//!
//! A run is a single synchronous pass: it either returns the full file set
//! or fails with the first fatal [`CodegenError`].

pub mod binding;
pub mod error;
pub mod normalize;
pub mod objc_imports;
pub mod objc_model;
pub mod objc_repo;
pub mod scopes;
pub mod signature;
pub mod typemap;

pub use error::CodegenError;

use iosgen_ir::ServiceDescriptor;

/// Options controlling a generation run.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Prefix prepended to every generated Objective-C class name.
    pub prefix: String,
}

/// The complete generated SDK.
#[derive(Debug)]
pub struct GeneratedCode {
    pub files: Vec<GeneratedFile>,
}

/// One generated source file: path relative to the output directory, plus
/// its full content. No I/O happens here.
#[derive(Debug)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Run the whole pipeline over a service descriptor.
pub fn generate_sdk(
    service: &ServiceDescriptor,
    options: &GeneratorOptions,
) -> Result<GeneratedCode, CodegenError> {
    let mut models = normalize::describe_models(service);
    scopes::build_scopes(&mut models);

    // The exposed-name set is complete from here on; type resolution only
    // ever reads it.
    let exposed: Vec<String> = models.iter().map(|model| model.name.clone()).collect();

    let bindings = binding::build_bindings(models, &exposed, &options.prefix)?;

    let mut files = Vec::new();
    for binding in &bindings {
        files.push(GeneratedFile {
            path: format!("{}.h", binding.objc_model_name),
            content: objc_model::header(binding),
        });
        files.push(GeneratedFile {
            path: format!("{}.m", binding.objc_model_name),
            content: objc_model::implementation(binding),
        });
        files.push(GeneratedFile {
            path: format!("{}.h", binding.objc_repo_name),
            content: objc_repo::header(binding),
        });
        files.push(GeneratedFile {
            path: format!("{}.m", binding.objc_repo_name),
            content: objc_repo::implementation(binding),
        });
    }
    files.push(GeneratedFile {
        path: format!("{}ModelImports.h", options.prefix),
        content: objc_imports::aggregate(&bindings),
    });

    Ok(GeneratedCode { files })
}
