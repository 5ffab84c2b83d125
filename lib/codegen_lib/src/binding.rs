//! Objective-C binding assembly.
//!
//! Resolves class names, base classes, property declarations, and the
//! relation include closure for every model, then drives signature
//! synthesis over the model's methods and scope operations.

use iosgen_ir::{
    MethodBinding, ModelBinding, ModelDescriptor, PropBinding, RemoteMethodDescriptor,
    ScopeMethodBinding,
};
use tracing::debug;

use crate::error::CodegenError;
use crate::signature;
use crate::typemap::{self, to_pascal_case};

/// Base classes the SDK ships bindings for. Anything else is a
/// configuration error.
const KNOWN_BASE_MODELS: &[&str] = &["Model", "PersistedModel"];

/// Build the enriched binding for every model.
///
/// `exposed` is the full, read-only set of exposed model names; it must be
/// complete before the first return type is resolved.
pub fn build_bindings(
    models: Vec<ModelDescriptor>,
    exposed: &[String],
    prefix: &str,
) -> Result<Vec<ModelBinding>, CodegenError> {
    models
        .into_iter()
        .map(|model| build_model_binding(model, exposed, prefix))
        .collect()
}

fn build_model_binding(
    mut model: ModelDescriptor,
    exposed: &[String],
    prefix: &str,
) -> Result<ModelBinding, CodegenError> {
    debug!("processing model {:?}", model.name);

    let objc_model_name = format!("{prefix}{}", to_pascal_case(&model.name));
    let objc_repo_name = format!("{objc_model_name}Repository");

    if !KNOWN_BASE_MODELS.contains(&model.base.as_str()) {
        return Err(CodegenError::UnknownBaseType {
            model: model.name.clone(),
            base: model.base.clone(),
        });
    }
    let objc_base_model = format!("LB{}", model.base);

    let mut props = Vec::new();
    for prop in &model.properties {
        if prop.name == "id" {
            // The identifier accessor comes with the base class.
            continue;
        }
        debug!("  property {:?}", prop.name);
        let ty = typemap::convert_prop_type(&prop.ty).ok_or_else(|| {
            CodegenError::UnsupportedPropertyType {
                model: model.name.clone(),
                property: prop.name.clone(),
                ty: prop.ty.name().unwrap_or_default().to_string(),
            }
        })?;
        props.push(PropBinding {
            name: prop.name.clone(),
            ty: ty.to_string(),
        });
    }

    let includes = include_closure(&model, prefix);

    let mut methods = Vec::new();
    let mut model_methods = std::mem::take(&mut model.methods);
    for method in &mut model_methods {
        debug!("  method {:?}", method.name);
        methods.extend(synthesize(&objc_model_name, &model.name, method, exposed)?);
    }
    model.methods = model_methods;

    let mut scope_methods = Vec::new();
    let mut scopes = std::mem::take(&mut model.scopes);
    for entry in &mut scopes {
        let Some(scope) = entry.scope.as_mut() else {
            continue;
        };
        for scope_method in &mut scope.methods {
            debug!("  scope method {:?}", scope_method.api_name);
            let bindings = synthesize(
                &objc_model_name,
                &model.name,
                &mut scope_method.method,
                exposed,
            )?;
            scope_methods.extend(bindings.into_iter().map(|method| ScopeMethodBinding {
                scope_name: entry.name.clone(),
                target_class: scope.target_class.clone(),
                api_name: scope_method.api_name.clone(),
                method,
            }));
        }
    }
    model.scopes = scopes;

    Ok(ModelBinding {
        model,
        objc_model_name,
        objc_repo_name,
        objc_base_model,
        props,
        methods,
        scope_methods,
        includes,
    })
}

/// Run the one or two synthesis passes for a method and mark it generated.
///
/// Methods already marked are skipped, so re-entering the pipeline with the
/// same descriptors cannot register a binding twice.
fn synthesize(
    objc_model_name: &str,
    model_name: &str,
    method: &mut RemoteMethodDescriptor,
    exposed: &[String],
) -> Result<Vec<MethodBinding>, CodegenError> {
    if method.generated {
        debug!("  method {:?} already generated, skipping", method.name);
        return Ok(Vec::new());
    }

    let mut bindings = Vec::new();
    if let Some(binding) = signature::method_binding(objc_model_name, model_name, method, exposed, true)? {
        bindings.push(binding);
    }
    if signature::has_optional_arguments(method) {
        if let Some(binding) =
            signature::method_binding(objc_model_name, model_name, method, exposed, false)?
        {
            bindings.push(binding);
        }
    }

    if !bindings.is_empty() {
        method.generated = true;
    }
    Ok(bindings)
}

/// Generated class names this model's binding must import: relation
/// targets first, then through models, in declaration order, deduplicated,
/// never the model itself.
fn include_closure(model: &ModelDescriptor, prefix: &str) -> Vec<String> {
    let mut includes = Vec::new();
    for relation in &model.relations {
        for target in [relation.model.as_deref(), relation.through.as_deref()]
            .into_iter()
            .flatten()
        {
            if target == model.name {
                continue;
            }
            let include = format!("{prefix}{}", to_pascal_case(target));
            if !includes.contains(&include) {
                includes.push(include);
            }
        }
    }
    includes
}
