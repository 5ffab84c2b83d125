//! Descriptor normalization: raw class descriptors to canonical models.

use iosgen_ir::{BaseSpec, ClassDescriptor, ModelDescriptor, ServiceDescriptor};
use tracing::{debug, info};

/// Normalize every generable class into a [`ModelDescriptor`].
///
/// Classes without a shared constructor and the built-in User type are
/// skipped with a log line; both skips are recoverable.
pub fn describe_models(service: &ServiceDescriptor) -> Vec<ModelDescriptor> {
    service.classes.iter().filter_map(describe_class).collect()
}

fn describe_class(class: &ClassDescriptor) -> Option<ModelDescriptor> {
    let Some(ctor) = &class.ctor else {
        info!(
            "skipping {:?}: no shared constructor, not a generable model",
            class.name
        );
        return None;
    };

    if class.inherits_user {
        debug!(
            "skipping {:?}: the User binding ships prebuilt with the SDK",
            class.name
        );
        return None;
    }

    let base = match &class.base {
        Some(BaseSpec::Name(name)) => name.clone(),
        // An opaque (constructor-valued) base has no usable name; the
        // binding stage rejects the empty name as an unknown base type.
        Some(BaseSpec::Opaque(_)) | None => String::new(),
    };

    let is_id_generated = class.ids.first().map(|id| id.generated).unwrap_or(false);

    // Instance methods need the constructor parameters to address a
    // specific record, so prepend them.
    let mut methods = class.methods.clone();
    for method in &mut methods {
        if !method.is_static {
            let mut accepts = ctor.accepts.clone();
            accepts.append(&mut method.accepts);
            method.accepts = accepts;
        }
    }

    Some(ModelDescriptor {
        name: class.name.clone(),
        plural_name: class
            .plural_name
            .clone()
            .unwrap_or_else(|| format!("{}s", class.name)),
        base,
        is_id_generated,
        properties: class.properties.clone(),
        relations: class.relations.clone(),
        scope_targets: class.scope_targets.clone(),
        methods,
        scopes: Vec::new(),
        acls: class.acls.clone(),
        validations: class.validations.clone(),
    })
}
