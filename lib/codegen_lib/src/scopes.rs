//! Relation-scope reconstruction.
//!
//! The data layer registers relation accessors as remote methods named
//! `prototype.__<op>__<scopeName>`. This module reverse-engineers those
//! names back into per-scope operation maps, validating that each scope's
//! target model is itself exposed.

use iosgen_ir::{ModelDescriptor, RemoteMethodDescriptor, ScopeDescriptor, ScopeEntry, ScopeMethod};
use tracing::warn;

/// Annotate every model with its reconstructed scope map.
///
/// Must run after normalization is complete: scope validation matches
/// target classes against the full set of exposed model names.
pub fn build_scopes(models: &mut [ModelDescriptor]) {
    let exposed: Vec<String> = models.iter().map(|m| m.name.clone()).collect();
    for model in models.iter_mut() {
        build_model_scopes(model, &exposed);
    }
}

fn build_model_scopes(model: &mut ModelDescriptor, exposed: &[String]) {
    model.scopes = Vec::new();
    let mut methods = std::mem::take(&mut model.methods);
    for method in &mut methods {
        build_scope_method(model, method, exposed);
    }
    model.methods = methods;
}

fn build_scope_method(
    model: &mut ModelDescriptor,
    method: &mut RemoteMethodDescriptor,
    exposed: &[String],
) {
    let Some((op, scope_name)) = parse_scope_method_name(&method.name) else {
        return;
    };

    // The scope is identified; the method no longer needs its
    // `prototype.` marker.
    method.name = format!("{op}__{scope_name}");

    let target_class = model
        .scope_targets
        .iter()
        .find(|target| target.name == scope_name)
        .and_then(|target| target.target_class.clone());

    match model.scopes.iter().position(|entry| entry.name == scope_name) {
        None => {
            let Some(target) = target_class else {
                warn!(
                    "scope {}.{} is missing target-class metadata; \
                     its binding won't be generated",
                    model.name, scope_name
                );
                model.scopes.push(ScopeEntry {
                    name: scope_name,
                    scope: None,
                });
                return;
            };

            if !exposed.iter().any(|name| name.eq_ignore_ascii_case(&target)) {
                warn!(
                    "scope {}.{} targets class {:?}, which is not an exposed model; \
                     its binding won't be generated",
                    model.name, scope_name, target
                );
                model.scopes.push(ScopeEntry {
                    name: scope_name,
                    scope: None,
                });
                return;
            }

            model.scopes.push(ScopeEntry {
                name: scope_name.clone(),
                scope: Some(ScopeDescriptor {
                    target_class: target,
                    methods: Vec::new(),
                }),
            });
        }
        Some(index) => {
            if model.scopes[index].scope.is_none() {
                // The warning was already reported for this scope.
                return;
            }
        }
    }

    let api_name = match op.as_str() {
        // The bare scope name is the accessor.
        "get" => scope_name.clone(),
        "delete" => format!("{scope_name}.destroyAll"),
        _ => format!("{scope_name}.{op}"),
    };

    let scope_method = method.derive(scope_name.as_str());
    let Some(entry) = model
        .scopes
        .iter_mut()
        .find(|entry| entry.name == scope_name)
    else {
        return;
    };
    let Some(scope) = entry.scope.as_mut() else {
        return;
    };

    if scope_method.name.contains("create") {
        let mut create_many = scope_method.derive(scope_method.name.replacen("create", "createMany", 1));
        create_many.force_collection = true;
        let many_api_name = api_name.replacen("create", "createMany", 1);

        scope.methods.push(ScopeMethod {
            api_name,
            method: scope_method,
        });
        scope.methods.push(ScopeMethod {
            api_name: many_api_name,
            method: create_many,
        });
    } else {
        scope.methods.push(ScopeMethod {
            api_name,
            method: scope_method,
        });
    }
}

/// Split `prototype.__<op>__<scope>` into its parts.
///
/// The op never contains an underscore; everything after the second `__`
/// is the scope name.
fn parse_scope_method_name(name: &str) -> Option<(String, String)> {
    let rest = name.strip_prefix("prototype.__")?;
    let (op, scope) = rest.split_once("__")?;
    if op.is_empty() || scope.is_empty() || op.contains('_') {
        return None;
    }
    Some((op.to_string(), scope.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iosgen_ir::ScopeTargetDescriptor;

    fn method(name: &str) -> RemoteMethodDescriptor {
        RemoteMethodDescriptor {
            name: name.into(),
            is_static: false,
            accepts: vec![],
            returns: vec![],
            deprecated: true,
            internal: true,
            force_collection: false,
            generated: false,
        }
    }

    fn model(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.into(),
            plural_name: format!("{name}s"),
            base: "PersistedModel".into(),
            is_id_generated: false,
            properties: vec![],
            relations: vec![],
            scope_targets: vec![],
            methods: vec![],
            scopes: vec![],
            acls: vec![],
            validations: vec![],
        }
    }

    fn scope_target(name: &str, target: Option<&str>) -> ScopeTargetDescriptor {
        ScopeTargetDescriptor {
            name: name.into(),
            target_class: target.map(Into::into),
        }
    }

    #[test]
    fn parses_scope_method_names() {
        assert_eq!(
            parse_scope_method_name("prototype.__get__orders"),
            Some(("get".into(), "orders".into()))
        );
        assert_eq!(
            parse_scope_method_name("prototype.__delete__orderItems"),
            Some(("delete".into(), "orderItems".into()))
        );
        // Ops never contain underscores.
        assert_eq!(parse_scope_method_name("prototype.__get_x__orders"), None);
        assert_eq!(parse_scope_method_name("prototype.updateAttributes"), None);
        assert_eq!(parse_scope_method_name("findById"), None);
        assert_eq!(parse_scope_method_name("prototype.____orders"), None);
    }

    #[test]
    fn api_naming_per_op() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", Some("Order"))];
        customer.methods = vec![
            method("prototype.__get__orders"),
            method("prototype.__delete__orders"),
            method("prototype.__count__orders"),
        ];
        let mut models = vec![customer, model("Order")];

        build_scopes(&mut models);

        let entry = models[0].scope("orders").unwrap();
        let scope = entry.scope.as_ref().unwrap();
        assert_eq!(scope.target_class, "Order");
        let api_names: Vec<&str> = scope.methods.iter().map(|m| m.api_name.as_str()).collect();
        assert_eq!(api_names, ["orders", "orders.destroyAll", "orders.count"]);

        // Every derived method is named after the scope, with inherited
        // flags reset.
        for scope_method in &scope.methods {
            assert_eq!(scope_method.method.name, "orders");
            assert!(!scope_method.method.deprecated);
            assert!(!scope_method.method.internal);
        }
    }

    #[test]
    fn scope_rewrite_drops_prototype_marker() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", Some("Order"))];
        customer.methods = vec![method("prototype.__get__orders")];
        let mut models = vec![customer, model("Order")];

        build_scopes(&mut models);

        assert_eq!(models[0].methods[0].name, "get__orders");
    }

    #[test]
    fn missing_target_class_marks_scope_null() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", None)];
        customer.methods = vec![
            method("prototype.__get__orders"),
            // Must see the cached null and skip silently.
            method("prototype.__delete__orders"),
        ];
        let mut models = vec![customer];

        build_scopes(&mut models);

        assert_eq!(models[0].scopes.len(), 1);
        assert!(models[0].scope("orders").unwrap().scope.is_none());
        // The renames still happened.
        assert_eq!(models[0].methods[0].name, "get__orders");
        assert_eq!(models[0].methods[1].name, "delete__orders");
    }

    #[test]
    fn unexposed_target_marks_scope_null() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", Some("Ghost"))];
        customer.methods = vec![method("prototype.__get__orders")];
        let mut models = vec![customer];

        build_scopes(&mut models);

        assert!(models[0].scope("orders").unwrap().scope.is_none());
    }

    #[test]
    fn target_match_is_case_insensitive() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", Some("order"))];
        customer.methods = vec![method("prototype.__get__orders")];
        let mut models = vec![customer, model("Order")];

        build_scopes(&mut models);

        let entry = models[0].scope("orders").unwrap();
        assert_eq!(entry.scope.as_ref().unwrap().target_class, "order");
    }

    #[test]
    fn create_scope_gets_create_many_sibling() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("createRequests", Some("Order"))];
        customer.methods = vec![method("prototype.__create__createRequests")];
        let mut models = vec![customer, model("Order")];

        build_scopes(&mut models);

        let entry = models[0].scope("createRequests").unwrap();
        let scope = entry.scope.as_ref().unwrap();
        assert_eq!(scope.methods.len(), 2);

        assert_eq!(scope.methods[0].api_name, "createRequests.create");
        assert_eq!(scope.methods[0].method.name, "createRequests");
        assert!(!scope.methods[0].method.force_collection);

        // The first `create` in both the name and the API name is replaced.
        assert_eq!(scope.methods[1].api_name, "createManyRequests.create");
        assert_eq!(scope.methods[1].method.name, "createManyRequests");
        assert!(scope.methods[1].method.force_collection);
    }

    #[test]
    fn non_create_scope_has_no_sibling() {
        let mut customer = model("Customer");
        customer.scope_targets = vec![scope_target("orders", Some("Order"))];
        customer.methods = vec![method("prototype.__create__orders")];
        let mut models = vec![customer, model("Order")];

        build_scopes(&mut models);

        // The derived method is named `orders`, which does not contain
        // `create`, so no sibling is synthesized.
        let entry = models[0].scope("orders").unwrap();
        let scope = entry.scope.as_ref().unwrap();
        assert_eq!(scope.methods.len(), 1);
        assert_eq!(scope.methods[0].api_name, "orders.create");
    }
}
