//! Method-signature synthesis.
//!
//! Turns one remote method into zero, one, or two Objective-C method
//! bindings: a required-arguments-only form, plus a full form whenever the
//! method has optional client-suppliable arguments. Server-computed
//! arguments never appear; body and non-body arguments are collected into
//! separate assignment lists for the repository emitter.

use iosgen_ir::{MethodBinding, RemoteMethodDescriptor, ReturnType};

use crate::error::CodegenError;
use crate::typemap;

/// Raw remote names that are never generated: either pre-implemented by
/// the base repository classes, or not yet supported.
const METHOD_NAMES_TO_SKIP: &[&str] = &[
    "create",
    "upsert",
    "deleteById",
    "createChangeStream",
    "prototype.updateAttributes",
    "prototype.patchAttributes",
];

/// Fully-synthesized names that are unsafe to invoke. `updateAllWithData`
/// fails server-side without a where filter, and no working form of it can
/// be generated.
const OBJC_METHOD_NAMES_TO_SKIP: &[&str] = &["updateAllWithData"];

/// Corrections for auto-generated names that don't read right.
const METHOD_NAME_REPLACEMENTS: &[(&str, &str)] = &[
    ("findByIdWithId", "findById"),
    ("findWithSuccess", "allWithSuccess"),
    ("updateAllWithWhere", "updateAllWithWhereFilter"),
    ("countWithWhere", "countWithWhereFilter"),
];

/// True when at least one argument is optional from the client's point of
/// view, in which case a second, full signature is synthesized.
pub fn has_optional_arguments(method: &RemoteMethodDescriptor) -> bool {
    method
        .accepts
        .iter()
        .any(|param| !param.is_server_computed() && !param.is_required())
}

/// Synthesize one binding for `method`.
///
/// With `skip_optional` set, only required arguments participate (the short
/// overload); otherwise all client-suppliable arguments do. Returns `None`
/// when the method is on a skip list.
pub fn method_binding(
    objc_model_name: &str,
    model_name: &str,
    method: &RemoteMethodDescriptor,
    exposed: &[String],
    skip_optional: bool,
) -> Result<Option<MethodBinding>, CodegenError> {
    if METHOD_NAMES_TO_SKIP.contains(&method.name.as_str()) {
        return Ok(None);
    }

    let mut method_name = method.name.replacen("prototype.", "", 1);
    let mut method_prototype = String::new();
    let mut param_assignments: Option<String> = None;
    let mut body_param_assignments: Option<String> = None;

    for param in &method.accepts {
        if param.is_server_computed() {
            continue;
        }
        if !param.is_required() && skip_optional {
            continue;
        }

        let objc_model_type = match &param.model {
            Some(model) => format!("{model} *"),
            None => format!("{objc_model_name} *"),
        };

        let ty = param.ty.as_deref().unwrap_or_default();
        let arg_type = typemap::convert_arg_type(ty, &param.arg, &objc_model_type).ok_or_else(
            || CodegenError::UnsupportedArgumentType {
                model: model_name.to_string(),
                method: method.name.clone(),
                arg: param.arg.clone(),
                ty: ty.to_string(),
            },
        )?;

        // `id` collides with the base class identifier member.
        let arg_name = if param.arg == "id" {
            "id_".to_string()
        } else {
            param.arg.clone()
        };

        let arg_right_value = if arg_type == objc_model_type {
            format!("[{} toDictionary]", param.arg)
        } else if arg_type == "NSDictionary *" {
            format!("({0} ? {0} : @{{}})", param.arg)
        } else {
            arg_name.clone()
        };

        if method_name == method.name {
            method_name.push_str("With");
            method_name.push_str(&capitalize_first(&param.arg));
        } else {
            method_prototype.push(' ');
            method_prototype.push_str(&param.arg);
        }

        if param.is_body() {
            if body_param_assignments.is_some() {
                return Err(CodegenError::MultipleBodyArguments {
                    model: model_name.to_string(),
                    method: method.name.clone(),
                });
            }
            body_param_assignments = Some(arg_right_value);
        } else {
            let assignment = format!("@\"{}\": {}", param.arg, arg_right_value);
            param_assignments = Some(match param_assignments {
                Some(existing) => format!("{existing}, {assignment}"),
                None => assignment,
            });
        }

        method_prototype.push_str(&format!(":({arg_type}){arg_name}"));
    }

    let first_return = method.returns.first();
    let return_arg = first_return.and_then(|ret| ret.arg.clone());
    let return_ty = first_return.and_then(|ret| ret.ty.as_ref());

    let objc_return_type = typemap::convert_return_type(
        return_ty,
        method.force_collection,
        model_name,
        objc_model_name,
        exposed,
    )
    .ok_or_else(|| CodegenError::UnsupportedReturnType {
        model: model_name.to_string(),
        method: method.name.clone(),
        ty: return_type_label(return_ty),
    })?;

    let success_block_type = typemap::convert_success_block_type(&objc_return_type);
    if method_name == method.name {
        method_name.push_str("WithSuccess");
        method_prototype.push_str(&format!(":({success_block_type})success "));
    } else {
        method_prototype.push_str(&format!("\n        success:({success_block_type})success"));
    }
    method_prototype.push_str("\n        failure:(SLFailureBlock)failure");

    if OBJC_METHOD_NAMES_TO_SKIP.contains(&method_name.as_str()) {
        return Ok(None);
    }
    if let Some((_, replacement)) = METHOD_NAME_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == method_name)
    {
        method_name = replacement.to_string();
    }

    let prototype = format!("(void){method_name}{method_prototype}");

    let origin_objc_return_type = return_ty
        .and_then(ReturnType::collection_element)
        .unwrap_or_default()
        .to_string();

    Ok(Some(MethodBinding {
        raw_name: method.name.clone(),
        prototype,
        return_arg,
        objc_return_type,
        origin_objc_return_type,
        param_assignments,
        body_param_assignments,
    }))
}

fn return_type_label(ty: Option<&ReturnType>) -> String {
    match ty {
        Some(ReturnType::Name(name)) => name.clone(),
        Some(ReturnType::Collection(_)) => "<array>".to_string(),
        Some(ReturnType::Composite(_)) => "object".to_string(),
        None => "<void>".to_string(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iosgen_ir::{HttpSource, HttpSpec, ParamDescriptor, ReturnDescriptor};

    fn param(arg: &str, ty: &str, required: bool) -> ParamDescriptor {
        ParamDescriptor {
            arg: arg.into(),
            ty: Some(ty.into()),
            required,
            http: None,
            model: None,
        }
    }

    fn body_param(arg: &str, ty: &str) -> ParamDescriptor {
        ParamDescriptor {
            http: Some(HttpSpec::Mapping {
                source: Some(HttpSource::Body),
            }),
            ..param(arg, ty, false)
        }
    }

    fn server_param(arg: &str, source: HttpSource) -> ParamDescriptor {
        ParamDescriptor {
            http: Some(HttpSpec::Mapping {
                source: Some(source),
            }),
            ..param(arg, "object", false)
        }
    }

    fn method(
        name: &str,
        accepts: Vec<ParamDescriptor>,
        returns: Vec<ReturnDescriptor>,
    ) -> RemoteMethodDescriptor {
        RemoteMethodDescriptor {
            name: name.into(),
            is_static: true,
            accepts,
            returns,
            deprecated: false,
            internal: false,
            force_collection: false,
            generated: false,
        }
    }

    fn returns(arg: &str, ty: ReturnType) -> Vec<ReturnDescriptor> {
        vec![ReturnDescriptor {
            arg: Some(arg.into()),
            ty: Some(ty),
        }]
    }

    fn bind(method: &RemoteMethodDescriptor, skip_optional: bool) -> Option<MethodBinding> {
        let exposed = vec!["Customer".to_string(), "Order".to_string()];
        method_binding("XXCustomer", "Customer", method, &exposed, skip_optional).unwrap()
    }

    #[test]
    fn find_by_id_end_to_end() {
        let method = method(
            "findById",
            vec![param("id", "any", true)],
            returns("obj", ReturnType::Name("Customer".into())),
        );

        let binding = bind(&method, true).unwrap();
        // `findByIdWithId` reads wrong and is corrected.
        assert_eq!(
            binding.prototype,
            "(void)findById:(id)id_\n        success:(void (^)(XXCustomer *))success\n        failure:(SLFailureBlock)failure"
        );
        assert_eq!(binding.objc_return_type, "XXCustomer");
        assert_eq!(binding.return_arg.as_deref(), Some("obj"));
        assert_eq!(binding.param_assignments.as_deref(), Some("@\"id\": id_"));
        assert!(binding.body_param_assignments.is_none());
    }

    #[test]
    fn skip_list_suppresses_generation() {
        for name in ["create", "upsert", "deleteById", "prototype.updateAttributes"] {
            let method = method(name, vec![], vec![]);
            assert!(bind(&method, true).is_none(), "{name}");
        }
    }

    #[test]
    fn update_all_is_skipped_after_synthesis() {
        let method = method(
            "updateAll",
            vec![body_param("data", "object")],
            returns("info", ReturnType::Composite(Default::default())),
        );
        assert!(bind(&method, true).is_none());
    }

    #[test]
    fn no_argument_method_gets_with_success() {
        let method = method("count", vec![], returns("count", ReturnType::Name("number".into())));
        let binding = bind(&method, true).unwrap();
        assert_eq!(
            binding.prototype,
            "(void)countWithSuccess:(void (^)(NSNumber *))success \n        failure:(SLFailureBlock)failure"
        );
        assert!(binding.param_assignments.is_none());
    }

    #[test]
    fn find_maps_to_all() {
        let method = method(
            "find",
            vec![param("filter", "object", false)],
            returns("objs", ReturnType::Collection(vec![])),
        );

        // Short form: no arguments survive, name becomes `findWithSuccess`,
        // corrected to `allWithSuccess`.
        let short = bind(&method, true).unwrap();
        assert!(short.prototype.starts_with("(void)allWithSuccess:"));

        // Full form keeps the filter argument.
        let full = bind(&method, false).unwrap();
        assert!(full.prototype.starts_with("(void)findWithFilter:(NSDictionary *)filter"));
        assert_eq!(
            full.param_assignments.as_deref(),
            Some("@\"filter\": (filter ? filter : @{})")
        );
    }

    #[test]
    fn optional_arguments_produce_two_distinct_signatures() {
        let method = method(
            "locate",
            vec![param("id", "any", true), param("where", "object", false)],
            vec![],
        );
        assert!(has_optional_arguments(&method));

        let short = bind(&method, true).unwrap();
        let full = bind(&method, false).unwrap();
        assert!(short.prototype.starts_with("(void)locateWithId:(id)id_"));
        assert!(full.prototype.starts_with("(void)locateWithId:(id)id_ where:(NSDictionary *)where"));

        // The short form's parameters are a strict subset of the full
        // form's.
        assert_eq!(short.param_assignments.as_deref(), Some("@\"id\": id_"));
        assert_eq!(
            full.param_assignments.as_deref(),
            Some("@\"id\": id_, @\"where\": (where ? where : @{})")
        );
    }

    #[test]
    fn required_only_method_has_no_optional_arguments() {
        let method = method("exists", vec![param("id", "any", true)], vec![]);
        assert!(!has_optional_arguments(&method));
    }

    #[test]
    fn server_computed_arguments_are_invisible() {
        let method = method(
            "stats",
            vec![
                server_param("req", HttpSource::Req),
                server_param("res", HttpSource::Res),
                server_param("ctx", HttpSource::Context),
            ],
            vec![],
        );
        assert!(!has_optional_arguments(&method));

        let binding = bind(&method, true).unwrap();
        assert!(binding.prototype.starts_with("(void)statsWithSuccess:"));
        assert!(binding.param_assignments.is_none());
    }

    #[test]
    fn body_data_serializes_from_model() {
        let method = method(
            "replaceById",
            vec![param("id", "any", true), body_param("data", "object")],
            returns("obj", ReturnType::Name("Customer".into())),
        );

        let binding = bind(&method, true).unwrap();
        assert!(binding
            .prototype
            .starts_with("(void)replaceByIdWithId:(id)id_ data:(XXCustomer *)data"));
        assert_eq!(
            binding.body_param_assignments.as_deref(),
            Some("[data toDictionary]")
        );
        assert_eq!(binding.param_assignments.as_deref(), Some("@\"id\": id_"));
    }

    #[test]
    fn param_model_overrides_serialized_class() {
        let mut data = body_param("data", "object");
        data.model = Some("XXOrder".into());
        let method = method("submit", vec![data], vec![]);

        let binding = bind(&method, true).unwrap();
        assert!(binding.prototype.starts_with("(void)submitWithData:(XXOrder *)data"));
        assert_eq!(
            binding.body_param_assignments.as_deref(),
            Some("[data toDictionary]")
        );
    }

    #[test]
    fn multiple_body_arguments_are_fatal() {
        let method = method(
            "merge",
            vec![body_param("data", "object"), body_param("extra", "object")],
            vec![],
        );
        let exposed = vec!["Customer".to_string()];
        let err = method_binding("XXCustomer", "Customer", &method, &exposed, true).unwrap_err();
        assert_eq!(
            err,
            CodegenError::MultipleBodyArguments {
                model: "Customer".into(),
                method: "merge".into(),
            }
        );
    }

    #[test]
    fn unsupported_argument_type_is_fatal() {
        let method = method("locate", vec![param("point", "GeoPoint", true)], vec![]);
        let exposed = vec!["Customer".to_string()];
        let err = method_binding("XXCustomer", "Customer", &method, &exposed, true).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnsupportedArgumentType {
                model: "Customer".into(),
                method: "locate".into(),
                arg: "point".into(),
                ty: "GeoPoint".into(),
            }
        );
    }

    #[test]
    fn foreign_model_return_resolves_to_normalized_name() {
        let method = method(
            "lastOrder",
            vec![],
            returns("obj", ReturnType::Name("order".into())),
        );
        let binding = bind(&method, true).unwrap();
        assert_eq!(binding.objc_return_type, "Order");
    }

    #[test]
    fn collection_element_type_is_preserved() {
        let method = method(
            "find",
            vec![],
            returns(
                "objs",
                ReturnType::Collection(vec![serde_json::Value::String("Order".into())]),
            ),
        );
        let binding = bind(&method, true).unwrap();
        assert_eq!(binding.objc_return_type, "NSArray");
        assert_eq!(binding.origin_objc_return_type, "Order");
    }

    #[test]
    fn scope_renamed_method_keeps_chained_naming() {
        // A scope-rewritten method lost its prototype marker, so the
        // first argument extends the name.
        let method = method(
            "get__orders",
            vec![param("id", "any", true), param("filter", "object", false)],
            returns("objs", ReturnType::Collection(vec![])),
        );
        let full = bind(&method, false).unwrap();
        assert!(full
            .prototype
            .starts_with("(void)get__ordersWithId:(id)id_ filter:(NSDictionary *)filter"));
    }
}
