/// Objective-C repository emitter

use iosgen_ir::{MethodBinding, ModelBinding};

pub fn header(binding: &ModelBinding) -> String {
    let mut output = String::new();

    output.push_str("// Auto-generated repository\n");
    output.push_str(&format!("// Source model: {}\n\n", binding.model.name));
    output.push_str(&format!("#import \"{}.h\"\n\n", binding.objc_model_name));

    output.push_str(&format!(
        "@interface {} : {}Repository\n\n",
        binding.objc_repo_name, binding.objc_base_model
    ));
    output.push_str("+ (instancetype)repository;\n\n");

    for method in &binding.methods {
        output.push_str(&format!("- {};\n\n", method.prototype));
    }
    for scope_method in &binding.scope_methods {
        output.push_str(&format!(
            "// Scope {} (records of {}): {}\n",
            scope_method.scope_name, scope_method.target_class, scope_method.api_name
        ));
        output.push_str(&format!("- {};\n\n", scope_method.method.prototype));
    }

    output.push_str("@end\n");

    output
}

pub fn implementation(binding: &ModelBinding) -> String {
    let mut output = String::new();

    output.push_str("// Auto-generated repository\n\n");
    output.push_str(&format!("#import \"{}.h\"\n\n", binding.objc_repo_name));

    output.push_str(&format!("@implementation {}\n\n", binding.objc_repo_name));

    output.push_str("+ (instancetype)repository {\n");
    output.push_str(&format!(
        "    {0} *repository = [self repositoryWithClassName:@\"{1}\"];\n",
        binding.objc_repo_name, binding.model.plural_name
    ));
    output.push_str(&format!(
        "    repository.modelClass = [{} class];\n",
        binding.objc_model_name
    ));
    output.push_str("    return repository;\n}\n\n");

    for method in &binding.methods {
        let invoke_name = method.raw_name.replacen("prototype.", "", 1);
        output.push_str(&method_implementation(binding, method, &invoke_name));
    }
    for scope_method in &binding.scope_methods {
        output.push_str(&method_implementation(
            binding,
            &scope_method.method,
            &scope_method.api_name,
        ));
    }

    output.push_str("@end\n");

    output
}

fn method_implementation(binding: &ModelBinding, method: &MethodBinding, invoke_name: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("- {} {{\n", method.prototype));
    match &method.param_assignments {
        Some(assignments) => output.push_str(&format!(
            "    NSDictionary *parameters = @{{ {assignments} }};\n"
        )),
        None => output.push_str("    NSDictionary *parameters = @{};\n"),
    }
    if let Some(body) = &method.body_param_assignments {
        output.push_str(&format!("    id bodyParameters = {body};\n"));
    }

    output.push_str(&format!(
        "    [self invokeStaticMethod:@\"{invoke_name}\"\n"
    ));
    output.push_str("                  parameters:parameters\n");
    if method.body_param_assignments.is_some() {
        output.push_str("              bodyParameters:bodyParameters\n");
    }
    output.push_str(&format!(
        "                     success:^(id value) {{\n                         {}\n                     }}\n",
        success_statement(binding, method)
    ));
    output.push_str("                     failure:failure];\n");
    output.push_str("}\n\n");

    output
}

/// Statement forwarding the raw response value to the success block.
fn success_statement(binding: &ModelBinding, method: &MethodBinding) -> String {
    match method.objc_return_type.as_str() {
        "void" => "success();".to_string(),
        "BOOL" => "success([value boolValue]);".to_string(),
        ty if ty == binding.objc_model_name => format!(
            "success(({ty} *)[self modelWithDictionary:value]);"
        ),
        _ => "success(value);".to_string(),
    }
}
