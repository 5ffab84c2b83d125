/// Aggregate import header emitter

use iosgen_ir::ModelBinding;

/// One header importing every generated model and repository, so client
/// code can pull in the whole SDK with a single `#import`.
pub fn aggregate(bindings: &[ModelBinding]) -> String {
    let mut output = String::new();

    output.push_str("// Auto-generated aggregate import\n\n");
    for binding in bindings {
        output.push_str(&format!("#import \"{}.h\"\n", binding.objc_model_name));
        output.push_str(&format!("#import \"{}.h\"\n", binding.objc_repo_name));
    }

    output
}
