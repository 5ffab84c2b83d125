/// Objective-C model class emitter

use iosgen_ir::ModelBinding;

pub fn header(binding: &ModelBinding) -> String {
    let mut output = String::new();

    output.push_str("// Auto-generated model class\n");
    output.push_str(&format!("// Source model: {}\n\n", binding.model.name));
    output.push_str("#import <Foundation/Foundation.h>\n");
    output.push_str(&format!("#import \"{}.h\"\n", binding.objc_base_model));
    for include in &binding.includes {
        output.push_str(&format!("#import \"{include}.h\"\n"));
    }
    output.push('\n');

    output.push_str(&format!(
        "@interface {} : {}\n\n",
        binding.objc_model_name, binding.objc_base_model
    ));
    for prop in &binding.props {
        output.push_str(&format!("@property {}{};\n", prop.ty, prop.name));
    }
    output.push_str("\n@end\n");

    output
}

pub fn implementation(binding: &ModelBinding) -> String {
    let mut output = String::new();

    output.push_str("// Auto-generated model class\n\n");
    output.push_str(&format!("#import \"{}.h\"\n\n", binding.objc_model_name));
    output.push_str(&format!("@implementation {}\n\n@end\n", binding.objc_model_name));

    output
}
