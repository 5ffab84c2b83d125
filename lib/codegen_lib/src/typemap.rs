//! Type conversion tables: descriptor types to Objective-C declarations.
//!
//! The tables are ordered precedence lists. Argument lookup tries the
//! compound `"<type> <argName>"` key before the bare type, because some
//! argument names (notably `data`) deliberately shadow their type-only
//! mapping. Unknown types resolve to `None`; callers turn that into a
//! fatal error naming the offending item.

use iosgen_ir::{PropType, ReturnType};

/// Placeholder substituted with the enclosing model's own class type.
const OBJC_MODEL_TYPE: &str = "<objcModelType>";

/// Type declaration conversion table for properties.
const PROP_TYPE_TABLE: &[(&str, &str)] = &[
    ("String", "(nonatomic, copy) NSString *"),
    ("Number", "NSNumber *"),
    ("Boolean", "BOOL "),
    ("ObjectID", "(nonatomic, copy) NSString *"),
    ("Date", "NSDate *"),
    ("object", "NSDictionary *"),
    ("Object", "NSDictionary *"),
];

/// Property declaration for array-typed properties.
const PROP_ARRAY_TYPE: &str = "(nonatomic) NSArray *";

/// Type conversion table for arguments.
const ARG_TYPE_TABLE: &[(&str, &str)] = &[
    // Special case: the argument whose type is `object` and name is `data`
    // serializes from the enclosing model class.
    ("object data", OBJC_MODEL_TYPE),
    ("object", "NSDictionary *"),
    ("any", "id"),
    ("id", "id"),
    ("boolean", "NSNumber *"),
    ("Boolean", "NSNumber *"),
    ("string", "NSString *"),
    ("String", "NSString *"),
    ("number", "NSNumber *"),
    ("Number", "NSNumber *"),
];

/// Return type conversion table.
const RETURN_TYPE_TABLE: &[(&str, &str)] = &[
    ("object", "NSDictionary"),
    ("number", "NSNumber"),
    ("boolean", "BOOL"),
    ("<array>", "NSArray"),
    ("<void>", "void"),
];

/// Map a property type to its `@property` declaration.
pub fn convert_prop_type(ty: &PropType) -> Option<&'static str> {
    match ty {
        PropType::Array(_) => Some(PROP_ARRAY_TYPE),
        PropType::Name(name) => lookup(PROP_TYPE_TABLE, name),
    }
}

/// Map an argument to its parameter type.
///
/// `objc_model_type` is the already-resolved model class type substituted
/// for the `data` special case.
pub fn convert_arg_type(ty: &str, arg: &str, objc_model_type: &str) -> Option<String> {
    let compound = format!("{ty} {arg}");
    let entry = lookup(ARG_TYPE_TABLE, &compound).or_else(|| lookup(ARG_TYPE_TABLE, ty))?;
    Some(entry.replace(OBJC_MODEL_TYPE, objc_model_type))
}

/// Resolve a declared return type to its Objective-C type name.
///
/// Resolution order: the enclosing model's own name (exact match), any
/// exposed model name (case-insensitive, yielding a normalized foreign
/// type name), then the structural markers and the fixed table.
pub fn convert_return_type(
    ty: Option<&ReturnType>,
    force_collection: bool,
    model_name: &str,
    objc_model_name: &str,
    exposed: &[String],
) -> Option<String> {
    if force_collection {
        return lookup(RETURN_TYPE_TABLE, "<array>").map(str::to_string);
    }

    let key = match ty {
        Some(ReturnType::Name(name)) => {
            if name == model_name {
                return Some(objc_model_name.to_string());
            }
            if exposed.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                return Some(to_pascal_case(name));
            }
            name.as_str()
        }
        None => "<void>",
        Some(ReturnType::Collection(_)) => "<array>",
        Some(ReturnType::Composite(_)) => "object",
    };

    lookup(RETURN_TYPE_TABLE, key).map(str::to_string)
}

/// Success-callback block type for a resolved return type.
///
/// Void returns an empty-payload block, primitive booleans stay primitive,
/// everything else is passed by reference.
pub fn convert_success_block_type(objc_type: &str) -> String {
    if objc_type == "void" {
        "void (^)()".to_string()
    } else if objc_type == "BOOL" {
        "void (^)(BOOL)".to_string()
    } else {
        format!("void (^)({objc_type} *)")
    }
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, value)| *value)
}

/// Normalize a model name into a class-name component: split on separators
/// and case boundaries, uppercase each word's first letter, lowercase the
/// rest.
pub fn to_pascal_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        let new_word = match i.checked_sub(1).map(|p| chars[p]) {
            Some(prev) if prev.is_ascii_alphanumeric() && ch.is_ascii_uppercase() => {
                prev.is_ascii_lowercase()
                    || chars.get(i + 1).is_some_and(|next| next.is_ascii_lowercase())
            }
            _ => false,
        };
        if new_word && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}
