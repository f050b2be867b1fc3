//! Parameter type resolution.
//!
//! A parameter either declares a [`NativeType`], which maps onto an OpenAPI
//! primitive, or has its type guessed from its name and default value.

use serde_json::Value;

use crate::openapi::SchemaType;
use crate::registry::{NativeType, ParamDescriptor};

/// Guess the schema type of an untyped parameter. First match wins:
///
/// 1. name starts with `is_` → boolean
/// 2. name contains `size`, `count` or `num` → integer
/// 3. boolean default → boolean
/// 4. integer default → integer
/// 5. anything else → string
#[must_use]
pub fn infer_type(name: &str, default: Option<&Value>) -> SchemaType {
    if name.starts_with("is_") {
        return SchemaType::Boolean;
    }
    if ["size", "count", "num"].iter().any(|hint| name.contains(hint)) {
        return SchemaType::Integer;
    }

    match default {
        Some(Value::Bool(_)) => SchemaType::Boolean,
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => SchemaType::Integer,
        _ => SchemaType::String,
    }
}

/// Map a declared native type onto its OpenAPI primitive.
#[must_use]
pub fn map_native_type(native: &NativeType) -> SchemaType {
    match native {
        NativeType::Str => SchemaType::String,
        NativeType::Int => SchemaType::Integer,
        NativeType::Bool => SchemaType::Boolean,
        NativeType::Float => SchemaType::Number,
        NativeType::List | NativeType::Tuple => SchemaType::Array,
        NativeType::ListOf(_) | NativeType::Dict | NativeType::Other(_) => SchemaType::Object,
    }
}

/// Schema type of a parameter: the declared type if any, else the guess.
#[must_use]
pub fn resolve_type(param: &ParamDescriptor) -> SchemaType {
    param.param_type.as_ref().map_or_else(
        || infer_type(&param.name, param.default_value()),
        map_native_type,
    )
}
