//! Content schemas for request and response bodies.

use crate::openapi::{Schema, SchemaType};
use crate::registry::{NativeType, ParamDescriptor, SchemaInput};
use crate::types::{map_native_type, resolve_type};

/// Build the content schema of a body described by `input`.
///
/// Properties keep input order, and so does the `required` list. An array
/// input wraps the object schema in `items`.
#[must_use]
pub fn build_schema(input: &SchemaInput) -> Schema {
    let object = object_schema(&input.params);
    match input.schema_type {
        SchemaType::Array => Schema::array(object),
        SchemaType::Object => object,
        other => Schema {
            schema_type: Some(other),
            ..object
        },
    }
}

fn object_schema(params: &[ParamDescriptor]) -> Schema {
    let mut schema = Schema::object();
    for param in params {
        if param.required {
            schema = schema.required_property(&param.name);
        }
        schema = schema.property(&param.name, property_schema(param));
    }
    schema
}

fn property_schema(param: &ParamDescriptor) -> Schema {
    let schema_type = resolve_type(param);

    let mut schema = match (param.nested_params.as_deref(), &param.param_type) {
        (Some(nested), _) if schema_type == SchemaType::Array => Schema::array(object_schema(nested)),
        (Some(nested), _) => object_schema(nested),
        (None, Some(NativeType::ListOf(elem))) => Schema::array(Schema::of_type(map_native_type(elem))),
        (None, _) => Schema::of_type(schema_type),
    };

    schema.description.clone_from(&param.description);
    if let Some(default) = param.default_value() {
        schema.default = Some(default.clone());
    }
    schema
}
