//! Parameter override merging and OpenAPI parameter objects.

use tracing::trace;

use crate::openapi::{Parameter, ParameterIn, Schema};
use crate::registry::{ParamDescriptor, ParamOverride};
use crate::types::resolve_type;

/// Apply explicit overrides to a parameter list, in place.
///
/// A non-nested override overwrites the type and description of the base
/// parameter with the same name; when it carries nested fields they replace
/// the base's nested fields. An override whose name matches nothing is
/// dropped. A nested override is appended as a new parameter.
pub fn merge_overrides<'a>(
    params: &'a mut Vec<ParamDescriptor>,
    overrides: &[ParamOverride],
) -> &'a mut Vec<ParamDescriptor> {
    for over in overrides {
        if over.nested {
            params.push(ParamDescriptor {
                name: over.name.clone(),
                required: over.required,
                default: over.default.clone(),
                param_type: Some(over.param_type.clone()),
                description: over.description.clone(),
                nested_params: over.nested_params.as_deref().map(merged_nested),
            });
            continue;
        }

        let mut matched = false;
        for param in params.iter_mut().filter(|p| p.name == over.name) {
            matched = true;
            param.param_type = Some(over.param_type.clone());
            param.description.clone_from(&over.description);
            if let Some(nested) = over.nested_params.as_deref() {
                param.nested_params = Some(merged_nested(nested));
            }
        }

        if !matched {
            trace!(parameter = %over.name, "No parameter matches override, dropping it");
        }
    }
    params
}

/// Merge overrides into a copy of `params`, leaving the input untouched.
#[must_use]
pub fn merged(params: &[ParamDescriptor], overrides: &[ParamOverride]) -> Vec<ParamDescriptor> {
    let mut params = params.to_vec();
    merge_overrides(&mut params, overrides);
    params
}

fn merged_nested(overrides: &[ParamOverride]) -> Vec<ParamDescriptor> {
    merged(&[], overrides)
}

/// Turn parameter descriptors into OpenAPI parameter objects.
#[must_use]
pub fn build_parameters(params: &[ParamDescriptor], location: ParameterIn) -> Vec<Parameter> {
    params
        .iter()
        .map(|param| {
            let mut schema = Schema::of_type(resolve_type(param));
            let mut allow_empty_value = false;
            if !param.required {
                match param.default_value() {
                    Some(default) => schema.default = Some(default.clone()),
                    None => allow_empty_value = true,
                }
            }

            Parameter {
                name: param.name.clone(),
                location,
                schema,
                description: param.description.clone().filter(|d| !d.is_empty()),
                required: param.required,
                allow_empty_value,
            }
        })
        .collect()
}
