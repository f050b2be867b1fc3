//! Path and operation assembly.

use indexmap::IndexMap;

use crate::openapi::{Operation, ParameterIn, PathItem, RequestBody};
use crate::params::{build_parameters, merged};
use crate::registry::{
    EndpointDescriptor, EndpointRegistry, ParamDescriptor, ParamOverride, SchemaInput,
};
use crate::responses::build_responses;
use crate::schema::build_schema;
use crate::tags::resolve_tag;

/// Build the `paths` object.
///
/// Paths come out in lexical order and operations in GET, POST, PUT, DELETE
/// order. A path is left out entirely when any of its endpoints is internal
/// and `include_internal` is not set.
#[must_use]
pub fn build_paths(registry: &EndpointRegistry, include_internal: bool) -> IndexMap<String, PathItem> {
    let mut paths = IndexMap::new();

    for (path, endpoints) in registry.paths() {
        if !endpoints.iter().all(|e| e.is_visible(include_internal)) {
            continue;
        }

        let mut ordered: Vec<&EndpointDescriptor> = endpoints.iter().collect();
        ordered.sort_by_key(|e| e.method);

        let mut item = PathItem::default();
        for endpoint in ordered {
            item.set_operation(endpoint.method, build_operation(endpoint));
        }
        paths.insert(path.to_string(), item);
    }

    paths
}

fn build_operation(endpoint: &EndpointDescriptor) -> Operation {
    let overrides = endpoint.doc_parameters();
    let doc = endpoint.handler_doc.as_ref();

    let path_params = merged_declared(&endpoint.path_params, overrides);
    let query_params = merged_declared(&endpoint.query_params, overrides);

    let mut parameters = build_parameters(&path_params, ParameterIn::Path);
    parameters.extend(build_parameters(&query_params, ParameterIn::Query));

    let request_body = if endpoint.method.accepts_body() {
        request_body(endpoint, overrides, query_params)
    } else {
        None
    };

    Operation {
        tags: vec![resolve_tag(endpoint)],
        summary: doc
            .and_then(|doc| doc.summary.clone())
            .filter(|summary| !summary.is_empty()),
        description: endpoint.description.clone(),
        parameters,
        request_body,
        responses: build_responses(endpoint.method, doc.map(|doc| &doc.response)),
    }
}

/// Overrides only apply to a parameter list the endpoint declares; nested
/// overrides never create path or query parameters on their own.
fn merged_declared(params: &[ParamDescriptor], overrides: &[ParamOverride]) -> Vec<ParamDescriptor> {
    if params.is_empty() {
        Vec::new()
    } else {
        merged(params, overrides)
    }
}

/// Body parameters take precedence; query parameters only describe the
/// body when there are no body parameters.
fn request_body(
    endpoint: &EndpointDescriptor,
    overrides: &[ParamOverride],
    query_params: Vec<ParamDescriptor>,
) -> Option<RequestBody> {
    let fields = if !endpoint.body_params.is_empty() {
        if endpoint.body_schema_described {
            overrides.iter().map(ParamOverride::to_descriptor).collect()
        } else {
            merged(&endpoint.body_params, overrides)
        }
    } else if !endpoint.query_params.is_empty() {
        query_params
    } else {
        return None;
    };

    Some(RequestBody::json(build_schema(&SchemaInput::from(fields))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Controller, EndpointMethod, HandlerDocInfo, NativeType};
    use std::sync::Arc;

    fn controller() -> Arc<Controller> {
        Arc::new(Controller::new("Subsystem"))
    }

    #[test]
    fn test_methods_sorted_within_path() {
        let mut registry = EndpointRegistry::new();
        for method in [EndpointMethod::Delete, EndpointMethod::Post, EndpointMethod::Get] {
            registry.register("/subsystems", EndpointDescriptor::new(method, controller()));
        }

        let paths = build_paths(&registry, false);
        let item = &paths["/subsystems"];
        assert_eq!(item.len(), 3);
        assert!(item.put.is_none());

        let json = serde_json::to_string(item).unwrap();
        let get = json.find("\"get\"").unwrap();
        let post = json.find("\"post\"").unwrap();
        let delete = json.find("\"delete\"").unwrap();
        assert!(get < post && post < delete);
    }

    #[test]
    fn test_internal_endpoint_hides_whole_path() {
        let mut registry = EndpointRegistry::new();
        registry
            .register("/spdk", EndpointDescriptor::new(EndpointMethod::Get, controller()))
            .register(
                "/spdk",
                EndpointDescriptor::new(EndpointMethod::Post, controller()).internal_only(),
            );

        assert!(build_paths(&registry, false).is_empty());

        let all = build_paths(&registry, true);
        assert_eq!(all["/spdk"].len(), 2);
    }

    #[test]
    fn test_operation_fields() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Get, controller())
            .with_description("List subsystems")
            .path_param(ParamDescriptor::required("nqn"))
            .query_param(ParamDescriptor::optional("count"))
            .with_doc(
                HandlerDocInfo::new()
                    .summary("Get a subsystem")
                    .parameter(ParamOverride::new("nqn", NativeType::Str).with_description("NQN")),
            );

        let op = build_operation(&endpoint);
        assert_eq!(op.tags, vec!["Subsystem"]);
        assert_eq!(op.summary.as_deref(), Some("Get a subsystem"));
        assert_eq!(op.description.as_deref(), Some("List subsystems"));
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].location, ParameterIn::Path);
        assert_eq!(op.parameters[0].description.as_deref(), Some("NQN"));
        assert_eq!(op.parameters[1].location, ParameterIn::Query);
        assert!(op.request_body.is_none());
    }

    #[test]
    fn test_empty_summary_is_omitted() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Get, controller())
            .with_doc(HandlerDocInfo::new().summary(""));
        assert!(build_operation(&endpoint).summary.is_none());
    }

    #[test]
    fn test_body_params_win_over_query_params() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Post, controller())
            .query_param(ParamDescriptor::optional("force"))
            .body_param(ParamDescriptor::required("nqn"));

        let op = build_operation(&endpoint);
        let schema = op.request_body.unwrap().json_schema().cloned().unwrap();
        assert!(schema.properties.contains_key("nqn"));
        assert!(!schema.properties.contains_key("force"));
    }

    #[test]
    fn test_query_params_describe_body_without_body_params() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Put, controller())
            .query_param(ParamDescriptor::required("size"));

        let op = build_operation(&endpoint);
        let schema = op.request_body.unwrap().json_schema().cloned().unwrap();
        assert_eq!(schema.required, vec!["size"]);
    }

    #[test]
    fn test_described_body_uses_overrides() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Post, controller())
            .body_param(ParamDescriptor::required("payload"))
            .body_schema_described()
            .with_doc(HandlerDocInfo::new().parameter(
                ParamOverride::new("max_namespaces", NativeType::Int).mark_required(),
            ));

        let op = build_operation(&endpoint);
        let schema = op.request_body.unwrap().json_schema().cloned().unwrap();
        assert!(schema.properties.contains_key("max_namespaces"));
        assert!(!schema.properties.contains_key("payload"));
        assert_eq!(schema.required, vec!["max_namespaces"]);
    }

    #[test]
    fn test_nested_override_stays_in_body() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Post, controller())
            .body_param(ParamDescriptor::required("listeners"))
            .with_doc(HandlerDocInfo::new().parameter(
                ParamOverride::nested("traddr", NativeType::Str).mark_required(),
            ));

        let op = build_operation(&endpoint);
        assert!(op.parameters.is_empty());

        let schema = op.request_body.unwrap().json_schema().cloned().unwrap();
        assert!(schema.properties.contains_key("listeners"));
        assert!(schema.properties.contains_key("traddr"));
    }

    #[test]
    fn test_nested_override_alone_has_no_body() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Put, controller()).with_doc(
            HandlerDocInfo::new().parameter(ParamOverride::nested("traddr", NativeType::Str)),
        );

        let op = build_operation(&endpoint);
        assert!(op.parameters.is_empty());
        assert!(op.request_body.is_none());
    }

    #[test]
    fn test_registry_is_not_mutated() {
        let mut registry = EndpointRegistry::new();
        registry.register(
            "/namespaces",
            EndpointDescriptor::new(EndpointMethod::Get, controller())
                .query_param(ParamDescriptor::optional("nsid"))
                .with_doc(HandlerDocInfo::new().parameter(ParamOverride::new("nsid", NativeType::Int))),
        );

        let _ = build_paths(&registry, false);
        let endpoint = registry.endpoints().next().unwrap();
        assert!(endpoint.query_params[0].param_type.is_none());
    }

    #[test]
    fn test_delete_has_no_request_body() {
        let endpoint = EndpointDescriptor::new(EndpointMethod::Delete, controller())
            .body_param(ParamDescriptor::required("nqn"));
        assert!(build_operation(&endpoint).request_body.is_none());
    }
}
