//! Default responses per HTTP method.

use indexmap::IndexMap;

use crate::openapi::{Response, Schema};
use crate::registry::{EndpointMethod, SchemaInput};
use crate::schema::build_schema;

const BAD_REQUEST: &str = "Operation exception. Please check the response body for details.";
const INTERNAL_ERROR: &str = "Unexpected error. Please check the response body for the stack trace.";
const ACCEPTED: &str = "Operation is still executing. Please check the task queue.";

/// Build the responses of an operation.
///
/// Every operation gets 400 and 500. Success codes depend on the method.
/// An override replaces the body schema of a code that is already present;
/// overrides for other codes are ignored.
#[must_use]
pub fn build_responses(
    method: EndpointMethod,
    overrides: Option<&IndexMap<String, SchemaInput>>,
) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();
    responses.insert("400".to_string(), Response::new(BAD_REQUEST));
    responses.insert("500".to_string(), Response::new(INTERNAL_ERROR));

    let generic = |description: &str| Response::new(description).with_json(Schema::object());
    match method {
        EndpointMethod::Get => {
            responses.insert("200".to_string(), generic("OK"));
        }
        EndpointMethod::Post => {
            responses.insert("201".to_string(), generic("Resource created."));
        }
        EndpointMethod::Put => {
            responses.insert("200".to_string(), generic("Resource updated."));
        }
        EndpointMethod::Delete => {
            responses.insert("204".to_string(), generic("Resource deleted."));
        }
    }
    if method != EndpointMethod::Get {
        responses.insert("202".to_string(), generic(ACCEPTED));
    }

    for (status, body) in overrides.into_iter().flatten() {
        if let Some(response) = responses.get_mut(status) {
            *response = Response::new(response.description.clone()).with_json(build_schema(body));
        }
    }

    responses.sort_keys();
    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::SchemaType;
    use crate::registry::ParamDescriptor;

    fn codes(responses: &IndexMap<String, Response>) -> Vec<&str> {
        responses.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_get_codes() {
        let responses = build_responses(EndpointMethod::Get, None);
        assert_eq!(codes(&responses), vec!["200", "400", "500"]);
        assert_eq!(responses["200"].description, "OK");
        assert_eq!(responses["200"].json_schema(), Some(&Schema::object()));
        assert!(responses["400"].content.is_empty());
    }

    #[test]
    fn test_delete_codes() {
        let responses = build_responses(EndpointMethod::Delete, None);
        assert_eq!(codes(&responses), vec!["202", "204", "400", "500"]);
        assert_eq!(responses["204"].description, "Resource deleted.");
    }

    #[test]
    fn test_post_and_put_codes() {
        let post = build_responses(EndpointMethod::Post, None);
        assert_eq!(codes(&post), vec!["201", "202", "400", "500"]);
        assert_eq!(post["201"].description, "Resource created.");

        let put = build_responses(EndpointMethod::Put, None);
        assert_eq!(codes(&put), vec!["200", "202", "400", "500"]);
        assert_eq!(put["200"].description, "Resource updated.");
        assert_eq!(put["202"].description, ACCEPTED);
    }

    #[test]
    fn test_override_existing_code() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "200".to_string(),
            SchemaInput::array(vec![ParamDescriptor::required("nqn")]),
        );

        let responses = build_responses(EndpointMethod::Get, Some(&overrides));
        let schema = responses["200"].json_schema().unwrap();
        assert_eq!(responses["200"].description, "OK");
        assert_eq!(schema.schema_type, Some(SchemaType::Array));
        assert!(schema.items.as_ref().unwrap().properties.contains_key("nqn"));
    }

    #[test]
    fn test_override_absent_code_is_ignored() {
        let mut overrides = IndexMap::new();
        overrides.insert("201".to_string(), SchemaInput::from(vec![]));

        let responses = build_responses(EndpointMethod::Get, Some(&overrides));
        assert_eq!(codes(&responses), vec!["200", "400", "500"]);
    }

    #[test]
    fn test_override_error_code_gains_body() {
        let mut overrides = IndexMap::new();
        overrides.insert(
            "400".to_string(),
            SchemaInput::from(vec![ParamDescriptor::required("detail")]),
        );

        let responses = build_responses(EndpointMethod::Delete, Some(&overrides));
        assert_eq!(responses["400"].description, BAD_REQUEST);
        assert!(responses["400"].json_schema().is_some());
    }
}
