//! Tag list assembly.

use std::collections::BTreeMap;

use crate::openapi::Tag;
use crate::registry::{EndpointDescriptor, EndpointRegistry};

/// Description given to tags nobody described.
pub const NO_DESCRIPTION_AVAILABLE: &str = "*No description available*";

/// Build the sorted tag list from the controllers owning visible endpoints.
///
/// When several controllers share a tag name, the first non-empty
/// description wins regardless of the order they are visited in.
#[must_use]
pub fn build_tags(registry: &EndpointRegistry, include_internal: bool) -> Vec<Tag> {
    let mut tags: BTreeMap<&str, &str> = BTreeMap::new();
    for controller in registry
        .endpoints()
        .filter(|endpoint| endpoint.is_visible(include_internal))
        .map(|endpoint| endpoint.controller.as_ref())
    {
        let description = tags.entry(controller.tag_name()).or_default();
        if description.is_empty() {
            *description = controller.tag_description();
        }
    }

    tags.into_iter()
        .map(|(name, description)| Tag {
            name: name.to_string(),
            description: if description.is_empty() {
                NO_DESCRIPTION_AVAILABLE.to_string()
            } else {
                description.to_string()
            },
        })
        .collect()
}

/// Tag an endpoint is listed under: the handler's tag, else the
/// controller's, else the controller name. Empty tags are skipped.
#[must_use]
pub fn resolve_tag(endpoint: &EndpointDescriptor) -> String {
    endpoint
        .handler_doc
        .as_ref()
        .and_then(|doc| doc.tag.as_deref())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| endpoint.controller.tag_name())
        .to_string()
}
