//! Survey runtime
//!
//! Runtime backbone for JSON-described surveys:
//!
//! - **Reactive properties**: per-element keyed storage with change callbacks ([`model::property`])
//! - **Class registry**: JSON → typed objects and back ([`model::registry`])
//! - **Errors**: typed validation errors with localized messages ([`model::error`])
//! - **Elements**: questions, panels and pages ([`model::element`])
//! - **Remote choices**: `choicesByUrl` with a shared result cache ([`resolver`])
//!
//! [`default_registry`] wires the built-in types together.

pub mod args;

use std::sync::Arc;

pub use survey_core as model;
pub use survey_resolver as resolver;
pub use survey_transport as transport;
pub use survey_types as types;

use survey_core::{register_elements, ClassRegistry};
use survey_resolver::{register_choices_by_url, ChoicesCache};
use survey_transport::HttpTransport;

/// Registry holding `itemvalue`, the element types and `choicesByUrl`.
///
/// Resolvers created through the registry share `transport` and `cache`.
pub fn default_registry(
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ChoicesCache>,
) -> Arc<ClassRegistry> {
    let registry = Arc::new(ClassRegistry::with_builtins());
    register_elements(&registry);
    register_choices_by_url(&registry, transport, cache);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_transport::MockTransport;

    #[test]
    fn test_default_registry_types() {
        let registry = default_registry(
            Arc::new(MockTransport::new()),
            Arc::new(ChoicesCache::new()),
        );
        for name in ["itemvalue", "question", "panel", "page", "choicesByUrl"] {
            assert!(registry.contains(name), "{name} should be registered");
        }
        assert!(registry.create("question").is_some());
        assert!(registry.create("surveyelement").is_none());
    }
}
