//! Resolver and registry setup over a scripted transport.

use std::sync::Arc;

use survey_runtime::default_registry;
use survey_runtime::model::ClassRegistry;
use survey_runtime::resolver::{ChoicesByUrl, ChoicesCache};
use survey_runtime::transport::{HttpTransport, MockTransport};

/// A fresh cache, a scripted transport and a registry bound to both.
#[allow(dead_code)]
pub struct TestEnv {
    pub transport: Arc<MockTransport>,
    pub cache: Arc<ChoicesCache>,
    pub registry: Arc<ClassRegistry>,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new(transport: MockTransport) -> Self {
        let transport = Arc::new(transport);
        let cache = Arc::new(ChoicesCache::new());
        let dyn_transport: Arc<dyn HttpTransport> = transport.clone();
        let registry = default_registry(dyn_transport, cache.clone());
        Self {
            transport,
            cache,
            registry,
        }
    }

    /// A resolver for `url` sharing this environment's transport and cache.
    pub fn resolver(&self, url: &str) -> ChoicesByUrl {
        resolver_for(&self.transport, &self.cache, url).with_registry(self.registry.clone())
    }
}

#[allow(dead_code)]
pub fn resolver_for(
    transport: &Arc<MockTransport>,
    cache: &Arc<ChoicesCache>,
    url: &str,
) -> ChoicesByUrl {
    ChoicesByUrl::new(transport.clone(), cache.clone()).with_url(url)
}
