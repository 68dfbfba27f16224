//! `choicesByUrl`: fill a choice list from a remote service.
//!
//! A resolver is configured with a URL template, an optional path into the
//! response, and optional value/title field names. [`ChoicesByUrl::run`]
//! resolves the templates, then either short-circuits (unresolved
//! placeholders, unchanged configuration, cached result) or issues exactly
//! one GET. Results go to the single consumer registered with
//! [`ChoicesByUrl::subscribe`].
//!
//! Failures never surface as `Err`: the consumer receives an empty list and
//! [`ChoicesByUrl::error`] tells "the server had no matches" apart from "the
//! fetch failed".
//!
//! Everything up to the request happens when `run` is called, before the
//! returned future is first polled, so short-circuits and cache hits are
//! delivered synchronously. Dropping the future abandons an outstanding
//! request; no result is delivered for it.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use survey_core::registry::{ClassDescriptor, ClassRegistry, SurveyObject};
use survey_core::SurveyError;
use survey_transport::http::DEFAULT_CONTENT_TYPE;
use survey_transport::{HttpRequest, HttpTransport};
use survey_types::env_utils::{env_bool_or, env_string_or};
use survey_types::{ChoiceItem, TextProcessor};

use crate::cache::ChoicesCache;
use crate::extract::{is_blank_record, lookup_field, navigate, path_segments, record_to_item};

/// Registered type name of the resolver.
pub const CHOICES_BY_URL_TYPE: &str = "choicesByUrl";

/// Type whose extra registered properties are copied onto produced items.
pub const ITEM_VALUE_TYPE: &str = "itemvalue";

/// Serializable fields of the descriptor, in order.
pub const CHOICES_BY_URL_PROPERTIES: [&str; 4] = ["url", "path", "valueName", "titleName"];

const FINGERPRINT_SEPARATOR: &str = "\u{1f}";

/// Copies extra attributes from a source record onto a produced item.
pub type ItemCopier = Arc<dyn Fn(&Value, &mut ChoiceItem) + Send + Sync>;

/// Receiving end of a resolver's results.
pub type ChoicesReceiver = mpsc::UnboundedReceiver<Vec<ChoiceItem>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Consult and fill the shared cache.
    pub use_cache: bool,
    /// `Content-Type` header sent with the GET.
    pub content_type: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

impl ResolverConfig {
    /// `SURVEY_CHOICES_USE_CACHE` and `SURVEY_CHOICES_CONTENT_TYPE`.
    pub fn from_env() -> Self {
        Self {
            use_cache: env_bool_or("SURVEY_CHOICES_USE_CACHE", true),
            content_type: env_string_or("SURVEY_CHOICES_CONTENT_TYPE", DEFAULT_CONTENT_TYPE),
        }
    }
}

/// What a call to [`ChoicesByUrl::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No URL or no consumer; nothing happened.
    Skipped,
    /// Placeholders were unresolved; an empty list was delivered.
    ShortCircuitEmpty,
    /// Same fingerprint as the previous run; nothing was delivered.
    Unchanged,
    /// Delivered from the cache without a request.
    CacheHit { items: usize },
    /// A request succeeded and its items were delivered.
    Fulfilled { items: usize },
    /// The request failed or produced no items; an empty list was delivered.
    Failed,
}

enum Prepared {
    Done(RunOutcome),
    Request { url: String, fingerprint: String },
}

pub struct ChoicesByUrl {
    url: String,
    path: String,
    value_name: String,
    title_name: String,
    processed_url: String,
    processed_path: String,
    last_fingerprint: Option<String>,
    error: Option<SurveyError>,
    config: ResolverConfig,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ChoicesCache>,
    registry: Option<Arc<ClassRegistry>>,
    copiers: Vec<ItemCopier>,
    consumer: Option<mpsc::UnboundedSender<Vec<ChoiceItem>>>,
}

impl ChoicesByUrl {
    pub fn new(transport: Arc<dyn HttpTransport>, cache: Arc<ChoicesCache>) -> Self {
        Self {
            url: String::new(),
            path: String::new(),
            value_name: String::new(),
            title_name: String::new(),
            processed_url: String::new(),
            processed_path: String::new(),
            last_fingerprint: None,
            error: None,
            config: ResolverConfig::default(),
            transport,
            cache,
            registry: None,
            copiers: Vec::new(),
            consumer: None,
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Copy custom `itemvalue` properties registered in `registry` onto items.
    pub fn with_registry(mut self, registry: Arc<ClassRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_copier(mut self, copier: ItemCopier) -> Self {
        self.copiers.push(copier);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = value_name.into();
        self
    }

    pub fn with_title_name(mut self, title_name: impl Into<String>) -> Self {
        self.title_name = title_name.into();
        self
    }

    /// Register the consumer of results, replacing any previous one.
    pub fn subscribe(&mut self) -> ChoicesReceiver {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.consumer = Some(sender);
        receiver
    }

    pub fn unsubscribe(&mut self) {
        self.consumer = None;
    }

    pub fn has_consumer(&self) -> bool {
        self.consumer.as_ref().is_some_and(|c| !c.is_closed())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn set_value_name(&mut self, value_name: impl Into<String>) {
        self.value_name = value_name.into();
    }

    pub fn title_name(&self) -> &str {
        &self.title_name
    }

    pub fn set_title_name(&mut self, title_name: impl Into<String>) {
        self.title_name = title_name.into();
    }

    pub fn processed_url(&self) -> &str {
        &self.processed_url
    }

    pub fn processed_path(&self) -> &str {
        &self.processed_path
    }

    /// Error of the last completed request, if it failed or came back empty.
    pub fn error(&self) -> Option<&SurveyError> {
        self.error.as_ref()
    }

    pub fn type_name(&self) -> &'static str {
        CHOICES_BY_URL_TYPE
    }

    /// No field is configured.
    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
            && self.path.is_empty()
            && self.value_name.is_empty()
            && self.title_name.is_empty()
    }

    /// Reset the four descriptor fields.
    pub fn clear(&mut self) {
        self.url.clear();
        self.path.clear();
        self.value_name.clear();
        self.title_name.clear();
    }

    /// Replace the descriptor from a JSON object. Missing or empty fields are cleared.
    pub fn set_data(&mut self, json: &Value) {
        self.clear();
        let field = |name: &str| {
            json.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        self.url = field("url");
        self.path = field("path");
        self.value_name = field("valueName");
        self.title_name = field("titleName");
    }

    /// The non-empty descriptor fields as JSON.
    pub fn get_data(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in CHOICES_BY_URL_PROPERTIES.iter().zip(self.fields()) {
            if !value.is_empty() {
                map.insert(name.to_string(), Value::String(value.to_string()));
            }
        }
        Value::Object(map)
    }

    fn fields(&self) -> [&str; 4] {
        [
            self.url.as_str(),
            self.path.as_str(),
            self.value_name.as_str(),
            self.title_name.as_str(),
        ]
    }

    /// Cache and deduplication key of the current processed configuration.
    pub fn fingerprint(&self) -> String {
        [
            self.processed_url.as_str(),
            self.processed_path.as_str(),
            self.value_name.as_str(),
            self.title_name.as_str(),
        ]
        .join(FINGERPRINT_SEPARATOR)
    }

    /// Resolve the templates and deliver a choice list to the consumer.
    ///
    /// All decisions short of the request are made before this returns; the
    /// future only does the request itself. See the module docs.
    pub fn run<'a>(
        &'a mut self,
        text_processor: Option<&dyn TextProcessor>,
    ) -> impl Future<Output = RunOutcome> + Send + 'a {
        let prepared = self.prepare(text_processor);
        async move {
            match prepared {
                Prepared::Done(outcome) => outcome,
                Prepared::Request { url, fingerprint } => {
                    self.send_request(url, fingerprint).await
                }
            }
        }
    }

    fn prepare(&mut self, text_processor: Option<&dyn TextProcessor>) -> Prepared {
        if self.url.is_empty() || !self.has_consumer() {
            return Prepared::Done(RunOutcome::Skipped);
        }

        self.process_text(text_processor);
        if self.processed_url.is_empty() {
            debug!(url = %self.url, "unresolved placeholders in choices url");
            self.deliver(Vec::new());
            return Prepared::Done(RunOutcome::ShortCircuitEmpty);
        }

        let fingerprint = self.fingerprint();
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Prepared::Done(RunOutcome::Unchanged);
        }
        self.last_fingerprint = Some(fingerprint.clone());

        if self.config.use_cache {
            if let Some(items) = self.cache.get(&fingerprint) {
                debug!(url = %self.processed_url, items = items.len(), "choices cache hit");
                let count = items.len();
                self.deliver(items);
                return Prepared::Done(RunOutcome::CacheHit { items: count });
            }
        }

        self.error = None;
        Prepared::Request {
            url: self.processed_url.clone(),
            fingerprint,
        }
    }

    fn process_text(&mut self, text_processor: Option<&dyn TextProcessor>) {
        let Some(processor) = text_processor else {
            self.processed_url = self.url.clone();
            self.processed_path = self.path.clone();
            return;
        };
        let url = processor.process_text_ex(&self.url);
        let path = processor.process_text_ex(&self.path);
        if url.has_all_values && path.has_all_values {
            self.processed_url = url.text;
            self.processed_path = path.text;
        } else {
            self.processed_url.clear();
            self.processed_path.clear();
        }
    }

    async fn send_request(&mut self, url: String, fingerprint: String) -> RunOutcome {
        info!(url = %url, "requesting choices");
        self.cache.metrics().record_request();
        let request = HttpRequest::get(url).with_header("Content-Type", &self.config.content_type);

        match self.transport.get(request).await {
            Ok(response) if response.is_ok() => {
                match serde_json::from_str::<Value>(&response.body) {
                    Ok(body) => self.on_load(&body, &fingerprint),
                    Err(e) => {
                        warn!(error = %e, "choices response is not JSON");
                        self.fail(SurveyError::web_request_empty())
                    }
                }
            }
            Ok(response) => {
                warn!(status = response.status, "choices request failed");
                self.fail(SurveyError::web_request(response.status_line(), response.body))
            }
            Err(e) => {
                warn!(error = %e, "choices request failed");
                self.fail(SurveyError::web_request(e.to_string(), ""))
            }
        }
    }

    fn on_load(&mut self, body: &Value, fingerprint: &str) -> RunOutcome {
        let segments = path_segments(&self.path, &self.processed_path);
        let records = navigate(body, &segments)
            .and_then(Value::as_array)
            .filter(|records| !records.is_empty());

        let items = match records {
            Some(records) => {
                let copiers = self.item_copiers();
                records
                    .iter()
                    .filter(|record| !is_blank_record(record))
                    .map(|record| {
                        let mut item = record_to_item(record, &self.value_name, &self.title_name);
                        for copier in &copiers {
                            copier(record, &mut item);
                        }
                        item
                    })
                    .collect()
            }
            None => {
                debug!(path = %self.processed_path, "no choice records in response");
                self.error = Some(SurveyError::web_request_empty());
                self.cache.metrics().record_failure();
                Vec::new()
            }
        };

        let count = items.len();
        if self.config.use_cache {
            self.cache.put(fingerprint, items.clone());
        }
        self.deliver(items);
        if self.error.is_some() {
            RunOutcome::Failed
        } else {
            RunOutcome::Fulfilled { items: count }
        }
    }

    fn fail(&mut self, error: SurveyError) -> RunOutcome {
        self.cache.metrics().record_failure();
        self.error = Some(error);
        self.deliver(Vec::new());
        RunOutcome::Failed
    }

    /// Explicit copiers plus one for the extra registered `itemvalue` properties.
    fn item_copiers(&self) -> Vec<ItemCopier> {
        let mut copiers = self.copiers.clone();
        if let Some(registry) = &self.registry {
            if let Some(copier) = registered_property_copier(registry) {
                copiers.push(copier);
            }
        }
        copiers
    }

    fn deliver(&mut self, items: Vec<ChoiceItem>) {
        let Some(consumer) = &self.consumer else {
            return;
        };
        if consumer.send(items).is_err() {
            debug!("choices consumer went away");
            self.consumer = None;
        }
    }
}

/// Copier for the `itemvalue` properties beyond `value` and `text`.
///
/// `None` while the type has not been extended.
pub fn registered_property_copier(registry: &ClassRegistry) -> Option<ItemCopier> {
    let properties = registry.get_properties(ITEM_VALUE_TYPE);
    if properties.len() <= 2 {
        return None;
    }
    let names: Vec<String> = properties
        .into_iter()
        .map(|p| p.name)
        .filter(|name| name != "value" && name != "text")
        .collect();
    Some(Arc::new(move |record: &Value, item: &mut ChoiceItem| {
        for name in &names {
            if let Some(value) = lookup_field(record, name) {
                item.set_custom_attribute(name.clone(), value.clone());
            }
        }
    }))
}

impl fmt::Debug for ChoicesByUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoicesByUrl")
            .field("url", &self.url)
            .field("path", &self.path)
            .field("value_name", &self.value_name)
            .field("title_name", &self.title_name)
            .field("processed_url", &self.processed_url)
            .field("error", &self.error)
            .field("has_consumer", &self.has_consumer())
            .finish()
    }
}

impl SurveyObject for ChoicesByUrl {
    fn type_name(&self) -> &str {
        CHOICES_BY_URL_TYPE
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        let value = match name {
            "url" => &self.url,
            "path" => &self.path,
            "valueName" => &self.value_name,
            "titleName" => &self.title_name,
            _ => return None,
        };
        (!value.is_empty()).then(|| Value::String(value.clone()))
    }

    fn set_property(&mut self, name: &str, value: &Value) -> bool {
        let Some(text) = value.as_str() else {
            return false;
        };
        match name {
            "url" => self.set_url(text),
            "path" => self.set_path(text),
            "valueName" => self.set_value_name(text),
            "titleName" => self.set_title_name(text),
            _ => return false,
        }
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Register `choicesByUrl` with a factory bound to `transport` and `cache`.
///
/// Created resolvers copy the registry's custom `itemvalue` properties. The
/// factory holds the registry weakly.
pub fn register_choices_by_url(
    registry: &Arc<ClassRegistry>,
    transport: Arc<dyn HttpTransport>,
    cache: Arc<ChoicesCache>,
) {
    let weak: Weak<ClassRegistry> = Arc::downgrade(registry);
    registry.register(
        ClassDescriptor::new(CHOICES_BY_URL_TYPE)
            .with_properties(CHOICES_BY_URL_PROPERTIES)
            .with_factory(move || {
                let mut resolver = ChoicesByUrl::new(transport.clone(), cache.clone())
                    .with_config(ResolverConfig::from_env());
                if let Some(registry) = weak.upgrade() {
                    resolver = resolver.with_registry(registry);
                }
                Box::new(resolver)
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use survey_core::ErrorKind;
    use survey_transport::{HttpResponse, MockTransport};
    use survey_types::TemplateTextProcessor;

    const URL: &str = "http://test/choices";

    fn resolver(transport: &Arc<MockTransport>, cache: &Arc<ChoicesCache>) -> ChoicesByUrl {
        ChoicesByUrl::new(transport.clone(), cache.clone()).with_url(URL)
    }

    #[tokio::test]
    async fn test_no_consumer_is_a_no_op() {
        let transport = Arc::new(MockTransport::new().with_json(URL, "[1]"));
        let mut choices = resolver(&transport, &Arc::new(ChoicesCache::new()));

        assert_eq!(choices.run(None).await, RunOutcome::Skipped);
        assert_eq!(transport.request_count(), 0);

        let mut empty = ChoicesByUrl::new(transport.clone(), Arc::new(ChoicesCache::new()));
        let _rx = empty.subscribe();
        assert_eq!(empty.run(None).await, RunOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_fetch_sends_content_type() {
        let transport = Arc::new(MockTransport::new().with_json(URL, r#"[{"value":1,"title":"A"}]"#));
        let mut choices = resolver(&transport, &Arc::new(ChoicesCache::new()));
        let mut rx = choices.subscribe();

        assert_eq!(choices.run(None).await, RunOutcome::Fulfilled { items: 1 });
        let items = rx.try_recv().expect("items delivered");
        assert_eq!(items[0].text.as_deref(), Some("A"));
        assert_eq!(
            transport.requests()[0].header("Content-Type"),
            Some(DEFAULT_CONTENT_TYPE)
        );
    }

    #[tokio::test]
    async fn test_unresolved_placeholders_short_circuit() {
        let transport = Arc::new(MockTransport::new());
        let mut choices = ChoicesByUrl::new(transport.clone(), Arc::new(ChoicesCache::new()))
            .with_url("http://test/cities?country={country}");
        let mut rx = choices.subscribe();

        let processor = TemplateTextProcessor::new();
        assert_eq!(
            choices.run(Some(&processor)).await,
            RunOutcome::ShortCircuitEmpty
        );
        assert_eq!(rx.try_recv().ok(), Some(Vec::new()));
        assert_eq!(choices.processed_url(), "");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_short_circuit_is_delivered_before_polling() {
        let transport = Arc::new(MockTransport::new());
        let mut choices = ChoicesByUrl::new(transport, Arc::new(ChoicesCache::new()))
            .with_url("http://test/{missing}");
        let mut rx = choices.subscribe();

        let processor = TemplateTextProcessor::new();
        let pending = choices.run(Some(&processor));
        assert!(rx.try_recv().is_ok());
        assert_eq!(pending.await, RunOutcome::ShortCircuitEmpty);
    }

    #[tokio::test]
    async fn test_non_success_status_sets_web_request_error() {
        let transport =
            Arc::new(MockTransport::new().with_response(URL, HttpResponse::new(500, "boom")));
        let mut choices = resolver(&transport, &Arc::new(ChoicesCache::new()));
        let mut rx = choices.subscribe();

        assert_eq!(choices.run(None).await, RunOutcome::Failed);
        assert_eq!(rx.try_recv().ok(), Some(Vec::new()));
        assert_eq!(
            choices.error().map(|e| e.kind().clone()),
            Some(ErrorKind::WebRequest {
                status: "500 Internal Server Error".to_string(),
                response: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_transport_error_and_bad_json() {
        let cache = Arc::new(ChoicesCache::new());
        let transport = Arc::new(
            MockTransport::new()
                .with_failure(URL, "connection refused")
                .with_json("http://test/garbage", "<html>"),
        );

        let mut failing = resolver(&transport, &cache);
        let _rx = failing.subscribe();
        assert_eq!(failing.run(None).await, RunOutcome::Failed);
        assert_eq!(failing.error().map(|e| e.error_type()), Some("webrequest"));

        let mut garbage = ChoicesByUrl::new(transport.clone(), cache.clone())
            .with_url("http://test/garbage");
        let _rx = garbage.subscribe();
        assert_eq!(garbage.run(None).await, RunOutcome::Failed);
        assert_eq!(garbage.error().map(|e| e.error_type()), Some("webrequestempty"));
        assert!(cache.is_empty());
        assert_eq!(cache.metrics().snapshot().failures, 2);
    }

    #[tokio::test]
    async fn test_registered_custom_properties_are_copied() {
        let registry = Arc::new(ClassRegistry::with_builtins());
        registry.add_property(ITEM_VALUE_TYPE, "price");
        registry.add_property(ITEM_VALUE_TYPE, "meta.code");

        let transport = Arc::new(MockTransport::new().with_json(
            URL,
            r#"[{"value":"a","price":3,"meta":{"code":"X"}},{"value":"b","price":null}]"#,
        ));
        let mut choices =
            resolver(&transport, &Arc::new(ChoicesCache::new())).with_registry(registry);
        let mut rx = choices.subscribe();
        choices.run(None).await;

        let items = rx.try_recv().expect("items delivered");
        assert_eq!(items[0].custom_attribute("price"), Some(&json!(3)));
        assert_eq!(items[0].custom_attribute("meta.code"), Some(&json!("X")));
        assert_eq!(items[1].custom_attribute("price"), None);
    }

    #[tokio::test]
    async fn test_explicit_copier() {
        let transport = Arc::new(MockTransport::new().with_json(URL, r#"[{"id":1,"icon":"i"}]"#));
        let copier: ItemCopier = Arc::new(|record: &Value, item: &mut ChoiceItem| {
            if let Some(icon) = record.get("icon") {
                item.set_custom_attribute("imageLink", icon.clone());
            }
        });
        let mut choices = resolver(&transport, &Arc::new(ChoicesCache::new())).with_copier(copier);
        let mut rx = choices.subscribe();
        choices.run(None).await;

        let items = rx.try_recv().expect("items delivered");
        assert_eq!(items[0].value, json!(1));
        assert_eq!(items[0].custom_attribute("imageLink"), Some(&json!("i")));
    }

    #[test]
    fn test_descriptor_data() {
        let transport: Arc<dyn HttpTransport> = Arc::new(MockTransport::new());
        let mut choices = ChoicesByUrl::new(transport, Arc::new(ChoicesCache::new()));
        assert!(choices.is_empty());

        choices.set_data(&json!({"url": "http://x", "valueName": "id", "extra": 1}));
        assert!(!choices.is_empty());
        assert_eq!(choices.get_data(), json!({"url": "http://x", "valueName": "id"}));

        choices.set_data(&json!({"path": "data"}));
        assert_eq!(choices.url(), "");
        assert_eq!(choices.path(), "data");

        choices.clear();
        assert!(choices.is_empty());
        assert_eq!(choices.type_name(), CHOICES_BY_URL_TYPE);
    }

    #[test]
    fn test_registration_creates_bound_resolver() {
        let registry = Arc::new(ClassRegistry::with_builtins());
        let transport: Arc<dyn HttpTransport> = Arc::new(MockTransport::new());
        register_choices_by_url(&registry, transport, Arc::new(ChoicesCache::new()));

        let names: Vec<String> = registry
            .get_properties(CHOICES_BY_URL_TYPE)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, CHOICES_BY_URL_PROPERTIES);

        let (object, report) = registry
            .object_from_json(&json!({"type": "choicesByUrl", "url": "http://x", "path": "a;b"}))
            .expect("choicesByUrl is registered");
        assert!(report.is_clean());
        let choices = object
            .downcast_ref::<ChoicesByUrl>()
            .expect("factory builds a resolver");
        assert_eq!(choices.path(), "a;b");
        assert!(choices.registry.is_some());
    }
}
