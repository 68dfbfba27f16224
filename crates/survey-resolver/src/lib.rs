//! Remote choice lists for survey questions.
//!
//! - [`choices`]: [`ChoicesByUrl`], the `choicesByUrl` resolver
//! - [`cache`]: [`ChoicesCache`], the result cache shared by all resolvers
//! - [`extract`]: path navigation and record → item conversion
//! - [`metrics`]: hit/miss/request/failure counters

pub mod cache;
pub mod choices;
pub mod extract;
pub mod metrics;

pub use cache::ChoicesCache;
pub use choices::{
    register_choices_by_url, registered_property_copier, ChoicesByUrl, ChoicesReceiver,
    ItemCopier, ResolverConfig, RunOutcome, CHOICES_BY_URL_TYPE, ITEM_VALUE_TYPE,
};
pub use metrics::{CacheMetrics, MetricsSnapshot};
