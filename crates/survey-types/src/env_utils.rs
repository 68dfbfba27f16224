//! Environment variable parsing utilities.
//!
//! Runtime knobs (cache usage, request content type, locale) are read from the
//! environment through these helpers instead of repeating
//!
//! ```ignore
//! std::env::var("VAR_NAME")
//!     .ok()
//!     .and_then(|v| v.parse::<u64>().ok())
//!     .unwrap_or(default_value)
//! ```
//!
//! # Example
//!
//! ```
//! use survey_types::env_utils::{env_bool_or, env_string_or};
//!
//! let use_cache = env_bool_or("SURVEY_CHOICES_USE_CACHE", true);
//! let locale = env_string_or("SURVEY_LOCALE", "en");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
///
/// ```
/// use survey_types::env_utils::env_var_or;
///
/// let max_items: usize = env_var_or("SURVEY_MAX_ITEMS_UNSET", 100);
/// assert_eq!(max_items, 100);
/// ```
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Check if an environment variable is set to "1", "true", "yes", or "on"
/// (case-insensitive), with a default used when the variable is absent.
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => is_truthy(&v),
        None => default,
    }
}

/// Get an environment variable as a string with a default value.
pub fn env_string_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
