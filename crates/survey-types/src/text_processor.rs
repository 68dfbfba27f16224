//! Placeholder substitution for templated strings such as choice URLs.
//!
//! A template like `https://api.example.com/cities?country={country}` is resolved
//! against the current answers. The processor reports whether every placeholder
//! found a value so callers can hold off on requests with half-built URLs.

use std::collections::HashMap;

use serde_json::Value;

/// Result of processing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProcessorResult {
    pub text: String,
    /// `false` if at least one placeholder could not be resolved.
    pub has_all_values: bool,
}

impl TextProcessorResult {
    pub fn resolved(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            has_all_values: true,
        }
    }
}

/// Substitutes placeholders in a template.
pub trait TextProcessor {
    fn process_text_ex(&self, text: &str) -> TextProcessorResult;
}

/// `{name}` substitution against a variable map.
///
/// Names are matched case-insensitively; dotted names (`{address.city}`) walk
/// into object values.
#[derive(Debug, Default, Clone)]
pub struct TemplateTextProcessor {
    values: HashMap<String, Value>,
}

impl TemplateTextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_value(name, value);
        self
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<Value>) {
        self.values.insert(name.to_lowercase(), value.into());
    }

    pub fn remove_value(&mut self, name: &str) {
        self.values.remove(&name.to_lowercase());
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let name = name.trim().to_lowercase();
        let value = match self.values.get(&name) {
            Some(value) => value,
            None => {
                let mut parts = name.split('.');
                let mut current = self.values.get(parts.next()?)?;
                for part in parts {
                    current = current.get(part)?;
                }
                current
            }
        };
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl TextProcessor for TemplateTextProcessor {
    fn process_text_ex(&self, text: &str) -> TextProcessorResult {
        let mut out = String::with_capacity(text.len());
        let mut has_all_values = true;
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                out.push_str(&rest[open..]);
                rest = "";
                break;
            };
            let name = &after[..close];
            match self.lookup(name) {
                Some(value) => out.push_str(&value),
                None => {
                    has_all_values = false;
                    out.push_str(&rest[open..open + close + 2]);
                }
            }
            rest = &after[close + 1..];
        }
        out.push_str(rest);

        TextProcessorResult {
            text: out,
            has_all_values,
        }
    }
}
