//! Choice items produced by remote choice lists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A selectable option: a value, an optional display title and any custom
/// attributes copied from the source record.
///
/// Serializes in the `itemvalue` shape (`{"value": .., "text": .., ..custom}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub value: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Extra registered `itemvalue` properties, in registration order.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl ChoiceItem {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            text: None,
            custom: Map::new(),
        }
    }

    /// Build an item from a value and a raw title taken from a JSON record.
    ///
    /// String titles are kept as-is, `null` means "no title", anything else is
    /// rendered as its JSON text.
    pub fn from_parts(value: Value, title: Option<&Value>) -> Self {
        let text = match title {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self {
            value,
            text,
            custom: Map::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The text shown to the respondent: the title if present, else the value.
    pub fn display_text(&self) -> String {
        match (&self.text, &self.value) {
            (Some(text), _) => text.clone(),
            (None, Value::String(s)) => s.clone(),
            (None, Value::Null) => String::new(),
            (None, other) => other.to_string(),
        }
    }

    pub fn custom_attribute(&self, name: &str) -> Option<&Value> {
        self.custom.get(name)
    }

    pub fn set_custom_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.custom.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_text_falls_back_to_value() {
        assert_eq!(ChoiceItem::new("red").display_text(), "red");
        assert_eq!(ChoiceItem::new(7).display_text(), "7");
        assert_eq!(ChoiceItem::new(7).with_text("Seven").display_text(), "Seven");
    }

    #[test]
    fn test_from_parts_title_conversion() {
        let item = ChoiceItem::from_parts(json!(1), Some(&json!(2.5)));
        assert_eq!(item.text.as_deref(), Some("2.5"));

        let item = ChoiceItem::from_parts(json!(1), Some(&Value::Null));
        assert_eq!(item.text, None);
    }

    #[test]
    fn test_serialized_shape_flattens_custom_attributes() {
        let mut item = ChoiceItem::new("ca").with_text("Canada");
        item.set_custom_attribute("flag", json!("🇨🇦"));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"value": "ca", "text": "Canada", "flag": "🇨🇦"}));
    }
}
