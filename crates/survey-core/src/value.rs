//! Typed property keys and values for survey elements.

use std::fmt;

use serde_json::Value;

use crate::element::{ElementId, ElementState};
use crate::error::SurveyError;

/// Keys of the reactive properties an element stores in its bag.
///
/// Properties contributed by registry extensions use [`PropertyKey::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name,
    State,
    ReadOnly,
    IsReadOnly,
    Errors,
    HasVisibleErrors,
    ContainsErrors,
    Parent,
    Custom(String),
}

impl PropertyKey {
    /// Serialized (JSON) name of the property.
    pub fn as_str(&self) -> &str {
        match self {
            PropertyKey::Name => "name",
            PropertyKey::State => "state",
            PropertyKey::ReadOnly => "readOnly",
            PropertyKey::IsReadOnly => "isReadOnly",
            PropertyKey::Errors => "errors",
            PropertyKey::HasVisibleErrors => "hasVisibleErrors",
            PropertyKey::ContainsErrors => "containsErrors",
            PropertyKey::Parent => "parent",
            PropertyKey::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "name" => PropertyKey::Name,
            "state" => PropertyKey::State,
            "readOnly" => PropertyKey::ReadOnly,
            "isReadOnly" => PropertyKey::IsReadOnly,
            "errors" => PropertyKey::Errors,
            "hasVisibleErrors" => PropertyKey::HasVisibleErrors,
            "containsErrors" => PropertyKey::ContainsErrors,
            "parent" => PropertyKey::Parent,
            other => PropertyKey::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values stored in an element's property bag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Text(String),
    State(ElementState),
    Element(ElementId),
    Errors(Vec<SurveyError>),
    Json(Value),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            PropertyValue::Json(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            PropertyValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_state(&self) -> Option<ElementState> {
        match self {
            PropertyValue::State(state) => Some(*state),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<ElementId> {
        match self {
            PropertyValue::Element(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_errors(&self) -> Option<&[SurveyError]> {
        match self {
            PropertyValue::Errors(errors) => Some(errors),
            _ => None,
        }
    }

    /// JSON form of the value. Error lists serialize as their kind strings.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Null => Value::Null,
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Text(s) => Value::String(s.clone()),
            PropertyValue::State(state) => Value::String(state.as_str().to_string()),
            PropertyValue::Element(id) => Value::String(id.to_string()),
            PropertyValue::Errors(errors) => Value::Array(
                errors
                    .iter()
                    .map(|e| Value::String(e.error_type().to_string()))
                    .collect(),
            ),
            PropertyValue::Json(value) => value.clone(),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<ElementState> for PropertyValue {
    fn from(value: ElementState) -> Self {
        PropertyValue::State(value)
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        PropertyValue::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_names_round_trip() {
        for key in [
            PropertyKey::Name,
            PropertyKey::State,
            PropertyKey::ReadOnly,
            PropertyKey::IsReadOnly,
            PropertyKey::Errors,
            PropertyKey::HasVisibleErrors,
            PropertyKey::ContainsErrors,
            PropertyKey::Parent,
        ] {
            assert_eq!(PropertyKey::from_name(key.as_str()), key);
        }
        assert_eq!(
            PropertyKey::from_name("title"),
            PropertyKey::Custom("title".to_string())
        );
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(json!(false)).as_bool(), Some(false));
        assert_eq!(PropertyValue::from("q1").as_str(), Some("q1"));
        assert_eq!(PropertyValue::Null.as_str(), None);
        assert_eq!(
            PropertyValue::from(ElementState::Collapsed).to_json(),
            json!("collapsed")
        );
    }
}
