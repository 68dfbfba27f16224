//! Custom assertion utilities for tests.

use serde_json::Value;
use survey_runtime::types::ChoiceItem;

/// Assert that a result is Ok and return the inner value.
#[allow(dead_code)]
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{} failed: {:?}", context, e),
    }
}

/// Assert that an error message contains expected text (case-insensitive).
#[allow(dead_code)]
pub fn assert_error_contains<E: std::fmt::Display>(error: E, expected_text: &str, context: &str) {
    let error_str = error.to_string().to_lowercase();
    let expected_lower = expected_text.to_lowercase();

    assert!(
        error_str.contains(&expected_lower),
        "{}: error message should contain '{}', got: {}",
        context,
        expected_text,
        error
    );
}

/// Assert that items match `(value, title)` pairs in order.
#[allow(dead_code)]
pub fn assert_items(items: &[ChoiceItem], expected: &[(Value, Option<&str>)], context: &str) {
    let actual: Vec<(Value, Option<&str>)> = items
        .iter()
        .map(|item| (item.value.clone(), item.text.as_deref()))
        .collect();
    assert_eq!(actual, expected, "{}: item mismatch", context);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_ok() {
        let result: Result<i32, &str> = Ok(42);
        assert_eq!(assert_ok(result, "test operation"), 42);
    }

    #[test]
    #[should_panic(expected = "test operation failed")]
    fn test_assert_ok_fails() {
        let result: Result<i32, &str> = Err("error");
        assert_ok(result, "test operation");
    }

    #[test]
    fn test_assert_items() {
        let items = vec![ChoiceItem::new(1).with_text("x")];
        assert_items(&items, &[(json!(1), Some("x"))], "single item");
    }
}
