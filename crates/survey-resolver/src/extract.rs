//! Response shaping: walking into a JSON body and turning records into items.

use serde_json::Value;

use survey_types::ChoiceItem;

/// Field read for the title when no title field is configured.
pub const DEFAULT_TITLE_FIELD: &str = "title";

/// Split a path into navigation segments.
///
/// A `;` in the processed path switches to `;` splitting, which is applied to
/// the raw, unprocessed path. Otherwise the processed path is split on `,`.
/// An empty processed path yields no segments.
pub fn path_segments(raw_path: &str, processed_path: &str) -> Vec<String> {
    if processed_path.is_empty() {
        return Vec::new();
    }
    if processed_path.contains(';') {
        raw_path.split(';').map(str::to_string).collect()
    } else {
        processed_path.split(',').map(str::to_string).collect()
    }
}

/// One navigation step. A segment is tried as an exact key (or array index)
/// first, then as a dotted path. Missing and `null` values dead-end.
fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    let direct = match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    };
    let found = match direct {
        Some(found) => Some(found),
        None if segment.contains('.') => segment
            .split('.')
            .try_fold(value, |current, part| step(current, part)),
        None => None,
    };
    found.filter(|v| !v.is_null())
}

/// Walk `body` along `segments`. `None` if any segment is missing.
pub fn navigate<'a>(body: &'a Value, segments: &[String]) -> Option<&'a Value> {
    if body.is_null() {
        return None;
    }
    segments
        .iter()
        .try_fold(body, |current, segment| step(current, segment))
}

/// Look up a (possibly dotted, `a.b.c`) field on a record.
pub fn lookup_field<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    step(record, field)
}

/// Records that produce no item: `null`, `false`, zero and the empty string.
pub fn is_blank_record(record: &Value) -> bool {
    match record {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Value of a record: the configured field, else the first field of an
/// object, else the record itself.
pub fn record_value(record: &Value, value_name: &str) -> Value {
    if !value_name.is_empty() {
        return lookup_field(record, value_name).cloned().unwrap_or(Value::Null);
    }
    match record {
        Value::Object(map) => map.values().next().cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

/// Raw title of a record: the configured field, else `title`.
pub fn record_title<'a>(record: &'a Value, title_name: &str) -> Option<&'a Value> {
    let field = if title_name.is_empty() {
        DEFAULT_TITLE_FIELD
    } else {
        title_name
    };
    lookup_field(record, field)
}

/// Build an item from one record, without custom attributes.
pub fn record_to_item(record: &Value, value_name: &str, title_name: &str) -> ChoiceItem {
    ChoiceItem::from_parts(
        record_value(record, value_name),
        record_title(record, title_name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segments(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_comma_and_semicolon_splitting() {
        assert_eq!(path_segments("a,b", "a,b"), segments(&["a", "b"]));
        assert_eq!(path_segments("a", "a"), segments(&["a"]));
        assert!(path_segments("{p}", "").is_empty());
    }

    #[test]
    fn test_semicolon_split_uses_raw_path() {
        // The processed path decides the delimiter, the raw path supplies the
        // segments, so placeholders are not substituted in `;` paths.
        assert_eq!(
            path_segments("{root};items", "data;items"),
            segments(&["{root}", "items"])
        );
        assert_eq!(
            path_segments("{root},items", "data,items"),
            segments(&["data", "items"])
        );
    }

    #[test]
    fn test_navigate_exact_then_dotted() {
        let body = json!({"a": {"b": [1, 2]}, "x.y": "flat"});
        assert_eq!(navigate(&body, &segments(&["a.b"])), Some(&json!([1, 2])));
        assert_eq!(navigate(&body, &segments(&["a", "b"])), Some(&json!([1, 2])));
        assert_eq!(navigate(&body, &segments(&["x.y"])), Some(&json!("flat")));
        assert_eq!(navigate(&body, &[]), Some(&body));
    }

    #[test]
    fn test_navigate_dead_ends() {
        let body = json!({"a": {}, "n": null});
        assert_eq!(navigate(&body, &segments(&["a.b"])), None);
        assert_eq!(navigate(&body, &segments(&["n"])), None);
        assert_eq!(navigate(&Value::Null, &[]), None);
    }

    #[test]
    fn test_navigate_array_index() {
        let body = json!({"pages": [{"items": [1]}]});
        assert_eq!(
            navigate(&body, &segments(&["pages", "0", "items"])),
            Some(&json!([1]))
        );
    }

    #[test]
    fn test_blank_records() {
        for blank in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_blank_record(&blank), "{blank} is blank");
        }
        for kept in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
            assert!(!is_blank_record(&kept), "{kept} is kept");
        }
    }

    #[test]
    fn test_record_value_rules() {
        let record = json!({"code": "ca", "name": {"en": "Canada"}});
        assert_eq!(record_value(&record, ""), json!("ca"));
        assert_eq!(record_value(&record, "name.en"), json!("Canada"));
        assert_eq!(record_value(&record, "missing"), Value::Null);
        assert_eq!(record_value(&json!(7), ""), json!(7));
        assert_eq!(record_value(&json!({}), ""), Value::Null);
    }

    #[test]
    fn test_record_to_item() {
        let item = record_to_item(&json!({"v": 1, "title": "One"}), "", "");
        assert_eq!(item.value, json!(1));
        assert_eq!(item.text.as_deref(), Some("One"));

        let item = record_to_item(&json!({"id": 2, "label": {"short": "B"}}), "id", "label.short");
        assert_eq!(item.value, json!(2));
        assert_eq!(item.text.as_deref(), Some("B"));

        let item = record_to_item(&json!("plain"), "", "");
        assert_eq!(item.value, json!("plain"));
        assert_eq!(item.text, None);
    }
}
