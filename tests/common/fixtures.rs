//! Canned response bodies and JSON fixture files.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Two records nested under `a.b`.
pub const NESTED_BODY: &str = r#"{"a":{"b":[{"v":1,"t":"x"},{"v":2,"t":"y"}]}}"#;

/// Countries keyed by region; records carry extra attributes.
#[allow(dead_code)]
pub const COUNTRIES_BODY: &str = r#"{
    "data": {
        "europe": [
            {"code": "no", "name": "Norway", "population": 5400000, "meta": {"flag": "NO"}},
            {"code": "se", "name": "Sweden", "population": 10400000, "meta": {"flag": "SE"}}
        ]
    }
}"#;

/// Write `value` as `name` inside `dir` and return the path.
#[allow(dead_code)]
pub fn write_json_fixture(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, value.to_string()).expect("fixture should be writable");
    path
}
