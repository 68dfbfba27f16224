//! JSON → typed objects through the default registry, and back.

mod common;

use common::TestEnv;
use serde_json::json;
use survey_runtime::model::{format_size, ElementState, SurveyElement, SurveyError};
use survey_runtime::resolver::ChoicesByUrl;
use survey_runtime::transport::MockTransport;
use survey_runtime::types::StringTable;

#[test]
fn test_unknown_type_is_absent() {
    let env = TestEnv::new(MockTransport::new());
    assert!(env.registry.create("doesNotExist").is_none());
    assert!(env
        .registry
        .object_from_json(&json!({"type": "doesNotExist"}))
        .is_none());
    assert!(env.registry.get_properties("doesNotExist").is_empty());
}

#[test]
fn test_probe_candidate_types() {
    let env = TestEnv::new(MockTransport::new());
    let found: Vec<&str> = ["matrix", "panel", "choicesByUrl", "signaturepad"]
        .into_iter()
        .filter(|name| env.registry.create(name).is_some())
        .collect();
    assert_eq!(found, vec!["panel", "choicesByUrl"]);
}

#[test]
fn test_element_round_trip_omits_defaults() {
    let env = TestEnv::new(MockTransport::new());
    let source = json!({"type": "page", "name": "page1", "state": "default", "readOnly": false});
    let (object, report) = env
        .registry
        .object_from_json(&source)
        .expect("page is registered");

    assert!(report.is_clean());
    assert_eq!(env.registry.to_json(object.as_ref()), json!({"name": "page1"}));
    let page = object
        .downcast_ref::<SurveyElement>()
        .expect("page is a survey element");
    assert_eq!(page.state(), ElementState::Default);
}

#[test]
fn test_rejected_values_are_reported() {
    let env = TestEnv::new(MockTransport::new());
    let (_, report) = env
        .registry
        .create_from_json("question", &json!({"name": 7, "state": "open"}))
        .expect("question is registered");
    assert_eq!(report.rejected_properties, vec!["name", "state"]);
}

#[test]
fn test_plugin_property_round_trips() {
    let env = TestEnv::new(MockTransport::new());
    env.registry.add_property("question", "description");

    let (object, report) = env
        .registry
        .create_from_json("question", &json!({"name": "q1", "description": "Your age"}))
        .expect("question is registered");
    assert!(report.is_clean());
    assert_eq!(
        env.registry.to_json(object.as_ref()),
        json!({"name": "q1", "description": "Your age"})
    );
}

#[test]
fn test_choices_descriptor_round_trip() {
    let env = TestEnv::new(MockTransport::new());
    let (object, _) = env
        .registry
        .create_from_json("choicesByUrl", &json!({"url": "http://x", "titleName": "name"}))
        .expect("choicesByUrl is registered");
    let resolver = object
        .downcast_ref::<ChoicesByUrl>()
        .expect("factory builds a resolver");

    assert_eq!(resolver.get_data(), json!({"url": "http://x", "titleName": "name"}));
    assert_eq!(
        env.registry.to_json(object.as_ref()),
        json!({"url": "http://x", "titleName": "name"})
    );
}

#[test]
fn test_error_taxonomy_messages() {
    let english = StringTable::english();
    let cases = [
        (SurveyError::exceed_size(0), "0 Byte"),
        (SurveyError::min_row_count(3), "3"),
        (SurveyError::web_request("500 Internal Server Error", "boom"), "boom"),
    ];
    for (error, expected) in cases {
        common::assert_error_contains(error.message(&english), expected, error.error_type());
    }
    assert_eq!(format_size(1536), "2 KB");
    assert_eq!(SurveyError::custom("").message(&english), "");
}
