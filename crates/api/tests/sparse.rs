use proptest::prelude::*;
use qc_mcp_api::sparse::{strip_nulls, to_sparse_value};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    note: Option<String>,
    nested: Option<Nested>,
}

#[derive(Serialize)]
struct Nested {
    value: Option<i64>,
    keep: bool,
}

#[test]
fn test_unset_fields_are_omitted() {
    let payload = Payload {
        project_id: 7,
        name: None,
        note: None,
        nested: Some(Nested {
            value: None,
            keep: true,
        }),
    };

    let value = to_sparse_value(&payload).unwrap();
    assert_eq!(value, json!({"projectId": 7, "nested": {"keep": true}}));
}

#[test]
fn test_null_array_elements_are_kept() {
    let mut value = json!({"items": [null, {"a": null, "b": 1}], "gone": null});
    strip_nulls(&mut value);
    assert_eq!(value, json!({"items": [null, {"b": 1}]}));
}

proptest! {
    #[test]
    fn test_serialized_body_never_contains_unset_keys(
        project_id in any::<i64>(),
        name in prop::option::of("[a-z]{0,12}"),
        note in prop::option::of("[a-z]{0,12}"),
    ) {
        let payload = Payload { project_id, name: name.clone(), note: note.clone(), nested: None };
        let value = to_sparse_value(&payload).unwrap();
        let object = value.as_object().unwrap();

        prop_assert_eq!(object.contains_key("name"), name.is_some());
        prop_assert_eq!(object.contains_key("note"), note.is_some());
        prop_assert!(!object.contains_key("nested"));
        prop_assert!(object.values().all(|v| !v.is_null()));
    }
}
