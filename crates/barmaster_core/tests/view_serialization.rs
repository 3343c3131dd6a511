use barmaster_core::seed::seed_demo;
use barmaster_core::{Action, BarApp, ClaimPolicy, CredentialStore, MemoryRecordStore, Page};
use serde_json::json;

#[test]
fn job_center_snapshot_serializes_with_stable_field_names() {
    let store = MemoryRecordStore::new();
    seed_demo(&store).unwrap();
    let mut app = BarApp::new(store, CredentialStore::default(), ClaimPolicy::default());
    app.dispatch(Action::Login {
        username: "leo".to_string(),
        password: "1234".to_string(),
    })
    .unwrap();
    app.dispatch(Action::Open(Page::JobCenter)).unwrap();
    let view = app.dispatch(Action::Claim { job_id: 101 }).unwrap();

    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["page"], json!("job_center"));
    assert_eq!(value["identity"], json!("leo"));
    assert_eq!(value["body"]["kind"], json!("job_center"));
    assert_eq!(value["body"]["mine"][0]["id"], json!(101));
    assert_eq!(value["body"]["mine"][0]["status"], json!("Taken"));
    assert_eq!(value["body"]["mine"][0]["taker"], json!("leo"));
    assert_eq!(value["body"]["open"][0]["taker"], json!(null));
    assert_eq!(value["notices"][0]["level"], json!("success"));
}

#[test]
fn recipe_quantities_serialize_as_number_or_text() {
    let store = MemoryRecordStore::new();
    seed_demo(&store).unwrap();
    let mut app = BarApp::new(store, CredentialStore::default(), ClaimPolicy::default());
    app.dispatch(Action::Login {
        username: "guest".to_string(),
        password: "0000".to_string(),
    })
    .unwrap();
    let view = app
        .dispatch(Action::Search {
            query: "mojito".to_string(),
        })
        .unwrap();

    let value = serde_json::to_value(&view).unwrap();
    let ingredients = &value["body"]["recipes"][0]["ingredients"];
    assert_eq!(ingredients[0]["quantity"], json!(50.0));
    assert_eq!(ingredients[3]["quantity"], json!("Handful"));
}
