mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{ids, TestApp};

#[tokio::test]
async fn create_item_returns_full_form() {
    let app = TestApp::new().await;

    let created = app.post("/api/items/", json!({ "name": "Pretzels" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.body,
        json!({ "id": 1, "name": "Pretzels", "machines": [] })
    );

    let missing = app.post("/api/items/", json!({ "title": "Pretzels" })).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.body, json!({ "error": "Missing required field: name" }));
}

#[tokio::test]
async fn add_then_delete_restores_item_list() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Doherty").await;
    let machine = app.seed_machine(loc, "D1", true, false).await;
    let existing = app.seed_item("Water").await;
    let added = app.seed_item("Soda").await;
    app.link(machine, existing).await;

    let before = app.get(&format!("/api/machines/{machine}/")).await.body["items"].clone();

    let after_add = app
        .post(
            &format!("/api/items/{machine}/"),
            json!({ "item_id": added, "action": "add" }),
        )
        .await;
    assert_eq!(after_add.status, StatusCode::OK);
    assert_eq!(
        ids(&after_add.body["items"]),
        vec![existing as i64, added as i64]
    );

    let after_delete = app
        .post(
            &format!("/api/items/{machine}/"),
            json!({ "item_id": added, "action": "delete" }),
        )
        .await;
    assert_eq!(after_delete.status, StatusCode::OK);
    assert_eq!(after_delete.body["items"], before);
}

#[tokio::test]
async fn repeated_add_keeps_a_single_link() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Gates").await;
    let machine = app.seed_machine(loc, "G1", true, false).await;
    let item = app.seed_item("Chips").await;

    for _ in 0..2 {
        let response = app
            .post(
                &format!("/api/items/{machine}/"),
                json!({ "item_id": item, "action": "add" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(ids(&response.body["items"]), vec![item as i64]);
    }
}

#[tokio::test]
async fn deleting_unlinked_item_is_not_found_and_changes_nothing() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Wean").await;
    let machine = app.seed_machine(loc, "W1", true, false).await;
    let linked = app.seed_item("Gum").await;
    let unlinked = app.seed_item("Mints").await;
    app.link(machine, linked).await;

    let response = app
        .post(
            &format!("/api/items/{machine}/"),
            json!({ "item_id": unlinked, "action": "delete" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({ "error": "Item is not available at this machine." })
    );

    let fetched = app.get(&format!("/api/machines/{machine}/")).await;
    assert_eq!(ids(&fetched.body["items"]), vec![linked as i64]);
}

#[tokio::test]
async fn link_update_checks_run_in_order() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Cohon").await;
    let machine = app.seed_machine(loc, "C1", true, false).await;

    // Unknown machine is reported before the body is looked at
    let no_machine = app.post("/api/items/77/", json!({})).await;
    assert_eq!(no_machine.status, StatusCode::NOT_FOUND);
    assert_eq!(no_machine.body, json!({ "error": "Machine not found." }));

    // Body problems come before the item lookup
    let bad_action = app
        .post(
            &format!("/api/items/{machine}/"),
            json!({ "item_id": 77, "action": "swap" }),
        )
        .await;
    assert_eq!(bad_action.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        bad_action.body,
        json!({ "error": "Invalid action 'swap': expected 'add' or 'delete'" })
    );

    let no_item = app
        .post(
            &format!("/api/items/{machine}/"),
            json!({ "item_id": 77, "action": "add" }),
        )
        .await;
    assert_eq!(no_item.status, StatusCode::NOT_FOUND);
    assert_eq!(no_item.body, json!({ "error": "Item not found." }));
}

#[tokio::test]
async fn machines_selling_item() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Hunt").await;
    let first = app.seed_machine(loc, "H1", true, false).await;
    app.seed_machine(loc, "H2", true, false).await;
    let third = app.seed_machine(loc, "H3", false, true).await;
    let item = app.seed_item("Coffee").await;
    app.link(third, item).await;
    app.link(first, item).await;

    let selling = app.get(&format!("/api/items/{item}/")).await;
    assert_eq!(selling.status, StatusCode::OK);
    assert_eq!(
        ids(&selling.body["machines"]),
        vec![first as i64, third as i64]
    );
    assert_eq!(selling.body["machines"][0]["items"][0]["name"], "Coffee");

    let missing = app.get("/api/items/404/").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, json!({ "error": "Item not found." }));
}

#[tokio::test]
async fn deleting_item_unlinks_it_from_machines() {
    let app = TestApp::new().await;
    let loc = app.seed_location("Tepper").await;
    let machine = app.seed_machine(loc, "T1", true, false).await;
    let item = app.seed_item("Juice").await;
    app.link(machine, item).await;

    let deleted = app.delete(&format!("/api/items/{item}/")).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["name"], "Juice");
    assert_eq!(ids(&deleted.body["machines"]), vec![machine as i64]);

    let fetched = app.get(&format!("/api/machines/{machine}/")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["items"], json!([]));

    assert_eq!(
        app.delete(&format!("/api/items/{item}/")).await.status,
        StatusCode::NOT_FOUND
    );
}
