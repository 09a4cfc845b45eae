mod common;

use common::*;
use serde_json::json;

#[tokio::test]
async fn store_lifecycle() {
    let app = app().await;

    let (status, store) = call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;
    assert_eq!(status, 201);
    assert_eq!(store, json!({ "id": 1, "name": "Main", "items": [], "tags": [] }));

    let (status, body) = call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "A store with that name already exists.");

    let (status, body) = call(&app, "GET", "/store", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = call(&app, "GET", "/store/42", None, None).await;
    assert_eq!(status, 404);
    assert_eq!(
        body,
        json!({ "code": 404, "status": "Not Found", "message": "Store not found." })
    );

    let (status, body) = call(&app, "DELETE", "/store/1", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Store deleted." }));

    let (status, _) = call(&app, "GET", "/store/1", None, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    let app = app().await;

    let (status, body) = call(&app, "POST", "/store", None, Some(json!({}))).await;
    assert_eq!(status, 422);
    assert_eq!(body["code"], 422);

    let (status, _) = call(
        &app,
        "POST",
        "/store",
        None,
        Some(json!({ "name": "x", "extra": true })),
    )
    .await;
    assert_eq!(status, 422);

    let (status, _) = call(&app, "POST", "/store", None, Some(json!({ "name": "  " }))).await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn items_belong_to_stores() {
    let app = app().await;
    register(&app, "alice", "pw").await;
    let (token, _) = login(&app, "alice", "pw").await;

    let (status, body) = call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 10.5, "store_id": 7 })),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Store not found.");

    call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;

    let (status, item) = call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 10.5, "store_id": 1 })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(
        item,
        json!({
            "id": 1,
            "name": "chair",
            "price": 10.5,
            "store_id": 1,
            "store": { "id": 1, "name": "Main" },
            "tags": []
        })
    );

    let (status, body) = call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 3.0, "store_id": 1 })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "An item with that name already exists in this store.");

    let (status, store) = call(&app, "GET", "/store/1", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(store["items"], json!([{ "id": 1, "name": "chair", "price": 10.5 }]));

    let (status, items) = call(&app, "GET", "/item", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(items.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn put_updates_or_creates_an_item() {
    let app = app().await;
    register(&app, "alice", "pw").await;
    let (token, _) = login(&app, "alice", "pw").await;
    call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;
    call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 10.5, "store_id": 1 })),
    )
    .await;

    let (status, item) = call(
        &app,
        "PUT",
        "/item/1",
        None,
        Some(json!({ "name": "stool", "price": 4.25 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(item["name"], "stool");
    assert_eq!(item["price"], 4.25);
    assert_eq!(item["store_id"], 1);

    let (status, _) = call(
        &app,
        "PUT",
        "/item/5",
        None,
        Some(json!({ "name": "desk", "price": 80.0 })),
    )
    .await;
    assert_eq!(status, 422);

    let (status, item) = call(
        &app,
        "PUT",
        "/item/5",
        None,
        Some(json!({ "name": "desk", "price": 80.0, "store_id": 1 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(item["id"], 5);
    assert_eq!(item["store"]["name"], "Main");
}

#[tokio::test]
async fn tags_link_and_unlink_items() {
    let app = app().await;
    register(&app, "alice", "pw").await;
    let (token, _) = login(&app, "alice", "pw").await;
    call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;
    call(&app, "POST", "/store", None, Some(json!({ "name": "Other" }))).await;
    call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 10.5, "store_id": 1 })),
    )
    .await;

    let (status, tag) = call(&app, "POST", "/store/1/tag", None, Some(json!({ "name": "sale" }))).await;
    assert_eq!(status, 201);
    assert_eq!(tag["store"], json!({ "id": 1, "name": "Main" }));
    assert_eq!(tag["items"], json!([]));

    let (status, body) =
        call(&app, "POST", "/store/1/tag", None, Some(json!({ "name": "sale" }))).await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "A tag with that name already exists in that store.");

    let (status, _) = call(&app, "POST", "/store/2/tag", None, Some(json!({ "name": "other" }))).await;
    assert_eq!(status, 201);

    let (status, _) = call(&app, "POST", "/item/1/tag/2", None, None).await;
    assert_eq!(status, 400);

    let (status, tag) = call(&app, "POST", "/item/1/tag/1", None, None).await;
    assert_eq!(status, 201);
    assert_eq!(tag["items"], json!([{ "id": 1, "name": "chair", "price": 10.5 }]));

    let (status, tags) = call(&app, "GET", "/store/1/tag", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(tags.as_array().unwrap().len(), 1);

    let (status, item) = call(&app, "GET", "/item/1", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(item["tags"], json!([{ "id": 1, "name": "sale" }]));

    let (status, body) = call(&app, "DELETE", "/tag/1", None, None).await;
    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        "Could not delete tag. Make sure tag is not associated with any items, then try again."
    );

    let (status, body) = call(&app, "DELETE", "/item/1/tag/1", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Item removed from tag");
    assert_eq!(body["item"]["tags"], json!([]));
    assert_eq!(body["tag"]["items"], json!([]));

    let (status, body) = call(&app, "DELETE", "/tag/1", None, None).await;
    assert_eq!(status, 202);
    assert_eq!(body, json!({ "message": "Tag deleted." }));

    let (status, _) = call(&app, "GET", "/tag/1", None, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn deleting_a_store_removes_its_items_and_tags() {
    let app = app().await;
    register(&app, "alice", "pw").await;
    let (token, _) = login(&app, "alice", "pw").await;
    call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;
    call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair", "price": 10.5, "store_id": 1 })),
    )
    .await;
    call(&app, "POST", "/store/1/tag", None, Some(json!({ "name": "sale" }))).await;
    call(&app, "POST", "/item/1/tag/1", None, None).await;

    let (status, _) = call(&app, "DELETE", "/store/1", None, None).await;
    assert_eq!(status, 200);

    let (status, _) = call(&app, "GET", "/item/1", Some(&token), None).await;
    assert_eq!(status, 404);
    let (status, _) = call(&app, "GET", "/tag/1", None, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn item_names_are_trimmed_before_storing() {
    let app = app().await;
    register(&app, "alice", "pw").await;
    let (token, _) = login(&app, "alice", "pw").await;
    call(&app, "POST", "/store", None, Some(json!({ "name": "Main" }))).await;

    let (status, item) = call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "  chair ", "price": 10.5, "store_id": 1 })),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(item["name"], "chair");

    let (status, body) = call(
        &app,
        "POST",
        "/item",
        Some(&token),
        Some(json!({ "name": "chair ", "price": 3.0, "store_id": 1 })),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "An item with that name already exists in this store.");

    let (status, item) = call(
        &app,
        "PUT",
        "/item/1",
        None,
        Some(json!({ "name": " stool ", "price": 4.0 })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(item["name"], "stool");
}
