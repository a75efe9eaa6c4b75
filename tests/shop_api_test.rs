mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn new_users_wear_the_default_outfit() {
    let app = spawn_app().await;
    let user = app.sign_up("newbie").await;

    let (status, profile) = app.send(Method::GET, &format!("/users/{}", user), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["coins"], 0);
    assert_eq!(profile["tiers"], json!(["four_bit"]));
    assert_eq!(profile["owned_items"], json!([0, 10]));
    assert_eq!(profile["equipped"], json!({ "hat": 0, "body": 10 }));
}

#[tokio::test]
async fn catalog_lists_every_item() {
    let app = spawn_app().await;
    let (status, items) = app.send(Method::GET, "/shop/items", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 35);
    let hat = items.iter().find(|i| i["id"] == 1).unwrap();
    assert_eq!(hat["slot"], "hat");
    assert_eq!(hat["price"], 50);
    assert_eq!(hat["assets"]["eight_bit"], "8bit/hat1.png");
}

#[tokio::test]
async fn purchase_needs_enough_coins() {
    let app = spawn_app().await;
    let user = app.sign_up("broke").await;

    let (status, _) = app
        .send(Method::POST, "/shop/purchase", Some(&user), Some(json!({ "item_id": 1 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, profile) = app.send(Method::GET, &format!("/users/{}", user), None, None).await;
    assert_eq!(profile["coins"], 0);
    assert_eq!(profile["owned_items"], json!([0, 10]));
}

#[tokio::test]
async fn buy_then_equip_a_hat() {
    let app = spawn_app().await;
    let user = app.sign_up("dapper").await;
    for _ in 0..3 {
        app.earn_hard_reward(&user).await;
    }

    let (status, profile) = app
        .send(Method::POST, "/shop/purchase", Some(&user), Some(json!({ "item_id": 1 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["coins"], 10);
    assert_eq!(profile["xp"], 60);
    assert_eq!(profile["owned_items"], json!([0, 1, 10]));

    let (status, _) = app
        .send(Method::POST, "/shop/purchase", Some(&user), Some(json!({ "item_id": 1 })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, profile) = app
        .send(Method::POST, "/shop/equip", Some(&user), Some(json!({ "item_id": 1 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["equipped"]["hat"], 1);
    assert_eq!(profile["equipped"]["body"], 10);

    let (status, _) = app
        .send(Method::POST, "/shop/equip", Some(&user), Some(json!({ "item_id": 21 })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::POST, "/shop/purchase", Some(&user), Some(json!({ "item_id": 99 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = app
        .send(Method::GET, &format!("/users/{}/stats", user), None, None)
        .await;
    assert_eq!(stats["coins_spent"], 50);
    assert_eq!(stats["coins_earned"], 60);
}

#[tokio::test]
async fn tiers_unlock_in_order() {
    let app = spawn_app().await;
    let user = app.sign_up("collector").await;
    for _ in 0..8 {
        app.earn_hard_reward(&user).await;
    }

    let (status, _) = app
        .send(Method::POST, "/shop/tiers", Some(&user), Some(json!({ "tier": "sixteen_bit" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, profile) = app
        .send(Method::POST, "/shop/tiers", Some(&user), Some(json!({ "tier": "eight_bit" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["tiers"], json!(["four_bit", "eight_bit"]));
    assert_eq!(profile["coins"], 10);

    let (status, _) = app
        .send(Method::POST, "/shop/tiers", Some(&user), Some(json!({ "tier": "eight_bit" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(Method::POST, "/shop/tiers", Some(&user), Some(json!({ "tier": "sixteen_bit" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
