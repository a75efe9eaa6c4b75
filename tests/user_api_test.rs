mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tasking::clock::Clock;
use tasking::services::StreakScheduler;

use common::{day, spawn_app};

#[tokio::test]
async fn sign_up_validates_and_rejects_duplicates() {
    let app = spawn_app().await;
    app.sign_up("alice").await;

    let (status, _) = app
        .send(
            Method::POST,
            "/users",
            None,
            Some(json!({ "username": "alice", "email": "other@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::POST,
            "/users",
            None,
            Some(json!({ "username": "bob", "email": "not-an-email" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.send(Method::GET, "/users/nobody", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fresh_profile_starts_at_level_zero() {
    let app = spawn_app().await;
    let user = app.sign_up("zero").await;

    let (status, progress) = app
        .send(Method::GET, &format!("/users/{}/progress", user), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        progress,
        json!({ "level": 0, "xp_into_level": 0, "xp_for_next_level": 20, "fraction": 0.0 })
    );
}

#[tokio::test]
async fn login_tracks_presence_and_streaks() {
    let app = spawn_app().await;
    let user = app.sign_up("daily").await;

    let (status, profile) = app
        .send(Method::POST, &format!("/users/{}/login", user), Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["is_online"], true);

    app.clock.set(day("2025-03-11"));
    app.send(Method::POST, &format!("/users/{}/login", user), Some(&user), None)
        .await;
    let (_, stats) = app
        .send(Method::GET, &format!("/users/{}/stats", user), None, None)
        .await;
    assert_eq!(stats["current_streak"], 2);
    assert_eq!(stats["days_active"], 2);

    // skipping the 12th breaks the streak
    app.clock.set(day("2025-03-13"));
    let (_, stats) = app
        .send(Method::GET, &format!("/users/{}/stats", user), None, None)
        .await;
    assert_eq!(stats["current_streak"], 0);
    assert_eq!(stats["longest_streak"], 2);

    app.send(Method::POST, &format!("/users/{}/login", user), Some(&user), None)
        .await;
    let (_, stats) = app
        .send(Method::GET, &format!("/users/{}/stats", user), None, None)
        .await;
    assert_eq!(stats["current_streak"], 1);
    assert_eq!(stats["days_active"], 3);

    let (_, profile) = app
        .send(Method::POST, &format!("/users/{}/logout", user), Some(&user), None)
        .await;
    assert_eq!(profile["is_online"], false);

    let (_, profile) = app
        .send(
            Method::PATCH,
            &format!("/users/{}/presence", user),
            Some(&user),
            Some(json!({ "online": true })),
        )
        .await;
    assert_eq!(profile["is_online"], true);
}

#[tokio::test]
async fn scheduler_sweep_resets_stale_streaks() {
    let app = spawn_app().await;
    let active = app.sign_up("active").await;
    let lapsed = app.sign_up("lapsed").await;

    app.send(Method::POST, &format!("/users/{}/login", lapsed), Some(&lapsed), None)
        .await;
    app.clock.set(day("2025-03-12"));
    app.send(Method::POST, &format!("/users/{}/login", active), Some(&active), None)
        .await;

    let scheduler = StreakScheduler::new(app.pool.clone(), app.clock.clone() as Arc<dyn Clock>, 60);
    assert_eq!(scheduler.run_sweep().await.expect("sweep"), 1);
    assert_eq!(scheduler.run_sweep().await.expect("sweep"), 0);

    let (current,): (i64,) =
        sqlx::query_as("SELECT current_streak FROM user_stats WHERE user_id = ?")
            .bind(&lapsed)
            .fetch_one(&app.pool)
            .await
            .expect("stats row");
    assert_eq!(current, 0);

    let (current,): (i64,) =
        sqlx::query_as("SELECT current_streak FROM user_stats WHERE user_id = ?")
            .bind(&active)
            .fetch_one(&app.pool)
            .await
            .expect("stats row");
    assert_eq!(current, 1);
}

#[tokio::test]
async fn presence_is_only_changed_by_its_owner() {
    let app = spawn_app().await;
    let owner = app.sign_up("owner").await;
    let other = app.sign_up("other").await;

    let (status, _) = app
        .send(Method::POST, &format!("/users/{}/login", owner), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::POST, &format!("/users/{}/login", owner), Some(&other), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/users/{}/presence", owner),
            Some(&other),
            Some(json!({ "online": true })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, profile) = app.send(Method::GET, &format!("/users/{}", owner), None, None).await;
    assert_eq!(profile["is_online"], false);
    let (_, stats) = app
        .send(Method::GET, &format!("/users/{}/stats", owner), None, None)
        .await;
    assert_eq!(stats["days_active"], 0);
}

#[tokio::test]
async fn friendship_starts_with_an_accepted_request() {
    let app = spawn_app().await;
    let ann = app.sign_up("ann").await;
    let ben = app.sign_up("ben").await;
    app.earn_hard_reward(&ann).await;

    let (status, request) = app
        .send(Method::POST, "/friends", Some(&ann), Some(json!({ "username": "ben" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["sender_id"], ann.as_str());
    assert_eq!(request["receiver_username"], "ben");

    // nothing is mutual until ben answers
    let (_, anns_friends) = app.send(Method::GET, "/friends", Some(&ann), None).await;
    assert!(anns_friends.as_array().unwrap().is_empty());

    let (status, _) = app
        .send(Method::POST, "/friends", Some(&ann), Some(json!({ "username": "ben" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = app
        .send(Method::POST, "/friends", Some(&ben), Some(json!({ "username": "ann" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(Method::POST, "/friends", Some(&ann), Some(json!({ "username": "ann" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app
        .send(Method::POST, "/friends", Some(&ann), Some(json!({ "username": "ghost" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, incoming) = app.send(Method::GET, "/friends/requests", Some(&ben), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(incoming.as_array().unwrap().len(), 1);
    assert_eq!(incoming[0]["sender_username"], "ann");
    let (_, anns_incoming) = app.send(Method::GET, "/friends/requests", Some(&ann), None).await;
    assert!(anns_incoming.as_array().unwrap().is_empty());

    // only the receiver can accept
    let (status, _) = app
        .send(Method::POST, &format!("/friends/requests/{}/accept", ben), Some(&ann), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, friend) = app
        .send(Method::POST, &format!("/friends/requests/{}/accept", ann), Some(&ben), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(friend["id"], ann.as_str());
    assert_eq!(friend["level"], 1);

    let (_, incoming) = app.send(Method::GET, "/friends/requests", Some(&ben), None).await;
    assert!(incoming.as_array().unwrap().is_empty());

    let (_, bens_friends) = app.send(Method::GET, "/friends", Some(&ben), None).await;
    assert_eq!(bens_friends[0]["username"], "ann");
    assert_eq!(bens_friends[0]["is_online"], false);
    let (_, anns_friends) = app.send(Method::GET, "/friends", Some(&ann), None).await;
    assert_eq!(anns_friends[0]["username"], "ben");

    let (status, _) = app
        .send(Method::POST, "/friends", Some(&ben), Some(json!({ "username": "ann" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(Method::DELETE, &format!("/friends/{}", ben), Some(&ann), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, bens_friends) = app.send(Method::GET, "/friends", Some(&ben), None).await;
    assert!(bens_friends.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn declined_requests_disappear() {
    let app = spawn_app().await;
    let cat = app.sign_up("cat").await;
    let dan = app.sign_up("dan").await;

    app.send(Method::POST, "/friends", Some(&cat), Some(json!({ "username": "dan" })))
        .await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/friends/requests/{}", cat), Some(&dan), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(Method::DELETE, &format!("/friends/requests/{}", cat), Some(&dan), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, incoming) = app.send(Method::GET, "/friends/requests", Some(&dan), None).await;
    assert!(incoming.as_array().unwrap().is_empty());
    let (_, friends) = app.send(Method::GET, "/friends", Some(&dan), None).await;
    assert!(friends.as_array().unwrap().is_empty());

    // a declined request can be sent again
    let (status, _) = app
        .send(Method::POST, "/friends", Some(&cat), Some(json!({ "username": "dan" })))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}
