use actix_web::{
    http::{header, StatusCode},
    test::TestRequest,
};
use keystone_engine::{
    db_types::Post,
    test_utils::{test_credentials, test_token_service},
    AuthApi,
    ContentApi,
    ContentApiError,
    MediaApi,
    MemoryMediaStore,
};
use serde_json::json;

use super::{helpers::*, mocks::MockContentStore};
use crate::server::AppState;

async fn create(state: &TestState, token: &str, body: serde_json::Value) -> (StatusCode, String) {
    send(state, TestRequest::post().uri("/admin/posts").insert_header(bearer(token)).set_json(body)).await
}

#[actix_web::test]
async fn post_lifecycle() {
    let state = test_state();
    let token = login(&state).await;

    let (status, body) = create(&state, &token, json!({"title": "Hello", "slug": "hello", "body": "First!"})).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let post: Post = serde_json::from_str(&body).unwrap();
    assert_eq!(post.id, 1);
    assert!(!post.published);

    let (status, body) = send(&state, TestRequest::get().uri("/admin/posts/1").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Post>(&body).unwrap(), post);

    let req =
        TestRequest::put().uri("/admin/posts/1").insert_header(bearer(&token)).set_json(json!({"published": true}));
    let (status, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Post = serde_json::from_str(&body).unwrap();
    assert!(updated.published);
    assert_eq!(updated.title, "Hello");

    let (status, body) = send(&state, TestRequest::get().uri("/admin/posts").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Vec<Post>>(&body).unwrap().len(), 1);

    let (status, body) = send(&state, TestRequest::delete().uri("/admin/posts/1").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = send(&state, TestRequest::get().uri("/admin/posts/1").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("not found"), "was: {body}");
}

#[actix_web::test]
async fn created_post_has_location() {
    let state = test_state();
    let token = login(&state).await;
    let req = TestRequest::post()
        .uri("/admin/posts")
        .insert_header(bearer(&token))
        .set_json(json!({"title": "Located", "slug": "located"}));
    let app = actix_web::test::init_service(crate::server::create_app(state.clone())).await;
    let res = actix_web::test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/admin/posts/1");
}

#[actix_web::test]
async fn posts_require_a_token() {
    let state = test_state();
    let (status, _) = send(&state, TestRequest::get().uri("/admin/posts")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let req = TestRequest::post().uri("/admin/posts").set_json(json!({"title": "Sneaky", "slug": "sneaky"}));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn invalid_post_ids_and_bodies() {
    let state = test_state();
    let token = login(&state).await;

    let (status, body) = send(&state, TestRequest::get().uri("/admin/posts/abc").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("'abc' is not a valid post id"), "was: {body}");

    let (status, _) = create(&state, &token, json!({"title": "", "slug": "empty-title"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = create(&state, &token, json!({"title": "Bad slug", "slug": "Bad Slug"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = create(&state, &token, json!({"slug": "no-title"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::put().uri("/admin/posts/7").insert_header(bearer(&token)).set_json(json!({"title": "Ghost"}));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = TestRequest::put().uri("/admin/posts/7").insert_header(bearer(&token)).set_json(json!({}));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn duplicate_slugs_conflict() {
    let state = test_state();
    let token = login(&state).await;
    let (status, _) = create(&state, &token, json!({"title": "One", "slug": "same"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = create(&state, &token, json!({"title": "Two", "slug": "same"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("same"), "was: {body}");
}

#[actix_web::test]
async fn backend_failures_are_server_errors() {
    let mut store = MockContentStore::new();
    store.expect_fetch_posts().returning(|| Err(ContentApiError::DatabaseError("connection reset".into())));
    let state = AppState::new(
        test_token_service(Some(TEST_LIFETIME)),
        AuthApi::new(test_credentials()),
        ContentApi::new(store),
        MediaApi::new(MemoryMediaStore::new()),
        TEST_MAX_BODY_BYTES,
    )
    .unwrap();
    let token = login(&state).await;
    let (status, body) = send(&state, TestRequest::get().uri("/admin/posts").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("connection reset"), "was: {body}");
}
