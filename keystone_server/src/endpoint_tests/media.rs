use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
};
use keystone_engine::{
    db_types::MediaObject,
    test_utils::{test_credentials, test_token_service},
    AuthApi,
    ContentApi,
    MediaApi,
    MediaApiError,
    MemoryContentStore,
};

use super::{helpers::*, mocks::MockMediaStore};
use crate::server::{create_app, AppState};

#[actix_web::test]
async fn upload_list_download_delete() {
    let state = test_state();
    let token = login(&state).await;

    let req = TestRequest::put()
        .uri("/admin/media/cover.png")
        .insert_header(bearer(&token))
        .insert_header((header::CONTENT_TYPE, "image/png"))
        .set_payload(vec![0x89, b'P', b'N', b'G']);
    let (status, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let object: MediaObject = serde_json::from_str(&body).unwrap();
    assert_eq!(object.key, "cover.png");
    assert_eq!(object.content_type, "image/png");
    assert_eq!(object.size, 4);

    let req = TestRequest::put().uri("/admin/media/notes.bin").insert_header(bearer(&token)).set_payload("raw");
    let (status, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let object: MediaObject = serde_json::from_str(&body).unwrap();
    assert_eq!(object.content_type, "application/octet-stream");

    let (status, body) = send(&state, TestRequest::get().uri("/admin/media").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let keys = serde_json::from_str::<Vec<MediaObject>>(&body).unwrap().into_iter().map(|o| o.key).collect::<Vec<_>>();
    assert_eq!(keys, vec!["cover.png", "notes.bin"]);

    let app = test::init_service(create_app(state.clone())).await;
    let req = TestRequest::get().uri("/admin/media/cover.png").insert_header(bearer(&token)).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(test::read_body(res).await.as_ref(), &[0x89, b'P', b'N', b'G']);

    let req = TestRequest::delete().uri("/admin/media/cover.png").insert_header(bearer(&token));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let req = TestRequest::delete().uri("/admin/media/cover.png").insert_header(bearer(&token));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_keys_and_empty_uploads() {
    let state = test_state();
    let token = login(&state).await;
    let req = TestRequest::put().uri("/admin/media/bad%2Fkey").insert_header(bearer(&token)).set_payload("x");
    let (status, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid media key"), "was: {body}");

    let req = TestRequest::put().uri("/admin/media/empty.txt").insert_header(bearer(&token));
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn oversized_uploads_are_rejected() {
    let state = test_state();
    let token = login(&state).await;
    let req = TestRequest::put()
        .uri("/admin/media/big.bin")
        .insert_header(bearer(&token))
        .set_payload(vec![0u8; TEST_MAX_BODY_BYTES + 1]);
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, body) = send(&state, TestRequest::get().uri("/admin/media").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn media_requires_a_token() {
    let state = test_state();
    let req = TestRequest::put().uri("/admin/media/cover.png").set_payload("x");
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = send(&state, TestRequest::get().uri("/admin/media")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!body.contains("cover"));
}

#[actix_web::test]
async fn storage_failures_are_server_errors() {
    let mut storage = MockMediaStore::new();
    storage.expect_list_objects().returning(|| Err(MediaApiError::StorageError("disk full".into())));
    storage.expect_put_object().returning(|_, _, _| Err(MediaApiError::StorageError("disk full".into())));
    let state = AppState::new(
        test_token_service(Some(TEST_LIFETIME)),
        AuthApi::new(test_credentials()),
        ContentApi::new(MemoryContentStore::new()),
        MediaApi::new(storage),
        TEST_MAX_BODY_BYTES,
    )
    .unwrap();
    let token = login(&state).await;

    let (status, body) = send(&state, TestRequest::get().uri("/admin/media").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("disk full"), "was: {body}");

    let req = TestRequest::put().uri("/admin/media/a.bin").insert_header(bearer(&token)).set_payload("x");
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
