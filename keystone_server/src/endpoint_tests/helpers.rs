use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
};
use keystone_engine::{
    test_utils::{prepare_test_env, test_credentials, test_token_service, TEST_PASSWORD, TEST_USERNAME},
    AuthApi,
    ContentApi,
    MediaApi,
    MemoryContentStore,
    MemoryMediaStore,
    StoredCredentials,
};
use log::debug;

use crate::{
    data_objects::{LoginRequest, LoginResponse},
    server::{create_app, AppState},
};

pub const TEST_LIFETIME: i64 = 60;
pub const TEST_MAX_BODY_BYTES: usize = 1024;

pub type TestState = AppState<StoredCredentials, MemoryContentStore, MemoryMediaStore>;

pub fn test_state() -> TestState {
    prepare_test_env();
    AppState::new(
        test_token_service(Some(TEST_LIFETIME)),
        AuthApi::new(test_credentials()),
        ContentApi::new(MemoryContentStore::new()),
        MediaApi::new(MemoryMediaStore::new()),
        TEST_MAX_BODY_BYTES,
    )
    .expect("test state is valid")
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Sends `req` through a freshly built app sharing `state`, and returns the status and body as text.
pub async fn send<C, B, M>(state: &AppState<C, B, M>, req: TestRequest) -> (StatusCode, String)
where
    C: 'static,
    B: 'static,
    M: 'static,
{
    let app = test::init_service(create_app(state.clone())).await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let body = String::from_utf8_lossy(&body).into_owned();
    debug!("Response: {status} {body}");
    (status, body)
}

/// Logs in with the test administrator and returns the session token.
pub async fn login<C, B, M>(state: &AppState<C, B, M>) -> String
where
    C: 'static,
    B: 'static,
    M: 'static,
{
    let req = TestRequest::post().uri("/login").set_json(LoginRequest::new(TEST_USERNAME, TEST_PASSWORD));
    let (status, body) = send(state, req).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    serde_json::from_str::<LoginResponse>(&body).expect("login response").token
}
