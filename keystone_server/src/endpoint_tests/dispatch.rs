use std::collections::BTreeMap;

use actix_web::{http::StatusCode, test::TestRequest, HttpResponse};
use keystone_engine::RouteMethod;

use super::helpers::*;
use crate::dispatch::{AdminRoutes, Handler, HandlerResult, RequestContext};

async fn boom(_ctx: RequestContext) -> HandlerResult {
    panic!("kaboom")
}
crate::handler!(boom);

async fn echo(ctx: RequestContext) -> HandlerResult {
    let params = ctx.params.iter().collect::<BTreeMap<&str, &str>>();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "params": params, "caller": ctx.caller()?.subject })))
}
crate::handler!(echo);

async fn first(_ctx: RequestContext) -> HandlerResult {
    Ok(HttpResponse::Ok().body("first"))
}
crate::handler!(first);

async fn second(_ctx: RequestContext) -> HandlerResult {
    Ok(HttpResponse::Ok().body("second"))
}
crate::handler!(second);

fn custom_state() -> TestState {
    let base = test_state();
    let routes = AdminRoutes::new()
        .route(RouteMethod::Post, "/login", *base.routes.find_by_name("POST", "/login").unwrap().handler())
        .unwrap()
        .route(RouteMethod::Get, "/boom", boom_handler as Handler)
        .unwrap()
        .route(RouteMethod::Get, "/files/:folder/:name", echo_handler as Handler)
        .unwrap()
        .route(RouteMethod::Get, "/files/latest/:name", second_handler as Handler)
        .unwrap()
        .route(RouteMethod::Get, "/pick/:id", first_handler as Handler)
        .unwrap()
        .route(RouteMethod::Get, "/pick/special", second_handler as Handler)
        .unwrap();
    base.with_routes(routes)
}

#[actix_web::test]
async fn panicking_handler_becomes_500() {
    let state = custom_state();
    let token = login(&state).await;
    let (status, body) = send(&state, TestRequest::get().uri("/boom").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);
    assert!(!body.contains("kaboom"));

    // The server keeps serving afterwards
    let (status, _) = send(&state, TestRequest::get().uri("/files/a/b").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn captures_are_decoded_and_passed_with_the_caller() {
    let state = custom_state();
    let token = login(&state).await;
    let req = TestRequest::get().uri("/files/my%20docs/report%2Bfinal.pdf").insert_header(bearer(&token));
    let (status, body) = send(&state, req).await;
    assert_eq!(status, StatusCode::OK);
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["params"]["folder"], "my docs");
    assert_eq!(value["params"]["name"], "report+final.pdf");
    assert_eq!(value["caller"], "admin");
}

#[actix_web::test]
async fn first_registered_route_wins() {
    let state = custom_state();
    let token = login(&state).await;
    let (_, body) = send(&state, TestRequest::get().uri("/pick/special").insert_header(bearer(&token))).await;
    assert_eq!(body, "first");
    let (_, body) = send(&state, TestRequest::get().uri("/files/latest/x").insert_header(bearer(&token))).await;
    assert!(body.contains("\"folder\":\"latest\""), "was: {body}");
}

#[actix_web::test]
async fn segment_counts_must_match() {
    let state = custom_state();
    let token = login(&state).await;
    let (status, _) = send(&state, TestRequest::get().uri("/files/only-one").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&state, TestRequest::get().uri("/files/a/b/c").insert_header(bearer(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
