//! REST surface tests driving the axum router in-process

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Extension, Router,
};
use common::create_test_context;
use identity_service::api::native::NativeClient;
use identity_service::api::rest::handlers::CookiePolicy;
use identity_service::api::rest::routes::register_routes;
use identity_service::domain::Service;
use idgm_kit::SessionResolver;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(service: Arc<Service>) -> Router {
    let resolver: Arc<dyn SessionResolver> = Arc::new(NativeClient::new(service.clone()));
    register_routes(
        Router::new(),
        service,
        CookiePolicy {
            secure: false,
            max_age_secs: 3600,
        },
    )
    .expect("routes register")
    .layer(Extension(resolver))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn test_session_without_cookie_is_401() {
    let ctx = create_test_context(None);
    let response = app(ctx.service)
        .oneshot(
            Request::builder()
                .uri("/api/auth/session")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_cookie_that_authenticates() {
    let ctx = create_test_context(None);
    ctx.service
        .register("cookie@example.com", "Cookie", "password-123")
        .await
        .expect("registration");
    let app = app(ctx.service);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "cookie@example.com", "password": "password-123"}),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie is set")
        .to_string();
    assert!(set_cookie.starts_with("idgm_session="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie_pair = set_cookie.split(';').next().expect("pair").to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/session")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "cookie@example.com");
    assert_eq!(body["role"], "CUSTOMER");
}

#[tokio::test]
async fn test_bad_login_is_401_problem() {
    let ctx = create_test_context(None);
    let response = app(ctx.service)
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({"email": "ghost@example.com", "password": "boo"}),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_admin_users_requires_admin_role() {
    let ctx = create_test_context(None);
    ctx.service
        .register("plain@example.com", "Plain", "password-123")
        .await
        .expect("registration");
    let (_, token) = ctx
        .service
        .login("plain@example.com", "password-123")
        .await
        .expect("login");

    let response = app(ctx.service)
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, format!("Bearer {}", token.token))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
