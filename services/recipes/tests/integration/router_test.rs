//! Router wiring checks that never reach the database.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::json;

use larder_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use larder_core::middleware::REQUEST_ID_HEADER;
use larder_domain::recipe::RecipeLimits;
use larder_recipes::config::RecipesConfig;
use larder_recipes::router::build_router;
use larder_recipes::state::AppState;
use larder_testing::auth::MockAuth;

fn server() -> TestServer {
    let config = RecipesConfig {
        database_url: "postgres://unused".to_owned(),
        recipes_port: 3114,
        media_root: std::env::temp_dir().join("larder-router-test-media"),
        media_base_url: "/media".to_owned(),
        public_base_url: "http://localhost:3114".to_owned(),
        limits: RecipeLimits::default(),
    };
    let state = AppState::new(DatabaseConnection::Disconnected, config);
    TestServer::new(build_router(state)).unwrap()
}

fn with_auth(request: axum_test::TestRequest, auth: MockAuth) -> axum_test::TestRequest {
    let [(id_name, id_value), (role_name, role_value)] = auth.headers();
    request.add_header(id_name, id_value).add_header(role_name, role_value)
}

#[tokio::test]
async fn should_answer_liveness_and_report_unready_database() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let server = server();
    let response = server.get("/healthz").await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));

    let response = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");
}

#[tokio::test]
async fn should_reject_anonymous_mutations() {
    let server = server();
    server
        .post("/recipes/1/favorite")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/recipes/1/shopping_cart")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/recipes/download_shopping_cart")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/users/0190b2a4-7c1e-7000-8000-000000000001/subscribe")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_malformed_identity_even_on_public_routes() {
    let server = server();
    server
        .get("/recipes")
        .add_header(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_static("not-a-uuid"),
        )
        .add_header(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from_static("0"),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_profile_creation_by_members() {
    let server = server();
    let response = with_auth(server.post("/users"), MockAuth::member())
        .json(&json!({
            "email": "cook@example.com",
            "username": "cook",
            "first_name": "Test",
            "last_name": "Cook",
        }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_reject_unparseable_list_query() {
    let server = server();
    let response = server.get("/recipes?is_favorited=maybe").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["kind"], "MISSING_DATA");
}
