use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use jobboard_backend::{middleware::rate_limit, routes, AppState};

fn init_test_config() {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("PUBLIC_RPS", "1000");
    let _ = jobboard_backend::config::init_config();
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn app(pool: SqlitePool) -> Router {
    let state = AppState::new(pool);
    Router::new()
        .route(
            "/api/listings",
            get(routes::listing::list_listings).post(routes::listing::create_listing),
        )
        .route(
            "/api/listings/:id",
            get(routes::listing::get_listing).patch(routes::listing::vote_listing),
        )
        .route(
            "/api/users",
            post(routes::user::register_user).delete(routes::user::delete_user),
        )
        .route("/api/auth/login", post(routes::auth::login))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit::new_rps_state(1000),
            rate_limit::rps_middleware,
        ))
        .with_state(state)
}

async fn json_body(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn register_body(email: &str) -> JsonValue {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": "correct-horse",
        "confirm_password": "correct-horse",
        "educational_level": "Master's Degree",
        "favorite_programming_language": "Rust",
        "desired_job_position": "Backend Developer",
        "desired_sectors": ["fintech"]
    })
}

fn listing_body(company: &str, sticky: &str) -> JsonValue {
    json!({
        "company": company,
        "offer": "Backend Engineer",
        "location": "remote",
        "link": "https://acme.example/jobs/1",
        "tags": ["Rust", "Backend"],
        "min_salary": 40000,
        "max_salary": 55000,
        "sticky_duration": sticky
    })
}

async fn register_and_login(app: &Router, email: &str) -> String {
    let resp = app
        .clone()
        .oneshot(post_json("/api/users", &register_body(email)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "email": email, "password": "correct-horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    body["token"].as_str().expect("token").to_string()
}

async fn create_listing(app: &Router, token: &str, body: &JsonValue) -> JsonValue {
    let req = Request::builder()
        .method("POST")
        .uri("/api/listings")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    json_body(resp).await
}

async fn vote(app: &Router, token: &str, id: &str) -> axum::response::Response {
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/listings/{}", id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn listing_flow_end_to_end() {
    init_test_config();
    let app = app(test_pool().await);

    let token = register_and_login(&app, "flow@example.com").await;

    // Unauthenticated create is rejected before validation runs.
    let resp = app
        .clone()
        .oneshot(post_json("/api/listings", &listing_body("Acme", "No sticky")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let a = create_listing(&app, &token, &listing_body("Plain A", "No sticky")).await;
    let b = create_listing(&app, &token, &listing_body("Sticky B", "7 days")).await;
    let c = create_listing(&app, &token, &listing_body("Plain C", "No sticky")).await;
    assert_eq!(a["votes"], json!(0));
    assert_eq!(b["sticky_seconds"], json!(604_800));
    assert_eq!(c["sticky_seconds"], json!(0));

    let a_id = a["id"].as_str().unwrap();
    let b_id = b["id"].as_str().unwrap();
    let c_id = c["id"].as_str().unwrap();

    // A gets 2 votes, C gets 3, B gets 1.
    for _ in 0..2 {
        assert_eq!(vote(&app, &token, a_id).await.status(), StatusCode::OK);
    }
    for _ in 0..3 {
        assert_eq!(vote(&app, &token, c_id).await.status(), StatusCode::OK);
    }
    let resp = vote(&app, &token, b_id).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let voted = json_body(resp).await;
    assert_eq!(voted["votes"], json!(1));

    // The no-sticky windows close the instant their creation millisecond
    // passes; step past it before reading the ranked feed.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    // B is inside its sticky window and outranks everything; the expired
    // listings follow by votes descending.
    let req = Request::builder()
        .method("GET")
        .uri("/api/listings")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ranked = json_body(resp).await;
    let order: Vec<&str> = ranked
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(order, vec![b_id, c_id, a_id]);

    // Single-listing read round-trips the placeholder image.
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/listings/{}", a_id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let single = json_body(resp).await;
    assert_eq!(single["votes"], json!(2));
    assert!(single["image"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn voting_an_unknown_listing_is_not_found() {
    init_test_config();
    let app = app(test_pool().await);
    let token = register_and_login(&app, "unknown-vote@example.com").await;

    let resp = vote(&app, &token, &Uuid::new_v4().to_string()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/listings/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    init_test_config();
    let app = app(test_pool().await);
    let token = register_and_login(&app, "invalid-payloads@example.com").await;

    let send = |body: JsonValue| {
        let app = app.clone();
        let token = token.clone();
        async move {
            let req = Request::builder()
                .method("POST")
                .uri("/api/listings")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(body.to_string()))
                .unwrap();
            app.oneshot(req).await.unwrap().status()
        }
    };

    let mut short_company = listing_body("A", "No sticky");
    short_company["company"] = json!("A");
    assert_eq!(send(short_company).await, StatusCode::BAD_REQUEST);

    let mut insecure_link = listing_body("Acme", "No sticky");
    insecure_link["link"] = json!("http://acme.example/jobs/1");
    assert_eq!(send(insecure_link).await, StatusCode::BAD_REQUEST);

    let mut too_many_tags = listing_body("Acme", "No sticky");
    too_many_tags["tags"] = json!(["a", "b", "c", "d"]);
    assert_eq!(send(too_many_tags).await, StatusCode::BAD_REQUEST);

    let mut unpaired_salary = listing_body("Acme", "No sticky");
    unpaired_salary["max_salary"] = JsonValue::Null;
    assert_eq!(send(unpaired_salary).await, StatusCode::BAD_REQUEST);

    let mut inverted_salary = listing_body("Acme", "No sticky");
    inverted_salary["min_salary"] = json!(55000);
    inverted_salary["max_salary"] = json!(40000);
    assert_eq!(send(inverted_salary).await, StatusCode::BAD_REQUEST);

    // Labels outside the sticky vocabulary never reach the service; the
    // decoder rejects the body outright.
    let unknown_sticky = listing_body("Acme", "forever");
    assert_eq!(send(unknown_sticky).await, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn registration_conflicts_and_user_deletion() {
    init_test_config();
    let app = app(test_pool().await);

    let resp = app
        .clone()
        .oneshot(post_json("/api/users", &register_body("dup@example.com")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    assert!(created.get("password").is_none());
    let user_id = created["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(post_json("/api/users", &register_body("dup@example.com")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users?id={}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users?id={}", user_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    init_test_config();
    let app = app(test_pool().await);
    let _ = register_and_login(&app, "creds@example.com").await;

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "email": "creds@example.com", "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "email": "nobody@example.com", "password": "correct-horse" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
