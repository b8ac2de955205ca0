use std::collections::HashMap;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

use brewops_api::app::{AppServices, build_router};
use brewops_api::config::ApiConfig;
use brewops_auth::Argon2Hasher;

const JWT_SECRET: &str = "black-box-test-secret-0123456789abcdef";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let env: HashMap<&str, &str> = HashMap::from([("JWT_SECRET", JWT_SECRET)]);
        let config = ApiConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()))
            .expect("valid test config");

        // Same router as prod over in-memory stores, with a cheap hasher.
        let services = AppServices::in_memory(
            &config,
            Argon2Hasher::insecure_fast().expect("hasher params"),
        );
        let app = build_router(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap()
    }

    async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap()
    }

    async fn token_for(&self, username: &str) -> String {
        let res = self.register(username, "pw").await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn post_json(&self, path: &str, token: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn get(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Serialize)]
struct ForgedClaims<'a> {
    sub: &'a str,
    iat: i64,
    exp: i64,
}

fn mint_jwt(secret: &str, sub: &str, exp_offset: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = ForgedClaims {
        sub,
        iat: now.timestamp(),
        exp: (now + exp_offset).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn assert_unauthorized(res: reqwest::Response) {
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.headers()
            .get(reqwest::header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_login_and_wrong_password() {
    let srv = TestServer::spawn().await;

    let res = srv.register("alice", "pw1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");
    let token_a = body["access_token"].as_str().unwrap().to_string();

    let res = srv.login("alice", "pw1").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let token_b = body["access_token"].as_str().unwrap().to_string();

    for token in [&token_a, &token_b] {
        let res = srv.get("/me", token).await;
        assert_eq!(res.status(), StatusCode::OK);
        let me: serde_json::Value = res.json().await.unwrap();
        assert_eq!(me["username"], "alice");
    }

    assert_unauthorized(srv.login("alice", "wrong").await).await;
    assert_unauthorized(srv.login("nobody", "pw1").await).await;
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let srv = TestServer::spawn().await;
    assert_eq!(srv.register("alice", "pw1").await.status(), StatusCode::OK);

    let res = srv.register("alice", "other").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn blank_username_is_a_validation_error() {
    let srv = TestServer::spawn().await;
    let res = srv.register("   ", "pw").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let srv = TestServer::spawn().await;

    for path in ["/me", "/breweries", "/batches", "/remaining_volume?batch_id=1"] {
        let res = srv.client.get(srv.url(path)).send().await.unwrap();
        assert_unauthorized(res).await;
    }

    let res = srv
        .client
        .post(srv.url("/breweries"))
        .json(&json!({ "name": "Sneaky" }))
        .send()
        .await
        .unwrap();
    assert_unauthorized(res).await;
}

#[tokio::test]
async fn rejected_writes_leave_no_trace() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("owner").await;

    let res = srv
        .post_json(
            "/beer_types",
            &token,
            json!({ "name": "Helles", "type": "lager", "alcohol_content": 4.8 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let beer_type: serde_json::Value = res.json().await.unwrap();

    let res = srv
        .client
        .post(srv.url("/breweries"))
        .json(&json!({ "name": "Sneaky", "location": "Nowhere", "establishment_date": "1999-01-01" }))
        .send()
        .await
        .unwrap();
    assert_unauthorized(res).await;

    let res = srv
        .post_json(
            "/batches",
            "not-a-jwt",
            json!({
                "beer_type_id": beer_type["id"],
                "production_date": "2024-03-01",
                "volume": 100.0
            }),
        )
        .await;
    assert_unauthorized(res).await;

    let expired = mint_jwt(JWT_SECRET, "owner", ChronoDuration::seconds(-5));
    let res = srv
        .post_json(
            "/breweries",
            &expired,
            json!({ "name": "Late", "location": "Nowhere", "establishment_date": "1999-01-01" }),
        )
        .await;
    assert_unauthorized(res).await;

    for path in ["/breweries", "/batches"] {
        let res = srv.get(path, &token).await;
        assert_eq!(res.status(), StatusCode::OK);
        let rows: serde_json::Value = res.json().await.unwrap();
        assert_eq!(rows, json!([]), "{path} should be empty");
    }
}

#[tokio::test]
async fn malformed_requests_get_json_errors() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("owner").await;

    async fn assert_validation_error(res: reqwest::Response) {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            res.headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    // Missing field.
    let res = srv
        .client
        .post(srv.url("/register"))
        .json(&json!({ "username": "x" }))
        .send()
        .await
        .unwrap();
    assert_validation_error(res).await;

    // Not JSON at all.
    let res = srv
        .client
        .post(srv.url("/login"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_validation_error(res).await;

    assert_validation_error(srv.get("/remaining_volume?batch_id=abc", &token).await).await;
    assert_validation_error(srv.get("/remaining_volume", &token).await).await;
    assert_validation_error(srv.get("/breweries?limit=-1", &token).await).await;

    let res = srv
        .post_json("/batches", &token, json!({ "beer_type_id": "one", "volume": 1.0 }))
        .await;
    assert_validation_error(res).await;
}

#[tokio::test]
async fn hostile_tokens_are_rejected() {
    let srv = TestServer::spawn().await;
    srv.token_for("alice").await;

    // Wrong secret.
    let forged = mint_jwt("not-the-server-secret", "alice", ChronoDuration::minutes(10));
    assert_unauthorized(srv.get("/me", &forged).await).await;

    // Expired.
    let expired = mint_jwt(JWT_SECRET, "alice", ChronoDuration::seconds(-5));
    assert_unauthorized(srv.get("/me", &expired).await).await;

    // Correctly signed, but the subject was never registered.
    let ghost = mint_jwt(JWT_SECRET, "ghost", ChronoDuration::minutes(10));
    assert_unauthorized(srv.get("/me", &ghost).await).await;

    // Garbage and `alg: none`.
    assert_unauthorized(srv.get("/me", "not-a-jwt").await).await;
    let unsigned = format!(
        "{}.{}.",
        "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0",
        "eyJzdWIiOiJhbGljZSIsImlhdCI6MCwiZXhwIjo5OTk5OTk5OTk5fQ"
    );
    assert_unauthorized(srv.get("/me", &unsigned).await).await;

    // A server-signed token for a registered subject still works.
    let good = mint_jwt(JWT_SECRET, "alice", ChronoDuration::minutes(10));
    assert_eq!(srv.get("/me", &good).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn remaining_volume_reflects_recorded_sales() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("brewer").await;

    let res = srv
        .post_json(
            "/beer_types",
            &token,
            json!({ "name": "Helles", "type": "lager", "alcohol_content": 4.8 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let beer_type: serde_json::Value = res.json().await.unwrap();
    assert_eq!(beer_type["type"], "lager");

    let res = srv
        .post_json(
            "/batches",
            &token,
            json!({
                "beer_type_id": beer_type["id"],
                "production_date": "2024-03-01",
                "volume": 100.0
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let batch: serde_json::Value = res.json().await.unwrap();
    let batch_id = batch["id"].as_i64().unwrap();

    for qty in [20.0, 30.0] {
        let res = srv
            .post_json(
                "/sales",
                &token,
                json!({
                    "batch_id": batch_id,
                    "sale_date": "2024-03-02",
                    "quantity": qty,
                    "price": 4.5
                }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = srv
        .get(&format!("/remaining_volume?batch_id={batch_id}"), &token)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["remaining_volume"].as_f64(), Some(50.0));

    let res = srv.get("/batches", &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let rows: serde_json::Value = res.json().await.unwrap();
    assert_eq!(rows[0]["beer_type_name"], "Helles");
    assert_eq!(rows[0]["initial_volume"].as_f64(), Some(100.0));
    assert_eq!(rows[0]["remaining_volume"].as_f64(), Some(50.0));

    for missing in ["999", "0", "-3"] {
        let res = srv
            .get(&format!("/remaining_volume?batch_id={missing}"), &token)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "batch_id={missing}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn batch_and_sale_references_must_exist() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("brewer").await;

    let res = srv
        .post_json(
            "/batches",
            &token,
            json!({ "beer_type_id": 42, "production_date": "2024-03-01", "volume": 10.0 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = srv
        .post_json(
            "/sales",
            &token,
            json!({ "batch_id": 42, "sale_date": "2024-03-01", "quantity": 1.0, "price": 1.0 }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn brewery_lifecycle_with_paging() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("owner").await;

    let mut ids = Vec::new();
    for name in ["North", "South", "East"] {
        let res = srv
            .post_json(
                "/breweries",
                &token,
                json!({ "name": name, "location": "Somewhere", "establishment_date": "1999-01-01" }),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: serde_json::Value = res.json().await.unwrap();
        ids.push(created["id"].as_i64().unwrap());
    }

    let res = srv.get("/breweries?skip=1&limit=1", &token).await;
    let page: serde_json::Value = res.json().await.unwrap();
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["name"], "South");

    let delete = |id: i64| {
        srv.client
            .delete(srv.url(&format!("/breweries/{id}")))
            .bearer_auth(&token)
            .send()
    };
    assert_eq!(delete(ids[0]).await.unwrap().status(), StatusCode::OK);
    assert_eq!(delete(ids[0]).await.unwrap().status(), StatusCode::NOT_FOUND);

    let res = srv.get("/breweries", &token).await;
    let all: serde_json::Value = res.json().await.unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ingredients_can_be_created_and_listed() {
    let srv = TestServer::spawn().await;
    let token = srv.token_for("owner").await;

    let res = srv
        .post_json("/ingredients", &token, json!({ "name": "Cascade", "type": "hop" }))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = srv.get("/ingredients", &token).await;
    let all: serde_json::Value = res.json().await.unwrap();
    assert_eq!(all[0]["name"], "Cascade");
    assert_eq!(all[0]["type"], "hop");
}
