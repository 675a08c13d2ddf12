//! Drives the router in-process over an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tcc_auth::decode::decode_unverified;
use tcc_auth::password::hash_password;
use tcc_auth::TokenKeys;
use tcc_config::TccConfig;
use tcc_core::entities::User;
use tcc_core::enums::Role;
use tcc_core::responses::DashboardStats;
use tcc_db::service::TccService;
use tcc_server::{AppState, build_router};
use tower::ServiceExt;

const SECRET: &[u8] = b"api-flow-secret";
const ADMIN_EMAIL: &str = "admin@tcc.local";
const ADMIN_PASSWORD: &str = "admin-pass";

struct TestApp {
    router: Router,
    keys: TokenKeys,
    admin: User,
}

struct Reply {
    status: StatusCode,
    request_id: Option<String>,
    body: Value,
}

async fn test_app() -> TestApp {
    let service = TccService::in_memory().await.unwrap();
    let hash = hash_password(ADMIN_PASSWORD, 4).unwrap();
    let admin = service
        .create_user("Admin", ADMIN_EMAIL, &hash, Role::Admin, None)
        .await
        .unwrap();

    let mut config = TccConfig::default();
    config.auth.bcrypt_cost = 4;
    let keys = TokenKeys::new(SECRET, "tcc", TimeDelta::hours(1));
    let state = AppState::new(
        service,
        TokenKeys::new(SECRET, "tcc", TimeDelta::hours(1)),
        config,
    );
    TestApp {
        router: build_router(state),
        keys,
        admin,
    }
}

impl TestApp {
    fn admin_token(&self) -> String {
        self.keys.issue(&self.admin).unwrap()
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        Reply {
            status,
            request_id,
            body,
        }
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> Reply {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    async fn get(&self, uri: &str, token: &str) -> Reply {
        self.send(Method::GET, uri, Some(token), None).await
    }
}

#[tokio::test]
async fn health_is_public_and_tagged_with_request_id() {
    let app = test_app().await;
    let reply = app.send(Method::GET, "/", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, json!({ "message": "TCC Backend API is running!" }));
    assert!(reply.request_id.unwrap().starts_with("req-"));
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let app = test_app().await;
    let reply = app.send(Method::GET, "/api/dashboard/stats", None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(reply.body["message"].is_string());

    let reply = app
        .send(Method::GET, "/api/branches", Some("not.a.jwt"), None)
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401() {
    let app = test_app().await;
    let expired = app
        .keys
        .issue_at(&app.admin, Utc::now() - TimeDelta::hours(2))
        .unwrap();
    let reply = app.get("/api/trucks", &expired).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_returns_token_for_the_right_identity() {
    let app = test_app().await;
    let reply = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "ADMIN@tcc.local", "password": ADMIN_PASSWORD })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["user"]["email"], ADMIN_EMAIL);

    let token = reply.body["token"].as_str().unwrap();
    let verified = app.keys.verify(token).unwrap().to_identity();
    let unverified = decode_unverified(token).unwrap().to_identity();
    assert_eq!(verified, unverified);
    assert_eq!(verified.user_id, app.admin.id);
    assert_eq!(verified.role, Role::Admin);

    let me = app.get("/api/auth/me", token).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], app.admin.id.as_str());
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let app = test_app().await;
    let reply = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "nope-nope" })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Invalid email or password");
}

#[tokio::test]
async fn register_creates_user_role_and_rejects_duplicates() {
    let app = test_app().await;
    let body = json!({ "name": "Priya", "email": "priya@tcc.local", "password": "secret-1" });
    let reply = app
        .send(Method::POST, "/api/auth/register", None, Some(body.clone()))
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["user"]["role"], "user");
    assert!(reply.body["token"].is_string());

    let again = app
        .send(Method::POST, "/api/auth/register", None, Some(body))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_management_requires_admin() {
    let app = test_app().await;
    let admin = app.admin_token();

    let created = app
        .post(
            "/api/users",
            &admin,
            json!({ "name": "Op", "email": "op@tcc.local", "password": "op-pass", "role": "user" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let login = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "op@tcc.local", "password": "op-pass" })),
        )
        .await;
    let user_token = login.body["token"].as_str().unwrap().to_string();

    assert_eq!(app.get("/api/users", &user_token).await.status, StatusCode::FORBIDDEN);
    let listed = app.get("/api/users", &admin).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 2);

    let last_admin = app
        .send(
            Method::DELETE,
            &format!("/api/users/{}", app.admin.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(last_admin.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn dispatch_workflow_and_dashboard() {
    let app = test_app().await;
    let token = app.admin_token();

    let pune = app
        .post("/api/branches", &token, json!({ "name": "Pune", "location": "MH" }))
        .await;
    assert_eq!(pune.status, StatusCode::CREATED);
    let pune_id = pune.body["id"].as_str().unwrap().to_string();

    let truck = app
        .post(
            "/api/trucks",
            &token,
            json!({ "registrationNumber": "mh12ab1234", "branchId": pune_id, "capacityKg": 9000 }),
        )
        .await;
    assert_eq!(truck.status, StatusCode::CREATED);
    assert_eq!(truck.body["registrationNumber"], "MH12AB1234");
    assert_eq!(truck.body["isAvailable"], true);
    let truck_id = truck.body["id"].as_str().unwrap().to_string();

    let mut consignment_ids = Vec::new();
    for _ in 0..2 {
        let c = app
            .post(
                "/api/consignments",
                &token,
                json!({
                    "originBranchId": pune_id,
                    "destinationBranchId": pune_id,
                    "senderName": "Acme",
                    "receiverName": "Bright",
                    "weightKg": 75.5
                }),
            )
            .await;
        assert_eq!(c.status, StatusCode::CREATED);
        assert_eq!(c.body["status"], "pending");
        consignment_ids.push(c.body["id"].as_str().unwrap().to_string());
    }

    let dispatched = app
        .post(
            "/api/dispatch",
            &token,
            json!({ "consignmentId": consignment_ids[0], "truckId": truck_id }),
        )
        .await;
    assert_eq!(dispatched.status, StatusCode::OK);
    assert_eq!(dispatched.body["status"], "dispatched");

    let busy = app
        .post(
            "/api/dispatch",
            &token,
            json!({ "consignmentId": consignment_ids[1], "truckId": truck_id }),
        )
        .await;
    assert_eq!(busy.status, StatusCode::CONFLICT);

    let stats = app.get("/api/dashboard/stats", &token).await;
    assert_eq!(stats.status, StatusCode::OK);
    let stats: DashboardStats = serde_json::from_value(stats.body).unwrap();
    assert_eq!(stats.total_trucks, 1);
    assert_eq!(stats.available_trucks, 0);
    assert_eq!(stats.total_branches, 1);
    assert_eq!(stats.total_consignments, 2);
    assert_eq!(stats.pending_consignments, 1);
    assert_eq!(stats.dispatched_consignments, 1);
    assert_eq!(stats.recent_activity.len(), 5);

    let delivered = app
        .send(
            Method::PUT,
            &format!("/api/dispatch/{}", consignment_ids[0]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(delivered.body["status"], "delivered");
    let truck = app.get(&format!("/api/trucks/{truck_id}"), &token).await;
    assert_eq!(truck.body["isAvailable"], true);
}

#[tokio::test]
async fn created_consignment_shows_in_activity() {
    let app = test_app().await;
    let token = app.admin_token();
    let branch = app
        .post("/api/branches", &token, json!({ "name": "Agra", "location": "UP" }))
        .await;
    let branch_id = branch.body["id"].as_str().unwrap();
    let c = app
        .post(
            "/api/consignments",
            &token,
            json!({
                "originBranchId": branch_id,
                "destinationBranchId": branch_id,
                "senderName": "S",
                "receiverName": "R"
            }),
        )
        .await;
    let tracking = c.body["trackingNumber"].as_str().unwrap();

    let activity = app.get("/api/activity?limit=1", &token).await;
    assert_eq!(activity.status, StatusCode::OK);
    assert_eq!(activity.body["count"], 1);
    assert_eq!(
        activity.body["data"][0]["details"],
        format!("New consignment {tracking} created")
    );
    assert_eq!(activity.body["data"][0]["userId"], app.admin.id.as_str());

    let tracked = app
        .get(
            &format!("/api/consignments/track/{}", tracking.to_lowercase()),
            &token,
        )
        .await;
    assert_eq!(tracked.status, StatusCode::OK);
    assert_eq!(tracked.body["id"], c.body["id"]);
}

#[tokio::test]
async fn validation_errors_map_to_4xx() {
    let app = test_app().await;
    let token = app.admin_token();

    let bad_reference = app
        .post(
            "/api/consignments",
            &token,
            json!({
                "originBranchId": "brn-00000000",
                "destinationBranchId": "brn-00000000",
                "senderName": "S",
                "receiverName": "R"
            }),
        )
        .await;
    assert_eq!(bad_reference.status, StatusCode::BAD_REQUEST);

    let missing = app.get("/api/branches/brn-00000000", &token).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let malformed = app.post("/api/branches", &token, json!({ "name": 7 })).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert!(malformed.body["message"].is_string());

    let bad_status = app.get("/api/consignments?status=lost", &token).await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_body_matches_schema() {
    let app = test_app().await;
    let reply = app.get("/api/dashboard/stats", &app.admin_token()).await;

    let schema = serde_json::to_value(schemars::schema_for!(DashboardStats)).unwrap();
    let validator = jsonschema::validator_for(&schema).unwrap();
    assert!(validator.is_valid(&reply.body), "{}", reply.body);
}
