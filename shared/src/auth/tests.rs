use super::*;
use crate::client::{MockHttpClient, RequestBody};
use crate::protocol::HttpMethod;
use crate::session::MemoryTokenStore;
use serde_json::json;

const LOGIN_URL: &str = "http://api.test/api/auth/login";
const SIGNUP_URL: &str = "http://api.test/api/auth/signup";

fn gateway() -> AuthGateway<MockHttpClient> {
    AuthGateway::new(MockHttpClient::new(), "http://api.test")
}

#[tokio::test]
async fn test_login_success_persists_server_token() {
    let gw = gateway();
    gw.client.mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({ "token": "jwt-abc", "user": { "_id": "u1", "email": "a@b.com" } }),
    );
    let store = MemoryTokenStore::new();

    let session = gw.login(&store, "a@b.com", "pw").await.unwrap();

    assert_eq!(store.load().as_deref(), Some("jwt-abc"));
    assert_eq!(session.token(), Some("jwt-abc"));
    assert!(session.is_authenticated());
    assert_eq!(
        session.user.and_then(|u| u.email).as_deref(),
        Some("a@b.com")
    );

    let req = gw.client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Authorization"), None);
    let RequestBody::Json(body) = req.body else {
        panic!("expected json body");
    };
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({ "email": "a@b.com", "password": "pw" }));
}

#[tokio::test]
async fn test_login_accepts_user_with_both_id_keys() {
    let gw = gateway();
    gw.client.mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        200,
        json!({ "token": "t", "user": { "_id": "u", "id": "u" } }),
    );
    let store = MemoryTokenStore::new();

    let session = gw.login(&store, "a@b.com", "pw").await.unwrap();

    assert_eq!(store.load().as_deref(), Some("t"));
    assert_eq!(session.user.and_then(|u| u.id).as_deref(), Some("u"));
}

#[tokio::test]
async fn test_login_with_empty_token_is_rejected() {
    let gw = gateway();
    gw.client
        .mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({ "token": "" }));
    let store = MemoryTokenStore::with_token("old");

    let err = gw.login(&store, "a@b.com", "pw").await.unwrap_err();

    assert_eq!(err.kind, ClientErrorKind::Auth);
    assert_eq!(err.message(), "Login failed");
    assert_eq!(store.load().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_login_failure_leaves_token_untouched() {
    let gw = gateway();
    gw.client.mock_response(
        HttpMethod::Post,
        LOGIN_URL,
        401,
        json!({ "message": "Invalid credentials" }),
    );
    let store = MemoryTokenStore::new();

    let err = gw.login(&store, "a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.kind, ClientErrorKind::Auth);
    assert_eq!(err.message(), "Login failed");
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_login_failure_keeps_previous_token() {
    let gw = gateway();
    gw.client
        .mock_raw(HttpMethod::Post, LOGIN_URL, 500, "Internal Server Error");
    let store = MemoryTokenStore::with_token("old");

    assert!(gw.login(&store, "a@b.com", "pw").await.is_err());
    assert_eq!(store.load().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_login_network_error_is_same_generic_error() {
    let gw = gateway();
    gw.client.mock_network_failure(HttpMethod::Post, LOGIN_URL);
    let store = MemoryTokenStore::new();

    let err = gw.login(&store, "a@b.com", "pw").await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Auth);
    assert_eq!(err.message(), "Login failed");
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_login_success_without_token_field_fails() {
    let gw = gateway();
    gw.client
        .mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({ "user": {} }));
    let store = MemoryTokenStore::new();

    let err = gw.login(&store, "a@b.com", "pw").await.unwrap_err();
    assert_eq!(err.message(), "Login failed");
    assert_eq!(store.load(), None);
}

#[tokio::test]
async fn test_signup_sends_name_and_tolerates_missing_user() {
    let gw = gateway();
    gw.client
        .mock_response(HttpMethod::Post, SIGNUP_URL, 201, json!({ "token": "t2" }));
    let store = MemoryTokenStore::new();

    let session = gw.signup(&store, "c@d.com", "pw", "Cee").await.unwrap();

    assert_eq!(session.token(), Some("t2"));
    assert!(session.user.is_none());
    assert_eq!(store.load().as_deref(), Some("t2"));

    let RequestBody::Json(body) = gw.client.last_request().unwrap().body else {
        panic!("expected json body");
    };
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["name"], "Cee");
}

#[tokio::test]
async fn test_signup_failure_message() {
    let gw = gateway();
    gw.client.mock_response(
        HttpMethod::Post,
        SIGNUP_URL,
        409,
        json!({ "message": "exists" }),
    );
    let store = MemoryTokenStore::new();

    let err = gw.signup(&store, "c@d.com", "pw", "Cee").await.unwrap_err();
    assert_eq!(err.message(), "Signup failed");
    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn test_logout_clears_token_without_network() {
    let gw = gateway();
    let store = MemoryTokenStore::with_token("jwt-abc");

    let session = gw.logout(&store);

    assert!(!session.is_authenticated());
    assert_eq!(store.load(), None);
    assert_eq!(gw.client.request_count(), 0);
}
