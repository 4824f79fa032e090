use super::*;
use crate::client::{FormPart, MockHttpClient, RequestBody};
use crate::payload::ImageFiles;
use crate::protocol::HttpMethod;
use crate::remove_car;
use crate::tags::TagSet;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn repo() -> CarRepository<MockHttpClient> {
    CarRepository::new(MockHttpClient::new(), format!("{}/", BASE), "tok-123")
}

fn three_cars() -> serde_json::Value {
    json!([
        { "_id": "1", "title": "Honda", "description": "civic", "tags": ["jp"], "images": ["u1"] },
        { "_id": "2", "title": "Ford", "description": "focus", "tags": [], "images": [] },
        { "_id": "3", "title": "BMW", "description": "e30", "tags": ["de"], "images": ["u3", "u4"] }
    ])
}

fn payload(files: Vec<String>) -> CarPayload<String> {
    let mut tags = TagSet::new();
    tags.add("jp");
    CarPayload::builder()
        .title("Civic")
        .description("blue")
        .tags(tags)
        .images(ImageFiles::new(files).unwrap())
        .build()
        .unwrap()
}

// =========================================================
// list
// =========================================================

#[tokio::test]
async fn test_list_sends_bearer_and_search_term() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Get,
        "http://api.test/api/cars?search=Honda",
        200,
        json!([{ "_id": "1", "title": "Honda", "description": "civic" }]),
    );

    let cars = repo.list("Honda").await.unwrap();

    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].title, "Honda");

    let req = repo.client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.url, "http://api.test/api/cars?search=Honda");
    assert_eq!(req.header("Authorization"), Some("Bearer tok-123"));
    assert_eq!(req.body, RequestBody::Empty);
}

#[tokio::test]
async fn test_list_with_empty_search_returns_everything() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Get,
        "http://api.test/api/cars?search=",
        200,
        three_cars(),
    );

    let cars = repo.list("").await.unwrap();
    assert_eq!(cars.len(), 3);
}

#[tokio::test]
async fn test_list_url_encodes_search() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Get,
        "http://api.test/api/cars?search=red%20%26%20fast",
        200,
        json!([]),
    );

    let cars = repo.list("red & fast").await.unwrap();
    assert!(cars.is_empty());
    assert_eq!(repo.client.request_count(), 1);
}

#[tokio::test]
async fn test_list_non_success_is_generic_fetch_error() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Get,
        "http://api.test/api/cars?search=",
        401,
        json!({ "message": "jwt expired" }),
    );

    let err = repo.list("").await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Fetch);
    assert_eq!(err.message(), "Failed to fetch cars");
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_list_network_error_looks_like_http_error() {
    let repo = repo();
    repo.client
        .mock_network_failure(HttpMethod::Get, "http://api.test/api/cars?search=");

    let err = repo.list("").await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Fetch);
    assert_eq!(err.message(), "Failed to fetch cars");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_list_malformed_body_is_fetch_error() {
    let repo = repo();
    repo.client
        .mock_raw(HttpMethod::Get, "http://api.test/api/cars?search=", 200, "<html>");

    let err = repo.list("").await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Fetch);
    assert_eq!(err.message(), "Failed to fetch cars");
}

// =========================================================
// create / update
// =========================================================

#[tokio::test]
async fn test_create_posts_multipart() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Post,
        "http://api.test/api/cars",
        201,
        json!({ "_id": "9", "title": "Civic", "description": "blue" }),
    );

    repo.create(payload(vec!["a.jpg".into(), "b.jpg".into()]))
        .await
        .unwrap();

    let req = repo.client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.header("Authorization"), Some("Bearer tok-123"));
    assert_eq!(req.header("Content-Type"), None);

    let RequestBody::Multipart(parts) = req.body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 5);
    assert_eq!(
        parts[2],
        FormPart::Text {
            name: "tags",
            value: r#"["jp"]"#.to_string()
        }
    );
    assert_eq!(
        parts[4],
        FormPart::File {
            name: "images",
            file: "b.jpg".to_string()
        }
    );
}

#[tokio::test]
async fn test_create_failure_is_generic_save_error() {
    let repo = repo();
    repo.client
        .mock_raw(HttpMethod::Post, "http://api.test/api/cars", 500, "boom");

    let err = repo.create(payload(vec![])).await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Save);
    assert_eq!(err.message(), "Failed to save car");
}

#[tokio::test]
async fn test_update_puts_to_record_endpoint() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Put,
        "http://api.test/api/cars/2",
        200,
        json!({ "_id": "2", "title": "Civic", "description": "blue" }),
    );

    repo.update("2", payload(vec![])).await.unwrap();

    let req = repo.client.last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.url, "http://api.test/api/cars/2");
    assert!(matches!(req.body, RequestBody::Multipart(ref parts) if parts.len() == 3));
}

#[tokio::test]
async fn test_update_network_failure_is_save_error() {
    let repo = repo();
    repo.client
        .mock_network_failure(HttpMethod::Put, "http://api.test/api/cars/2");

    let err = repo.update("2", payload(vec![])).await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Save);
    assert_eq!(err.message(), "Failed to save car");
}

// =========================================================
// delete
// =========================================================

#[tokio::test]
async fn test_delete_then_local_removal_without_refetch() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Get,
        "http://api.test/api/cars?search=",
        200,
        three_cars(),
    );
    repo.client
        .mock_raw(HttpMethod::Delete, "http://api.test/api/cars/2", 204, "");

    let mut cars = repo.list("").await.unwrap();
    repo.delete("2").await.unwrap();
    remove_car(&mut cars, "2");

    assert!(cars.iter().all(|c| c.id != "2"));
    assert_eq!(cars.len(), 2);

    // 只有一次 GET 和一次 DELETE
    let requests = repo.client.requests.borrow();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].header("Authorization"), Some("Bearer tok-123"));
}

#[tokio::test]
async fn test_delete_failure_is_generic_delete_error() {
    let repo = repo();
    repo.client.mock_response(
        HttpMethod::Delete,
        "http://api.test/api/cars/2",
        404,
        json!({ "message": "not found" }),
    );

    let err = repo.delete("2").await.unwrap_err();
    assert_eq!(err.kind, ClientErrorKind::Delete);
    assert_eq!(err.message(), "Failed to delete car");
    assert_eq!(err.status(), Some(404));
}
