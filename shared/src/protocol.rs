use crate::{Car, UserSummary};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the API base URL. Includes the query string if any.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl ApiRequest for SignupRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/signup".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// Informational only. A `user` that does not decode is dropped instead of failing the login.
    #[serde(default, deserialize_with = "lenient_user")]
    pub user: Option<UserSummary>,
}

fn lenient_user<'de, D>(deserializer: D) -> Result<Option<UserSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// =========================================================
// Cars
// =========================================================

pub const CARS_PATH: &str = "/api/cars";

/// List cars, filtered server-side by `search`. An empty term lists everything.
#[derive(Debug, Clone, Default)]
pub struct ListCarsRequest {
    pub search: String,
}

impl ApiRequest for ListCarsRequest {
    type Response = Vec<Car>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}?search={}", CARS_PATH, encode_component(&self.search))
    }
}

/// Create a car from a multipart payload
#[derive(Debug, Clone, Default)]
pub struct CreateCarRequest;

impl ApiRequest for CreateCarRequest {
    // The created record is not read back; the list is refetched instead.
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        CARS_PATH.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCarRequest {
    pub id: String,
}

impl ApiRequest for UpdateCarRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", CARS_PATH, encode_component(&self.id))
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCarRequest {
    pub id: String,
}

impl ApiRequest for DeleteCarRequest {
    // The server may answer with an empty body; success is all that matters.
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", CARS_PATH, encode_component(&self.id))
    }
}

/// Percent-encodes a query/path component with the same unreserved set as
/// JavaScript's `encodeURIComponent`.
pub fn encode_component(input: &str) -> String {
    const UNRESERVED: &[u8] = b"-_.!~*'()";
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || UNRESERVED.contains(&byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_path_passes_search_through() {
        let req = ListCarsRequest {
            search: "Honda".to_string(),
        };
        assert_eq!(req.path(), "/api/cars?search=Honda");
    }

    #[test]
    fn test_list_path_with_empty_search() {
        assert_eq!(ListCarsRequest::default().path(), "/api/cars?search=");
    }

    #[test]
    fn test_encode_component_matches_encode_uri_component() {
        assert_eq!(encode_component("Honda Civic"), "Honda%20Civic");
        assert_eq!(encode_component("a&b=c/d?"), "a%26b%3Dc%2Fd%3F");
        assert_eq!(encode_component("(it's)!*~._-"), "(it's)!*~._-");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_item_paths() {
        let update = UpdateCarRequest { id: "64f0".into() };
        let delete = DeleteCarRequest { id: "64f0".into() };
        assert_eq!(update.path(), "/api/cars/64f0");
        assert_eq!(delete.path(), "/api/cars/64f0");
        assert_eq!(UpdateCarRequest::METHOD, HttpMethod::Put);
        assert_eq!(DeleteCarRequest::METHOD, HttpMethod::Delete);
    }

    #[test]
    fn test_auth_response_tolerates_unexpected_user_shapes() {
        let both_ids: AuthResponse = serde_json::from_value(serde_json::json!({
            "token": "t",
            "user": { "_id": "u", "id": "u", "email": "a@b.com" }
        }))
        .unwrap();
        assert_eq!(both_ids.user.and_then(|u| u.id).as_deref(), Some("u"));

        let odd: AuthResponse = serde_json::from_value(serde_json::json!({
            "token": "t",
            "user": "u"
        }))
        .unwrap();
        assert_eq!(odd.token, "t");
        assert!(odd.user.is_none());
    }
}
