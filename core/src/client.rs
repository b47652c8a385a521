//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping this module
//! deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateRecord, Record, UpdateRecord};

/// The five API operations, used to pick a fallback error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::List => "failed to fetch records",
            Operation::Get => "failed to fetch record",
            Operation::Create => "failed to create record",
            Operation::Update => "failed to update record",
            Operation::Delete => "failed to delete record",
        }
    }
}

/// Synchronous, stateless client for the todo API.
///
/// `base_url` is the API root, e.g. `http://localhost:3000/api`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_records(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_record(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_record(&self, input: &CreateRecord) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/todos", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_record(&self, id: i64, input: &UpdateRecord) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/todos/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_record(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/todos/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Record>, ApiError> {
        parse_json(response, Operation::List)
    }

    pub fn parse_get_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        parse_json(response, Operation::Get)
    }

    pub fn parse_create_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        parse_json(response, Operation::Create)
    }

    pub fn parse_update_record(&self, response: HttpResponse) -> Result<Record, ApiError> {
        parse_json(response, Operation::Update)
    }

    pub fn parse_delete_record(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, Operation::Delete)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, op: Operation) -> Result<T, ApiError> {
    check_status(&response, op)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Map a non-2xx response to an `ApiError`, preferring the server's message.
fn check_status(response: &HttpResponse, op: Operation) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error)
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| op.fallback_message().to_string());
    if response.status == 404 {
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD_JSON: &str = r#"{"id":1,"title":"Test","description":null,"completed":false,"createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}"#;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_records_produces_correct_request() {
        let req = client().build_list_records();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_record_produces_correct_request() {
        let req = client().build_get_record(7);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/todos/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_record_produces_correct_request() {
        let input = CreateRecord {
            title: "Buy milk".to_string(),
            description: Some("two litres".to_string()),
            completed: Some(false),
        };
        let req = client().build_create_record(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "two litres");
        assert_eq!(body["completed"], false);
    }

    #[test]
    fn build_update_record_omits_unset_fields() {
        let input = UpdateRecord {
            completed: Some(true),
            ..Default::default()
        };
        let req = client().build_update_record(3, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/todos/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"completed": true}));
    }

    #[test]
    fn build_delete_record_produces_correct_request() {
        let req = client().build_delete_record(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_records_success() {
        let body = format!("[{RECORD_JSON}]");
        let records = client().parse_list_records(response(200, &body)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Test");
        assert!(records[0].description.is_none());
    }

    #[test]
    fn parse_list_records_failure_uses_fallback() {
        let err = client().parse_list_records(response(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(err.to_string(), "failed to fetch records");
    }

    #[test]
    fn parse_get_record_not_found_uses_server_message() {
        let err = client()
            .parse_get_record(response(404, r#"{"error":"record not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.to_string(), "record not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn parse_create_record_success() {
        let record = client().parse_create_record(response(201, RECORD_JSON)).unwrap();
        assert_eq!(record.id, 1);
        assert!(!record.completed);
    }

    #[test]
    fn parse_create_record_surfaces_validation_message() {
        let err = client()
            .parse_create_record(response(400, r#"{"error":"title is required"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn parse_create_record_non_json_error_body() {
        let err = client()
            .parse_create_record(response(502, "<html>bad gateway</html>"))
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to create record");
    }

    #[test]
    fn parse_update_record_success() {
        let body = RECORD_JSON.replace(r#""completed":false"#, r#""completed":true"#);
        let record = client().parse_update_record(response(200, &body)).unwrap();
        assert!(record.completed);
    }

    #[test]
    fn parse_update_record_json_without_error_field() {
        let err = client()
            .parse_update_record(response(500, r#"{"detail":"x"}"#))
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to update record");
    }

    #[test]
    fn parse_delete_record_success() {
        let resp = response(200, r#"{"message":"record deleted"}"#);
        assert!(client().parse_delete_record(resp).is_ok());
    }

    #[test]
    fn parse_delete_record_not_found() {
        let err = client()
            .parse_delete_record(response(404, r#"{"error":"record not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/api/");
        let req = client.build_list_records();
        assert_eq!(req.path, "http://localhost:3000/api/todos");
    }

    #[test]
    fn parse_list_records_bad_json() {
        let err = client().parse_list_records(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
