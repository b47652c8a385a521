//! Blocking executor for `TodoClient` requests.
//!
//! `Gateway` is the host side of the host-does-IO split: it sends each
//! `HttpRequest` with `ureq`, hands the raw response back to the client's
//! parser, and never retries. Non-2xx statuses are returned as data by the
//! agent so that status interpretation stays in one place.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateRecord, Record, UpdateRecord};

#[derive(Debug, Clone)]
pub struct Gateway {
    client: TodoClient,
    agent: ureq::Agent,
}

impl Gateway {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            client: TodoClient::new(base_url),
            agent,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    /// Perform one round-trip. Only transport failures are errors here.
    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), path = %req.path, "sending request");
        let content_type = req
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| "application/json".to_string());

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type(content_type)
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }

    pub fn list_records(&self) -> Result<Vec<Record>, ApiError> {
        let resp = self.execute(self.client.build_list_records())?;
        self.client.parse_list_records(resp)
    }

    pub fn get_record(&self, id: i64) -> Result<Record, ApiError> {
        let resp = self.execute(self.client.build_get_record(id))?;
        self.client.parse_get_record(resp)
    }

    pub fn create_record(&self, input: &CreateRecord) -> Result<Record, ApiError> {
        let resp = self.execute(self.client.build_create_record(input)?)?;
        self.client.parse_create_record(resp)
    }

    pub fn update_record(&self, id: i64, input: &UpdateRecord) -> Result<Record, ApiError> {
        let resp = self.execute(self.client.build_update_record(id, input)?)?;
        self.client.parse_update_record(resp)
    }

    pub fn delete_record(&self, id: i64) -> Result<(), ApiError> {
        let resp = self.execute(self.client.build_delete_record(id))?;
        self.client.parse_delete_record(resp)
    }
}
