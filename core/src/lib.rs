//! Client gateway for the todo service.
//!
//! # Overview
//! `TodoClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern). `Gateway` is the
//! default host: a blocking `ureq` executor that pairs each build with its
//! parse, so callers get one method per API route.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Any non-2xx response becomes an `ApiError` whose message is the server's
//!   `error` field when present, otherwise a per-operation fallback.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod gateway;
pub mod http;
pub mod types;

pub use client::{Operation, TodoClient};
pub use error::ApiError;
pub use gateway::Gateway;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateRecord, Record, UpdateRecord};
