//! HTTP handlers for the record API.
//!
//! Handlers parse and validate the request, make a single service call, and
//! translate the outcome into a status code. Every failure leaves through
//! [`HandlerError`], which renders the `{ "error": ... }` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::service::RecordService;
use crate::types::{CreateRecord, DeleteConfirmation, Record, UpdateRecord};

/// Record routes, relative to the `/api` mount point.
pub fn api_routes(service: RecordService) -> Router {
    Router::new()
        .route("/todos", get(list_records).post(create_record))
        .route(
            "/todos/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .fallback(unknown_route)
        .with_state(service)
}

/// Development-mode landing document at `GET /`.
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "todo list API is running",
        "endpoints": {
            "GET /api/todos": "list every record",
            "GET /api/todos/{id}": "fetch one record",
            "POST /api/todos": "create a record",
            "PUT /api/todos/{id}": "update a record",
            "DELETE /api/todos/{id}": "delete a record",
        },
        "note": "in development the UI runs as a separate process",
    }))
}

fn parse_id(raw: &str) -> Result<i64, HandlerError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| HandlerError::BadRequest("invalid id".to_string()))
}

fn read_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| HandlerError::BadRequest(rejection.body_text()))
}

async fn create_record(
    State(service): State<RecordService>,
    body: Result<Json<CreateRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<Record>), HandlerError> {
    let input = read_body(body)?;
    let record = service.create(input).await?;
    tracing::info!(id = record.id, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_records(State(service): State<RecordService>) -> Result<Json<Vec<Record>>, HandlerError> {
    Ok(Json(service.list().await?))
}

async fn get_record(
    State(service): State<RecordService>,
    Path(id): Path<String>,
) -> Result<Json<Record>, HandlerError> {
    let id = parse_id(&id)?;
    service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(HandlerError::record_not_found)
}

async fn update_record(
    State(service): State<RecordService>,
    Path(id): Path<String>,
    body: Result<Json<UpdateRecord>, JsonRejection>,
) -> Result<Json<Record>, HandlerError> {
    let id = parse_id(&id)?;
    let patch = read_body(body)?;
    service
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or_else(HandlerError::record_not_found)
}

async fn delete_record(
    State(service): State<RecordService>,
    Path(id): Path<String>,
) -> Result<Json<DeleteConfirmation>, HandlerError> {
    let id = parse_id(&id)?;
    if !service.delete_by_id(id).await? {
        return Err(HandlerError::record_not_found());
    }
    tracing::info!(id, "record deleted");
    Ok(Json(DeleteConfirmation {
        message: "record deleted".to_string(),
    }))
}

async fn unknown_route() -> HandlerError {
    HandlerError::NotFound("route not found".to_string())
}
