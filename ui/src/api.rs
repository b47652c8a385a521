//! The calls the root view makes against the API.
//!
//! `RootView` is generic over this trait so the views can be driven by the
//! real `Gateway` or by an in-memory fake in tests.

use todo_core::{ApiError, CreateRecord, Gateway, Record, UpdateRecord};

pub trait TodoApi {
    fn list_records(&self) -> Result<Vec<Record>, ApiError>;
    fn create_record(&self, input: &CreateRecord) -> Result<Record, ApiError>;
    fn update_record(&self, id: i64, input: &UpdateRecord) -> Result<Record, ApiError>;
    fn delete_record(&self, id: i64) -> Result<(), ApiError>;
}

impl TodoApi for Gateway {
    fn list_records(&self) -> Result<Vec<Record>, ApiError> {
        Gateway::list_records(self)
    }

    fn create_record(&self, input: &CreateRecord) -> Result<Record, ApiError> {
        Gateway::create_record(self, input)
    }

    fn update_record(&self, id: i64, input: &UpdateRecord) -> Result<Record, ApiError> {
        Gateway::update_record(self, id, input)
    }

    fn delete_record(&self, id: i64) -> Result<(), ApiError> {
        Gateway::delete_record(self, id)
    }
}
