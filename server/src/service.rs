//! Record-level rules on top of [`Store`].
//!
//! # Design
//! The service is constructed around an explicit store handle and keeps no
//! state of its own: every call reads fresh rows. Update and delete read the
//! current row first and then write, without a transaction; two concurrent
//! writers to the same id resolve as last-writer-wins.

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::Row;

use crate::codec::{decode_completed, decode_timestamp, encode_completed, encode_timestamp};
use crate::error::ServiceError;
use crate::query::{UpdateField, UpdateStatement};
use crate::store::Store;
use crate::types::{CreateRecord, Record, UpdateRecord};

const SELECT_COLUMNS: &str = "SELECT id, title, description, completed, createdAt, updatedAt FROM todos";

const INSERT_RECORD: &str =
    "INSERT INTO todos (title, description, completed, createdAt, updatedAt) VALUES (?1, ?2, ?3, ?4, ?4)";

#[derive(Clone)]
pub struct RecordService {
    store: Store,
}

impl RecordService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub async fn create(&self, input: CreateRecord) -> Result<Record, ServiceError> {
        let title = match input.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(ServiceError::InvalidInput("title is required".to_string())),
        };
        let description = input.description.filter(|d| !d.is_empty());
        let completed = input.completed.unwrap_or(false);
        let now = encode_timestamp(Utc::now());

        let outcome = self
            .store
            .execute(
                INSERT_RECORD,
                vec![
                    Value::Text(title),
                    description.map_or(Value::Null, Value::Text),
                    Value::Integer(encode_completed(completed)),
                    Value::Text(now),
                ],
            )
            .await?;

        let id = outcome.last_insert_id;
        self.get_by_id(id).await?.ok_or(ServiceError::Missing(id))
    }

    /// Every record, most recently created first.
    pub async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY createdAt DESC, id DESC");
        let rows = self.store.query_all(&sql, Vec::new(), map_record).await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Record>, ServiceError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let row = self
            .store
            .query_one(&sql, vec![Value::Integer(id)], map_record)
            .await?;
        Ok(row)
    }

    /// Apply the supplied fields of `patch`. Returns `None` when no record has
    /// this id. An empty patch returns the current record without writing.
    pub async fn update(&self, id: i64, patch: UpdateRecord) -> Result<Option<Record>, ServiceError> {
        let Some(current) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut stmt = UpdateStatement::new();
        if let Some(title) = patch.title {
            if title.trim().is_empty() {
                return Err(ServiceError::InvalidInput("title must not be empty".to_string()));
            }
            stmt.set(UpdateField::Title, Value::Text(title));
        }
        if let Some(description) = patch.description {
            stmt.set(UpdateField::Description, Value::Text(description));
        }
        if let Some(completed) = patch.completed {
            stmt.set(UpdateField::Completed, Value::Integer(encode_completed(completed)));
        }
        if stmt.is_empty() {
            return Ok(Some(current));
        }

        // never stamp earlier than creation, even if the wall clock stepped back
        let updated_at = Utc::now().max(current.created_at);
        let (sql, params) = stmt.build(id, encode_timestamp(updated_at));
        self.store.execute(&sql, params).await?;

        match self.get_by_id(id).await? {
            Some(record) => Ok(Some(record)),
            None => Err(ServiceError::Missing(id)),
        }
    }

    /// Returns `false` when no record has this id.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        if self.get_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.store
            .execute("DELETE FROM todos WHERE id = ?1", vec![Value::Integer(id)])
            .await?;
        Ok(true)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: decode_completed(row.get(3)?),
        created_at: timestamp_column(row, 4)?,
        updated_at: timestamp_column(row, 5)?,
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    decode_timestamp(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
