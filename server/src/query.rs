//! Partial-update statement builder.
//!
//! Column names come only from [`UpdateField`], so the rendered SQL is drawn
//! from a finite set of shapes no matter which fields a patch carries.

use rusqlite::types::Value;

use crate::store::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateField {
    Title,
    Description,
    Completed,
}

impl UpdateField {
    pub fn column(self) -> &'static str {
        match self {
            UpdateField::Title => "title",
            UpdateField::Description => "description",
            UpdateField::Completed => "completed",
        }
    }
}

/// `UPDATE todos SET ... WHERE id = ?` under construction.
#[derive(Debug, Default)]
pub struct UpdateStatement {
    assignments: Vec<(UpdateField, Value)>,
}

impl UpdateStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `field = value`. Setting the same field twice keeps the later value.
    pub fn set(&mut self, field: UpdateField, value: Value) -> &mut Self {
        match self.assignments.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((field, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render the statement and its parameters. `updatedAt` is always written
    /// and the id binds to the final slot.
    pub fn build(self, id: i64, updated_at: String) -> (String, Params) {
        let mut clauses = Vec::with_capacity(self.assignments.len() + 1);
        let mut params = Vec::with_capacity(self.assignments.len() + 2);
        for (slot, (field, value)) in self.assignments.into_iter().enumerate() {
            clauses.push(format!("{} = ?{}", field.column(), slot + 1));
            params.push(value);
        }
        params.push(Value::Text(updated_at));
        clauses.push(format!("updatedAt = ?{}", params.len()));
        params.push(Value::Integer(id));
        let sql = format!("UPDATE todos SET {} WHERE id = ?{}", clauses.join(", "), params.len());
        (sql, params)
    }
}
