//! Create/edit form component.
//!
//! The form owns its field values and switches between create and edit mode
//! depending on whether a record was loaded. Submitting emits the field
//! values; nothing is persisted here. The parent reports the outcome through
//! [`TodoForm::finish_save`], and a successful create clears the fields.

use todo_core::{CreateRecord, Record, UpdateRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Field values emitted on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl FormData {
    pub fn to_create(&self) -> CreateRecord {
        CreateRecord {
            title: self.title.clone(),
            description: (!self.description.is_empty()).then(|| self.description.clone()),
            completed: Some(self.completed),
        }
    }

    /// Edit mode always sends every field the form shows.
    pub fn to_update(&self) -> UpdateRecord {
        UpdateRecord {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            completed: Some(self.completed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Save(FormData),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("title is required")]
    TitleRequired,
    #[error("a save is already in progress")]
    Saving,
}

#[derive(Debug, Clone, Default)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub completed: bool,
    editing: Option<i64>,
    saving: bool,
}

impl TodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the fields from `record` (edit mode) or reset them (create mode).
    pub fn load(&mut self, record: Option<&Record>) {
        match record {
            Some(record) => {
                self.title = record.title.clone();
                self.description = record.description.clone().unwrap_or_default();
                self.completed = record.completed;
                self.editing = Some(record.id);
            }
            None => self.clear(),
        }
        self.saving = false;
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.completed = false;
        self.editing = None;
    }

    pub fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn heading(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "New task",
            FormMode::Edit => "Edit task",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.mode(), self.saving) {
            (_, true) => "Saving...",
            (FormMode::Create, false) => "Create",
            (FormMode::Edit, false) => "Update",
        }
    }

    /// Emit the current field values. A blank title is refused, mirroring a
    /// `required` input.
    pub fn submit(&mut self) -> Result<FormEvent, FormError> {
        if self.saving {
            return Err(FormError::Saving);
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::TitleRequired);
        }
        self.saving = true;
        Ok(FormEvent::Save(FormData {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            completed: self.completed,
        }))
    }

    /// Called by the parent once the emitted save has been handled.
    pub fn finish_save(&mut self, succeeded: bool) {
        self.saving = false;
        if succeeded && self.mode() == FormMode::Create {
            self.clear();
        }
    }

    pub fn cancel(&mut self) -> FormEvent {
        self.saving = false;
        FormEvent::Cancel
    }
}
