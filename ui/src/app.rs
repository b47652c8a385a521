//! Root view: loads the list and orchestrates create/edit/toggle/delete.
//!
//! # Design
//! The view holds the record list, the form, the record being edited
//! (`None` while creating), and the loading/error/notice flags. Child events
//! go to the gateway first; on success the view either reloads the list
//! (create) or patches its local copy (update, toggle, delete). Requests are
//! issued one per action and never de-duplicated.

use todo_core::{Record, UpdateRecord};

use crate::api::TodoApi;
use crate::form::{FormData, FormEvent, TodoForm};
use crate::item::ItemEvent;

pub struct RootView<A> {
    api: A,
    records: Vec<Record>,
    form: TodoForm,
    editing: Option<Record>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl<A: TodoApi> RootView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            records: Vec::new(),
            form: TodoForm::new(),
            editing: None,
            loading: false,
            error: None,
            notice: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn editing(&self) -> Option<&Record> {
        self.editing.as_ref()
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TodoForm {
        &mut self.form
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Initial load.
    pub fn mount(&mut self) {
        self.load_records();
    }

    pub fn load_records(&mut self) {
        self.loading = true;
        match self.api.list_records() {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading records failed");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Submit the form and handle the emitted event.
    pub fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(event) => self.handle_form_event(event),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn handle_form_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Save(data) => self.handle_save(data),
            FormEvent::Cancel => self.cancel_edit(),
        }
    }

    pub fn handle_item_event(&mut self, event: ItemEvent) {
        match event {
            ItemEvent::Toggle(record) => self.handle_toggle(&record),
            ItemEvent::Edit(record) => self.start_edit(record),
            ItemEvent::Delete(id) => self.handle_delete(id),
        }
    }

    pub fn handle_save(&mut self, data: FormData) {
        self.clear_messages();
        let succeeded = match self.editing.as_ref().map(|r| r.id) {
            Some(id) => match self.api.update_record(id, &data.to_update()) {
                Ok(updated) => {
                    self.replace_local(updated);
                    self.editing = None;
                    self.form.load(None);
                    self.notice = Some("Task updated".to_string());
                    true
                }
                Err(err) => {
                    self.error = Some(err.to_string());
                    false
                }
            },
            None => match self.api.create_record(&data.to_create()) {
                Ok(_) => {
                    self.notice = Some("Task created".to_string());
                    self.load_records();
                    true
                }
                Err(err) => {
                    self.error = Some(err.to_string());
                    false
                }
            },
        };
        self.form.finish_save(succeeded);
    }

    pub fn start_edit(&mut self, record: Record) {
        self.clear_messages();
        self.form.load(Some(&record));
        self.editing = Some(record);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.load(None);
    }

    pub fn handle_toggle(&mut self, record: &Record) {
        self.clear_messages();
        let patch = UpdateRecord {
            completed: Some(!record.completed),
            ..Default::default()
        };
        match self.api.update_record(record.id, &patch) {
            Ok(updated) => self.replace_local(updated),
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn handle_delete(&mut self, id: i64) {
        self.clear_messages();
        match self.api.delete_record(id) {
            Ok(()) => {
                self.records.retain(|r| r.id != id);
                if self.editing.as_ref().is_some_and(|r| r.id == id) {
                    self.cancel_edit();
                }
                self.notice = Some("Task deleted".to_string());
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn replace_local(&mut self, record: Record) {
        if let Some(slot) = self.records.iter_mut().find(|r| r.id == record.id) {
            *slot = record;
        }
    }

    fn clear_messages(&mut self) {
        self.error = None;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{TimeZone, Utc};
    use todo_core::{ApiError, CreateRecord};

    use super::*;
    use crate::item::{ItemAction, TodoItem};

    /// In-memory stand-in for the gateway that records every call.
    #[derive(Default)]
    struct FakeApi {
        records: RefCell<Vec<Record>>,
        calls: RefCell<Vec<String>>,
        fail_with: RefCell<Option<String>>,
    }

    impl FakeApi {
        fn with(records: Vec<Record>) -> Self {
            Self {
                records: RefCell::new(records),
                ..Default::default()
            }
        }

        fn fail(&self, message: &str) {
            *self.fail_with.borrow_mut() = Some(message.to_string());
        }

        fn check(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match self.fail_with.borrow().clone() {
                Some(message) => Err(ApiError::Http { status: 500, message }),
                None => Ok(()),
            }
        }
    }

    impl TodoApi for FakeApi {
        fn list_records(&self) -> Result<Vec<Record>, ApiError> {
            self.check("list".into())?;
            Ok(self.records.borrow().clone())
        }

        fn create_record(&self, input: &CreateRecord) -> Result<Record, ApiError> {
            self.check(format!("create {}", input.title))?;
            let id = self.records.borrow().iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let mut created = record(id, &input.title, input.completed.unwrap_or(false));
            created.description = input.description.clone();
            self.records.borrow_mut().insert(0, created.clone());
            Ok(created)
        }

        fn update_record(&self, id: i64, input: &UpdateRecord) -> Result<Record, ApiError> {
            self.check(format!("update {id}"))?;
            let mut records = self.records.borrow_mut();
            let Some(rec) = records.iter_mut().find(|r| r.id == id) else {
                return Err(ApiError::NotFound { message: "record not found".into() });
            };
            if let Some(title) = &input.title {
                rec.title = title.clone();
            }
            if let Some(description) = &input.description {
                rec.description = Some(description.clone());
            }
            if let Some(completed) = input.completed {
                rec.completed = completed;
            }
            Ok(rec.clone())
        }

        fn delete_record(&self, id: i64) -> Result<(), ApiError> {
            self.check(format!("delete {id}"))?;
            self.records.borrow_mut().retain(|r| r.id != id);
            Ok(())
        }
    }

    fn record(id: i64, title: &str, completed: bool) -> Record {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Record {
            id,
            title: title.to_string(),
            description: None,
            completed,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn mounted(records: Vec<Record>) -> RootView<FakeApi> {
        let mut view = RootView::new(FakeApi::with(records));
        view.mount();
        view
    }

    #[test]
    fn mount_loads_records() {
        let view = mounted(vec![record(2, "Task 2", true), record(1, "Task 1", false)]);
        assert_eq!(view.records().len(), 2);
        assert_eq!(*view.api().calls.borrow(), vec!["list"]);
        assert!(!view.is_loading());
        assert!(view.error().is_none());
    }

    #[test]
    fn mount_failure_surfaces_error() {
        let mut view = RootView::new(FakeApi::default());
        view.api().fail("failed to fetch records");
        view.mount();
        assert_eq!(view.error(), Some("failed to fetch records"));
        assert!(view.records().is_empty());
    }

    #[test]
    fn create_calls_gateway_and_refreshes() {
        let mut view = mounted(vec![record(1, "Task 1", false)]);
        view.form_mut().title = "New task".to_string();
        view.form_mut().description = "New description".to_string();
        view.submit_form();

        assert_eq!(
            *view.api().calls.borrow(),
            vec!["list", "create New task", "list"]
        );
        assert_eq!(view.records().len(), 2);
        assert_eq!(view.records()[0].title, "New task");
        assert_eq!(view.notice(), Some("Task created"));
        assert!(view.form().title.is_empty());
    }

    #[test]
    fn create_failure_keeps_form_and_shows_message() {
        let mut view = mounted(Vec::new());
        view.api().fail("title is required");
        view.form_mut().title = "x".to_string();
        view.submit_form();
        assert_eq!(view.error(), Some("title is required"));
        assert_eq!(view.form().title, "x");
        assert!(!view.form().is_saving());
    }

    #[test]
    fn blank_title_never_reaches_gateway() {
        let mut view = mounted(Vec::new());
        view.submit_form();
        assert_eq!(view.error(), Some("title is required"));
        assert_eq!(*view.api().calls.borrow(), vec!["list"]);
    }

    #[test]
    fn edit_flow_updates_local_state() {
        let mut view = mounted(vec![record(1, "Original", false)]);
        let event = TodoItem::new(&view.records()[0].clone()).click(ItemAction::Edit);
        view.handle_item_event(event);
        assert_eq!(view.editing().map(|r| r.id), Some(1));
        assert_eq!(view.form().heading(), "Edit task");

        view.form_mut().title = "Renamed".to_string();
        view.submit_form();

        assert_eq!(view.records()[0].title, "Renamed");
        assert!(view.editing().is_none());
        assert_eq!(view.form().heading(), "New task");
        assert_eq!(*view.api().calls.borrow(), vec!["list", "update 1"]);
    }

    #[test]
    fn cancel_abandons_edit() {
        let mut view = mounted(vec![record(1, "Original", false)]);
        view.start_edit(view.records()[0].clone());
        let event = view.form_mut().cancel();
        view.handle_form_event(event);
        assert!(view.editing().is_none());
        assert!(view.form().title.is_empty());
    }

    #[test]
    fn toggle_flips_completed() {
        let mut view = mounted(vec![record(1, "Task", false)]);
        let rec = view.records()[0].clone();
        view.handle_item_event(TodoItem::new(&rec).click(ItemAction::Toggle));
        assert!(view.records()[0].completed);
        assert_eq!(view.records()[0].title, "Task");
    }

    #[test]
    fn delete_removes_locally_and_ends_edit() {
        let mut view = mounted(vec![record(2, "b", false), record(1, "a", false)]);
        view.start_edit(view.records()[1].clone());
        view.handle_item_event(ItemEvent::Delete(1));
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.records()[0].id, 2);
        assert!(view.editing().is_none());
        assert_eq!(view.notice(), Some("Task deleted"));
    }

    #[test]
    fn delete_failure_keeps_record() {
        let mut view = mounted(vec![record(1, "a", false)]);
        view.api().fail("record not found");
        view.handle_delete(1);
        assert_eq!(view.records().len(), 1);
        assert_eq!(view.error(), Some("record not found"));
    }
}
