//! Single-record row component.

use chrono::{DateTime, Utc};
use console::style;
use todo_core::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Toggle,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Toggle(Record),
    Edit(Record),
    Delete(i64),
}

pub struct TodoItem<'a> {
    record: &'a Record,
}

impl<'a> TodoItem<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self { record }
    }

    /// Drives the strikethrough styling.
    pub fn is_completed(&self) -> bool {
        self.record.completed
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.record.completed {
            "Undo"
        } else {
            "Complete"
        }
    }

    pub fn actions(&self) -> [(ItemAction, &'static str); 3] {
        [
            (ItemAction::Toggle, self.toggle_label()),
            (ItemAction::Edit, "Edit"),
            (ItemAction::Delete, "Delete"),
        ]
    }

    pub fn click(&self, action: ItemAction) -> ItemEvent {
        match action {
            ItemAction::Toggle => ItemEvent::Toggle(self.record.clone()),
            ItemAction::Edit => ItemEvent::Edit(self.record.clone()),
            ItemAction::Delete => ItemEvent::Delete(self.record.id),
        }
    }

    /// `None` when the record has no (or an empty) description.
    pub fn description(&self) -> Option<&str> {
        self.record.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn meta(&self) -> String {
        format!(
            "Created: {} | Updated: {}",
            format_timestamp(self.record.created_at),
            format_timestamp(self.record.updated_at)
        )
    }

    /// Render as terminal lines, prefixed with the 1-based position `n`.
    pub fn render(&self, n: usize) -> Vec<String> {
        let marker = if self.is_completed() { "[x]" } else { "[ ]" };
        let title = if self.is_completed() {
            style(self.record.title.as_str()).strikethrough().dim().to_string()
        } else {
            style(self.record.title.as_str()).bold().to_string()
        };
        let mut lines = vec![format!("{n:>3}. {marker} {title}")];
        if let Some(description) = self.description() {
            lines.push(format!("        {description}"));
        }
        lines.push(format!("        {}", style(self.meta()).dim()));
        let actions: Vec<&str> = self.actions().iter().map(|(_, label)| *label).collect();
        lines.push(format!("        {}", style(actions.join(" / ")).cyan()));
        lines
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
