//! Turns a [`RootView`] into terminal lines.

use console::style;

use crate::api::TodoApi;
use crate::app::RootView;
use crate::item::TodoItem;

pub const EMPTY_STATE: &str = "No tasks yet. Add one with `new <title>`.";

pub fn render<A: TodoApi>(view: &RootView<A>) -> Vec<String> {
    let mut lines = vec![style("Todo List").bold().underlined().to_string(), String::new()];

    if let Some(error) = view.error() {
        lines.push(style(format!("error: {error}")).red().to_string());
    }
    if let Some(notice) = view.notice() {
        lines.push(style(notice).green().to_string());
    }

    lines.extend(render_form(view));
    lines.push(String::new());

    if view.is_loading() {
        lines.push("Loading...".to_string());
    } else if view.records().is_empty() {
        lines.push(style(EMPTY_STATE).dim().to_string());
    } else {
        for (i, record) in view.records().iter().enumerate() {
            lines.extend(TodoItem::new(record).render(i + 1));
        }
    }
    lines
}

fn render_form<A: TodoApi>(view: &RootView<A>) -> Vec<String> {
    let form = view.form();
    let completed = if form.completed { "yes" } else { "no" };
    let mut lines = vec![
        style(form.heading()).bold().to_string(),
        format!("  Title:       {}", form.title),
        format!("  Description: {}", form.description),
    ];
    if view.editing().is_some() {
        lines.push(format!("  Completed:   {completed}"));
        lines.push(format!("  [{}] [Cancel]", form.submit_label()));
    } else {
        lines.push(format!("  [{}]", form.submit_label()));
    }
    lines
}
