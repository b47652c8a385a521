//! Terminal front end for the todo service.
//!
//! # Overview
//! The UI is split into small component models that hold state and emit
//! events, plus a renderer and a line-command shell on top:
//! - `TodoForm` edits a task and emits save/cancel.
//! - `TodoItem` shows one record and emits toggle/edit/delete.
//! - `RootView` owns the list and routes events to a [`TodoApi`].
//!
//! The models never print; `render` produces the lines and the binary
//! decides where they go.

pub mod api;
pub mod app;
pub mod form;
pub mod item;
pub mod render;
pub mod shell;

pub use api::TodoApi;
pub use app::RootView;
pub use form::{FormData, FormError, FormEvent, FormMode, TodoForm};
pub use item::{ItemAction, ItemEvent, TodoItem};
pub use render::render;
pub use shell::{apply, Command, CommandError};
