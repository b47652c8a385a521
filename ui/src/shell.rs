//! Line commands for the interactive shell.
//!
//! Records are addressed by their 1-based position in the rendered list, not
//! by id, so `done 1` always means the top row.

use crate::api::TodoApi;
use crate::app::RootView;
use crate::item::{ItemAction, TodoItem};

pub const HELP: &str = "\
commands:
  list                     reload the list
  new <title> [:: <desc>]  create a task
  edit <n>                 load task n into the form
  title <text>             set the form title
  desc <text>              set the form description
  check                    flip the form's completed flag
  save                     submit the form
  cancel                   leave edit mode
  done <n>                 complete or undo task n
  rm <n>                   delete task n
  help                     show this text
  quit                     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New { title: String, description: String },
    Edit(usize),
    Title(String),
    Description(String),
    Check,
    Save,
    Cancel,
    Done(usize),
    Remove(usize),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("not a task number: {0}")]
    BadIndex(String),
    #[error("no task at position {0}")]
    NoSuchTask(usize),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "new" | "add" => {
                let (title, description) = match rest.split_once("::") {
                    Some((title, description)) => (title.trim(), description.trim()),
                    None => (rest, ""),
                };
                if title.is_empty() {
                    return Err(CommandError::MissingArgument("new"));
                }
                Ok(Command::New {
                    title: title.to_string(),
                    description: description.to_string(),
                })
            }
            "edit" => parse_index(rest, "edit").map(Command::Edit),
            "title" => Ok(Command::Title(rest.to_string())),
            "desc" => Ok(Command::Description(rest.to_string())),
            "check" => Ok(Command::Check),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "done" => parse_index(rest, "done").map(Command::Done),
            "rm" | "delete" => parse_index(rest, "rm").map(Command::Remove),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_index(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadIndex(arg.to_string())),
    }
}

/// Run `command` against the view. `Help` and `Quit` are left to the caller.
pub fn apply<A: TodoApi>(view: &mut RootView<A>, command: Command) -> Result<(), CommandError> {
    match command {
        Command::List => view.load_records(),
        Command::New { title, description } => {
            if view.editing().is_some() {
                view.cancel_edit();
            }
            let form = view.form_mut();
            form.title = title;
            form.description = description;
            form.completed = false;
            view.submit_form();
        }
        Command::Edit(n) => {
            let event = item_event(view, n, ItemAction::Edit)?;
            view.handle_item_event(event);
        }
        Command::Title(text) => view.form_mut().title = text,
        Command::Description(text) => view.form_mut().description = text,
        Command::Check => {
            let form = view.form_mut();
            form.completed = !form.completed;
        }
        Command::Save => view.submit_form(),
        Command::Cancel => {
            let event = view.form_mut().cancel();
            view.handle_form_event(event);
        }
        Command::Done(n) => {
            let event = item_event(view, n, ItemAction::Toggle)?;
            view.handle_item_event(event);
        }
        Command::Remove(n) => {
            let event = item_event(view, n, ItemAction::Delete)?;
            view.handle_item_event(event);
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn item_event<A: TodoApi>(
    view: &RootView<A>,
    n: usize,
    action: ItemAction,
) -> Result<crate::item::ItemEvent, CommandError> {
    let record = view
        .records()
        .get(n - 1)
        .ok_or(CommandError::NoSuchTask(n))?;
    Ok(TodoItem::new(record).click(action))
}
