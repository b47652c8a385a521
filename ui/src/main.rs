use clap::Parser;
use console::{style, Term};
use tracing_subscriber::EnvFilter;

use todo_core::Gateway;
use todo_ui::shell::HELP;
use todo_ui::{apply, render, Command, RootView};

#[derive(Parser, Debug)]
#[command(name = "todo-ui")]
#[command(about = "Interactive terminal client for the todo API")]
struct Args {
    /// Base URL of the API, including the `/api` prefix.
    #[arg(long, env = "TODO_API_URL", default_value = "http://127.0.0.1:3000/api")]
    api_url: String,
}

fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let term = Term::stdout();
    let mut view = RootView::new(Gateway::new(&args.api_url));
    view.mount();

    loop {
        term.clear_screen()?;
        for line in render(&view) {
            term.write_line(&line)?;
        }
        term.write_line("")?;
        term.write_str(&format!("{} ", style(">").cyan()))?;

        let line = term.read_line()?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                show(&term, &err.to_string())?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => show(&term, HELP)?,
            command => {
                if let Err(err) = apply(&mut view, command) {
                    show(&term, &err.to_string())?;
                }
            }
        }
    }
    Ok(())
}

/// Print a message and wait for enter so it survives the next redraw.
fn show(term: &Term, message: &str) -> std::io::Result<()> {
    term.write_line(message)?;
    term.write_str(&style("(press enter)").dim().to_string())?;
    term.read_line()?;
    Ok(())
}
