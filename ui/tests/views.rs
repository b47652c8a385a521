//! Drive the views through the real gateway against a live server.

use todo_core::Gateway;
use todo_ui::{apply, render, Command, RootView};

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            let store = todo_server::Store::open_in_memory().unwrap();
            todo_server::run(listener, todo_server::RecordService::new(store)).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

fn run(view: &mut RootView<Gateway>, line: &str) {
    apply(view, Command::parse(line).unwrap()).unwrap();
    assert!(view.error().is_none(), "{line}: {:?}", view.error());
}

#[test]
fn shell_session() {
    let mut view = RootView::new(Gateway::new(&start_server()));
    view.mount();
    assert!(view.records().is_empty());

    run(&mut view, "new Write report :: quarterly numbers");
    run(&mut view, "new Water plants");
    assert_eq!(view.records().len(), 2);
    assert_eq!(view.records()[0].title, "Water plants");
    assert_eq!(view.records()[1].description.as_deref(), Some("quarterly numbers"));

    run(&mut view, "done 2");
    assert!(view.records()[1].completed);

    run(&mut view, "edit 1");
    run(&mut view, "title Water all plants");
    run(&mut view, "save");
    assert_eq!(view.records()[0].title, "Water all plants");
    assert!(view.editing().is_none());

    run(&mut view, "rm 2");
    assert_eq!(view.records().len(), 1);

    run(&mut view, "list");
    assert_eq!(view.records().len(), 1);
    let out = render(&view).join("\n");
    assert!(out.contains("Water all plants"));
    assert!(!out.contains("Write report"));
}

#[test]
fn unknown_position_is_reported() {
    let mut view = RootView::new(Gateway::new(&start_server()));
    view.mount();
    let err = apply(&mut view, Command::Done(1)).unwrap_err();
    assert_eq!(err.to_string(), "no task at position 1");
}

#[test]
fn unreachable_server_shows_error() {
    let mut view = RootView::new(Gateway::new("http://127.0.0.1:1/api"));
    view.mount();
    assert!(view.error().unwrap().starts_with("transport failed"));
}
