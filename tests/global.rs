mod common;

use std::sync::Mutex;

use common::SharedBuffer;
use rotolog::{Flags, Level, Logger, global};

// One process-wide logger slot, so tests touching it must not interleave.
static SLOT: Mutex<()> = Mutex::new(());

fn installed_buffer(flags: Flags) -> SharedBuffer {
    let buffer = SharedBuffer::new();
    global::init(
        Logger::builder()
            .level(Level::Debug)
            .flags(flags)
            .sync(Box::new(buffer.clone()))
            .build(),
    );
    buffer
}

#[test]
fn init_installs_and_shutdown_removes() {
    let _guard = SLOT.lock().unwrap();
    let buffer = installed_buffer(Flags::empty());

    assert!(global::current().is_some());
    global::info("hello");
    global::shutdown();
    assert!(global::current().is_none());

    assert_eq!(buffer.lines(), vec!["[INFO] hello"]);
}

#[test]
fn ambient_calls_without_a_logger_are_inert() {
    let _guard = SLOT.lock().unwrap();
    global::shutdown();
    global::info("nowhere");
    global::error("nowhere");
    global::set_level(Level::Debug);
    assert!(global::current().is_none());
}

#[test]
fn replace_hands_back_the_previous_logger() {
    let _guard = SLOT.lock().unwrap();
    let first = installed_buffer(Flags::empty());

    let second = SharedBuffer::new();
    let previous = global::replace(
        Logger::builder()
            .level(Level::Debug)
            .flags(Flags::empty())
            .sync(Box::new(second.clone()))
            .build(),
    );
    assert!(previous.is_some());

    global::info("routed");
    global::shutdown();

    assert_eq!(first.contents(), "");
    assert_eq!(second.lines(), vec!["[INFO] routed"]);
}

#[test]
fn macros_format_through_the_installed_logger() {
    let _guard = SLOT.lock().unwrap();
    let buffer = installed_buffer(Flags::empty());

    rotolog::info!("listening on {}", "0.0.0.0:4222");
    rotolog::warn!("retry {} of {}", 1, 3);
    global::shutdown();

    assert_eq!(
        buffer.lines(),
        vec![
            "[INFO] listening on 0.0.0.0:4222",
            "[WARN] retry 1 of 3",
        ]
    );
}

#[test]
fn macros_capture_the_enclosing_function_name() {
    let _guard = SLOT.lock().unwrap();
    let buffer = installed_buffer(Flags::SHORT_FILE | Flags::SHORT_FUNCTION);

    rotolog::error!("lookup failed");
    global::shutdown();

    let line = buffer.contents();
    assert!(line.contains("global.rs:"), "unexpected line: {line}");
    assert!(
        line.contains("macros_capture_the_enclosing_function_name:"),
        "unexpected line: {line}"
    );
}

#[test]
fn macros_respect_the_level_filter() {
    let _guard = SLOT.lock().unwrap();
    let buffer = SharedBuffer::new();
    global::init(
        Logger::builder()
            .level(Level::Warn)
            .flags(Flags::empty())
            .sync(Box::new(buffer.clone()))
            .build(),
    );

    rotolog::debug!("hidden");
    rotolog::info!("hidden");
    rotolog::error!("shown");
    global::shutdown();

    assert_eq!(buffer.lines(), vec!["[ERROR] shown"]);
}

#[test]
fn level_less_print_macro_skips_the_tag() {
    let _guard = SLOT.lock().unwrap();
    let buffer = installed_buffer(Flags::empty());

    rotolog::log_print!("plain {}", "text");
    global::shutdown();

    assert_eq!(buffer.lines(), vec!["plain text"]);
}
