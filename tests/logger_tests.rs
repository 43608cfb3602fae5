//! End-to-end behavior of a log call on both channels.

mod common;

use common::TestLogger;
use consol::{ColorCapability, LevelFilter, LogLevel};
use serde_json::json;

#[test]
fn test_terminal_and_file_rendering_of_one_call() {
    let mut t = TestLogger::new(ColorCapability::TrueColor);
    t.consol.set_log_format("!{date:%Y}! !{level}! !{message}!");
    t.log_to_file("app.log");

    t.consol.info(["hello"]).unwrap();

    let info = t.consol.level_format(LogLevel::Info).rendered.clone();
    assert_eq!(info, "\x1b[38;2;168;168;168mINFO");
    let terminal = t.console.text();
    assert!(terminal.starts_with("2024 "));
    assert_eq!(terminal, format!("2024 {info}\x1b[0m hello\x1b[0m\n"));

    let file = t.read("app.log");
    assert_eq!(file, "2024 INFO hello\n");
    assert!(!file.contains('\x1b'));
}

#[test]
fn test_default_template() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.log_to_file("default.log");
    t.consol.success(["done"]).unwrap();
    assert_eq!(t.read("default.log"), "2024/03/09 14:05:00 SUCCESS done\n");
}

#[test]
fn test_arguments_are_stringified_and_joined() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_log_format("!{message}!");
    t.consol.set_stringify_indent(0);
    t.consol
        .log_at(LogLevel::Log, [json!("user"), json!({"id": 7}), json!(true)])
        .unwrap();
    assert_eq!(t.console.lines(), vec!["user {\"id\":7} true\x1b[0m"]);
}

#[test]
fn test_pause_then_resume_replays_in_order() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_log_format("!{message}!");
    t.consol.pause();
    for i in 0..5 {
        t.consol.info([format!("entry {i}")]).unwrap();
    }
    assert!(t.console.text().is_empty());
    assert_eq!(t.consol.queue_len(), 5);

    t.consol.resume().unwrap();
    let lines: Vec<String> = t
        .console
        .lines()
        .into_iter()
        .map(|l| l.trim_end_matches("\x1b[0m").to_string())
        .collect();
    assert_eq!(lines, (0..5).map(|i| format!("entry {i}")).collect::<Vec<_>>());
}

#[test]
fn test_disable_before_resume_replays_nothing() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.pause();
    t.consol.info(["a"]).unwrap();
    t.consol.error(["b"]).unwrap();
    t.consol.disable();
    t.consol.resume().unwrap();
    assert!(t.console.text().is_empty());
    assert_eq!(t.consol.queue_len(), 0);
}

#[test]
fn test_disable_keeps_queue_and_enable_restores_output() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.pause();
    t.consol.info(["queued"]).unwrap();
    t.consol.disable();
    assert_eq!(t.consol.queue_len(), 1);
    t.consol.enable();
    t.consol.resume().unwrap();
    assert_eq!(t.console.lines().len(), 1);
}

#[test]
fn test_warning_threshold_suppresses_debug_without_queueing() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_level(LogLevel::Warning);

    t.consol.debug(["nope"]).unwrap();
    t.consol.info(["nope"]).unwrap();
    assert!(t.console.text().is_empty());

    t.consol.pause();
    t.consol.debug(["still nope"]).unwrap();
    t.consol.warning(["yes"]).unwrap();
    assert_eq!(t.consol.queue_len(), 1);
}

#[test]
fn test_level_filter_off_suppresses_everything() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_level(LevelFilter::Off);
    t.consol.fatal(["x"]).unwrap();
    assert!(t.console.text().is_empty());
}

#[test]
fn test_queued_entries_use_state_at_replay() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_log_format("A !{message}!");
    t.consol.pause();
    t.consol.info(["m"]).unwrap();
    t.consol.set_log_format("B !{message}!");
    t.consol.resume().unwrap();
    assert_eq!(t.console.lines(), vec!["B m\x1b[0m"]);
}

#[test]
fn test_system_placeholders() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_log_format(
        "!{hostname}! !{username}! !{cpu:cores}! !{ram:used:percent}! !{uptime:%M:%S}!",
    );
    t.log_to_file("sys.log");
    t.consol.log(["ignored"]).unwrap();
    assert_eq!(t.read("sys.log"), "testhost tester 4 75.00 01:30\n");
}

#[test]
fn test_placeholder_syntax_in_messages_is_inert() {
    let mut t = TestLogger::new(ColorCapability::TrueColor);
    t.consol.set_log_format("!{message}!");
    t.log_to_file("inert.log");

    t.consol.info(["user typed !{hex:fg:oops}! here"]).unwrap();

    let visible = t.console.text().replace('\u{200B}', "");
    assert!(visible.starts_with("user typed !{hex:fg:oops}! here"), "{visible:?}");
    let file = t.read("inert.log");
    assert!(!file.contains("!{"), "{file:?}");
    assert_eq!(file.replace('\u{200B}', ""), "user typed !{hex:fg:oops}! here\n");
}

#[test]
fn test_messages_cannot_read_environment_variables() {
    // SAFETY: the variable name is unique to this test.
    unsafe { std::env::set_var("CONSOL_LOGGER_TEST_SECRET", "hunter2") };
    let mut t = TestLogger::new(ColorCapability::None);
    t.consol.set_log_format("!{message}!");
    t.log_to_file("secret.log");

    t.consol.info(["input: !{env:CONSOL_LOGGER_TEST_SECRET}!"]).unwrap();

    assert!(!t.console.text().contains("hunter2"));
    assert!(!t.read("secret.log").contains("hunter2"));
}

#[test]
fn test_fatal_with_exit_disabled_is_written() {
    let mut t = TestLogger::new(ColorCapability::None);
    t.log_to_file("fatal.log");
    t.consol.set_log_format("!{level}!: !{message}!");
    t.consol.fatal(["boom"]).unwrap();
    assert_eq!(t.read("fatal.log"), "FATAL: boom\n");
}

#[test]
fn test_fatal_exits_after_the_line_is_written() {
    const CHILD_ENV: &str = "CONSOL_FATAL_EXIT_CHILD";
    const NAME: &str = "test_fatal_exits_after_the_line_is_written";

    if std::env::var_os(CHILD_ENV).is_some() {
        let mut consol = consol::Consol::new();
        consol.set_capability(ColorCapability::None).unwrap();
        consol.set_log_format("!{message}!");
        let _ = consol.fatal(["last words"]);
        // Only reached if fatal did not exit.
        std::process::exit(0);
    }

    let output = std::process::Command::new(std::env::current_exe().unwrap())
        .args(["--exact", NAME, "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("last words"));
}
