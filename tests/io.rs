mod util;

use std::fs;

use clashlang::{BufferConsole, Value};
use util::interpreter_with;

#[test]
fn file_write_then_read() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("note.txt");
    let path = path.to_str().expect("utf-8 path");

    let console = BufferConsole::with_input(["saved text"]);
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program(&format!(
        "Text.input msg\nText msg\nfile.write {path}\nfile.read {path}\nText.out back\nPrint back\n"
    ));

    assert_eq!(fs::read_to_string(path).expect("written"), "saved text");
    assert!(console.output().ends_with("saved text\n"));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.txt");

    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_statement(&format!("file.read {}", path.display()));
    let lines = console.lines();
    assert_eq!(lines.len(), 1, "output: {lines:?}");
    assert!(lines[0].starts_with("error[E005]"), "output: {lines:?}");
    assert_eq!(interpreter.last_result(), &Value::Text(String::new()));
}

#[test]
fn writing_a_non_text_result_is_a_type_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("number.txt");

    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program(&format!("Solve 4\nfile.write {}\n", path.display()));
    assert!(console.output().starts_with("error[E003]"));
    assert!(!path.exists());
}

#[test]
fn solve_input_reads_integers() {
    let console = BufferConsole::with_input(["41"]);
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program("Solve.input n\nSolve n + 1\nSolve.out n\nPrint n\n");
    assert_eq!(console.output(), "Enter a number for n: 42\n");
}

#[test]
fn solve_input_rejects_non_numbers() {
    let console = BufferConsole::with_input(["many"]);
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_statement("Solve.input n");
    assert!(console.output().contains("error[E004]"));
    assert_eq!(interpreter.variables().get("n"), Some(&Value::Integer(0)));
}

#[test]
fn input_at_end_of_stream_stores_empty_text() {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_statement("input name");
    assert_eq!(
        interpreter.variables().get("name"),
        Some(&Value::Text(String::new()))
    );
}

#[test]
fn env_reads_process_environment() {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_statement("env CLASHLANG_SURELY_UNSET_VARIABLE");
    assert_eq!(interpreter.last_result(), &Value::Text(String::new()));
}

#[test]
fn date_and_time_have_fixed_shapes() {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_statement("date");
    let date = interpreter.last_result().to_string();
    assert_eq!(date.len(), 10, "date: {date}");
    assert_eq!(date.matches('-').count(), 2, "date: {date}");

    interpreter.execute_statement("time");
    let time = interpreter.last_result().to_string();
    assert_eq!(time.len(), 8, "time: {time}");
    assert_eq!(time.matches(':').count(), 2, "time: {time}");
}
