#![allow(dead_code)]

use clashlang::{BufferConsole, CommandCatalog, Interpreter};

pub fn interpreter_with(console: &BufferConsole) -> Interpreter {
    let catalog = CommandCatalog::bundled().expect("bundled catalog");
    Interpreter::with_console(catalog, console.clone())
}

/// Run a program against the bundled catalog and return everything it printed.
pub fn run_source(src: &str) -> String {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program(src);
    console.output()
}

pub fn run_lines(src: &str) -> Vec<String> {
    run_source(src).lines().map(str::to_string).collect()
}
