mod util;

use clashlang::{BufferConsole, Value};
use util::{interpreter_with, run_lines, run_source};

#[test]
fn solve_store_and_print() {
    let src = r#"
Solve a = 2 + 3
Solve.out a
Print a
"#;
    assert_eq!(run_lines(src), vec!["5"]);
}

#[test]
fn arithmetic_widens_to_float() {
    let src = r#"
Solve 7 / 2
Solve.out half
Solve 1.5 * 2
Solve.out f
Print half
Print f
"#;
    assert_eq!(run_lines(src), vec!["3", "3"]);
}

#[test]
fn divide_by_zero_reports_and_stores_zero() {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program("Solve 10/0\nSolve.out z\nPrint z\n");
    let lines = console.lines();
    assert_eq!(lines.len(), 2, "output: {lines:?}");
    assert!(lines[0].starts_with("error[E004]"), "output: {lines:?}");
    assert_eq!(lines[1], "0");
    assert_eq!(interpreter.variables().get("z"), Some(&Value::Integer(0)));
}

#[test]
fn print_falls_back_to_literal_text() {
    assert_eq!(run_lines("Print hello"), vec!["hello"]);
}

#[test]
fn text_concatenation() {
    let console = BufferConsole::with_input(["hello", "world"]);
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program(
        "Text.input a\nText.input b\nText a + b\nText.out c\nPrint c\n",
    );
    let output = console.output();
    assert!(output.ends_with("hello world\n"), "output: {output}");
}

#[test]
fn function_block_runs_on_jump() {
    let src = r#"
Function ( greet )
Print hello
)
jump greet
"#;
    assert_eq!(run_lines(src), vec!["hello"]);
}

#[test]
fn function_bodies_do_not_run_at_load() {
    let src = r#"
Function ( quiet )
Print never
)
Print done
"#;
    assert_eq!(run_lines(src), vec!["done"]);
}

#[test]
fn memory_load_runs_listed_functions_in_order() {
    let src = r#"
Function ( first )
Print one
)
Function ( second )
Print two
)
Memory load (second, first)
"#;
    assert_eq!(run_lines(src), vec!["two", "one"]);
}

#[test]
fn memory_out_dumps_sorted_variables() {
    let src = r#"
Solve 2
Solve.out b
Solve 1
Solve.out a
memory out
"#;
    assert_eq!(run_lines(src), vec!["1) 1", "2) 2"]);
}

#[test]
fn comments_and_unknown_lines_are_ignored() {
    let src = r#"
// leading comment
Print kept // trailing comment
this is not a command
"#;
    assert_eq!(run_lines(src), vec!["kept"]);
}

#[test]
fn undefined_function_call_is_a_no_op() {
    assert_eq!(run_source("call nobody\njump nobody\n"), "");
}

#[test]
fn def_block_defines_a_callable_function() {
    let src = r#"
def shout {
Print loud
}
call shout
call shout
"#;
    assert_eq!(run_lines(src), vec!["loud", "loud"]);
}

#[test]
fn runaway_recursion_reports_stack_overflow() {
    let console = BufferConsole::new();
    let catalog = clashlang::CommandCatalog::bundled().expect("bundled catalog");
    let mut interpreter =
        clashlang::Interpreter::with_console(catalog, console.clone()).with_max_call_depth(20);
    interpreter.execute_program("def again {\ncall again\n}\ncall again\nPrint after\n");
    let lines = console.lines();
    assert_eq!(lines.len(), 2, "output: {lines:?}");
    assert!(lines[0].starts_with("error[E006]"), "output: {lines:?}");
    assert_eq!(lines[1], "after");
}

#[test]
fn math_helpers_use_the_result_register() {
    let src = r#"
Solve -4
Solve.out n
abs n
Solve.out m
Print m
pow 2 10
Solve.out p
Print p
"#;
    assert_eq!(run_lines(src), vec!["4", "1024"]);
}

#[test]
fn randint_stays_in_range() {
    let console = BufferConsole::new();
    let mut interpreter = interpreter_with(&console);
    for _ in 0..20 {
        interpreter.execute_statement("randint 1 3");
        match interpreter.last_result() {
            Value::Integer(n) => assert!((1..=3).contains(n), "got {n}"),
            other => panic!("unexpected {other:?}"),
        }
    }
    interpreter.execute_statement("randint 5 1");
    assert!(console.output().starts_with("error[E004]"));
}

#[test]
fn string_helpers() {
    let console = BufferConsole::with_input(["Hello World"]);
    let mut interpreter = interpreter_with(&console);
    interpreter.execute_program(
        r#"
Text.input s
substr s 6 50
Text.out tail
Print tail
find s World
Solve.out at
Print at
len s
Solve.out n
Print n
Text.upper s
Text.out up
Print up
"#,
    );
    let output = console.output();
    assert!(
        output.ends_with("World\n6\n11\nHELLO WORLD\n"),
        "output: {output}"
    );
}
