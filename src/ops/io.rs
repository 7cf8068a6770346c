//==================================================
// File: ops/io.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Console and file commands
// Objective: Print values, read interactive input, and move text between the
//            result register and files
//==================================================

use std::fs;

use super::{OpResult, compute};
use crate::catalog::Bindings;
use crate::interpreter::{Interpreter, RuntimeError};
use crate::value::Value;

/// `Print name`: the variable's value, or the text itself when no such
/// variable exists.
pub(super) fn print(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    let text = interp
        .variables()
        .get(name)
        .map_or_else(|| name.to_string(), ToString::to_string);
    interp.console_mut().write_line(&text);
    Ok(())
}

fn prompt(interp: &mut Interpreter, message: &str) -> String {
    let console = interp.console_mut();
    console.write(message);
    console.read_line().unwrap_or_default().trim().to_string()
}

/// Unparsable input stores 0 and is reported.
pub(super) fn solve_input(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    let raw = prompt(interp, &format!("Enter a number for {name}: "));
    match raw.parse::<i64>() {
        Ok(n) => {
            interp.variables_mut().set(name, Value::Integer(n));
            Ok(())
        }
        Err(_) => {
            interp.variables_mut().set(name, Value::Integer(0));
            Err(RuntimeError::InvalidArgument(format!(
                "'{raw}' is not an integer"
            )))
        }
    }
}

pub(super) fn text_input(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    let text = prompt(interp, &format!("Enter text for {name}: "));
    interp.variables_mut().set(name, Value::Text(text));
    Ok(())
}

pub(super) fn input(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    let text = prompt(interp, &format!("Enter a value for {name}: "));
    interp.variables_mut().set(name, Value::Text(text));
    Ok(())
}

pub(super) fn file_read(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let path = bindings.get("file");
    compute(interp, Value::Text(String::new()), |_| {
        fs::read_to_string(path)
            .map(Value::Text)
            .map_err(|err| RuntimeError::Io(format!("reading {path}: {err}")))
    })
}

/// Writes the result register, which must hold text.
pub(super) fn file_write(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let path = bindings.get("file");
    let content = interp.last_result().expect_text("result")?;
    fs::write(path, content).map_err(|err| RuntimeError::Io(format!("writing {path}: {err}")))
}

pub(super) fn memory_out(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    interp.dump_memory();
    Ok(())
}
