//==================================================
// File: ops/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Operation dispatch table for matched catalog commands
// Objective: Map stable command ids to stateless handlers and share the
//            operand resolution rules every handler relies on
//==================================================

use std::collections::HashMap;

use crate::catalog::Bindings;
use crate::interpreter::{Interpreter, RuntimeError, VariableStore};
use crate::value::Value;

mod control;
mod custom;
mod data;
mod io;
mod math;
mod strings;
mod system;

pub use math::evaluate_expression;
pub use strings::evaluate_text_expression;

pub type OpResult = Result<(), RuntimeError>;
pub type Handler = fn(&mut Interpreter, &Bindings) -> OpResult;

//==================================================
// Section 1.0 - Command Ids
//==================================================

/// Ids of the bundled catalog. These are the dispatch contract; names and
/// patterns in the catalog file are free to change.
pub mod ids {
    pub const PRINT: u32 = 1;
    pub const SOLVE_INPUT: u32 = 2;
    pub const SOLVE: u32 = 3;
    pub const SOLVE_OUT: u32 = 4;
    pub const TEXT_INPUT: u32 = 5;
    pub const TEXT: u32 = 6;
    pub const TEXT_OUT: u32 = 7;
    pub const IF: u32 = 8;
    pub const JUMP: u32 = 9;
    pub const MEMORY_OUT: u32 = 10;
    pub const TEXT_LENGTH: u32 = 13;
    pub const TEXT_UPPER: u32 = 14;
    pub const ABS: u32 = 15;
    pub const SQRT: u32 = 16;
    pub const POW: u32 = 17;
    pub const ROUND: u32 = 18;
    pub const SIN: u32 = 19;
    pub const COS: u32 = 20;
    pub const TAN: u32 = 21;
    pub const LOG: u32 = 22;
    pub const LOG10: u32 = 23;
    pub const RANDOM: u32 = 24;
    pub const RANDINT: u32 = 25;
    pub const LEN: u32 = 26;
    pub const SUBSTR: u32 = 27;
    pub const FIND: u32 = 28;
    pub const REPLACE: u32 = 29;
    pub const SPLIT: u32 = 30;
    pub const JOIN: u32 = 31;
    pub const LOWER: u32 = 32;
    pub const FOR: u32 = 33;
    pub const WHILE: u32 = 34;
    pub const DO: u32 = 35;
    pub const WHILE_TAIL: u32 = 36;
    pub const SWITCH: u32 = 37;
    pub const CASE: u32 = 38;
    pub const DEFAULT: u32 = 39;
    pub const FILE_READ: u32 = 40;
    pub const FILE_WRITE: u32 = 41;
    pub const PRINT_FORMATTED: u32 = 42;
    pub const INPUT: u32 = 43;
    pub const ARRAY_CREATE: u32 = 44;
    pub const ARRAY_SET: u32 = 45;
    pub const ARRAY_GET: u32 = 46;
    pub const LIST_CREATE: u32 = 47;
    pub const LIST_APPEND: u32 = 48;
    pub const LIST_GET: u32 = 49;
    pub const DICT_CREATE: u32 = 50;
    pub const DICT_SET: u32 = 51;
    pub const DICT_GET: u32 = 52;
    pub const TIME: u32 = 53;
    pub const DATE: u32 = 54;
    pub const ENV: u32 = 55;
    pub const DEF: u32 = 56;
    pub const CALL: u32 = 57;
}

/// Commands that start a captured block.
pub fn is_block_opener(id: u32) -> bool {
    matches!(
        id,
        ids::IF | ids::FOR | ids::WHILE | ids::DO | ids::SWITCH | ids::DEF
    )
}

//==================================================
// Section 2.0 - Operation Table
//==================================================

#[derive(Clone)]
pub struct OperationTable {
    handlers: HashMap<u32, Handler>,
}

impl OperationTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::empty();

        table.register(ids::PRINT, io::print);
        table.register(ids::PRINT_FORMATTED, io::print);
        table.register(ids::SOLVE_INPUT, io::solve_input);
        table.register(ids::TEXT_INPUT, io::text_input);
        table.register(ids::INPUT, io::input);
        table.register(ids::FILE_READ, io::file_read);
        table.register(ids::FILE_WRITE, io::file_write);
        table.register(ids::MEMORY_OUT, io::memory_out);

        table.register(ids::SOLVE, math::solve);
        table.register(ids::SOLVE_OUT, store_result);
        table.register(ids::ABS, math::abs);
        table.register(ids::SQRT, math::sqrt);
        table.register(ids::POW, math::pow);
        table.register(ids::ROUND, math::round);
        table.register(ids::SIN, math::sin);
        table.register(ids::COS, math::cos);
        table.register(ids::TAN, math::tan);
        table.register(ids::LOG, math::log);
        table.register(ids::LOG10, math::log10);
        table.register(ids::RANDOM, math::random);
        table.register(ids::RANDINT, math::randint);

        table.register(ids::TEXT, strings::text);
        table.register(ids::TEXT_OUT, store_result);
        table.register(ids::TEXT_LENGTH, strings::len);
        table.register(ids::LEN, strings::len);
        table.register(ids::TEXT_UPPER, strings::upper);
        table.register(ids::LOWER, strings::lower);
        table.register(ids::SUBSTR, strings::substr);
        table.register(ids::FIND, strings::find);
        table.register(ids::REPLACE, strings::replace);
        table.register(ids::SPLIT, strings::split);
        table.register(ids::JOIN, strings::join);

        table.register(ids::ARRAY_CREATE, data::array_create);
        table.register(ids::ARRAY_SET, data::array_set);
        table.register(ids::ARRAY_GET, data::array_get);
        table.register(ids::LIST_CREATE, data::list_create);
        table.register(ids::LIST_APPEND, data::list_append);
        table.register(ids::LIST_GET, data::list_get);
        table.register(ids::DICT_CREATE, data::dict_create);
        table.register(ids::DICT_SET, data::dict_set);
        table.register(ids::DICT_GET, data::dict_get);

        table.register(ids::TIME, system::time);
        table.register(ids::DATE, system::date);
        table.register(ids::ENV, system::env);

        table.register(ids::JUMP, custom::call);
        table.register(ids::CALL, custom::call);
        table.register(ids::DEF, custom::def);

        table.register(ids::IF, control::if_block);
        table.register(ids::FOR, control::for_block);
        table.register(ids::WHILE, control::while_block);
        table.register(ids::DO, control::do_block);
        table.register(ids::WHILE_TAIL, control::while_tail);
        table.register(ids::SWITCH, control::switch_block);
        table.register(ids::CASE, control::case_arm);
        table.register(ids::DEFAULT, control::default_arm);

        table
    }

    pub fn register(&mut self, id: u32, handler: Handler) {
        self.handlers.insert(id, handler);
    }

    pub fn handler(&self, id: u32) -> Option<Handler> {
        self.handlers.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for OperationTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//==================================================
// Section 3.0 - Shared Handler Helpers
//==================================================

static ABSENT: Value = Value::Absent;

/// Variable value, or `Absent` when the name is not defined.
pub(crate) fn variable<'a>(variables: &'a VariableStore, name: &str) -> &'a Value {
    variables.get(name).unwrap_or(&ABSENT)
}

/// Resolve an operand token: variable, else integer literal, else float
/// literal, else the literal text itself.
pub fn resolve_operand(variables: &VariableStore, token: &str) -> Value {
    if let Some(value) = variables.get(token) {
        return value.clone();
    }
    if let Ok(n) = token.parse::<i64>() {
        return Value::Integer(n);
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(token.to_string())
}

/// Integer argument from an integer variable or an integer literal.
pub(crate) fn resolve_integer(
    variables: &VariableStore,
    token: &str,
    what: &str,
) -> Result<i64, RuntimeError> {
    match variables.get(token) {
        Some(value) => value.expect_integer(&format!("{what} '{token}'")),
        None => token.parse::<i64>().map_err(|_| {
            RuntimeError::InvalidArgument(format!("{what} '{token}' is not an integer"))
        }),
    }
}

/// Run a compute step: success lands in `last_result`, failure leaves the
/// neutral `fallback` there and is reported by the engine.
pub(crate) fn compute<F>(interp: &mut Interpreter, fallback: Value, op: F) -> OpResult
where
    F: FnOnce(&mut Interpreter) -> Result<Value, RuntimeError>,
{
    match op(interp) {
        Ok(value) => {
            interp.set_last_result(value);
            Ok(())
        }
        Err(err) => {
            interp.set_last_result(fallback);
            Err(err)
        }
    }
}

/// `Solve.out` / `Text.out`: copy the result register into a variable.
fn store_result(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let value = interp.last_result().clone();
    interp.variables_mut().set(bindings.get("var"), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operands_prefer_variables_then_numbers_then_text() {
        let mut variables = VariableStore::default();
        variables.set("x", Value::from("bound"));
        assert_eq!(resolve_operand(&variables, "x"), Value::from("bound"));
        assert_eq!(resolve_operand(&variables, "12"), Value::Integer(12));
        assert_eq!(resolve_operand(&variables, "1.5"), Value::Float(1.5));
        assert_eq!(resolve_operand(&variables, "hello"), Value::from("hello"));
    }

    #[test]
    fn integer_arguments_reject_text() {
        let mut variables = VariableStore::default();
        variables.set("n", Value::Integer(3));
        variables.set("s", Value::from("three"));
        assert_eq!(resolve_integer(&variables, "n", "index"), Ok(3));
        assert_eq!(resolve_integer(&variables, "-4", "index"), Ok(-4));
        assert!(matches!(
            resolve_integer(&variables, "s", "index"),
            Err(RuntimeError::TypeMismatch(_))
        ));
        assert!(matches!(
            resolve_integer(&variables, "many", "index"),
            Err(RuntimeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn every_opener_has_a_handler() {
        let table = OperationTable::with_defaults();
        for id in [ids::IF, ids::FOR, ids::WHILE, ids::DO, ids::SWITCH, ids::DEF] {
            assert!(is_block_opener(id));
            assert!(table.handler(id).is_some());
        }
        assert!(!is_block_opener(ids::CASE));
    }
}
