//==================================================
// File: ops/data.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Array, list and dictionary commands
// Objective: Create collections in the result register and update stored
//            collections in place
//==================================================

use std::collections::HashMap;

use super::{OpResult, compute, resolve_integer, resolve_operand, variable};
use crate::catalog::Bindings;
use crate::interpreter::{Interpreter, RuntimeError, VariableStore};
use crate::value::Value;

fn checked_index(index: i64, len: usize) -> Result<usize, RuntimeError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(RuntimeError::IndexOutOfRange { index, len })
}

fn type_error(name: &str, found: &Value, expected: &str) -> RuntimeError {
    RuntimeError::TypeMismatch(format!(
        "variable '{name}' is {}, expected {expected}",
        found.type_name()
    ))
}

/// Mutable access to a stored collection; undefined names are reported as
/// `absent`.
fn stored_mut<'a>(
    interp: &'a mut Interpreter,
    name: &str,
) -> Result<&'a mut Value, RuntimeError> {
    interp
        .variables_mut()
        .get_mut(name)
        .ok_or_else(|| type_error(name, &Value::Absent, "collection"))
}

/// Dictionary key: a text variable's value, else the literal token.
fn dict_key(variables: &VariableStore, token: &str) -> String {
    match variables.get(token) {
        Some(Value::Text(key)) => key.clone(),
        _ => token.to_string(),
    }
}

//==================================================
// Section 1.0 - Arrays
//==================================================

pub(super) fn array_create(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Absent, |interp| {
        let size = resolve_integer(interp.variables(), bindings.get("size"), "array size")?;
        let size = usize::try_from(size).map_err(|_| {
            RuntimeError::InvalidArgument(format!("array size {size} is negative"))
        })?;
        Ok(Value::Array(vec![Value::Absent; size]))
    })
}

pub(super) fn array_set(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("array");
    let index = resolve_integer(interp.variables(), bindings.get("index"), "index")?;
    let value = resolve_operand(interp.variables(), bindings.get("value"));
    match stored_mut(interp, name)? {
        Value::Array(items) => {
            let slot = checked_index(index, items.len())?;
            items[slot] = value;
            Ok(())
        }
        other => Err(type_error(name, other, "array")),
    }
}

pub(super) fn array_get(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Absent, |interp| {
        let variables = interp.variables();
        let name = bindings.get("array");
        let index = resolve_integer(variables, bindings.get("index"), "index")?;
        match variable(variables, name) {
            Value::Array(items) => Ok(items[checked_index(index, items.len())?].clone()),
            other => Err(type_error(name, other, "array")),
        }
    })
}

//==================================================
// Section 2.0 - Lists
//==================================================

pub(super) fn list_create(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    interp.set_last_result(Value::List(Vec::new()));
    Ok(())
}

pub(super) fn list_append(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("list");
    let value = resolve_operand(interp.variables(), bindings.get("value"));
    match stored_mut(interp, name)? {
        Value::List(items) => {
            items.push(value);
            Ok(())
        }
        other => Err(type_error(name, other, "list")),
    }
}

pub(super) fn list_get(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Absent, |interp| {
        let variables = interp.variables();
        let name = bindings.get("list");
        let index = resolve_integer(variables, bindings.get("index"), "index")?;
        match variable(variables, name) {
            Value::List(items) => Ok(items[checked_index(index, items.len())?].clone()),
            other => Err(type_error(name, other, "list")),
        }
    })
}

//==================================================
// Section 3.0 - Dictionaries
//==================================================

pub(super) fn dict_create(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    interp.set_last_result(Value::Dict(HashMap::new()));
    Ok(())
}

pub(super) fn dict_set(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("dict");
    let key = dict_key(interp.variables(), bindings.get("key"));
    let value = resolve_operand(interp.variables(), bindings.get("value"));
    match stored_mut(interp, name)? {
        Value::Dict(map) => {
            map.insert(key, value);
            Ok(())
        }
        other => Err(type_error(name, other, "dict")),
    }
}

pub(super) fn dict_get(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Absent, |interp| {
        let variables = interp.variables();
        let name = bindings.get("dict");
        let key = dict_key(variables, bindings.get("key"));
        match variable(variables, name) {
            Value::Dict(map) => map
                .get(&key)
                .cloned()
                .ok_or(RuntimeError::KeyNotFound(key)),
            other => Err(type_error(name, other, "dict")),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_bounds_checked() {
        assert_eq!(checked_index(0, 3), Ok(0));
        assert_eq!(checked_index(2, 3), Ok(2));
        assert_eq!(
            checked_index(3, 3),
            Err(RuntimeError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            checked_index(-1, 3),
            Err(RuntimeError::IndexOutOfRange { index: -1, len: 3 })
        );
    }

    #[test]
    fn keys_come_from_text_variables_or_literals() {
        let mut variables = VariableStore::default();
        variables.set("k", Value::from("colour"));
        variables.set("n", Value::Integer(1));
        assert_eq!(dict_key(&variables, "k"), "colour");
        assert_eq!(dict_key(&variables, "name"), "name");
        assert_eq!(dict_key(&variables, "n"), "n");
    }
}
