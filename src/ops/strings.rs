//==================================================
// File: ops/strings.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Text commands
// Objective: Concatenation plus the char-based string helpers; every result
//            lands in the result register
//==================================================

use super::{OpResult, compute, resolve_integer, variable};
use crate::catalog::Bindings;
use crate::interpreter::{Interpreter, RuntimeError, VariableStore};
use crate::value::Value;

/// `a + b + c` over text variables, joined with single spaces.
pub fn evaluate_text_expression(
    expr: &str,
    variables: &VariableStore,
) -> Result<Value, RuntimeError> {
    let mut parts = Vec::new();
    for name in expr.split('+').map(str::trim) {
        let text = variable(variables, name).expect_text(&format!("variable '{name}'"))?;
        parts.push(text);
    }
    Ok(Value::Text(parts.join(" ")))
}

/// Text argument: a text variable, else the literal token itself.
fn text_arg<'a>(variables: &'a VariableStore, token: &'a str) -> Result<&'a str, RuntimeError> {
    match variables.get(token) {
        Some(value) => value.expect_text(&format!("variable '{token}'")),
        None => Ok(token),
    }
}

fn text_var<'a>(variables: &'a VariableStore, name: &str) -> Result<&'a str, RuntimeError> {
    variable(variables, name).expect_text(&format!("variable '{name}'"))
}

pub(super) fn text(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        evaluate_text_expression(bindings.get("expr"), interp.variables())
    })
}

/// Char count, so multi-byte text reports what a reader sees.
pub(super) fn len(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Integer(0), |interp| {
        let text = text_var(interp.variables(), bindings.get("var"))?;
        Ok(Value::Integer(text.chars().count() as i64))
    })
}

pub(super) fn upper(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        let text = text_var(interp.variables(), bindings.get("var"))?;
        Ok(Value::Text(text.to_uppercase()))
    })
}

pub(super) fn lower(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        let text = text_var(interp.variables(), bindings.get("var"))?;
        Ok(Value::Text(text.to_lowercase()))
    })
}

/// `substr s start length`. The start must fall inside the text; the length
/// is clamped to what remains.
pub(super) fn substr(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        let variables = interp.variables();
        let text = text_var(variables, bindings.get("var"))?;
        let start = resolve_integer(variables, bindings.get("start"), "start")?;
        let length = resolve_integer(variables, bindings.get("length"), "length")?;

        let count = text.chars().count();
        if start < 0 || start as usize >= count {
            return Err(RuntimeError::IndexOutOfRange { index: start, len: count });
        }
        if length < 0 {
            return Err(RuntimeError::InvalidArgument(format!(
                "substring length {length} is negative"
            )));
        }
        let slice: String = text
            .chars()
            .skip(start as usize)
            .take(length as usize)
            .collect();
        Ok(Value::Text(slice))
    })
}

/// Char index of the first occurrence, or -1.
pub(super) fn find(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Integer(-1), |interp| {
        let variables = interp.variables();
        let haystack = text_arg(variables, bindings.get("str"))?;
        let needle = text_arg(variables, bindings.get("sub"))?;
        let position = haystack
            .find(needle)
            .map_or(-1, |byte| haystack[..byte].chars().count() as i64);
        Ok(Value::Integer(position))
    })
}

pub(super) fn replace(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        let variables = interp.variables();
        let text = text_arg(variables, bindings.get("str"))?;
        let old = text_arg(variables, bindings.get("old"))?;
        let new = text_arg(variables, bindings.get("new"))?;
        if old.is_empty() {
            return Ok(Value::Text(text.to_string()));
        }
        Ok(Value::Text(text.replace(old, new)))
    })
}

/// An empty separator splits into single characters.
pub(super) fn split(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::List(Vec::new()), |interp| {
        let variables = interp.variables();
        let text = text_arg(variables, bindings.get("str"))?;
        let sep = text_arg(variables, bindings.get("sep"))?;
        let items = if sep.is_empty() {
            text.chars().map(|c| Value::Text(c.to_string())).collect()
        } else {
            text.split(sep).map(Value::from).collect()
        };
        Ok(Value::List(items))
    })
}

pub(super) fn join(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |interp| {
        let variables = interp.variables();
        let name = bindings.get("list");
        let sep = text_arg(variables, bindings.get("sep"))?;
        let items = match variable(variables, name) {
            Value::List(items) | Value::Array(items) => items,
            other => {
                return Err(RuntimeError::TypeMismatch(format!(
                    "variable '{name}' is {}, expected list",
                    other.type_name()
                )));
            }
        };
        let parts = items
            .iter()
            .map(|item| item.expect_text("list element"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Text(parts.join(sep)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VariableStore {
        let mut variables = VariableStore::default();
        variables.set("first", Value::from("hello"));
        variables.set("second", Value::from("world"));
        variables.set("n", Value::Integer(3));
        variables
    }

    #[test]
    fn text_expression_joins_with_spaces() {
        let variables = store();
        assert_eq!(
            evaluate_text_expression("first + second", &variables),
            Ok(Value::from("hello world"))
        );
        assert_eq!(
            evaluate_text_expression("first", &variables),
            Ok(Value::from("hello"))
        );
    }

    #[test]
    fn text_expression_rejects_non_text() {
        let variables = store();
        assert!(matches!(
            evaluate_text_expression("first + n", &variables),
            Err(RuntimeError::TypeMismatch(_))
        ));
        assert!(matches!(
            evaluate_text_expression("missing", &variables),
            Err(RuntimeError::TypeMismatch(_))
        ));
    }

    #[test]
    fn literal_text_arguments_fall_back_to_the_token() {
        let variables = store();
        assert_eq!(text_arg(&variables, "first"), Ok("hello"));
        assert_eq!(text_arg(&variables, "lo"), Ok("lo"));
        assert!(text_arg(&variables, "n").is_err());
    }
}
