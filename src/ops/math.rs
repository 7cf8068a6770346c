//==================================================
// File: ops/math.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arithmetic evaluation and numeric commands
// Objective: Single-operator expressions with Integer/Float widening plus the
//            float math and random helpers
//==================================================

use rand::Rng;

use super::{OpResult, compute, resolve_integer, resolve_operand, variable};
use crate::catalog::Bindings;
use crate::interpreter::{Interpreter, RuntimeError, VariableStore};
use crate::value::Value;

/// Tried in this order; the first one that splits the expression into
/// exactly two non-empty parts is applied. A sign on the first operand is not
/// an operator, so `-4-2` is `(-4) - 2`.
const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

//==================================================
// Section 1.0 - Expressions
//==================================================

/// Evaluate `left op right` or a single operand. Whitespace is ignored.
pub fn evaluate_expression(expr: &str, variables: &VariableStore) -> Result<Value, RuntimeError> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();

    for op in OPERATORS {
        if let Some((left, right)) = split_binary(&compact, op) {
            let left = resolve_operand(variables, left);
            let right = resolve_operand(variables, right);
            return apply(op, &left, &right);
        }
    }

    Ok(resolve_operand(variables, &compact))
}

/// Split on the single occurrence of `op` past the first character.
fn split_binary(expr: &str, op: char) -> Option<(&str, &str)> {
    let mut found = expr
        .char_indices()
        .skip(1)
        .filter(|&(_, c)| c == op)
        .map(|(idx, _)| idx);
    let at = found.next()?;
    if found.next().is_some() {
        return None;
    }
    let right = &expr[at + op.len_utf8()..];
    (!right.is_empty()).then_some((&expr[..at], right))
}

fn apply(op: char, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
        let (a, b) = (*a, *b);
        let result = match op {
            '+' => a.checked_add(b),
            '-' => a.checked_sub(b),
            '*' => a.checked_mul(b),
            _ => {
                if b == 0 {
                    return Err(RuntimeError::DivideByZero);
                }
                a.checked_div(b)
            }
        };
        return result
            .map(Value::Integer)
            .ok_or_else(|| RuntimeError::InvalidArgument(format!("integer overflow in {a} {op} {b}")));
    }

    let a = left.expect_number("left operand")?;
    let b = right.expect_number("right operand")?;
    let result = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        _ => {
            if b == 0.0 {
                return Err(RuntimeError::DivideByZero);
            }
            a / b
        }
    };
    Ok(Value::Float(result))
}

/// `Solve expr`, also accepting `Solve name = expr` where the label is
/// ignored. Failures leave Integer 0 in the register.
pub(super) fn solve(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let expr = bindings.get("expr");
    let expr = expr.split_once('=').map_or(expr, |(_, rhs)| rhs);
    compute(interp, Value::Integer(0), |interp| {
        evaluate_expression(expr, interp.variables())
    })
}

//==================================================
// Section 2.0 - Numeric Commands
//==================================================

fn unary(interp: &mut Interpreter, bindings: &Bindings, f: fn(f64) -> f64) -> OpResult {
    let name = bindings.get("var");
    compute(interp, Value::Float(0.0), |interp| {
        let x = variable(interp.variables(), name).expect_number(&format!("variable '{name}'"))?;
        Ok(Value::Float(f(x)))
    })
}

pub(super) fn abs(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::abs)
}

pub(super) fn sqrt(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::sqrt)
}

pub(super) fn round(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::round)
}

pub(super) fn sin(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::sin)
}

pub(super) fn cos(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::cos)
}

pub(super) fn tan(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::tan)
}

pub(super) fn log(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::ln)
}

pub(super) fn log10(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    unary(interp, bindings, f64::log10)
}

/// Base and exponent may be variables or literals.
pub(super) fn pow(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Float(0.0), |interp| {
        let variables = interp.variables();
        let base = resolve_operand(variables, bindings.get("base")).expect_number("base")?;
        let exponent =
            resolve_operand(variables, bindings.get("exponent")).expect_number("exponent")?;
        Ok(Value::Float(base.powf(exponent)))
    })
}

pub(super) fn random(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    compute(interp, Value::Float(0.0), |_| {
        Ok(Value::Float(rand::random::<f64>()))
    })
}

/// Inclusive on both ends.
pub(super) fn randint(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    compute(interp, Value::Integer(0), |interp| {
        let variables = interp.variables();
        let min = resolve_integer(variables, bindings.get("min"), "min")?;
        let max = resolve_integer(variables, bindings.get("max"), "max")?;
        if min > max {
            return Err(RuntimeError::InvalidArgument(format!(
                "randint range {min}..{max} is empty"
            )));
        }
        Ok(Value::Integer(rand::thread_rng().gen_range(min..=max)))
    })
}

//==================================================
// Section 3.0 - Tests
//==================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(expr: &str) -> Result<Value, RuntimeError> {
        let mut variables = VariableStore::default();
        variables.set("a", Value::Integer(7));
        variables.set("f", Value::Float(0.5));
        variables.set("t", Value::from("word"));
        evaluate_expression(expr, &variables)
    }

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert_eq!(eval("2 + 3"), Ok(Value::Integer(5)));
        assert_eq!(eval("a - 10"), Ok(Value::Integer(-3)));
        assert_eq!(eval("a * 2"), Ok(Value::Integer(14)));
        assert_eq!(eval("a / 2"), Ok(Value::Integer(3)));
    }

    #[test]
    fn float_operand_widens() {
        assert_eq!(eval("a + f"), Ok(Value::Float(7.5)));
        assert_eq!(eval("1.5 * 2"), Ok(Value::Float(3.0)));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(eval("10/0"), Err(RuntimeError::DivideByZero));
        assert_eq!(eval("f / 0.0"), Err(RuntimeError::DivideByZero));
    }

    #[test]
    fn text_operand_is_a_type_error() {
        assert!(matches!(eval("t + 1"), Err(RuntimeError::TypeMismatch(_))));
    }

    #[test]
    fn leading_sign_belongs_to_the_left_operand() {
        assert_eq!(eval("-4 - 2"), Ok(Value::Integer(-6)));
        assert_eq!(eval("-4 + a"), Ok(Value::Integer(3)));
        assert_eq!(eval("a--3"), Ok(Value::from("a--3")));
    }

    #[test]
    fn single_operand_and_negative_literal() {
        assert_eq!(eval("a"), Ok(Value::Integer(7)));
        assert_eq!(eval("-4"), Ok(Value::Integer(-4)));
        assert_eq!(eval("hello"), Ok(Value::from("hello")));
    }
}
