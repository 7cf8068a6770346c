//==================================================
// File: ops/system.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Clock and environment queries
// Objective: Publish local time, date and environment values as text results
//==================================================

use std::env;

use chrono::Local;

use super::{OpResult, compute};
use crate::catalog::Bindings;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn time(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |_| {
        Ok(Value::Text(Local::now().format("%H:%M:%S").to_string()))
    })
}

pub(super) fn date(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    compute(interp, Value::Text(String::new()), |_| {
        Ok(Value::Text(Local::now().format("%Y-%m-%d").to_string()))
    })
}

/// Unset variables read as empty text.
pub(super) fn env(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    compute(interp, Value::Text(String::new()), |_| {
        Ok(Value::Text(env::var(name).unwrap_or_default()))
    })
}
