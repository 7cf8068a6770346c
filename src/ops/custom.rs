//==================================================
// File: ops/custom.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: User-defined function commands
// Objective: Define bodies by capture and run them through the engine
//==================================================

use super::OpResult;
use crate::catalog::Bindings;
use crate::interpreter::{BlockKind, Interpreter};

/// `def name {`: start from an empty body, then capture it up to `}`.
pub(super) fn def(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("name").to_string();
    interp.context.functions.define(name.clone());
    interp.open_block(BlockKind::Function { name })
}

/// `jump name` / `call name`. Undefined names do nothing.
pub(super) fn call(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    interp.call_function(bindings.get("func"))
}
