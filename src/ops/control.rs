//==================================================
// File: ops/control.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Block-opening handlers for if/for/while/do/switch
// Objective: Validate each opener's arguments and start capture; replay is
//            driven by the engine when the terminator arrives
//==================================================

use super::{OpResult, resolve_integer};
use crate::catalog::Bindings;
use crate::interpreter::{BlockKind, Guard, Interpreter, RuntimeError};

/// Open `kind`, or a discarded block when the opener's arguments are bad so
/// the body is still swallowed rather than run at top level.
fn open_or_discard(interp: &mut Interpreter, kind: Result<BlockKind, RuntimeError>) -> OpResult {
    match kind {
        Ok(kind) => interp.open_block(kind),
        Err(err) => {
            interp.open_block(BlockKind::Discarded)?;
            Err(err)
        }
    }
}

pub(super) fn if_block(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    // Guard is evaluated once, at entry.
    let taken = Guard::parse(bindings).and_then(|guard| guard.holds(interp.variables()));
    interp.open_block(BlockKind::If {
        taken: matches!(taken, Ok(true)),
    })?;
    taken.map(drop)
}

pub(super) fn for_block(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let variables = interp.variables();
    let kind = resolve_integer(variables, bindings.get("start"), "range start").and_then(|start| {
        let end = resolve_integer(variables, bindings.get("end"), "range end")?;
        Ok(BlockKind::For {
            var: bindings.get("var").to_string(),
            start,
            end,
        })
    });
    open_or_discard(interp, kind)
}

pub(super) fn while_block(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let kind = Guard::parse(bindings).map(|guard| BlockKind::While { guard });
    open_or_discard(interp, kind)
}

pub(super) fn do_block(interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    interp.open_block(BlockKind::DoWhile)
}

/// Reached only when no `do` block is open; inside one the engine consumes
/// the tail itself.
pub(super) fn while_tail(_interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    Err(RuntimeError::UnbalancedBlock("} while".to_string()))
}

pub(super) fn switch_block(interp: &mut Interpreter, bindings: &Bindings) -> OpResult {
    let name = bindings.get("var");
    let kind = interp
        .variables()
        .get(name)
        .ok_or_else(|| RuntimeError::TypeMismatch(format!("switch subject '{name}' is not defined")))
        .and_then(|value| value.expect_integer(&format!("switch subject '{name}'")))
        .map(|subject| BlockKind::Switch {
            subject,
            matched: false,
        });
    open_or_discard(interp, kind)
}

pub(super) fn case_arm(_interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    Err(RuntimeError::UnbalancedBlock("case".to_string()))
}

pub(super) fn default_arm(_interp: &mut Interpreter, _bindings: &Bindings) -> OpResult {
    Err(RuntimeError::UnbalancedBlock("default".to_string()))
}
