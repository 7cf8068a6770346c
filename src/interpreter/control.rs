//==================================================
// File: interpreter/control.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Block capture and replay for compound statements
// Objective: Model the single active block explicitly, collect its lines until
//            the terminator, then replay them per construct
//==================================================

use tracing::debug;

use super::Interpreter;
use super::context::VariableStore;
use super::errors::RuntimeError;
use crate::catalog::Bindings;
use crate::ops::{self, ids};
use crate::value::Value;

/// Line that closes the active block.
pub const BLOCK_END: &str = "}";

//==================================================
// Section 1.0 - Block Model
//==================================================

/// Integer equality test `var == value`, evaluated against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    pub var: String,
    pub value: i64,
}

impl Guard {
    pub fn parse(bindings: &Bindings) -> Result<Self, RuntimeError> {
        let raw = bindings.get("value");
        let value = raw.parse::<i64>().map_err(|_| {
            RuntimeError::InvalidArgument(format!("comparison value '{raw}' is not an integer"))
        })?;
        Ok(Self {
            var: bindings.get("var").to_string(),
            value,
        })
    }

    /// A missing or non-integer subject is a type error, never a quiet false.
    pub fn holds(&self, variables: &VariableStore) -> Result<bool, RuntimeError> {
        let subject = variables.get(&self.var).unwrap_or(&Value::Absent);
        let current = subject.expect_integer(&format!("variable '{}'", self.var))?;
        Ok(current == self.value)
    }
}

/// A `case`/`default` line inside a switch. It closes the section of
/// buffered lines that precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmLabel {
    /// `None` when the case literal was not an integer; such sections never fire.
    Case(Option<i64>),
    Default,
}

impl ArmLabel {
    fn selects(self, subject: i64) -> bool {
        match self {
            ArmLabel::Case(value) => value == Some(subject),
            ArmLabel::Default => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    If { taken: bool },
    For { var: String, start: i64, end: i64 },
    While { guard: Guard },
    DoWhile,
    /// `matched` flips once a section has run; later sections are skipped.
    Switch { subject: i64, matched: bool },
    Function { name: String },
    /// Opener failed; the body is still consumed so it never runs unguarded.
    Discarded,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::If { .. } => "if",
            BlockKind::For { .. } => "for",
            BlockKind::While { .. } => "while",
            BlockKind::DoWhile => "do",
            BlockKind::Switch { .. } => "switch",
            BlockKind::Function { .. } => "def",
            BlockKind::Discarded => "discarded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Captured body. For a switch, the lines since the last `case`/`default`.
    pub lines: Vec<String>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// What a captured line means for the open block.
enum CaptureAction {
    Close(Option<Guard>),
    Arm(ArmLabel),
    Reject,
    Append,
}

//==================================================
// Section 2.0 - Capture & Replay
//==================================================

impl Interpreter {
    pub(crate) fn open_block(&mut self, kind: BlockKind) -> Result<(), RuntimeError> {
        if let Some(open) = &self.context.block {
            return Err(RuntimeError::NestedBlock(format!(
                "{} inside {}",
                kind.name(),
                open.kind.name()
            )));
        }
        debug!(block = kind.name(), "capture started");
        self.context.block = Some(Block::new(kind));
        Ok(())
    }

    /// Route one line while a block is open: structural lines of that block
    /// are acted on, openers are rejected, everything else is buffered.
    pub(crate) fn capture_line(&mut self, line: &str) {
        let Some(block) = &self.context.block else {
            return;
        };
        let in_switch = matches!(block.kind, BlockKind::Switch { .. });
        let in_do = matches!(block.kind, BlockKind::DoWhile);

        let action = if line == BLOCK_END {
            CaptureAction::Close(None)
        } else {
            let matched = self
                .catalog
                .match_line(line)
                .map(|matched| (matched.command.id, matched.bindings));
            match matched {
                Some((ids::WHILE_TAIL, bindings)) if in_do => match Guard::parse(&bindings) {
                    Ok(guard) => CaptureAction::Close(Some(guard)),
                    Err(err) => {
                        self.report(err);
                        CaptureAction::Close(None)
                    }
                },
                Some((ids::CASE, bindings)) if in_switch => {
                    let raw = bindings.get("value");
                    let value = raw.parse::<i64>().ok();
                    if value.is_none() {
                        self.report(RuntimeError::InvalidArgument(format!(
                            "case value '{raw}' is not an integer"
                        )));
                    }
                    CaptureAction::Arm(ArmLabel::Case(value))
                }
                Some((ids::DEFAULT, _)) if in_switch => CaptureAction::Arm(ArmLabel::Default),
                Some((id, _)) if ops::is_block_opener(id) => CaptureAction::Reject,
                _ => CaptureAction::Append,
            }
        };

        match action {
            CaptureAction::Close(tail) => self.finish_block(tail),
            CaptureAction::Arm(label) => self.close_section(label),
            CaptureAction::Reject => {
                let open = self
                    .context
                    .block
                    .as_ref()
                    .map_or("block", |block| block.kind.name());
                self.report(RuntimeError::NestedBlock(format!("'{line}' inside {open}")));
            }
            CaptureAction::Append => {
                if let Some(block) = &mut self.context.block {
                    block.push(line);
                }
            }
        }
    }

    /// End capture and replay the block. A terminator with nothing open is
    /// ignored.
    pub(crate) fn finish_block(&mut self, tail: Option<Guard>) {
        let Some(block) = self.context.block.take() else {
            debug!("terminator without an open block");
            return;
        };
        debug!(
            block = block.kind.name(),
            lines = block.lines.len(),
            "capture finished"
        );
        if let Err(err) = self.replay(block, tail) {
            self.report(err);
        }
    }

    /// `case`/`default` inside a switch: run the lines buffered since the
    /// previous label when this label selects the subject and nothing has run
    /// yet, then start a fresh section.
    fn close_section(&mut self, label: ArmLabel) {
        let Some(mut block) = self.context.block.take() else {
            return;
        };
        let fire = match &mut block.kind {
            BlockKind::Switch { subject, matched } => {
                let fire = !*matched && label.selects(*subject);
                *matched |= fire;
                fire
            }
            _ => false,
        };
        let lines = std::mem::take(&mut block.lines);
        debug!(?label, fire, lines = lines.len(), "switch section closed");

        // The switch is lifted off while the section runs so its lines execute
        // instead of being captured again.
        if fire {
            self.run_lines(&lines);
        }
        if let Some(stray) = self.context.block.replace(block) {
            self.report(RuntimeError::UnbalancedBlock(format!(
                "{} left open inside switch",
                stray.kind.name()
            )));
        }
    }

    fn replay(&mut self, block: Block, tail: Option<Guard>) -> Result<(), RuntimeError> {
        let Block { kind, lines } = block;
        match kind {
            BlockKind::If { taken } => {
                if taken {
                    self.run_lines(&lines);
                }
            }
            BlockKind::For { var, start, end } => {
                for i in start..=end {
                    self.context.variables.set(var.clone(), Value::Integer(i));
                    self.run_lines(&lines);
                }
            }
            BlockKind::While { guard } => {
                while guard.holds(&self.context.variables)? {
                    self.run_lines(&lines);
                }
            }
            BlockKind::DoWhile => loop {
                self.run_lines(&lines);
                match &tail {
                    Some(guard) if guard.holds(&self.context.variables)? => continue,
                    _ => break,
                }
            },
            BlockKind::Switch { .. } => {
                if !lines.is_empty() {
                    debug!(lines = lines.len(), "switch lines after the last label dropped");
                }
            }
            BlockKind::Function { name } => {
                self.context.functions.define_with(name, lines);
            }
            BlockKind::Discarded => {}
        }
        Ok(())
    }

    pub(crate) fn run_lines(&mut self, lines: &[String]) {
        for line in lines {
            self.execute_statement(line);
        }
    }
}
