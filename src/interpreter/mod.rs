//==================================================
// File: interpreter/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Statement execution engine for clashlang
// Objective: Load programs, interpret one line at a time against the catalog,
//            dispatch matches, and report failures without aborting the script
//==================================================

use tracing::debug;

use crate::catalog::CommandCatalog;
use crate::ops::OperationTable;
use crate::value::Value;

mod console;
mod context;
pub mod control;
mod errors;

pub use console::{BufferConsole, Console, StdConsole};
pub use context::{ExecutionContext, FunctionTable, VariableStore};
pub use control::{ArmLabel, Block, BlockKind, Guard};
pub use errors::{ErrorCode, RuntimeError, ScriptError, runtime_error_code};

pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

const COMMENT: &str = "//";
const FUNCTION_OPEN: &str = "function (";
const FUNCTION_CLOSE: &str = ")";
const MEMORY_START: &str = "memory start (";
const MEMORY_LOAD: &str = "memory load (";
const MEMORY_OUT: &str = "memory out";

//==================================================
// Section 1.0 - Interpreter
//==================================================

pub struct Interpreter {
    catalog: CommandCatalog,
    operations: OperationTable,
    pub(crate) context: ExecutionContext,
    console: Box<dyn Console>,
    call_depth: usize,
    max_call_depth: usize,
}

impl Interpreter {
    pub fn new(catalog: CommandCatalog) -> Self {
        Self::with_console(catalog, StdConsole)
    }

    pub fn with_console(catalog: CommandCatalog, console: impl Console + 'static) -> Self {
        Self {
            catalog,
            operations: OperationTable::with_defaults(),
            context: ExecutionContext::default(),
            console: Box::new(console),
            call_depth: 0,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn catalog(&self) -> &CommandCatalog {
        &self.catalog
    }

    pub fn operations_mut(&mut self) -> &mut OperationTable {
        &mut self.operations
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn variables(&self) -> &VariableStore {
        &self.context.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableStore {
        &mut self.context.variables
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.context.functions
    }

    pub fn last_result(&self) -> &Value {
        &self.context.last_result
    }

    pub fn set_last_result(&mut self, value: Value) {
        self.context.last_result = value;
    }

    pub fn console_mut(&mut self) -> &mut dyn Console {
        self.console.as_mut()
    }

    //==================================================
    // Section 2.0 - Program Loader
    //==================================================

    /// Run a whole source file. `Function ( name )` ... `)` spans are stored
    /// verbatim as function bodies; every other line executes in order.
    pub fn execute_program(&mut self, source: &str) {
        let mut current: Option<String> = None;

        for raw in source.lines() {
            let line = strip_comment(raw);
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = strip_directive(line, FUNCTION_OPEN) {
                let name = rest.trim_end_matches(FUNCTION_CLOSE).trim().to_string();
                debug!(function = %name, "function definition started");
                self.context.functions.define(name.clone());
                current = Some(name);
            } else if line.eq_ignore_ascii_case(MEMORY_START) {
                continue;
            } else if line == FUNCTION_CLOSE {
                current = None;
            } else if let Some(name) = &current {
                self.context.functions.append(name, line);
            } else {
                self.execute_statement(line);
            }
        }
    }

    //==================================================
    // Section 3.0 - Statement Execution
    //==================================================

    /// Interpret exactly one logical line.
    pub fn execute_statement(&mut self, line: &str) {
        let line = strip_comment(line);
        if line.is_empty() {
            return;
        }

        if self.context.is_capturing() {
            self.capture_line(line);
            return;
        }

        if let Some(names) = strip_directive(line, MEMORY_LOAD) {
            self.load_functions(names);
            return;
        }
        if line.eq_ignore_ascii_case(MEMORY_OUT) {
            self.dump_memory();
            return;
        }
        if line == control::BLOCK_END {
            self.finish_block(None);
            return;
        }

        let matched = self
            .catalog
            .match_line(line)
            .map(|matched| (matched.command.id, matched.bindings));
        let Some((id, bindings)) = matched else {
            debug!(line, "no command matched");
            return;
        };

        let Some(handler) = self.operations.handler(id) else {
            debug!(id, line, "matched command has no handler");
            return;
        };
        debug!(id, line, "dispatch");
        if let Err(err) = handler(self, &bindings) {
            self.report(err);
        }
    }

    /// Run a function body line by line against the shared store. Unknown
    /// names are a no-op.
    pub fn call_function(&mut self, name: &str) -> Result<(), RuntimeError> {
        let Some(body) = self.context.functions.body(name).map(<[String]>::to_vec) else {
            debug!(function = name, "call to undefined function ignored");
            return Ok(());
        };
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::StackOverflow(self.max_call_depth));
        }
        self.call_depth += 1;
        self.run_lines(&body);
        self.call_depth -= 1;
        Ok(())
    }

    /// `Memory load (a, b)`: run each named body inline, in list order.
    pub fn load_functions(&mut self, names: &str) {
        let names = names.trim().trim_end_matches(FUNCTION_CLOSE);
        for name in names.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if let Err(err) = self.call_function(name) {
                self.report(err);
            }
        }
    }

    /// `memory out`: one `N) value` line per variable, ordered by name.
    pub fn dump_memory(&mut self) {
        let lines: Vec<String> = self
            .context
            .variables
            .sorted()
            .into_iter()
            .enumerate()
            .map(|(idx, (_, value))| format!("{}) {}", idx + 1, value))
            .collect();
        for line in lines {
            self.console.write_line(&line);
        }
    }

    /// Report a failed statement on the console and keep going.
    pub fn report(&mut self, err: RuntimeError) {
        debug!(code = err.code(), "{err}");
        let rendered = ScriptError::from(err).render();
        self.console.write_line(&rendered);
    }
}

//==================================================
// Section 4.0 - Line Helpers
//==================================================

fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT)
        .map_or(line, |(code, _)| code)
        .trim()
}

/// Case-insensitive ASCII prefix strip for the loader directives.
fn strip_directive<'a>(line: &'a str, directive: &str) -> Option<&'a str> {
    let head = line.get(..directive.len())?;
    head.eq_ignore_ascii_case(directive)
        .then(|| &line[directive.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_whitespace_are_stripped() {
        assert_eq!(strip_comment("  Print a // show a"), "Print a");
        assert_eq!(strip_comment("// only a comment"), "");
    }

    #[test]
    fn directives_ignore_case() {
        assert_eq!(strip_directive("MEMORY LOAD (a, b)", MEMORY_LOAD), Some("a, b)"));
        assert_eq!(strip_directive("Function ( greet )", FUNCTION_OPEN), Some(" greet )"));
        assert_eq!(strip_directive("mem", MEMORY_LOAD), None);
    }
}
