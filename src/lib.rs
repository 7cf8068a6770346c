//=====================================================
// File: lib.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: clashlang library main interface
// Objective: Export the command catalog, pattern matcher, value model,
//            execution engine and operation table for the line interpreter
//=====================================================

pub mod catalog;
pub mod config;
pub mod interpreter;
pub mod ops;
pub mod value;

pub use catalog::{Bindings, CommandCatalog, CommandDescriptor, CommandMatch, CommandPattern};
pub use config::InterpreterConfig;
pub use interpreter::{
    BufferConsole, Console, ErrorCode, Interpreter, RuntimeError, ScriptError, StdConsole,
};
pub use value::Value;

//=====================================================
// End of file
//=====================================================
