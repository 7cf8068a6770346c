//==================================================
// File: interpreter/context.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Mutable state threaded through every statement
// Objective: Global variable store, function table, last-result register and
//            the single optional capture block
//==================================================

use std::collections::HashMap;

use super::control::Block;
use crate::value::Value;

//==================================================
// Section 1.0 - Variable Store
//==================================================

/// Flat global variables. No scoping: function bodies share this store.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    values: HashMap<String, Value>,
}

impl VariableStore {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries ordered by variable name.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<(&str, &Value)> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

//==================================================
// Section 2.0 - Function Table
//==================================================

/// Function name to its raw, unexecuted body lines.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    bodies: HashMap<String, Vec<String>>,
}

impl FunctionTable {
    /// Create an empty body, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>) {
        self.bodies.insert(name.into(), Vec::new());
    }

    pub fn define_with(&mut self, name: impl Into<String>, body: Vec<String>) {
        self.bodies.insert(name.into(), body);
    }

    pub fn append(&mut self, name: &str, line: impl Into<String>) {
        self.bodies
            .entry(name.to_string())
            .or_default()
            .push(line.into());
    }

    pub fn body(&self, name: &str) -> Option<&[String]> {
        self.bodies.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

//==================================================
// Section 3.0 - Execution Context
//==================================================

#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub variables: VariableStore,
    pub functions: FunctionTable,
    /// Written by compute commands, read by the following store command.
    pub last_result: Value,
    /// The one block currently under capture, if any.
    pub block: Option<Block>,
}

impl ExecutionContext {
    pub fn is_capturing(&self) -> bool {
        self.block.is_some()
    }
}
