//==================================================
// File: catalog/mod.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: In-memory command catalog for the clashlang dispatcher
// Objective: Load command descriptors from JSON, compile their patterns once,
//            and resolve source lines to a single command plus bindings
//==================================================

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

mod pattern;

pub use pattern::{Bindings, CommandPattern, PatternError};

/// Catalog compiled into the binary, used when no other catalog is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../catalog/commands.json");

//==================================================
// Section 1.0 - Descriptors & Errors
//==================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pattern: String,
}

/// Both layouts seen in catalog files: a bare array or `{"commands": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Wrapped { commands: Vec<CommandDescriptor> },
    Bare(Vec<CommandDescriptor>),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {message}")]
    Io { path: String, message: String },
    #[error("failed to parse catalog: {0}")]
    Parse(String),
    #[error("duplicate command id {id} ({first} and {second})")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },
    #[error("command {id} ({name}) has a malformed pattern: {source}")]
    Pattern {
        id: u32,
        name: String,
        source: PatternError,
    },
}

//==================================================
// Section 2.0 - Catalog
//==================================================

#[derive(Debug, Clone)]
struct CatalogEntry {
    descriptor: CommandDescriptor,
    pattern: CommandPattern,
}

/// A matched statement: the winning command and its placeholder bindings.
#[derive(Debug, Clone)]
pub struct CommandMatch<'a> {
    pub command: &'a CommandDescriptor,
    pub bindings: Bindings,
}

/// Read-only command table. Entries keep their file order, which is also the
/// match order when two patterns could accept the same line.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<u32, usize>,
}

impl CommandCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|err| CatalogError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let catalog = Self::from_json_str(&data)?;
        debug!(path = %path.display(), commands = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json_str(data: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(data).map_err(|err| CatalogError::Parse(err.to_string()))?;
        let descriptors = match file {
            CatalogFile::Wrapped { commands } => commands,
            CatalogFile::Bare(commands) => commands,
        };
        Self::from_descriptors(descriptors)
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = CommandDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::empty();
        for descriptor in descriptors {
            catalog.insert(descriptor)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, descriptor: CommandDescriptor) -> Result<(), CatalogError> {
        if let Some(&existing) = self.index.get(&descriptor.id) {
            return Err(CatalogError::DuplicateId {
                id: descriptor.id,
                first: self.entries[existing].descriptor.name.clone(),
                second: descriptor.name,
            });
        }
        let pattern =
            CommandPattern::parse(&descriptor.pattern).map_err(|source| CatalogError::Pattern {
                id: descriptor.id,
                name: descriptor.name.clone(),
                source,
            })?;
        if pattern.has_adjacent_placeholders() {
            warn!(
                id = descriptor.id,
                pattern = %descriptor.pattern,
                "pattern has adjacent placeholders; later ones cannot be bound reliably"
            );
        }
        self.index.insert(descriptor.id, self.entries.len());
        self.entries.push(CatalogEntry {
            descriptor,
            pattern,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CommandDescriptor> {
        self.index.get(&id).map(|&idx| &self.entries[idx].descriptor)
    }

    pub fn pattern(&self, id: u32) -> Option<&CommandPattern> {
        self.index.get(&id).map(|&idx| &self.entries[idx].pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    /// First command in catalog order whose pattern accepts `line`.
    pub fn match_line(&self, line: &str) -> Option<CommandMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            entry.pattern.match_line(line).map(|bindings| CommandMatch {
                command: &entry.descriptor,
                bindings,
            })
        })
    }

    /// Every command whose pattern accepts `line`. More than one id means the
    /// catalog has a collision for this input.
    pub fn candidates(&self, line: &str) -> Vec<u32> {
        self.entries
            .iter()
            .filter(|entry| entry.pattern.match_line(line).is_some())
            .map(|entry| entry.descriptor.id)
            .collect()
    }
}

//==================================================
// Section 3.0 - Tests
//==================================================


//==================================================
// End of file
//==================================================
