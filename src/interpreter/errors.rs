use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("key '{0}' not found")]
    KeyNotFound(String),
    #[error("division by zero")]
    DivideByZero,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("io failure: {0}")]
    Io(String),
    #[error("nested block '{0}' is not supported; close the open block first")]
    NestedBlock(String),
    #[error("'{0}' is only valid inside its enclosing block")]
    UnbalancedBlock(String),
    #[error("call depth limit of {0} exceeded")]
    StackOverflow(usize),
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        runtime_error_code(self).as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Catalog,
    BlockStructure,
    TypeMismatch,
    InvalidOperation,
    Io,
    RuntimePanic,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Catalog => "E001",
            ErrorCode::BlockStructure => "E002",
            ErrorCode::TypeMismatch => "E003",
            ErrorCode::InvalidOperation => "E004",
            ErrorCode::Io => "E005",
            ErrorCode::RuntimePanic => "E006",
        }
    }
}

/// User-facing report: a stable code plus the rendered message.
#[derive(Debug, Clone)]
pub struct ScriptError {
    pub code: ErrorCode,
    pub message: String,
}

impl ScriptError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn render(&self) -> String {
        format!("error[{}]: {}", self.code_str(), self.message)
    }
}

impl From<CatalogError> for ScriptError {
    fn from(value: CatalogError) -> Self {
        ScriptError::new(ErrorCode::Catalog, value.to_string())
    }
}

impl From<RuntimeError> for ScriptError {
    fn from(value: RuntimeError) -> Self {
        ScriptError::new(runtime_error_code(&value), value.to_string())
    }
}

pub fn runtime_error_code(error: &RuntimeError) -> ErrorCode {
    match error {
        RuntimeError::TypeMismatch(_) => ErrorCode::TypeMismatch,
        RuntimeError::IndexOutOfRange { .. }
        | RuntimeError::KeyNotFound(_)
        | RuntimeError::DivideByZero
        | RuntimeError::InvalidArgument(_) => ErrorCode::InvalidOperation,
        RuntimeError::NestedBlock(_) | RuntimeError::UnbalancedBlock(_) => {
            ErrorCode::BlockStructure
        }
        RuntimeError::Io(_) => ErrorCode::Io,
        RuntimeError::StackOverflow(_) => ErrorCode::RuntimePanic,
    }
}
