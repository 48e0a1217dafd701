use thiserror::Error;

use crate::analyzer::DataType;
use crate::lexer::Literal;

pub type CompileResult<T> = Result<T, CompileError>;

/// Every fault a phase can stop on. Phases never recover past one of these.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("syntax error: expected {expected}, found {found}")]
    Syntax { expected: String, found: String },

    #[error("variable '{name}' is already declared")]
    DuplicateDeclaration { name: String },

    #[error("variable '{name}' is not declared")]
    UndeclaredVariable { name: String },

    #[error("type mismatch: cannot assign {} literal {found} to '{name}' of type {expected}", .found.kind_name())]
    TypeMismatch {
        name: String,
        expected: DataType,
        found: Literal,
    },
}

impl CompileError {
    pub fn syntax(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Syntax {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
