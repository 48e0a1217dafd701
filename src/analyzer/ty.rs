use std::fmt;

use crate::lexer::Literal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Int,
    Float,
    String,
    Array,
    Stack,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Array => "array",
            DataType::Stack => "stack",
        }
    }

    /// Whether a literal may initialize or be assigned to a variable of this
    /// type. Composite types accept no literal at all.
    pub fn accepts(&self, literal: &Literal) -> bool {
        matches!(
            (self, literal),
            (DataType::Int, Literal::Integer(_))
                | (DataType::Float, Literal::Float(_))
                | (DataType::String, Literal::Text(_))
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
