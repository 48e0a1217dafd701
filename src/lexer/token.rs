use std::fmt;

use phf::phf_map;

use crate::analyzer::DataType;

pub(super) static KEYWORDS: phf::Map<&str, TokenKind> = phf_map! {
    "if" => TokenKind::Keyword(Keyword::If),
    "else" => TokenKind::Keyword(Keyword::Else),
    "do" => TokenKind::Keyword(Keyword::Do),
    "while" => TokenKind::Keyword(Keyword::While),
    "for" => TokenKind::Keyword(Keyword::For),
};

pub(super) static DATA_TYPES: phf::Map<&str, TokenKind> = phf_map! {
    "int" => TokenKind::DataType(DataType::Int),
    "float" => TokenKind::DataType(DataType::Float),
    "string" => TokenKind::DataType(DataType::String),
    "array" => TokenKind::DataType(DataType::Array),
    "stack" => TokenKind::DataType(DataType::Stack),
};

pub(super) static TWO_SYMBOLS_TOKENS: phf::Map<&str, TokenKind> = phf_map! {
    "==" => TokenKind::Operator(Operator::DoubleEqual),
};

pub(super) static ONE_SYMBOL_TOKENS: phf::Map<char, TokenKind> = phf_map! {
    '=' => TokenKind::Operator(Operator::Equal),
    '+' => TokenKind::Operator(Operator::Plus),
    '-' => TokenKind::Operator(Operator::Minus),
    '*' => TokenKind::Operator(Operator::Star),
    '/' => TokenKind::Operator(Operator::Slash),
    '>' => TokenKind::Operator(Operator::GreaterThan),
    '<' => TokenKind::Operator(Operator::LessThan),
    '(' => TokenKind::Delimiter(Delimiter::OpenParen),
    ')' => TokenKind::Delimiter(Delimiter::CloseParen),
    '{' => TokenKind::Delimiter(Delimiter::OpenCurlyBrace),
    '}' => TokenKind::Delimiter(Delimiter::CloseCurlyBrace),
    ';' => TokenKind::Delimiter(Delimiter::SemiColon),
    ',' => TokenKind::Delimiter(Delimiter::Comma),
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    If,
    Else,
    Do,
    While,
    For,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Do => "do",
            Keyword::While => "while",
            Keyword::For => "for",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Plus,
    Minus,
    Star,
    Slash,
    DoubleEqual,
    GreaterThan,
    LessThan,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::DoubleEqual => "==",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    OpenParen,
    CloseParen,
    OpenCurlyBrace,
    CloseCurlyBrace,
    SemiColon,
    Comma,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::OpenParen => "(",
            Delimiter::CloseParen => ")",
            Delimiter::OpenCurlyBrace => "{",
            Delimiter::CloseCurlyBrace => "}",
            Delimiter::SemiColon => ";",
            Delimiter::Comma => ",",
        }
    }
}

/// Payload of a literal token, also the value stored on a symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Literal {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Text(_) => "string",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{i}"),
            // Debug keeps the fractional part, so 1.0 does not print as an integer
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Text(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Operator(Operator),
    DataType(DataType),
    Literal(Literal),
    Delimiter(Delimiter),
    Unknown(char),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(k) => write!(f, "KEYWORD: {}", k.as_str()),
            TokenKind::Identifier(name) => write!(f, "IDENTIFIER: {name}"),
            TokenKind::Operator(op) => write!(f, "OPERATOR: {}", op.as_str()),
            TokenKind::DataType(t) => write!(f, "DATA_TYPE: {t}"),
            TokenKind::Literal(l) => write!(f, "LITERAL: {l}"),
            TokenKind::Delimiter(d) => write!(f, "DELIMITER: {}", d.as_str()),
            TokenKind::Unknown(c) => write!(f, "UNKNOWN: {c}"),
        }
    }
}

/// Half-open range of character offsets into the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
