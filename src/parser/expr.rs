use std::fmt;

use crate::lexer::{Literal, Operator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Equal,
    GreaterThan,
    LessThan,
}

impl BinOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Equal => "==",
            BinOpKind::GreaterThan => ">",
            BinOpKind::LessThan => "<",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOpKind::Equal | BinOpKind::GreaterThan | BinOpKind::LessThan
        )
    }

    pub(super) fn from_operator(op: Operator) -> Option<Self> {
        match op {
            Operator::Plus => Some(BinOpKind::Add),
            Operator::Minus => Some(BinOpKind::Sub),
            Operator::Star => Some(BinOpKind::Mul),
            Operator::Slash => Some(BinOpKind::Div),
            Operator::DoubleEqual => Some(BinOpKind::Equal),
            Operator::GreaterThan => Some(BinOpKind::GreaterThan),
            Operator::LessThan => Some(BinOpKind::LessThan),
            Operator::Equal => None,
        }
    }
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    Binary(BinOpKind, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binary(kind: BinOpKind, left: Expr, right: Expr) -> Self {
        Expr::Binary(kind, Box::new(left), Box::new(right))
    }
}
