use crate::analyzer::DataType;

use super::Expr;

#[derive(Clone, Debug, PartialEq)]
pub struct Program(pub Vec<Stmt>);

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    SemiColon,
    Expr(Expr),
    Block(Vec<Stmt>),

    VarDecl(DataType, String, Option<Expr>),
    Assign(String, Expr),

    If(Expr, Vec<Stmt>, Option<Vec<Stmt>>),
    DoWhile(Vec<Stmt>, Expr),
}
