use tracing::{debug, instrument};

use crate::error::{CompileError, CompileResult};
use crate::lexer::Literal;
use crate::parser::{Expr, Program, Stmt};

use super::{DataType, SymbolTable};

/// Whether a block may declare a name that an enclosing scope already holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShadowPolicy {
    #[default]
    Allow,
    Deny,
}

pub struct SemanticVisitor {
    symbol_table: SymbolTable,
    shadowing: ShadowPolicy,
}

impl Default for SemanticVisitor {
    fn default() -> Self {
        Self::new(ShadowPolicy::default())
    }
}

impl SemanticVisitor {
    pub fn new(shadowing: ShadowPolicy) -> Self {
        Self {
            symbol_table: SymbolTable::new(),
            shadowing,
        }
    }

    /// Checks the whole program and hands back the global scope it built.
    #[instrument(level = "debug", skip_all)]
    pub fn visit_program(&mut self, program: &Program) -> CompileResult<SymbolTable> {
        for stmt in program.0.iter() {
            self.visit_stmt(stmt)?;
        }

        debug!(globals = self.symbol_table.global().len(), "analyzed");
        Ok(self.symbol_table.clone())
    }

    /// Runs `f` inside a fresh scope, popping it whether `f` succeeds or not.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> CompileResult<T>) -> CompileResult<T> {
        self.symbol_table.push_scope();
        let result = f(self);
        self.symbol_table.pop_scope();
        result
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> CompileResult<()> {
        match stmt {
            Stmt::SemiColon => Ok(()),
            Stmt::Expr(expr) => self.visit_expr(expr),
            Stmt::Block(stmts) => self.visit_block(stmts),
            Stmt::VarDecl(ty, name, init) => self.visit_var_decl(*ty, name, init.as_ref()),
            Stmt::Assign(name, expr) => self.visit_assign(name, expr),
            Stmt::If(cond, then_block, else_block) => {
                self.visit_if(cond, then_block, else_block.as_deref())
            }
            Stmt::DoWhile(body, cond) => self.visit_do_while(body, cond),
        }
    }

    fn visit_block(&mut self, stmts: &[Stmt]) -> CompileResult<()> {
        self.scoped(|v| stmts.iter().try_for_each(|s| v.visit_stmt(s)))
    }

    fn visit_var_decl(
        &mut self,
        ty: DataType,
        name: &str,
        init: Option<&Expr>,
    ) -> CompileResult<()> {
        if self.shadowing == ShadowPolicy::Deny && self.symbol_table.is_visible(name) {
            return Err(CompileError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }
        self.symbol_table.declare(name, ty, None)?;

        match init {
            Some(Expr::Literal(l)) => {
                check_literal(name, ty, l)?;
                self.symbol_table.assign(name, Some(l.clone()))
            }
            Some(expr) => self.visit_expr(expr),
            None => Ok(()),
        }
    }

    fn visit_assign(&mut self, name: &str, expr: &Expr) -> CompileResult<()> {
        let ty = self.symbol_table.lookup(name)?.ty;

        match expr {
            Expr::Literal(l) => {
                check_literal(name, ty, l)?;
                self.symbol_table.assign(name, Some(l.clone()))
            }
            _ => {
                self.visit_expr(expr)?;
                self.symbol_table.assign(name, None)
            }
        }
    }

    fn visit_if(
        &mut self,
        cond: &Expr,
        then_block: &[Stmt],
        else_block: Option<&[Stmt]>,
    ) -> CompileResult<()> {
        self.visit_expr(cond)?;
        self.visit_block(then_block)?;
        if let Some(else_block) = else_block {
            self.visit_block(else_block)?;
        }
        Ok(())
    }

    fn visit_do_while(&mut self, body: &[Stmt], cond: &Expr) -> CompileResult<()> {
        self.visit_block(body)?;
        self.visit_expr(cond)
    }

    /// Operand types are not checked against each other, only that every
    /// identifier read is in scope.
    fn visit_expr(&mut self, expr: &Expr) -> CompileResult<()> {
        match expr {
            Expr::Literal(_) => Ok(()),
            Expr::Identifier(name) => self.symbol_table.lookup(name).map(|_| ()),
            Expr::Binary(_, left, right) => {
                self.visit_expr(left)?;
                self.visit_expr(right)
            }
        }
    }
}

fn check_literal(name: &str, ty: DataType, literal: &Literal) -> CompileResult<()> {
    if ty.accepts(literal) {
        return Ok(());
    }
    Err(CompileError::TypeMismatch {
        name: name.to_string(),
        expected: ty,
        found: literal.clone(),
    })
}

/// Checks `program` with a fresh symbol table.
pub fn analyze(program: &Program, shadowing: ShadowPolicy) -> CompileResult<SymbolTable> {
    SemanticVisitor::new(shadowing).visit_program(program)
}
