use tracing::{debug, instrument};

use crate::analyzer::DataType;
use crate::error::{CompileError, CompileResult};
use crate::lexer::{Delimiter, Keyword, Operator, Token, TokenKind};

use super::{BinOpKind, Expr, Program, Stmt};

const END_OF_INPUT: &str = "end of input";

/// Deepest tree the parser builds. Blocks, parenthesized expressions and
/// each operator of a left-folded chain count one level, so the later
/// recursive passes stay well within the stack.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    #[instrument(level = "debug", skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse(&mut self) -> CompileResult<Program> {
        let program = self.parse_program()?;
        debug!(statements = program.0.len(), "parsed");
        Ok(program)
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.current_token().map(|t| &t.kind)
    }

    fn found(&self) -> String {
        match self.current_token() {
            Some(t) => format!("'{}' ({}) at {}", describe(&t.kind), t.kind, t.span.start),
            None => END_OF_INPUT.to_string(),
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> CompileError {
        CompileError::syntax(expected, self.found())
    }

    fn enter(&mut self) -> CompileResult<()> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected(format!("at most {MAX_DEPTH} levels of nesting")));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CompileResult<T>) -> CompileResult<T> {
        self.enter()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.peek() != Some(kind) {
            return false;
        }
        self.index += 1;
        true
    }

    fn consume_delimiter(&mut self, d: Delimiter) -> bool {
        self.consume(&TokenKind::Delimiter(d))
    }

    fn consume_keyword(&mut self, k: Keyword) -> bool {
        self.consume(&TokenKind::Keyword(k))
    }

    fn expect(&mut self, kind: &TokenKind) -> CompileResult<()> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.unexpected(format!("'{}'", describe(kind))))
        }
    }

    fn expect_delimiter(&mut self, d: Delimiter) -> CompileResult<()> {
        self.expect(&TokenKind::Delimiter(d))
    }

    fn expect_ident(&mut self) -> CompileResult<String> {
        if let Some(TokenKind::Identifier(name)) = self.peek() {
            let name = name.clone();
            self.index += 1;
            return Ok(name);
        }
        Err(self.unexpected("identifier"))
    }

    /// program = stmt*
    fn parse_program(&mut self) -> CompileResult<Program> {
        let mut stmts = vec![];
        while self.current_token().is_some() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program(stmts))
    }

    /// stmt = "if" "(" condition ")" block ("else" block)?
    ///      | "do" block "while" "(" condition ")" ";"
    ///      | block
    ///      | ";"
    ///      | data_type ident ("=" expr)? ";"
    ///      | expr ("=" expr)? ";"
    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        if self.consume_keyword(Keyword::If) {
            self.parse_if()
        } else if self.consume_keyword(Keyword::Do) {
            self.parse_do_while()
        } else if self.peek() == Some(&TokenKind::Delimiter(Delimiter::OpenCurlyBrace)) {
            Ok(Stmt::Block(self.parse_block()?))
        } else if self.consume_delimiter(Delimiter::SemiColon) {
            Ok(Stmt::SemiColon)
        } else if let Some(&TokenKind::DataType(ty)) = self.peek() {
            self.index += 1;
            self.parse_var_decl(ty)
        } else {
            self.parse_expr_stmt()
        }
    }

    /// block = "{" stmt* "}"
    fn parse_block(&mut self) -> CompileResult<Vec<Stmt>> {
        self.expect_delimiter(Delimiter::OpenCurlyBrace)?;
        self.nested(|p| {
            let mut stmts = vec![];
            while !p.consume_delimiter(Delimiter::CloseCurlyBrace) {
                if p.current_token().is_none() {
                    return Err(p.unexpected("'}'"));
                }
                stmts.push(p.parse_stmt()?);
            }
            Ok(stmts)
        })
    }

    fn parse_if(&mut self) -> CompileResult<Stmt> {
        self.expect_delimiter(Delimiter::OpenParen)?;
        let cond = self.parse_condition()?;
        self.expect_delimiter(Delimiter::CloseParen)?;
        let then_block = self.parse_block()?;
        let else_block = if self.consume_keyword(Keyword::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If(cond, then_block, else_block))
    }

    fn parse_do_while(&mut self) -> CompileResult<Stmt> {
        let body = self.parse_block()?;
        self.expect(&TokenKind::Keyword(Keyword::While))?;
        self.expect_delimiter(Delimiter::OpenParen)?;
        let cond = self.parse_condition()?;
        self.expect_delimiter(Delimiter::CloseParen)?;
        self.expect_delimiter(Delimiter::SemiColon)?;
        Ok(Stmt::DoWhile(body, cond))
    }

    fn parse_var_decl(&mut self, ty: DataType) -> CompileResult<Stmt> {
        let name = self.expect_ident()?;
        let init = if self.consume(&TokenKind::Operator(Operator::Equal)) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_delimiter(Delimiter::SemiColon)?;
        Ok(Stmt::VarDecl(ty, name, init))
    }

    fn parse_expr_stmt(&mut self) -> CompileResult<Stmt> {
        let expr = self.parse_expr()?;
        let eq = self.index;

        if !self.consume(&TokenKind::Operator(Operator::Equal)) {
            self.expect_delimiter(Delimiter::SemiColon)?;
            return Ok(Stmt::Expr(expr));
        }

        // only a bare identifier may be assigned to
        let Expr::Identifier(name) = expr else {
            self.index = eq;
            return Err(self.unexpected("';'"));
        };
        let value = self.parse_expr()?;
        self.expect_delimiter(Delimiter::SemiColon)?;
        Ok(Stmt::Assign(name, value))
    }

    /// condition = expr (("==" | ">" | "<") expr)?
    fn parse_condition(&mut self) -> CompileResult<Expr> {
        let left = self.parse_expr()?;
        match self.binop(BinOpKind::is_comparison) {
            Some(kind) => Ok(Expr::binary(kind, left, self.parse_expr()?)),
            None => Ok(left),
        }
    }

    /// expr = term (("+" | "-") term)*
    fn parse_expr(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut node = self.parse_term()?;
        while let Some(kind) = self.binop(|k| matches!(k, BinOpKind::Add | BinOpKind::Sub)) {
            self.enter()?;
            node = Expr::binary(kind, node, self.parse_term()?);
        }
        self.depth = depth;
        Ok(node)
    }

    /// term = factor (("*" | "/") factor)*
    fn parse_term(&mut self) -> CompileResult<Expr> {
        let depth = self.depth;
        let mut node = self.parse_factor()?;
        while let Some(kind) = self.binop(|k| matches!(k, BinOpKind::Mul | BinOpKind::Div)) {
            self.enter()?;
            node = Expr::binary(kind, node, self.parse_factor()?);
        }
        self.depth = depth;
        Ok(node)
    }

    /// factor = literal
    ///        | ident
    ///        | "(" expr ")"
    fn parse_factor(&mut self) -> CompileResult<Expr> {
        match self.peek() {
            Some(TokenKind::Literal(l)) => {
                let l = l.clone();
                self.index += 1;
                Ok(Expr::Literal(l))
            }
            Some(TokenKind::Identifier(name)) => {
                let name = name.clone();
                self.index += 1;
                Ok(Expr::Identifier(name))
            }
            Some(TokenKind::Delimiter(Delimiter::OpenParen)) => {
                self.index += 1;
                let expr = self.nested(|p| p.parse_expr())?;
                self.expect_delimiter(Delimiter::CloseParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("literal, identifier or '('")),
        }
    }

    /// Consumes the current token if it is an operator accepted by `accept`.
    fn binop(&mut self, accept: impl Fn(&BinOpKind) -> bool) -> Option<BinOpKind> {
        let Some(&TokenKind::Operator(op)) = self.peek() else {
            return None;
        };
        let kind = BinOpKind::from_operator(op).filter(|k| accept(k))?;
        self.index += 1;
        Some(kind)
    }
}

/// Source text of a token, as it would be written.
fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Keyword(k) => k.as_str().to_string(),
        TokenKind::Identifier(name) => name.clone(),
        TokenKind::Operator(op) => op.as_str().to_string(),
        TokenKind::DataType(t) => t.to_string(),
        TokenKind::Literal(l) => l.to_string(),
        TokenKind::Delimiter(d) => d.as_str().to_string(),
        TokenKind::Unknown(c) => c.to_string(),
    }
}

/// Tokens in, AST out.
pub fn parse(tokens: Vec<Token>) -> CompileResult<Program> {
    Parser::new(tokens).parse()
}
