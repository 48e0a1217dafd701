pub mod analyzer;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;

use tracing::instrument;

use analyzer::{SemanticVisitor, ShadowPolicy, SymbolTable};
use codegen::{Codegen, Instruction};
use lexer::{Lexer, Token};
use parser::{Parser, Program};

pub use error::{CompileError, CompileResult};

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub shadowing: ShadowPolicy,
}

/// Everything one run of the pipeline produced.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    pub symbol_table: SymbolTable,
    pub instructions: Vec<Instruction>,
}

/// Runs every phase over `user_input`, stopping at the first error.
#[instrument(level = "info", skip_all)]
pub fn compile(user_input: &str, options: &Options) -> CompileResult<Compilation> {
    let tokens = Lexer::tokenize(user_input);

    let mut parser = Parser::new(tokens.clone());
    let program = parser.parse()?;

    let mut visitor = SemanticVisitor::new(options.shadowing);
    let symbol_table = visitor.visit_program(&program)?;

    let instructions = Codegen::new(&symbol_table).generate(&program);

    Ok(Compilation {
        tokens,
        program,
        symbol_table,
        instructions,
    })
}
