mod codegen;
mod tac;

pub use codegen::*;
pub use tac::*;
