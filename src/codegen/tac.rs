use std::fmt;

use crate::lexer::Literal;
use crate::parser::BinOpKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temp(pub usize);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label(pub usize);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Literal(Literal),
    Var(String),
    Temp(Temp),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(l) => write!(f, "{l}"),
            Operand::Var(name) => f.write_str(name),
            Operand::Temp(t) => write!(f, "{t}"),
        }
    }
}

/// Op code of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Bin(BinOpKind),
    Assign,
    Label,
    Goto,
    If,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Bin(kind) => write!(f, "{kind}"),
            Op::Assign => f.write_str("="),
            Op::Label => f.write_str("label"),
            Op::Goto => f.write_str("goto"),
            Op::If => f.write_str("if"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// `result = lhs op rhs`, comparisons yield a boolean-valued temporary
    Binary {
        op: BinOpKind,
        lhs: Operand,
        rhs: Operand,
        result: Temp,
    },
    /// `result = src`
    Copy { src: Operand, result: String },
    Label(Label),
    Goto(Label),
    /// jump to `target` when `cond` is truthy
    IfGoto { cond: Operand, target: Label },
}

impl Instruction {
    pub fn op(&self) -> Op {
        match self {
            Instruction::Binary { op, .. } => Op::Bin(*op),
            Instruction::Copy { .. } => Op::Assign,
            Instruction::Label(_) => Op::Label,
            Instruction::Goto(_) => Op::Goto,
            Instruction::IfGoto { .. } => Op::If,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary {
                op,
                lhs,
                rhs,
                result,
            } => write!(f, "{result} = {lhs} {op} {rhs}"),
            Instruction::Copy { src, result } => write!(f, "{result} = {src}"),
            Instruction::Label(l) => write!(f, "label {l}"),
            Instruction::Goto(l) => write!(f, "goto {l}"),
            Instruction::IfGoto { cond, target } => write!(f, "if {cond} goto {target}"),
        }
    }
}
