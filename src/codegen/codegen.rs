use tracing::{debug, instrument, trace};

use crate::analyzer::SymbolTable;
use crate::parser::{Expr, Program, Stmt};

use super::{Instruction, Label, Operand, Temp};

/// Lowers a checked program to three-address code. Temporaries and labels
/// are numbered from 1 per instance, so every compilation needs its own.
///
/// Variables keep their source names and are not renamed per scope: a name
/// declared in an inner block lowers to the same TAC name as the outer
/// variable it shadows.
pub struct Codegen<'a> {
    temp_index: usize,
    label_index: usize,
    instructions: Vec<Instruction>,
    symbol_table: &'a SymbolTable,
}

impl<'a> Codegen<'a> {
    pub fn new(symbol_table: &'a SymbolTable) -> Self {
        Self {
            temp_index: 0,
            label_index: 0,
            instructions: vec![],
            symbol_table,
        }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn generate(mut self, program: &Program) -> Vec<Instruction> {
        self.gen_stmts(&program.0);
        debug!(
            instructions = self.instructions.len(),
            temps = self.temp_index,
            labels = self.label_index,
            globals = self.symbol_table.global().len(),
            "generated"
        );
        self.instructions
    }

    fn new_temp(&mut self) -> Temp {
        self.temp_index += 1;
        Temp(self.temp_index)
    }

    fn new_label(&mut self) -> Label {
        self.label_index += 1;
        Label(self.label_index)
    }

    fn emit(&mut self, instruction: Instruction) {
        trace!(%instruction, "emit");
        self.instructions.push(instruction);
    }

    fn gen_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.gen_stmt(stmt);
        }
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::SemiColon => (),
            Stmt::Expr(expr) => {
                self.gen_expr(expr);
            }
            Stmt::Block(stmts) => self.gen_stmts(stmts),
            Stmt::VarDecl(ty, name, init) => {
                trace!(name, %ty, "declaration");
                if let Some(expr) = init {
                    self.gen_assign(name, expr);
                }
            }
            Stmt::Assign(name, expr) => self.gen_assign(name, expr),
            Stmt::If(cond, then_block, else_block) => {
                self.gen_if(cond, then_block, else_block.as_deref())
            }
            Stmt::DoWhile(body, cond) => self.gen_do_while(body, cond),
        }
    }

    fn gen_assign(&mut self, name: &str, expr: &Expr) {
        let src = self.gen_expr(expr);
        self.emit(Instruction::Copy {
            src,
            result: name.to_string(),
        });
    }

    /// if cond goto true
    /// goto end
    /// label true
    /// <then>
    /// label end
    /// goto else      (else present)
    /// label else
    /// <else>
    fn gen_if(&mut self, cond: &Expr, then_block: &[Stmt], else_block: Option<&[Stmt]>) {
        let cond = self.gen_expr(cond);
        let true_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instruction::IfGoto {
            cond,
            target: true_label,
        });
        self.emit(Instruction::Goto(end_label));
        self.emit(Instruction::Label(true_label));
        self.gen_stmts(then_block);
        self.emit(Instruction::Label(end_label));

        if let Some(else_block) = else_block {
            let else_label = self.new_label();
            self.emit(Instruction::Goto(else_label));
            self.emit(Instruction::Label(else_label));
            self.gen_stmts(else_block);
        }
    }

    /// label start
    /// <body>
    /// if cond goto start
    fn gen_do_while(&mut self, body: &[Stmt], cond: &Expr) {
        let loop_start = self.new_label();
        self.emit(Instruction::Label(loop_start));
        self.gen_stmts(body);
        let cond = self.gen_expr(cond);
        self.emit(Instruction::IfGoto {
            cond,
            target: loop_start,
        });
    }

    /// Emits the instructions computing `expr`, operands first, and returns
    /// where its value ends up.
    fn gen_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Literal(l) => Operand::Literal(l.clone()),
            Expr::Identifier(name) => Operand::Var(name.clone()),
            Expr::Binary(op, left, right) => {
                let lhs = self.gen_expr(left);
                let rhs = self.gen_expr(right);
                let result = self.new_temp();
                self.emit(Instruction::Binary {
                    op: *op,
                    lhs,
                    rhs,
                    result,
                });
                Operand::Temp(result)
            }
        }
    }
}

/// Lowers `program` with a fresh generator.
pub fn generate(program: &Program, symbol_table: &SymbolTable) -> Vec<Instruction> {
    Codegen::new(symbol_table).generate(program)
}
