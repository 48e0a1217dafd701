use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::error::{CompileError, CompileResult};
use crate::lexer::Literal;

use super::DataType;

#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: DataType,
    pub value: Option<Literal>,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}: {} = {}", self.name, self.ty, v),
            None => write!(f, "{}: {}", self.name, self.ty),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols sorted by name, for stable output.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<_> = self.symbols.values().collect();
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        symbols
    }
}

/// Stack of scopes, innermost last. The global scope is never popped.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
        trace!(depth = self.depth(), "push scope");
    }

    pub fn pop_scope(&mut self) -> Option<Scope> {
        if self.scopes.len() == 1 {
            return None;
        }
        let scope = self.scopes.pop();
        trace!(depth = self.depth(), "pop scope");
        scope
    }

    /// Inserts `name` into the innermost scope. Enclosing scopes are not
    /// consulted, so an inner block may shadow an outer name.
    pub fn declare(
        &mut self,
        name: &str,
        ty: DataType,
        value: Option<Literal>,
    ) -> CompileResult<()> {
        let last = self.scopes.len() - 1;
        let scope = &mut self.scopes[last];
        if scope.contains(name) {
            return Err(CompileError::DuplicateDeclaration {
                name: name.to_string(),
            });
        }

        trace!(name, %ty, depth = last + 1, "declare");
        scope.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty,
                value,
            },
        );
        Ok(())
    }

    /// Replaces the value of the innermost visible `name`, keeping its type.
    pub fn assign(&mut self, name: &str, value: Option<Literal>) -> CompileResult<()> {
        let symbol = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.symbols.get_mut(name))
            .ok_or_else(|| CompileError::UndeclaredVariable {
                name: name.to_string(),
            })?;

        trace!(name, value = ?value, "assign");
        symbol.value = value;
        Ok(())
    }

    /// Finds the innermost visible `name`.
    pub fn lookup(&self, name: &str) -> CompileResult<&Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| CompileError::UndeclaredVariable {
                name: name.to_string(),
            })
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_in_same_scope_fails() {
        let mut table = SymbolTable::new();
        table.declare("x", DataType::Int, None).unwrap();
        assert_eq!(
            table.declare("x", DataType::Float, None),
            Err(CompileError::DuplicateDeclaration {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn inner_scope_shadows_then_unshadows() {
        let mut table = SymbolTable::new();
        table.declare("x", DataType::Int, None).unwrap();
        table.push_scope();
        table.declare("x", DataType::String, None).unwrap();
        assert_eq!(table.lookup("x").unwrap().ty, DataType::String);
        table.pop_scope();
        assert_eq!(table.lookup("x").unwrap().ty, DataType::Int);
    }

    #[test]
    fn assign_updates_nearest_symbol_and_keeps_type() {
        let mut table = SymbolTable::new();
        table
            .declare("n", DataType::Int, Some(Literal::Integer(1)))
            .unwrap();
        table.push_scope();
        table.assign("n", Some(Literal::Integer(2))).unwrap();
        table.pop_scope();

        let n = table.lookup("n").unwrap();
        assert_eq!(n.ty, DataType::Int);
        assert_eq!(n.value, Some(Literal::Integer(2)));
    }

    #[test]
    fn missing_name_is_undeclared() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.lookup("y"),
            Err(CompileError::UndeclaredVariable { .. })
        ));
        assert!(matches!(
            table.assign("y", None),
            Err(CompileError::UndeclaredVariable { .. })
        ));
    }

    #[test]
    fn global_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        assert_eq!(table.pop_scope(), None);
        assert_eq!(table.depth(), 1);
    }
}
