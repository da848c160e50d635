//! Declared-before-use checking.
//!
//! A single pre-order walk over the program fills one flat symbol table. A
//! declaration enters its name before its initializer is visited; every
//! identifier read and every assignment target must already be present.

use crate::ast::*;
use std::collections::HashMap;
use std::fmt;
use string_interner::DefaultSymbol;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Int,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Int => write!(f, "int"),
        }
    }
}

/// What to do when a name is declared a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedeclarationPolicy {
    /// Keep going; the later declaration replaces the earlier entry.
    #[default]
    Overwrite,
    Reject,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
    #[error("Variable already declared: {0}")]
    Redeclared(String),
}

/// Flat mapping from variable name to its type; there is no scoping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: HashMap<String, VarType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`, returning the entry it replaced, if any.
    pub fn declare(&mut self, name: &str, ty: VarType) -> Option<VarType> {
        self.entries.insert(name.to_string(), ty)
    }

    pub fn get(&self, name: &str) -> Option<VarType> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name.
    pub fn entries(&self) -> Vec<(&str, VarType)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, ty)) in self.entries().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {ty}")?;
        }
        write!(f, "}}")
    }
}

pub struct SemanticChecker<'a> {
    program: &'a Program,
    table: SymbolTable,
    policy: RedeclarationPolicy,
}

impl<'a> SemanticChecker<'a> {
    pub fn new(program: &'a Program, policy: RedeclarationPolicy) -> Self {
        Self {
            program,
            table: SymbolTable::new(),
            policy,
        }
    }

    pub fn check(mut self) -> Result<SymbolTable, SemanticError> {
        let program = self.program;
        for stmt in &program.statements {
            self.visit_stmt(stmt)?;
        }
        log::debug!("Output from Semantic Analysis stage: {}", self.table);
        Ok(self.table)
    }

    fn declare(&mut self, sym: DefaultSymbol) -> Result<(), SemanticError> {
        let program = self.program;
        let name = program.name(sym);
        let previous = self.table.declare(name, VarType::Int);
        if previous.is_some() && self.policy == RedeclarationPolicy::Reject {
            return Err(SemanticError::Redeclared(name.to_string()));
        }
        Ok(())
    }

    fn require(&self, sym: DefaultSymbol) -> Result<(), SemanticError> {
        let name = self.program.name(sym);
        if self.table.contains(name) {
            Ok(())
        } else {
            Err(SemanticError::UndefinedVariable(name.to_string()))
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::Declaration { name, init } => {
                self.declare(*name)?;
                self.visit_expr(init)
            }
            Stmt::Assignment(assign) => self.visit_assign(assign),
            Stmt::Block(stmts) => stmts.iter().try_for_each(|s| self.visit_stmt(s)),
            Stmt::For { init, condition, update, body } => {
                self.visit_stmt(init)?;
                self.visit_expr(condition)?;
                self.visit_expr(update)?;
                self.visit_stmt(body)
            }
            Stmt::While { condition, body } => {
                self.visit_expr(condition)?;
                self.visit_stmt(body)
            }
            Stmt::DoWhile { body, condition } => {
                self.visit_stmt(body)?;
                self.visit_expr(condition)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                self.visit_expr(condition)?;
                self.visit_stmt(then_branch)?;
                match else_branch {
                    Some(else_branch) => self.visit_stmt(else_branch),
                    None => Ok(()),
                }
            }
            Stmt::Switch { discriminant, arms } => {
                self.visit_expr(discriminant)?;
                for arm in arms {
                    if let SwitchArm::Case { value, .. } = arm {
                        self.visit_expr(value)?;
                    }
                    arm.body().iter().try_for_each(|s| self.visit_stmt(s))?;
                }
                Ok(())
            }
            Stmt::Break => Ok(()),
        }
    }

    fn visit_assign(&mut self, assign: &Assignment) -> Result<(), SemanticError> {
        self.require(assign.name)?;
        self.visit_expr(&assign.value)
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::Number(_) => Ok(()),
            Expr::Identifier(sym) => self.require(*sym),
            Expr::Binary(_, lhs, rhs) | Expr::Compare(_, lhs, rhs) => {
                self.visit_expr(lhs)?;
                self.visit_expr(rhs)
            }
            Expr::Assign(assign) => self.visit_assign(assign),
        }
    }
}

/// Checks `program` with the default redeclaration policy.
pub fn check(program: &Program) -> Result<SymbolTable, SemanticError> {
    check_with(program, RedeclarationPolicy::default())
}

pub fn check_with(program: &Program, policy: RedeclarationPolicy) -> Result<SymbolTable, SemanticError> {
    SemanticChecker::new(program, policy).check()
}
