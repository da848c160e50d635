use compiler_core::Backend;
use frontend::ast::{self, Expr, NodeKind, Program, Stmt, SwitchArm};
use string_interner::DefaultSymbol;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{self, Write};
use thiserror::Error;

pub mod runner;

/// Words JavaScript reserves, plus the globals generated code relies on, that
/// are ordinary identifiers in the source language.
const JS_RESERVED: &[&str] = &[
    "arguments", "await", "catch", "class", "const", "continue", "debugger", "delete", "enum",
    "eval", "export", "extends", "false", "finally", "function", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "with", "yield", "NaN", "Infinity", "console", "globalThis",
];

/// The JavaScript spelling of a source identifier.
///
/// Reserved words get a `$` prefix; `$` cannot occur in source identifiers,
/// so the result never collides with another variable.
pub fn js_identifier(name: &str) -> Cow<'_, str> {
    if JS_RESERVED.contains(&name) {
        Cow::Owned(format!("${name}"))
    } else {
        Cow::Borrowed(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Spaces per nesting level; 0 emits every line flush left.
    pub indent_width: usize,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

#[derive(Error, Debug)]
pub enum JsGenError {
    #[error("Formatting error: {0}")]
    Fmt(#[from] fmt::Error),
    #[error("{0} cannot be rendered as a for-loop initializer")]
    UnsupportedInHeader(NodeKind),
}

pub struct JsCodeGenerator<'a> {
    lines: Vec<String>,
    indent_level: usize,
    // Names bound with `let` in each enclosing JavaScript block, innermost last.
    scopes: Vec<HashSet<DefaultSymbol>>,
    program: &'a Program,
    options: CodegenOptions,
}

impl<'a> JsCodeGenerator<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self::with_options(program, CodegenOptions::default())
    }

    pub fn with_options(program: &'a Program, options: CodegenOptions) -> Self {
        Self {
            lines: Vec::new(),
            indent_level: 0,
            scopes: vec![HashSet::new()],
            program,
            options,
        }
    }

    pub fn generate(&mut self) -> Result<String, JsGenError> {
        self.lines.clear();
        self.indent_level = 0;
        self.scopes = vec![HashSet::new()];

        let program = self.program;
        for stmt in &program.statements {
            self.generate_stmt(stmt)?;
        }

        let js = self.lines.join("\n");
        log::debug!("Output from Code Generation stage:\n{js}");
        Ok(js)
    }

    fn name(&self, sym: DefaultSymbol) -> Cow<'a, str> {
        let program = self.program;
        js_identifier(program.name(sym))
    }

    /// Binds `sym` in the innermost block unless a visible `let` already does.
    /// Returns whether a new `let` is needed.
    fn bind(&mut self, sym: DefaultSymbol) -> bool {
        if self.scopes.iter().any(|scope| scope.contains(&sym)) {
            return false;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(sym);
        }
        true
    }

    fn enter_scope(&mut self) {
        self.scopes.push(HashSet::new());
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        let indent = " ".repeat(self.indent_level * self.options.indent_width);
        self.lines.push(format!("{indent}{}", line.as_ref()));
    }

    fn generate_stmt(&mut self, stmt: &Stmt) -> Result<(), JsGenError> {
        match stmt {
            Stmt::Declaration { .. } | Stmt::Assignment(_) => {
                let clause = self.render_clause(stmt)?;
                self.emit(format!("{clause};"));
            }
            Stmt::Block(stmts) => {
                for stmt in stmts {
                    self.generate_stmt(stmt)?;
                }
            }
            Stmt::For { init, condition, update, body } => {
                self.enter_scope();
                let result = self.generate_for(init, condition, update, body);
                self.exit_scope();
                result?;
            }
            Stmt::While { condition, body } => {
                let condition = self.render_expr(condition)?;
                self.emit(format!("while ({condition}) {{"));
                self.generate_nested(body)?;
                self.emit("}");
            }
            Stmt::DoWhile { body, condition } => {
                self.emit("do {");
                self.generate_nested(body)?;
                let condition = self.render_expr(condition)?;
                self.emit(format!("}} while ({condition});"));
            }
            Stmt::If { condition, then_branch, else_branch } => {
                let condition = self.render_expr(condition)?;
                self.emit(format!("if ({condition}) {{"));
                self.generate_nested(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.emit("} else {");
                    self.generate_nested(else_branch)?;
                }
                self.emit("}");
            }
            Stmt::Switch { discriminant, arms } => {
                // Arms share one block and a jump can skip an arm's `let`, so
                // names declared in arms are bound ahead of the switch.
                let mut declared = Vec::new();
                for arm in arms {
                    collect_declarations(arm.body(), &mut declared);
                }
                for sym in declared {
                    if self.bind(sym) {
                        let name = self.name(sym);
                        self.emit(format!("let {name};"));
                    }
                }
                let discriminant = self.render_expr(discriminant)?;
                self.emit(format!("switch ({discriminant}) {{"));
                self.indent_level += 1;
                for arm in arms {
                    self.generate_arm(arm)?;
                }
                self.indent_level -= 1;
                self.emit("}");
            }
            Stmt::Break => self.emit("break;"),
        }
        Ok(())
    }

    fn generate_for(&mut self, init: &Stmt, condition: &Expr, update: &Expr, body: &Stmt) -> Result<(), JsGenError> {
        let init = self.render_clause(init)?;
        let condition = self.render_expr(condition)?;
        let update = self.render_update(update)?;
        self.emit(format!("for ({init}; {condition}; {update}) {{"));
        self.generate_nested(body)?;
        self.emit("}");
        Ok(())
    }

    /// Emits `body` one level deeper, inside its own JavaScript block.
    fn generate_nested(&mut self, body: &Stmt) -> Result<(), JsGenError> {
        self.indent_level += 1;
        self.enter_scope();
        let result = self.generate_stmt(body);
        self.exit_scope();
        self.indent_level -= 1;
        result
    }

    // Arms fall through exactly as written; no `break` is added.
    fn generate_arm(&mut self, arm: &SwitchArm) -> Result<(), JsGenError> {
        match arm {
            SwitchArm::Case { value, .. } => {
                let value = self.render_expr(value)?;
                self.emit(format!("case {value}:"));
            }
            SwitchArm::Default { .. } => self.emit("default:"),
        }
        self.indent_level += 1;
        let result = arm.body().iter().try_for_each(|stmt| self.generate_stmt(stmt));
        self.indent_level -= 1;
        result
    }

    /// Header-only rendering: the statement as a clause, without `;` or line break.
    ///
    /// A declaration of a name a visible `let` already binds becomes a plain
    /// assignment, matching the single flat namespace of the source.
    fn render_clause(&mut self, stmt: &Stmt) -> Result<String, JsGenError> {
        let mut out = String::new();
        match stmt {
            Stmt::Declaration { name, init } => {
                if self.bind(*name) {
                    write!(out, "let ")?;
                }
                write!(out, "{} = ", self.name(*name))?;
                self.write_expr(&mut out, init)?;
            }
            Stmt::Assignment(assign) => self.write_assign(&mut out, assign)?,
            other => return Err(JsGenError::UnsupportedInHeader(other.kind())),
        }
        Ok(out)
    }

    fn render_expr(&self, expr: &Expr) -> Result<String, JsGenError> {
        let mut out = String::new();
        self.write_expr(&mut out, expr)?;
        Ok(out)
    }

    // A lone assignment needs no parentheses as the whole update clause.
    fn render_update(&self, update: &Expr) -> Result<String, JsGenError> {
        let mut out = String::new();
        match update {
            Expr::Assign(assign) => self.write_assign(&mut out, assign)?,
            other => self.write_expr(&mut out, other)?,
        }
        Ok(out)
    }

    fn write_assign(&self, out: &mut String, assign: &ast::Assignment) -> Result<(), JsGenError> {
        write!(out, "{} = ", self.name(assign.name))?;
        self.write_expr(out, &assign.value)
    }

    fn write_expr(&self, out: &mut String, expr: &Expr) -> Result<(), JsGenError> {
        match expr {
            Expr::Number(text) => write!(out, "{text}")?,
            Expr::Identifier(sym) => write!(out, "{}", self.name(*sym))?,
            Expr::Binary(op, lhs, rhs) => {
                write!(out, "(")?;
                self.write_expr(out, lhs)?;
                write!(out, " {} ", op.symbol())?;
                self.write_expr(out, rhs)?;
                write!(out, ")")?;
            }
            Expr::Compare(rel, lhs, rhs) => {
                self.write_expr(out, lhs)?;
                write!(out, " {} ", rel.symbol())?;
                self.write_expr(out, rhs)?;
            }
            Expr::Assign(assign) => {
                write!(out, "(")?;
                self.write_assign(out, assign)?;
                write!(out, ")")?;
            }
        }
        Ok(())
    }
}

// Declarations that land in the block of the enclosing statement list:
// bare blocks emit no braces, every other construct opens its own.
fn collect_declarations(stmts: &[Stmt], out: &mut Vec<DefaultSymbol>) {
    for stmt in stmts {
        match stmt {
            Stmt::Declaration { name, .. } if !out.contains(name) => out.push(*name),
            Stmt::Block(inner) => collect_declarations(inner, out),
            _ => {}
        }
    }
}

/// [`Backend`] that turns a checked program into JavaScript source.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsBackend {
    pub options: CodegenOptions,
}

impl JsBackend {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }
}

impl Backend for JsBackend {
    type Error = JsGenError;

    fn name(&self) -> &'static str {
        "javascript"
    }

    fn generate(&self, program: &Program) -> Result<String, JsGenError> {
        JsCodeGenerator::with_options(program, self.options).generate()
    }
}
