use std::fmt::{self, Write};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Tag naming every construct the parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Block,
    Declaration,
    Assignment,
    BinaryOp,
    Compare,
    Number,
    Identifier,
    For,
    While,
    DoWhile,
    If,
    Switch,
    Case,
    Default,
    Break,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub struct Program {
    pub statements: Vec<Stmt>,
    pub string_interner: DefaultStringInterner,
}

/// `name = value`, shared by the statement form and the expression form.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: DefaultSymbol,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration {
        name: DefaultSymbol,
        init: Expr,
    },
    Assignment(Assignment),
    Block(Vec<Stmt>),
    For {
        init: Box<Stmt>,
        condition: Expr,
        update: Expr,
        body: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        condition: Expr,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    Switch {
        discriminant: Expr,
        arms: Vec<SwitchArm>,
    },
    Break,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchArm {
    Case { value: Expr, body: Vec<Stmt> },
    Default { body: Vec<Stmt> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(String),
    Identifier(DefaultSymbol),
    Binary(Operator, Box<Expr>, Box<Expr>),
    Compare(Relation, Box<Expr>, Box<Expr>),
    Assign(Assignment),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    IAdd,
    ISub,
    IMul,
    IDiv,
    IMod,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::IAdd => "+",
            Operator::ISub => "-",
            Operator::IMul => "*",
            Operator::IDiv => "/",
            Operator::IMod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LT,
    GT,
    LE,
    GE,
    EQ,
    NE,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::LT => "<",
            Relation::GT => ">",
            Relation::LE => "<=",
            Relation::GE => ">=",
            Relation::EQ => "==",
            Relation::NE => "!=",
        }
    }
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::Declaration { .. } => NodeKind::Declaration,
            Stmt::Assignment(_) => NodeKind::Assignment,
            Stmt::Block(_) => NodeKind::Block,
            Stmt::For { .. } => NodeKind::For,
            Stmt::While { .. } => NodeKind::While,
            Stmt::DoWhile { .. } => NodeKind::DoWhile,
            Stmt::If { .. } => NodeKind::If,
            Stmt::Switch { .. } => NodeKind::Switch,
            Stmt::Break => NodeKind::Break,
        }
    }
}

impl SwitchArm {
    pub fn kind(&self) -> NodeKind {
        match self {
            SwitchArm::Case { .. } => NodeKind::Case,
            SwitchArm::Default { .. } => NodeKind::Default,
        }
    }

    pub fn body(&self) -> &[Stmt] {
        match self {
            SwitchArm::Case { body, .. } | SwitchArm::Default { body } => body,
        }
    }
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Number(_) => NodeKind::Number,
            Expr::Identifier(_) => NodeKind::Identifier,
            Expr::Binary(..) => NodeKind::BinaryOp,
            Expr::Compare(..) => NodeKind::Compare,
            Expr::Assign(_) => NodeKind::Assignment,
        }
    }
}

impl Program {
    /// Resolves an interned name; names always come from this program's parser.
    pub fn name(&self, sym: DefaultSymbol) -> &str {
        self.string_interner.resolve(sym).unwrap_or("<unknown>")
    }

    /// Looks up the symbol of a name without interning it.
    pub fn symbol(&self, name: &str) -> Option<DefaultSymbol> {
        self.string_interner.get(name)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Indented one-node-per-line rendering of the tree with names resolved.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dump_into(&mut out);
        out
    }

    fn dump_into(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "Program")?;
        for stmt in &self.statements {
            self.dump_stmt(out, stmt, 1)?;
        }
        Ok(())
    }

    fn dump_stmt(&self, out: &mut String, stmt: &Stmt, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match stmt {
            Stmt::Declaration { name, init } => {
                writeln!(out, "{pad}Declaration {}", self.name(*name))?;
                self.dump_expr(out, init, depth + 1)
            }
            Stmt::Assignment(assign) => self.dump_assign(out, assign, depth),
            Stmt::Block(stmts) => {
                writeln!(out, "{pad}Block")?;
                stmts.iter().try_for_each(|s| self.dump_stmt(out, s, depth + 1))
            }
            Stmt::For { init, condition, update, body } => {
                writeln!(out, "{pad}For")?;
                self.dump_stmt(out, init, depth + 1)?;
                self.dump_expr(out, condition, depth + 1)?;
                self.dump_expr(out, update, depth + 1)?;
                self.dump_stmt(out, body, depth + 1)
            }
            Stmt::While { condition, body } => {
                writeln!(out, "{pad}While")?;
                self.dump_expr(out, condition, depth + 1)?;
                self.dump_stmt(out, body, depth + 1)
            }
            Stmt::DoWhile { body, condition } => {
                writeln!(out, "{pad}DoWhile")?;
                self.dump_stmt(out, body, depth + 1)?;
                self.dump_expr(out, condition, depth + 1)
            }
            Stmt::If { condition, then_branch, else_branch } => {
                writeln!(out, "{pad}If")?;
                self.dump_expr(out, condition, depth + 1)?;
                self.dump_stmt(out, then_branch, depth + 1)?;
                if let Some(else_branch) = else_branch {
                    self.dump_stmt(out, else_branch, depth + 1)?;
                }
                Ok(())
            }
            Stmt::Switch { discriminant, arms } => {
                writeln!(out, "{pad}Switch")?;
                self.dump_expr(out, discriminant, depth + 1)?;
                for arm in arms {
                    writeln!(out, "{}{}", "  ".repeat(depth + 1), arm.kind())?;
                    if let SwitchArm::Case { value, .. } = arm {
                        self.dump_expr(out, value, depth + 2)?;
                    }
                    for s in arm.body() {
                        self.dump_stmt(out, s, depth + 2)?;
                    }
                }
                Ok(())
            }
            Stmt::Break => writeln!(out, "{pad}Break"),
        }
    }

    fn dump_assign(&self, out: &mut String, assign: &Assignment, depth: usize) -> fmt::Result {
        writeln!(out, "{}Assignment {}", "  ".repeat(depth), self.name(assign.name))?;
        self.dump_expr(out, &assign.value, depth + 1)
    }

    fn dump_expr(&self, out: &mut String, expr: &Expr, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match expr {
            Expr::Number(text) => writeln!(out, "{pad}Number {text}"),
            Expr::Identifier(sym) => writeln!(out, "{pad}Identifier {}", self.name(*sym)),
            Expr::Binary(op, lhs, rhs) => {
                writeln!(out, "{pad}BinaryOp {}", op.symbol())?;
                self.dump_expr(out, lhs, depth + 1)?;
                self.dump_expr(out, rhs, depth + 1)
            }
            Expr::Compare(rel, lhs, rhs) => {
                writeln!(out, "{pad}Compare {}", rel.symbol())?;
                self.dump_expr(out, lhs, depth + 1)?;
                self.dump_expr(out, rhs, depth + 1)
            }
            Expr::Assign(assign) => self.dump_assign(out, assign, depth),
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("statements", &self.statements)
            .field("symbols", &self.string_interner.len())
            .finish()
    }
}
