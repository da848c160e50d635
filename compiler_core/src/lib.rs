use frontend::ast::Program;
use frontend::{LexError, ParserError, RedeclarationPolicy, SemanticError, SymbolTable, Token};
use thiserror::Error;

/// A code generator the session can hand a checked program to.
pub trait Backend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    fn generate(&self, program: &Program) -> Result<String, Self::Error>;
}

/// Pipeline failure, labelled with the stage that raised it.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexer stage error: {0}")]
    Lexer(#[from] LexError),
    #[error("Parser stage error: {0}")]
    Parser(#[from] ParserError),
    #[error("Semantic Analysis stage error: {0}")]
    Semantic(#[from] SemanticError),
    #[error("Code Generation stage error: {0}")]
    Codegen(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CompileError {
    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Lexer(_) => Stage::Lexer,
            CompileError::Parser(_) => Stage::Parser,
            CompileError::Semantic(_) => Stage::Semantic,
            CompileError::Codegen(_) => Stage::Codegen,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexer,
    Parser,
    Semantic,
    Codegen,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub redeclaration: RedeclarationPolicy,
}

/// Everything one successful run of the pipeline produced.
#[derive(Debug)]
pub struct Compilation {
    pub program: Program,
    pub symbols: SymbolTable,
    pub output: String,
}

/// Compiler session that drives the pipeline stages in order.
///
/// Each stage's failure is wrapped with the stage label and stops the run;
/// a program that fails the semantic check never reaches the backend.
#[derive(Debug, Default)]
pub struct CompilerSession {
    config: SessionConfig,
}

impl CompilerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, CompileError> {
        log::info!("Lexing {} bytes", source.len());
        Ok(frontend::tokenize(source)?)
    }

    /// Lexes and parses `source`.
    pub fn parse_program(&self, source: &str) -> Result<Program, CompileError> {
        let tokens = self.tokenize(source)?;
        log::info!("Parsing {} tokens", tokens.len());
        Ok(frontend::parse(&tokens)?)
    }

    pub fn check(&self, program: &Program) -> Result<SymbolTable, CompileError> {
        log::info!("Checking {} top-level statements", program.len());
        Ok(frontend::check_with(program, self.config.redeclaration)?)
    }

    /// Runs every stage, ending with `backend`.
    pub fn compile<B: Backend>(&self, source: &str, backend: &B) -> Result<Compilation, CompileError> {
        let program = self.parse_program(source)?;
        let symbols = self.check(&program)?;
        log::info!("Generating code with the {} backend", backend.name());
        let output = backend
            .generate(&program)
            .map_err(|e| CompileError::Codegen(Box::new(e)))?;
        Ok(Compilation {
            program,
            symbols,
            output,
        })
    }
}
