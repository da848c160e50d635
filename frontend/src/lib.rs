pub mod ast;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;

pub use lexer::{tokenize, LexError, Lexer};
pub use parser::{parse, Parser, ParserError};
pub use semantic::{check, check_with, RedeclarationPolicy, SemanticError, SymbolTable, VarType};
pub use token::{Kind, Token};
