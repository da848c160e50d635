pub mod core;
pub mod expr;
pub mod stmt;

pub mod error;

pub use self::core::{parse, Parser, MAX_NESTING_DEPTH};
pub use error::{Expected, ParserError, ParserErrorKind, ParserResult};
