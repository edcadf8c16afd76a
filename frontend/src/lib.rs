//! Lexer and recursive-descent parser producing the `rc_core::ast::Prog`
//! tree the compiler consumes.

pub mod error;
pub mod lexer;
pub mod parser;

pub use error::ParseError;

use rc_core::ast::Prog;

/// Parse a whole source file into a statement tree.
pub fn parse(source: &str) -> Result<Prog, ParseError> {
    let tokens = lexer::lex(source)?;
    parser::Parser::new(tokens).parse_prog()
}
