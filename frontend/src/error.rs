//! Lexer/parser error taxonomy.

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("{line}:{col}: unexpected character {ch:?}")]
    UnexpectedChar { line: u32, col: u32, ch: char },

    #[error("{line}:{col}: unterminated comment")]
    UnterminatedComment { line: u32, col: u32 },

    #[error("{line}:{col}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: u32,
        col: u32,
        expected: String,
        found: String,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("{line}:{col}: integer literal {text:?} out of range")]
    IntLiteralOutOfRange { line: u32, col: u32, text: String },
}
