//! Byte-at-a-time scanner turning source text into a flat token list.
//! No external lexer-generator crate — this is a small enough grammar
//! that a hand-rolled scanner reads as plainly as a generated one.

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Ident(String),
    Int(i32),
    KwVar,
    KwProc,
    KwReach,
    KwSkip,
    KwBreak,
    KwIf,
    KwDo,
    KwElse,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semi,
    Comma,
    Arrow,    // ->
    Pipe,     // |
    Assign,   // :=
    DotDot,   // ..
    Question, // ?
    Lt,
    Gt,
    Leq,
    Geq,
    EqEq,
    Bang,
    AmpAmp,
    PipePipe,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

impl Tok {
    /// Human-readable name used in parse-error messages.
    pub fn describe(&self) -> String {
        match self {
            Tok::Ident(s) => format!("identifier {s:?}"),
            Tok::Int(n) => format!("integer {n}"),
            other => format!("{other:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub tok: Tok,
    pub line: u32,
    pub col: u32,
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src: src.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        if c == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_whitespace() => {
                    self.bump();
                }
                Some(b'/') if self.peek2() == Some(b'/') => {
                    while self.peek().is_some() && self.peek() != Some(b'\n') {
                        self.bump();
                    }
                }
                Some(b'/') if self.peek2() == Some(b'*') => {
                    let (line, col) = (self.line, self.col);
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek() {
                            None => {
                                return Err(ParseError::UnterminatedComment { line, col });
                            }
                            Some(b'*') if self.peek2() == Some(b'/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            Some(_) => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_all(mut self) -> Result<Vec<Token>, ParseError> {
        let mut out = Vec::new();
        loop {
            self.skip_trivia()?;
            let (line, col) = (self.line, self.col);
            let Some(c) = self.peek() else { break };
            let tok = match c {
                b'{' => {
                    self.bump();
                    Tok::LBrace
                }
                b'}' => {
                    self.bump();
                    Tok::RBrace
                }
                b'(' => {
                    self.bump();
                    Tok::LParen
                }
                b')' => {
                    self.bump();
                    Tok::RParen
                }
                b';' => {
                    self.bump();
                    Tok::Semi
                }
                b',' => {
                    self.bump();
                    Tok::Comma
                }
                b'?' => {
                    self.bump();
                    Tok::Question
                }
                b'|' => {
                    self.bump();
                    if self.peek() == Some(b'|') {
                        self.bump();
                        Tok::PipePipe
                    } else {
                        Tok::Pipe
                    }
                }
                b'&' if self.peek2() == Some(b'&') => {
                    self.bump();
                    self.bump();
                    Tok::AmpAmp
                }
                b':' if self.peek2() == Some(b'=') => {
                    self.bump();
                    self.bump();
                    Tok::Assign
                }
                b'-' if self.peek2() == Some(b'>') => {
                    self.bump();
                    self.bump();
                    Tok::Arrow
                }
                b'.' if self.peek2() == Some(b'.') => {
                    self.bump();
                    self.bump();
                    Tok::DotDot
                }
                b'<' => {
                    self.bump();
                    if self.peek() == Some(b'=') {
                        self.bump();
                        Tok::Leq
                    } else {
                        Tok::Lt
                    }
                }
                b'>' => {
                    self.bump();
                    if self.peek() == Some(b'=') {
                        self.bump();
                        Tok::Geq
                    } else {
                        Tok::Gt
                    }
                }
                b'=' if self.peek2() == Some(b'=') => {
                    self.bump();
                    self.bump();
                    Tok::EqEq
                }
                b'!' => {
                    self.bump();
                    Tok::Bang
                }
                b'+' => {
                    self.bump();
                    Tok::Plus
                }
                b'-' => {
                    self.bump();
                    Tok::Minus
                }
                b'*' => {
                    self.bump();
                    Tok::Star
                }
                b'/' => {
                    self.bump();
                    Tok::Slash
                }
                b'%' => {
                    self.bump();
                    Tok::Percent
                }
                b'0'..=b'9' => self.lex_int(line, col)?,
                c if c.is_ascii_alphabetic() || c == b'_' => self.lex_ident(),
                other => {
                    return Err(ParseError::UnexpectedChar {
                        line,
                        col,
                        ch: other as char,
                    });
                }
            };
            out.push(Token { tok, line, col });
        }
        Ok(out)
    }

    fn lex_int(&mut self, line: u32, col: u32) -> Result<Tok, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
        text.parse::<i32>()
            .map(Tok::Int)
            .map_err(|_| ParseError::IntLiteralOutOfRange {
                line,
                col,
                text: text.to_string(),
            })
    }

    fn lex_ident(&mut self) -> Tok {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == b'_') {
            self.bump();
        }
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap();
        match text {
            "var" => Tok::KwVar,
            "proc" => Tok::KwProc,
            "reach" => Tok::KwReach,
            "skip" => Tok::KwSkip,
            "break" => Tok::KwBreak,
            "if" => Tok::KwIf,
            "do" => Tok::KwDo,
            "else" => Tok::KwElse,
            _ => Tok::Ident(text.to_string()),
        }
    }
}

pub fn lex(src: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(src).lex_all()
}
