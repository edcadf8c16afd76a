//! Recursive-descent parser with precedence-climbing expressions.
//!
//! Variable ids are assigned densely as declarations are encountered —
//! globals first, in file order, then each procedure's locals — so the
//! resulting tree already satisfies the compiler's "ids are `0..nbvar`"
//! invariant before a single expression is resolved.

use rc_core::ast::{Assign, BinOp, Branch, Check, Expr, Proc, Prog, Stmt, UnOp, Variable};

use crate::error::ParseError;
use crate::lexer::{Tok, Token};

pub struct Parser {
    toks: Vec<Token>,
    pos: usize,
    next_var_id: u32,
}

impl Parser {
    pub fn new(toks: Vec<Token>) -> Self {
        Parser {
            toks,
            pos: 0,
            next_var_id: 0,
        }
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|t| &t.tok)
    }

    fn pos_info(&self) -> (u32, u32) {
        self.toks
            .get(self.pos)
            .map(|t| (t.line, t.col))
            .unwrap_or_else(|| {
                self.toks
                    .last()
                    .map(|t| (t.line, t.col + 1))
                    .unwrap_or((1, 1))
            })
    }

    fn bump(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).map(|t| t.tok.clone());
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, want: &Tok) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t == want => {
                self.bump();
                Ok(())
            }
            Some(found) => {
                let (line, col) = self.pos_info();
                Err(ParseError::UnexpectedToken {
                    line,
                    col,
                    expected: format!("{want:?}"),
                    found: found.describe(),
                })
            }
            None => Err(ParseError::UnexpectedEof {
                expected: format!("{want:?}"),
            }),
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.peek().cloned() {
            Some(Tok::Ident(name)) => {
                self.bump();
                Ok(name)
            }
            Some(found) => {
                let (line, col) = self.pos_info();
                Err(ParseError::UnexpectedToken {
                    line,
                    col,
                    expected: "identifier".to_string(),
                    found: found.describe(),
                })
            }
            None => Err(ParseError::UnexpectedEof {
                expected: "identifier".to_string(),
            }),
        }
    }

    fn alloc_var(&mut self, name: String) -> Variable {
        let id = self.next_var_id;
        self.next_var_id += 1;
        Variable { name, id }
    }

    /// `"var" ident ("," ident)* ";"`
    fn parse_decl(&mut self) -> Result<Vec<Variable>, ParseError> {
        self.expect(&Tok::KwVar)?;
        let mut vars = vec![self.expect_ident()?];
        while self.peek() == Some(&Tok::Comma) {
            self.bump();
            vars.push(self.expect_ident()?);
        }
        self.expect(&Tok::Semi)?;
        Ok(vars.into_iter().map(|n| self.alloc_var(n)).collect())
    }

    pub fn parse_prog(&mut self) -> Result<Prog, ParseError> {
        let mut globals = Vec::new();
        while self.peek() == Some(&Tok::KwVar) {
            globals.extend(self.parse_decl()?);
        }

        let mut procs = Vec::new();
        while self.peek() == Some(&Tok::KwProc) {
            procs.push(self.parse_proc()?);
        }

        let mut checks = Vec::new();
        while self.peek() == Some(&Tok::KwReach) {
            self.bump();
            self.expect(&Tok::Question)?;
            let cond = self.parse_expr()?;
            self.expect(&Tok::Semi)?;
            checks.push(Check { cond });
        }

        if let Some(found) = self.peek() {
            let (line, col) = self.pos_info();
            return Err(ParseError::UnexpectedToken {
                line,
                col,
                expected: "end of input".to_string(),
                found: found.describe(),
            });
        }

        Ok(Prog {
            globals,
            procs,
            checks,
            nbvar: self.next_var_id,
        })
    }

    fn parse_proc(&mut self) -> Result<Proc, ParseError> {
        self.expect(&Tok::KwProc)?;
        let name = self.expect_ident()?;
        self.expect(&Tok::LBrace)?;
        let mut locals = Vec::new();
        while self.peek() == Some(&Tok::KwVar) {
            locals.extend(self.parse_decl()?);
        }
        let body = self.parse_stmts_until(&[Tok::RBrace])?;
        self.expect(&Tok::RBrace)?;
        Ok(Proc { name, locals, body })
    }

    fn at_stmt_terminator(&self, terminators: &[Tok]) -> bool {
        match self.peek() {
            None => true,
            Some(t) => terminators.iter().any(|term| term == t),
        }
    }

    fn parse_stmts_until(&mut self, terminators: &[Tok]) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !self.at_stmt_terminator(terminators) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().cloned() {
            Some(Tok::Ident(name)) => {
                self.bump();
                self.expect(&Tok::Assign)?;
                let value = self.parse_expr()?;
                self.expect(&Tok::Semi)?;
                Ok(Stmt::Assign(Assign {
                    target: name,
                    value,
                }))
            }
            Some(Tok::KwSkip) => {
                self.bump();
                self.expect(&Tok::Semi)?;
                Ok(Stmt::Skip)
            }
            Some(Tok::KwBreak) => {
                self.bump();
                self.expect(&Tok::Semi)?;
                Ok(Stmt::Break)
            }
            Some(Tok::KwIf) => {
                self.bump();
                self.expect(&Tok::LBrace)?;
                let branches = self.parse_branch_list()?;
                self.expect(&Tok::RBrace)?;
                Ok(Stmt::If(branches))
            }
            Some(Tok::KwDo) => {
                self.bump();
                self.expect(&Tok::LBrace)?;
                let branches = self.parse_branch_list()?;
                self.expect(&Tok::RBrace)?;
                Ok(Stmt::Do(branches))
            }
            Some(found) => {
                let (line, col) = self.pos_info();
                Err(ParseError::UnexpectedToken {
                    line,
                    col,
                    expected: "statement".to_string(),
                    found: found.describe(),
                })
            }
            None => Err(ParseError::UnexpectedEof {
                expected: "statement".to_string(),
            }),
        }
    }

    fn parse_branch_list(&mut self) -> Result<Vec<Branch>, ParseError> {
        let mut branches = vec![self.parse_branch()?];
        while self.peek() == Some(&Tok::Pipe) {
            self.bump();
            branches.push(self.parse_branch()?);
        }
        Ok(branches)
    }

    fn parse_branch(&mut self) -> Result<Branch, ParseError> {
        let cond = if self.peek() == Some(&Tok::KwElse) {
            self.bump();
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&Tok::Arrow)?;
        let body = self.parse_stmts_until(&[Tok::Pipe, Tok::RBrace])?;
        Ok(Branch { cond, body })
    }

    // -- expressions, lowest to highest precedence --

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        while self.peek() == Some(&Tok::PipePipe) {
            self.bump();
            let rhs = self.parse_and()?;
            lhs = Expr::Bin(BinOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_cmp()?;
        while self.peek() == Some(&Tok::AmpAmp) {
            self.bump();
            let rhs = self.parse_cmp()?;
            lhs = Expr::Bin(BinOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_cmp(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_add()?;
        let op = match self.peek() {
            Some(Tok::Lt) => Some(BinOp::Lt),
            Some(Tok::Gt) => Some(BinOp::Gt),
            Some(Tok::Leq) => Some(BinOp::Leq),
            Some(Tok::Geq) => Some(BinOp::Geq),
            Some(Tok::EqEq) => Some(BinOp::Eq),
            _ => None,
        };
        match op {
            Some(op) => {
                self.bump();
                let rhs = self.parse_add()?;
                Ok(Expr::Bin(op, Box::new(lhs), Box::new(rhs)))
            }
            None => Ok(lhs),
        }
    }

    fn parse_add(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_mul()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Plus) => BinOp::Add,
                Some(Tok::Minus) => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_mul()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_mul(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Tok::Star) => BinOp::Mul,
                Some(Tok::Slash) => BinOp::Div,
                Some(Tok::Percent) => BinOp::Mod,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = Expr::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Tok::Bang) => {
                self.bump();
                Ok(Expr::Un(UnOp::Not, Box::new(self.parse_unary()?)))
            }
            Some(Tok::Minus) => {
                self.bump();
                Ok(Expr::Un(UnOp::Neg, Box::new(self.parse_unary()?)))
            }
            _ => self.parse_range(),
        }
    }

    fn parse_range(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_primary()?;
        if self.peek() == Some(&Tok::DotDot) {
            self.bump();
            let rhs = self.parse_primary()?;
            Ok(Expr::Bin(BinOp::Range, Box::new(lhs), Box::new(rhs)))
        } else {
            Ok(lhs)
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().cloned() {
            Some(Tok::Ident(name)) => {
                self.bump();
                Ok(Expr::Ident(name))
            }
            Some(Tok::Int(n)) => {
                self.bump();
                Ok(Expr::Val(n))
            }
            Some(Tok::LParen) => {
                self.bump();
                let e = self.parse_expr()?;
                self.expect(&Tok::RParen)?;
                Ok(e)
            }
            Some(found) => {
                let (line, col) = self.pos_info();
                Err(ParseError::UnexpectedToken {
                    line,
                    col,
                    expected: "expression".to_string(),
                    found: found.describe(),
                })
            }
            None => Err(ParseError::UnexpectedEof {
                expected: "expression".to_string(),
            }),
        }
    }
}
