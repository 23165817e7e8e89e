//! Recursive-descent parser for tag scripts.
//!
//! Grammar (lowest precedence first):
//!
//! ```text
//! program     := (stmt ";"?)*
//! stmt        := "var" decl ("," decl)* | expr
//! expr        := conditional (("=" | "+=" | "-=") expr)?
//! conditional := or ("?" expr ":" expr)?
//! or          := and ("||" and)*
//! and         := equality ("&&" equality)*
//! equality    := relational (("==" | "!=" | "===" | "!==") relational)*
//! relational  := additive (("<" | "<=" | ">" | ">=") additive)*
//! additive    := term (("+" | "-") term)*
//! term        := unary (("*" | "/" | "%") unary)*
//! unary       := ("!" | "-" | "+") unary | postfix
//! postfix     := primary ("." name | "[" expr "]" | "(" args ")")*
//! ```

use voxgram_lib::EvalError;

use crate::ast::{AssignOp, BinaryOp, Expr, LogicalOp, Property, Stmt, UnaryOp};
use crate::lexer::{Token, TokenKind, lex};

const MAX_NESTING: u32 = 100;

/// Parse a tag body into statements.
pub fn parse(source: &str) -> Result<Vec<Stmt>, EvalError> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };
    parser.program()
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
}

impl<'s> Parser<'s> {
    fn peek(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, EvalError> {
        if self.peek() == kind {
            return Ok(self.bump());
        }
        Err(self.unexpected(what))
    }

    fn text(&self, token: &Token) -> &'s str {
        &self.source[token.span.clone()]
    }

    fn unexpected(&self, what: &str) -> EvalError {
        let token = &self.tokens[self.pos];
        let found = match token.kind {
            TokenKind::Eof => "end of script".to_owned(),
            _ => format!("`{}`", self.text(token)),
        };
        EvalError::Syntax(format!(
            "expected {what}, found {found} at offset {}",
            token.span.start
        ))
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(EvalError::Syntax("expression nested too deeply".into()));
        }
        Ok(())
    }

    fn program(&mut self) -> Result<Vec<Stmt>, EvalError> {
        let mut stmts = Vec::new();
        while self.peek() != TokenKind::Eof {
            if self.eat(TokenKind::Semicolon) {
                continue;
            }
            stmts.push(self.statement()?);
        }
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Stmt, EvalError> {
        if !self.eat(TokenKind::KwVar) {
            return Ok(Stmt::Expr(self.expression()?));
        }

        let mut decls = Vec::new();
        loop {
            let name = self.expect(TokenKind::Ident, "variable name")?;
            let name = self.text(&name).to_owned();
            let init = if self.eat(TokenKind::Assign) {
                Some(self.expression()?)
            } else {
                None
            };
            decls.push((name, init));
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(Stmt::Var(decls))
    }

    fn expression(&mut self) -> Result<Expr, EvalError> {
        self.enter()?;
        let result = self.assignment();
        self.depth -= 1;
        result
    }

    fn assignment(&mut self) -> Result<Expr, EvalError> {
        let target = self.conditional()?;
        let op = match self.peek() {
            TokenKind::Assign => AssignOp::Set,
            TokenKind::PlusAssign => AssignOp::Add,
            TokenKind::MinusAssign => AssignOp::Sub,
            _ => return Ok(target),
        };
        if !matches!(target, Expr::Ident(_) | Expr::Member { .. }) {
            return Err(EvalError::Syntax(format!(
                "invalid assignment target `{target}`"
            )));
        }
        self.bump();
        let value = self.expression()?;
        Ok(Expr::Assign {
            op,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    fn conditional(&mut self) -> Result<Expr, EvalError> {
        let test = self.logical_or()?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }
        let then = self.expression()?;
        self.expect(TokenKind::Colon, "`:`")?;
        let otherwise = self.expression()?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn logical_or(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.logical_and()?;
        while self.eat(TokenKind::OrOr) {
            let rhs = self.logical_and()?;
            lhs = logical(LogicalOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn logical_and(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.equality()?;
        while self.eat(TokenKind::AndAnd) {
            let rhs = self.equality()?;
            lhs = logical(LogicalOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.relational()?;
        loop {
            let op = match self.peek() {
                TokenKind::Eq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::NotEq,
                TokenKind::StrictEq => BinaryOp::StrictEq,
                TokenKind::StrictNotEq => BinaryOp::StrictNotEq,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.relational()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn relational(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEq => BinaryOp::LessEq,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEq => BinaryOp::GreaterEq,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.additive()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn additive(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.bump();
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.postfix(),
        };
        self.bump();
        self.enter()?;
        let operand = self.unary();
        self.depth -= 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?),
        })
    }

    fn postfix(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.bump();
                    let name = self.property_name()?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Property::Name(name),
                    };
                }
                TokenKind::BracketOpen => {
                    self.bump();
                    let key = self.expression()?;
                    self.expect(TokenKind::BracketClose, "`]`")?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property: Property::Computed(Box::new(key)),
                    };
                }
                TokenKind::ParenOpen => {
                    self.bump();
                    let args = self.arguments()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.eat(TokenKind::ParenClose) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(TokenKind::ParenClose) {
                return Ok(args);
            }
            self.expect(TokenKind::Comma, "`,` or `)`")?;
        }
    }

    /// Identifiers and keywords are both valid after `.` and as object keys.
    fn property_name(&mut self) -> Result<String, EvalError> {
        match self.peek() {
            TokenKind::Ident
            | TokenKind::KwVar
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNull
            | TokenKind::KwUndefined => {
                let token = self.bump();
                Ok(self.text(&token).to_owned())
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.peek() {
            TokenKind::Number => {
                let token = self.bump();
                let text = self.text(&token);
                text.parse::<f64>()
                    .map(Expr::Number)
                    .map_err(|_| EvalError::Syntax(format!("invalid number `{text}`")))
            }
            TokenKind::String => {
                let token = self.bump();
                Ok(Expr::String(unescape(self.text(&token))))
            }
            TokenKind::KwTrue => {
                self.bump();
                Ok(Expr::Bool(true))
            }
            TokenKind::KwFalse => {
                self.bump();
                Ok(Expr::Bool(false))
            }
            TokenKind::KwNull => {
                self.bump();
                Ok(Expr::Null)
            }
            TokenKind::KwUndefined => {
                self.bump();
                Ok(Expr::Undefined)
            }
            TokenKind::Ident => {
                let token = self.bump();
                Ok(Expr::Ident(self.text(&token).to_owned()))
            }
            TokenKind::ParenOpen => {
                self.bump();
                let inner = self.expression()?;
                self.expect(TokenKind::ParenClose, "`)`")?;
                Ok(inner)
            }
            TokenKind::BraceOpen => {
                self.bump();
                self.object()
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn object(&mut self) -> Result<Expr, EvalError> {
        let mut fields = Vec::new();
        loop {
            if self.eat(TokenKind::BraceClose) {
                return Ok(Expr::Object(fields));
            }
            let key = match self.peek() {
                TokenKind::String => {
                    let token = self.bump();
                    unescape(self.text(&token))
                }
                TokenKind::Number => {
                    let token = self.bump();
                    self.text(&token).to_owned()
                }
                _ => self.property_name()?,
            };
            self.expect(TokenKind::Colon, "`:`")?;
            let value = self.expression()?;
            fields.push((key, value));
            if !self.eat(TokenKind::Comma) {
                self.expect(TokenKind::BraceClose, "`,` or `}`")?;
                return Ok(Expr::Object(fields));
            }
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn logical(op: LogicalOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Logical {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Strip the quotes of a string literal and resolve its escapes.
fn unescape(literal: &str) -> String {
    let body = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('u');
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
