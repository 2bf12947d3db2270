// parser.rs

use super::lexer::Token;
use super::EvalError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinOp { Add, Sub, Mul, Div, Rem }

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Number(String),
    Neg(Box<Expr>),
    /// Left-associative run of same-precedence operators, kept flat so
    /// long inputs like `1+1+...+1` never build a deep tree.
    Chain(Box<Expr>, Vec<(BinOp, Expr)>),
}

fn chain(first: Expr, rest: Vec<(BinOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain(Box::new(first), rest)
    }
}

const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// expr    := term (('+'|'-') term)*
/// term    := unary (('*'|'/'|'%') unary)*
/// unary   := ('+'|'-') unary | primary
/// primary := NUMBER | '(' expr ')'
pub fn parse(tokens: Vec<Token>) -> Result<Expr, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::Syntax("expression is empty".to_string()));
    }
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let expr = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(EvalError::Syntax(format!("unexpected {} after expression", describe(tok))));
    }
    Ok(expr)
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(chain(first, rest)),
            };
            self.pos += 1;
            rest.push((op, self.term()?));
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => return Ok(chain(first, rest)),
            };
            self.pos += 1;
            rest.push((op, self.unary()?));
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::Evaluation("expression is nested too deeply".to_string()));
        }
        Ok(())
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        self.enter()?;
        let expr = self.unary_inner();
        self.depth -= 1;
        expr
    }

    fn unary_inner(&mut self) -> Result<Expr, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.bump() {
            Some(Token::Number(text)) => Ok(Expr::Number(text)),
            Some(Token::LParen) => {
                self.enter()?;
                let inner = self.expr();
                self.depth -= 1;
                let inner = inner?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(tok) => Err(EvalError::Syntax(format!("expected `)` but found {}", describe(&tok)))),
                    None => Err(EvalError::Syntax("missing closing `)`".to_string())),
                }
            }
            Some(tok) => Err(EvalError::Syntax(format!("expected a number but found {}", describe(&tok)))),
            None => Err(EvalError::Syntax("expression ends unexpectedly".to_string())),
        }
    }
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::Number(text) => format!("number `{}`", text),
        Token::Plus => "`+`".to_string(),
        Token::Minus => "`-`".to_string(),
        Token::Star => "`*`".to_string(),
        Token::Slash => "`/`".to_string(),
        Token::Percent => "`%`".to_string(),
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
    }
}
