// lexer.rs

use super::EvalError;

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    /// Raw literal text; turned into a number during evaluation.
    Number(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

pub fn tokenize(line: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().enumerate().peekable();
    while let Some((pos, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut cur = String::new();
                cur.push(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        cur.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if let Some(&(_, e)) = chars.peek() {
                    if e == 'e' || e == 'E' {
                        cur.push(e);
                        chars.next();
                        if let Some(&(_, sign)) = chars.peek() {
                            if sign == '+' || sign == '-' {
                                cur.push(sign);
                                chars.next();
                            }
                        }
                        let mut digits = 0;
                        while let Some(&(_, d)) = chars.peek() {
                            if !d.is_ascii_digit() {
                                break;
                            }
                            cur.push(d);
                            chars.next();
                            digits += 1;
                        }
                        if digits == 0 {
                            return Err(EvalError::Syntax(format!(
                                "missing exponent digits in `{}` at position {}",
                                cur,
                                pos + 1
                            )));
                        }
                    }
                }
                Token::Number(cur)
            }
            other => {
                return Err(EvalError::Syntax(format!(
                    "unexpected character `{}` at position {}",
                    other,
                    pos + 1
                )))
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}
