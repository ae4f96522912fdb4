use super::polynomial::Polynomial;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};
use thiserror::Error;

/// Error type returned when an expression string cannot be read.
///
/// Parsing fails closed: any construct outside the polynomial grammar
/// is rejected rather than guessed at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    #[error("exponents must be nonnegative integer literals")]
    BadExponent,
    #[error("division is only supported by a nonzero numeric constant")]
    BadDivisor,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(BigRational),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(v) => v.to_string(),
            Token::Ident(s) => s.clone(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "^".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::new();
    let mut chars = src.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '+' => {
                chars.next();
                out.push(Token::Plus);
            }
            '-' => {
                chars.next();
                out.push(Token::Minus);
            }
            '*' => {
                chars.next();
                out.push(Token::Star);
            }
            '/' => {
                chars.next();
                out.push(Token::Slash);
            }
            '^' => {
                chars.next();
                out.push(Token::Caret);
            }
            '(' => {
                chars.next();
                out.push(Token::LParen);
            }
            ')' => {
                chars.next();
                out.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut digits = String::new();
                let mut frac_digits = 0u32;
                let mut seen_dot = false;
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        digits.push(d);
                        if seen_dot {
                            frac_digits += 1;
                        }
                        chars.next();
                    } else if d == '.' && !seen_dot {
                        seen_dot = true;
                        chars.next();
                    } else {
                        break;
                    }
                }
                if digits.is_empty() {
                    return Err(ParseError::UnexpectedChar('.'));
                }
                // decimal literals become exact rationals, e.g. 0.25 = 25/100
                let numer: BigInt = digits.parse().map_err(|_| ParseError::UnexpectedChar(c))?;
                let denom = BigInt::from(10u32).pow(frac_digits);
                out.push(Token::Num(BigRational::new(numer, denom)));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        name.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push(Token::Ident(name));
            }
            other => return Err(ParseError::UnexpectedChar(other)),
        }
    }
    Ok(out)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    vars: &'a [&'a str],
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let tok = self.tokens.get(self.pos).cloned().ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn nvars(&self) -> usize {
        self.vars.len()
    }

    // expr := [+|-] term ((+|-) term)*
    fn expr(&mut self) -> Result<Polynomial, ParseError> {
        let mut negate = false;
        match self.peek() {
            Some(Token::Minus) => {
                negate = true;
                self.pos += 1;
            }
            Some(Token::Plus) => {
                self.pos += 1;
            }
            _ => {}
        }
        let mut acc = self.term()?;
        if negate {
            acc = -&acc;
        }
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    acc = &acc + &self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    acc = &acc - &self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    // term := factor ((*|/) factor)*
    fn term(&mut self) -> Result<Polynomial, ParseError> {
        let mut acc = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    acc = &acc * &self.factor()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    // only division by a nonzero constant keeps us polynomial
                    if divisor.degree() > 0 {
                        return Err(ParseError::BadDivisor);
                    }
                    let c = divisor.constant_coeff();
                    if c.is_zero() {
                        return Err(ParseError::BadDivisor);
                    }
                    acc = acc.scale(&c.recip());
                }
                _ => return Ok(acc),
            }
        }
    }

    // factor := atom [^ integer]
    fn factor(&mut self) -> Result<Polynomial, ParseError> {
        let base = self.atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.pos += 1;
            match self.next()? {
                Token::Num(v) => {
                    if !v.is_integer() {
                        return Err(ParseError::BadExponent);
                    }
                    let e = v.to_integer().to_u32().ok_or(ParseError::BadExponent)?;
                    return Ok(base.pow(e));
                }
                _ => return Err(ParseError::BadExponent),
            }
        }
        Ok(base)
    }

    // atom := number | variable | ( expr )
    fn atom(&mut self) -> Result<Polynomial, ParseError> {
        match self.next()? {
            Token::Num(v) => Ok(Polynomial::constant(self.nvars(), v)),
            Token::Ident(name) => {
                let i = self
                    .vars
                    .iter()
                    .position(|v| *v == name)
                    .ok_or(ParseError::UnknownVariable(name))?;
                Ok(Polynomial::variable(self.nvars(), i))
            }
            Token::LParen => {
                let inner = self.expr()?;
                match self.next()? {
                    Token::RParen => Ok(inner),
                    other => Err(ParseError::UnexpectedToken(other.describe())),
                }
            }
            other => Err(ParseError::UnexpectedToken(other.describe())),
        }
    }
}

/// Parse an expression string into a [`Polynomial`] over the given
/// ordered variable names.
///
/// The grammar covers `+ - * / ^ ( )`, integer and decimal literals,
/// and the supplied variable identifiers.  Division is restricted to
/// nonzero constants and exponents to nonnegative integer literals.
pub fn parse_polynomial(src: &str, vars: &[&str]) -> Result<Polynomial, ParseError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        vars,
    };
    let poly = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(ParseError::UnexpectedToken(tok.describe()));
    }
    Ok(poly)
}
