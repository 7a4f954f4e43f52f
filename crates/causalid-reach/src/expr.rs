//! Boolean expression language for rule conditions.
//!
//! A rule's third column is a condition over the two endpoints of a
//! transition, e.g. `current not in Z and next in A`. Expressions are parsed
//! once (Pratt-style precedence climbing) and evaluated per transition.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::instance::Sets;
use crate::Vertex;

/// Endpoint variable of a transition condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Var {
    /// The vertex the automaton is leaving.
    Current,
    /// The vertex the automaton is moving to.
    Next,
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Current => write!(f, "current"),
            Var::Next => write!(f, "next"),
        }
    }
}

/// Parsed rule condition.
#[derive(Debug)]
pub(crate) enum Expr {
    Const(bool),
    /// `<var> in <set>` (or its negation).
    Membership {
        var: Var,
        set: usize,
        negated: bool,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parses a condition against the table's declared set names.
    pub(crate) fn parse(input: &str, sets: &FxHashMap<String, usize>) -> Result<Expr, String> {
        let mut tokens = Lexer::tokenize(input)?;
        let expr = parse_binding(&mut tokens, 0, sets)?;
        match tokens.next() {
            Token::Eof => Ok(expr),
            t => Err(format!("trailing input after expression: {t}")),
        }
    }

    /// Evaluates the condition for a transition from `current` to `next`.
    pub(crate) fn evaluate(&self, sets: &Sets, current: Vertex, next: Vertex) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Membership { var, set, negated } => {
                let vertex = match var {
                    Var::Current => current,
                    Var::Next => next,
                };
                sets.contains(*set, vertex) != *negated
            }
            Expr::Not(inner) => !inner.evaluate(sets, current, next),
            Expr::And(lhs, rhs) => {
                lhs.evaluate(sets, current, next) && rhs.evaluate(sets, current, next)
            }
            Expr::Or(lhs, rhs) => {
                lhs.evaluate(sets, current, next) || rhs.evaluate(sets, current, next)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Var(Var),
    Bool(bool),
    And,
    Or,
    Not,
    In,
    NotIn,
    Open,
    Close,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(s) => write!(f, "'{s}'"),
            Token::Var(v) => write!(f, "'{v}'"),
            Token::Bool(b) => write!(f, "'{b}'"),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
            Token::Not => write!(f, "'not'"),
            Token::In => write!(f, "'in'"),
            Token::NotIn => write!(f, "'not in'"),
            Token::Open => write!(f, "opening parenthesis"),
            Token::Close => write!(f, "closing parenthesis"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

struct Lexer {
    /// Tokens in reverse order so `next` can pop from the back.
    tokens: Vec<Token>,
}

impl Lexer {
    fn tokenize(input: &str) -> Result<Lexer, String> {
        let spaced = input.replace('(', " ( ").replace(')', " ) ");
        let mut tokens = Vec::new();
        for word in spaced.split_whitespace() {
            let token = match word {
                "(" => Token::Open,
                ")" => Token::Close,
                "and" => Token::And,
                "or" => Token::Or,
                "not" => Token::Not,
                "in" => Token::In,
                "true" => Token::Bool(true),
                "false" => Token::Bool(false),
                "current" => Token::Var(Var::Current),
                "next" => Token::Var(Var::Next),
                other => Token::Word(other.to_owned()),
            };
            // fuse `not` directly followed by `in` into one operator
            if token == Token::In && tokens.last() == Some(&Token::Not) {
                tokens.pop();
                tokens.push(Token::NotIn);
            } else {
                tokens.push(token);
            }
        }
        tokens.reverse();
        Ok(Lexer { tokens })
    }

    fn next(&mut self) -> Token {
        self.tokens.pop().unwrap_or(Token::Eof)
    }

    fn peek(&self) -> Token {
        self.tokens.last().cloned().unwrap_or(Token::Eof)
    }
}

/// `and`/`or` bind weaker than `not`, membership binds strongest.
fn infix_binding(token: &Token) -> Option<(u8, u8)> {
    match token {
        Token::And | Token::Or => Some((1, 2)),
        Token::In | Token::NotIn => Some((5, 6)),
        _ => None,
    }
}

fn parse_binding(
    lexer: &mut Lexer,
    min_bp: u8,
    sets: &FxHashMap<String, usize>,
) -> Result<Expr, String> {
    let mut lhs = match lexer.next() {
        Token::Bool(b) => Expr::Const(b),
        Token::Var(v) => {
            // a bare variable is only valid as the left side of a membership
            let op = lexer.next();
            let negated = match op {
                Token::In => false,
                Token::NotIn => true,
                t => return Err(format!("expected 'in' or 'not in' after '{v}', found {t}")),
            };
            let set = match lexer.next() {
                Token::Word(name) => *sets
                    .get(&name)
                    .ok_or_else(|| format!("unknown set '{name}' in expression"))?,
                t => return Err(format!("expected a set name after membership operator, found {t}")),
            };
            Expr::Membership { var: v, set, negated }
        }
        Token::Open => {
            let inner = parse_binding(lexer, 0, sets)?;
            if lexer.next() != Token::Close {
                return Err("missing closing parenthesis".to_owned());
            }
            inner
        }
        Token::Not => {
            let rhs = parse_binding(lexer, 3, sets)?;
            Expr::Not(Box::new(rhs))
        }
        Token::Word(s) => return Err(format!("unexpected identifier '{s}', sets may only appear after 'in'")),
        t => return Err(format!("unexpected {t}")),
    };

    loop {
        let op = lexer.peek();
        if matches!(op, Token::Eof | Token::Close) {
            break;
        }
        let Some((left_bp, right_bp)) = infix_binding(&op) else {
            return Err(format!("expected 'and' or 'or', found {op}"));
        };
        if matches!(op, Token::In | Token::NotIn) {
            return Err(format!("{op} must directly follow 'current' or 'next'"));
        }
        if left_bp < min_bp {
            break;
        }
        lexer.next();
        let rhs = parse_binding(lexer, right_bp, sets)?;
        lhs = match op {
            Token::And => Expr::And(Box::new(lhs), Box::new(rhs)),
            Token::Or => Expr::Or(Box::new(lhs), Box::new(rhs)),
            _ => unreachable!("only 'and'/'or' reach this arm"),
        };
    }
    Ok(lhs)
}
