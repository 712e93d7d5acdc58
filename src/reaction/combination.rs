use std::fmt;

use super::measurement::{Measurement, Reaction};
use super::ReactionError;

/// Operators of a reaction combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Times,
    /// `/`
    Divide,
    /// `//`, ratio of spectra
    SpectrumRatio,
    /// `=`, tautology
    Equals,
}

impl Operator {
    /// EXFOR symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Times => "*",
            Operator::Divide => "/",
            Operator::SpectrumRatio => "//",
            Operator::Equals => "=",
        }
    }

    fn is_additive(self) -> bool {
        matches!(self, Operator::Plus | Operator::Minus)
    }

    pub(crate) fn from_isomer_op(op: char) -> Option<Self> {
        match op {
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            '*' => Some(Operator::Times),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree over reactions, keeping explicit parenthesized groups
#[derive(Debug, Clone, PartialEq)]
pub enum ReactionExpr {
    /// A single reaction body, possibly expanded into isomer branches
    Leaf(Box<Measurement>),
    /// `( expr )`
    Group(Box<ReactionExpr>),
    /// `lhs op rhs`
    Binary {
        /// Left operand
        lhs: Box<ReactionExpr>,
        /// Operator
        op: Operator,
        /// Right operand
        rhs: Box<ReactionExpr>,
    },
}

impl ReactionExpr {
    /// Reactions in order of appearance
    pub fn reactions(&self) -> Vec<&Reaction> {
        match self {
            ReactionExpr::Leaf(m) => m.reactions(),
            ReactionExpr::Group(inner) => inner.reactions(),
            ReactionExpr::Binary { lhs, rhs, .. } => {
                let mut out = lhs.reactions();
                out.extend(rhs.reactions());
                out
            }
        }
    }

    /// Operators in order of appearance
    pub fn operators(&self) -> Vec<Operator> {
        match self {
            ReactionExpr::Leaf(_) => Vec::new(),
            ReactionExpr::Group(inner) => inner.operators(),
            ReactionExpr::Binary { lhs, op, rhs } => {
                let mut out = lhs.operators();
                out.push(*op);
                out.extend(rhs.operators());
                out
            }
        }
    }

    pub(crate) fn equation_tokens(&self, schematic: bool, counter: &mut usize, out: &mut Vec<String>) {
        match self {
            ReactionExpr::Leaf(m) if matches!(**m, Measurement::Isomers(_)) => {
                out.push("(".to_string());
                m.equation_tokens(schematic, counter, out);
                out.push(")".to_string());
            }
            ReactionExpr::Leaf(m) => m.equation_tokens(schematic, counter, out),
            ReactionExpr::Group(inner) => {
                out.push("(".to_string());
                inner.equation_tokens(schematic, counter, out);
                out.push(")".to_string());
            }
            ReactionExpr::Binary { lhs, op, rhs } => {
                lhs.equation_tokens(schematic, counter, out);
                out.push(op.symbol().to_string());
                rhs.equation_tokens(schematic, counter, out);
            }
        }
    }

    /// EXFOR form
    pub fn exfor_style(&self) -> String {
        match self {
            ReactionExpr::Leaf(m) => m.exfor_style(),
            ReactionExpr::Group(inner) => format!("({})", inner.exfor_style()),
            ReactionExpr::Binary { lhs, op, rhs } => {
                format!("{}{}{}", lhs.exfor_style(), op, rhs.exfor_style())
            }
        }
    }
}

impl fmt::Display for ReactionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReactionExpr::Leaf(m) => write!(f, "( {m} )"),
            ReactionExpr::Group(inner) => write!(f, "({inner})"),
            ReactionExpr::Binary { lhs, op, rhs } => write!(f, "{lhs}{op}{rhs}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen(usize),
    RParen(usize),
    Op(Operator, usize),
    /// Reaction body without its parentheses, and its start offset
    Body(String, usize),
}

/// Split a REACTION/MONITOR payload into tokens and the trailing free-text comment.
///
/// `(` followed by another `(` opens a group; `(` followed by anything else
/// starts a reaction body that runs to its balancing `)`. Operators count only
/// in front of a `(`. Once the outermost group is closed and no operator
/// follows, the rest of the text is the comment.
fn tokenize(text: &str) -> Result<(Vec<Token>, String), ReactionError> {
    let chars: Vec<char> = text.chars().collect();
    let next_non_space = |from: usize| (from..chars.len()).find(|&i| !chars[i].is_whitespace());

    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut pos = 0usize;
    let mut comment = String::new();

    while let Some(i) = next_non_space(pos) {
        let c = chars[i];
        let primary_done = matches!(tokens.last(), Some(Token::Body(..)) | Some(Token::RParen(_)));

        if primary_done {
            if let Some((op, width)) = operator_at(&chars, i) {
                if next_non_space(i + width).map(|j| chars[j]) == Some('(') {
                    tokens.push(Token::Op(op, i));
                    pos = i + width;
                    continue;
                }
            }
            if c == ')' && depth > 0 {
                tokens.push(Token::RParen(i));
                depth -= 1;
                pos = i + 1;
                continue;
            }
            if depth == 0 {
                comment = chars[i..].iter().collect::<String>().trim().to_string();
                break;
            }
            return Err(ReactionError::parsing(text, i, format!("unexpected '{c}'")));
        }

        if c != '(' {
            if tokens.is_empty() {
                return Err(ReactionError::parsing(text, i, "expected '('"));
            }
            return Err(ReactionError::parsing(text, i, format!("unexpected '{c}'")));
        }
        if next_non_space(i + 1).map(|j| chars[j]) == Some('(') {
            tokens.push(Token::LParen(i));
            depth += 1;
            pos = i + 1;
            continue;
        }
        let close = matching_paren(&chars, i)
            .ok_or_else(|| ReactionError::parsing(text, i, "unbalanced parentheses"))?;
        tokens.push(Token::Body(chars[i + 1..close].iter().collect(), i + 1));
        pos = close + 1;
    }

    if depth > 0 {
        return Err(ReactionError::parsing(text, chars.len(), "unclosed '('"));
    }
    if tokens.is_empty() {
        return Err(ReactionError::parsing(text, 0, "no reaction found"));
    }
    Ok((tokens, comment))
}

fn operator_at(chars: &[char], i: usize) -> Option<(Operator, usize)> {
    match chars[i] {
        '/' if chars.get(i + 1) == Some(&'/') => Some((Operator::SpectrumRatio, 2)),
        '/' => Some((Operator::Divide, 1)),
        '+' => Some((Operator::Plus, 1)),
        '-' => Some((Operator::Minus, 1)),
        '*' => Some((Operator::Times, 1)),
        '=' => Some((Operator::Equals, 1)),
        _ => None,
    }
}

fn matching_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in chars.iter().enumerate().skip(open) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Recursive descent over the token stream:
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := factor (('*' | '/' | '//' | '=') factor)*
/// factor := body | '(' expr ')'
/// ```
struct Parser<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn offset(&self) -> usize {
        match self.peek() {
            Some(Token::LParen(p) | Token::RParen(p) | Token::Op(_, p) | Token::Body(_, p)) => *p,
            None => self.text.chars().count(),
        }
    }

    fn expr(&mut self) -> Result<ReactionExpr, ReactionError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op, _)) = self.peek() {
            let op = *op;
            if !op.is_additive() {
                break;
            }
            self.pos += 1;
            let rhs = self.term()?;
            lhs = ReactionExpr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<ReactionExpr, ReactionError> {
        let mut lhs = self.factor()?;
        while let Some(Token::Op(op, _)) = self.peek() {
            let op = *op;
            if op.is_additive() {
                break;
            }
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = ReactionExpr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<ReactionExpr, ReactionError> {
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Body(body, start)) => {
                self.pos += 1;
                let measurement = Measurement::parse_body(&body).map_err(|err| match err {
                    ReactionError::ReactionParsing { text, position, message } => {
                        ReactionError::ReactionParsing {
                            text,
                            position: position + start,
                            message,
                        }
                    }
                    other => other,
                })?;
                Ok(ReactionExpr::Leaf(Box::new(measurement)))
            }
            Some(Token::LParen(_)) => {
                self.pos += 1;
                let inner = self.expr()?;
                match self.peek() {
                    Some(Token::RParen(_)) => {
                        self.pos += 1;
                        Ok(ReactionExpr::Group(Box::new(inner)))
                    }
                    _ => Err(ReactionError::parsing(self.text, self.offset(), "expected ')'")),
                }
            }
            _ => Err(ReactionError::parsing(self.text, self.offset(), "expected reaction or '('")),
        }
    }
}

/// Parse a REACTION or MONITOR payload into a measurement and its trailing comment.
///
/// A bare reaction yields [`Measurement::Single`] (or [`Measurement::Isomers`]);
/// anything with groups or operators yields [`Measurement::Combination`].
pub fn parse_measurement(text: &str) -> Result<(Measurement, String), ReactionError> {
    let (tokens, comment) = tokenize(text)?;
    let mut parser = Parser {
        text,
        tokens,
        pos: 0,
    };
    let expr = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ReactionError::parsing(text, parser.offset(), "unexpected trailing tokens"));
    }
    let measurement = match expr {
        ReactionExpr::Leaf(m) => *m,
        other => Measurement::Combination(other),
    };
    Ok((measurement, comment))
}
