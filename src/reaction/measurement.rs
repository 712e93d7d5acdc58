use std::fmt;

use super::combination::{Operator, ReactionExpr};
use super::process::{Process, ProcessText};
use super::ReactionError;
use crate::dictionary::{Dictionaries, DictionaryKind};
use crate::particle::{is_isomer_math, parse_isomer_terms, IsomerTag};

/// A process plus the quantity codes that follow it, `(94-PU-239(N,F),,SIG)`
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    /// The nuclear process
    pub process: Process,
    /// Quantity and modifier codes with empty fields dropped: `,,SIG,,MXW` → `[SIG, MXW]`
    pub quantity: Vec<String>,
}

impl Reaction {
    /// Parse a single reaction, with or without its enclosing parentheses.
    ///
    /// A residual written with isomer arithmetic is rejected with
    /// [`ReactionError::IsomerMath`]; [`Measurement::parse_body`] expands those.
    pub fn parse(text: &str) -> Result<Self, ReactionError> {
        let body = strip_whitespace(text);
        let body = strip_outer_parens(&body);
        let (pieces, quantity) = split_body(body)?;
        Self::from_pieces(&pieces, quantity, body)
    }

    fn from_pieces(
        pieces: &ProcessText,
        quantity: Vec<String>,
        text: &str,
    ) -> Result<Self, ReactionError> {
        Ok(Self {
            process: Process::resolve(pieces, text)?,
            quantity,
        })
    }

    /// Whether `code` is one of the quantity codes
    pub fn has_quantity(&self, code: &str) -> bool {
        self.quantity.iter().any(|q| q == code)
    }

    /// Human-readable quantity, e.g. `Maxwellian average Cross section`.
    ///
    /// The whole code list is looked up in the Quantities dictionary first;
    /// otherwise the first modifier name is followed by the first quantity
    /// matching a code or `,code`.
    pub fn reaction_type(&self) -> String {
        let dicts = Dictionaries::global();
        let quantities = dicts.get(DictionaryKind::Quantities);
        let joined = self.quantity.join(",");
        if let Some(name) = quantities.description(&joined) {
            return name.to_string();
        }
        // keys such as `POL/DA,,ANA` keep the empty fields the parsed list drops
        if self.quantity.len() > 1 {
            let codes = || self.quantity.iter().map(String::as_str);
            let found = quantities
                .iter()
                .find(|(key, _)| key.split(',').filter(|s| !s.is_empty()).eq(codes()))
                .and_then(|(_, fields)| fields.first());
            if let Some(name) = found {
                return name.clone();
            }
        }

        let mut result = String::new();
        if let Some(modifier) = self
            .quantity
            .iter()
            .find_map(|q| dicts.lookup(DictionaryKind::Modifiers, q))
        {
            result.push_str(modifier);
            result.push(' ');
        }
        let plain = self.quantity.iter().cloned();
        let prefixed = self.quantity.iter().map(|q| format!(",{q}"));
        if let Some(name) = plain.chain(prefixed).find_map(|q| quantities.description(&q)) {
            result.push_str(name);
        }
        result
    }

    /// EXFOR form `(<process>,<quantity>)`
    pub fn exfor_style(&self) -> String {
        format!("({},{})", self.process.exfor_style(), self.quantity.join(","))
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.reaction_type(), self.process)
    }
}

/// One reaction per isomer state, expanded from a residual such as `79-AU-196-G+M1`
#[derive(Debug, Clone, PartialEq)]
pub struct IsomerCombination {
    /// One reaction per isomer term
    pub branches: Vec<Reaction>,
    /// Operators between consecutive branches
    pub ops: Vec<Operator>,
}

impl IsomerCombination {
    /// Expand a reaction body whose residual carries isomer arithmetic
    fn expand(pieces: &ProcessText, quantity: &[String], text: &str) -> Result<Self, ReactionError> {
        let residual = pieces
            .residual
            .as_deref()
            .ok_or_else(|| ReactionError::IsomerMath(text.to_string()))?;
        let (base, suffix) = split_nuclide(residual)
            .ok_or_else(|| ReactionError::parsing(text, 0, "isomer math outside a nuclide"))?;
        let terms = parse_isomer_terms(suffix, residual).map_err(|e| ReactionError::particle(text, e))?;
        if !is_isomer_math(&terms) {
            return Err(ReactionError::IsomerMath(text.to_string()));
        }

        let mut branches = Vec::with_capacity(terms.len());
        let mut ops = Vec::with_capacity(terms.len().saturating_sub(1));
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                ops.push(Operator::from_isomer_op(term.op).ok_or_else(|| {
                    ReactionError::parsing(text, 0, format!("bad isomer operator '{}'", term.op))
                })?);
            }
            let tag = match term.tag {
                IsomerTag::Metastable(1) => "M".to_string(),
                other => other.code(),
            };
            let mut branch = pieces.clone();
            branch.residual = Some(format!("{base}-{tag}"));
            branches.push(Reaction::from_pieces(&branch, quantity.to_vec(), text)?);
        }
        Ok(Self { branches, ops })
    }

    /// EXFOR form of the equivalent combination
    pub fn exfor_style(&self) -> String {
        let mut out = String::from("(");
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                out.push_str(self.ops[i - 1].symbol());
            }
            out.push_str(&branch.exfor_style());
        }
        out.push(')');
        out
    }
}

impl fmt::Display for IsomerCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, branch) in self.branches.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.ops[i - 1])?;
            }
            write!(f, "( {branch} )")?;
        }
        write!(f, ")")
    }
}

/// What a REACTION or MONITOR entry measures
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// One reaction
    Single(Reaction),
    /// One reaction whose residual sums or divides isomer states
    Isomers(IsomerCombination),
    /// Algebraic combination of reactions
    Combination(ReactionExpr),
}

impl Measurement {
    /// Parse the inside of one reaction body (no outer parentheses), expanding isomer math
    pub fn parse_body(body: &str) -> Result<Self, ReactionError> {
        let body = strip_whitespace(body);
        let (pieces, quantity) = split_body(&body)?;
        match Reaction::from_pieces(&pieces, quantity.clone(), &body) {
            Ok(reaction) => Ok(Measurement::Single(reaction)),
            Err(ReactionError::IsomerMath(_)) => Ok(Measurement::Isomers(IsomerCombination::expand(
                &pieces, &quantity, &body,
            )?)),
            Err(err) => Err(err),
        }
    }

    /// Parse a full measurement expression, discarding any trailing comment
    pub fn parse(text: &str) -> Result<Self, ReactionError> {
        super::parse_measurement(text).map(|(measurement, _)| measurement)
    }

    /// All elementary reactions in order of appearance
    pub fn reactions(&self) -> Vec<&Reaction> {
        match self {
            Measurement::Single(reaction) => vec![reaction],
            Measurement::Isomers(combo) => combo.branches.iter().collect(),
            Measurement::Combination(expr) => expr.reactions(),
        }
    }

    /// Quantity code lists of every reaction, in order of appearance
    pub fn quantities(&self) -> Vec<&[String]> {
        self.reactions()
            .into_iter()
            .map(|r| r.quantity.as_slice())
            .collect()
    }

    /// The shared quantity of all reactions, if they agree
    pub fn common_quantity(&self) -> Option<&[String]> {
        let quantities = self.quantities();
        let first = *quantities.first()?;
        quantities.iter().all(|q| *q == first).then_some(first)
    }

    /// Equation as a token list. With `schematic`, reactions become `rxn 0`, `rxn 1`, ...
    pub fn equation(&self, schematic: bool) -> Vec<String> {
        let mut out = Vec::new();
        let mut counter = 0;
        self.equation_tokens(schematic, &mut counter, &mut out);
        out
    }

    pub(crate) fn equation_tokens(&self, schematic: bool, counter: &mut usize, out: &mut Vec<String>) {
        let push = |reaction: &Reaction, counter: &mut usize, out: &mut Vec<String>| {
            out.push(if schematic {
                format!("rxn {counter}")
            } else {
                reaction.exfor_style()
            });
            *counter += 1;
        };
        match self {
            Measurement::Single(reaction) => push(reaction, counter, out),
            Measurement::Isomers(combo) => {
                for (i, branch) in combo.branches.iter().enumerate() {
                    if i > 0 {
                        out.push(combo.ops[i - 1].symbol().to_string());
                    }
                    push(branch, counter, out);
                }
            }
            Measurement::Combination(expr) => expr.equation_tokens(schematic, counter, out),
        }
    }

    /// EXFOR form
    pub fn exfor_style(&self) -> String {
        match self {
            Measurement::Single(reaction) => reaction.exfor_style(),
            Measurement::Isomers(combo) => combo.exfor_style(),
            Measurement::Combination(expr) => expr.exfor_style(),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Single(reaction) => write!(f, "{reaction}"),
            Measurement::Isomers(combo) => write!(f, "{combo}"),
            Measurement::Combination(expr) => write!(f, "{expr}"),
        }
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `(body)` → `body` when the first parenthesis closes at the very end
fn strip_outer_parens(text: &str) -> &str {
    if !text.starts_with('(') || !text.ends_with(')') {
        return text;
    }
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return if i == text.len() - 1 {
                        &text[1..i]
                    } else {
                        text
                    };
                }
            }
            _ => {}
        }
    }
    text
}

/// Split `process,quantity,...` into the process pieces and the non-empty quantity codes
fn split_body(body: &str) -> Result<(ProcessText, Vec<String>), ReactionError> {
    let (pieces, end) = ProcessText::split(body)?;
    let rest: String = body.chars().skip(end).collect();
    let Some(codes) = rest.strip_prefix(',') else {
        return Err(ReactionError::parsing(body, end, "expected ',' before quantity"));
    };
    let quantity: Vec<String> = codes
        .split(',')
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();
    if quantity.is_empty() {
        return Err(ReactionError::parsing(body, end, "missing quantity"));
    }
    Ok((pieces, quantity))
}

/// `79-AU-196-G+M1` → (`79-AU-196`, `-G+M1`)
fn split_nuclide(token: &str) -> Option<(String, &str)> {
    let mut dashes = token.match_indices('-');
    dashes.next()?;
    let (second, _) = dashes.next()?;
    let rest = &token[second + 1..];
    let mass_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let split = second + 1 + mass_len;
    Some((token[..split].to_string(), &token[split..]))
}
