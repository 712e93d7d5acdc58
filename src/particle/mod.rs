//! # Particle Module
//!
//! Everything that can stand in a target, projectile, product or residual slot
//! of an EXFOR reaction:
//!
//! - elementary particles with an optional multiplicity (`N`, `2N`, `XN`, `A`, `HE3`)
//! - nuclei with optional isomer tags (`94-PU-240`, `79-AU-196-M2`)
//! - natural elements (`26-FE-0`)
//! - chemical compounds (`19-K-CMP`, `44-RU-OXI`)
//! - variable particles and placeholders (`LCP`, `FF`, `ELEM/MASS`, `NPART`)
//!
//! Each variant reports Z and A; [`VARIABLE`] stands in when they are unknown.
//! Three renders are offered: EXFOR style (`94-PU-240`), pretty style (`240Pu`)
//! and ENDL ZA style (`za094240`).

pub mod elements;
mod error;
mod isomer;


pub use error::ParticleError;
pub use isomer::{is_isomer_math, parse_isomer_terms, IsomerTag, IsomerTerm};

use std::fmt;

use crate::dictionary::{Dictionaries, DictionaryKind};
use elements::capitalize;

/// Z and A of particles whose charge or mass is unknown
pub const VARIABLE: i32 = -3000;

/// Target and residual codes whose Z and A are not given
pub const VARIABLE_NUCLEI: [&str; 5] = ["ELEM", "MASS", "ELEM/MASS", "X", "NPART"];

/// Suffixes marking a chemical compound in place of a mass number
pub const COMPOUND_SUFFIXES: [(&str, &str); 4] = [
    ("OXI", "Oxide"),
    ("CMP", "Compound"),
    ("WTR", "Water"),
    ("D2O", "Deuterated_Water"),
];

/// Z and A of the elementary particle codes
pub fn elementary_za(code: &str) -> Option<(i32, i32)> {
    let za = match code {
        "0" | "G" | "AR" | "XR" => (0, 0),
        "N" => (0, 1),
        "P" | "H" => (1, 1),
        "AP" => (-1, -1),
        "AN" => (0, -1),
        "D" => (1, 2),
        "T" => (1, 3),
        "A" => (2, 4),
        "HE3" => (2, 3),
        "HE2" => (2, 2),
        "PI" | "PI0" | "P0" | "ETA" => (0, 0),
        "PIP" | "KP" | "B+" => (1, 0),
        "PIN" | "KN" | "E" | "B" | "B-" => (-1, 0),
        _ => return None,
    };
    Some(za)
}

/// Particles whose Z or A varies from event to event
pub fn variable_particle_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "PI" => "any pion",
        "PN" => "prompt n",
        "AR" => "annih. rad.",
        "DG" => "decay g",
        "DN" => "delayed n",
        "ER" => "???",
        "LCP" => "light charged particle",
        "FF" => "fiss. frag.",
        "LF" => "light frag.",
        "HF" => "heavy frag.",
        "EC" => "e capture",
        "ICE" => "internal conversion e",
        "K" => "any K",
        "XR" => "X-rays",
        "SF" => "spont. fiss. frag.",
        "HCP" => "heavy charged particle",
        "RSD" => "res. nuc.",
        _ => return None,
    };
    Some(name)
}

fn hadron_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "N" => "n",
        "P" => "p",
        "AP" => "anti-p",
        "AN" => "anti-n",
        "PI0" | "P0" => "pi0",
        "PIP" => "pi+",
        "PIN" => "pi-",
        "KP" => "K+",
        "KN" => "K-",
        "ETA" => "eta",
        _ => return None,
    };
    Some(name)
}

/// How many copies of an elementary particle are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// Fixed count, `2N`
    Count(u32),
    /// Unknown count, `XN`
    Variable,
}

/// A nucleus `Z-SYM-A` with optional isomer tags
#[derive(Debug, Clone, PartialEq)]
pub struct Nucleus {
    /// Atomic number
    pub z: i32,
    /// Element symbol, capitalized (`Pu`)
    pub symbol: String,
    /// Mass number
    pub a: i32,
    /// Isomer tags in order of appearance; empty for a plain nucleus
    pub isomers: Vec<IsomerTag>,
}

impl Nucleus {
    /// Create a plain nucleus, looking the symbol up from Z
    pub fn new(z: i32, a: i32) -> Result<Self, ParticleError> {
        let symbol = elements::symbol(z)
            .ok_or_else(|| ParticleError::parsing(&format!("{z}-?-{a}"), "no element with this Z"))?;
        Ok(Self {
            z,
            symbol: symbol.to_string(),
            a,
            isomers: Vec::new(),
        })
    }

    /// Builder-style setter for isomer tags
    pub fn with_isomers(mut self, isomers: Vec<IsomerTag>) -> Self {
        self.isomers = isomers;
        self
    }

    /// Parse `Z-SYM-A[-isomer]`. Isomer arithmetic is rejected with [`ParticleError::IsomerMath`].
    pub fn parse(text: &str) -> Result<Self, ParticleError> {
        match Particle::parse(text)? {
            Particle::Nucleus(nucleus) => Ok(nucleus),
            _ => Err(ParticleError::parsing(text, "not a nucleus")),
        }
    }

    fn is_neutron(&self) -> bool {
        self.z == 0 && self.symbol.eq_ignore_ascii_case("Nn")
    }

    fn shown_isomers(&self) -> Vec<IsomerTag> {
        self.isomers
            .iter()
            .copied()
            .filter(|tag| *tag != IsomerTag::Total)
            .collect()
    }

    /// `94-PU-240-M2`
    pub fn exfor_style(&self) -> String {
        if self.is_neutron() {
            return "n".to_string();
        }
        let base = format!("{}-{}-{}", self.z, self.symbol.to_uppercase(), self.a);
        if self.isomers.is_empty() {
            return base;
        }
        if self.isomers == [IsomerTag::Metastable(1)] {
            return format!("{base}-M");
        }
        let tags: Vec<String> = self.isomers.iter().map(|tag| tag.code()).collect();
        format!("{base}-{}", tags.join("+"))
    }

    /// `240m2Pu`
    pub fn pretty_style(&self) -> String {
        if self.is_neutron() {
            return "n".to_string();
        }
        if self.isomers.is_empty() {
            return format!("{}{}", self.a, self.symbol);
        }
        let shown = self.shown_isomers();
        if shown == [IsomerTag::Metastable(1)] {
            return format!("{}m{}", self.a, self.symbol);
        }
        let tags: Vec<String> = shown.iter().map(ToString::to_string).collect();
        format!("{}m{}{}", self.a, tags.join(","), self.symbol)
    }

    /// `za094240m2`
    pub fn endl_style(&self) -> String {
        let mut za = format!("za{:03}{:03}", self.z, self.a);
        let shown = self.shown_isomers();
        if shown == [IsomerTag::Metastable(1)] {
            za.push('m');
            return za;
        }
        for tag in shown {
            match tag {
                IsomerTag::Ground => za.push('g'),
                IsomerTag::Metastable(n) => za.push_str(&format!("m{n}")),
                IsomerTag::Total => {}
            }
        }
        za
    }
}

/// Anything that can occupy a particle slot of a reaction
#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    /// Elementary particle code from the Z/A table, e.g. `N`, `2P`, `XN`, `HE3`
    Elementary {
        /// Upper-case code
        code: String,
        /// Number of copies
        multiplicity: Multiplicity,
    },
    /// Nucleus with known Z and A
    Nucleus(Nucleus),
    /// Natural element, `26-FE-0`
    Natural {
        /// Atomic number
        z: i32,
        /// Capitalized symbol
        symbol: String,
    },
    /// Chemical compound, `19-K-CMP`
    Compound {
        /// Atomic number of the leading element
        z: i32,
        /// Full upper-case code
        code: String,
    },
    /// Particle or placeholder without definite Z/A (`LCP`, `FF`, `ELEM`, `NPART`)
    Variable {
        /// Upper-case code
        code: String,
    },
}

impl Particle {
    /// Single elementary particle
    pub fn elementary(code: &str) -> Self {
        Particle::Elementary {
            code: code.to_uppercase(),
            multiplicity: Multiplicity::Count(1),
        }
    }

    /// Parse a particle token.
    ///
    /// Resolution order: variable nuclei, nucleus/element/compound forms, the
    /// elementary Z/A table (with a count prefix), the variable particle table,
    /// `X` multiplicity prefixes, and finally the Particles dictionary.
    pub fn parse(text: &str) -> Result<Self, ParticleError> {
        let token = text.trim();
        if token.is_empty() {
            return Err(ParticleError::parsing(text, "empty token"));
        }
        let upper = token.to_uppercase();
        if VARIABLE_NUCLEI.contains(&upper.as_str()) {
            return Ok(Particle::Variable { code: upper });
        }
        if upper.starts_with(|c: char| c.is_ascii_digit()) && upper.contains('-') {
            return parse_nuclear(token, &upper);
        }
        if elementary_za(&upper).is_some() {
            return Ok(Particle::Elementary {
                code: upper,
                multiplicity: Multiplicity::Count(1),
            });
        }
        let digits: String = upper.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            let code = &upper[digits.len()..];
            let count: u32 = digits
                .parse()
                .map_err(|e| ParticleError::parsing(text, format!("bad multiplicity: {e}")))?;
            if elementary_za(code).is_some() {
                return Ok(Particle::Elementary {
                    code: code.to_string(),
                    multiplicity: Multiplicity::Count(count),
                });
            }
            if variable_particle_name(code).is_some() {
                return Ok(Particle::Variable {
                    code: code.to_string(),
                });
            }
            return Err(ParticleError::parsing(text, "unknown particle after multiplicity"));
        }
        if variable_particle_name(&upper).is_some() {
            return Ok(Particle::Variable { code: upper });
        }
        if let Some(code) = upper.strip_prefix('X') {
            if elementary_za(code).is_some() {
                return Ok(Particle::Elementary {
                    code: code.to_string(),
                    multiplicity: Multiplicity::Variable,
                });
            }
        }
        if Dictionaries::global()
            .get(DictionaryKind::Particles)
            .contains(&upper)
        {
            return Ok(Particle::Variable { code: upper });
        }
        Err(ParticleError::parsing(text, "unknown particle code"))
    }

    /// Atomic number, or [`VARIABLE`]
    pub fn z(&self) -> i32 {
        match self {
            Particle::Elementary { code, multiplicity } => match (multiplicity, elementary_za(code)) {
                (Multiplicity::Count(n), Some((z, _))) => *n as i32 * z,
                _ => VARIABLE,
            },
            Particle::Nucleus(nucleus) => nucleus.z,
            Particle::Natural { z, .. } | Particle::Compound { z, .. } => *z,
            Particle::Variable { .. } => VARIABLE,
        }
    }

    /// Mass number, or [`VARIABLE`]
    pub fn a(&self) -> i32 {
        match self {
            Particle::Elementary { code, multiplicity } => match (multiplicity, elementary_za(code)) {
                (Multiplicity::Count(n), Some((_, a))) => *n as i32 * a,
                _ => VARIABLE,
            },
            Particle::Nucleus(nucleus) => nucleus.a,
            Particle::Natural { .. } | Particle::Compound { .. } | Particle::Variable { .. } => {
                VARIABLE
            }
        }
    }

    /// Whether Z and A are both known
    pub fn has_definite_za(&self) -> bool {
        self.z() != VARIABLE && self.a() != VARIABLE
    }

    /// EXFOR style: `94-PU-240`, `2N`, `19-K-CMP`
    pub fn exfor_style(&self) -> String {
        match self {
            Particle::Elementary { code, multiplicity } => match multiplicity {
                Multiplicity::Count(n) if *n > 1 => format!("{n}{code}"),
                Multiplicity::Count(_) => code.clone(),
                Multiplicity::Variable => format!("X{code}"),
            },
            Particle::Nucleus(nucleus) => nucleus.exfor_style(),
            Particle::Natural { z, symbol } => format!("{z}-{}-0", symbol.to_uppercase()),
            Particle::Compound { code, .. } | Particle::Variable { code } => code.clone(),
        }
    }

    /// Pretty style: `240Pu`, `2n`, `alpha`, `natFe`, `Potassium compound`
    pub fn pretty_style(&self) -> String {
        match self {
            Particle::Elementary { code, multiplicity } => {
                let prefix = match multiplicity {
                    Multiplicity::Count(n) if *n > 1 => n.to_string(),
                    Multiplicity::Count(_) => String::new(),
                    Multiplicity::Variable => "X".to_string(),
                };
                format!("{prefix}{}", elementary_pretty(code))
            }
            Particle::Nucleus(nucleus) => nucleus.pretty_style(),
            Particle::Natural { symbol, .. } => format!("nat{symbol}"),
            Particle::Compound { code, .. } => Dictionaries::global()
                .lookup(DictionaryKind::Compounds, code)
                .map(str::to_string)
                .unwrap_or_else(|| code.clone()),
            Particle::Variable { code } => variable_particle_name(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.clone()),
        }
    }

    /// ENDL ZA style, only defined for nuclei and natural elements
    pub fn endl_style(&self) -> Result<String, ParticleError> {
        match self {
            Particle::Nucleus(nucleus) => Ok(nucleus.endl_style()),
            Particle::Natural { z, .. } => Ok(format!("za{z:03}000")),
            Particle::Compound { code, .. } => Err(ParticleError::Unsupported(format!(
                "ENDL has no chemical compounds ({code})"
            ))),
            other => Err(ParticleError::Unsupported(format!(
                "ENDL has no ZA for {}",
                other.exfor_style()
            ))),
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty_style())
    }
}

fn elementary_pretty(code: &str) -> String {
    if let Some(name) = hadron_name(code) {
        return name.to_string();
    }
    match code {
        "A" => "alpha".to_string(),
        "G" => "gamma".to_string(),
        "0" => "None".to_string(),
        "B" => "beta".to_string(),
        single if single.chars().count() == 1 => single.to_lowercase(),
        multi => capitalize(multi),
    }
}

/// `Z-SYM-A[-isomers]`, `Z-SYM-0` and `Z-SYM-CMP` forms
fn parse_nuclear(token: &str, upper: &str) -> Result<Particle, ParticleError> {
    let mut parts = upper.splitn(3, '-');
    let z_text = parts.next().unwrap_or_default();
    let symbol = parts.next().unwrap_or_default();
    let rest = parts
        .next()
        .ok_or_else(|| ParticleError::parsing(token, "expected Z-SYM-A"))?;

    let z: i32 = z_text
        .parse()
        .map_err(|e| ParticleError::parsing(token, format!("bad Z: {e}")))?;
    if symbol.is_empty() || symbol.len() > 2 || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ParticleError::parsing(token, "bad element symbol"));
    }

    let mass_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let (mass, suffix) = rest.split_at(mass_len);
    if mass.is_empty() {
        return Err(ParticleError::parsing(token, "missing mass number"));
    }

    if !mass.chars().all(|c| c.is_ascii_digit()) {
        let code = format!("{z}-{symbol}-{mass}");
        let known_suffix = COMPOUND_SUFFIXES.iter().any(|(s, _)| *s == mass);
        let in_dictionary = Dictionaries::global()
            .get(DictionaryKind::Compounds)
            .contains(&code);
        if (known_suffix || in_dictionary) && suffix.trim_end_matches('-').is_empty() {
            return Ok(Particle::Compound { z, code });
        }
        return Err(ParticleError::parsing(token, "bad mass number"));
    }

    let a: i32 = mass
        .parse()
        .map_err(|e| ParticleError::parsing(token, format!("bad A: {e}")))?;
    let terms = parse_isomer_terms(suffix, token)?;
    if is_isomer_math(&terms) {
        return Err(ParticleError::IsomerMath(token.to_string()));
    }
    let symbol = capitalize(symbol);
    if a == 0 && terms.is_empty() {
        return Ok(Particle::Natural { z, symbol });
    }
    Ok(Particle::Nucleus(Nucleus {
        z,
        symbol,
        a,
        isomers: terms.into_iter().map(|term| term.tag).collect(),
    }))
}
