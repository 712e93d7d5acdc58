use std::fmt;

use log::debug;

use super::ReactionError;
use crate::particle::{elements, Nucleus, Particle, VARIABLE};

/// Catch-all product codes and their names
pub const REACTION_CHANNELS: [(&str, &str); 13] = [
    ("TOT", "Total"),
    ("EL", "Elastic"),
    ("ABS", "Absorption"),
    ("INL", "Inelastic"),
    ("TCC", "TotalChargeChanging"),
    ("FUS", "Fusion"),
    ("NON", "Nonelastic"),
    ("SCT", "Scattering"),
    ("F", "Fission"),
    ("PAI", "PairProduction"),
    ("THS", "ThermalScattering"),
    ("X", "Unspecified"),
    ("0", "None"),
];

/// Channels after which the residual is the target itself
const ELASTIC_LIKE: [&str; 4] = ["EL", "SCT", "THS", "INL"];

/// Name of a catch-all channel code
pub fn channel_name(code: &str) -> Option<&'static str> {
    REACTION_CHANNELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// One entry of a process product list
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    /// Catch-all channel such as `TOT` or `F`
    Channel(String),
    /// Outgoing particle or nucleus
    Particle(Particle),
}

impl Product {
    /// EXFOR spelling
    pub fn exfor_style(&self) -> String {
        match self {
            Product::Channel(code) => code.clone(),
            Product::Particle(p) => p.exfor_style(),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Product::Channel(code) => write!(f, "{}", channel_name(code).unwrap_or(code)),
            Product::Particle(p) => write!(f, "{}", p.pretty_style()),
        }
    }
}

/// Textual pieces of `target(projectile,products)residual`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProcessText {
    pub target: String,
    pub projectile: String,
    pub products: Vec<String>,
    pub residual: Option<String>,
}

impl ProcessText {
    /// Split a process off the front of `text`.
    ///
    /// Returns the pieces and the character offset just past the residual.
    pub fn split(text: &str) -> Result<(Self, usize), ReactionError> {
        let chars: Vec<char> = text.chars().collect();
        let open = chars
            .iter()
            .position(|c| *c == '(')
            .ok_or_else(|| ReactionError::parsing(text, 0, "expected '(' after target"))?;
        let target: String = chars[..open].iter().collect();
        if target.is_empty() {
            return Err(ReactionError::parsing(text, 0, "missing target"));
        }

        let mut depth = 0usize;
        let mut close = None;
        for (i, c) in chars.iter().enumerate().skip(open) {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let close = close.ok_or_else(|| ReactionError::parsing(text, open, "unbalanced parentheses"))?;
        let inner: String = chars[open + 1..close].iter().collect();
        let (projectile, products) = inner.split_once(',').ok_or_else(|| {
            ReactionError::parsing(text, open + 1, "expected ',' between projectile and products")
        })?;
        if projectile.is_empty() {
            return Err(ReactionError::parsing(text, open + 1, "missing projectile"));
        }

        let mut pieces: Vec<String> = Vec::new();
        for piece in products.split('+') {
            match pieces.last_mut() {
                // "B++N" and "(N,B+)" leave empty pieces behind the charge sign
                Some(last) if piece.is_empty() => last.push('+'),
                _ => pieces.push(piece.to_string()),
            }
        }
        if pieces.is_empty() || pieces.iter().any(String::is_empty) {
            return Err(ReactionError::parsing(
                text,
                open + 1 + projectile.chars().count() + 1,
                "missing product",
            ));
        }

        let residual_end = chars[close + 1..]
            .iter()
            .position(|c| *c == ',')
            .map(|p| close + 1 + p)
            .unwrap_or(chars.len());
        let residual: String = chars[close + 1..residual_end].iter().collect();

        Ok((
            Self {
                target,
                projectile: projectile.to_string(),
                products: pieces,
                residual: if residual.is_empty() { None } else { Some(residual) },
            },
            residual_end,
        ))
    }
}

/// `target(projectile,products)residual` with the residual inferred where possible
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    /// Target
    pub target: Particle,
    /// Projectile
    pub projectile: Particle,
    /// Outgoing particles and catch-all channels, without the residual
    pub products: Vec<Product>,
    /// Residual nucleus, if it can be determined
    pub residual: Option<Particle>,
}

impl Process {
    /// Parse a bare process such as `94-PU-240(P,2p+4n)`
    pub fn parse(text: &str) -> Result<Self, ReactionError> {
        let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let (pieces, end) = ProcessText::split(&text)?;
        if end != text.chars().count() {
            return Err(ReactionError::parsing(&text, end, "unexpected text after residual"));
        }
        Self::resolve(&pieces, &text)
    }

    pub(crate) fn resolve(pieces: &ProcessText, text: &str) -> Result<Self, ReactionError> {
        let particle = |token: &str| Particle::parse(token).map_err(|e| ReactionError::particle(text, e));

        let target = particle(&pieces.target)?;
        let projectile = particle(&pieces.projectile)?;
        let mut products = Vec::with_capacity(pieces.products.len() + 1);
        for token in &pieces.products {
            let upper = token.to_uppercase();
            if channel_name(&upper).is_some() {
                products.push(Product::Channel(upper));
            } else {
                products.push(Product::Particle(particle(token)?));
            }
        }
        if let Some(residual) = &pieces.residual {
            products.push(Product::Particle(particle(residual)?));
        }

        let mut process = Self {
            target,
            projectile,
            products,
            residual: None,
        };
        process.infer_residual(text)?;
        Ok(process)
    }

    /// Z/A conservation. The explicit residual, if any, is the last product on entry.
    fn infer_residual(&mut self, text: &str) -> Result<(), ReactionError> {
        if let Some(channel) = self.products.iter().find_map(|p| match p {
            Product::Channel(code) if ELASTIC_LIKE.contains(&code.as_str()) => Some(code.clone()),
            _ => None,
        }) {
            self.products = vec![Product::Channel(channel)];
            self.residual = Some(self.target.clone());
            return Ok(());
        }

        let mut computable = self.target.has_definite_za() && self.projectile.has_definite_za();
        let z_in = self.target.z() + self.projectile.z();
        let a_in = self.target.a() + self.projectile.a();
        let (mut z_out, mut a_out) = (0, 0);
        for product in &self.products {
            match product {
                Product::Particle(p) if p.has_definite_za() && a_in > z_in => {
                    z_out += p.z();
                    a_out += p.a();
                }
                _ => computable = false,
            }
        }

        let balanced = z_in == z_out && a_in == a_out;
        self.residual = if balanced && matches!(self.products.last(), Some(Product::Particle(_))) {
            match self.products.pop() {
                Some(Product::Particle(p)) => Some(p),
                _ => None,
            }
        } else if computable {
            let (dz, da) = (z_in - z_out, a_in - a_out);
            if (dz, da) == (-1, 0) {
                Some(Particle::elementary("E"))
            } else if (dz, da) == (1, 0) {
                Some(Particle::elementary("B+"))
            } else if dz.abs() > 1000 || da.abs() > 1000 || (dz, da) == (0, 0) {
                None
            } else if (0..=elements::MAX_Z).contains(&dz) && da > 0 {
                let nucleus = Nucleus::new(dz, da).map_err(|e| ReactionError::particle(text, e))?;
                debug!("Inferred residual {} for {}", nucleus.pretty_style(), text);
                Some(Particle::Nucleus(nucleus))
            } else {
                return Err(ReactionError::ResidualNucleus {
                    delta_z: dz,
                    delta_a: da,
                    text: text.to_string(),
                });
            }
        } else {
            None
        };

        if let Some(residual) = &self.residual {
            if let Some(pos) = self
                .products
                .iter()
                .position(|p| matches!(p, Product::Particle(q) if q == residual))
            {
                self.products.remove(pos);
            }
        }
        Ok(())
    }

    /// Products joined with `+`, channel codes spelled out: `2p+4n`, `Fission`
    pub fn process_type(&self) -> String {
        self.products
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Whether any product is the catch-all channel `code`
    pub fn has_channel(&self, code: &str) -> bool {
        self.products
            .iter()
            .any(|p| matches!(p, Product::Channel(c) if c == code))
    }

    /// Upper-case EXFOR form: `94-PU-240(P,2P+4N)93-NP-235`
    pub fn exfor_style(&self) -> String {
        let products: Vec<String> = self.products.iter().map(Product::exfor_style).collect();
        let mut out = format!(
            "{}({},{})",
            self.target.exfor_style(),
            self.projectile.exfor_style(),
            products.join("+")
        );
        if let Some(residual) = &self.residual {
            out.push_str(&residual.exfor_style());
        }
        out.to_uppercase()
    }

    /// Z and A sums `(target + projectile, products + residual)`, `None` when any part is variable
    pub fn balance(&self) -> Option<((i32, i32), (i32, i32))> {
        let mut parts: Vec<&Particle> = Vec::new();
        for product in &self.products {
            match product {
                Product::Particle(p) => parts.push(p),
                Product::Channel(_) => return None,
            }
        }
        parts.extend(self.residual.iter());
        let all = [&self.target, &self.projectile].into_iter().chain(parts.iter().copied());
        if all.clone().any(|p| p.z() == VARIABLE || p.a() == VARIABLE) {
            return None;
        }
        let zin = self.target.z() + self.projectile.z();
        let ain = self.target.a() + self.projectile.a();
        let zout = parts.iter().map(|p| p.z()).sum();
        let aout = parts.iter().map(|p| p.a()).sum();
        Some(((zin, ain), (zout, aout)))
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})",
            self.target.pretty_style(),
            self.projectile.pretty_style(),
            self.process_type()
        )?;
        if let Some(residual) = &self.residual {
            write!(f, "{}", residual.pretty_style())?;
        }
        Ok(())
    }
}
