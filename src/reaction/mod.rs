//! # Reaction Module
//!
//! The EXFOR reaction grammar. A REACTION entry is either a single reaction
//!
//! ```text
//! (94-PU-239(N,F),,SIG)
//! ```
//!
//! or an algebraic combination of them, with explicit grouping:
//!
//! ```text
//! ((79-AU-197(N,2N)79-AU-196-M2,,SIG)/(79-AU-197(N,2N)79-AU-196-G+M1,,SIG))
//! ```
//!
//! Each reaction is a [`Process`] (target, projectile, products and residual)
//! followed by quantity codes. Residuals left out of the text are inferred from
//! Z/A conservation. A residual written with isomer arithmetic (`-G+M1`,
//! `-M/G`) is expanded into one reaction per isomer state, joined by the same
//! operators.
//!
//! Everything renders both ways: [`Measurement::exfor_style`] gives canonical
//! EXFOR text and `Display` gives a readable sentence such as
//! `Cross section for 239Pu(n,Fission)`.

mod combination;
mod error;
mod measurement;
mod process;

#[cfg(test)]
mod tests;

pub use combination::{parse_measurement, Operator, ReactionExpr};
pub use error::ReactionError;
pub use measurement::{IsomerCombination, Measurement, Reaction};
pub use process::{channel_name, Process, Product, REACTION_CHANNELS};
