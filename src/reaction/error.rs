use crate::particle::ParticleError;

/// Errors raised by the reaction grammar
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReactionError {
    /// Malformed reaction text
    #[error("Can not parse reaction \"{text}\" at position {position}: {message}")]
    ReactionParsing {
        /// Offending text
        text: String,
        /// Character offset of the failure inside `text`
        position: usize,
        /// What the grammar expected
        message: String,
    },

    /// Residual written with arithmetic over isomer states
    #[error("Reaction {0} looks like it contains isomer math")]
    IsomerMath(String),

    /// Z/A conservation gave no usable residual
    #[error("Cannot compute residual, Delta Z = {delta_z}, Delta A = {delta_a}, for reaction {text}")]
    ResidualNucleus {
        /// Z balance left for the residual
        delta_z: i32,
        /// A balance left for the residual
        delta_a: i32,
        /// Process text
        text: String,
    },

    /// Particle token error
    #[error("Particle error in reaction \"{text}\": {source}")]
    Particle {
        /// Reaction text the token came from
        text: String,
        /// Underlying particle error
        source: ParticleError,
    },
}

impl ReactionError {
    pub(crate) fn parsing(text: &str, position: usize, message: impl Into<String>) -> Self {
        ReactionError::ReactionParsing {
            text: text.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn particle(text: &str, source: ParticleError) -> Self {
        match source {
            ParticleError::IsomerMath(_) => ReactionError::IsomerMath(text.to_string()),
            source => ReactionError::Particle {
                text: text.to_string(),
                source,
            },
        }
    }
}
