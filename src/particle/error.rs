/// Errors raised while parsing particle, nucleus and compound tokens
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParticleError {
    /// Token is not a particle, nucleus or compound
    #[error("Can not parse particle \"{text}\": {message}")]
    ParticleParsing {
        /// Offending token
        text: String,
        /// What the grammar expected
        message: String,
    },

    /// Nucleus carries arithmetic over several isomer states
    #[error("Math with multiple isomer states in \"{0}\"")]
    IsomerMath(String),

    /// Render style has no form for this particle
    #[error("Unsupported rendering: {0}")]
    Unsupported(String),
}

impl ParticleError {
    pub(crate) fn parsing(text: &str, message: impl Into<String>) -> Self {
        ParticleError::ParticleParsing {
            text: text.to_string(),
            message: message.into(),
        }
    }
}
