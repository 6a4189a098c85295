use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ModelError {
    #[error("Invalid monomer label '{0}'. Only 'H' and 'P' are allowed")]
    InvalidLabel(char),

    #[error("Sequence length mismatch: expected {expected} labels, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Chain length {length} is too short; at least {min} monomers are required for pivot moves")]
    ChainTooShort { length: usize, min: usize },

    #[error("Supplied coordinates are not a valid self-avoiding walk: {0}")]
    InvalidConformation(String),

    #[error("Invalid probability for '{name}': {value}. Must lie within [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Population size {0} must be a positive even integer")]
    InvalidPopulationSize(usize),
}
