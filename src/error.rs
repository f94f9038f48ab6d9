use thiserror::Error;

/// Domain errors raised by the statistics, sorting and diffusion routines.
///
/// CLI and orchestration layers wrap these in `anyhow` with context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabError {
    #[error("division by zero")]
    DivideByZero,

    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("unsupported particle dimensionality: {0} (expected 2 or 3)")]
    InvalidDimensions(usize),

    #[error("particle set must contain at least one particle")]
    EmptyParticleSet,

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{base}^{exp} overflows u64")]
    Overflow { base: u64, exp: u64 },
}

pub type LabResult<T> = Result<T, LabError>;
