use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Failure modes of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected before any simulation work begins.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The chosen timestep violates the CFL or the diffusive bound.
    #[error("timestep {dt} is unstable (CFL = {cfl}, diffusive limit = {diffusive_limit})")]
    Unstable {
        dt: f64,
        cfl: f64,
        diffusive_limit: f64,
    },

    /// First non-finite value found in the concentration history.
    #[error("non-finite concentration {value} at step {step}, cell ({i}, {j})")]
    NumericalAnomaly {
        step: usize,
        i: usize,
        j: usize,
        value: f64,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

impl SimError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
