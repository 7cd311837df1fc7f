//! Error types for shield simulation.

use thiserror::Error;

/// Errors raised while configuring or running a shielding simulation.
///
/// Every error is reported before any photon history runs, so a failed call
/// never produces a partial result.
#[derive(Error, Debug)]
pub enum ShieldError {
    /// `simulate` was called with no layers in the shield
    #[error("no shield layers defined: add at least one layer before simulating")]
    EmptyShield,

    /// A run parameter is outside its domain
    #[error("invalid parameter `{name}`: {value} (must be positive and finite)")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A stored layer violates its physical invariants
    #[error("invalid layer {index} ({name}): {reason}")]
    InvalidLayer {
        /// Position of the layer in the shield
        index: usize,
        /// Layer name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Experiment file could not be parsed
    #[error("invalid experiment configuration: {0}")]
    Config(String),

    /// Experiment file could not be read
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ShieldError>;

/// Reject non-positive or non-finite values
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShieldError::InvalidParameter { name, value })
    }
}
