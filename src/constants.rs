//! # Physical Constants
//!
//! Physical constants and transport-model parameters for gamma-ray shielding.
//! Energies in MeV, lengths in cm.

// ============================================================================
// FUNDAMENTAL CONSTANTS
// ============================================================================

/// Electron rest-mass energy m_e·c² (MeV)
///
/// Sets the scale of the Compton energy shift:
/// E' = E / (1 + (E / m_e c²)(1 − cos θ))
pub const ELECTRON_REST_MASS_MEV: f64 = 0.511;

/// Conversion: 1 m² to cm²
pub const M2_TO_CM2: f64 = 1.0e4;

/// Conversion: 1 g to kg
pub const G_TO_KG: f64 = 1.0e-3;

// ============================================================================
// TRANSPORT MODEL PARAMETERS
// ============================================================================

/// Photons below this energy are no longer tracked (MeV)
pub const ENERGY_CUTOFF_MEV: f64 = 0.01;

/// Weight multiplier applied at every Compton scatter.
///
/// Approximate scattering efficiency; not derived from Klein–Nishina.
pub const COMPTON_WEIGHT_FACTOR: f64 = 0.95;

/// Uncollided transmission at or below this value leaves the buildup factor at 1.0
pub const BUILDUP_DENOMINATOR_FLOOR: f64 = 1e-10;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 42;

// ============================================================================
// RUN PLANNING
// ============================================================================

/// Lower bound on the recommended history count
pub const MIN_RECOMMENDED_PHOTONS: u64 = 10_000;

/// Safety margin applied to the 1/√N estimate of required histories
pub const PHOTON_ESTIMATE_MARGIN: f64 = 1.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_below_rest_mass() {
        assert!(ENERGY_CUTOFF_MEV < ELECTRON_REST_MASS_MEV);
    }

    #[test]
    fn test_weight_factor_is_reduction() {
        assert!(COMPTON_WEIGHT_FACTOR > 0.0 && COMPTON_WEIGHT_FACTOR < 1.0);
    }
}
