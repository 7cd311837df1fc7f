//! # SHIELDSIM-RS
//!
//! Monte Carlo Gamma-Ray Shielding Simulator
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          SHIELDSIM-RS                                       │
//! │              Photon Transport Through Layered Shields                       │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  SHIELD:     ordered material layers (t, μ_total, μ_compton, μ_pe, ρ)       │
//! │  TRANSPORT:  analog random walk (free path, Compton / photoelectric)        │
//! │  TALLY:      transmitted / absorbed dose, buildup, standard error           │
//! │  ANALYSIS:   Beer-Lambert comparison, history-count planning                │
//! │  SIMULATOR:  shield + seeded engine, RON experiment files                   │
//! │  OPTIMIZER:  grid search for the lightest shield under a dose limit         │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use shieldsim_rs::MonteCarloSimulator;
//!
//! let mut sim = MonteCarloSimulator::new(Some(42));
//! sim.add_layer("Lead", 5.0, 0.77, 0.58, 0.19, 11.34);
//! let result = sim.run(1.0, 100_000, 1.0)?;
//! println!("T = {:.4}, B = {:.2}", result.transmission_factor, result.buildup_factor);
//! # Ok::<(), shieldsim_rs::ShieldError>(())
//! ```
//!
//! ## Determinism
//!
//! A run is fully determined by the seed, the shield, and the source. Two
//! simulators built with the same seed give bit-identical results.

pub mod constants;
pub mod error;
pub mod stochastic;
pub mod shield;
pub mod tally;
pub mod transport;
pub mod analysis;
pub mod simulator;
pub mod config;
pub mod optimizer;

// Re-exports
pub use constants::ELECTRON_REST_MASS_MEV;
pub use error::{Result, ShieldError};
pub use shield::{MaterialLayer, ShieldConfiguration};
pub use tally::{SimulationResult, TransportStats};
pub use transport::{Photon, PhotonFate, PhotonTransport};
pub use analysis::{compare_with_analytical, estimate_required_photons, AnalyticalComparison};
pub use simulator::{MonteCarloSimulator, SimulationParams};
pub use config::ExperimentConfig;
pub use optimizer::{grid_search, parse_range, GridSearchConfig, ShieldCandidate};

/// SHIELDSIM version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Information about the simulator
pub fn info() -> String {
    format!(
        "SHIELDSIM-RS v{}\n\
         Monte Carlo Gamma-Ray Shielding Simulator\n\
         Analog photon transport: Compton scattering + photoelectric absorption",
        VERSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        let info = info();
        assert!(info.contains("SHIELDSIM"));
        assert!(info.contains(VERSION));
    }

    #[test]
    fn test_electron_rest_mass_exposed() {
        assert_eq!(ELECTRON_REST_MASS_MEV, 0.511);
    }
}
