//! # Analysis Module
//!
//! Analytical reference values and run planning.
//!
//! ## Beer–Lambert
//!
//! Narrow-beam (uncollided) transmission through a stack of layers:
//!
//! ```text
//! T₀ = exp(−Σ μᵢ tᵢ)
//! ```
//!
//! The ratio of the Monte Carlo transmission to T₀ measures how much
//! scattered radiation reaches the far face.
//!
//! ## Photon Count
//!
//! The relative error of a transmission estimate scales as 1/√(N·T), so
//! reaching a relative error u needs roughly N ≈ 1 / (u²·T) histories.

use crate::constants::{MIN_RECOMMENDED_PHOTONS, PHOTON_ESTIMATE_MARGIN};
use crate::error::{require_positive, Result};
use crate::shield::ShieldConfiguration;
use crate::simulator::MonteCarloSimulator;
use crate::tally::SimulationResult;

/// Narrow-beam transmission exp(−Σ μᵢ tᵢ)
pub fn analytical_transmission(shield: &ShieldConfiguration) -> f64 {
    (-shield.optical_thickness()).exp()
}

/// Monte Carlo run set against the Beer–Lambert prediction
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticalComparison {
    pub monte_carlo: SimulationResult,
    /// exp(−Σ μᵢ tᵢ)
    pub analytical_transmission: f64,
    /// MC transmission / analytical transmission (+∞ if the latter is 0)
    pub buildup_factor: f64,
    /// (MC − analytical) / analytical × 100 (+∞ if analytical is 0)
    pub difference_percent: f64,
    pub mc_transmission: f64,
    pub mc_uncertainty: f64,
}

impl AnalyticalComparison {
    /// Build a comparison from an existing result
    pub fn new(monte_carlo: SimulationResult, analytical_transmission: f64) -> Self {
        let mc_transmission = monte_carlo.transmission_factor;
        let (buildup_factor, difference_percent) = if analytical_transmission > 0.0 {
            (
                mc_transmission / analytical_transmission,
                (mc_transmission - analytical_transmission) / analytical_transmission * 100.0,
            )
        } else {
            (f64::INFINITY, f64::INFINITY)
        };

        Self {
            mc_uncertainty: monte_carlo.uncertainty,
            monte_carlo,
            analytical_transmission,
            buildup_factor,
            difference_percent,
            mc_transmission,
        }
    }

    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Monte Carlo vs Beer-Lambert ===\n");
        s.push_str(&format!("MC transmission: {:.6}\n", self.mc_transmission));
        s.push_str(&format!("Analytical transmission: {:.6}\n", self.analytical_transmission));
        s.push_str(&format!("Buildup factor: {:.4}\n", self.buildup_factor));
        s.push_str(&format!("Difference: {:+.2}%\n", self.difference_percent));
        s.push_str(&format!("MC uncertainty: {:.4e}\n", self.mc_uncertainty));
        s
    }
}

/// Run the simulator and compare with Beer–Lambert attenuation
pub fn compare_with_analytical(
    simulator: &mut MonteCarloSimulator,
    source_energy: f64,
    num_photons: u64,
) -> Result<AnalyticalComparison> {
    let monte_carlo = simulator.run(source_energy, num_photons, 1.0)?;
    let analytical = analytical_transmission(simulator.shield());

    let comparison = AnalyticalComparison::new(monte_carlo, analytical);
    log::debug!(
        "analytical T = {:.6}, MC T = {:.6}, ratio = {:.4}",
        comparison.analytical_transmission,
        comparison.mc_transmission,
        comparison.buildup_factor
    );
    Ok(comparison)
}

/// Recommended history count for a target relative uncertainty
///
/// N = max(10 000, ⌊1.5 / (u²·T)⌋)
pub fn estimate_required_photons(
    desired_uncertainty: f64,
    expected_transmission: f64,
) -> Result<u64> {
    let u = require_positive("desired_uncertainty", desired_uncertainty)?;
    let t = require_positive("expected_transmission", expected_transmission)?;

    let n_total = (PHOTON_ESTIMATE_MARGIN / (u * u * t)).floor();
    // Saturating float → int conversion
    Ok((n_total as u64).max(MIN_RECOMMENDED_PHOTONS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytical_transmission() {
        let mut shield = ShieldConfiguration::new();
        shield.add_layer("Lead", 2.0, 0.77, 0.58, 0.19, 11.34);
        shield.add_layer("Steel", 1.0, 0.47, 0.35, 0.12, 7.85);
        let expected = (-(2.0 * 0.77 + 0.47f64)).exp();
        assert!((analytical_transmission(&shield) - expected).abs() < 1e-12);

        assert_eq!(analytical_transmission(&ShieldConfiguration::new()), 1.0);
    }

    #[test]
    fn test_comparison_fields() {
        let result = SimulationResult {
            transmission_factor: 0.3,
            uncertainty: 0.01,
            ..SimulationResult::default()
        };
        let cmp = AnalyticalComparison::new(result, 0.2);
        assert!((cmp.buildup_factor - 1.5).abs() < 1e-12);
        assert!((cmp.difference_percent - 50.0).abs() < 1e-9);
        assert_eq!(cmp.mc_transmission, 0.3);
        assert_eq!(cmp.mc_uncertainty, 0.01);
        assert!(cmp.summary().contains("+50.00%"));
    }

    #[test]
    fn test_comparison_zero_analytical() {
        let cmp = AnalyticalComparison::new(SimulationResult::default(), 0.0);
        assert!(cmp.buildup_factor.is_infinite());
        assert!(cmp.difference_percent.is_infinite());
    }

    #[test]
    fn test_compare_with_analytical() {
        let mut sim = MonteCarloSimulator::new(Some(42));
        sim.add_layer("Lead", 2.0, 0.77, 0.58, 0.19, 11.34);

        let cmp = compare_with_analytical(&mut sim, 1.0, 50_000).unwrap();
        assert!(cmp.mc_transmission >= cmp.analytical_transmission);
        assert!(cmp.buildup_factor >= 1.0);
        assert_eq!(cmp.monte_carlo.total_photons, 50_000);
    }

    #[test]
    fn test_compare_empty_shield() {
        let mut sim = MonteCarloSimulator::new(None);
        assert!(compare_with_analytical(&mut sim, 1.0, 1000).is_err());
    }

    #[test]
    fn test_estimate_required_photons() {
        let n = estimate_required_photons(0.01, 0.1).unwrap();
        assert_eq!(n, 150_000);

        // Floor applies for loose targets
        assert_eq!(estimate_required_photons(0.5, 0.9).unwrap(), MIN_RECOMMENDED_PHOTONS);
    }

    #[test]
    fn test_estimate_low_transmission_needs_more() {
        let n_low_t = estimate_required_photons(0.01, 0.01).unwrap();
        let n_high_t = estimate_required_photons(0.01, 0.5).unwrap();
        assert!(n_low_t > n_high_t);
    }

    #[test]
    fn test_estimate_rejects_bad_input() {
        assert!(estimate_required_photons(0.0, 0.1).is_err());
        assert!(estimate_required_photons(0.01, -0.1).is_err());
    }
}
