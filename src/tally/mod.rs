//! # Tally Module
//!
//! Accumulation of photon-history outcomes into dose estimates.
//!
//! ## Estimators
//!
//! For N histories of which n_t are transmitted with contributions dᵢ = Eᵢ·wᵢ:
//!
//! ```text
//! D_trans = Σ dᵢ / N
//! D_abs   = Σ (E·w at photoelectric capture) / N
//! T       = n_t / N
//! B       = T / exp(−t_total · μ₀)        μ₀: first layer
//! σ       = sqrt( Var(d) / n_t )          Var: population variance over transmitted dᵢ
//! ```
//!
//! B falls back to 1 when the denominator is ≤ 1e-10.

use std::fmt;

use crate::constants::BUILDUP_DENOMINATOR_FLOOR;

// ============================================================================
// TRANSPORT STATISTICS
// ============================================================================

/// Diagnostic counters for one `simulate` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportStats {
    pub histories: u64,
    pub compton_scatters: u64,
    pub photoelectric_absorptions: u64,
    pub energy_cutoffs: u64,
    pub boundary_crossings: u64,
    pub transmissions: u64,
    /// E·w of photons dropped at the energy cutoff (MeV, summed, not normalized)
    ///
    /// This energy appears in neither dose estimate.
    pub discarded_energy: f64,
}

// ============================================================================
// SIMULATION RESULT
// ============================================================================

/// Population-level result of a shielding simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Mean energy·weight transmitted per source photon (MeV)
    pub dose_transmitted: f64,
    /// Mean energy·weight absorbed by photoelectric capture per source photon (MeV)
    pub dose_absorbed: f64,
    /// Fraction of histories leaving the far face alive
    pub transmission_factor: f64,
    /// Transmission relative to uncollided exponential attenuation
    pub buildup_factor: f64,
    /// Standard error of the transmitted-dose contributions (MeV)
    pub uncertainty: f64,
    pub total_photons: u64,
    pub transmitted_photons: u64,
    /// Per-run diagnostics
    pub stats: TransportStats,
}

impl Default for SimulationResult {
    fn default() -> Self {
        Self {
            dose_transmitted: 0.0,
            dose_absorbed: 0.0,
            transmission_factor: 0.0,
            buildup_factor: 1.0,
            uncertainty: 0.0,
            total_photons: 0,
            transmitted_photons: 0,
            stats: TransportStats::default(),
        }
    }
}

impl SimulationResult {
    /// False when no history was transmitted; dose and buildup are then degenerate
    pub fn has_usable_dose(&self) -> bool {
        self.transmission_factor > 0.0
    }

    /// Uncertainty relative to the mean transmitted contribution
    pub fn relative_uncertainty(&self) -> f64 {
        if self.transmitted_photons == 0 {
            return 0.0;
        }
        let mean =
            self.dose_transmitted * self.total_photons as f64 / self.transmitted_photons as f64;
        if mean.abs() > 1e-30 {
            self.uncertainty / mean
        } else {
            0.0
        }
    }

    /// Print summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Monte Carlo Shielding Summary ===\n");
        s.push_str(&format!("Photons simulated: {}\n", self.total_photons));
        s.push_str(&format!("Photons transmitted: {}\n", self.transmitted_photons));
        s.push_str(&format!("Transmission factor: {:.6}\n", self.transmission_factor));
        s.push_str(&format!("Buildup factor: {:.4}\n", self.buildup_factor));
        s.push_str(&format!(
            "Transmitted dose: {:.4e} MeV/photon ± {:.4e}\n",
            self.dose_transmitted, self.uncertainty
        ));
        s.push_str(&format!("Absorbed dose: {:.4e} MeV/photon\n", self.dose_absorbed));

        s.push_str("\n--- Interactions ---\n");
        s.push_str(&format!("Compton scatters: {}\n", self.stats.compton_scatters));
        s.push_str(&format!(
            "Photoelectric absorptions: {}\n",
            self.stats.photoelectric_absorptions
        ));
        s.push_str(&format!("Energy cutoffs: {}\n", self.stats.energy_cutoffs));
        s.push_str(&format!("Boundary crossings: {}\n", self.stats.boundary_crossings));
        s.push_str(&format!("Discarded energy: {:.4e} MeV\n", self.stats.discarded_energy));

        if !self.has_usable_dose() {
            s.push_str("\nWARNING: no photons transmitted, dose estimate unusable\n");
        }

        s
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimulationResult(transmission={:.6}, buildup_factor={:.4}, \
             transmitted_photons={}/{})",
            self.transmission_factor,
            self.buildup_factor,
            self.transmitted_photons,
            self.total_photons
        )
    }
}

// ============================================================================
// DOSE TALLY
// ============================================================================

/// Running accumulator for one `simulate` call
///
/// Transmitted contributions feed a Welford update so the variance stays
/// accurate when the spread is small next to the mean.
#[derive(Debug, Clone, Default)]
pub struct DoseTally {
    /// Σ E·w over transmitted histories
    transmitted_sum: f64,
    /// Running mean of transmitted E·w
    transmitted_mean: f64,
    /// Σ (E·w − mean)² over transmitted histories
    transmitted_m2: f64,
    transmitted: u64,
    /// Σ photoelectric deposits
    absorbed_sum: f64,
    histories: u64,
}

impl DoseTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a photon leaving the far face
    pub fn score_transmitted(&mut self, contribution: f64) {
        self.transmitted_sum += contribution;
        self.transmitted += 1;

        let delta = contribution - self.transmitted_mean;
        self.transmitted_mean += delta / self.transmitted as f64;
        self.transmitted_m2 += delta * (contribution - self.transmitted_mean);
    }

    /// Score energy deposited inside the shield
    pub fn score_absorbed(&mut self, deposit: f64) {
        self.absorbed_sum += deposit;
    }

    /// End history
    pub fn end_history(&mut self) {
        self.histories += 1;
    }

    /// Standard error of the mean transmitted contribution
    pub fn standard_error(&self) -> f64 {
        if self.transmitted == 0 {
            return 0.0;
        }
        let n = self.transmitted as f64;
        let variance = (self.transmitted_m2 / n).max(0.0);
        (variance / n).sqrt()
    }

    /// Build the result record
    ///
    /// `uncollided_transmission` is the reference exp(−t·μ) used for the
    /// buildup factor.
    pub fn finish(self, uncollided_transmission: f64, stats: TransportStats) -> SimulationResult {
        let mut result = SimulationResult {
            total_photons: self.histories,
            transmitted_photons: self.transmitted,
            stats,
            ..SimulationResult::default()
        };

        if self.histories == 0 {
            return result;
        }

        let n = self.histories as f64;
        result.dose_transmitted = self.transmitted_sum / n;
        result.dose_absorbed = self.absorbed_sum / n;
        result.transmission_factor = self.transmitted as f64 / n;

        if uncollided_transmission > BUILDUP_DENOMINATOR_FLOOR {
            result.buildup_factor = result.transmission_factor / uncollided_transmission;
        }

        result.uncertainty = self.standard_error();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally() {
        let result = DoseTally::new().finish(0.5, TransportStats::default());
        assert_eq!(result.total_photons, 0);
        assert_eq!(result.transmission_factor, 0.0);
        assert_eq!(result.buildup_factor, 1.0);
        assert_eq!(result.uncertainty, 0.0);
    }

    #[test]
    fn test_tally_means() {
        let mut tally = DoseTally::new();

        tally.score_transmitted(1.0);
        tally.end_history();
        tally.score_transmitted(0.5);
        tally.end_history();
        tally.score_absorbed(0.8);
        tally.end_history();
        tally.end_history();

        let result = tally.finish(0.5, TransportStats::default());
        assert_eq!(result.total_photons, 4);
        assert_eq!(result.transmitted_photons, 2);
        assert!((result.dose_transmitted - 1.5 / 4.0).abs() < 1e-12);
        assert!((result.dose_absorbed - 0.2).abs() < 1e-12);
        assert!((result.transmission_factor - 0.5).abs() < 1e-12);
        assert!((result.buildup_factor - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standard_error() {
        let mut tally = DoseTally::new();
        for d in [1.0, 0.5] {
            tally.score_transmitted(d);
            tally.end_history();
        }
        // mean 0.75, population variance 0.0625, σ = sqrt(0.0625 / 2)
        assert!((tally.standard_error() - (0.0625f64 / 2.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_standard_error_with_large_offset() {
        // Spread of 0, 1, 2 on top of 1e9: population variance 2/3
        let mut tally = DoseTally::new();
        for i in 0..3000 {
            tally.score_transmitted(1e9 + (i % 3) as f64);
            tally.end_history();
        }
        let expected = (2.0 / 3.0 / 3000.0f64).sqrt();
        let got = tally.standard_error();
        assert!(((got - expected) / expected).abs() < 1e-4, "got {got}, expected {expected}");
    }

    #[test]
    fn test_identical_contributions_have_zero_error() {
        let mut tally = DoseTally::new();
        for _ in 0..1000 {
            tally.score_transmitted(1.0);
            tally.end_history();
        }
        assert_eq!(tally.standard_error(), 0.0);
    }

    #[test]
    fn test_buildup_floor() {
        let mut tally = DoseTally::new();
        tally.score_transmitted(1.0);
        tally.end_history();

        let result = tally.finish(1e-12, TransportStats::default());
        assert_eq!(result.buildup_factor, 1.0);

        let result = DoseTally::new().finish(0.0, TransportStats::default());
        assert!(result.buildup_factor.is_finite());
    }

    #[test]
    fn test_relative_uncertainty() {
        let mut tally = DoseTally::new();
        for d in [1.0, 0.5] {
            tally.score_transmitted(d);
            tally.end_history();
        }
        tally.end_history();
        let result = tally.finish(0.5, TransportStats::default());
        let expected = result.uncertainty / 0.75;
        assert!((result.relative_uncertainty() - expected).abs() < 1e-12);
        assert!(result.has_usable_dose());
    }

    #[test]
    fn test_summary_and_display() {
        let mut tally = DoseTally::new();
        tally.end_history();
        let result = tally.finish(0.5, TransportStats::default());
        assert!(!result.has_usable_dose());

        let summary = result.summary();
        assert!(summary.contains("Photons simulated: 1"));
        assert!(summary.contains("WARNING"));

        assert!(result.to_string().contains("transmitted_photons=0/1"));
    }
}
