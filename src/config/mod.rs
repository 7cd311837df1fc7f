//! Experiment description files (RON).
//!
//! ```ron
//! (
//!     params: (source_energy_mev: 1.0, num_photons: 100000, seed: 42),
//!     layers: [
//!         (name: "Lead", thickness_cm: 5.0, mu_total: 0.77, mu_compton: 0.58,
//!          mu_photoelectric: 0.19, density_g_cm3: 11.34),
//!     ],
//! )
//! ```
//!
//! Omitted `params` fields take their [`SimulationParams::default`] values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, Result, ShieldError};
use crate::shield::{MaterialLayer, ShieldConfiguration};
use crate::simulator::{MonteCarloSimulator, SimulationParams};

/// A complete shielding experiment: source parameters plus layer stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default)]
    pub params: SimulationParams,
    pub layers: Vec<MaterialLayer>,
}

impl ExperimentConfig {
    /// Parse and validate an experiment from RON text
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| ShieldError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate an experiment file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading experiment from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Serialize back to pretty RON
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ShieldError::Config(e.to_string()))
    }

    /// Check source parameters and every layer
    pub fn validate(&self) -> Result<()> {
        require_positive("source_energy_mev", self.params.source_energy_mev)?;
        if self.params.num_photons == 0 {
            return Err(ShieldError::InvalidParameter {
                name: "num_photons",
                value: 0.0,
            });
        }
        require_positive("source_area_cm2", self.params.source_area_cm2)?;
        self.shield().validate()
    }

    pub fn shield(&self) -> ShieldConfiguration {
        self.layers.iter().cloned().collect()
    }

    /// Simulator seeded from `params.seed`
    pub fn simulator(&self) -> MonteCarloSimulator {
        MonteCarloSimulator::with_shield(self.shield(), self.params.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_SEED;

    const LEAD_STEEL: &str = include_str!("../../demos/lead_steel.ron");

    #[test]
    fn test_parse_demo() {
        let config = ExperimentConfig::from_ron_str(LEAD_STEEL).unwrap();
        assert_eq!(config.layers.len(), 2);
        assert_eq!(config.layers[0].name, "Lead");
        assert_eq!(config.params.seed, 42);

        let sim = config.simulator();
        assert_eq!(sim.layer_count(), 2);
        assert_eq!(sim.total_thickness(), 5.0);
    }

    #[test]
    fn test_params_default_when_omitted() {
        let text = r#"(
            layers: [
                (name: "Water", thickness_cm: 10.0, mu_total: 0.07, mu_compton: 0.07,
                 mu_photoelectric: 0.0, density_g_cm3: 1.0),
            ],
        )"#;
        let config = ExperimentConfig::from_ron_str(text).unwrap();
        assert_eq!(config.params, SimulationParams::default());
        assert_eq!(config.params.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_partial_params() {
        let text = r#"(
            params: (num_photons: 500),
            layers: [
                (name: "Water", thickness_cm: 10.0, mu_total: 0.07, mu_compton: 0.07,
                 mu_photoelectric: 0.0, density_g_cm3: 1.0),
            ],
        )"#;
        let config = ExperimentConfig::from_ron_str(text).unwrap();
        assert_eq!(config.params.num_photons, 500);
        assert_eq!(config.params.source_energy_mev, 1.0);
    }

    #[test]
    fn test_empty_layers_rejected() {
        let err = ExperimentConfig::from_ron_str("(layers: [])");
        assert!(matches!(err, Err(ShieldError::EmptyShield)));
    }

    #[test]
    fn test_invalid_layer_rejected() {
        let text = r#"(
            layers: [
                (name: "Bad", thickness_cm: 1.0, mu_total: 0.1, mu_compton: 0.5,
                 mu_photoelectric: 0.0, density_g_cm3: 1.0),
            ],
        )"#;
        assert!(matches!(
            ExperimentConfig::from_ron_str(text),
            Err(ShieldError::InvalidLayer { index: 0, .. })
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let text = r#"(
            params: (source_energy_mev: -2.0),
            layers: [
                (name: "Water", thickness_cm: 10.0, mu_total: 0.07, mu_compton: 0.07,
                 mu_photoelectric: 0.0, density_g_cm3: 1.0),
            ],
        )"#;
        assert!(matches!(
            ExperimentConfig::from_ron_str(text),
            Err(ShieldError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(
            ExperimentConfig::from_ron_str("(layers: [ (name: "),
            Err(ShieldError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ExperimentConfig::load("/nonexistent/shield.ron"),
            Err(ShieldError::Io(_))
        ));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = ExperimentConfig::from_ron_str(LEAD_STEEL).unwrap();
        let text = config.to_ron_string().unwrap();
        assert_eq!(ExperimentConfig::from_ron_str(&text).unwrap(), config);
    }
}
