//! # Simulator Module
//!
//! Entry point pairing a shield configuration with a transport engine.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SEED;
use crate::error::Result;
use crate::shield::{MaterialLayer, ShieldConfiguration};
use crate::tally::SimulationResult;
use crate::transport::PhotonTransport;

/// Source and run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Source photon energy (MeV)
    pub source_energy_mev: f64,
    /// Number of photon histories
    pub num_photons: u64,
    /// Source area (cm²); accepted but not used by the physics
    pub source_area_cm2: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            source_energy_mev: 1.0,
            num_photons: 100_000,
            source_area_cm2: 1.0,
            seed: DEFAULT_SEED,
        }
    }
}

/// Monte Carlo shielding simulator
///
/// Layers are added source side first. Each call to [`run`](Self::run)
/// continues the engine's random sequence.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator {
    shield: ShieldConfiguration,
    transport: PhotonTransport,
}

impl MonteCarloSimulator {
    /// Create simulator; `None` uses the default seed
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            shield: ShieldConfiguration::new(),
            transport: PhotonTransport::with_seed(seed),
        }
    }

    /// Create simulator around an existing shield
    pub fn with_shield(shield: ShieldConfiguration, seed: u64) -> Self {
        Self {
            shield,
            transport: PhotonTransport::new(seed),
        }
    }

    /// Add a material layer on the detector side
    pub fn add_layer(
        &mut self,
        name: &str,
        thickness_cm: f64,
        mu_total: f64,
        mu_compton: f64,
        mu_photoelectric: f64,
        density_g_cm3: f64,
    ) {
        self.shield
            .add_layer(name, thickness_cm, mu_total, mu_compton, mu_photoelectric, density_g_cm3);
    }

    /// Add several layers in order
    pub fn add_layers<I: IntoIterator<Item = MaterialLayer>>(&mut self, layers: I) {
        self.shield.extend(layers);
    }

    pub fn clear_layers(&mut self) {
        self.shield.clear_layers();
    }

    pub fn layer_count(&self) -> usize {
        self.shield.layer_count()
    }

    pub fn shield(&self) -> &ShieldConfiguration {
        &self.shield
    }

    /// Current layers, in transport order
    pub fn shield_info(&self) -> &[MaterialLayer] {
        self.shield.layers()
    }

    /// Total shield thickness (cm)
    pub fn total_thickness(&self) -> f64 {
        self.shield.total_thickness()
    }

    pub fn seed(&self) -> u64 {
        self.transport.seed()
    }

    /// Run the Monte Carlo simulation
    pub fn run(
        &mut self,
        source_energy: f64,
        num_photons: u64,
        source_area_cm2: f64,
    ) -> Result<SimulationResult> {
        self.transport
            .simulate(&self.shield, source_energy, num_photons, source_area_cm2)
    }

    /// Run with the source described by `params` (its seed is not re-applied)
    pub fn run_with(&mut self, params: &SimulationParams) -> Result<SimulationResult> {
        self.run(params.source_energy_mev, params.num_photons, params.source_area_cm2)
    }
}

impl Default for MonteCarloSimulator {
    fn default() -> Self {
        Self::new(None)
    }
}
