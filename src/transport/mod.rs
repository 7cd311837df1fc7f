//! # Photon Transport Module
//!
//! Analog Monte Carlo transport of gamma-ray photons through a layered slab
//! shield.
//!
//! ## Model
//!
//! Only the depth along the shield axis and the axial direction cosine are
//! tracked. Each history is a random walk:
//!
//! ```text
//! s = −ln(ξ₁) / μ_t                       free path
//! d = (z_end − z) / |cos θ|               distance to layer exit
//! s < d:  z += s·cos θ, then
//!         ξ₂ < μ_c/μ_t → Compton scatter  (photon survives)
//!         otherwise    → photoelectric    (E·w deposited, photon dies)
//! s ≥ d:  z = z_end                       (no interaction)
//! ```
//!
//! ## Approximations
//!
//! - Compton polar angle is sampled isotropically (cos θ uniform on [−1, 1]),
//!   not from the Klein–Nishina cross section. The new direction cosine is
//!   cos θ itself rather than a rotation of the incoming direction.
//! - Every Compton scatter multiplies the weight by 0.95.
//! - Photons falling below 0.01 MeV are dropped. Their residual energy is
//!   not credited to the absorbed dose; it is reported separately in
//!   [`TransportStats::discarded_energy`].
//! - Boundary moves always place the photon at the exit face of its layer,
//!   whichever way it travels.
//! - Depths before the entrance face count as the first layer; there is no
//!   backward escape.
//!
//! ## References
//!
//! - Lux & Koblinger, "Monte Carlo Particle Transport Methods"
//! - Hubbell & Seltzer, NIST XCOM photon cross sections

use crate::constants::*;
use crate::error::{require_positive, Result, ShieldError};
use crate::shield::{layer_index, MaterialLayer, ShieldConfiguration};
use crate::stochastic::RandomGenerator;
use crate::tally::{DoseTally, SimulationResult, TransportStats};

// ============================================================================
// PHOTON
// ============================================================================

/// Photon state during one history
#[derive(Debug, Clone, PartialEq)]
pub struct Photon {
    /// Energy (MeV)
    pub energy: f64,
    /// Depth along the shield axis (cm)
    pub position: f64,
    /// Axial direction cosine
    pub direction_cosine: f64,
    /// Statistical weight
    pub weight: f64,
    /// Is photon alive?
    pub alive: bool,
}

impl Photon {
    /// Photon entering the shield face-on at depth 0
    pub fn new(energy: f64) -> Self {
        Self {
            energy,
            position: 0.0,
            direction_cosine: 1.0,
            weight: 1.0,
            alive: true,
        }
    }

    /// Move photon by path length
    pub fn advance(&mut self, distance: f64) {
        self.position += distance * self.direction_cosine;
    }

    /// Energy carried, weighted (MeV)
    pub fn contribution(&self) -> f64 {
        self.energy * self.weight
    }

    /// Isotropic Compton scatter
    ///
    /// Returns the sampled cos θ.
    pub fn compton_scatter(&mut self, rng: &mut RandomGenerator) -> f64 {
        let cos_theta = rng.isotropic_cosine();
        // The axial model ignores the azimuth, but it still consumes a draw
        let _phi = rng.azimuth();

        self.energy = compton_scattered_energy(self.energy, cos_theta);
        self.direction_cosine = cos_theta;
        self.weight *= COMPTON_WEIGHT_FACTOR;

        cos_theta
    }
}

/// Photon energy after Compton scattering through angle θ (MeV)
///
/// E' = E / (1 + α(1 − cos θ)),  α = E / m_e c²
pub fn compton_scattered_energy(energy: f64, cos_theta: f64) -> f64 {
    let alpha = energy / ELECTRON_REST_MASS_MEV;
    energy / (1.0 + alpha * (1.0 - cos_theta))
}

/// Terminal state of a photon history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotonFate {
    /// Left the far face alive
    Transmitted,
    /// Photoelectric capture inside the shield
    Absorbed,
    /// Dropped below the tracking energy
    EnergyCutoff,
}

// ============================================================================
// TRANSPORT ENGINE
// ============================================================================

/// Monte Carlo photon transport engine
///
/// Owns its random source; results depend only on the seed, the inputs, and
/// how many photons this engine has already simulated.
#[derive(Debug, Clone)]
pub struct PhotonTransport {
    rng: RandomGenerator,
}

impl PhotonTransport {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RandomGenerator::new(seed),
        }
    }

    /// Engine with an explicit seed, or the default seed when `None`
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or(DEFAULT_SEED))
    }

    /// Seed the engine was constructed with
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Run `num_photons` histories through `shield`
    ///
    /// `source_area_cm2` is validated but does not enter the physics: all
    /// quantities are per source photon.
    pub fn simulate(
        &mut self,
        shield: &ShieldConfiguration,
        source_energy: f64,
        num_photons: u64,
        source_area_cm2: f64,
    ) -> Result<SimulationResult> {
        if shield.is_empty() {
            return Err(ShieldError::EmptyShield);
        }
        require_positive("source_energy", source_energy)?;
        if num_photons == 0 {
            return Err(ShieldError::InvalidParameter {
                name: "num_photons",
                value: 0.0,
            });
        }
        require_positive("source_area_cm2", source_area_cm2)?;
        shield.validate()?;

        let layers = shield.layers();
        let boundaries = shield.boundaries();
        let total_thickness = boundaries.last().copied().unwrap_or(0.0);

        log::debug!(
            "simulating {} photons at {} MeV through {} layer(s), {} cm total",
            num_photons,
            source_energy,
            layers.len(),
            total_thickness
        );

        let mut tally = DoseTally::new();
        let mut stats = TransportStats::default();

        for _ in 0..num_photons {
            let mut photon = Photon::new(source_energy);

            match self.transport_photon(&mut photon, layers, &boundaries, &mut stats) {
                PhotonFate::Transmitted => {
                    tally.score_transmitted(photon.contribution());
                    stats.transmissions += 1;
                }
                PhotonFate::Absorbed => {
                    tally.score_absorbed(photon.contribution());
                    stats.photoelectric_absorptions += 1;
                }
                PhotonFate::EnergyCutoff => {
                    stats.discarded_energy += photon.contribution();
                    stats.energy_cutoffs += 1;
                }
            }

            tally.end_history();
            stats.histories += 1;
        }

        // Uncollided reference uses the first layer's μ over the whole stack
        let uncollided_transmission = (-total_thickness * layers[0].mu_total).exp();
        let result = tally.finish(uncollided_transmission, stats);

        if result.transmitted_photons == 0 {
            log::warn!(
                "no photons transmitted out of {}; dose and buildup estimates are degenerate",
                num_photons
            );
        }
        log::info!(
            "transport done: T = {:.6}, B = {:.4}, {} / {} transmitted",
            result.transmission_factor,
            result.buildup_factor,
            result.transmitted_photons,
            result.total_photons
        );

        Ok(result)
    }

    /// Transport single photon until termination
    fn transport_photon(
        &mut self,
        photon: &mut Photon,
        layers: &[MaterialLayer],
        boundaries: &[f64],
        stats: &mut TransportStats,
    ) -> PhotonFate {
        let total_thickness = boundaries.last().copied().unwrap_or(0.0);

        while photon.alive
            && photon.position < total_thickness
            && photon.energy > ENERGY_CUTOFF_MEV
        {
            let Some(index) = layer_index(boundaries, photon.position) else {
                return PhotonFate::Transmitted;
            };
            let layer = &layers[index];
            let layer_end = boundaries[index];

            let free_path = self.rng.exponential(layer.mu_total);
            let distance_to_boundary =
                (layer_end - photon.position) / photon.direction_cosine.abs();

            if free_path < distance_to_boundary {
                photon.advance(free_path);

                if self.rng.uniform() < layer.compton_probability() {
                    photon.compton_scatter(&mut self.rng);
                    stats.compton_scatters += 1;
                } else {
                    photon.alive = false;
                    return PhotonFate::Absorbed;
                }
            } else {
                photon.position = layer_end;
                stats.boundary_crossings += 1;
            }

            if photon.energy < ENERGY_CUTOFF_MEV {
                photon.alive = false;
            }
        }

        if photon.alive && photon.position >= total_thickness {
            PhotonFate::Transmitted
        } else {
            PhotonFate::EnergyCutoff
        }
    }
}

impl Default for PhotonTransport {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

// ============================================================================
// TESTS
// ============================================================================
