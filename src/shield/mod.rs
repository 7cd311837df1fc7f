//! # Shield Module
//!
//! Layered slab shield description consumed by the transport engine.
//!
//! ## Geometry
//!
//! ```text
//!  source ─►│ layer 0 │ layer 1 │ ... │ layer n-1 │─► detector
//!           0        t₀     t₀+t₁              Σ tᵢ      depth (cm)
//! ```
//!
//! Layers are stacked along the transport axis in insertion order. The depth of
//! each interface is the running sum of the preceding thicknesses.
//!
//! ## Attenuation Data
//!
//! Each layer carries linear attenuation coefficients (cm⁻¹):
//! - μ_total: total interaction probability per unit length
//! - μ_compton: Compton scattering part of μ_total
//! - μ_photoelectric: photoelectric part (informational; absorption is
//!   sampled as the complement of Compton)

use serde::{Deserialize, Serialize};

use crate::constants::{G_TO_KG, M2_TO_CM2};
use crate::error::{Result, ShieldError};

// ============================================================================
// MATERIAL LAYER
// ============================================================================

/// One slab of shielding material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialLayer {
    /// Material name (identifier only)
    pub name: String,
    /// Thickness (cm)
    pub thickness_cm: f64,
    /// Total linear attenuation coefficient (cm⁻¹)
    pub mu_total: f64,
    /// Compton scattering coefficient (cm⁻¹)
    pub mu_compton: f64,
    /// Photoelectric absorption coefficient (cm⁻¹)
    pub mu_photoelectric: f64,
    /// Density (g/cm³)
    pub density_g_cm3: f64,
}

impl MaterialLayer {
    pub fn new(
        name: &str,
        thickness_cm: f64,
        mu_total: f64,
        mu_compton: f64,
        mu_photoelectric: f64,
        density_g_cm3: f64,
    ) -> Self {
        Self {
            name: name.into(),
            thickness_cm,
            mu_total,
            mu_compton,
            mu_photoelectric,
            density_g_cm3,
        }
    }

    /// Probability that an interaction in this layer is a Compton scatter
    pub fn compton_probability(&self) -> f64 {
        self.mu_compton / self.mu_total
    }

    /// Optical thickness μ·t (mean free paths)
    pub fn optical_thickness(&self) -> f64 {
        self.mu_total * self.thickness_cm
    }

    /// Uncollided transmission exp(−μ·t)
    pub fn transmission(&self) -> f64 {
        (-self.optical_thickness()).exp()
    }

    /// Areal density ρ·t (g/cm²)
    pub fn areal_density(&self) -> f64 {
        self.density_g_cm3 * self.thickness_cm
    }

    /// Layer mass for a given face area (kg)
    pub fn mass_kg(&self, area_m2: f64) -> f64 {
        area_m2 * M2_TO_CM2 * self.areal_density() * G_TO_KG
    }

    /// Check physical invariants
    pub fn validate(&self, index: usize) -> Result<()> {
        let fail = |reason: String| ShieldError::InvalidLayer {
            index,
            name: self.name.clone(),
            reason,
        };

        let fields = [
            ("thickness_cm", self.thickness_cm),
            ("mu_total", self.mu_total),
            ("mu_compton", self.mu_compton),
            ("mu_photoelectric", self.mu_photoelectric),
            ("density_g_cm3", self.density_g_cm3),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(fail(format!("{field} is not finite ({value})")));
            }
        }

        if self.thickness_cm <= 0.0 {
            return Err(fail(format!(
                "thickness must be positive, got {} cm",
                self.thickness_cm
            )));
        }
        if self.mu_total <= 0.0 {
            return Err(fail(format!(
                "mu_total must be positive, got {} cm^-1",
                self.mu_total
            )));
        }
        if self.mu_compton < 0.0 {
            return Err(fail(format!(
                "mu_compton must be non-negative, got {} cm^-1",
                self.mu_compton
            )));
        }
        if self.mu_compton > self.mu_total {
            return Err(fail(format!(
                "mu_compton ({}) exceeds mu_total ({})",
                self.mu_compton, self.mu_total
            )));
        }
        if self.density_g_cm3 <= 0.0 {
            return Err(fail(format!(
                "density must be positive, got {} g/cm^3",
                self.density_g_cm3
            )));
        }

        Ok(())
    }
}

// ============================================================================
// SHIELD CONFIGURATION
// ============================================================================

/// Ordered stack of material layers, source side first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShieldConfiguration {
    layers: Vec<MaterialLayer>,
}

impl ShieldConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer on the detector side. No validation is done here.
    pub fn add_layer(
        &mut self,
        name: &str,
        thickness_cm: f64,
        mu_total: f64,
        mu_compton: f64,
        mu_photoelectric: f64,
        density_g_cm3: f64,
    ) {
        self.push(MaterialLayer::new(
            name,
            thickness_cm,
            mu_total,
            mu_compton,
            mu_photoelectric,
            density_g_cm3,
        ));
    }

    /// Append an existing layer record
    pub fn push(&mut self, layer: MaterialLayer) {
        self.layers.push(layer);
    }

    /// Remove all layers
    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers in transport order
    pub fn layers(&self) -> &[MaterialLayer] {
        &self.layers
    }

    /// Total shield thickness (cm)
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness_cm).sum()
    }

    /// Cumulative exit depth of each layer (cm)
    pub fn boundaries(&self) -> Vec<f64> {
        let mut accumulated = 0.0;
        self.layers
            .iter()
            .map(|layer| {
                accumulated += layer.thickness_cm;
                accumulated
            })
            .collect()
    }

    /// Index of the layer containing the given depth, or `None` beyond the last layer
    pub fn layer_at(&self, depth: f64) -> Option<usize> {
        layer_index(&self.boundaries(), depth)
    }

    /// Σ μᵢ·tᵢ over all layers
    pub fn optical_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.optical_thickness()).sum()
    }

    /// Total shield mass for a given face area (kg)
    pub fn total_mass(&self, area_m2: f64) -> f64 {
        self.layers.iter().map(|l| l.mass_kg(area_m2)).sum()
    }

    /// Check that the shield is non-empty and every layer is physical
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(ShieldError::EmptyShield);
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i)?;
        }
        Ok(())
    }

    /// Short one-line description, e.g. `[Lead(5cm) | Steel(2cm)]`
    pub fn describe(&self) -> String {
        let desc: Vec<String> = self
            .layers
            .iter()
            .map(|l| format!("{}({}cm)", l.name, l.thickness_cm))
            .collect();
        format!("[{}]", desc.join(" | "))
    }
}

/// Index of the first layer whose exit depth lies beyond `depth`
///
/// `boundaries` are cumulative exit depths as returned by
/// [`ShieldConfiguration::boundaries`]. Depths before the entrance face belong
/// to the first layer.
pub fn layer_index(boundaries: &[f64], depth: f64) -> Option<usize> {
    boundaries.iter().position(|&end| depth < end)
}

impl From<Vec<MaterialLayer>> for ShieldConfiguration {
    fn from(layers: Vec<MaterialLayer>) -> Self {
        Self { layers }
    }
}

impl FromIterator<MaterialLayer> for ShieldConfiguration {
    fn from_iter<I: IntoIterator<Item = MaterialLayer>>(iter: I) -> Self {
        Self { layers: iter.into_iter().collect() }
    }
}

impl Extend<MaterialLayer> for ShieldConfiguration {
    fn extend<I: IntoIterator<Item = MaterialLayer>>(&mut self, iter: I) {
        self.layers.extend(iter);
    }
}
