//! # Optimizer Module
//!
//! Exhaustive grid search for the lightest layered shield that keeps the
//! uncollided dose under a limit.
//!
//! ## Model
//!
//! Each candidate assigns one thickness to every material, taken from that
//! material's grid. Candidates are scored with Beer–Lambert attenuation, not
//! with the Monte Carlo engine:
//!
//! ```text
//! D = S · exp(−Σ μᵢ·tᵢ)
//! m = Σ A · ρᵢ · tᵢ
//! ```
//!
//! Feasible candidates (D ≤ D_max) are ranked by mass, lightest first.
//!
//! ## Range Syntax
//!
//! - `start..end..step`: arithmetic sequence, `end` included when it lands on
//!   the grid (step defaults to 1)
//! - `start,end[,n]`: `n` evenly spaced points including both ends (n defaults
//!   to 5)

use std::cmp::Ordering;

use crate::error::{require_positive, Result, ShieldError};
use crate::shield::{MaterialLayer, ShieldConfiguration};

/// Points in a `start,end` range when no count is given
pub const DEFAULT_RANGE_POINTS: usize = 5;

/// Default step of a `start..end` range (cm)
pub const DEFAULT_RANGE_STEP: f64 = 1.0;

// ============================================================================
// THICKNESS GRIDS
// ============================================================================

/// Parse a thickness range into its grid points (cm)
pub fn parse_range(range: &str) -> Result<Vec<f64>> {
    let invalid = |reason: &str| ShieldError::Config(format!("range `{range}`: {reason}"));

    let (parts, arithmetic) = if range.contains("..") {
        (range.split("..").collect::<Vec<_>>(), true)
    } else {
        (range.split(',').collect::<Vec<_>>(), false)
    };
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid("expected `start..end[..step]` or `start,end[,n]`"));
    }

    let numbers = parts
        .iter()
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| invalid(&e.to_string()))?;
    if numbers.iter().any(|x| !x.is_finite()) {
        return Err(invalid("values must be finite"));
    }
    let (start, end) = (numbers[0], numbers[1]);

    let grid = if arithmetic {
        let step = numbers.get(2).copied().unwrap_or(DEFAULT_RANGE_STEP);
        if step <= 0.0 {
            return Err(invalid("step must be positive"));
        }
        // Slack of step/1000 keeps `end` despite rounding
        let count = ((end + step / 1000.0 - start) / step).ceil().max(0.0) as usize;
        (0..count).map(|i| start + i as f64 * step).collect()
    } else {
        let points = match numbers.get(2) {
            Some(&n) if n >= 0.0 && n.fract() == 0.0 => n as usize,
            Some(_) => return Err(invalid("point count must be a non-negative integer")),
            None => DEFAULT_RANGE_POINTS,
        };
        linspace(start, end, points)
    };

    if grid.iter().any(|&t: &f64| t < 0.0) {
        return Err(invalid("thicknesses must be non-negative"));
    }
    Ok(grid)
}

/// `n` evenly spaced points from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            points[n - 1] = end;
            points
        }
    }
}

// ============================================================================
// GRID SEARCH
// ============================================================================

/// Search settings
#[derive(Debug, Clone, PartialEq)]
pub struct GridSearchConfig {
    /// Unshielded dose S (arbitrary units)
    pub source_intensity: f64,
    /// Dose limit D_max, same units as S
    pub dose_limit: f64,
    /// Shield face area (m²)
    pub area_m2: f64,
    /// Number of candidates kept
    pub top_k: usize,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            source_intensity: 1.0,
            dose_limit: 1.0,
            area_m2: 1.0,
            top_k: 5,
        }
    }
}

/// One feasible shield design
#[derive(Debug, Clone, PartialEq)]
pub struct ShieldCandidate {
    /// Thickness of every material in search order (cm); 0 means absent
    pub thicknesses: Vec<f64>,
    /// Attenuated dose S·exp(−Σμt)
    pub dose: f64,
    /// Shield mass (kg)
    pub mass_kg: f64,
    /// Layers with non-zero thickness, ready to simulate
    pub shield: ShieldConfiguration,
}

impl ShieldCandidate {
    pub fn summary(&self) -> String {
        format!(
            "{} dose={:.4e} mass={:.2} kg",
            self.shield.describe(),
            self.dose,
            self.mass_kg
        )
    }
}

/// Lightest designs meeting the dose limit
///
/// `materials` supply name, μ_total and density; their own thickness is
/// ignored. `grids[i]` lists the thicknesses tried for `materials[i]`.
/// Candidates come back sorted by mass, ties kept in grid order.
pub fn grid_search(
    materials: &[MaterialLayer],
    grids: &[Vec<f64>],
    config: &GridSearchConfig,
) -> Result<Vec<ShieldCandidate>> {
    if materials.is_empty() {
        return Err(ShieldError::EmptyShield);
    }
    if grids.len() != materials.len() {
        return Err(ShieldError::Config(format!(
            "{} thickness ranges given for {} materials",
            grids.len(),
            materials.len()
        )));
    }
    require_positive("source_intensity", config.source_intensity)?;
    require_positive("area_m2", config.area_m2)?;
    if !config.dose_limit.is_finite() || config.dose_limit < 0.0 {
        return Err(ShieldError::InvalidParameter {
            name: "dose_limit",
            value: config.dose_limit,
        });
    }
    for (index, material) in materials.iter().enumerate() {
        // Thickness comes from the grid; check the rest of the record
        let sized = MaterialLayer {
            thickness_cm: 1.0,
            ..material.clone()
        };
        sized.validate(index)?;
    }

    let total: usize = grids.iter().map(Vec::len).product();
    log::debug!(
        "grid search over {} material(s), {} combination(s)",
        materials.len(),
        total
    );

    let mut feasible = Vec::new();
    let mut indices = vec![0usize; grids.len()];

    for _ in 0..total {
        let thicknesses: Vec<f64> = indices.iter().zip(grids).map(|(&i, g)| g[i]).collect();
        let candidate = evaluate(materials, &thicknesses, config);
        if candidate.dose <= config.dose_limit {
            feasible.push(candidate);
        }

        // Odometer step, last material fastest
        for slot in (0..indices.len()).rev() {
            indices[slot] += 1;
            if indices[slot] < grids[slot].len() {
                break;
            }
            indices[slot] = 0;
        }
    }

    log::info!(
        "grid search: {} of {} combination(s) meet D_max = {}",
        feasible.len(),
        total,
        config.dose_limit
    );

    feasible.sort_by(|a, b| a.mass_kg.partial_cmp(&b.mass_kg).unwrap_or(Ordering::Equal));
    feasible.truncate(config.top_k);
    Ok(feasible)
}

/// Score one thickness assignment
fn evaluate(
    materials: &[MaterialLayer],
    thicknesses: &[f64],
    config: &GridSearchConfig,
) -> ShieldCandidate {
    let shield: ShieldConfiguration = materials
        .iter()
        .zip(thicknesses)
        .filter(|(_, t)| **t > 0.0)
        .map(|(m, &t)| MaterialLayer {
            thickness_cm: t,
            ..m.clone()
        })
        .collect();

    ShieldCandidate {
        thicknesses: thicknesses.to_vec(),
        dose: config.source_intensity * (-shield.optical_thickness()).exp(),
        mass_kg: shield.total_mass(config.area_m2),
        shield,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(name: &str, mu_total: f64, density: f64) -> MaterialLayer {
        MaterialLayer::new(name, 1.0, mu_total, 0.0, mu_total, density)
    }

    fn assert_grid(got: &[f64], expected: &[f64]) {
        assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-12, "{got:?} vs {expected:?}");
        }
    }

    #[test]
    fn test_parse_arithmetic_range() {
        assert_grid(&parse_range("0..10..2").unwrap(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_grid(&parse_range("1..3").unwrap(), &[1.0, 2.0, 3.0]);
        // End off the grid is not reached
        assert_grid(&parse_range("0..1..0.4").unwrap(), &[0.0, 0.4, 0.8]);
        // Rounding in 0.1 steps still keeps the end
        assert_eq!(parse_range("0..0.3..0.1").unwrap().len(), 4);
        assert!(parse_range("5..1").unwrap().is_empty());
    }

    #[test]
    fn test_parse_even_range() {
        assert_grid(&parse_range("0,10").unwrap(), &[0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_grid(&parse_range("1, 2, 3").unwrap(), &[1.0, 1.5, 2.0]);
        assert_grid(&parse_range("4,9,1").unwrap(), &[4.0]);
        assert_eq!(parse_range("0,0.3,7").unwrap()[6], 0.3);
    }

    #[test]
    fn test_parse_range_errors() {
        for bad in ["", "1", "a..b", "0..5..0", "0..5..-1", "0,1,2,3", "0,1,2.5", "-1,1", "0,inf"] {
            assert!(
                matches!(parse_range(bad), Err(ShieldError::Config(_))),
                "accepted `{bad}`"
            );
        }
    }

    #[test]
    fn test_grid_search_finds_lightest() {
        let materials = [material("Lead", 1.2, 11.34), material("Water", 0.07, 1.0)];
        let grids = [parse_range("0..4..1").unwrap(), parse_range("0..40..10").unwrap()];
        let config = GridSearchConfig {
            source_intensity: 100.0,
            dose_limit: 10.0,
            top_k: 3,
            ..GridSearchConfig::default()
        };

        let results = grid_search(&materials, &grids, &config).unwrap();
        assert!(!results.is_empty() && results.len() <= 3);

        for pair in results.windows(2) {
            assert!(pair[0].mass_kg <= pair[1].mass_kg);
        }
        for candidate in &results {
            assert!(candidate.dose <= config.dose_limit);
            assert_eq!(candidate.thicknesses.len(), 2);
        }

        // 2 cm lead alone: 100·exp(−2.4) ≈ 9.07 at 226.8 kg
        let best = &results[0];
        assert_eq!(best.thicknesses, vec![2.0, 0.0]);
        assert_eq!(best.shield.layer_count(), 1);
        assert!((best.mass_kg - 226.8).abs() < 1e-9);
        assert!((best.dose - 100.0 * (-2.4f64).exp()).abs() < 1e-12);

        // Next: 1 cm lead in front of 20 cm water, 313.4 kg
        assert_eq!(results[1].thicknesses, vec![1.0, 20.0]);
        assert_eq!(results[1].shield.layer_count(), 2);
        assert!((results[1].mass_kg - 313.4).abs() < 1e-9);
    }

    #[test]
    fn test_grid_search_matches_exhaustive_scan() {
        let materials = [material("Lead", 0.77, 11.34), material("Steel", 0.47, 7.85)];
        let grids = [parse_range("0,5,6").unwrap(), parse_range("0,6,7").unwrap()];
        let config = GridSearchConfig {
            source_intensity: 1.0,
            dose_limit: 0.05,
            area_m2: 0.5,
            top_k: usize::MAX,
        };
        let results = grid_search(&materials, &grids, &config).unwrap();

        let mut expected = 0;
        for &a in &grids[0] {
            for &b in &grids[1] {
                if (-(0.77 * a + 0.47 * b)).exp() <= 0.05 {
                    expected += 1;
                }
            }
        }
        assert_eq!(results.len(), expected);
    }

    #[test]
    fn test_grid_search_infeasible() {
        let materials = [material("Foil", 0.01, 2.7)];
        let grids = [vec![0.0, 0.1]];
        let config = GridSearchConfig {
            dose_limit: 0.5,
            ..GridSearchConfig::default()
        };
        assert!(grid_search(&materials, &grids, &config).unwrap().is_empty());
    }

    #[test]
    fn test_grid_search_rejects_bad_input() {
        let materials = [material("Lead", 0.77, 11.34)];
        let config = GridSearchConfig::default();

        assert!(matches!(grid_search(&[], &[], &config), Err(ShieldError::EmptyShield)));
        assert!(matches!(
            grid_search(&materials, &[], &config),
            Err(ShieldError::Config(_))
        ));

        let bad = GridSearchConfig {
            dose_limit: -1.0,
            ..config.clone()
        };
        assert!(matches!(
            grid_search(&materials, &[vec![1.0]], &bad),
            Err(ShieldError::InvalidParameter { name: "dose_limit", .. })
        ));

        let bad_material = [material("Void", 0.0, 1.0)];
        assert!(matches!(
            grid_search(&bad_material, &[vec![1.0]], &config),
            Err(ShieldError::InvalidLayer { index: 0, .. })
        ));
    }

    #[test]
    fn test_top_k_truncates() {
        let materials = [material("Lead", 0.77, 11.34)];
        let grids = [parse_range("0..10..1").unwrap()];
        let config = GridSearchConfig {
            top_k: 2,
            ..GridSearchConfig::default()
        };
        // Dose limit equals S, so every thickness qualifies
        let results = grid_search(&materials, &grids, &config).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].thicknesses, vec![0.0]);
        assert_eq!(results[1].thicknesses, vec![1.0]);
        assert!(results[0].shield.is_empty());
    }
}
