//! Presentation rounding.
//!
//! The calculator keeps every figure unrounded; display surfaces round here,
//! after all derivations, with the decimal places each metric has always been
//! shown with. Nothing in this module feeds back into the arithmetic.

use serde::{Deserialize, Serialize};

use crate::compute::Assessment;

/// Round to `dp` decimal places, half away from zero.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let scale = 10f64.powi(dp as i32);
    (value * scale).round() / scale
}

/// An assessment rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedAssessment {
    /// kg CO₂e, 2 decimals.
    pub total: f64,
    /// kg CO₂e per kg green coffee, 3 decimals.
    pub por_kg: f64,
    /// kg/ha, 1 decimal.
    pub fert_por_ha: f64,
    /// kg/ha, whole number.
    pub rendimiento: f64,
    /// kWh, 1 decimal.
    pub energia_total: f64,
    /// Whole number.
    pub arboles_por_ha: f64,
    /// Percent, 1 decimal.
    pub cobertura_porc: f64,
    /// km, 1 decimal.
    pub distancia_prom: f64,
    /// Percent, whole number.
    pub fraccion_compost: f64,
    /// Percent, 1 decimal.
    pub deforestacion_porc: f64,
    /// Category name, kg CO₂e at 1 decimal, share of total at 1 decimal.
    pub desglose: Vec<RoundedShare>,
}

/// One rounded breakdown line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedShare {
    pub name: String,
    pub value: f64,
    pub percent: f64,
}

impl RoundedAssessment {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let r = &assessment.result;
        let total = r.total_co2e;
        let desglose = assessment
            .breakdown
            .0
            .iter()
            .map(|e| RoundedShare {
                name: e.category.name().to_string(),
                value: round_dp(e.value, 1),
                percent: round_dp(e.value / total * 100.0, 1),
            })
            .collect();
        RoundedAssessment {
            total: round_dp(total, 2),
            por_kg: round_dp(r.co2e_per_kg, 3),
            fert_por_ha: round_dp(r.fertilizer_per_ha, 1),
            rendimiento: round_dp(r.yield_per_ha, 0),
            energia_total: round_dp(r.total_energy_kwh, 1),
            arboles_por_ha: round_dp(r.trees_per_ha, 0),
            cobertura_porc: round_dp(r.canopy_coverage_pct, 1),
            distancia_prom: round_dp(r.avg_transport_distance, 1),
            fraccion_compost: round_dp(r.composted_fraction_pct, 0),
            deforestacion_porc: round_dp(r.deforestation_pct, 1),
            desglose,
        }
    }
}
