//! The emission computation: one survey in, one assessment out.
//!
//! A single pass of unit conversions and weighted sums. No state, no I/O;
//! every call builds a fresh [`Assessment`]. The only rejection is a
//! non-positive area or production — all other inputs flow through, with
//! zero-divisor divisions substituting 0 instead of propagating NaN.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::factors::EmissionFactors;
use crate::survey::FarmSurvey;

// ──────────────────────────────────────────────
// Categories and breakdown
// ──────────────────────────────────────────────

/// Emission categories, in the fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Fertilizantes,
    #[serde(rename = "Energía")]
    Energia,
    Transporte,
    Procesamiento,
    Residuos,
    #[serde(rename = "Deforestación")]
    Deforestacion,
}

impl Category {
    /// All categories in reporting order.
    pub const ALL: [Category; 6] = [
        Category::Fertilizantes,
        Category::Energia,
        Category::Transporte,
        Category::Procesamiento,
        Category::Residuos,
        Category::Deforestacion,
    ];

    /// Display name, as it appears in legends and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Fertilizantes => "Fertilizantes",
            Category::Energia => "Energía",
            Category::Transporte => "Transporte",
            Category::Procesamiento => "Procesamiento",
            Category::Residuos => "Residuos",
            Category::Deforestacion => "Deforestación",
        }
    }
}

/// One category's contribution, kg CO₂e.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    #[serde(rename = "name")]
    pub category: Category,
    pub value: f64,
}

/// Per-category emissions in reporting order, strictly-positive entries only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown(pub Vec<BreakdownEntry>);

impl EmissionBreakdown {
    /// Sum of the retained entries.
    pub fn sum(&self) -> f64 {
        self.0.iter().map(|e| e.value).sum()
    }

    /// Value for a category, if it survived the positive filter.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.0
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.value)
    }
}

// ──────────────────────────────────────────────
// Result records
// ──────────────────────────────────────────────

/// The derived emission figures for one survey, unrounded.
///
/// Rounding is presentation-only; see [`crate::round`]. Persisting these
/// fields as-is keeps the flattened history record lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionResult {
    /// Aggregate footprint, kg CO₂e.
    pub total_co2e: f64,
    /// Footprint per kg of green coffee.
    pub co2e_per_kg: f64,
    pub fertilizer_per_ha: f64,
    pub yield_per_ha: f64,
    pub total_energy_kwh: f64,
    pub trees_per_ha: f64,
    pub canopy_coverage_pct: f64,
    pub avg_transport_distance: f64,
    pub composted_fraction_pct: f64,
    pub deforestation_pct: f64,
}

/// Result and breakdown, created together and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub result: EmissionResult,
    pub breakdown: EmissionBreakdown,
}

// ──────────────────────────────────────────────
// Computation
// ──────────────────────────────────────────────

/// Divide, substituting 0 when the divisor is 0.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Compute an assessment with the canonical factor table.
pub fn compute(survey: &FarmSurvey) -> Result<Assessment, ValidationError> {
    compute_with(survey, &EmissionFactors::default())
}

/// Compute an assessment with a caller-supplied factor table.
///
/// Fails only when area or production is not strictly positive; every
/// other field may be zero.
pub fn compute_with(
    survey: &FarmSurvey,
    factors: &EmissionFactors,
) -> Result<Assessment, ValidationError> {
    let area = survey.area_cultivada;
    let production = survey.produccion_verde;
    if area <= 0.0 || production <= 0.0 {
        return Err(ValidationError::NonPositiveBase { area, production });
    }

    // Fertilizer: normalized per hectare, factored, scaled back by area.
    let fertilizer_per_ha = survey.fertilizante_total / area;
    let fertilizer_emission =
        fertilizer_per_ha * factors.fertilizer(survey.tipo_fertilizante) * area;

    // Yield is reported only; it never enters the total.
    let yield_per_ha = production / area;

    // Energy: fuel liters → MJ → kWh, added to grid electricity.
    let fuel_energy_kwh =
        survey.combustible_litros * factors.calorific(survey.tipo_combustible) / factors.mj_per_kwh;
    let total_energy_kwh = survey.energia_electrica + fuel_energy_kwh;
    let energy_emission = total_energy_kwh * factors.grid_kwh;

    // Shade cover: density and crown coverage as a share of farm area.
    let trees_per_ha = survey.arboles_sombra / area;
    let canopy_coverage_pct =
        (survey.area_copa_promedio * survey.arboles_sombra) / (area * factors.m2_per_ha) * 100.0;

    // Transport: (distance * volume) / volume collapses to the distance for
    // any nonzero volume and to 0 when no loads were hauled. Do not simplify
    // to the bare distance; the zero-volume case is load-bearing downstream.
    let avg_transport_distance = ratio(
        survey.distancia_km * survey.volumen_cargas,
        survey.volumen_cargas,
    );
    let transport_emission = avg_transport_distance * factors.transport_km;

    let processing_emission = production * factors.processing(survey.tipo_procesamiento);

    let composted_fraction = ratio(survey.residuos_compostados, survey.residuos_totales);
    let waste_emission =
        (survey.residuos_totales - survey.residuos_compostados) * factors.waste_uncomposted;

    // Deforestation: loss relative to the reference year, clamped at 0 so
    // forest gain earns no credit. No reference cover means no metric.
    let deforestation_pct = if survey.bosque_base > 0.0 {
        ((survey.bosque_base - survey.bosque_actual) / area).max(0.0) * 100.0
    } else {
        0.0
    };
    let deforestation_emission = if deforestation_pct > 0.0 {
        deforestation_pct * factors.deforestation_point
    } else {
        0.0
    };

    // The total is the sum of the same six terms the breakdown is built
    // from, so total == Σ breakdown holds exactly whenever no term is
    // negative. Summed unrounded; rounding happens at presentation.
    let terms = [
        fertilizer_emission,
        energy_emission,
        transport_emission,
        processing_emission,
        waste_emission,
        deforestation_emission,
    ];
    let total_co2e: f64 = terms.iter().sum();
    let co2e_per_kg = total_co2e / production;

    let breakdown = EmissionBreakdown(
        Category::ALL
            .iter()
            .zip(terms.iter())
            .filter(|(_, v)| **v > 0.0)
            .map(|(c, v)| BreakdownEntry {
                category: *c,
                value: *v,
            })
            .collect(),
    );

    Ok(Assessment {
        result: EmissionResult {
            total_co2e,
            co2e_per_kg,
            fertilizer_per_ha,
            yield_per_ha,
            total_energy_kwh,
            trees_per_ha,
            canopy_coverage_pct,
            avg_transport_distance,
            composted_fraction_pct: composted_fraction * 100.0,
            deforestation_pct,
        },
        breakdown,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{FertilizerKind, FuelKind, ProcessMethod};

    fn base_survey() -> FarmSurvey {
        FarmSurvey {
            area_cultivada: 10.0,
            produccion_verde: 5000.0,
            ..FarmSurvey::default()
        }
    }

    #[test]
    fn zero_area_rejected() {
        let survey = FarmSurvey {
            area_cultivada: 0.0,
            produccion_verde: 5000.0,
            ..FarmSurvey::default()
        };
        let err = compute(&survey).unwrap_err();
        assert_eq!(err.to_string(), "area and production must be positive");
    }

    #[test]
    fn zero_production_rejected() {
        let survey = FarmSurvey {
            area_cultivada: 4.0,
            produccion_verde: 0.0,
            ..FarmSurvey::default()
        };
        assert!(compute(&survey).is_err());
    }

    #[test]
    fn deterministic() {
        let survey = FarmSurvey {
            fertilizante_total: 321.0,
            combustible_litros: 55.5,
            residuos_totales: 120.0,
            ..base_survey()
        };
        assert_eq!(compute(&survey).unwrap(), compute(&survey).unwrap());
    }

    #[test]
    fn synthetic_fertilizer_scales_3_75x() {
        let organic = FarmSurvey {
            fertilizante_total: 400.0,
            tipo_fertilizante: FertilizerKind::Organico,
            ..base_survey()
        };
        let synthetic = FarmSurvey {
            tipo_fertilizante: FertilizerKind::Sintetico,
            ..organic.clone()
        };
        let e_org = compute(&organic)
            .unwrap()
            .breakdown
            .get(Category::Fertilizantes)
            .unwrap();
        let e_syn = compute(&synthetic)
            .unwrap()
            .breakdown
            .get(Category::Fertilizantes)
            .unwrap();
        assert!((e_syn / e_org - 3.75).abs() < 1e-12);
    }

    #[test]
    fn fuel_energy_follows_calorific_table() {
        let liters = 100.0;
        let energy_for = |fuel: FuelKind| {
            let survey = FarmSurvey {
                combustible_litros: liters,
                tipo_combustible: fuel,
                ..base_survey()
            };
            compute(&survey).unwrap().result.total_energy_kwh
        };
        assert!((energy_for(FuelKind::Diesel) - liters * 36.0 / 3.6).abs() < 1e-9);
        assert!((energy_for(FuelKind::Gas) - liters * 38.0 / 3.6).abs() < 1e-9);
        assert!((energy_for(FuelKind::Otro) - liters * 45.0 / 3.6).abs() < 1e-9);
    }

    #[test]
    fn transport_degenerate_average_is_preserved() {
        let hauled = FarmSurvey {
            distancia_km: 25.0,
            volumen_cargas: 8.0,
            ..base_survey()
        };
        let r = compute(&hauled).unwrap().result;
        assert_eq!(r.avg_transport_distance, 25.0);

        // No loads: the distance is recorded but the average collapses to 0.
        let idle = FarmSurvey {
            distancia_km: 25.0,
            volumen_cargas: 0.0,
            ..base_survey()
        };
        let r = compute(&idle).unwrap().result;
        assert_eq!(r.avg_transport_distance, 0.0);
        assert_eq!(r.total_co2e, compute(&base_survey()).unwrap().result.total_co2e);
    }

    #[test]
    fn no_forest_base_means_no_deforestation() {
        let survey = FarmSurvey {
            bosque_base: 0.0,
            bosque_actual: 7.0,
            ..base_survey()
        };
        let r = compute(&survey).unwrap().result;
        assert_eq!(r.deforestation_pct, 0.0);
        assert_eq!(
            compute(&survey).unwrap().breakdown.get(Category::Deforestacion),
            None
        );
    }

    #[test]
    fn forest_gain_earns_no_credit() {
        let survey = FarmSurvey {
            bosque_base: 2.0,
            bosque_actual: 5.0,
            ..base_survey()
        };
        let r = compute(&survey).unwrap().result;
        assert_eq!(r.deforestation_pct, 0.0);
    }

    #[test]
    fn forest_loss_is_charged_per_point() {
        // 1 ha lost over 10 ha cultivated → 10 percentage points.
        let survey = FarmSurvey {
            bosque_base: 3.0,
            bosque_actual: 2.0,
            ..base_survey()
        };
        let r = compute(&survey).unwrap().result;
        assert!((r.deforestation_pct - 10.0).abs() < 1e-9);
        let defo = compute(&survey)
            .unwrap()
            .breakdown
            .get(Category::Deforestacion)
            .unwrap();
        assert!((defo - 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn fully_composted_waste_emits_nothing() {
        let survey = FarmSurvey {
            residuos_totales: 800.0,
            residuos_compostados: 800.0,
            ..base_survey()
        };
        let out = compute(&survey).unwrap();
        assert_eq!(out.breakdown.get(Category::Residuos), None);
        assert_eq!(out.result.composted_fraction_pct, 100.0);
    }

    #[test]
    fn zero_waste_has_zero_fraction() {
        let out = compute(&base_survey()).unwrap();
        assert_eq!(out.result.composted_fraction_pct, 0.0);
    }

    #[test]
    fn breakdown_drops_zero_categories() {
        // Only processing is nonzero here (production is always > 0).
        let out = compute(&base_survey()).unwrap();
        let categories: Vec<Category> = out.breakdown.0.iter().map(|e| e.category).collect();
        assert_eq!(categories, vec![Category::Procesamiento]);
    }

    #[test]
    fn breakdown_preserves_category_order() {
        let survey = FarmSurvey {
            fertilizante_total: 100.0,
            energia_electrica: 50.0,
            distancia_km: 10.0,
            volumen_cargas: 2.0,
            residuos_totales: 40.0,
            bosque_base: 2.0,
            bosque_actual: 1.0,
            ..base_survey()
        };
        let out = compute(&survey).unwrap();
        let categories: Vec<Category> = out.breakdown.0.iter().map(|e| e.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn total_equals_breakdown_sum_exactly() {
        let survey = FarmSurvey {
            fertilizante_total: 137.5,
            tipo_fertilizante: FertilizerKind::Sintetico,
            energia_electrica: 91.0,
            combustible_litros: 13.0,
            tipo_combustible: FuelKind::Gas,
            distancia_km: 42.0,
            volumen_cargas: 3.0,
            tipo_procesamiento: ProcessMethod::Miel,
            residuos_totales: 64.0,
            residuos_compostados: 20.0,
            bosque_base: 1.5,
            bosque_actual: 1.0,
            ..base_survey()
        };
        let out = compute(&survey).unwrap();
        assert_eq!(out.result.total_co2e, out.breakdown.sum());
    }

    #[test]
    fn spec_scenario_synthetic_fertilizer_only() {
        let survey = FarmSurvey {
            area_cultivada: 10.0,
            produccion_verde: 5000.0,
            fertilizante_total: 500.0,
            tipo_fertilizante: FertilizerKind::Sintetico,
            tipo_procesamiento: ProcessMethod::Lavado,
            ..FarmSurvey::default()
        };
        let out = compute(&survey).unwrap();
        assert_eq!(out.result.fertilizer_per_ha, 50.0);
        assert_eq!(out.breakdown.get(Category::Fertilizantes), Some(2250.0));
        // Washed processing of 5000 kg adds 1500.
        assert_eq!(out.breakdown.get(Category::Procesamiento), Some(1500.0));
        assert_eq!(out.result.total_co2e, 3750.0);
        assert_eq!(out.result.co2e_per_kg, 0.75);
    }

    #[test]
    fn spec_scenario_honey_processing() {
        let survey = FarmSurvey {
            area_cultivada: 10.0,
            produccion_verde: 5000.0,
            fertilizante_total: 500.0,
            tipo_fertilizante: FertilizerKind::Sintetico,
            tipo_procesamiento: ProcessMethod::Miel,
            ..FarmSurvey::default()
        };
        let out = compute(&survey).unwrap();
        assert_eq!(out.breakdown.get(Category::Procesamiento), Some(1000.0));
        assert_eq!(out.result.total_co2e, 3250.0);
        assert_eq!(out.result.co2e_per_kg, 0.65);
    }

    #[test]
    fn custom_factor_table_is_honored() {
        let factors = EmissionFactors {
            transport_km: 1.0,
            ..EmissionFactors::default()
        };
        let survey = FarmSurvey {
            distancia_km: 30.0,
            volumen_cargas: 1.0,
            ..base_survey()
        };
        let out = compute_with(&survey, &factors).unwrap();
        assert_eq!(out.breakdown.get(Category::Transporte), Some(30.0));
    }
}
