use cafetal_core::{Assessment, FarmSurvey};
use serde::{Deserialize, Serialize};

/// The flattened record one saved calculation becomes: the survey fields,
/// the derived figures under the backend's wire names, and a timestamp.
///
/// Derived fields are stored UNROUNDED so a record round-trips through JSON
/// bit-for-bit; display precision is applied only when a value is shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(flatten)]
    pub survey: FarmSurvey,

    /// Aggregate footprint, kg CO₂e.
    pub total: f64,
    pub por_kg: f64,
    pub fert_por_ha: f64,
    pub rendimiento: f64,
    pub energia_total: f64,
    pub arboles_por_ha: f64,
    pub cobertura_porc: f64,
    pub distancia_prom: f64,
    pub fraccion_compost: f64,
    pub deforestacion_porc: f64,

    /// RFC 3339 timestamp string.
    pub fecha: String,
}

impl HistoryRecord {
    /// Flatten a survey and its assessment into one record.
    pub fn new(survey: FarmSurvey, assessment: &Assessment, fecha: String) -> Self {
        let r = &assessment.result;
        HistoryRecord {
            survey,
            total: r.total_co2e,
            por_kg: r.co2e_per_kg,
            fert_por_ha: r.fertilizer_per_ha,
            rendimiento: r.yield_per_ha,
            energia_total: r.total_energy_kwh,
            arboles_por_ha: r.trees_per_ha,
            cobertura_porc: r.canopy_coverage_pct,
            distancia_prom: r.avg_transport_distance,
            fraccion_compost: r.composted_fraction_pct,
            deforestacion_porc: r.deforestation_pct,
            fecha,
        }
    }
}
