//! Emission factor and unit-conversion constants.
//!
//! Every coefficient the calculator uses lives in one [`EmissionFactors`]
//! table. `Default` yields the canonical values; a caller can supply its own
//! table through [`compute_with`](crate::compute::compute_with).
//!
//! | Constant | Default | Unit |
//! |---|---|---|
//! | fertilizer, synthetic | 4.5 | kg CO₂e per kg per ha |
//! | fertilizer, organic | 1.2 | kg CO₂e per kg per ha |
//! | calorific, diesel | 36.0 | MJ/L |
//! | calorific, gas | 38.0 | MJ/L |
//! | calorific, other/firewood | 45.0 | MJ/L |
//! | MJ per kWh | 3.6 | — |
//! | grid electricity | 0.45 | kg CO₂e per kWh |
//! | transport | 0.12 | kg CO₂e per km |
//! | processing, washed | 0.30 | kg CO₂e per kg green |
//! | processing, honey | 0.20 | kg CO₂e per kg green |
//! | processing, natural | 0.10 | kg CO₂e per kg green |
//! | uncomposted waste | 0.5 | kg CO₂e per kg |
//! | deforestation | 1500.0 | kg CO₂e per percentage point |
//! | m² per hectare | 10000.0 | — |

use crate::survey::{FertilizerKind, FuelKind, ProcessMethod};

/// The coefficient table for one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactors {
    pub fertilizer_synthetic: f64,
    pub fertilizer_organic: f64,
    pub calorific_diesel: f64,
    pub calorific_gas: f64,
    pub calorific_other: f64,
    pub mj_per_kwh: f64,
    pub grid_kwh: f64,
    pub transport_km: f64,
    pub processing_washed: f64,
    pub processing_honey: f64,
    pub processing_natural: f64,
    pub waste_uncomposted: f64,
    pub deforestation_point: f64,
    pub m2_per_ha: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        EmissionFactors {
            fertilizer_synthetic: 4.5,
            fertilizer_organic: 1.2,
            calorific_diesel: 36.0,
            calorific_gas: 38.0,
            calorific_other: 45.0,
            mj_per_kwh: 3.6,
            grid_kwh: 0.45,
            transport_km: 0.12,
            processing_washed: 0.30,
            processing_honey: 0.20,
            processing_natural: 0.10,
            waste_uncomposted: 0.5,
            deforestation_point: 1500.0,
            m2_per_ha: 10_000.0,
        }
    }
}

impl EmissionFactors {
    /// Per-kg-per-ha factor for the given fertilizer kind.
    pub fn fertilizer(&self, kind: FertilizerKind) -> f64 {
        match kind {
            FertilizerKind::Sintetico => self.fertilizer_synthetic,
            FertilizerKind::Organico => self.fertilizer_organic,
        }
    }

    /// Calorific value (MJ/L) for the given fuel kind.
    pub fn calorific(&self, fuel: FuelKind) -> f64 {
        match fuel {
            FuelKind::Diesel => self.calorific_diesel,
            FuelKind::Gas => self.calorific_gas,
            FuelKind::Otro => self.calorific_other,
        }
    }

    /// Per-kg-of-green-coffee coefficient for the processing method.
    pub fn processing(&self, method: ProcessMethod) -> f64 {
        match method {
            ProcessMethod::Lavado => self.processing_washed,
            ProcessMethod::Miel => self.processing_honey,
            ProcessMethod::Natural => self.processing_natural,
        }
    }
}
