//! Farm survey input record and its permissive deserialization.
//!
//! Surveys arrive as JSON produced by form frontends, so every numeric field
//! uses parse-or-zero semantics: numbers pass through, numeric strings are
//! parsed, and anything blank or unparseable becomes exactly 0.0. Selector
//! fields extend the same policy — an unknown wire string falls back to the
//! declared default variant instead of failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};

// ──────────────────────────────────────────────
// Selector enums
// ──────────────────────────────────────────────

/// Normalized selector token: a trimmed lowercase string, or `None` for any
/// non-string JSON value (null, number, object).
fn selector_token(v: &serde_json::Value) -> Option<String> {
    v.as_str().map(|s| s.trim().to_lowercase())
}

/// Fertilizer kind, selects the per-kg emission factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum FertilizerKind {
    Sintetico,
    #[default]
    Organico,
}

impl From<serde_json::Value> for FertilizerKind {
    fn from(v: serde_json::Value) -> Self {
        match selector_token(&v).as_deref() {
            Some("sintetico") => FertilizerKind::Sintetico,
            _ => FertilizerKind::Organico,
        }
    }
}

impl FertilizerKind {
    /// Wire/display token, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            FertilizerKind::Sintetico => "sintetico",
            FertilizerKind::Organico => "organico",
        }
    }
}

/// Fuel kind, selects the calorific value used for the liters→kWh conversion.
///
/// `Otro` covers firewood and any unlisted fuel; the wire value `leña` used by
/// older frontends lands here via the fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum FuelKind {
    Diesel,
    Gas,
    #[default]
    Otro,
}

impl From<serde_json::Value> for FuelKind {
    fn from(v: serde_json::Value) -> Self {
        match selector_token(&v).as_deref() {
            Some("diesel") => FuelKind::Diesel,
            Some("gas") => FuelKind::Gas,
            _ => FuelKind::Otro,
        }
    }
}

impl FuelKind {
    /// Wire/display token, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelKind::Diesel => "diesel",
            FuelKind::Gas => "gas",
            FuelKind::Otro => "otro",
        }
    }
}

/// Post-harvest processing method, selects the per-kg process coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "serde_json::Value")]
pub enum ProcessMethod {
    Lavado,
    Miel,
    #[default]
    Natural,
}

impl From<serde_json::Value> for ProcessMethod {
    fn from(v: serde_json::Value) -> Self {
        match selector_token(&v).as_deref() {
            Some("lavado") => ProcessMethod::Lavado,
            Some("miel") => ProcessMethod::Miel,
            _ => ProcessMethod::Natural,
        }
    }
}

impl ProcessMethod {
    /// Wire/display token, lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessMethod::Lavado => "lavado",
            ProcessMethod::Miel => "miel",
            ProcessMethod::Natural => "natural",
        }
    }
}

// ──────────────────────────────────────────────
// Survey record
// ──────────────────────────────────────────────

/// One farm survey submission — the calculator's entire input.
///
/// Field wire names are the camelCase identifiers the persistence backend
/// stores. Identity fields (`nombre_finca`, `nombre_productor`) are carried
/// for reports and history but never enter the arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmSurvey {
    pub nombre_finca: String,
    pub nombre_productor: String,

    /// Cultivated area, hectares. Must be > 0 for a computation to run.
    #[serde(deserialize_with = "parse_or_zero")]
    pub area_cultivada: f64,
    /// Green coffee output, kg. Must be > 0 for a computation to run.
    #[serde(deserialize_with = "parse_or_zero")]
    pub produccion_verde: f64,

    #[serde(deserialize_with = "parse_or_zero")]
    pub fertilizante_total: f64,
    pub tipo_fertilizante: FertilizerKind,

    #[serde(deserialize_with = "parse_or_zero")]
    pub energia_electrica: f64,
    #[serde(deserialize_with = "parse_or_zero")]
    pub combustible_litros: f64,
    pub tipo_combustible: FuelKind,

    /// Shade-tree count. Kept as f64 under the same parse-or-zero policy.
    #[serde(deserialize_with = "parse_or_zero")]
    pub arboles_sombra: f64,
    /// Average crown area per tree, m².
    #[serde(deserialize_with = "parse_or_zero")]
    pub area_copa_promedio: f64,

    #[serde(deserialize_with = "parse_or_zero")]
    pub distancia_km: f64,
    #[serde(deserialize_with = "parse_or_zero")]
    pub volumen_cargas: f64,

    pub tipo_procesamiento: ProcessMethod,

    #[serde(deserialize_with = "parse_or_zero")]
    pub residuos_totales: f64,
    /// Composted share of `residuos_totales`.
    #[serde(deserialize_with = "parse_or_zero")]
    pub residuos_compostados: f64,

    /// Forest cover at the 2020 reference year, hectares.
    #[serde(deserialize_with = "parse_or_zero")]
    pub bosque_base: f64,
    /// Forest cover today, hectares.
    #[serde(deserialize_with = "parse_or_zero")]
    pub bosque_actual: f64,
}

/// Deserialize a numeric field leniently: number as-is, numeric string
/// parsed, everything else (blank, junk, null, absent) exactly 0.0.
fn parse_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
