use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;

pub const DEFAULT_MONTHS: u32 = 6;
pub const MAX_MONTHS: u32 = 36;
pub const DEFAULT_RAW_MATERIALS_RATIO: f64 = 0.3;
pub const DEFAULT_PROFIT_TOLERANCE: f64 = 1.0;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceConfig {
    /// Length of the trailing monthly series, current month included.
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default)]
    pub monthly_fallback: MonthlyFallback,
    /// Share of inventory value booked as raw-material spend.
    #[serde(default = "default_ratio")]
    pub raw_materials_ratio: f64,
    #[serde(default)]
    pub overhead: OverheadConfig,
    #[serde(default)]
    pub consistency: ConsistencyConfig,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            months: DEFAULT_MONTHS,
            monthly_fallback: MonthlyFallback::default(),
            raw_materials_ratio: DEFAULT_RAW_MATERIALS_RATIO,
            overhead: OverheadConfig::default(),
            consistency: ConsistencyConfig::default(),
        }
    }
}

fn default_months() -> u32 {
    DEFAULT_MONTHS
}

fn default_ratio() -> f64 {
    DEFAULT_RAW_MATERIALS_RATIO
}

// ---------------------------------------------------------------------------
// Monthly fallback
// ---------------------------------------------------------------------------

/// What a month with no invoiced revenue reports.
///
/// `Estimate` fills the gap with the mean of the months that do have
/// revenue and flags the point as estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyFallback {
    #[default]
    None,
    Estimate,
}

impl std::fmt::Display for MonthlyFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Estimate => write!(f, "estimate"),
        }
    }
}

// ---------------------------------------------------------------------------
// Overhead
// ---------------------------------------------------------------------------

/// Fixed monthly overhead. The three lines together make up the fixed
/// operational cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverheadConfig {
    #[serde(default = "default_utilities")]
    pub utilities: f64,
    #[serde(default = "default_equipment")]
    pub equipment_maintenance: f64,
    #[serde(default = "default_misc")]
    pub miscellaneous: f64,
}

impl Default for OverheadConfig {
    fn default() -> Self {
        Self {
            utilities: default_utilities(),
            equipment_maintenance: default_equipment(),
            miscellaneous: default_misc(),
        }
    }
}

fn default_utilities() -> f64 {
    3000.0
}

fn default_equipment() -> f64 {
    2500.0
}

fn default_misc() -> f64 {
    1500.0
}

impl OverheadConfig {
    pub fn fixed_operational_cost(&self) -> f64 {
        self.utilities + self.equipment_maintenance + self.miscellaneous
    }
}

// ---------------------------------------------------------------------------
// Consistency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyConfig {
    /// Profit matches when the absolute difference is strictly below this.
    #[serde(default = "default_tolerance")]
    pub profit_tolerance: f64,
}

impl Default for ConsistencyConfig {
    fn default() -> Self {
        Self { profit_tolerance: DEFAULT_PROFIT_TOLERANCE }
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_PROFIT_TOLERANCE
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl FinanceConfig {
    pub fn from_toml(input: &str) -> Result<Self, FinanceError> {
        let config: FinanceConfig =
            toml::from_str(input).map_err(|e| FinanceError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, FinanceError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| FinanceError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn to_toml(&self) -> Result<String, FinanceError> {
        toml::to_string_pretty(self).map_err(|e| FinanceError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.months == 0 || self.months > MAX_MONTHS {
            return Err(FinanceError::ConfigValidation(format!(
                "months must be between 1 and {MAX_MONTHS}, got {}",
                self.months
            )));
        }

        if !(0.0..=1.0).contains(&self.raw_materials_ratio) {
            return Err(FinanceError::ConfigValidation(format!(
                "raw_materials_ratio must be within [0, 1], got {}",
                self.raw_materials_ratio
            )));
        }

        let overhead = [
            ("utilities", self.overhead.utilities),
            ("equipment_maintenance", self.overhead.equipment_maintenance),
            ("miscellaneous", self.overhead.miscellaneous),
        ];
        for (name, value) in overhead {
            if !value.is_finite() || value < 0.0 {
                return Err(FinanceError::ConfigValidation(format!(
                    "overhead.{name} must be a non-negative amount, got {value}"
                )));
            }
        }

        let tol = self.consistency.profit_tolerance;
        if !tol.is_finite() || tol <= 0.0 {
            return Err(FinanceError::ConfigValidation(format!(
                "consistency.profit_tolerance must be positive, got {tol}"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
