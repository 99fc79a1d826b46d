//! TOML-based analysis configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::finance::projection::YearZero;
use crate::sim::battery::ChargeRule;

/// Top-level analysis configuration parsed from TOML.
///
/// All fields have defaults matching the reference household study. Load
/// from TOML with [`AnalysisConfig::from_toml_file`] or use
/// [`AnalysisConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Battery capacity and state-of-charge rule.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Grid electricity tariff.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Multi-year cash-flow projection parameters.
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Outlier detection and replacement parameters.
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

/// Battery parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (kWh, must be > 0).
    pub max_charge_kwh: f64,
    /// How electricity demand moves the state of charge.
    pub charge_rule: ChargeRule,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            max_charge_kwh: 12.5,
            charge_rule: ChargeRule::Reference,
        }
    }
}

/// Grid tariff parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Flat grid electricity price per kWh.
    pub electricity_price: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            electricity_price: 0.17,
        }
    }
}

/// Longest projection horizon accepted, in years.
pub const MAX_HORIZON_YEARS: usize = 200;

/// Cash-flow projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Year-0 cash flow (the battery purchase, must be <= 0).
    pub initial_investment: f64,
    /// Yearly electricity price escalation `r1`.
    pub escalation_rate: f64,
    /// Extra escalation added per year in the accelerating scenario `r2`.
    pub escalation_step: f64,
    /// Discount rate used for NPV (must be > -1).
    pub discount_rate: f64,
    /// Number of projected years after the investment (1..=[`MAX_HORIZON_YEARS`]).
    pub horizon_years: usize,
    /// Whether the accelerating scenario keeps its year-0 savings entry.
    pub scenario_b_year_zero: YearZero,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_investment: -7000.0,
            escalation_rate: 0.04,
            escalation_step: 0.0025,
            discount_rate: 0.06,
            horizon_years: 20,
            scenario_b_year_zero: YearZero::Append,
        }
    }
}

/// Outlier cleaning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleaningConfig {
    /// IQR multiplier for the outlier fences (must be >= 0).
    pub iqr_multiplier: f64,
    /// Quantile of the outlier values used as the replacement threshold.
    pub replacement_quantile: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            replacement_quantile: 0.75,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.max_charge_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl AnalysisConfig {
    /// Returns the reference study parameters.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the legacy preset: the accelerating scenario drops its year-0
    /// entry, matching historically published figures.
    pub fn legacy() -> Self {
        Self {
            projection: ProjectionConfig {
                scenario_b_year_zero: YearZero::Drop,
                ..ProjectionConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the discharge preset: demand drains the battery.
    pub fn discharge() -> Self {
        Self {
            battery: BatteryConfig {
                charge_rule: ChargeRule::Discharge,
                ..BatteryConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "legacy", "discharge"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "legacy" => Ok(Self::legacy()),
            "discharge" => Ok(Self::discharge()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.battery.max_charge_kwh > 0.0) {
            errors.push(ConfigError::new("battery.max_charge_kwh", "must be > 0"));
        }
        if !(self.tariff.electricity_price >= 0.0) {
            errors.push(ConfigError::new("tariff.electricity_price", "must be >= 0"));
        }

        let p = &self.projection;
        if !(p.initial_investment <= 0.0) {
            errors.push(ConfigError::new(
                "projection.initial_investment",
                "must be <= 0 (an outlay)",
            ));
        }
        if !(p.discount_rate > -1.0) {
            errors.push(ConfigError::new("projection.discount_rate", "must be > -1"));
        }
        if !p.escalation_rate.is_finite() {
            errors.push(ConfigError::new("projection.escalation_rate", "must be finite"));
        }
        if !p.escalation_step.is_finite() {
            errors.push(ConfigError::new("projection.escalation_step", "must be finite"));
        }
        if p.horizon_years == 0 {
            errors.push(ConfigError::new("projection.horizon_years", "must be > 0"));
        } else if p.horizon_years > MAX_HORIZON_YEARS {
            errors.push(ConfigError::new(
                "projection.horizon_years",
                format!("must be <= {MAX_HORIZON_YEARS}"),
            ));
        }

        let c = &self.cleaning;
        if !(c.iqr_multiplier >= 0.0) {
            errors.push(ConfigError::new("cleaning.iqr_multiplier", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&c.replacement_quantile) {
            errors.push(ConfigError::new(
                "cleaning.replacement_quantile",
                "must be in [0.0, 1.0]",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = AnalysisConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_matches_reference_constants() {
        let cfg = AnalysisConfig::baseline();
        assert_eq!(cfg.battery.max_charge_kwh, 12.5);
        assert_eq!(cfg.tariff.electricity_price, 0.17);
        assert_eq!(cfg.projection.initial_investment, -7000.0);
        assert_eq!(cfg.projection.escalation_rate, 0.04);
        assert_eq!(cfg.projection.escalation_step, 0.0025);
        assert_eq!(cfg.projection.discount_rate, 0.06);
        assert_eq!(cfg.projection.horizon_years, 20);
    }

    #[test]
    fn from_preset_unknown() {
        let err = AnalysisConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert_eq!(e.field, "preset");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in AnalysisConfig::PRESETS {
            let cfg = AnalysisConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn legacy_drops_year_zero() {
        let cfg = AnalysisConfig::legacy();
        assert_eq!(cfg.projection.scenario_b_year_zero, YearZero::Drop);
        assert_eq!(cfg.battery, BatteryConfig::default());
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[battery]
max_charge_kwh = 10.0
charge_rule = "discharge"

[tariff]
electricity_price = 0.25

[projection]
initial_investment = -5000.0
escalation_rate = 0.03
escalation_step = 0.001
discount_rate = 0.05
horizon_years = 15
scenario_b_year_zero = "drop"

[cleaning]
iqr_multiplier = 3.0
replacement_quantile = 0.9
"#;
        let cfg = AnalysisConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.battery.charge_rule), Some(ChargeRule::Discharge));
        assert_eq!(cfg.as_ref().map(|c| c.projection.horizon_years), Some(15));
        assert_eq!(
            cfg.as_ref().map(|c| c.projection.scenario_b_year_zero),
            Some(YearZero::Drop)
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
max_charge_kwh = 12.5
bogus_field = true
"#;
        assert!(AnalysisConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn invalid_toml_unknown_rule() {
        let toml = r#"
[battery]
charge_rule = "teleport"
"#;
        assert!(AnalysisConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[tariff]
electricity_price = 0.30
"#;
        let cfg = AnalysisConfig::from_toml_str(toml).expect("partial TOML should parse");
        assert_eq!(cfg.tariff.electricity_price, 0.30);
        assert_eq!(cfg.battery.max_charge_kwh, 12.5);
        assert_eq!(cfg.projection.discount_rate, 0.06);
    }

    #[test]
    fn validation_catches_zero_capacity() {
        let mut cfg = AnalysisConfig::baseline();
        cfg.battery.max_charge_kwh = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.max_charge_kwh"));
    }

    #[test]
    fn validation_catches_discount_rate_of_minus_one() {
        let mut cfg = AnalysisConfig::baseline();
        cfg.projection.discount_rate = -1.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "projection.discount_rate"));
    }

    #[test]
    fn validation_catches_positive_investment() {
        let mut cfg = AnalysisConfig::baseline();
        cfg.projection.initial_investment = 100.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "projection.initial_investment"));
    }

    #[test]
    fn validation_collects_multiple_errors() {
        let mut cfg = AnalysisConfig::baseline();
        cfg.projection.horizon_years = 0;
        cfg.cleaning.replacement_quantile = 1.5;
        cfg.tariff.electricity_price = f64::NAN;
        let errors = cfg.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
    }

    #[test]
    fn validation_rejects_oversized_horizon() {
        let cfg = AnalysisConfig::from_toml_str("[projection]\nhorizon_years = 4294967296\n")
            .expect("large horizon parses");
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert_eq!(errors[0].field, "projection.horizon_years");

        let mut cfg = AnalysisConfig::baseline();
        cfg.projection.horizon_years = MAX_HORIZON_YEARS;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn config_error_display_names_field() {
        let e = ConfigError::new("tariff.electricity_price", "must be >= 0");
        assert_eq!(
            e.to_string(),
            "config error: tariff.electricity_price: must be >= 0"
        );
    }
}
