//! Engine configuration: validation policy and the default form values the
//! front end starts from.
//!
//! Every section is optional in TOML; missing keys fall back to
//! [`EngineConfig::default`], which is itself a valid set of inputs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculators::{InferenceInput, LcaInput, TrainingInput};
use crate::error::{FootprintError, Result};
use crate::guards::InputGuard;
use crate::hardware::{Accelerator, LcaChip};
use crate::presets::{resolve, PresetTarget};
use crate::types::{CalculatorId, ModelType};

/// Which inference field rules apply.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceValidation {
    /// Power, efficiency, intensity, parameters and tokens may be zero.
    #[default]
    Permissive,
    /// Same quantities must be strictly positive, as for training.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LcaDefaults {
    pub chip: LcaChip,
    pub lifespan_years: f64,
    pub utilization_hours_per_day: f64,
    pub carbon_intensity_g_per_kwh: f64,
}

impl Default for LcaDefaults {
    fn default() -> Self {
        LcaDefaults {
            chip: LcaChip::H100,
            lifespan_years: 5.0,
            utilization_hours_per_day: 12.0,
            carbon_intensity_g_per_kwh: 500.0,
        }
    }
}

/// Starting training form. Model fields are overwritten when `preset` names
/// a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingDefaults {
    pub preset: String,
    pub model_type: ModelType,
    pub parameters_b: f64,
    pub base_model_params_b: Option<f64>,
    pub tokens_b: f64,
    pub device_type: Accelerator,
    pub device_count: u32,
    pub hardware_efficiency_pct: f64,
    pub pue: f64,
    /// kg CO2eq per kWh.
    pub co2eq_per_kwh: f64,
    pub gpu_cost_per_hour: f64,
}

impl Default for TrainingDefaults {
    fn default() -> Self {
        TrainingDefaults {
            preset: "GPT3".to_string(),
            model_type: ModelType::Dense,
            parameters_b: 175.0,
            base_model_params_b: None,
            tokens_b: 300.0,
            device_type: Accelerator::V100,
            device_count: 10_000,
            hardware_efficiency_pct: 40.0,
            pue: 1.1,
            co2eq_per_kwh: 0.429,
            gpu_cost_per_hour: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceDefaults {
    pub preset: String,
    pub model_type: ModelType,
    pub parameters_b: f64,
    pub base_model_params_b: Option<f64>,
    pub tokens_t: f64,
    pub device_type: Accelerator,
    pub device_count: u32,
    pub hardware_efficiency_pct: f64,
    pub pue: f64,
    /// g CO2eq per kWh.
    pub co2eq_per_kwh: f64,
}

impl Default for InferenceDefaults {
    fn default() -> Self {
        InferenceDefaults {
            preset: "GPT3".to_string(),
            model_type: ModelType::Dense,
            parameters_b: 175.0,
            base_model_params_b: None,
            tokens_t: 1.0,
            device_type: Accelerator::A100,
            device_count: 8,
            hardware_efficiency_pct: 50.0,
            pue: 1.2,
            co2eq_per_kwh: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub inference_validation: InferenceValidation,
    pub lca: LcaDefaults,
    pub training: TrainingDefaults,
    pub inference: InferenceDefaults,
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `FootprintError::Config` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FootprintError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|e| {
            FootprintError::Config(format!(
                "failed to parse TOML in '{}': {}",
                path.display(),
                e
            ))
        })
    }

    pub fn from_toml_str(toml: &str) -> Result<Self> {
        toml::from_str(toml)
            .map_err(|e| FootprintError::Config(format!("failed to parse TOML: {}", e)))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FootprintError::Config(format!("failed to serialize to TOML: {}", e)))
    }

    /// Check that every default form, after preset application, would pass
    /// its calculator's validation.
    pub fn validate(&self) -> Result<()> {
        InputGuard::validate_lca(&self.lca_input())
            .map_err(|e| FootprintError::Config(format!("[lca] {}", e)))?;

        self.training_input()
            .and_then(|input| InputGuard::validate_training(&input))
            .map_err(|e| FootprintError::Config(format!("[training] {}", e)))?;

        self.inference_input()
            .and_then(|input| InputGuard::validate_inference(&input, self.inference_validation))
            .map_err(|e| FootprintError::Config(format!("[inference] {}", e)))?;

        Ok(())
    }

    pub fn lca_input(&self) -> LcaInput {
        let d = &self.lca;
        LcaInput {
            chip: d.chip,
            lifespan_years: d.lifespan_years,
            utilization_hours_per_day: d.utilization_hours_per_day,
            carbon_intensity_g_per_kwh: d.carbon_intensity_g_per_kwh,
        }
    }

    /// Default training form with the configured preset applied.
    pub fn training_input(&self) -> Result<TrainingInput> {
        let d = &self.training;
        let mut input = TrainingInput {
            model_type: d.model_type,
            parameters_b: d.parameters_b,
            base_model_params_b: d.base_model_params_b,
            tokens_b: d.tokens_b,
            device_type: d.device_type,
            device_count: d.device_count,
            system_power_watts: 0.0,
            hardware_efficiency_pct: d.hardware_efficiency_pct,
            pue: d.pue,
            co2eq_per_kwh: d.co2eq_per_kwh,
            gpu_cost_per_hour: d.gpu_cost_per_hour,
        };
        input.sync_system_power();
        resolve(CalculatorId::Training, &d.preset)?.apply(&mut input);
        Ok(input)
    }

    /// Default inference form with the configured preset applied.
    pub fn inference_input(&self) -> Result<InferenceInput> {
        let d = &self.inference;
        let mut input = InferenceInput {
            model_type: d.model_type,
            parameters_b: d.parameters_b,
            base_model_params_b: d.base_model_params_b,
            tokens_t: d.tokens_t,
            device_type: d.device_type,
            device_count: d.device_count,
            system_power_watts: Accelerator::Custom.spec().system_power_watts,
            hardware_efficiency_pct: d.hardware_efficiency_pct,
            pue: d.pue,
            co2eq_per_kwh: d.co2eq_per_kwh,
        };
        input.sync_system_power();
        resolve(CalculatorId::Inference, &d.preset)?.apply(&mut input);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            inference_validation = "strict"

            [lca]
            chip = "B200"
            lifespan_years = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.inference_validation, InferenceValidation::Strict);
        assert_eq!(config.lca.chip, LcaChip::B200);
        assert_eq!(config.lca.lifespan_years, 3.0);
        assert_eq!(config.lca.utilization_hours_per_day, 12.0);
        assert_eq!(config.training, TrainingDefaults::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_defaults_are_reported_by_section() {
        let mut config = EngineConfig::default();
        config.lca.utilization_hours_per_day = 30.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, FootprintError::Config(msg) if msg.starts_with("[lca]")));
    }

    #[test]
    fn test_unknown_preset_fails_validation() {
        let mut config = EngineConfig::default();
        config.training.preset = "PaLM".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_preset_keeps_configured_model() {
        let mut config = EngineConfig::default();
        config.inference.preset = "custom".to_string();
        config.inference.parameters_b = 70.0;
        config.inference.device_type = Accelerator::H100;
        let input = config.inference_input().unwrap();
        assert_eq!(input.parameters_b, 70.0);
        assert_eq!(input.system_power_watts, 800.0);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("inference_validation = 3"),
            Err(FootprintError::Config(_))
        ));
    }
}
