//! Named model presets and the custom sentinel.
//!
//! Applying a named preset overwrites the model-dependent fields of an input
//! (model type, parameter counts, token volume, device, device count and
//! system power). [`Preset::Custom`] leaves every field as the user last
//! entered it.

use serde::Serialize;
use tracing::info;

use crate::calculators::{InferenceInput, TrainingInput};
use crate::error::{FootprintError, Result};
use crate::hardware::Accelerator;
use crate::types::{CalculatorId, ModelType};

pub const CUSTOM_KEY: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPreset {
    pub id: &'static str,
    pub display_name: &'static str,
    pub model_type: ModelType,
    pub parameters_b: f64,
    /// Present iff `model_type` is MoE.
    pub base_model_params_b: Option<f64>,
    /// Token volume in the calculator's own scale (billions for training).
    /// Inference presets leave tokens to the user.
    pub tokens: Option<f64>,
    /// Device id as listed in the compute hardware table.
    pub device_id: &'static str,
    pub device_count: u32,
}

impl ModelPreset {
    /// Device the preset runs on; ids outside the table map to the custom row.
    pub fn device(&self) -> Accelerator {
        Accelerator::lookup_or_custom(self.device_id)
    }

    pub fn system_power_watts(&self) -> f64 {
        self.device().spec().system_power_watts
    }
}

static TRAINING_PRESETS: [ModelPreset; 2] = [
    ModelPreset {
        id: "GPT3",
        display_name: "GPT-3 (175B)",
        model_type: ModelType::Dense,
        parameters_b: 175.0,
        base_model_params_b: None,
        tokens: Some(300.0),
        device_id: "V100",
        device_count: 10_000,
    },
    ModelPreset {
        id: "GPT4",
        display_name: "GPT-4 (1.8T)",
        model_type: ModelType::MoE,
        parameters_b: 1800.0,
        base_model_params_b: Some(111.0),
        tokens: Some(13_000.0),
        device_id: "A100",
        device_count: 25_000,
    },
];

static INFERENCE_PRESETS: [ModelPreset; 2] = [
    ModelPreset {
        id: "GPT3",
        display_name: "GPT-3 (175B)",
        model_type: ModelType::Dense,
        parameters_b: 175.0,
        base_model_params_b: None,
        tokens: None,
        device_id: "A100",
        device_count: 8,
    },
    ModelPreset {
        id: "GPT4",
        display_name: "GPT-4 (1.8T)",
        model_type: ModelType::MoE,
        parameters_b: 1800.0,
        base_model_params_b: Some(111.0),
        tokens: None,
        device_id: "A100",
        device_count: 16,
    },
];

/// Named presets available for a calculator, in display order.
pub fn presets(calculator: CalculatorId) -> &'static [ModelPreset] {
    match calculator {
        CalculatorId::Lca => &[],
        CalculatorId::Training => &TRAINING_PRESETS,
        CalculatorId::Inference => &INFERENCE_PRESETS,
    }
}

/// Either auto-fill from a named preset, or leave the form alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    Custom,
    Named(&'static ModelPreset),
}

/// Which form fields a selected preset makes read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FieldLocks {
    /// Model type and parameter counts.
    pub model: bool,
    /// Token volume; only locked when the preset supplies one.
    pub tokens: bool,
}

impl Preset {
    pub fn locked_fields(&self) -> FieldLocks {
        match self {
            Preset::Custom => FieldLocks::default(),
            Preset::Named(p) => FieldLocks {
                model: true,
                tokens: p.tokens.is_some(),
            },
        }
    }

    pub fn apply<T: PresetTarget>(&self, target: &mut T) {
        match self {
            Preset::Custom => {}
            Preset::Named(preset) => {
                info!(preset = preset.id, "applying model preset");
                target.apply_preset(preset);
            }
        }
    }
}

/// Look up a preset key. Unknown keys are a configuration error.
pub fn resolve(calculator: CalculatorId, key: &str) -> Result<Preset> {
    if key.eq_ignore_ascii_case(CUSTOM_KEY) {
        return Ok(Preset::Custom);
    }
    presets(calculator)
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(key))
        .map(Preset::Named)
        .ok_or_else(|| FootprintError::UnknownReference {
            table: "model presets",
            key: key.to_string(),
        })
}

/// An input record a preset can fill in.
pub trait PresetTarget {
    fn apply_preset(&mut self, preset: &ModelPreset);

    /// Re-derive system power after the device changed.
    fn sync_system_power(&mut self);
}

impl PresetTarget for TrainingInput {
    fn apply_preset(&mut self, preset: &ModelPreset) {
        self.model_type = preset.model_type;
        self.parameters_b = preset.parameters_b;
        self.base_model_params_b = match preset.model_type {
            ModelType::MoE => preset.base_model_params_b,
            ModelType::Dense => None,
        };
        if let Some(tokens) = preset.tokens {
            self.tokens_b = tokens;
        }
        self.device_type = preset.device();
        self.device_count = preset.device_count;
        self.system_power_watts = preset.system_power_watts();
    }

    fn sync_system_power(&mut self) {
        self.system_power_watts = self.device_type.spec().system_power_watts;
    }
}

impl PresetTarget for InferenceInput {
    fn apply_preset(&mut self, preset: &ModelPreset) {
        self.model_type = preset.model_type;
        self.parameters_b = preset.parameters_b;
        self.base_model_params_b = match preset.model_type {
            ModelType::MoE => preset.base_model_params_b,
            ModelType::Dense => None,
        };
        if let Some(tokens) = preset.tokens {
            self.tokens_t = tokens;
        }
        self.device_type = preset.device();
        self.device_count = preset.device_count;
        self.system_power_watts = preset.system_power_watts();
    }

    /// A custom device keeps whatever power the user typed.
    fn sync_system_power(&mut self) {
        if self.device_type != Accelerator::Custom {
            self.system_power_watts = self.device_type.spec().system_power_watts;
        }
    }
}
