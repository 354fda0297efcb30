use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};

/// The three estimators the engine exposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorId {
    Lca,
    Training,
    Inference,
}

impl CalculatorId {
    pub fn as_str(self) -> &'static str {
        match self {
            CalculatorId::Lca => "lca",
            CalculatorId::Training => "training",
            CalculatorId::Inference => "inference",
        }
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense models activate every parameter per token; MoE models only a subset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "dense")]
    Dense,
    #[serde(rename = "MoE")]
    MoE,
}

impl ModelType {
    /// Parameters (billions) that drive compute.
    ///
    /// For MoE this is the activated subset; dense models ignore `base_params_b`.
    pub fn active_params_b(self, params_b: f64, base_params_b: Option<f64>) -> f64 {
        match self {
            ModelType::Dense => params_b,
            // validated inputs always carry the base count for MoE
            ModelType::MoE => base_params_b.unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelType::Dense => f.pad("dense"),
            ModelType::MoE => f.pad("MoE"),
        }
    }
}

impl FromStr for ModelType {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(ModelType::Dense),
            "moe" => Ok(ModelType::MoE),
            _ => Err(FootprintError::UnknownReference {
                table: "model type",
                key: s.to_string(),
            }),
        }
    }
}
