#![forbid(unsafe_code)]

use crate::calculators::{InferenceInput, LcaInput, TrainingInput};
use crate::config::InferenceValidation;
use crate::error::{FootprintError, Result};
use crate::types::{CalculatorId, ModelType};

/// Field-level predicates for one calculator. The first failure rejects the
/// whole input.
struct FieldCheck {
    calculator: CalculatorId,
}

impl FieldCheck {
    fn reject(&self, field: &'static str, rule: &'static str) -> FootprintError {
        FootprintError::InvalidInput {
            calculator: self.calculator,
            field,
            rule,
        }
    }

    fn positive(&self, field: &'static str, v: f64) -> Result<()> {
        if v.is_finite() && v > 0.0 {
            Ok(())
        } else {
            Err(self.reject(field, "must be > 0"))
        }
    }

    fn non_negative(&self, field: &'static str, v: f64) -> Result<()> {
        if v.is_finite() && v >= 0.0 {
            Ok(())
        } else {
            Err(self.reject(field, "must be >= 0"))
        }
    }

    fn at_least_one(&self, field: &'static str, v: f64) -> Result<()> {
        if v.is_finite() && v >= 1.0 {
            Ok(())
        } else {
            Err(self.reject(field, "must be >= 1"))
        }
    }

    fn within(&self, field: &'static str, v: f64, lo: f64, hi: f64) -> Result<()> {
        if v.is_finite() && (lo..=hi).contains(&v) {
            Ok(())
        } else {
            Err(self.reject(field, "out of range"))
        }
    }

    /// Base parameter count must be positive for MoE and is ignored for
    /// dense models.
    fn base_params(&self, model_type: ModelType, base: Option<f64>) -> Result<()> {
        match (model_type, base) {
            (ModelType::Dense, _) => Ok(()),
            (ModelType::MoE, Some(v)) => self.positive("base_model_params_b", v),
            (ModelType::MoE, None) => Err(self.reject("base_model_params_b", "required for MoE")),
        }
    }
}

/// InputGuard: gate between parsed form values and the calculators.
pub struct InputGuard;

impl InputGuard {
    pub fn validate_lca(input: &LcaInput) -> Result<()> {
        let f = FieldCheck {
            calculator: CalculatorId::Lca,
        };
        f.positive("lifespan_years", input.lifespan_years)?;
        f.within(
            "utilization_hours_per_day",
            input.utilization_hours_per_day,
            0.0,
            24.0,
        )?;
        f.positive("carbon_intensity_g_per_kwh", input.carbon_intensity_g_per_kwh)?;
        Ok(())
    }

    pub fn validate_training(input: &TrainingInput) -> Result<()> {
        let f = FieldCheck {
            calculator: CalculatorId::Training,
        };
        f.positive("parameters_b", input.parameters_b)?;
        f.base_params(input.model_type, input.base_model_params_b)?;
        f.positive("tokens_b", input.tokens_b)?;
        f.positive("device_count", f64::from(input.device_count))?;
        f.positive("system_power_watts", input.system_power_watts)?;
        f.positive("hardware_efficiency_pct", input.hardware_efficiency_pct)?;
        f.positive("pue", input.pue)?;
        f.positive("co2eq_per_kwh", input.co2eq_per_kwh)?;
        f.positive("gpu_cost_per_hour", input.gpu_cost_per_hour)?;
        Ok(())
    }

    /// Permissive mode keeps the historical `>= 0` rules; strict mode applies
    /// the training rule (`> 0`) to the same quantities. Device count and PUE
    /// are floored at 1 in both, and an MoE base parameter count must be
    /// positive in both.
    pub fn validate_inference(input: &InferenceInput, mode: InferenceValidation) -> Result<()> {
        let f = FieldCheck {
            calculator: CalculatorId::Inference,
        };
        let check: fn(&FieldCheck, &'static str, f64) -> Result<()> = match mode {
            InferenceValidation::Permissive => FieldCheck::non_negative,
            InferenceValidation::Strict => FieldCheck::positive,
        };
        check(&f, "parameters_b", input.parameters_b)?;
        f.base_params(input.model_type, input.base_model_params_b)?;
        check(&f, "tokens_t", input.tokens_t)?;
        f.at_least_one("device_count", f64::from(input.device_count))?;
        check(&f, "system_power_watts", input.system_power_watts)?;
        check(&f, "hardware_efficiency_pct", input.hardware_efficiency_pct)?;
        f.at_least_one("pue", input.pue)?;
        check(&f, "co2eq_per_kwh", input.co2eq_per_kwh)?;
        Ok(())
    }
}
