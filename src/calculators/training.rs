//! Training-run carbon, energy, duration and cost from the 6·N·D estimator.

use serde::{Deserialize, Serialize};

use crate::equivalence::{Emissions, EquivalenceTable, TRAINING_EQUIVALENTS};
use crate::error::Result;
use crate::guards::InputGuard;
use crate::hardware::Accelerator;
use crate::pipeline::Calculator;
use crate::types::{CalculatorId, ModelType};

use super::{
    compute_seconds, effective_tflops, ensure_finite, facility_energy_kwh, SECONDS_PER_DAY,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingInput {
    pub model_type: ModelType,
    pub parameters_b: f64,
    /// Activated parameters per token, billions. Only read for MoE.
    pub base_model_params_b: Option<f64>,
    pub tokens_b: f64,
    pub device_type: Accelerator,
    pub device_count: u32,
    pub system_power_watts: f64,
    pub hardware_efficiency_pct: f64,
    pub pue: f64,
    /// Grid intensity, kg CO2eq per kWh.
    pub co2eq_per_kwh: f64,
    /// USD per device-hour.
    pub gpu_cost_per_hour: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingResult {
    pub active_params_b: f64,
    pub total_flops: f64,
    pub training_seconds: f64,
    pub training_days: f64,
    pub total_energy_kwh: f64,
    pub total_energy_mwh: f64,
    pub operational_co2_t: f64,
    pub training_cost: f64,
}

pub fn compute(input: &TrainingInput) -> Result<TrainingResult> {
    let id = CalculatorId::Training;
    let active_params_b = input
        .model_type
        .active_params_b(input.parameters_b, input.base_model_params_b);

    let total_flops = 6.0 * (active_params_b * 1e9) * (input.tokens_b * 1e9);
    let tflops = effective_tflops(
        input.device_type.spec().peak_tflops,
        input.hardware_efficiency_pct,
    );
    let training_seconds = compute_seconds(total_flops, input.device_count, tflops);
    let training_days = training_seconds / SECONDS_PER_DAY;
    let hours = training_days * 24.0;

    let total_energy_kwh =
        facility_energy_kwh(input.system_power_watts, input.device_count, hours, input.pue);
    // kg -> t
    let operational_co2_t = total_energy_kwh * input.co2eq_per_kwh / 1000.0;
    let training_cost = hours * f64::from(input.device_count) * input.gpu_cost_per_hour;

    Ok(TrainingResult {
        active_params_b,
        total_flops,
        training_seconds,
        training_days: ensure_finite(id, "training days", training_days)?,
        total_energy_kwh,
        total_energy_mwh: total_energy_kwh / 1000.0,
        operational_co2_t: ensure_finite(id, "operational CO2", operational_co2_t)?,
        training_cost: ensure_finite(id, "training cost", training_cost)?,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingCalculator;

impl Calculator for TrainingCalculator {
    type Input = TrainingInput;
    type Output = TrainingResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::Training
    }

    fn validate(&self, input: &TrainingInput) -> Result<()> {
        InputGuard::validate_training(input)
    }

    fn compute(&self, input: &TrainingInput) -> Result<TrainingResult> {
        compute(input)
    }

    fn emissions(&self, output: &TrainingResult) -> Emissions {
        Emissions::tonnes(output.operational_co2_t)
    }

    fn equivalence_table(&self) -> &'static EquivalenceTable {
        &TRAINING_EQUIVALENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpt3() -> TrainingInput {
        TrainingInput {
            model_type: ModelType::Dense,
            parameters_b: 175.0,
            base_model_params_b: None,
            tokens_b: 300.0,
            device_type: Accelerator::V100,
            device_count: 10_000,
            system_power_watts: 330.0,
            hardware_efficiency_pct: 40.0,
            pue: 1.1,
            co2eq_per_kwh: 0.429,
            gpu_cost_per_hour: 2.0,
        }
    }

    fn rel_eq(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-9
    }

    #[test]
    fn test_gpt3_flops_and_duration() {
        let r = compute(&gpt3()).unwrap();
        assert!(rel_eq(r.total_flops, 3.15e23));
        let expected_seconds = 3.15e23 / (10_000.0 * 125e12 * 0.40);
        assert!(rel_eq(r.training_seconds, expected_seconds));
        assert!(rel_eq(r.training_days, expected_seconds / 86_400.0));
    }

    #[test]
    fn test_gpt3_energy_carbon_cost() {
        let r = compute(&gpt3()).unwrap();
        let hours = r.training_days * 24.0;
        let kwh = 330.0 * 10_000.0 / 1000.0 * hours * 1.1;
        assert!(rel_eq(r.total_energy_kwh, kwh));
        assert!(rel_eq(r.total_energy_mwh, kwh / 1000.0));
        assert!(rel_eq(r.operational_co2_t, kwh * 0.429 / 1000.0));
        assert!(rel_eq(r.training_cost, hours * 10_000.0 * 2.0));
    }

    #[test]
    fn test_moe_uses_base_params() {
        let moe = TrainingInput {
            model_type: ModelType::MoE,
            parameters_b: 1800.0,
            base_model_params_b: Some(111.0),
            ..gpt3()
        };
        let r = compute(&moe).unwrap();
        assert_eq!(r.active_params_b, 111.0);
        assert!(rel_eq(r.total_flops, 6.0 * 111e9 * 300e9));
    }

    #[test]
    fn test_dense_ignores_base_params() {
        let a = compute(&gpt3()).unwrap();
        let b = compute(&TrainingInput {
            base_model_params_b: Some(7.0),
            ..gpt3()
        })
        .unwrap();
        assert_eq!(a, b);
    }
}
