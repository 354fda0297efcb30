//! Inference carbon, latency and energy from the 2·N·D estimator.
//!
//! Token volume is given in trillions, so `2 · N[B] · D[T]` is already a
//! zettaFLOP count. Emissions come out in grams, three orders of magnitude
//! below the other calculators.

use serde::{Deserialize, Serialize};

use crate::config::InferenceValidation;
use crate::equivalence::{Emissions, EquivalenceTable, INFERENCE_EQUIVALENTS};
use crate::error::Result;
use crate::guards::InputGuard;
use crate::hardware::Accelerator;
use crate::pipeline::Calculator;
use crate::types::{CalculatorId, ModelType};

use super::{
    compute_seconds, effective_tflops, ensure_finite, facility_energy_kwh, SECONDS_PER_HOUR,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceInput {
    pub model_type: ModelType,
    pub parameters_b: f64,
    pub base_model_params_b: Option<f64>,
    pub tokens_t: f64,
    pub device_type: Accelerator,
    pub device_count: u32,
    pub system_power_watts: f64,
    pub hardware_efficiency_pct: f64,
    pub pue: f64,
    /// g CO2eq per kWh.
    pub co2eq_per_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceResult {
    pub active_params_b: f64,
    pub total_zetta_flops: f64,
    pub total_flops: f64,
    pub inference_seconds: f64,
    pub total_energy_kwh: f64,
    pub total_co2_g: f64,
}

pub fn compute(input: &InferenceInput) -> Result<InferenceResult> {
    let id = CalculatorId::Inference;
    let active_params_b = input
        .model_type
        .active_params_b(input.parameters_b, input.base_model_params_b);

    let total_zetta_flops = 2.0 * active_params_b * input.tokens_t;
    let total_flops = total_zetta_flops * 1e21;
    let tflops = effective_tflops(
        input.device_type.spec().peak_tflops,
        input.hardware_efficiency_pct,
    );
    let inference_seconds = compute_seconds(total_flops, input.device_count, tflops);
    let total_energy_kwh = facility_energy_kwh(
        input.system_power_watts,
        input.device_count,
        inference_seconds / SECONDS_PER_HOUR,
        input.pue,
    );
    let total_co2_g = total_energy_kwh * input.co2eq_per_kwh;

    Ok(InferenceResult {
        active_params_b,
        total_zetta_flops,
        total_flops,
        inference_seconds: ensure_finite(id, "inference time", inference_seconds)?,
        total_energy_kwh: ensure_finite(id, "energy", total_energy_kwh)?,
        total_co2_g: ensure_finite(id, "total CO2", total_co2_g)?,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceCalculator {
    pub validation: InferenceValidation,
}

impl InferenceCalculator {
    pub fn new(validation: InferenceValidation) -> Self {
        InferenceCalculator { validation }
    }
}

impl Calculator for InferenceCalculator {
    type Input = InferenceInput;
    type Output = InferenceResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::Inference
    }

    fn validate(&self, input: &InferenceInput) -> Result<()> {
        InputGuard::validate_inference(input, self.validation)
    }

    fn compute(&self, input: &InferenceInput) -> Result<InferenceResult> {
        compute(input)
    }

    fn emissions(&self, output: &InferenceResult) -> Emissions {
        Emissions::grams(output.total_co2_g)
    }

    fn equivalence_table(&self) -> &'static EquivalenceTable {
        &INFERENCE_EQUIVALENTS
    }
}
