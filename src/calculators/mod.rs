pub mod inference;
pub mod lca;
pub mod training;

pub use inference::{InferenceCalculator, InferenceInput, InferenceResult};
pub use lca::{CompositionSlice, LcaCalculator, LcaInput, LcaResult};
pub use training::{TrainingCalculator, TrainingInput, TrainingResult};

use crate::error::{FootprintError, Result};
use crate::types::CalculatorId;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;
pub(crate) const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Sustained device throughput in TFLOP/s at the given utilisation percentage.
pub(crate) fn effective_tflops(peak_tflops: f64, hardware_efficiency_pct: f64) -> f64 {
    peak_tflops * (hardware_efficiency_pct / 100.0)
}

/// Seconds for `device_count` devices to execute `total_flops`.
pub(crate) fn compute_seconds(total_flops: f64, device_count: u32, effective_tflops: f64) -> f64 {
    total_flops / (f64::from(device_count) * effective_tflops * 1e12)
}

/// Facility energy in kWh for a fleet drawing `system_power_watts` per device.
pub(crate) fn facility_energy_kwh(
    system_power_watts: f64,
    device_count: u32,
    hours: f64,
    pue: f64,
) -> f64 {
    (system_power_watts * f64::from(device_count) / 1000.0) * hours * pue
}

pub(crate) fn ensure_finite(
    calculator: CalculatorId,
    quantity: &'static str,
    value: f64,
) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FootprintError::NonFiniteResult {
            calculator,
            quantity,
        })
    }
}
