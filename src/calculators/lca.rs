//! Hardware life-cycle assessment: operational plus embodied carbon, water
//! and e-waste for one accelerator over its service life.

use serde::{Deserialize, Serialize};

use crate::equivalence::{Emissions, EquivalenceTable, LCA_EQUIVALENTS};
use crate::error::Result;
use crate::guards::InputGuard;
use crate::hardware::LcaChip;
use crate::pipeline::Calculator;
use crate::types::CalculatorId;

use super::ensure_finite;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LcaInput {
    pub chip: LcaChip,
    pub lifespan_years: f64,
    pub utilization_hours_per_day: f64,
    /// Grid carbon intensity, g CO2eq per kWh.
    pub carbon_intensity_g_per_kwh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LcaResult {
    pub total_hours: f64,
    pub total_energy_kwh: f64,
    pub total_co2_t: f64,
    pub operational_co2_t: f64,
    pub embodied_co2_t: f64,
    pub total_water_liters: f64,
    pub e_waste_kg: f64,
}

/// One slice of the operational/embodied composition chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompositionSlice {
    pub label: &'static str,
    pub value_t: f64,
    /// Fraction of the total in [0, 1]; 0 when the total is 0.
    pub share: f64,
}

impl LcaResult {
    pub fn composition(&self) -> [CompositionSlice; 2] {
        let share = |v: f64| {
            if self.total_co2_t > 0.0 {
                v / self.total_co2_t
            } else {
                0.0
            }
        };
        [
            CompositionSlice {
                label: "Operational",
                value_t: self.operational_co2_t,
                share: share(self.operational_co2_t),
            },
            CompositionSlice {
                label: "Embodied",
                value_t: self.embodied_co2_t,
                share: share(self.embodied_co2_t),
            },
        ]
    }
}

pub fn compute(input: &LcaInput) -> Result<LcaResult> {
    let spec = input.chip.spec();

    let total_hours = input.lifespan_years * 365.0 * input.utilization_hours_per_day;
    let total_energy_kwh = spec.system_power_watts * total_hours / 1000.0;
    // g -> kg -> t
    let operational_co2_t = total_energy_kwh * input.carbon_intensity_g_per_kwh / 1e6;
    let embodied_co2_t = spec.embodied_mass_kg / 1000.0;
    let total_co2_t = operational_co2_t + embodied_co2_t;
    let total_water_liters = spec.mean_annual_water_liters() * input.lifespan_years;

    Ok(LcaResult {
        total_hours,
        total_energy_kwh,
        total_co2_t: ensure_finite(CalculatorId::Lca, "total CO2", total_co2_t)?,
        operational_co2_t,
        embodied_co2_t,
        total_water_liters: ensure_finite(CalculatorId::Lca, "water", total_water_liters)?,
        e_waste_kg: spec.e_waste_kg,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LcaCalculator;

impl Calculator for LcaCalculator {
    type Input = LcaInput;
    type Output = LcaResult;

    fn id(&self) -> CalculatorId {
        CalculatorId::Lca
    }

    fn validate(&self, input: &LcaInput) -> Result<()> {
        InputGuard::validate_lca(input)
    }

    fn compute(&self, input: &LcaInput) -> Result<LcaResult> {
        compute(input)
    }

    fn emissions(&self, output: &LcaResult) -> Emissions {
        Emissions::tonnes(output.total_co2_t)
    }

    fn equivalence_table(&self) -> &'static EquivalenceTable {
        &LCA_EQUIVALENTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h100_five_years() -> LcaInput {
        LcaInput {
            chip: LcaChip::H100,
            lifespan_years: 5.0,
            utilization_hours_per_day: 12.0,
            carbon_intensity_g_per_kwh: 500.0,
        }
    }

    #[test]
    fn test_h100_scenario() {
        let r = compute(&h100_five_years()).unwrap();
        assert_eq!(r.total_hours, 21_900.0);
        assert_eq!(r.total_energy_kwh, 15_330.0);
        assert!((r.operational_co2_t - 7.665).abs() < 1e-9);
        assert!((r.embodied_co2_t - 0.164).abs() < 1e-12);
        assert!((r.total_co2_t - 7.829).abs() < 1e-9);
        assert_eq!(r.total_water_liters, 25_000.0);
        assert_eq!(r.e_waste_kg, 3.0);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let r = compute(&h100_five_years()).unwrap();
        assert_eq!(r.total_co2_t, r.operational_co2_t + r.embodied_co2_t);
    }

    #[test]
    fn test_zero_utilization_leaves_embodied_only() {
        let input = LcaInput {
            utilization_hours_per_day: 0.0,
            ..h100_five_years()
        };
        let r = compute(&input).unwrap();
        assert_eq!(r.operational_co2_t, 0.0);
        assert_eq!(r.total_co2_t, r.embodied_co2_t);
        // water scales with lifespan only
        assert_eq!(r.total_water_liters, 25_000.0);
    }

    #[test]
    fn test_composition_shares_sum_to_one() {
        let r = compute(&h100_five_years()).unwrap();
        let [op, emb] = r.composition();
        assert_eq!(op.label, "Operational");
        assert_eq!(emb.label, "Embodied");
        assert!((op.share + emb.share - 1.0).abs() < 1e-12);
        assert_eq!(op.value_t, r.operational_co2_t);
    }
}
