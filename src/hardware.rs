//! Static accelerator reference tables.
//!
//! Two shapes live here: the life-cycle table keyed by [`LcaChip`] (board
//! power, cradle-to-gate mass, water and e-waste figures) and the compute
//! table keyed by [`Accelerator`] (peak throughput and system power) that
//! the training and inference calculators share.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FootprintError, Result};

/// Accelerators with published life-cycle figures.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LcaChip {
    A100,
    H100,
    B200,
    B300,
}

/// Life-cycle reference row for one accelerator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LcaHardwareSpec {
    pub chip: LcaChip,
    pub system_power_watts: f64,
    /// Cradle-to-gate embodied emissions, kg CO2eq.
    pub embodied_mass_kg: f64,
    /// Published annual water use range `[min, max]`, litres.
    pub water_liters_per_year: [f64; 2],
    pub e_waste_kg: f64,
}

impl LcaHardwareSpec {
    /// Midpoint of the published annual water range.
    pub fn mean_annual_water_liters(&self) -> f64 {
        (self.water_liters_per_year[0] + self.water_liters_per_year[1]) / 2.0
    }
}

static LCA_HARDWARE: [LcaHardwareSpec; 4] = [
    LcaHardwareSpec {
        chip: LcaChip::A100,
        system_power_watts: 400.0,
        embodied_mass_kg: 120.0,
        water_liters_per_year: [1000.0, 6000.0],
        e_waste_kg: 2.5,
    },
    LcaHardwareSpec {
        chip: LcaChip::H100,
        system_power_watts: 700.0,
        embodied_mass_kg: 164.0,
        water_liters_per_year: [2000.0, 8000.0],
        e_waste_kg: 3.0,
    },
    LcaHardwareSpec {
        chip: LcaChip::B200,
        system_power_watts: 1100.0,
        embodied_mass_kg: 284.0,
        water_liters_per_year: [3500.0, 10000.0],
        e_waste_kg: 2.5,
    },
    LcaHardwareSpec {
        chip: LcaChip::B300,
        system_power_watts: 1300.0,
        embodied_mass_kg: 300.0,
        water_liters_per_year: [3500.0, 15000.0],
        e_waste_kg: 3.5,
    },
];

impl LcaChip {
    pub const ALL: [LcaChip; 4] = [LcaChip::A100, LcaChip::H100, LcaChip::B200, LcaChip::B300];

    pub fn spec(self) -> &'static LcaHardwareSpec {
        match self {
            LcaChip::A100 => &LCA_HARDWARE[0],
            LcaChip::H100 => &LCA_HARDWARE[1],
            LcaChip::B200 => &LCA_HARDWARE[2],
            LcaChip::B300 => &LCA_HARDWARE[3],
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            LcaChip::A100 => "A100",
            LcaChip::H100 => "H100",
            LcaChip::B200 => "B200",
            LcaChip::B300 => "B300",
        }
    }
}

impl fmt::Display for LcaChip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for LcaChip {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        LcaChip::ALL
            .into_iter()
            .find(|chip| chip.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| FootprintError::UnknownReference {
                table: "lca hardware",
                key: s.to_string(),
            })
    }
}

/// Devices the training and inference calculators know throughput for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Accelerator {
    V100,
    A100,
    H100,
    #[serde(rename = "TPUv3")]
    TpuV3,
    #[serde(rename = "TPUv4")]
    TpuV4,
    /// Fallback row for devices outside the table.
    #[serde(rename = "custom")]
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComputeHardwareSpec {
    pub accelerator: Accelerator,
    pub peak_tflops: f64,
    pub system_power_watts: f64,
}

static COMPUTE_HARDWARE: [ComputeHardwareSpec; 6] = [
    ComputeHardwareSpec {
        accelerator: Accelerator::V100,
        peak_tflops: 125.0,
        system_power_watts: 330.0,
    },
    ComputeHardwareSpec {
        accelerator: Accelerator::A100,
        peak_tflops: 312.0,
        system_power_watts: 550.0,
    },
    ComputeHardwareSpec {
        accelerator: Accelerator::H100,
        peak_tflops: 1979.0,
        system_power_watts: 800.0,
    },
    ComputeHardwareSpec {
        accelerator: Accelerator::TpuV3,
        peak_tflops: 123.0,
        system_power_watts: 288.0,
    },
    ComputeHardwareSpec {
        accelerator: Accelerator::TpuV4,
        peak_tflops: 275.0,
        system_power_watts: 250.0,
    },
    ComputeHardwareSpec {
        accelerator: Accelerator::Custom,
        peak_tflops: 125.0,
        system_power_watts: 330.0,
    },
];

impl Accelerator {
    pub const ALL: [Accelerator; 6] = [
        Accelerator::V100,
        Accelerator::A100,
        Accelerator::H100,
        Accelerator::TpuV3,
        Accelerator::TpuV4,
        Accelerator::Custom,
    ];

    pub fn spec(self) -> &'static ComputeHardwareSpec {
        match self {
            Accelerator::V100 => &COMPUTE_HARDWARE[0],
            Accelerator::A100 => &COMPUTE_HARDWARE[1],
            Accelerator::H100 => &COMPUTE_HARDWARE[2],
            Accelerator::TpuV3 => &COMPUTE_HARDWARE[3],
            Accelerator::TpuV4 => &COMPUTE_HARDWARE[4],
            Accelerator::Custom => &COMPUTE_HARDWARE[5],
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Accelerator::V100 => "V100",
            Accelerator::A100 => "A100",
            Accelerator::H100 => "H100",
            Accelerator::TpuV3 => "TPUv3",
            Accelerator::TpuV4 => "TPUv4",
            Accelerator::Custom => "custom",
        }
    }

    /// Resolve a device id, falling back to the custom row when unrecognized.
    pub fn lookup_or_custom(id: &str) -> Accelerator {
        id.parse().unwrap_or(Accelerator::Custom)
    }
}

impl fmt::Display for Accelerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Accelerator {
    type Err = FootprintError;

    fn from_str(s: &str) -> Result<Self> {
        Accelerator::ALL
            .into_iter()
            .find(|acc| acc.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| FootprintError::UnknownReference {
                table: "compute hardware",
                key: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lca_table_keys_match_rows() {
        for chip in LcaChip::ALL {
            assert_eq!(chip.spec().chip, chip);
        }
    }

    #[test]
    fn test_compute_table_keys_match_rows() {
        for acc in Accelerator::ALL {
            assert_eq!(acc.spec().accelerator, acc);
        }
    }

    #[test]
    fn test_h100_water_midpoint() {
        assert_eq!(LcaChip::H100.spec().mean_annual_water_liters(), 5000.0);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("tpuv4".parse::<Accelerator>().unwrap(), Accelerator::TpuV4);
        assert_eq!("B300".parse::<LcaChip>().unwrap(), LcaChip::B300);
        assert!(matches!(
            "V100".parse::<LcaChip>(),
            Err(FootprintError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_unknown_device_falls_back_to_custom() {
        let acc = Accelerator::lookup_or_custom("MI300X");
        assert_eq!(acc, Accelerator::Custom);
        assert_eq!(acc.spec().system_power_watts, 330.0);
    }
}
