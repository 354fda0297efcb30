//! Everyday-equivalent comparisons for an emissions total.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FootprintError, Result};

/// Mass unit of an emissions figure. Tables and quantities must agree.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    TonnesCo2e,
    GramsCo2e,
}

impl MassUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::TonnesCo2e => "tCO2eq",
            MassUnit::GramsCo2e => "gCO2eq",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An emissions quantity tagged with its unit.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Emissions {
    pub value: f64,
    pub unit: MassUnit,
}

impl Emissions {
    pub fn tonnes(value: f64) -> Self {
        Emissions {
            value,
            unit: MassUnit::TonnesCo2e,
        }
    }

    pub fn grams(value: f64) -> Self {
        Emissions {
            value,
            unit: MassUnit::GramsCo2e,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalenceUnit {
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
    /// Emissions of one unit of the activity, in the owning table's unit.
    pub per_unit_emissions: f64,
}

/// Ordered comparison units sharing one mass unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalenceTable {
    pub name: &'static str,
    pub unit: MassUnit,
    pub units: &'static [EquivalenceUnit],
}

static TONNE_SCALE_UNITS: [EquivalenceUnit; 4] = [
    EquivalenceUnit {
        key: "flight",
        display_name: "Taipei-Tokyo round-trip flights",
        icon: "✈️",
        tooltip: "Emissions of one round-trip flight between Taipei and Tokyo.",
        per_unit_emissions: 0.4,
    },
    EquivalenceUnit {
        key: "car",
        display_name: "car-years of driving",
        icon: "🚗",
        tooltip: "Average emissions of a family car driven for one year.",
        per_unit_emissions: 1.9,
    },
    EquivalenceUnit {
        key: "tree",
        display_name: "tree-years of absorption",
        icon: "🌳",
        tooltip: "CO2 one tree absorbs in a year.",
        per_unit_emissions: 0.012,
    },
    EquivalenceUnit {
        key: "bento",
        display_name: "pork-chop bento meals",
        icon: "🍱",
        tooltip: "Emissions of one pork-chop bento from production to consumption.",
        per_unit_emissions: 0.0015,
    },
];

static GRAM_SCALE_UNITS: [EquivalenceUnit; 4] = [
    EquivalenceUnit {
        key: "sms",
        display_name: "text messages",
        icon: "💬",
        tooltip: "Average emissions of one text message.",
        per_unit_emissions: 0.014,
    },
    EquivalenceUnit {
        key: "google_search",
        display_name: "web searches",
        icon: "🔍",
        tooltip: "Average emissions of one web search.",
        per_unit_emissions: 0.2,
    },
    EquivalenceUnit {
        key: "youtube_stream",
        display_name: "hours of video streaming",
        icon: "▶️",
        tooltip: "Average emissions of streaming video for one hour.",
        per_unit_emissions: 10.0,
    },
    EquivalenceUnit {
        key: "video_conference",
        display_name: "hours of video conferencing",
        icon: "💻",
        tooltip: "Average emissions of a one-hour video call.",
        per_unit_emissions: 12.0,
    },
];

pub static LCA_EQUIVALENTS: EquivalenceTable = EquivalenceTable {
    name: "lca",
    unit: MassUnit::TonnesCo2e,
    units: &TONNE_SCALE_UNITS,
};

pub static TRAINING_EQUIVALENTS: EquivalenceTable = EquivalenceTable {
    name: "training",
    unit: MassUnit::TonnesCo2e,
    units: &TONNE_SCALE_UNITS,
};

pub static INFERENCE_EQUIVALENTS: EquivalenceTable = EquivalenceTable {
    name: "inference",
    unit: MassUnit::GramsCo2e,
    units: &GRAM_SCALE_UNITS,
};

/// One rendered comparison: `multiple` units of the activity match the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalenceRow {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub per_unit_emissions: f64,
    pub unit: MassUnit,
    pub multiple: f64,
}

/// Express `total` as multiples of each unit in `table`, in table order.
pub fn project(total: Emissions, table: &EquivalenceTable) -> Result<Vec<EquivalenceRow>> {
    if total.unit != table.unit {
        return Err(FootprintError::UnitMismatch {
            expected: total.unit.symbol(),
            found: table.unit.symbol(),
        });
    }

    debug!(table = table.name, total = total.value, unit = %total.unit, "projecting equivalences");

    Ok(table
        .units
        .iter()
        .map(|u| EquivalenceRow {
            key: u.key,
            label: u.display_name,
            icon: u.icon,
            tooltip: u.tooltip,
            per_unit_emissions: u.per_unit_emissions,
            unit: table.unit,
            multiple: total.value / u.per_unit_emissions,
        })
        .collect())
}
