#![forbid(unsafe_code)]

//! Environmental footprint estimates for AI workloads.
//!
//! Three calculators share one pipeline ([`pipeline::run`]):
//!
//! - [`LcaCalculator`]: life-cycle carbon, water and e-waste of one accelerator.
//! - [`TrainingCalculator`]: carbon, energy, duration and cost of a training run.
//! - [`InferenceCalculator`]: carbon, energy and latency of an inference workload.
//!
//! Each run validates its input, evaluates a closed-form estimate and
//! expresses the emissions total as everyday equivalents. LCA and training
//! report tonnes CO2eq; inference reports grams.

pub mod calculators;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod format;
pub mod guards;
pub mod hardware;
pub mod pipeline;
pub mod presets;
pub mod types;

pub use calculators::{
    CompositionSlice, InferenceCalculator, InferenceInput, InferenceResult, LcaCalculator,
    LcaInput, LcaResult, TrainingCalculator, TrainingInput, TrainingResult,
};
pub use config::{EngineConfig, InferenceValidation};
pub use equivalence::{
    project, Emissions, EquivalenceRow, EquivalenceTable, EquivalenceUnit, MassUnit,
    INFERENCE_EQUIVALENTS, LCA_EQUIVALENTS, TRAINING_EQUIVALENTS,
};
pub use error::{FootprintError, Result};
pub use guards::InputGuard;
pub use hardware::{Accelerator, ComputeHardwareSpec, LcaChip, LcaHardwareSpec};
pub use pipeline::{run, Calculator, Report};
pub use presets::{resolve, FieldLocks, ModelPreset, Preset, PresetTarget};
pub use types::{CalculatorId, ModelType};
