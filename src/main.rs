use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use ai_footprint::format;
use ai_footprint::presets::{self, Preset, PresetTarget};
use ai_footprint::{
    resolve, run, Accelerator, CalculatorId, EngineConfig, InferenceCalculator, LcaCalculator,
    LcaChip, ModelType, Report, TrainingCalculator,
};

/// Carbon, water, e-waste, time and cost estimates for AI hardware and workloads
#[derive(Parser)]
#[command(name = "ai-footprint")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML file with default form values and validation policy
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Life-cycle footprint of one accelerator
    Lca {
        #[arg(long)]
        chip: Option<LcaChip>,
        #[arg(long)]
        lifespan_years: Option<f64>,
        #[arg(long)]
        utilization_hours_per_day: Option<f64>,
        /// gCO2eq per kWh
        #[arg(long)]
        carbon_intensity: Option<f64>,
    },
    /// Carbon, energy, duration and cost of a training run
    Training {
        #[command(flatten)]
        model: ModelArgs,
        /// Training tokens, billions
        #[arg(long)]
        tokens_b: Option<f64>,
        /// kgCO2eq per kWh
        #[arg(long)]
        co2eq_per_kwh: Option<f64>,
        /// USD per device-hour
        #[arg(long)]
        gpu_cost_per_hour: Option<f64>,
    },
    /// Carbon, energy and latency of an inference workload
    Inference {
        #[command(flatten)]
        model: ModelArgs,
        /// Processed tokens, trillions
        #[arg(long)]
        tokens_t: Option<f64>,
        /// gCO2eq per kWh
        #[arg(long)]
        co2eq_per_kwh: Option<f64>,
    },
    /// List model presets and hardware tables
    Presets,
}

/// Fields shared by the training and inference forms.
#[derive(Args)]
struct ModelArgs {
    /// Model preset key (GPT3, GPT4, custom)
    #[arg(long)]
    preset: Option<String>,
    #[arg(long)]
    model_type: Option<ModelType>,
    #[arg(long)]
    parameters_b: Option<f64>,
    /// Activated parameters for MoE models, billions
    #[arg(long)]
    base_model_params_b: Option<f64>,
    #[arg(long)]
    device: Option<Accelerator>,
    #[arg(long)]
    device_count: Option<u32>,
    /// Per-device system power; defaults to the device's table value
    #[arg(long)]
    system_power_watts: Option<f64>,
    #[arg(long)]
    hardware_efficiency_pct: Option<f64>,
    #[arg(long)]
    pue: Option<f64>,
}

/// Overlay command-line values on a form the way a user edits fields:
/// preset first, then device (which re-derives power), then explicit values.
macro_rules! overlay_model_args {
    ($calc:expr, $input:ident, $args:expr) => {{
        let args = $args;
        if let Some(key) = &args.preset {
            resolve($calc, key)?.apply(&mut $input);
        }
        if let Some(device) = args.device {
            $input.device_type = device;
            $input.sync_system_power();
        }
        if let Some(v) = args.model_type {
            $input.model_type = v;
        }
        if let Some(v) = args.parameters_b {
            $input.parameters_b = v;
        }
        if args.base_model_params_b.is_some() {
            $input.base_model_params_b = args.base_model_params_b;
        }
        if let Some(v) = args.device_count {
            $input.device_count = v;
        }
        if let Some(v) = args.system_power_watts {
            $input.system_power_watts = v;
        }
        if let Some(v) = args.hardware_efficiency_pct {
            $input.hardware_efficiency_pct = v;
        }
        if let Some(v) = args.pue {
            $input.pue = v;
        }
    }};
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "calculation failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            config.validate()?;
            config
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Lca {
            chip,
            lifespan_years,
            utilization_hours_per_day,
            carbon_intensity,
        } => {
            let mut input = config.lca_input();
            if let Some(v) = chip {
                input.chip = v;
            }
            if let Some(v) = lifespan_years {
                input.lifespan_years = v;
            }
            if let Some(v) = utilization_hours_per_day {
                input.utilization_hours_per_day = v;
            }
            if let Some(v) = carbon_intensity {
                input.carbon_intensity_g_per_kwh = v;
            }

            let report = run(&LcaCalculator, &input)?;
            if cli.json {
                return print_json(&report);
            }
            let r = &report.result;
            println!("Accelerator:        {}", input.chip);
            println!("Total carbon:       {}", format::quantity(r.total_co2_t, "tCO2eq"));
            for slice in r.composition() {
                println!(
                    "  {:<17} {} ({:.1}%)",
                    format!("{}:", slice.label),
                    format::quantity(slice.value_t, "tCO2eq"),
                    slice.share * 100.0
                );
            }
            println!(
                "Water consumption:  {} L",
                format::group_thousands(r.total_water_liters.round() as i64)
            );
            println!("E-waste:            {}", format::quantity(r.e_waste_kg, "kg"));
            print_equivalences(&report);
        }
        Commands::Training {
            model,
            tokens_b,
            co2eq_per_kwh,
            gpu_cost_per_hour,
        } => {
            let mut input = config.training_input()?;
            overlay_model_args!(CalculatorId::Training, input, &model);
            if let Some(v) = tokens_b {
                input.tokens_b = v;
            }
            if let Some(v) = co2eq_per_kwh {
                input.co2eq_per_kwh = v;
            }
            if let Some(v) = gpu_cost_per_hour {
                input.gpu_cost_per_hour = v;
            }

            let report = run(&TrainingCalculator, &input)?;
            if cli.json {
                return print_json(&report);
            }
            let r = &report.result;
            println!("Operational carbon: {}", format::quantity(r.operational_co2_t, "tCO2eq"));
            println!("Training time:      {}", format::training_duration(r.training_days));
            println!("Energy:             {}", format::quantity(r.total_energy_mwh, "MWh"));
            println!("Compute cost:       {}", format::currency(r.training_cost));
            print_equivalences(&report);
        }
        Commands::Inference {
            model,
            tokens_t,
            co2eq_per_kwh,
        } => {
            let mut input = config.inference_input()?;
            overlay_model_args!(CalculatorId::Inference, input, &model);
            if let Some(v) = tokens_t {
                input.tokens_t = v;
            }
            if let Some(v) = co2eq_per_kwh {
                input.co2eq_per_kwh = v;
            }

            let calculator = InferenceCalculator::new(config.inference_validation);
            let report = run(&calculator, &input)?;
            if cli.json {
                return print_json(&report);
            }
            let r = &report.result;
            println!("Total carbon:       {:.4} gCO2eq", r.total_co2_g);
            println!("Inference time:     {}", format::inference_time(r.inference_seconds));
            println!("Energy:             {}", format::energy_wh(r.total_energy_kwh));
            print_equivalences(&report);
        }
        Commands::Presets => print_presets(),
    }

    Ok(())
}

fn print_json<O: serde::Serialize>(report: &Report<O>) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_equivalences<O>(report: &Report<O>) {
    println!();
    println!("Equivalent to:");
    for row in &report.equivalences {
        println!("  {}", format::equivalence_line(row));
    }
}

fn print_presets() {
    for calc in [CalculatorId::Training, CalculatorId::Inference] {
        println!("{} presets:", calc);
        for p in presets::presets(calc) {
            let tokens = if Preset::Named(p).locked_fields().tokens {
                "preset tokens"
            } else {
                "tokens editable"
            };
            println!(
                "  {:<6} {:<14} {:<5} {} x {}  ({})",
                p.id,
                p.display_name,
                p.model_type,
                p.device_count,
                p.device(),
                tokens
            );
        }
        println!("  {:<6} (keep current fields)", presets::CUSTOM_KEY);
    }
    println!("compute hardware:");
    for acc in Accelerator::ALL {
        let spec = acc.spec();
        println!(
            "  {:<6} {:>6} TFLOPs {:>5} W",
            acc, spec.peak_tflops, spec.system_power_watts
        );
    }
    println!("lca hardware:");
    for chip in LcaChip::ALL {
        let spec = chip.spec();
        println!(
            "  {:<6} {:>5} W  {:>4} kg embodied  {:?} L/yr water  {} kg e-waste",
            chip,
            spec.system_power_watts,
            spec.embodied_mass_kg,
            spec.water_liters_per_year,
            spec.e_waste_kg
        );
    }
}
