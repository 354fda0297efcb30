//! Property tests for the estimator invariants.

use proptest::prelude::*;

use ai_footprint::calculators::{inference, lca, training};
use ai_footprint::{
    project, run, Accelerator, Emissions, InferenceCalculator, InferenceInput, LcaChip, LcaInput,
    ModelType, TrainingCalculator, TrainingInput, INFERENCE_EQUIVALENTS, TRAINING_EQUIVALENTS,
};

fn chip() -> impl Strategy<Value = LcaChip> {
    prop::sample::select(LcaChip::ALL.to_vec())
}

fn accelerator() -> impl Strategy<Value = Accelerator> {
    prop::sample::select(Accelerator::ALL.to_vec())
}

fn lca_input() -> impl Strategy<Value = LcaInput> {
    (chip(), 0.1f64..20.0, 0.0f64..=24.0, 1.0f64..1200.0).prop_map(|(chip, life, util, ci)| {
        LcaInput {
            chip,
            lifespan_years: life,
            utilization_hours_per_day: util,
            carbon_intensity_g_per_kwh: ci,
        }
    })
}

prop_compose! {
    fn training_input(model_type: ModelType)(
        params in 0.1f64..2000.0,
        base in 0.1f64..500.0,
        tokens in 1.0f64..20_000.0,
        device in accelerator(),
        count in 1u32..50_000,
        power in 100.0f64..1500.0,
        eff in 5.0f64..100.0,
        pue in 1.0f64..2.0,
        co2 in 0.01f64..1.0,
        cost in 0.1f64..10.0,
    ) -> TrainingInput {
        TrainingInput {
            model_type,
            parameters_b: params,
            base_model_params_b: Some(base),
            tokens_b: tokens,
            device_type: device,
            device_count: count,
            system_power_watts: power,
            hardware_efficiency_pct: eff,
            pue,
            co2eq_per_kwh: co2,
            gpu_cost_per_hour: cost,
        }
    }
}

prop_compose! {
    fn inference_input(model_type: ModelType)(
        params in 0.1f64..2000.0,
        base in 0.1f64..500.0,
        tokens in 0.0001f64..10.0,
        device in accelerator(),
        count in 1u32..64,
        power in 100.0f64..1500.0,
        eff in 5.0f64..100.0,
        pue in 1.0f64..2.0,
        co2 in 10.0f64..1000.0,
    ) -> InferenceInput {
        InferenceInput {
            model_type,
            parameters_b: params,
            base_model_params_b: Some(base),
            tokens_t: tokens,
            device_type: device,
            device_count: count,
            system_power_watts: power,
            hardware_efficiency_pct: eff,
            pue,
            co2eq_per_kwh: co2,
        }
    }
}

proptest! {
    #[test]
    fn lca_total_is_exact_sum(input in lca_input()) {
        let r = lca::compute(&input).unwrap();
        prop_assert_eq!(r.total_co2_t, r.operational_co2_t + r.embodied_co2_t);
    }

    #[test]
    fn training_dense_ignores_base_params(
        input in training_input(ModelType::Dense),
        other in 0.1f64..500.0,
    ) {
        let a = run(&TrainingCalculator, &input).unwrap();
        let b = run(&TrainingCalculator, &TrainingInput { base_model_params_b: Some(other), ..input }).unwrap();
        let c = run(&TrainingCalculator, &TrainingInput { base_model_params_b: None, ..input }).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }

    #[test]
    fn training_moe_uses_base_params(input in training_input(ModelType::MoE)) {
        let r = training::compute(&input).unwrap();
        let base = input.base_model_params_b.unwrap();
        prop_assert_eq!(r.active_params_b, base);
        prop_assert_eq!(r.total_flops, 6.0 * (base * 1e9) * (input.tokens_b * 1e9));
    }

    #[test]
    fn inference_dense_ignores_base_params(
        input in inference_input(ModelType::Dense),
        other in 0.1f64..500.0,
    ) {
        let calc = InferenceCalculator::default();
        let a = run(&calc, &input).unwrap();
        let b = run(&calc, &InferenceInput { base_model_params_b: Some(other), ..input }).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn inference_moe_uses_base_params(input in inference_input(ModelType::MoE)) {
        let r = inference::compute(&input).unwrap();
        let base = input.base_model_params_b.unwrap();
        prop_assert_eq!(r.active_params_b, base);
        prop_assert_eq!(r.total_zetta_flops, 2.0 * base * input.tokens_t);
    }

    #[test]
    fn projection_scales_linearly(total in 0.0f64..1e6, k in 0.001f64..1000.0) {
        let base = project(Emissions::tonnes(total), &TRAINING_EQUIVALENTS).unwrap();
        let scaled = project(Emissions::tonnes(total * k), &TRAINING_EQUIVALENTS).unwrap();
        for (a, b) in base.iter().zip(&scaled) {
            let expected = a.multiple * k;
            prop_assert!((b.multiple - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn projection_rejects_other_scale(total in 0.0f64..1e6) {
        prop_assert!(project(Emissions::tonnes(total), &INFERENCE_EQUIVALENTS).is_err());
    }

    #[test]
    fn repeated_runs_are_bit_identical(
        l in lca_input(),
        t in training_input(ModelType::MoE),
        i in inference_input(ModelType::Dense),
    ) {
        let a = lca::compute(&l).unwrap();
        let b = lca::compute(&l).unwrap();
        prop_assert_eq!(a.total_co2_t.to_bits(), b.total_co2_t.to_bits());

        let a = training::compute(&t).unwrap();
        let b = training::compute(&t).unwrap();
        prop_assert_eq!(a.operational_co2_t.to_bits(), b.operational_co2_t.to_bits());
        prop_assert_eq!(a.training_cost.to_bits(), b.training_cost.to_bits());

        let a = inference::compute(&i).unwrap();
        let b = inference::compute(&i).unwrap();
        prop_assert_eq!(a.total_co2_g.to_bits(), b.total_co2_g.to_bits());
    }
}
