//! Property tests for latency, delay lines and rate composition

use itc_runtime::{LatencyParams, Neuron, NeuronConfig, NeuronId, RateHistory, SceneObject};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_latency_is_bounded_and_non_increasing(
        min in 0.0f64..0.1,
        spread in 0.0f64..0.2,
        tau in 0.1f64..100.0,
        r1 in 0.0f64..500.0,
        dr in 0.0f64..500.0,
    ) {
        let params = LatencyParams::new(min, min + spread, tau).unwrap();
        let (l1, l2) = (params.latency(r1), params.latency(r1 + dr));

        prop_assert!(l1 >= l2 - 1e-12);
        prop_assert!(l1 >= min - 1e-12 && l1 <= min + spread + 1e-12);
        prop_assert!(l2 >= min - 1e-12 && l2 <= min + spread + 1e-12);
    }

    #[test]
    fn prop_latency_steps_never_exceed_capacity(
        rate in 0.0f64..1000.0,
        capacity in 1usize..80,
    ) {
        let params = LatencyParams::new(0.09, 0.3, 10.0).unwrap();
        prop_assert!(params.latency_steps(rate, 0.005, capacity) <= capacity);
    }

    #[test]
    fn prop_history_returns_sample_from_delay_steps_ago(
        values in prop::collection::vec(-100.0f64..100.0, 1..200),
        len in 2usize..64,
        delay_seed in any::<usize>(),
    ) {
        let mut history = RateHistory::new(len);
        for (i, &v) in values.iter().enumerate() {
            history.record(v, -v);
            let delay = delay_seed % len.min(i + 1);
            prop_assert_eq!(history.early_delayed(delay), values[i - delay]);
            prop_assert_eq!(history.late_delayed(delay), -values[i - delay]);
            history.advance();
        }
    }

    #[test]
    fn prop_oversized_delay_saturates(len in 2usize..64, extra in 0usize..100) {
        let mut history = RateHistory::new(len);
        for i in 0..len {
            history.record(i as f64, 0.0);
            history.advance();
        }
        history.record(len as f64, 0.0);
        // Oldest retained sample
        prop_assert_eq!(history.early_delayed(len - 1 + extra), 1.0);
    }

    #[test]
    fn prop_static_rate_is_idempotent_and_bounded(
        x in -1.0f64..1.0,
        y in -1.0f64..1.0,
        size in 0.01f64..2.0,
        vis_nd in 0.0f64..=1.0,
        vis_d in 0.0f64..=1.0,
        pref in 0.0f64..=1.0,
    ) {
        let config = NeuronConfig::with_preferences([("A", pref)])
            .position("gaussian")
            .size("lognormal")
            .occlusion("two_input_sigmoid");
        let mut neuron = Neuron::new(NeuronId::new(0), &config, 0).unwrap();
        let scene = [SceneObject::new("A", x, y, size).with_visibility(vis_nd, vis_d)];

        let first = neuron.firing_rate(&scene).unwrap();
        prop_assert_eq!(neuron.firing_rate(&scene).unwrap(), first);
        prop_assert!((0.0..=100.0).contains(&first));
    }

    #[test]
    fn prop_clutter_response_between_isolated_extremes(
        positions in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1..6),
    ) {
        let names = ["a", "b", "c", "d", "e", "f"];
        let config = NeuronConfig::with_preferences([
            ("a", 0.9), ("b", 0.1), ("c", 0.5), ("d", 0.0), ("e", 0.7), ("f", 0.3),
        ])
        .position("gaussian");
        let mut neuron = Neuron::new(NeuronId::new(0), &config, 0).unwrap();

        let scene: Vec<SceneObject> = positions
            .iter()
            .zip(names)
            .map(|(&(x, y), name)| SceneObject::new(name, x, y, 1.0))
            .collect();
        let isolated: Vec<f64> = scene
            .iter()
            .map(|o| neuron.firing_rate(std::slice::from_ref(o)).unwrap())
            .collect();
        let joint = neuron.firing_rate(&scene).unwrap();

        let lo = isolated.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = isolated.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(joint >= lo - 1e-9 && joint <= hi + 1e-9);
    }

    #[test]
    fn prop_dynamic_rate_is_non_negative(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0.0f64..1.0, 1..300),
    ) {
        let config = NeuronConfig::with_preferences([("A", 0.6)]).dynamics("tamura");
        let mut neuron = Neuron::new(NeuronId::new(0), &config, seed).unwrap();
        for visibility in inputs {
            let scene = if visibility < 0.3 {
                vec![]
            } else {
                vec![SceneObject::new("A", 0.0, 0.0, 1.0)]
            };
            prop_assert!(neuron.firing_rate(&scene).unwrap() >= 0.0);
        }
    }
}
