use fairdraw::selector::{select_with_rng, selection_distribution, FrequencyMap};
use fairdraw::DrawError;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn keyed(weights: &[f64]) -> FrequencyMap<String> {
    weights
        .iter()
        .enumerate()
        .map(|(i, w)| (format!("p{i}"), *w))
        .collect()
}

/// Non-negative integer frequencies with at least one positive entry.
fn positive_total() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u32..50, 1..12)
        .prop_filter("needs a positive total", |v| v.iter().any(|&f| f > 0))
        .prop_map(|v| v.into_iter().map(f64::from).collect())
}

proptest! {
    #[test]
    fn winner_is_an_input_key(weights in positive_total(), seed in any::<u64>()) {
        let map = keyed(&weights);
        let selection = select_with_rng(&map, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert!(map.contains_key(&selection.winner));
    }

    #[test]
    fn distribution_sums_to_one_and_is_aligned(weights in positive_total()) {
        let map = keyed(&weights);
        let dist = selection_distribution(&map).unwrap();

        prop_assert!((dist.total() - 1.0).abs() < 1e-9, "total {}", dist.total());
        let input_keys: Vec<_> = map.keys().collect();
        let output_keys: Vec<_> = dist.keys().collect();
        prop_assert_eq!(input_keys, output_keys);
    }

    #[test]
    fn zero_frequency_has_zero_probability(weights in positive_total(), seed in any::<u64>()) {
        let map = keyed(&weights);
        let selection = select_with_rng(&map, &mut StdRng::seed_from_u64(seed)).unwrap();

        for (key, freq) in map.iter() {
            if freq == 0.0 {
                prop_assert_eq!(selection.distribution.get(key), Some(0.0));
                prop_assert_ne!(&selection.winner, key);
            }
        }
    }

    #[test]
    fn lower_frequency_never_less_likely(weights in positive_total()) {
        let map = keyed(&weights);
        let dist = selection_distribution(&map).unwrap();

        let pairs: Vec<(f64, f64)> = map.iter().map(|(k, f)| (f, dist.get(k).unwrap())).collect();
        for &(fa, pa) in &pairs {
            for &(fb, pb) in &pairs {
                if fa > 0.0 && fb > 0.0 && fa < fb {
                    prop_assert!(pa >= pb - 1e-12);
                }
            }
        }
    }

    #[test]
    fn equal_frequencies_are_uniform(freq in 1u32..1_000, n in 1usize..20) {
        let map = keyed(&vec![f64::from(freq); n]);
        let dist = selection_distribution(&map).unwrap();
        let expected = 1.0 / n as f64;
        for (_, p) in dist.iter() {
            prop_assert!((p - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn zero_total_is_rejected(n in 1usize..20, seed in any::<u64>()) {
        let map = keyed(&vec![0.0; n]);
        let result = select_with_rng(&map, &mut StdRng::seed_from_u64(seed));
        prop_assert!(matches!(result, Err(DrawError::ZeroTotalFrequency)));
    }

    #[test]
    fn same_seed_same_winner(weights in positive_total(), seed in any::<u64>()) {
        let map = keyed(&weights);
        let a = select_with_rng(&map, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = select_with_rng(&map, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a.winner, b.winner);
    }
}
