//! Selection engine — inverse-frequency distribution and weighted sampling.

use std::fmt::Display;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::{DrawError, Result};

use super::types::*;

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Derive the selection distribution for a frequency mapping.
///
/// Each key's direct probability is `freq / total`; its inverse weight is
/// `1 / p`, except that a key with zero frequency gets zero inverse weight
/// and therefore can never be selected. Inverse weights are normalized to
/// sum to 1.
///
/// Every weight is validated before any arithmetic, so a rejected mapping
/// yields no partial result.
pub fn selection_distribution<K>(weights: &FrequencyMap<K>) -> Result<SelectionDistribution<K>>
where
    K: Clone + Display,
{
    if weights.is_empty() {
        return Err(DrawError::EmptyInput);
    }

    for (key, value) in weights.iter() {
        if !value.is_finite() {
            return Err(DrawError::InvalidFrequency {
                key: key.to_string(),
                value,
            });
        }
        if value < 0.0 {
            return Err(DrawError::NegativeFrequency {
                key: key.to_string(),
                value,
            });
        }
    }

    let total_freq = weights.total();
    if total_freq == 0.0 {
        return Err(DrawError::ZeroTotalFrequency);
    }

    let inverse: Vec<f64> = weights
        .iter()
        .map(|(_, freq)| {
            let p = freq / total_freq;
            if p == 0.0 {
                0.0
            } else {
                1.0 / p
            }
        })
        .collect();

    let total_inverse: f64 = inverse.iter().sum();
    if total_inverse == 0.0 || !total_inverse.is_finite() {
        return Err(DrawError::DegenerateWeights);
    }

    log::debug!(
        "selection distribution: {} keys, total frequency {total_freq}, total inverse weight {total_inverse}",
        weights.len()
    );

    let entries = weights
        .keys()
        .zip(inverse)
        .map(|(key, w)| (key.clone(), w / total_inverse))
        .collect();

    Ok(SelectionDistribution::from_entries(entries))
}

// ---------------------------------------------------------------------------
// Select
// ---------------------------------------------------------------------------

/// Draw one key using the supplied random source.
///
/// The draw is a cumulative-distribution sample over the normalized
/// inverse weights. Seeding `rng` makes the result reproducible.
pub fn select_with_rng<K, R>(weights: &FrequencyMap<K>, rng: &mut R) -> Result<Selection<K>>
where
    K: Clone + Display,
    R: Rng + ?Sized,
{
    let distribution = selection_distribution(weights)?;

    let index: WeightedIndex<f64> =
        WeightedIndex::new(distribution.probabilities()).map_err(|_| DrawError::DegenerateWeights)?;
    let picked = index.sample(rng);

    let winner = distribution
        .key_at(picked)
        .cloned()
        .ok_or(DrawError::DegenerateWeights)?;

    log::debug!("selected '{winner}' (index {picked})");

    Ok(Selection {
        winner,
        distribution,
    })
}

/// Draw one key using the thread-local random source.
pub fn select<K>(weights: &FrequencyMap<K>) -> Result<Selection<K>>
where
    K: Clone + Display,
{
    select_with_rng(weights, &mut rand::thread_rng())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
