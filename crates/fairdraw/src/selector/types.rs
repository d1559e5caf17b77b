//! Data structures for weighted selection.

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// Frequency Map
// ---------------------------------------------------------------------------

/// Ordered mapping from participant key to historical frequency.
///
/// Keys keep their insertion order, which is also the order of the
/// distribution a draw returns. Keys are unique; inserting an existing key
/// replaces its weight in place. Lookups are linear, which is fine for the
/// group sizes a draw is meant for.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyMap<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Default for FrequencyMap<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> FrequencyMap<K> {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a weight. Returns the previous weight, if any.
    pub fn insert(&mut self, key: K, weight: f64) -> Option<f64> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, w)) => Some(std::mem::replace(w, weight)),
            None => {
                self.entries.push((key, weight));
                None
            }
        }
    }

    /// Weight for `key`, if present.
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, w)| *w)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
}

impl<K> FrequencyMap<K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, weight)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, w)| (k, *w))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| *w).sum()
    }
}

impl<K: PartialEq> FromIterator<(K, f64)> for FrequencyMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, weight) in iter {
            map.insert(key, weight);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Selection Distribution
// ---------------------------------------------------------------------------

/// Normalized selection probabilities, aligned 1:1 with the input keys.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDistribution<K> {
    entries: Vec<(K, f64)>,
}

impl<K> SelectionDistribution<K> {
    pub(crate) fn from_entries(entries: Vec<(K, f64)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, probability)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(k, p)| (k, *p))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Probabilities in input order.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, p)| *p)
    }

    /// Sum of all probabilities (1.0 up to rounding).
    pub fn total(&self) -> f64 {
        self.probabilities().sum()
    }

    /// Key at `index`, in input order.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.entries.get(index).map(|(k, _)| k)
    }
}

impl<K: PartialEq> SelectionDistribution<K> {
    /// Probability for `key`, if present.
    pub fn get(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| *p)
    }
}

impl<K: Serialize> Serialize for SelectionDistribution<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, probability) in &self.entries {
            map.serialize_entry(key, probability)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Outcome of a single draw: the winner and the distribution it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<K> {
    pub winner: K,
    pub distribution: SelectionDistribution<K>,
}
