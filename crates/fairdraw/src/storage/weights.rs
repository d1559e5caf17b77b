//! Plain weight documents — a JSON object of `name → frequency`.
//!
//! This is the quick format for ad-hoc draws where no history is kept:
//! ```json
//! {
//!     "Aline": 2,
//!     "Passeto": 1
//! }
//! ```
//! Key order in the document is the order of the draw's distribution.

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::{DrawError, Result};
use crate::selector::FrequencyMap;

use super::to_pretty_json;

/// Parse a weight document.
///
/// The document must be an object whose values are all non-negative numbers.
pub fn parse_weights(text: &str) -> Result<FrequencyMap<String>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DrawError::InvalidWeights(format!("not valid JSON: {e}")))?;

    let object = value.as_object().ok_or_else(|| {
        DrawError::InvalidWeights(
            "expected an object of name to frequency, e.g. {\"Name\": 1}".to_string(),
        )
    })?;

    let mut weights = FrequencyMap::new();
    for (name, raw) in object {
        let weight = raw.as_f64().ok_or_else(|| {
            DrawError::InvalidWeights(format!("frequency for '{name}' is not a number"))
        })?;
        if weight < 0.0 {
            return Err(DrawError::NegativeFrequency {
                key: name.clone(),
                value: weight,
            });
        }
        weights.insert(name.clone(), weight);
    }

    Ok(weights)
}

/// Render a weight document. Whole numbers are written as integers.
pub fn render_weights(weights: &FrequencyMap<String>) -> Result<String> {
    let mut object = Map::with_capacity(weights.len());
    for (name, weight) in weights.iter() {
        object.insert(name.clone(), weight_value(name, weight)?);
    }
    to_pretty_json(&Value::Object(object))
}

/// Read and parse a weight document from disk.
pub fn read_weights_file(path: &Path) -> Result<FrequencyMap<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DrawError::StorageError(format!("failed to read {}: {e}", path.display())))?;
    parse_weights(&text)
}

/// Write a weight document to disk, replacing any existing file.
pub fn write_weights_file(path: &Path, weights: &FrequencyMap<String>) -> Result<()> {
    let json = render_weights(weights)?;
    std::fs::write(path, json.as_bytes())
        .map_err(|e| DrawError::StorageError(format!("failed to write {}: {e}", path.display())))?;
    log::info!("wrote {} weight(s) to {}", weights.len(), path.display());
    Ok(())
}

fn weight_value(name: &str, weight: f64) -> Result<Value> {
    if weight.fract() == 0.0 && weight.abs() < i64::MAX as f64 {
        return Ok(Value::from(weight as i64));
    }
    Number::from_f64(weight)
        .map(Value::Number)
        .ok_or_else(|| DrawError::InvalidFrequency {
            key: name.to_string(),
            value: weight,
        })
}
