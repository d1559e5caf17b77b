//! Storage layer for participant collections and plain weight documents.
//!
//! # Formats
//!
//! - [`frequency_file`] — the participant collection as one JSON array,
//!   rewritten in full on every save. Default file: `frequencies.json`.
//! - [`weights`] — an ad-hoc JSON object of `name → frequency`.
//!
//! Both are written pretty-printed with 4-space indentation; non-ASCII
//! names are kept verbatim.

pub mod frequency_file;
pub mod weights;

pub use frequency_file::{FrequencyStore, DEFAULT_FILE_NAME};
pub use weights::{parse_weights, read_weights_file, render_weights, write_weights_file};

use serde::Serialize;

use crate::error::{DrawError, Result};

/// Serialize `value` as 4-space-indented JSON.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| DrawError::SerializationError(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| DrawError::SerializationError(e.to_string()))
}
