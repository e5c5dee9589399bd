//! Hashing - Layout Fingerprints
//!
//! Equal layouts hash equal, so renderers can share one style block
//! between figures with the same arrangement.

use serde::Serialize;
use serde_json::{json, to_string, Value};
use sha2::{Digest, Sha256};

use crate::grid::Grid;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

// `serde_json::Map` only sorts keys without the `preserve_order` feature,
// which any crate in the build graph can switch on.
fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut sorted: Vec<_> = map.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint of a primary layout and its optional small-viewport layout.
pub fn compute_layout_fingerprint(
    layout: &Grid,
    layout_sm: Option<&Grid>,
) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(&json!({
        "layout": layout,
        "layout_sm": layout_sm,
    }))?;
    Ok(sha256_hex(canonical.as_bytes()))
}
