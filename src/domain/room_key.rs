//! Canonical room identifier.
//!
//! [`RoomKey`] is derived from whatever item identifier a client sends.
//! [`RoomKey::normalize`] is the only way to build one from client input,
//! so the join path and the send path always agree on the room.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical key of a chat room.
///
/// Two item identifiers that normalize to the same string share a room:
/// numeric `42`, float `42.0` and string `"42"` all map to `42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    /// Derives the canonical room key from a raw item identifier.
    ///
    /// - strings are taken verbatim;
    /// - integers use their decimal text;
    /// - floats with an integral value that fits `i64` use the integer
    ///   text, any other float uses its shortest display form;
    /// - booleans become `true` / `false`;
    /// - `null` becomes `null`;
    /// - arrays and objects use their compact JSON text.
    #[must_use]
    pub fn normalize(raw: &Value) -> Self {
        let key = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.to_string()
                } else if let Some(u) = n.as_u64() {
                    u.to_string()
                } else {
                    n.as_f64().map_or_else(|| n.to_string(), float_key)
                }
            }
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(_) | Value::Object(_) => raw.to_string(),
        };
        Self(key)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_key(f: f64) -> String {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
