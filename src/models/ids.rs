//! Strongly-typed transaction identifier
//!
//! New ids are random UUIDs. Documents written by the browser version of the
//! tracker carry numeric ids (a millisecond timestamp plus a random
//! fraction); those are kept as `Legacy` ids so a replace import preserves
//! them. The short display form (`txn-1a2b3c4d`, or `txn-` plus the number
//! for legacy ids) is what the terminal shows; lookups by that prefix go
//! through the ledger.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "txn-";

/// Largest integer an f64 holds exactly
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Unique identifier of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionId {
    Uuid(Uuid),
    /// Numeric id from an imported document
    Legacy(LegacyId),
}

/// A finite numeric id, stored as the bits of its f64 value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyId(u64);

impl LegacyId {
    /// `None` for NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // -0.0 and 0.0 are the same id
        let value = if value == 0.0 { 0.0 } else { value };
        Some(Self(value.to_bits()))
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.0)
    }

    fn is_integral(&self) -> bool {
        let value = self.value();
        value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER
    }
}

impl fmt::Display for LegacyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl TransactionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self::Uuid(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }

    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(uuid) => Some(uuid),
            Self::Legacy(_) => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Full textual form: the hyphenated UUID or the legacy number
    pub fn full(&self) -> String {
        match self {
            Self::Uuid(uuid) => uuid.hyphenated().to_string(),
            Self::Legacy(legacy) => legacy.to_string(),
        }
    }

    /// Short form shown in listings: prefix plus the first 8 hex digits, or
    /// the whole number for legacy ids
    pub fn short(&self) -> String {
        match self {
            Self::Uuid(uuid) => format!("{}{}", DISPLAY_PREFIX, &uuid.simple().to_string()[..8]),
            Self::Legacy(legacy) => format!("{}{}", DISPLAY_PREFIX, legacy),
        }
    }

    /// Check whether a user-typed identifier (full id, short form or bare
    /// prefix) refers to this id
    pub fn matches_prefix(&self, needle: &str) -> bool {
        let needle = needle.trim();
        let needle = needle.strip_prefix(DISPLAY_PREFIX).unwrap_or(needle);
        if needle.is_empty() {
            return false;
        }
        match self {
            Self::Uuid(uuid) => {
                let needle = needle.to_ascii_lowercase();
                uuid.hyphenated().to_string().starts_with(&needle)
                    || uuid.simple().to_string().starts_with(&needle)
            }
            Self::Legacy(legacy) => legacy.to_string().starts_with(needle),
        }
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

impl From<Uuid> for TransactionId {
    fn from(uuid: Uuid) -> Self {
        Self::Uuid(uuid)
    }
}

impl FromStr for TransactionId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(Self::Uuid(uuid));
        }
        s.parse::<f64>()
            .ok()
            .and_then(LegacyId::from_f64)
            .map(Self::Legacy)
            .ok_or_else(|| IdParseError(s.to_string()))
    }
}

impl Serialize for TransactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Uuid(uuid) => uuid.serialize(serializer),
            Self::Legacy(legacy) if legacy.is_integral() => {
                serializer.serialize_i64(legacy.value() as i64)
            }
            Self::Legacy(legacy) => serializer.serialize_f64(legacy.value()),
        }
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdVisitor)
    }
}

struct IdVisitor;

impl IdVisitor {
    fn legacy<E: de::Error>(value: f64) -> Result<TransactionId, E> {
        LegacyId::from_f64(value)
            .map(TransactionId::Legacy)
            .ok_or_else(|| E::custom(format!("invalid numeric id: {}", value)))
    }
}

impl<'de> Visitor<'de> for IdVisitor {
    type Value = TransactionId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a UUID string or a numeric id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Uuid::parse_str(v)
            .map(TransactionId::Uuid)
            .map_err(|_| E::custom(format!("invalid id '{}': expected a UUID or a number", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Self::legacy(v as f64)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Self::legacy(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Self::legacy(v)
    }
}

/// Error type for id parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdParseError(String);

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid transaction id: {}", self.0)
    }
}

impl std::error::Error for IdParseError {}
