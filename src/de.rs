//! Serde helpers for backend records

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the type's default.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value: Option<T> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
