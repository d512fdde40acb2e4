//! Helpers for the loosely typed parts of the OntoUML JSON format.

use serde::{Deserialize, Deserializer};

/// Deserializes a field that exporters write either as a value or as `null`.
///
/// `null` maps to `T::default()`, which lets list fields such as `contents` or
/// `properties` be plain `Vec`s instead of `Option<Vec<_>>`.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
