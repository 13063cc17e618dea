//! Lenient field deserializers for records supplied by external systems.
//!
//! Catalogs and payment records arrive with `null` where a value was never
//! filled in. These helpers turn such fields into their defaults so that a
//! single sparse entry contributes zero instead of failing the whole payload.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::FeeKind;

/// Deserializes a field, mapping an explicit `null` to `T::default()`.
///
/// Pair with `#[serde(default)]` so an absent field gets the same treatment.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a list, treating a `null` list as empty and dropping `null` entries.
pub fn vec_skipping_nulls<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// Deserializes a `feeAmounts` map keyed by fee label.
///
/// `null` amounts count as zero; labels that name no known fee kind are
/// logged and dropped.
pub fn fee_amounts<'de, D>(deserializer: D) -> Result<BTreeMap<FeeKind, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Decimal>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(label, amount)| match label.parse::<FeeKind>() {
            Ok(kind) => Some((kind, amount.unwrap_or_default())),
            Err(message) => {
                warn!(fee = %label, %message, "Dropping unknown fee kind from feeAmounts");
                None
            }
        })
        .collect())
}
