//! Shared types for Gatehouse

pub mod error;

pub use error::{GatewayError, Result};

use serde::{Deserialize, Deserializer};

/// Deserialize a string field where `null` reads the same as an absent field
///
/// Pair with `#[serde(default)]` so both end up as the empty string and fail
/// the missing-field checks instead of the JSON parse.
pub(crate) fn string_or_null<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
