//! JSON decoding for delivery payloads
//!
//! Rich-text documents nest two JSON levels per node, so serde_json's
//! default recursion limit rejects documents long before the renderer's
//! own depth bound applies. Payloads are decoded here without that limit;
//! the stack grows on demand instead.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Parses `input` with no nesting limit
pub fn from_json_str<T: DeserializeOwned>(input: &str) -> serde_json::Result<T> {
    let mut de = serde_json::Deserializer::from_str(input);
    de.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Decodes an already-parsed value with no nesting limit
pub fn from_json_value<'a, T: Deserialize<'a>>(value: &'a Value) -> serde_json::Result<T> {
    T::deserialize(serde_stacker::Deserializer::new(value))
}
