use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// 0x-prefixed hex string (e.g. "0x1234...").
pub type Hex = String;

/// Synapse bridge plugin error types.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no bridge routes available")]
    NoRoutes,

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote service returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("malformed quote response: {0}")]
    MalformedResponse(String),

    #[error("malformed route at index {index}: {reason}")]
    MalformedRoute { index: usize, reason: String },

    #[error("no address resolved for chain {0}")]
    AddressUnavailable(u64),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("amount does not fit in 256 bits: {0}")]
    AmountOverflow(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parse a 0x-prefixed hex string into an arbitrary-precision integer.
///
/// An empty digit string is rejected rather than read as zero.
pub fn hex_to_biguint(hex_str: &str) -> Result<BigUint> {
    let digits = strip_hex_prefix(hex_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BridgeError::InvalidHex(hex_str.to_string()));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| BridgeError::InvalidHex(hex_str.to_string()))
}

/// Convert an integer to a 0x-prefixed hex string without padding.
pub fn biguint_to_hex(value: &BigUint) -> Hex {
    format!("0x{:x}", value)
}

/// Encode an integer as a 32-byte big-endian ABI word.
pub fn biguint_to_word(value: &BigUint) -> Result<[u8; 32]> {
    let mut word = [0u8; 32];
    if value.is_zero() {
        return Ok(word);
    }
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(BridgeError::AmountOverflow(value.to_string()));
    }
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

/// Parse a hex string to a big-endian byte array.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(strip_hex_prefix(hex_str)).map_err(|e| BridgeError::InvalidHex(e.to_string()))
}

/// Convert bytes to a 0x-prefixed hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> Hex {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 20-byte EVM address.
pub fn parse_address(address: &str) -> Result<[u8; 20]> {
    let bytes = hex_to_bytes(address)
        .map_err(|_| BridgeError::InvalidAddress(address.to_string()))?;
    <[u8; 20]>::try_from(bytes.as_slice())
        .map_err(|_| BridgeError::InvalidAddress(address.to_string()))
}

/// Serde adapter writing a `BigUint` as a 0x-prefixed hex string.
///
/// Use with `#[serde(with = "synapse_types::hex_biguint")]`.
pub mod hex_biguint {
    use num_bigint::BigUint;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigUint, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::biguint_to_hex(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::hex_to_biguint(&s).map_err(D::Error::custom)
    }
}
