//! Synapse bridge quote models and clients.
//!
//! - Typed `Route` validated at the response boundary
//! - `QuoteSource` trait implemented by the HTTP client and the in-memory source
//! - GET /bridge query parameters

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use synapse_types::{hex_to_biguint, BridgeError, Hex, Result};

pub mod memory;
pub mod synapse_client;

pub use memory::StaticQuoteSource;
pub use synapse_client::{SynapseClient, SYNAPSE_API_URL};

/// Query parameters for GET /bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    pub from_chain: u64,
    pub to_chain: u64,
    pub from_token: Hex,
    pub to_token: Hex,
    pub amount: String, // base-10
    pub origin_user_address: Hex,
    pub dest_address: Hex,
}

impl QuoteQuery {
    pub fn new(
        from_chain: u64,
        to_chain: u64,
        from_token: &str,
        to_token: &str,
        amount: &BigUint,
        origin_user_address: &str,
        dest_address: &str,
    ) -> Self {
        Self {
            from_chain,
            to_chain,
            from_token: from_token.to_string(),
            to_token: to_token.to_string(),
            amount: amount.to_string(),
            origin_user_address: origin_user_address.to_string(),
            dest_address: dest_address.to_string(),
        }
    }
}

/// Low-level call embedded in a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallData {
    pub to: Hex,
    pub data: Hex,
    pub value: BigUint,
}

/// A validated bridge route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Estimated amount received on the destination chain.
    pub max_amount_out: BigUint,
    pub call_data: CallData,
    pub bridge_module_name: Option<String>,
    /// Estimated completion time in seconds.
    pub estimated_time: Option<u64>,
}

/// Ethers-style `{ "type": "BigNumber", "hex": "0x.." }` wrapper.
#[derive(Debug, Deserialize)]
struct RawBigNumber {
    hex: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCallData {
    to: Option<String>,
    data: Option<String>,
    value: Option<RawBigNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    max_amount_out: Option<RawBigNumber>,
    call_data: Option<RawCallData>,
    bridge_module_name: Option<String>,
    estimated_time: Option<Value>,
}

impl Route {
    /// Validate one element of the quote response.
    ///
    /// `index` is the element's position in the response and is reported on failure.
    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let malformed = |reason: String| BridgeError::MalformedRoute { index, reason };

        let raw: RawRoute =
            serde_json::from_value(value.clone()).map_err(|e| malformed(e.to_string()))?;

        let max_amount_out = raw
            .max_amount_out
            .and_then(|b| b.hex)
            .ok_or_else(|| malformed("missing maxAmountOut.hex".into()))?;
        let max_amount_out = hex_to_biguint(&max_amount_out)
            .map_err(|e| malformed(format!("maxAmountOut: {}", e)))?;

        let call = raw
            .call_data
            .ok_or_else(|| malformed("missing callData".into()))?;
        let to = call.to.ok_or_else(|| malformed("missing callData.to".into()))?;
        let data = call
            .data
            .ok_or_else(|| malformed("missing callData.data".into()))?;
        let call_value = call
            .value
            .and_then(|b| b.hex)
            .ok_or_else(|| malformed("missing callData.value.hex".into()))?;
        let call_value = hex_to_biguint(&call_value)
            .map_err(|e| malformed(format!("callData.value: {}", e)))?;

        Ok(Self {
            max_amount_out,
            call_data: CallData {
                to,
                data,
                value: call_value,
            },
            bridge_module_name: raw.bridge_module_name,
            estimated_time: raw.estimated_time.and_then(|t| t.as_u64()),
        })
    }
}

/// Convert a raw GET /bridge body into validated routes.
///
/// A `null` body yields an empty list; anything other than an array is rejected.
pub fn routes_from_body(body: &Value) -> Result<Vec<Route>> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| Route::from_json(i, item))
            .collect(),
        other => Err(BridgeError::MalformedResponse(format!(
            "expected an array of routes, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A source of candidate bridge routes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch every candidate route for the query, in upstream order.
    async fn fetch_routes(&self, query: &QuoteQuery) -> Result<Vec<Route>>;
}
