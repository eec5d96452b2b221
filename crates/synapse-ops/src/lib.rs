//! Synapse bridge plugin: quote, select, and package bridge transactions.
//!
//! Flow for one request:
//! - resolve origin and destination addresses
//! - fetch candidate routes from Synapse
//! - pick the route with the largest `maxAmountOut`
//! - batch `[approve, bridge call]` on the source chain

use async_trait::async_trait;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use synapse_client::{QuoteQuery, QuoteSource, SynapseClient, SYNAPSE_API_URL};
use synapse_planner::select_best_route;
use synapse_tx::{
    batch_tx, encode_approve_tx, TransactionBatch, TransactionDescriptor, DEFAULT_GAS_LIMIT,
};
use synapse_types::{hex_biguint, BridgeError, Hex, Result};
use tracing::debug;

pub mod account;

pub use account::{AddressResolver, StaticAccount};

/// Plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynapseConfig {
    pub base_url: String,
    /// Gas limit attached to the bridge call.
    pub gas_limit: u64,
    /// `None` keeps the transport default.
    pub request_timeout_ms: Option<u64>,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            base_url: SYNAPSE_API_URL.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            request_timeout_ms: None,
        }
    }
}

/// A bridge transfer requested by the orchestration framework.
#[derive(Clone)]
pub struct BridgeRequest {
    pub source_chain_id: u64,
    pub destination_chain_id: u64,
    pub source_token: Hex,
    pub destination_token: Hex,
    pub amount: BigUint,
    pub account: Arc<dyn AddressResolver>,
}

/// Outcome of a bridge plugin call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeResult {
    /// Estimated amount received on the destination chain.
    #[serde(with = "hex_biguint")]
    pub received_on_destination: BigUint,
    pub transactions: TransactionBatch,
}

/// Framework-facing bridge adapter.
#[async_trait]
pub trait BridgePlugin: Send + Sync {
    async fn bridge(&self, request: &BridgeRequest) -> Result<BridgeResult>;
}

/// Bridge plugin backed by a Synapse quote source.
pub struct SynapseBridgePlugin {
    source: Arc<dyn QuoteSource>,
    config: SynapseConfig,
}

impl SynapseBridgePlugin {
    /// HTTP-backed plugin talking to `config.base_url`.
    pub fn new(config: SynapseConfig) -> Result<Self> {
        let client = SynapseClient::new(&config.base_url, config.request_timeout_ms)?;
        Ok(Self::with_source(Arc::new(client), config))
    }

    pub fn with_source(source: Arc<dyn QuoteSource>, config: SynapseConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &SynapseConfig {
        &self.config
    }
}

fn resolve_address(account: &dyn AddressResolver, chain_id: u64) -> Result<Hex> {
    account
        .get_addresses(&[chain_id])?
        .into_iter()
        .next()
        .ok_or(BridgeError::AddressUnavailable(chain_id))
}

#[async_trait]
impl BridgePlugin for SynapseBridgePlugin {
    async fn bridge(&self, request: &BridgeRequest) -> Result<BridgeResult> {
        let origin = resolve_address(request.account.as_ref(), request.source_chain_id)?;
        let destination =
            resolve_address(request.account.as_ref(), request.destination_chain_id)?;

        let query = QuoteQuery::new(
            request.source_chain_id,
            request.destination_chain_id,
            &request.source_token,
            &request.destination_token,
            &request.amount,
            &origin,
            &destination,
        );

        let routes = self.source.fetch_routes(&query).await?;
        let route = select_best_route(&routes)?;

        let bridge_call =
            TransactionDescriptor::from_call(&route.call_data, self.config.gas_limit);

        // The bridge contract pulls the tokens, so it must be approved first.
        let approval =
            encode_approve_tx(&request.source_token, &bridge_call.to, &request.amount)?;

        debug!(
            chain_id = request.source_chain_id,
            spender = %bridge_call.to,
            "packaged synapse bridge batch"
        );

        Ok(BridgeResult {
            received_on_destination: route.max_amount_out.clone(),
            transactions: batch_tx(request.source_chain_id, vec![approval, bridge_call]),
        })
    }
}
