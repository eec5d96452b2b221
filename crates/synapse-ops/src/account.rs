//! Address resolution for the accounts that send and receive a bridge transfer.

use std::collections::HashMap;
use synapse_types::{Hex, Result};

/// Resolves the caller's address on each requested chain.
pub trait AddressResolver: Send + Sync {
    /// Addresses for `chain_ids`, in the same order. Chains without an
    /// address are left out.
    fn get_addresses(&self, chain_ids: &[u64]) -> Result<Vec<Hex>>;
}

/// Map-backed resolver (one address per chain).
#[derive(Debug, Clone, Default)]
pub struct StaticAccount {
    addresses: HashMap<u64, Hex>,
}

impl StaticAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same address on every listed chain (typical for EOAs).
    pub fn on_chains(address: &str, chain_ids: &[u64]) -> Self {
        let addresses = chain_ids
            .iter()
            .map(|id| (*id, address.to_string()))
            .collect();
        Self { addresses }
    }

    pub fn with_address(mut self, chain_id: u64, address: &str) -> Self {
        self.addresses.insert(chain_id, address.to_string());
        self
    }
}

impl AddressResolver for StaticAccount {
    fn get_addresses(&self, chain_ids: &[u64]) -> Result<Vec<Hex>> {
        Ok(chain_ids
            .iter()
            .filter_map(|id| self.addresses.get(id).cloned())
            .collect())
    }
}
