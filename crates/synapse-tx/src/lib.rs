//! Transaction descriptors and batch assembly for bridge execution.
//!
//! - ERC-20 `approve(address,uint256)` for the bridge's call target
//! - Raw call built from a route's embedded call data
//! - Chain-scoped ordered batch

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use synapse_client::CallData;
use synapse_types::{biguint_to_word, bytes_to_hex, hex_biguint, parse_address, Hex, Result};

/// Placeholder gas limit for the bridge call. Not calibrated per chain.
pub const DEFAULT_GAS_LIMIT: u64 = 250_000;

/// Gas limit attached to approval transactions.
pub const APPROVE_GAS_LIMIT: u64 = 100_000;

/// `approve(address,uint256)`
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// Normalized transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    pub to: Hex,
    pub data: Hex,
    #[serde(with = "hex_biguint")]
    pub value: BigUint,
    pub gas_limit: u64,
}

impl TransactionDescriptor {
    /// Take target and payload verbatim from the route's call data.
    pub fn from_call(call: &CallData, gas_limit: u64) -> Self {
        Self {
            to: call.to.clone(),
            data: call.data.clone(),
            value: call.value.clone(),
            gas_limit,
        }
    }
}

/// Ordered transactions that all execute on `chain_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBatch {
    pub chain_id: u64,
    pub txs: Vec<TransactionDescriptor>,
}

impl TransactionBatch {
    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

/// Build calldata for `approve(spender, amount)`.
pub fn encode_approve_calldata(spender: &str, amount: &BigUint) -> Result<Vec<u8>> {
    let spender = parse_address(spender)?;
    let amount = biguint_to_word(amount)?;

    let mut data = Vec::with_capacity(4 + 32 + 32);
    data.extend_from_slice(&APPROVE_SELECTOR);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(&spender);
    data.extend_from_slice(&amount);
    Ok(data)
}

/// Approval allowing `spender` to pull up to `amount` of `token` from the caller.
pub fn encode_approve_tx(
    token: &str,
    spender: &str,
    amount: &BigUint,
) -> Result<TransactionDescriptor> {
    parse_address(token)?;
    let data = encode_approve_calldata(spender, amount)?;
    Ok(TransactionDescriptor {
        to: token.to_string(),
        data: bytes_to_hex(&data),
        value: BigUint::zero(),
        gas_limit: APPROVE_GAS_LIMIT,
    })
}

/// Group transactions for sequential execution on one chain.
pub fn batch_tx(chain_id: u64, txs: Vec<TransactionDescriptor>) -> TransactionBatch {
    TransactionBatch { chain_id, txs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_types::{hex_to_bytes, BridgeError};

    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
    const ROUTER: &str = "0x7E7A0e201FD38d3ADAA9523Da6C109a07118C96a";

    #[test]
    fn test_approve_calldata_layout() {
        let data = encode_approve_calldata(ROUTER, &BigUint::from(1_000_000u32)).unwrap();
        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &APPROVE_SELECTOR);
        assert!(data[4..16].iter().all(|b| *b == 0));
        assert_eq!(&data[16..36], hex_to_bytes(ROUTER).unwrap().as_slice());
        // 1_000_000 = 0x0f4240
        assert_eq!(&data[65..68], &[0x0f, 0x42, 0x40]);
        assert!(data[36..65].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_encode_approve_tx() {
        let tx = encode_approve_tx(USDC, ROUTER, &BigUint::from(255u32)).unwrap();
        assert_eq!(tx.to, USDC);
        assert_eq!(tx.value, BigUint::zero());
        assert_eq!(tx.gas_limit, APPROVE_GAS_LIMIT);
        assert!(tx.data.starts_with("0x095ea7b3"));
        assert!(tx.data.ends_with("ff"));
        assert_eq!(tx.data.len(), 2 + 68 * 2);
    }

    #[test]
    fn test_encode_approve_tx_rejects_bad_input() {
        let too_big = BigUint::from(1u8) << 256usize;
        assert!(matches!(
            encode_approve_tx(USDC, ROUTER, &too_big),
            Err(BridgeError::AmountOverflow(_))
        ));
        assert!(matches!(
            encode_approve_tx(USDC, "0xdead", &BigUint::from(1u8)),
            Err(BridgeError::InvalidAddress(_))
        ));
        assert!(matches!(
            encode_approve_tx("usdc", ROUTER, &BigUint::from(1u8)),
            Err(BridgeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_descriptor_from_call() {
        let call = CallData {
            to: ROUTER.to_string(),
            data: "0xdeadbeef".to_string(),
            value: BigUint::from(42u32),
        };
        let tx = TransactionDescriptor::from_call(&call, DEFAULT_GAS_LIMIT);
        assert_eq!(tx.to, ROUTER);
        assert_eq!(tx.data, "0xdeadbeef");
        assert_eq!(tx.value, BigUint::from(42u32));
        assert_eq!(tx.gas_limit, 250_000);
    }

    #[test]
    fn test_batch_serializes() {
        let call = CallData {
            to: ROUTER.to_string(),
            data: "0x01".to_string(),
            value: BigUint::from(16u32),
        };
        let batch = batch_tx(10, vec![TransactionDescriptor::from_call(&call, 21_000)]);
        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["chainId"], 10);
        assert_eq!(value["txs"][0]["value"], "0x10");
        assert_eq!(value["txs"][0]["gasLimit"], 21_000);
    }
}
