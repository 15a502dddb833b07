//! JSON-RPC ledger client
//!
//! Queries an account's native-token balance from a remote Ethereum node
//! (`eth_getBalance` against an Infura-style endpoint selected by network
//! name and access key).

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::balance::{parse_wei_hex, wei_to_eth};
use crate::domain::result::{Error, Result};
use crate::domain::Address;
use crate::ports::LedgerClient;

/// Networks with a known RPC endpoint
const KNOWN_NETWORKS: &[&str] = &["mainnet", "sepolia", "holesky"];

/// The remote node gets a few seconds, not forever; the session is useless
/// while a fetch hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON-RPC ledger client
#[derive(Debug)]
pub struct JsonRpcLedger {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: serde_json::Value,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

// eth_getBalance with a bad address surfaces as an invalid-params error
const RPC_INVALID_PARAMS: i64 = -32602;

impl JsonRpcLedger {
    /// Create a client for a named network and access key
    pub fn new(network: &str, access_key: &str) -> Result<Self> {
        if access_key.trim().is_empty() {
            return Err(Error::config("ledger access key is not set"));
        }
        if !KNOWN_NETWORKS.contains(&network) {
            return Err(Error::config(format!(
                "unknown network '{}', expected one of: {}",
                network,
                KNOWN_NETWORKS.join(", ")
            )));
        }

        let endpoint = format!("https://{}.infura.io/v3/{}", network, access_key);
        Self::with_endpoint(&endpoint)
    }

    /// Create a client against an explicit endpoint URL (used by tests)
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::config(format!("invalid ledger endpoint: {}", e)))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Map transport errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::network(format!(
                "ledger request timed out after {} seconds",
                REQUEST_TIMEOUT.as_secs()
            ))
        } else if error.is_connect() {
            Error::network("unable to connect to the ledger endpoint".to_string())
        } else {
            Error::network(format!("ledger request failed: {}", error))
        }
    }
}

/// Decode a JSON-RPC balance response body into an ETH amount
fn decode_balance_response(response: RpcResponse) -> Result<Decimal> {
    if let Some(rpc_error) = response.error {
        if rpc_error.code == RPC_INVALID_PARAMS {
            return Err(Error::InvalidAddress(rpc_error.message));
        }
        return Err(Error::network(format!(
            "RPC error {}: {}",
            rpc_error.code, rpc_error.message
        )));
    }

    let quantity = response
        .result
        .ok_or_else(|| Error::network("RPC response missing result".to_string()))?;

    wei_to_eth(parse_wei_hex(&quantity)?)
}

#[async_trait]
impl LedgerClient for JsonRpcLedger {
    fn name(&self) -> &str {
        "json-rpc"
    }

    async fn get_balance(&self, address: &Address) -> Result<Decimal> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "eth_getBalance",
            params: serde_json::json!([address.as_str(), "latest"]),
            id: 1,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::network(format!("ledger API error: HTTP {}", status)));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::network(format!("failed to parse RPC response: {}", e)))?;

        decode_balance_response(body)
    }
}
