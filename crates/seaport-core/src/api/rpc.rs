//! JSON-RPC client for reading Seaport state.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::{Config, Network};
use crate::listing::CounterSource;
use crate::signing::{SeaportDomain, SEAPORT_ADDRESS};
use crate::{Error, Result};

sol! {
    function getCounter(address offerer) external view returns (uint256 counter);
    function name() external view returns (string contractName);
    function information() external view returns (
        string version,
        bytes32 domainSeparator,
        address conduitController
    );
}

/// Version and domain data reported by `information()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeaportInformation {
    pub version: String,
    pub domain_separator: B256,
    pub conduit_controller: Address,
}

/// Read-only access to a Seaport deployment.
pub struct SeaportRpc {
    rpc_url: String,
    protocol_address: Address,
    http_client: reqwest::Client,
}

impl SeaportRpc {
    /// Client for Seaport 1.6 behind a custom RPC URL.
    #[allow(clippy::result_large_err)]
    pub fn new(rpc_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            rpc_url: rpc_url.into(),
            protocol_address: SEAPORT_ADDRESS,
            http_client,
        })
    }

    /// Client for the network's endpoint as configured (RPC_URL or Infura).
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config, network: Network) -> Result<Self> {
        Self::new(config.rpc.url_for(network)?)
    }

    pub fn with_protocol_address(mut self, protocol_address: Address) -> Self {
        self.protocol_address = protocol_address;
        self
    }

    pub fn protocol_address(&self) -> Address {
        self.protocol_address
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let hex_id: String = self.rpc_call("eth_chainId", serde_json::json!([])).await?;
        parse_quantity(&hex_id)
    }

    /// Current counter of `offerer`; orders signed with an older counter
    /// are void.
    pub async fn get_counter(&self, offerer: Address) -> Result<U256> {
        let data = self.call(getCounterCall { offerer }.abi_encode()).await?;
        getCounterCall::abi_decode_returns(&data).map_err(|e| Error::Rpc {
            message: format!("Failed to decode getCounter result: {}", e),
        })
    }

    pub async fn name(&self) -> Result<String> {
        let data = self.call(nameCall {}.abi_encode()).await?;
        nameCall::abi_decode_returns(&data).map_err(|e| Error::Rpc {
            message: format!("Failed to decode name result: {}", e),
        })
    }

    pub async fn information(&self) -> Result<SeaportInformation> {
        let data = self.call(informationCall {}.abi_encode()).await?;
        let info = informationCall::abi_decode_returns(&data).map_err(|e| Error::Rpc {
            message: format!("Failed to decode information result: {}", e),
        })?;

        Ok(SeaportInformation {
            version: info.version,
            domain_separator: info.domainSeparator,
            conduit_controller: info.conduitController,
        })
    }

    /// Signing domain as the deployed contract reports it.
    ///
    /// Fails if the contract's own separator disagrees with the one computed
    /// locally, since any signature made over it would be rejected.
    pub async fn domain(&self) -> Result<SeaportDomain> {
        let chain_id = self.chain_id().await?;
        let name = self.name().await?;
        let info = self.information().await?;

        let domain = SeaportDomain::custom(name, info.version, chain_id, self.protocol_address);
        if domain.separator() != info.domain_separator {
            return Err(Error::Rpc {
                message: format!(
                    "Domain separator mismatch: contract reports {}, computed {}",
                    info.domain_separator,
                    domain.separator()
                ),
            });
        }

        debug!(
            name = %domain.name,
            version = %domain.version,
            chain_id = chain_id,
            "Resolved Seaport domain"
        );
        Ok(domain)
    }

    async fn call(&self, calldata: Vec<u8>) -> Result<Bytes> {
        let params = serde_json::json!([
            {
                "to": format!("{:#x}", self.protocol_address),
                "data": Bytes::from(calldata),
            },
            "latest"
        ]);
        self.rpc_call("eth_call", params).await
    }

    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                message: format!("RPC request failed: {}", response.status()),
                status: Some(response.status().as_u16()),
            });
        }

        let body: JsonRpcResponse<T> = response.json().await?;
        body.into_result(method)
    }
}

#[async_trait]
impl CounterSource for SeaportRpc {
    async fn get_counter(&self, offerer: Address) -> Result<U256> {
        SeaportRpc::get_counter(self, offerer).await
    }
}

#[allow(clippy::result_large_err)]
fn parse_quantity(hex_value: &str) -> Result<u64> {
    u64::from_str_radix(hex_value.trim_start_matches("0x"), 16).map_err(|e| Error::Rpc {
        message: format!("Failed to parse quantity {}: {}", hex_value, e),
    })
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    #[allow(clippy::result_large_err)]
    fn into_result(self, method: &str) -> Result<T> {
        if let Some(error) = self.error {
            return Err(Error::Rpc {
                message: format!("{} failed ({}): {}", method, error.code, error.message),
            });
        }
        self.result.ok_or_else(|| Error::Rpc {
            message: format!("No result in {} response", method),
        })
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
