//! OpenSea API v2 client.
//!
//! Read endpoints resolve contracts, collections, NFTs and market state;
//! `post_listing` publishes a signed Seaport order. Requests are not
//! retried: listings carry a short validity window and a second attempt
//! should start from a fresh order.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{Config, Network};
use crate::listing::{format_units, CollectionSource, ListingSink};
use crate::types::{FeeRule, ListingReceipt, Nft, PaymentToken, SignedOrderPayload};
use crate::{Error, Result};

/// OpenSea API client bound to one network.
pub struct OpenSeaClient {
    base_url: String,
    network: Network,
    http_client: reqwest::Client,
}

impl OpenSeaClient {
    const API_KEY_HEADER: &'static str = "x-api-key";

    #[allow(clippy::result_large_err)]
    pub fn new(config: &Config, network: Network) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.opensea.api_key).map_err(|e| Error::Config {
            message: format!("OPENSEA_API_KEY is not a valid header value: {}", e),
        })?;
        headers.insert(Self::API_KEY_HEADER, key);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url: config
                .opensea
                .base_url(network)
                .trim_end_matches('/')
                .to_string(),
            network,
            http_client,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v2/{}", self.base_url, path)
    }

    #[allow(clippy::result_large_err)]
    fn get_request(&self, path: &str, query: &[(&str, &str)]) -> Result<reqwest::Request> {
        let mut builder = self.http_client.get(self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        Ok(builder.build()?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let request = self.get_request(path, query)?;
        debug!(url = %request.url(), "GET");
        let response = self.http_client.execute(request).await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!("OpenSea request failed: {} {}", status, body),
                status: Some(status.as_u16()),
            });
        }
        Ok(response.json().await?)
    }

    /// Contract metadata, including the collection slug it belongs to.
    pub async fn get_contract(&self, address: Address) -> Result<ContractInfo> {
        self.get(&format!(
            "chain/{}/contract/{:#x}",
            self.network.as_str(),
            address
        ))
        .await
    }

    pub async fn get_collection(&self, slug: &str) -> Result<Collection> {
        self.get(&format!("collections/{}", slug)).await
    }

    pub async fn get_payment_token(&self, address: Address) -> Result<PaymentToken> {
        self.get(&format!(
            "chain/{}/payment_token/{:#x}",
            self.network.as_str(),
            address
        ))
        .await
    }

    /// NFTs of `collection` held by `account`.
    pub async fn get_account_nfts(&self, account: Address, collection: &str) -> Result<Vec<Nft>> {
        let path = format!("chain/{}/account/{:#x}/nfts", self.network.as_str(), account);
        let response: AccountNftsResponse = self
            .get_with_query(&path, &[("collection", collection)])
            .await?;
        Ok(response.nfts)
    }

    /// Cheapest active listing of one NFT.
    pub async fn get_best_listing(&self, collection: &str, identifier: &str) -> Result<BestListing> {
        self.get(&format!(
            "listings/collection/{}/nfts/{}/best",
            collection, identifier
        ))
        .await
    }

    /// Payment of the most recent sale, if the NFT was ever sold.
    pub async fn get_last_sale(&self, contract: Address, identifier: &str) -> Result<Option<Payment>> {
        let path = format!(
            "events/chain/{}/contract/{:#x}/nfts/{}",
            self.network.as_str(),
            contract,
            identifier
        );
        let response: SaleEventsResponse = self
            .get_with_query(&path, &[("event_type", "sale"), ("limit", "1")])
            .await?;
        Ok(response.asset_events.into_iter().next().map(|e| e.payment))
    }

    /// Publish a signed listing.
    pub async fn post_listing(&self, payload: &SignedOrderPayload) -> Result<ListingReceipt> {
        let url = self.url(&format!("orders/{}/seaport/listings", self.network.as_str()));
        debug!(url = %url, "POST");

        let response = self.http_client.post(&url).json(payload).send().await?;
        let created: CreateListingResponse = Self::decode(response).await?;

        info!(
            order_hash = created.order.order_hash.as_deref().unwrap_or("unknown"),
            network = %self.network,
            "Listing accepted"
        );
        Ok(created.order)
    }
}

#[async_trait]
impl CollectionSource for OpenSeaClient {
    async fn fee_rules(&self, collection: &str) -> Result<Vec<FeeRule>> {
        Ok(self.get_collection(collection).await?.fees)
    }

    async fn payment_token(&self) -> Result<PaymentToken> {
        self.get_payment_token(Address::ZERO).await
    }
}

#[async_trait]
impl ListingSink for OpenSeaClient {
    async fn submit(&self, payload: &SignedOrderPayload) -> Result<ListingReceipt> {
        self.post_listing(payload).await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    pub address: String,
    pub chain: String,
    /// Collection slug.
    pub collection: String,
    pub contract_standard: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub collection: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fees: Vec<FeeRule>,
}

#[derive(Debug, Deserialize)]
struct AccountNftsResponse {
    #[serde(default)]
    nfts: Vec<Nft>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestListing {
    pub order_hash: String,
    pub chain: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub price: ListingPrice,
    pub protocol_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPrice {
    pub current: PriceAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceAmount {
    pub currency: String,
    pub decimals: u32,
    /// Amount in base units.
    pub value: String,
}

impl BestListing {
    /// Price in whole currency units, e.g. `"0.289 ETH"`.
    pub fn display_price(&self) -> String {
        let current = &self.price.current;
        match U256::from_str_radix(&current.value, 10) {
            Ok(amount) => format!(
                "{} {}",
                format_units(amount, current.decimals),
                current.currency
            ),
            Err(_) => format!("{} (base units) {}", current.value, current.currency),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SaleEventsResponse {
    #[serde(default)]
    asset_events: Vec<SaleEvent>,
}

#[derive(Debug, Clone, Deserialize)]
struct SaleEvent {
    payment: Payment,
}

/// Payment made in a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Amount in base units.
    pub quantity: String,
    pub token_address: String,
    pub decimals: u32,
    pub symbol: String,
}

#[derive(Debug, Deserialize)]
struct CreateListingResponse {
    order: ListingReceipt,
}
