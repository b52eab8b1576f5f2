//! End-to-end listing pipeline.
//!
//! ```text
//! PriceValidated → FeesAllocated → OrderAssembled → TypedDataEncoded → Signed → Submitted
//! ```
//!
//! Every transition is one-way and nothing is retried. A failure aborts the
//! run and reports the stage that could not be reached; nothing reaches the
//! sink unless signing succeeded.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::builder::{item_type_for, OrderBuilder};
use super::fees::FeeAllocator;
use super::price::to_base_units;
use crate::config::DEFAULT_LISTING_WINDOW_SECS;
use crate::signing::{OrderSigner, SeaportDomain, TypedDataEncoder, TypedDataSigner};
use crate::types::{FeeRule, ListingReceipt, NftAsset, PaymentToken, SignedOrderPayload};
use crate::Error;

/// Source of the offerer's Seaport counter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterSource: Send + Sync {
    async fn get_counter(&self, offerer: Address) -> crate::Result<U256>;
}

/// Source of collection fee rules and the payment token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Fee rules of a collection, in the marketplace's order.
    async fn fee_rules(&self, collection: &str) -> crate::Result<Vec<FeeRule>>;

    /// Token listings are priced in.
    async fn payment_token(&self) -> crate::Result<PaymentToken>;
}

/// Destination for signed listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSink: Send + Sync {
    async fn submit(&self, payload: &SignedOrderPayload) -> crate::Result<ListingReceipt>;
}

#[async_trait]
impl<T: CounterSource + ?Sized> CounterSource for Arc<T> {
    async fn get_counter(&self, offerer: Address) -> crate::Result<U256> {
        (**self).get_counter(offerer).await
    }
}

#[async_trait]
impl<T: CollectionSource + ?Sized> CollectionSource for Arc<T> {
    async fn fee_rules(&self, collection: &str) -> crate::Result<Vec<FeeRule>> {
        (**self).fee_rules(collection).await
    }

    async fn payment_token(&self) -> crate::Result<PaymentToken> {
        (**self).payment_token().await
    }
}

#[async_trait]
impl<T: ListingSink + ?Sized> ListingSink for Arc<T> {
    async fn submit(&self, payload: &SignedOrderPayload) -> crate::Result<ListingReceipt> {
        (**self).submit(payload).await
    }
}

/// Pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListingStage {
    PriceValidated,
    FeesAllocated,
    OrderAssembled,
    TypedDataEncoded,
    Signed,
    Submitted,
}

impl fmt::Display for ListingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingStage::PriceValidated => "price validation",
            ListingStage::FeesAllocated => "fee allocation",
            ListingStage::OrderAssembled => "order assembly",
            ListingStage::TypedDataEncoded => "typed-data encoding",
            ListingStage::Signed => "signing",
            ListingStage::Submitted => "submission",
        };
        f.write_str(name)
    }
}

/// A failed run: the stage that could not be completed and why.
#[derive(Error, Debug)]
#[error("listing failed during {stage}: {source}")]
pub struct PipelineError {
    pub stage: ListingStage,
    pub source: Error,
}

fn at(stage: ListingStage) -> impl FnOnce(Error) -> PipelineError {
    move |source| {
        warn!(stage = %stage, error = %source, "Listing aborted");
        PipelineError { stage, source }
    }
}

/// One NFT to list.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub asset: NftAsset,
    /// Marketplace collection slug (selects the fee rules).
    pub collection: String,
    /// Human price in payment-token units, e.g. `0.289`.
    pub price: Decimal,
}

/// A submitted listing.
#[derive(Debug, Clone)]
pub struct ListingOutcome {
    pub payload: SignedOrderPayload,
    pub receipt: ListingReceipt,
}

/// Runs listing requests against a set of collaborators.
///
/// The pipeline holds no per-order state, so independent requests may run
/// concurrently against the same instance; each fetches its own counter
/// and draws its own salt.
pub struct ListingPipeline<C, K, S, L> {
    collections: C,
    counters: K,
    signer: OrderSigner<S>,
    sink: L,
    domain: SeaportDomain,
    window: Duration,
}

impl<C, K, S, L> ListingPipeline<C, K, S, L>
where
    C: CollectionSource,
    K: CounterSource,
    S: TypedDataSigner,
    L: ListingSink,
{
    pub fn new(
        collections: C,
        counters: K,
        signer: OrderSigner<S>,
        sink: L,
        domain: SeaportDomain,
    ) -> Self {
        Self {
            collections,
            counters,
            signer,
            sink,
            domain,
            window: Duration::from_secs(DEFAULT_LISTING_WINDOW_SECS),
        }
    }

    pub fn with_listing_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn domain(&self) -> &SeaportDomain {
        &self.domain
    }

    pub fn offerer(&self) -> Address {
        self.signer.address()
    }

    /// Run every stage up to and including `Signed`.
    pub async fn prepare(
        &self,
        request: &ListingRequest,
    ) -> Result<SignedOrderPayload, PipelineError> {
        use ListingStage::*;

        if request.price <= Decimal::ZERO {
            return Err(at(PriceValidated)(Error::invalid_price(format!(
                "price must be positive, got {}",
                request.price
            ))));
        }
        let token = self
            .collections
            .payment_token()
            .await
            .map_err(at(PriceValidated))?;
        let price = to_base_units(request.price, token.decimals).map_err(at(PriceValidated))?;
        info!(
            stage = %PriceValidated,
            price = %request.price,
            base_units = %price,
            token = %token.symbol,
            "Price validated"
        );

        let offerer = self.signer.address();
        let rules = self
            .collections
            .fee_rules(&request.collection)
            .await
            .map_err(at(FeesAllocated))?;
        let splits = FeeAllocator::new(offerer)
            .allocate(price, &rules)
            .map_err(at(FeesAllocated))?;
        info!(
            stage = %FeesAllocated,
            collection = %request.collection,
            splits = splits.len(),
            "Fees allocated"
        );

        item_type_for(&request.asset.standard).map_err(at(OrderAssembled))?;
        let counter = self
            .counters
            .get_counter(offerer)
            .await
            .map_err(at(OrderAssembled))?;
        let order = OrderBuilder::new()
            .offerer(offerer)
            .asset(request.asset.clone())
            .price(price)
            .payment_token(token.address)
            .splits(splits)
            .counter(counter)
            .listing_window(self.window)
            .build()
            .map_err(at(OrderAssembled))?;
        info!(
            stage = %OrderAssembled,
            token_id = %request.asset.token_id,
            counter = %counter,
            start_time = order.start_time,
            end_time = order.end_time,
            "Order assembled"
        );

        let encoded =
            TypedDataEncoder::encode(&order, &self.domain).map_err(at(TypedDataEncoded))?;
        debug!(typed_data = %encoded.to_json(), "EIP-712 data");

        let payload = self
            .signer
            .sign(order, &encoded)
            .await
            .map_err(at(Signed))?;

        Ok(payload)
    }

    /// Run the whole pipeline, submitting the signed listing.
    pub async fn run(&self, request: &ListingRequest) -> Result<ListingOutcome, PipelineError> {
        let payload = self.prepare(request).await?;

        let receipt = self
            .sink
            .submit(&payload)
            .await
            .map_err(at(ListingStage::Submitted))?;
        info!(
            stage = %ListingStage::Submitted,
            order_hash = receipt.order_hash.as_deref().unwrap_or("unknown"),
            "Listing submitted"
        );

        Ok(ListingOutcome { payload, receipt })
    }
}
