//! list-nft
//!
//! Lists an owned NFT on OpenSea through a signed Seaport 1.6 order.

mod wallet;

use alloy_primitives::{Address, U256};
use anyhow::{Context, Result};
use clap::Parser;
use seaport_core::api::{OpenSeaClient, SeaportRpc};
use seaport_core::config::{Config, Network};
use seaport_core::listing::{parse_decimal, ListingPipeline, ListingRequest};
use seaport_core::signing::OrderSigner;
use seaport_core::types::Nft;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::wallet::SellerWallet;

#[derive(Debug, Parser)]
#[command(name = "list-nft", version, about = "List an NFT on OpenSea via Seaport")]
struct Args {
    /// NFT contract address.
    #[arg(long)]
    contract: Address,

    /// ethereum or sepolia.
    #[arg(long, default_value = "sepolia")]
    network: Network,

    /// Price in the payment token's whole units, e.g. 0.289.
    #[arg(long)]
    price: String,

    /// Token to list; defaults to the first one the wallet holds in the collection.
    #[arg(long)]
    token_id: Option<String>,

    /// Listing validity in seconds.
    #[arg(long, env = "LISTING_WINDOW_SECS")]
    window_secs: Option<u64>,

    /// Sign but do not submit; prints the signed payload.
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "list_nft=info,seaport_core=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the payload/receipt JSON
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    let price = parse_decimal(&args.price)?;
    let config = Config::from_env()?;
    let wallet = SellerWallet::from_env()?;
    info!(
        seller = %wallet.address(),
        network = %args.network,
        contract = %args.contract,
        "Starting listing"
    );

    let opensea = Arc::new(OpenSeaClient::new(&config, args.network)?);
    let rpc = SeaportRpc::from_config(&config, args.network)?;

    let contract = opensea
        .get_contract(args.contract)
        .await
        .context("Failed to resolve contract")?;
    info!(
        collection = %contract.collection,
        standard = %contract.contract_standard,
        "Resolved contract"
    );

    let nfts = opensea
        .get_account_nfts(wallet.address(), &contract.collection)
        .await
        .context("Failed to fetch wallet NFTs")?;
    let nft = select_nft(&nfts, args.token_id.as_deref())?;
    let asset = nft.to_asset()?;
    info!(
        token_id = %asset.token_id,
        name = nft.name.as_deref().unwrap_or(""),
        "Selected NFT"
    );

    report_market(&opensea, &contract.collection, asset.contract, &nft.identifier).await;

    let domain = rpc.domain().await.context("Failed to read Seaport domain")?;
    if domain.chain_id != U256::from(args.network.chain_id()) {
        anyhow::bail!(
            "RPC endpoint serves chain {}, expected {} for {}",
            domain.chain_id,
            args.network.chain_id(),
            args.network
        );
    }

    let window = args
        .window_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.listing.window());

    let pipeline = ListingPipeline::new(
        opensea.clone(),
        rpc,
        OrderSigner::new(wallet.into_signer()),
        opensea.clone(),
        domain,
    )
    .with_listing_window(window);

    let request = ListingRequest {
        asset,
        collection: contract.collection.clone(),
        price,
    };

    if args.dry_run {
        let payload = pipeline.prepare(&request).await?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        info!("Dry run: listing signed but not submitted");
        return Ok(());
    }

    let outcome = pipeline.run(&request).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.receipt)?);

    Ok(())
}

/// The requested token, or the first one held when none is named.
fn select_nft<'a>(nfts: &'a [Nft], token_id: Option<&str>) -> Result<&'a Nft> {
    match token_id {
        Some(id) => nfts
            .iter()
            .find(|nft| nft.identifier == id)
            .with_context(|| format!("Token {} is not held by the wallet in this collection", id)),
        None => nfts
            .first()
            .context("Wallet holds no NFTs in this collection"),
    }
}

/// Log the current best listing and last sale. Neither blocks listing.
async fn report_market(opensea: &OpenSeaClient, collection: &str, contract: Address, identifier: &str) {
    match opensea.get_best_listing(collection, identifier).await {
        Ok(listing) => info!(
            price = %listing.display_price(),
            order_hash = %listing.order_hash,
            "Current best listing"
        ),
        Err(e) => warn!(error = %e, "No current listing found"),
    }

    match opensea.get_last_sale(contract, identifier).await {
        Ok(Some(payment)) => info!(
            quantity = %payment.quantity,
            symbol = %payment.symbol,
            decimals = payment.decimals,
            "Last sale"
        ),
        Ok(None) => info!("No previous sales"),
        Err(e) => warn!(error = %e, "Failed to fetch last sale"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nft(identifier: &str) -> Nft {
        Nft {
            identifier: identifier.to_string(),
            contract: "0x300b105942d6d181cdfe8199fd48eb09d26efd24".to_string(),
            token_standard: "erc721".to_string(),
            name: None,
        }
    }

    #[test]
    fn test_select_first_nft_by_default() {
        let nfts = vec![nft("5"), nft("9")];
        assert_eq!(select_nft(&nfts, None).unwrap().identifier, "5");
    }

    #[test]
    fn test_select_named_nft() {
        let nfts = vec![nft("5"), nft("9")];
        assert_eq!(select_nft(&nfts, Some("9")).unwrap().identifier, "9");
        assert!(select_nft(&nfts, Some("10")).is_err());
    }

    #[test]
    fn test_select_from_empty_wallet() {
        assert!(select_nft(&[], None).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "list-nft",
            "--contract",
            "0x300b105942d6d181cdfe8199fd48eb09d26efd24",
            "--network",
            "ethereum",
            "--price",
            "0.289",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(args.network, Network::Ethereum);
        assert_eq!(args.price, "0.289");
        assert!(args.dry_run);
        assert!(args.token_id.is_none());
    }

    #[test]
    fn test_args_reject_unknown_network() {
        let result = Args::try_parse_from([
            "list-nft",
            "--contract",
            "0x300b105942d6d181cdfe8199fd48eb09d26efd24",
            "--network",
            "polygon",
            "--price",
            "1",
        ]);
        assert!(result.is_err());
    }
}
