//! Benchmarks for the listing hot path: fee allocation, order assembly,
//! EIP-712 hashing and signing.
//!
//! Run with: `cargo bench --bench typed_data`

use alloy_primitives::{Address, U256};
use alloy_signer_local::PrivateKeySigner;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::str::FromStr;

use seaport_core::listing::{FeeAllocator, OrderBuilder};
use seaport_core::signing::{OrderSigner, SeaportDomain, TypedDataEncoder, SEPOLIA_CHAIN_ID};
use seaport_core::types::{FeeRule, NftAsset, Order, TokenStandard};

const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn fee_rules(count: usize) -> Vec<FeeRule> {
    (0..count)
        .map(|i| FeeRule::new(Decimal::new(5, 1), Address::repeat_byte(i as u8 + 1), true))
        .collect()
}

fn listing_price() -> U256 {
    U256::from(289_000_000_000_000_000u64)
}

fn sample_order(seller: Address, fee_count: usize) -> Order {
    let splits = FeeAllocator::new(seller)
        .allocate(listing_price(), &fee_rules(fee_count))
        .expect("valid fees");

    OrderBuilder::new()
        .offerer(seller)
        .asset(NftAsset {
            contract: Address::repeat_byte(0x30),
            token_id: U256::from(5u64),
            standard: TokenStandard::Erc721,
        })
        .price(listing_price())
        .splits(splits)
        .counter(U256::ZERO)
        .start_at(1_700_000_000)
        .salt(U256::from(42u64))
        .build()
        .expect("valid order")
}

fn bench_fee_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("fee_allocation");
    let seller = Address::repeat_byte(0x11);

    for count in [1usize, 4, 16] {
        let rules = fee_rules(count);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("rules", count), &rules, |b, rules| {
            let allocator = FeeAllocator::new(seller);
            b.iter(|| allocator.allocate(black_box(listing_price()), black_box(rules)))
        });
    }

    group.finish();
}

fn bench_typed_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_data");
    let seller = Address::repeat_byte(0x11);
    let domain = SeaportDomain::seaport(SEPOLIA_CHAIN_ID);

    for count in [1usize, 4, 16] {
        let order = sample_order(seller, count);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("encode", count), &order, |b, order| {
            b.iter(|| TypedDataEncoder::encode(black_box(order), &domain))
        });

        let encoded = TypedDataEncoder::encode(&order, &domain).expect("encodable");
        group.bench_with_input(
            BenchmarkId::new("signing_hash", count),
            &encoded,
            |b, encoded| b.iter(|| black_box(encoded).signing_hash()),
        );
    }

    group.bench_function("domain_separator", |b| {
        b.iter(|| black_box(&domain).separator())
    });

    group.finish();
}

fn bench_signing(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let signer = OrderSigner::new(PrivateKeySigner::from_str(TEST_PRIVATE_KEY).expect("key"));
    let domain = SeaportDomain::seaport(SEPOLIA_CHAIN_ID);
    let order = sample_order(signer.address(), 1);
    let encoded = TypedDataEncoder::encode(&order, &domain).expect("encodable");

    c.bench_function("sign_order", |b| {
        b.iter(|| {
            runtime
                .block_on(signer.sign(order.clone(), &encoded))
                .expect("signed")
        })
    });
}

criterion_group!(benches, bench_fee_allocation, bench_typed_data, bench_signing);
criterion_main!(benches);
