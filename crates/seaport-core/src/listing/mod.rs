//! Listing construction: price conversion, fee allocation, order assembly,
//! and the pipeline that ties them to signing and submission.

pub mod builder;
pub mod fees;
pub mod pipeline;
pub mod price;

pub use builder::{item_type_for, OrderBuilder};
pub use fees::FeeAllocator;
pub use pipeline::{
    CollectionSource, CounterSource, ListingPipeline, ListingRequest, ListingSink, ListingStage,
    ListingOutcome, PipelineError,
};
pub use price::{format_units, parse_decimal, parse_price, to_base_units};
