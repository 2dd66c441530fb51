//! Pricing domain: geography, markup rules, and the record generator.

pub mod app_state;
pub mod catalog;
pub mod entities;
pub mod evaluation;
pub mod generator;
pub mod geography;
pub mod markup;
pub mod pricing;
pub mod records;

pub use app_state::{Dashboard, RecordBatch};
pub use entities::{
    Category, CategoryGroup, Channel, CompetitorQuote, GeneratorSettings, InvalidSettings,
    MarketComparison, MarketPosition, MarkupResult, MeasurementSeed, Origin, ParseError,
    PricingRecord, MAX_COMPETITORS,
};
pub use evaluation::{market_comparison, summarize, PricingSummary};
pub use generator::generate_records;
pub use geography::{find_region, regions, Region, State};
pub use markup::{resolve_markup, ChannelRates, MarkupRule, DEFAULT_MULTIPLIER};
pub use pricing::{compute_final_price, round_to_cents};
pub use records::{sort_records, RecordFilter, RecordSort};
