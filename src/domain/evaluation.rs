use std::collections::HashMap;

use serde::Serialize;

use super::{
    entities::{CompetitorQuote, MarketComparison, MarketPosition, PricingRecord},
    geography::State,
    pricing::round_to_cents,
};

/// Places our price against a set of competitor quotes.
///
/// The gap is measured against the market average; anything within
/// `tolerance_pct` of it counts as aligned.
pub fn market_comparison(
    our_price: f64,
    quotes: Vec<CompetitorQuote>,
    tolerance_pct: f64,
) -> MarketComparison {
    if quotes.is_empty() {
        return MarketComparison {
            quotes,
            average: 0.0,
            lowest: None,
            gap_pct: 0.0,
            position: MarketPosition::Aligned,
        };
    }

    let average = round_to_cents(
        quotes.iter().map(|quote| quote.price).sum::<f64>() / quotes.len() as f64,
    );
    let lowest = quotes
        .iter()
        .map(|quote| quote.price)
        .filter(|price| price.is_finite())
        .reduce(f64::min);

    let gap_pct = if average > 0.0 {
        (our_price - average) / average
    } else {
        0.0
    };

    let position = if gap_pct > tolerance_pct {
        MarketPosition::Above
    } else if gap_pct < -tolerance_pct {
        MarketPosition::Below
    } else {
        MarketPosition::Aligned
    };

    MarketComparison {
        quotes,
        average,
        lowest,
        gap_pct,
        position,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PricingSummary {
    pub records: usize,
    pub average_multiplier: f64,
    pub average_final_price: f64,
    pub below_market: usize,
    pub aligned_with_market: usize,
    pub above_market: usize,
    /// Records priced by the default rule instead of a regional one.
    pub fallback: usize,
    pub per_state: Vec<(State, usize)>,
}

pub fn summarize<'a, I>(records: I) -> PricingSummary
where
    I: IntoIterator<Item = &'a PricingRecord>,
{
    let mut summary = PricingSummary::default();
    let mut multiplier_sum = 0.0;
    let mut price_sum = 0.0;
    let mut per_state: HashMap<State, usize> = HashMap::new();

    for record in records {
        summary.records += 1;
        multiplier_sum += record.markup.multiplier;
        price_sum += record.final_price;
        match record.market.position {
            MarketPosition::Below => summary.below_market += 1,
            MarketPosition::Aligned => summary.aligned_with_market += 1,
            MarketPosition::Above => summary.above_market += 1,
        }
        if record.markup.is_fallback() {
            summary.fallback += 1;
        }
        *per_state.entry(record.state).or_default() += 1;
    }

    if summary.records > 0 {
        summary.average_multiplier = multiplier_sum / summary.records as f64;
        summary.average_final_price = round_to_cents(price_sum / summary.records as f64);
    }

    summary.per_state = State::ALL
        .into_iter()
        .filter_map(|state| per_state.get(&state).map(|count| (state, *count)))
        .collect();

    summary
}
