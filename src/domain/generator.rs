//! Builds the pricing grid shown on the dashboard.
//!
//! Every state × city × channel × measurement combination is priced through
//! the markup engine and paired with synthetic competitor quotes. Quotes come
//! from a seeded generator so the same settings always produce the same grid.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::{
    entities::{
        Channel, CompetitorQuote, GeneratorSettings, InvalidSettings, MeasurementSeed,
        PricingRecord, MAX_COMPETITORS,
    },
    evaluation::market_comparison,
    geography::State,
    markup::resolve_markup,
    pricing::{compute_final_price, round_to_cents},
};

const COMPETITORS: [&str; MAX_COMPETITORS as usize] = [
    "Pneus Norte",
    "Roda Forte",
    "Amazon Pneus",
    "Rodobens",
    "Pneumar",
    "Casa do Pneu",
    "Tapajós Pneus",
    "Rondon Pneus",
];

/// Prices the full grid. Settings are validated first, so a NaN or
/// out-of-range spread is reported instead of reaching the quote sampler.
pub fn generate_records(
    measurements: &[MeasurementSeed],
    settings: &GeneratorSettings,
) -> Result<Vec<PricingRecord>, InvalidSettings> {
    settings.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(settings.seed);
    let competitors = usize::from(settings.competitors.min(MAX_COMPETITORS));
    let mut records = Vec::new();

    for state in State::ALL {
        let before = records.len();
        for city in state.cities() {
            for channel in Channel::ALL {
                for seed in measurements {
                    let markup = resolve_markup(
                        state.name(),
                        city,
                        channel,
                        seed.category,
                        Some(seed.origin),
                    );
                    let final_price = compute_final_price(seed.base_cost, markup.multiplier);
                    let quotes = competitor_quotes(
                        &mut rng,
                        final_price,
                        competitors,
                        settings.market_spread_pct,
                    );
                    let market =
                        market_comparison(final_price, quotes, settings.alignment_tolerance_pct);

                    records.push(PricingRecord {
                        id: format!("REC-{:05}", records.len() + 1),
                        state,
                        city: city.to_string(),
                        channel,
                        size: seed.size.to_string(),
                        brand: seed.brand.to_string(),
                        category: seed.category,
                        origin: seed.origin,
                        base_cost: seed.base_cost,
                        markup,
                        final_price,
                        market,
                    });
                }
            }
        }
        debug!(state = state.name(), records = records.len() - before, "priced state");
    }

    info!(
        records = records.len(),
        measurements = measurements.len(),
        seed = settings.seed,
        "generated pricing records"
    );
    Ok(records)
}

fn competitor_quotes(
    rng: &mut ChaCha8Rng,
    our_price: f64,
    count: usize,
    spread_pct: f64,
) -> Vec<CompetitorQuote> {
    COMPETITORS
        .iter()
        .take(count)
        .map(|name| {
            let deviation: f64 = rng.gen_range(-spread_pct..=spread_pct);
            CompetitorQuote {
                competitor: (*name).to_string(),
                price: round_to_cents(our_price * (1.0 + deviation)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::MEASUREMENTS;

    #[test]
    fn test_grid_size() {
        let settings = GeneratorSettings::default();
        let records = generate_records(&MEASUREMENTS[..2], &settings).unwrap();
        let cities: usize = State::ALL.iter().map(|s| s.cities().len()).sum();
        assert_eq!(records.len(), cities * Channel::ALL.len() * 2);
        assert_eq!(records[0].id, "REC-00001");
    }

    #[test]
    fn test_quotes_stay_within_spread() {
        let settings = GeneratorSettings {
            market_spread_pct: 0.1,
            competitors: 5,
            ..GeneratorSettings::default()
        };
        for record in generate_records(MEASUREMENTS, &settings).unwrap() {
            assert_eq!(record.market.quotes.len(), 5);
            for quote in &record.market.quotes {
                let low = round_to_cents(record.final_price * 0.9) - 0.01;
                let high = round_to_cents(record.final_price * 1.1) + 0.01;
                assert!(
                    quote.price >= low && quote.price <= high,
                    "{} outside [{low}, {high}]",
                    quote.price
                );
            }
        }
    }

    #[test]
    fn test_zero_spread_matches_our_price() {
        let settings = GeneratorSettings {
            market_spread_pct: 0.0,
            ..GeneratorSettings::default()
        };
        let records = generate_records(&MEASUREMENTS[..1], &settings).unwrap();
        assert!(records
            .iter()
            .all(|r| r.market.quotes.iter().all(|q| q.price == r.final_price)));
    }

    #[test]
    fn test_nan_spread_is_rejected_before_sampling() {
        let settings = GeneratorSettings {
            market_spread_pct: f64::NAN,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            generate_records(&MEASUREMENTS[..1], &settings),
            Err(InvalidSettings::MarketSpread(_))
        ));
    }

    #[test]
    fn test_spread_above_one_is_rejected() {
        let settings = GeneratorSettings {
            market_spread_pct: 5.0,
            ..GeneratorSettings::default()
        };
        assert_eq!(
            generate_records(MEASUREMENTS, &settings),
            Err(InvalidSettings::MarketSpread(5.0))
        );
    }

    #[test]
    fn test_widest_valid_spread_keeps_quotes_positive() {
        let settings = GeneratorSettings {
            market_spread_pct: 0.99,
            competitors: MAX_COMPETITORS,
            ..GeneratorSettings::default()
        };
        let records = generate_records(MEASUREMENTS, &settings).unwrap();
        assert!(records
            .iter()
            .flat_map(|r| &r.market.quotes)
            .all(|q| q.price >= 0.0));
    }
}
