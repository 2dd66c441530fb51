//! Filtering and ordering of generated pricing records.

use std::{cmp::Ordering, str::FromStr};

use super::{
    entities::{normalize_key, Category, Channel, Origin, ParseError, PricingRecord},
    geography::State,
};

/// Sorting options for pricing records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordSort {
    #[default]
    State,
    FinalPrice,
    Multiplier,
    BaseCost,
    /// Distance from the market average.
    MarketGap,
}

impl RecordSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::State => "Estado",
            Self::FinalPrice => "Preço final",
            Self::Multiplier => "Markup",
            Self::BaseCost => "Custo base",
            Self::MarketGap => "Diferença de mercado",
        }
    }
}

impl FromStr for RecordSort {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "state" | "estado" => Ok(Self::State),
            "finalprice" | "price" | "preco" | "preço" => Ok(Self::FinalPrice),
            "multiplier" | "markup" => Ok(Self::Multiplier),
            "basecost" | "cost" | "custo" => Ok(Self::BaseCost),
            "marketgap" | "gap" => Ok(Self::MarketGap),
            _ => Err(ParseError::UnknownSort(s.to_string())),
        }
    }
}

/// Filter options for pricing records. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct RecordFilter {
    pub state: Option<State>,
    pub city: Option<String>,
    pub channel: Option<Channel>,
    pub category: Option<Category>,
    pub origin: Option<Origin>,
    /// Keep only records priced by the default rule.
    pub only_fallback: bool,
    pub min_multiplier: Option<f64>,
    pub max_multiplier: Option<f64>,
}

impl RecordFilter {
    pub fn matches(&self, record: &PricingRecord) -> bool {
        if let Some(state) = self.state {
            if record.state != state { return false; }
        }
        if let Some(ref city) = self.city {
            if &record.city != city { return false; }
        }
        if let Some(channel) = self.channel {
            if record.channel != channel { return false; }
        }
        if let Some(category) = self.category {
            if record.category != category { return false; }
        }
        if let Some(origin) = self.origin {
            if record.origin != origin { return false; }
        }
        if self.only_fallback && !record.markup.is_fallback() { return false; }
        if let Some(min) = self.min_multiplier {
            if record.markup.multiplier < min { return false; }
        }
        if let Some(max) = self.max_multiplier {
            if record.markup.multiplier > max { return false; }
        }

        true
    }

    pub fn apply<'a>(&self, records: &'a [PricingRecord]) -> Vec<&'a PricingRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn by_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sort records by the given criteria. Ties keep generation order.
pub fn sort_records(records: &mut [&PricingRecord], sort: RecordSort, descending: bool) {
    records.sort_by(|a, b| {
        let ord = match sort {
            RecordSort::State => a
                .state
                .name()
                .cmp(b.state.name())
                .then_with(|| a.city.cmp(&b.city)),
            RecordSort::FinalPrice => by_f64(a.final_price, b.final_price),
            RecordSort::Multiplier => by_f64(a.markup.multiplier, b.markup.multiplier),
            RecordSort::BaseCost => by_f64(a.base_cost, b.base_cost),
            RecordSort::MarketGap => by_f64(a.market.gap_pct, b.market.gap_pct),
        };
        if descending { ord.reverse() } else { ord }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        catalog::MEASUREMENTS, entities::GeneratorSettings, generator::generate_records,
    };

    #[test]
    fn test_sort_parsing() {
        assert_eq!("price".parse::<RecordSort>(), Ok(RecordSort::FinalPrice));
        assert_eq!("Market-Gap".parse::<RecordSort>(), Ok(RecordSort::MarketGap));
        assert!("volume".parse::<RecordSort>().is_err());
    }

    #[test]
    fn test_multiplier_sort_descending() {
        let records = generate_records(MEASUREMENTS, &GeneratorSettings::default()).unwrap();
        let mut view = RecordFilter::default().apply(&records);
        sort_records(&mut view, RecordSort::Multiplier, true);
        assert!(view
            .windows(2)
            .all(|pair| pair[0].markup.multiplier >= pair[1].markup.multiplier));
    }

    #[test]
    fn test_filter_by_city_and_channel() {
        let records = generate_records(MEASUREMENTS, &GeneratorSettings::default()).unwrap();
        let filter = RecordFilter {
            city: Some("Vilhena".to_string()),
            channel: Some(Channel::Wholesale),
            ..RecordFilter::default()
        };
        let view = filter.apply(&records);
        assert_eq!(view.len(), MEASUREMENTS.len());
        assert!(view.iter().all(|r| r.markup.multiplier == 1.55));
    }
}
