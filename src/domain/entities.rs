use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{geography::State, markup::MarkupRule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("unknown origin: {0}")]
    UnknownOrigin(String),
    #[error("unknown sort key: {0}")]
    UnknownSort(String),
}

/// Lowercases and strips separators so "Light Truck", "light-truck" and
/// "lighttruck" compare equal.
pub(crate) fn normalize_key(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_' | '/'))
        .collect()
}

/// Sales channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Retail,
    Fleet,
    Wholesale,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Retail, Channel::Fleet, Channel::Wholesale];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Retail => "Varejo",
            Channel::Fleet => "Frotista",
            Channel::Wholesale => "Atacado",
        }
    }
}

impl FromStr for Channel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "retail" | "varejo" => Ok(Channel::Retail),
            "fleet" | "frotista" | "frota" => Ok(Channel::Fleet),
            "wholesale" | "atacado" => Ok(Channel::Wholesale),
            _ => Err(ParseError::UnknownChannel(s.to_string())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tire segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Passenger,
    /// SUV-class passenger tires ("camioneta").
    LightTruck,
    Suv,
    Truck,
    Agricultural,
    OffTheRoad,
    InnerTube,
}

/// Coarse grouping used by the Pará rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryGroup {
    Passenger,
    Cargo,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Passenger,
        Category::LightTruck,
        Category::Suv,
        Category::Truck,
        Category::Agricultural,
        Category::OffTheRoad,
        Category::InnerTube,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Passenger => "Passeio",
            Category::LightTruck => "Camioneta",
            Category::Suv => "SUV",
            Category::Truck => "Carga",
            Category::Agricultural => "Agrícola",
            Category::OffTheRoad => "OTR",
            Category::InnerTube => "Câmara de Ar",
        }
    }

    pub fn group(&self) -> CategoryGroup {
        match self {
            Category::Passenger | Category::LightTruck | Category::Suv => CategoryGroup::Passenger,
            Category::Truck
            | Category::Agricultural
            | Category::OffTheRoad
            | Category::InnerTube => CategoryGroup::Cargo,
        }
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "passenger" | "passeio" => Ok(Category::Passenger),
            "lighttruck" | "camioneta" | "suvpassenger" => Ok(Category::LightTruck),
            "suv" => Ok(Category::Suv),
            "truck" | "cargo" | "carga" => Ok(Category::Truck),
            "agricultural" | "agricola" | "agrícola" => Ok(Category::Agricultural),
            "offtheroad" | "otr" => Ok(Category::OffTheRoad),
            "innertube" | "camaradear" | "câmaradear" => Ok(Category::InnerTube),
            _ => Err(ParseError::UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Manufacturing origin. Only the Pará rules look at it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    #[default]
    Domestic,
    Nationalized,
    Imported,
}

impl Origin {
    pub const ALL: [Origin; 3] = [Origin::Domestic, Origin::Nationalized, Origin::Imported];

    pub fn label(&self) -> &'static str {
        match self {
            Origin::Domestic => "Nacional",
            Origin::Nationalized => "Nacionalizado",
            Origin::Imported => "Importado",
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, Origin::Imported)
    }
}

impl FromStr for Origin {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "domestic" | "nacional" => Ok(Origin::Domestic),
            "nationalized" | "nacionalizado" | "domesticated" => Ok(Origin::Nationalized),
            "imported" | "importado" => Ok(Origin::Imported),
            _ => Err(ParseError::UnknownOrigin(s.to_string())),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a markup lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkupResult {
    pub rule: MarkupRule,
    pub multiplier: f64,
    pub explanation: String,
}

impl MarkupResult {
    /// True when no regional rule matched and the default markup was used.
    pub fn is_fallback(&self) -> bool {
        self.rule == MarkupRule::Default
    }
}

/// A sample tire measurement fed to the record generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasurementSeed {
    pub size: &'static str,
    pub brand: &'static str,
    pub category: Category,
    pub origin: Origin,
    /// Reference cost from the central warehouse.
    pub base_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompetitorQuote {
    pub competitor: String,
    pub price: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketPosition {
    Below,
    Aligned,
    Above,
}

impl MarketPosition {
    pub fn label(&self) -> &'static str {
        match self {
            MarketPosition::Below => "Abaixo",
            MarketPosition::Aligned => "Alinhado",
            MarketPosition::Above => "Acima",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketComparison {
    pub quotes: Vec<CompetitorQuote>,
    pub average: f64,
    pub lowest: Option<f64>,
    /// Relative distance of our price from the market average (0.05 = 5% above).
    pub gap_pct: f64,
    pub position: MarketPosition,
}

/// One priced combination produced by the record generator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricingRecord {
    pub id: String,
    pub state: State,
    pub city: String,
    pub channel: Channel,
    pub size: String,
    pub brand: String,
    pub category: Category,
    pub origin: Origin,
    pub base_cost: f64,
    pub markup: MarkupResult,
    pub final_price: f64,
    pub market: MarketComparison,
}

pub const MAX_COMPETITORS: u8 = 8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSettings {
    #[error("competitor count must be between 1 and {}, got {0}", MAX_COMPETITORS)]
    Competitors(u8),
    #[error("market spread must be a finite value between 0 and 1, got {0}")]
    MarketSpread(f64),
    #[error("alignment tolerance must be a finite value between 0 and 1, got {0}")]
    AlignmentTolerance(f64),
}

/// Knobs for the synthetic market data attached by the record generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub seed: u64,
    pub competitors: u8,
    pub market_spread_pct: f64,
    pub alignment_tolerance_pct: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            competitors: 3,
            market_spread_pct: 0.12,
            alignment_tolerance_pct: 0.03,
        }
    }
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), InvalidSettings> {
        if self.competitors == 0 || self.competitors > MAX_COMPETITORS {
            return Err(InvalidSettings::Competitors(self.competitors));
        }
        if !unit_fraction(self.market_spread_pct) {
            return Err(InvalidSettings::MarketSpread(self.market_spread_pct));
        }
        if !unit_fraction(self.alignment_tolerance_pct) {
            return Err(InvalidSettings::AlignmentTolerance(
                self.alignment_tolerance_pct,
            ));
        }
        Ok(())
    }
}

fn unit_fraction(value: f64) -> bool {
    value.is_finite() && (0.0..1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_parsing_accepts_labels_and_names() {
        assert_eq!("Varejo".parse::<Channel>(), Ok(Channel::Retail));
        assert_eq!("fleet".parse::<Channel>(), Ok(Channel::Fleet));
        assert_eq!(" ATACADO ".parse::<Channel>(), Ok(Channel::Wholesale));
        assert_eq!(
            "online".parse::<Channel>(),
            Err(ParseError::UnknownChannel("online".to_string()))
        );
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("light-truck".parse::<Category>(), Ok(Category::LightTruck));
        assert_eq!("Câmara de Ar".parse::<Category>(), Ok(Category::InnerTube));
        assert_eq!("OTR".parse::<Category>(), Ok(Category::OffTheRoad));
        assert_eq!("agrícola".parse::<Category>(), Ok(Category::Agricultural));
        assert!("moto".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_groups() {
        let passenger: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.group() == CategoryGroup::Passenger)
            .collect();
        assert_eq!(
            passenger,
            vec![Category::Passenger, Category::LightTruck, Category::Suv]
        );
        assert_eq!(Category::InnerTube.group(), CategoryGroup::Cargo);
    }

    #[test]
    fn test_origin_defaults_to_domestic() {
        assert_eq!(Origin::default(), Origin::Domestic);
        assert_eq!("importado".parse::<Origin>(), Ok(Origin::Imported));
        assert_eq!("domesticated".parse::<Origin>(), Ok(Origin::Nationalized));
    }

    #[test]
    fn test_settings_validation() {
        assert!(GeneratorSettings::default().validate().is_ok());

        let none = GeneratorSettings {
            competitors: 0,
            ..GeneratorSettings::default()
        };
        assert_eq!(none.validate(), Err(InvalidSettings::Competitors(0)));

        let negative = GeneratorSettings {
            market_spread_pct: -0.1,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(InvalidSettings::MarketSpread(_))
        ));

        let nan = GeneratorSettings {
            alignment_tolerance_pct: f64::NAN,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(InvalidSettings::AlignmentTolerance(_))
        ));
    }
}
