//! Regional markup rules.
//!
//! Rules are evaluated top to bottom and the first match wins. The table ends
//! with [`MarkupRule::Default`], which matches everything, so a lookup always
//! produces a multiplier.

use serde::Serialize;

use super::{
    entities::{Category, CategoryGroup, Channel, MarkupResult, Origin},
    geography::{State, BELEM_GROUP, PARAUAPEBAS, RONDONIA_CAPITAL, RONDONIA_INTERIOR},
    pricing::apply_surcharge,
};

/// Multiplier used when no regional rule applies.
pub const DEFAULT_MULTIPLIER: f64 = 1.5;
/// Parauapebas surcharge over the Belém group rates (+4%).
pub const PARAUAPEBAS_SURCHARGE: f64 = 1.04;

/// Multipliers per sales channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChannelRates {
    pub retail: f64,
    pub fleet: f64,
    pub wholesale: f64,
}

impl ChannelRates {
    pub const fn new(retail: f64, fleet: f64, wholesale: f64) -> Self {
        Self {
            retail,
            fleet,
            wholesale,
        }
    }

    /// Retail rate plus one rate shared by every other channel.
    pub const fn retail_and_others(retail: f64, others: f64) -> Self {
        Self::new(retail, others, others)
    }

    pub fn for_channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Retail => self.retail,
            Channel::Fleet => self.fleet,
            Channel::Wholesale => self.wholesale,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParaCity {
    Belem,
    Parauapebas,
}

impl ParaCity {
    fn classify(city: &str) -> Option<Self> {
        if BELEM_GROUP.contains(&city) {
            Some(ParaCity::Belem)
        } else if city == PARAUAPEBAS {
            Some(ParaCity::Parauapebas)
        } else {
            None
        }
    }
}

/// Normalized inputs the rule predicates look at.
#[derive(Clone, Copy, Debug)]
struct RuleInput<'a> {
    state: Option<State>,
    city: &'a str,
    group: CategoryGroup,
    origin: Origin,
}

impl RuleInput<'_> {
    fn para(&self, group: CategoryGroup, imported: bool, city: ParaCity) -> bool {
        self.state == Some(State::Para)
            && self.group == group
            && self.origin.is_imported() == imported
            && ParaCity::classify(self.city) == Some(city)
    }
}

/// Entries of the pricing table, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupRule {
    Manaus,
    /// Roraima, Acre and Amapá share one table.
    NorthernStates,
    PortoVelho,
    RondoniaInterior,
    ParaPassengerDomesticBelem,
    ParaPassengerDomesticParauapebas,
    ParaPassengerImportedBelem,
    ParaPassengerImportedParauapebas,
    ParaCargoDomesticBelem,
    ParaCargoDomesticParauapebas,
    ParaCargoImportedBelem,
    ParaCargoImportedParauapebas,
    Default,
}

impl MarkupRule {
    pub const ORDER: [MarkupRule; 13] = [
        MarkupRule::Manaus,
        MarkupRule::NorthernStates,
        MarkupRule::PortoVelho,
        MarkupRule::RondoniaInterior,
        MarkupRule::ParaPassengerDomesticBelem,
        MarkupRule::ParaPassengerDomesticParauapebas,
        MarkupRule::ParaPassengerImportedBelem,
        MarkupRule::ParaPassengerImportedParauapebas,
        MarkupRule::ParaCargoDomesticBelem,
        MarkupRule::ParaCargoDomesticParauapebas,
        MarkupRule::ParaCargoImportedBelem,
        MarkupRule::ParaCargoImportedParauapebas,
        MarkupRule::Default,
    ];

    /// Rates before any surcharge.
    pub fn base_rates(&self) -> ChannelRates {
        match self {
            MarkupRule::Manaus => ChannelRates::new(1.5, 1.4, 1.3),
            MarkupRule::NorthernStates => ChannelRates::new(1.57, 1.47, 1.3),
            MarkupRule::PortoVelho => ChannelRates::new(1.9, 1.65, 1.53),
            MarkupRule::RondoniaInterior => ChannelRates::new(1.92, 1.67, 1.55),
            MarkupRule::ParaPassengerDomesticBelem => ChannelRates::retail_and_others(1.46, 1.36),
            MarkupRule::ParaPassengerDomesticParauapebas => {
                ChannelRates::retail_and_others(1.5, 1.4)
            }
            MarkupRule::ParaPassengerImportedBelem
            | MarkupRule::ParaPassengerImportedParauapebas => {
                ChannelRates::retail_and_others(1.95, 1.85)
            }
            MarkupRule::ParaCargoDomesticBelem | MarkupRule::ParaCargoDomesticParauapebas => {
                ChannelRates::retail_and_others(1.78, 1.39)
            }
            MarkupRule::ParaCargoImportedBelem | MarkupRule::ParaCargoImportedParauapebas => {
                ChannelRates::retail_and_others(1.78, 1.7)
            }
            MarkupRule::Default => ChannelRates::new(
                DEFAULT_MULTIPLIER,
                DEFAULT_MULTIPLIER,
                DEFAULT_MULTIPLIER,
            ),
        }
    }

    pub fn surcharge(&self) -> Option<f64> {
        match self {
            MarkupRule::ParaPassengerImportedParauapebas
            | MarkupRule::ParaCargoDomesticParauapebas
            | MarkupRule::ParaCargoImportedParauapebas => Some(PARAUAPEBAS_SURCHARGE),
            _ => None,
        }
    }

    /// Effective multiplier for a channel, surcharge included.
    pub fn multiplier(&self, channel: Channel) -> f64 {
        let base = self.base_rates().for_channel(channel);
        match self.surcharge() {
            Some(factor) => apply_surcharge(base, factor),
            None => base,
        }
    }

    /// Effective rates for all channels.
    pub fn rates(&self) -> ChannelRates {
        ChannelRates::new(
            self.multiplier(Channel::Retail),
            self.multiplier(Channel::Fleet),
            self.multiplier(Channel::Wholesale),
        )
    }

    pub fn is_explicit(&self) -> bool {
        !matches!(self, MarkupRule::Default)
    }

    pub fn description(&self) -> &'static str {
        match self {
            MarkupRule::Manaus => "Amazonas / Manaus",
            MarkupRule::NorthernStates => "Roraima, Acre, Amapá",
            MarkupRule::PortoVelho => "Rondônia / Porto Velho",
            MarkupRule::RondoniaInterior => "Rondônia / interior",
            MarkupRule::ParaPassengerDomesticBelem => {
                "Pará / Belém e Santarém / passeio nacional"
            }
            MarkupRule::ParaPassengerDomesticParauapebas => {
                "Pará / Parauapebas / passeio nacional"
            }
            MarkupRule::ParaPassengerImportedBelem => "Pará / Belém e Santarém / passeio importado",
            MarkupRule::ParaPassengerImportedParauapebas => {
                "Pará / Parauapebas / passeio importado"
            }
            MarkupRule::ParaCargoDomesticBelem => "Pará / Belém e Santarém / carga nacional",
            MarkupRule::ParaCargoDomesticParauapebas => "Pará / Parauapebas / carga nacional",
            MarkupRule::ParaCargoImportedBelem => "Pará / Belém e Santarém / carga importada",
            MarkupRule::ParaCargoImportedParauapebas => "Pará / Parauapebas / carga importada",
            MarkupRule::Default => "Regra padrão",
        }
    }

    fn matches(&self, input: &RuleInput<'_>) -> bool {
        use CategoryGroup::{Cargo, Passenger};

        match self {
            MarkupRule::Manaus => input.state == Some(State::Amazonas) && input.city == "Manaus",
            MarkupRule::NorthernStates => matches!(
                input.state,
                Some(State::Roraima | State::Acre | State::Amapa)
            ),
            MarkupRule::PortoVelho => {
                input.state == Some(State::Rondonia) && input.city == RONDONIA_CAPITAL
            }
            MarkupRule::RondoniaInterior => {
                input.state == Some(State::Rondonia) && RONDONIA_INTERIOR.contains(&input.city)
            }
            MarkupRule::ParaPassengerDomesticBelem => input.para(Passenger, false, ParaCity::Belem),
            MarkupRule::ParaPassengerDomesticParauapebas => {
                input.para(Passenger, false, ParaCity::Parauapebas)
            }
            MarkupRule::ParaPassengerImportedBelem => input.para(Passenger, true, ParaCity::Belem),
            MarkupRule::ParaPassengerImportedParauapebas => {
                input.para(Passenger, true, ParaCity::Parauapebas)
            }
            MarkupRule::ParaCargoDomesticBelem => input.para(Cargo, false, ParaCity::Belem),
            MarkupRule::ParaCargoDomesticParauapebas => {
                input.para(Cargo, false, ParaCity::Parauapebas)
            }
            MarkupRule::ParaCargoImportedBelem => input.para(Cargo, true, ParaCity::Belem),
            MarkupRule::ParaCargoImportedParauapebas => {
                input.para(Cargo, true, ParaCity::Parauapebas)
            }
            MarkupRule::Default => true,
        }
    }

    fn explain(&self, channel: Channel) -> String {
        let multiplier = self.multiplier(channel);
        if !self.is_explicit() {
            return format!("{}: markup {:.2}", self.description(), multiplier);
        }
        match self.surcharge() {
            Some(factor) => format!(
                "{} ({}): {:.2} + {:.0}% = {:.2}",
                self.description(),
                channel.label(),
                self.base_rates().for_channel(channel),
                (factor - 1.0) * 100.0,
                multiplier
            ),
            None => format!(
                "{} ({}): markup {:.2}",
                self.description(),
                channel.label(),
                multiplier
            ),
        }
    }
}

/// Looks up the markup for a sale.
///
/// `state` accepts the canonical name or the two-letter abbreviation. `origin`
/// only matters for Pará, where it defaults to domestic. Combinations outside
/// the regional table resolve to [`DEFAULT_MULTIPLIER`]; this never fails.
pub fn resolve_markup(
    state: &str,
    city: &str,
    channel: Channel,
    category: Category,
    origin: Option<Origin>,
) -> MarkupResult {
    let input = RuleInput {
        state: State::parse(state),
        city,
        group: category.group(),
        origin: origin.unwrap_or_default(),
    };

    let rule = MarkupRule::ORDER
        .into_iter()
        .find(|rule| rule.matches(&input))
        .unwrap_or(MarkupRule::Default);

    MarkupResult {
        rule,
        multiplier: rule.multiplier(channel),
        explanation: rule.explain(channel),
    }
}
