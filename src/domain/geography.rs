//! Static geography for the regional pricing rules.
//!
//! Six northern states are priced by the engine. Each one lists the cities the
//! rule table recognizes; anything else falls back to the default markup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Capital of Rondônia, priced apart from the interior.
pub const RONDONIA_CAPITAL: &str = "Porto Velho";
/// Rondônia interior cities sharing one rate table.
pub const RONDONIA_INTERIOR: [&str; 3] = ["Ariquemes", "Ji-Paraná", "Vilhena"];
/// Pará cities sharing the Belém rate table.
pub const BELEM_GROUP: [&str; 2] = ["Belém", "Santarém"];
/// Pará city that carries the +4% surcharge on some rules.
pub const PARAUAPEBAS: &str = "Parauapebas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum State {
    Amazonas,
    Roraima,
    Acre,
    #[serde(rename = "Amapá")]
    Amapa,
    #[serde(rename = "Rondônia")]
    Rondonia,
    #[serde(rename = "Pará")]
    Para,
}

impl State {
    pub const ALL: [State; 6] = [
        State::Amazonas,
        State::Roraima,
        State::Acre,
        State::Amapa,
        State::Rondonia,
        State::Para,
    ];

    /// Canonical state name, accents included.
    pub fn name(&self) -> &'static str {
        match self {
            State::Amazonas => "Amazonas",
            State::Roraima => "Roraima",
            State::Acre => "Acre",
            State::Amapa => "Amapá",
            State::Rondonia => "Rondônia",
            State::Para => "Pará",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            State::Amazonas => "AM",
            State::Roraima => "RR",
            State::Acre => "AC",
            State::Amapa => "AP",
            State::Rondonia => "RO",
            State::Para => "PA",
        }
    }

    /// Cities recognized for this state, in display order.
    pub fn cities(&self) -> &'static [&'static str] {
        match self {
            State::Amazonas => &["Manaus"],
            State::Roraima => &["Boa Vista"],
            State::Acre => &["Rio Branco"],
            State::Amapa => &["Macapá"],
            State::Rondonia => &["Porto Velho", "Ariquemes", "Ji-Paraná", "Vilhena"],
            State::Para => &["Belém", "Santarém", "Parauapebas"],
        }
    }

    pub fn has_city(&self, city: &str) -> bool {
        self.cities().contains(&city)
    }

    /// Exact, case-sensitive lookup by canonical name or two-letter abbreviation.
    pub fn parse(input: &str) -> Option<Self> {
        State::ALL
            .into_iter()
            .find(|state| state.name() == input || state.abbreviation() == input)
    }

    pub fn region(&self) -> Region {
        Region {
            state: *self,
            state_name: self.name(),
            abbreviation: self.abbreviation(),
            cities: self.cities(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the geography table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub state: State,
    pub state_name: &'static str,
    pub abbreviation: &'static str,
    pub cities: &'static [&'static str],
}

pub fn regions() -> impl Iterator<Item = Region> {
    State::ALL.into_iter().map(|state| state.region())
}

pub fn find_region(state: &str) -> Option<Region> {
    State::parse(state).map(|state| state.region())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parsing() {
        assert_eq!(State::parse("Pará"), Some(State::Para));
        assert_eq!(State::parse("PA"), Some(State::Para));
        assert_eq!(State::parse("Rondônia"), Some(State::Rondonia));
        assert_eq!(State::parse("AM"), Some(State::Amazonas));
        assert_eq!(State::parse("pará"), None);
        assert_eq!(State::parse("São Paulo"), None);
        assert_eq!(State::parse(" Pará"), None);
        assert_eq!(State::parse("PA "), None);
    }

    #[test]
    fn test_rule_cities_belong_to_their_state() {
        assert!(State::Amazonas.has_city("Manaus"));
        assert!(State::Rondonia.has_city(RONDONIA_CAPITAL));
        for city in RONDONIA_INTERIOR {
            assert!(State::Rondonia.has_city(city), "{city} missing from Rondônia");
        }
        for city in BELEM_GROUP {
            assert!(State::Para.has_city(city), "{city} missing from Pará");
        }
        assert!(State::Para.has_city(PARAUAPEBAS));
    }

    #[test]
    fn test_city_counts() {
        assert_eq!(State::Rondonia.cities().len(), 4);
        assert_eq!(State::Para.cities().len(), 3);
        assert_eq!(regions().count(), 6);
    }

    #[test]
    fn test_find_region() {
        let region = find_region("RO").expect("Rondônia by abbreviation");
        assert_eq!(region.state_name, "Rondônia");
        assert_eq!(region.cities[0], "Porto Velho");
        assert!(find_region("SP").is_none());
    }
}
