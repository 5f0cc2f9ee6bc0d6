//! Settlement payload attached to location articles.

use serde::{Deserialize, Serialize};

crate::string_enum! {
    pub enum SettlementType {
        City => "city",
        Town => "town",
        Village => "village",
        Hamlet => "hamlet",
        Metropolis => "metropolis",
        Capital => "capital",
        Fortress => "fortress",
        Outpost => "outpost",
        TradingPost => "trading_post",
        Ruins => "ruins",
    }
}

impl Default for SettlementType {
    fn default() -> Self {
        SettlementType::Village
    }
}

crate::string_enum! {
    pub enum GovernmentType {
        Monarchy => "monarchy",
        Democracy => "democracy",
        Oligarchy => "oligarchy",
        Theocracy => "theocracy",
        Tribal => "tribal",
        Anarchy => "anarchy",
        Council => "council",
        Dictatorship => "dictatorship",
    }
}

/// Map position of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Structured data for a settlement (city, village, fortress, ...).
///
/// Missing list fields decode as empty lists so partially filled payloads
/// from older clients still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementData {
    pub settlement_type: SettlementType,
    pub population: Option<i64>,
    pub government_type: Option<GovernmentType>,
    pub ruler_name: Option<String>,
    pub founded_date: Option<String>,
    pub notable_features: Vec<String>,
    pub trade_goods: Vec<String>,
    pub defenses: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub wealth_level: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub region: Option<String>,
    pub nearby_settlements: Vec<String>,
    pub primary_industry: Option<String>,
    pub secondary_industries: Vec<String>,
    pub predominant_race: Option<String>,
    pub languages_spoken: Vec<String>,
    pub religions: Vec<String>,
    pub festivals: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn default_is_empty_village() {
        let data = SettlementData::default();
        assert_eq!(data.settlement_type, SettlementType::Village);
        assert!(data.population.is_none());
        assert!(data.trade_goods.is_empty());
    }

    #[test]
    fn partial_payload_decodes() {
        let data: SettlementData = serde_json::from_value(serde_json::json!({
            "settlement_type": "trading_post",
            "population": 450,
            "trade_goods": ["salt", "amber"]
        }))
        .unwrap();
        assert_eq!(data.settlement_type, SettlementType::TradingPost);
        assert_eq!(data.population, Some(450));
        assert_eq!(data.trade_goods, vec!["salt", "amber"]);
        assert!(data.religions.is_empty());
    }

    #[test]
    fn enum_tags_and_labels() {
        assert_eq!(SettlementType::TradingPost.as_str(), "trading_post");
        assert_eq!(SettlementType::TradingPost.label(), "Trading post");
        assert_eq!(
            GovernmentType::from_str("council").unwrap(),
            GovernmentType::Council
        );
        assert!(GovernmentType::from_str("empire").is_err());
    }
}
