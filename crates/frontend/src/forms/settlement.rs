use mythos_core::article::{Article, ArticleBody};
use mythos_core::settlement::{Coordinates, GovernmentType, SettlementData, SettlementType};

use super::{
    build_submission, optional_text, parse_choice, parse_number, parse_optional_choice, push_item,
    remove_item, ArticleSubmission, CommonFields, FieldSpec, FormTarget,
};
use crate::error::FormError;

/// Form for location articles.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementForm {
    pub target: FormTarget,
    pub common: CommonFields,
    pub data: SettlementData,
}

impl SettlementForm {
    /// `data` is the article's existing payload, if any; it is edited as is.
    pub fn new(target: FormTarget, article: Option<&Article>, data: Option<SettlementData>) -> Self {
        Self {
            target,
            common: CommonFields::from_article(article),
            data: data.unwrap_or_default(),
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = CommonFields::specs();
        fields.extend([
            FieldSpec::choice("settlement_type", "Settlement type", SettlementType::tags()),
            FieldSpec::number("population", "Population"),
            FieldSpec::choice("government_type", "Government", GovernmentType::tags()),
            FieldSpec::text("ruler_name", "Ruler"),
            FieldSpec::text("founded_date", "Founded"),
            FieldSpec::long("defenses", "Defenses"),
            FieldSpec::text("climate", "Climate"),
            FieldSpec::text("terrain", "Terrain"),
            FieldSpec::text("wealth_level", "Wealth level"),
            FieldSpec::text("coordinates", "Coordinates (lat,lng)"),
            FieldSpec::text("region", "Region"),
            FieldSpec::text("primary_industry", "Primary industry"),
            FieldSpec::text("predominant_race", "Predominant race"),
        ]);
        fields.extend(
            LIST_FIELDS
                .iter()
                .map(|&(name, label)| FieldSpec::list(name, label)),
        );
        fields
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        if self.common.set(field, value)? {
            return Ok(());
        }
        let data = &mut self.data;
        match field {
            "settlement_type" => data.settlement_type = parse_choice(field, value)?,
            "population" => {
                let population: Option<i64> = parse_number(field, value)?;
                if population.is_some_and(|p| p < 0) {
                    return Err(FormError::invalid(field, "must not be negative"));
                }
                data.population = population;
            }
            "government_type" => data.government_type = parse_optional_choice(field, value)?,
            "coordinates" => data.coordinates = parse_coordinates(value)?,
            _ => match self.text_field(field) {
                Some(slot) => *slot = optional_text(value),
                None => return Err(FormError::unknown(field)),
            },
        }
        Ok(())
    }

    pub fn add(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        if field == "tags" {
            self.common.add_tag(item);
            return Ok(());
        }
        let list = self.list_field(field).ok_or_else(|| FormError::unknown(field))?;
        push_item(list, item);
        Ok(())
    }

    pub fn remove(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        if field == "tags" {
            self.common.remove_tag(item);
            return Ok(());
        }
        let list = self.list_field(field).ok_or_else(|| FormError::unknown(field))?;
        remove_item(list, item);
        Ok(())
    }

    pub fn submission(&self) -> Result<ArticleSubmission, FormError> {
        build_submission(
            self.target,
            &self.common,
            ArticleBody::Location(Some(self.data.clone())),
            None,
        )
    }

    fn text_field(&mut self, field: &str) -> Option<&mut Option<String>> {
        let data = &mut self.data;
        Some(match field {
            "ruler_name" => &mut data.ruler_name,
            "founded_date" => &mut data.founded_date,
            "defenses" => &mut data.defenses,
            "climate" => &mut data.climate,
            "terrain" => &mut data.terrain,
            "wealth_level" => &mut data.wealth_level,
            "region" => &mut data.region,
            "primary_industry" => &mut data.primary_industry,
            "predominant_race" => &mut data.predominant_race,
            _ => return None,
        })
    }

    fn list_field(&mut self, field: &str) -> Option<&mut Vec<String>> {
        let data = &mut self.data;
        Some(match field {
            "notable_features" => &mut data.notable_features,
            "trade_goods" => &mut data.trade_goods,
            "nearby_settlements" => &mut data.nearby_settlements,
            "secondary_industries" => &mut data.secondary_industries,
            "languages_spoken" => &mut data.languages_spoken,
            "religions" => &mut data.religions,
            "festivals" => &mut data.festivals,
            _ => return None,
        })
    }
}

const LIST_FIELDS: &[(&str, &str)] = &[
    ("notable_features", "Notable features"),
    ("trade_goods", "Trade goods"),
    ("nearby_settlements", "Nearby settlements"),
    ("secondary_industries", "Secondary industries"),
    ("languages_spoken", "Languages spoken"),
    ("religions", "Religions"),
    ("festivals", "Festivals"),
];

/// `"lat,lng"`; empty input clears.
fn parse_coordinates(value: &str) -> Result<Option<Coordinates>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let invalid = || FormError::invalid("coordinates", "expected 'lat,lng'");
    let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(FormError::invalid("coordinates", "out of range"));
    }
    Ok(Some(Coordinates { lat, lng }))
}
