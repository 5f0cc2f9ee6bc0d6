use mythos_core::article::{Article, ArticleBody};
use mythos_core::person::{
    Gender, ImportantDate, LifeStatus, PersonData, Relationship, DEFAULT_RELATIONSHIP_STATUS,
};

use super::{
    build_submission, optional_text, parse_choice, parse_number, parse_optional_choice, push_item,
    remove_item, ArticleSubmission, CommonFields, FieldSpec, FormTarget,
};
use crate::error::FormError;

/// Form for character articles.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonForm {
    pub target: FormTarget,
    pub common: CommonFields,
    pub data: PersonData,
}

const TEXT_FIELDS: &[(&str, &str)] = &[
    ("race", "Race"),
    ("height", "Height"),
    ("weight", "Weight"),
    ("eye_color", "Eye color"),
    ("hair_color", "Hair color"),
    ("birthplace", "Birthplace"),
    ("current_location", "Current location"),
    ("occupation", "Occupation"),
    ("social_class", "Social class"),
    ("birth_date", "Birth date"),
    ("death_date", "Death date"),
    ("wealth", "Wealth"),
];

const LIST_FIELDS: &[(&str, &str)] = &[
    ("distinguishing_marks", "Distinguishing marks"),
    ("skills", "Skills"),
    ("abilities", "Abilities"),
    ("personality_traits", "Personality traits"),
    ("goals", "Goals"),
    ("fears", "Fears"),
    ("secrets", "Secrets"),
    ("notable_possessions", "Notable possessions"),
    ("organizations", "Organizations"),
    ("titles", "Titles"),
];

impl PersonForm {
    /// `data` is the article's existing payload, if any; it is edited as is.
    pub fn new(target: FormTarget, article: Option<&Article>, data: Option<PersonData>) -> Self {
        Self {
            target,
            common: CommonFields::from_article(article),
            data: data.unwrap_or_default(),
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = CommonFields::specs();
        fields.push(FieldSpec::choice("gender", "Gender", Gender::tags()));
        fields.push(FieldSpec::number("age", "Age"));
        fields.push(FieldSpec::choice("life_status", "Life status", LifeStatus::tags()));
        fields.extend(TEXT_FIELDS.iter().map(|&(name, label)| FieldSpec::text(name, label)));
        fields.extend(LIST_FIELDS.iter().map(|&(name, label)| FieldSpec::list(name, label)));
        fields
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        if self.common.set(field, value)? {
            return Ok(());
        }
        match field {
            "gender" => self.data.gender = parse_optional_choice(field, value)?,
            "life_status" => self.data.life_status = parse_choice(field, value)?,
            "age" => {
                let age: Option<i32> = parse_number(field, value)?;
                if age.is_some_and(|a| a < 0) {
                    return Err(FormError::invalid(field, "must not be negative"));
                }
                self.data.age = age;
            }
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

    /// Add a dated life event. Date and event are required; blank
    /// description or location are stored as absent.
    pub fn add_important_date(
        &mut self,
        date: &str,
        event: &str,
        description: &str,
        location: &str,
    ) -> Result<(), FormError> {
        let (date, event) = (date.trim(), event.trim());
        if date.is_empty() || event.is_empty() {
            return Err(FormError::Validation(
                "An important date needs both a date and an event".into(),
            ));
        }
        self.data.important_dates.push(ImportantDate {
            date: date.to_string(),
            event: event.to_string(),
            description: optional_text(description.trim()),
            location: optional_text(location.trim()),
        });
        Ok(())
    }

    pub fn remove_important_date(&mut self, index: usize) -> Option<ImportantDate> {
        (index < self.data.important_dates.len()).then(|| self.data.important_dates.remove(index))
    }

    /// Add a relationship with the default status.
    pub fn add_relationship(
        &mut self,
        person_name: &str,
        relationship_type: &str,
        description: &str,
    ) -> Result<(), FormError> {
        let (name, kind) = (person_name.trim(), relationship_type.trim());
        if name.is_empty() || kind.is_empty() {
            return Err(FormError::Validation(
                "A relationship needs both a name and a type".into(),
            ));
        }
        self.data.relationships.push(Relationship {
            person_name: name.to_string(),
            relationship_type: kind.to_string(),
            description: optional_text(description.trim()),
            status: DEFAULT_RELATIONSHIP_STATUS.to_string(),
        });
        Ok(())
    }

    pub fn remove_relationship(&mut self, index: usize) -> Option<Relationship> {
        (index < self.data.relationships.len()).then(|| self.data.relationships.remove(index))
    }

    pub fn submission(&self) -> Result<ArticleSubmission, FormError> {
        build_submission(
            self.target,
            &self.common,
            ArticleBody::Character(Some(self.data.clone())),
            None,
        )
    }

    fn text_field(&mut self, field: &str) -> Option<&mut Option<String>> {
        let data = &mut self.data;
        Some(match field {
            "race" => &mut data.race,
            "height" => &mut data.height,
            "weight" => &mut data.weight,
            "eye_color" => &mut data.eye_color,
            "hair_color" => &mut data.hair_color,
            "birthplace" => &mut data.birthplace,
            "current_location" => &mut data.current_location,
            "occupation" => &mut data.occupation,
            "social_class" => &mut data.social_class,
            "birth_date" => &mut data.birth_date,
            "death_date" => &mut data.death_date,
            "wealth" => &mut data.wealth,
            _ => return None,
        })
    }

    fn list_field(&mut self, field: &str) -> Option<&mut Vec<String>> {
        let data = &mut self.data;
        Some(match field {
            "distinguishing_marks" => &mut data.distinguishing_marks,
            "skills" => &mut data.skills,
            "abilities" => &mut data.abilities,
            "personality_traits" => &mut data.personality_traits,
            "goals" => &mut data.goals,
            "fears" => &mut data.fears,
            "secrets" => &mut data.secrets,
            "notable_possessions" => &mut data.notable_possessions,
            "organizations" => &mut data.organizations,
            "titles" => &mut data.titles,
            _ => return None,
        })
    }
}
