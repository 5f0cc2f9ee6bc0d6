use mythos_core::article::Article;
use mythos_core::person::PersonData;

use super::{render_footer, render_header, Doc};

pub const NO_PERSON_DATA: &str = "No person data available";

/// View for character articles.
#[derive(Debug, Clone, Copy)]
pub struct PersonView<'a> {
    article: &'a Article,
    data: Option<&'a PersonData>,
}

impl<'a> PersonView<'a> {
    pub fn new(article: &'a Article, data: Option<&'a PersonData>) -> Self {
        Self { article, data }
    }

    pub fn render(&self) -> String {
        let Some(data) = self.data else {
            return NO_PERSON_DATA.to_string();
        };
        let article = self.article;
        let mut doc = Doc::new();

        let mut badges = vec![data.life_status.label()];
        if let Some(gender) = data.gender {
            badges.push(gender.label());
        }
        badges.push(article.visibility.label());
        render_header(&mut doc, article, &badges);
        doc.field("Occupation", data.occupation.as_deref());

        doc.text_section("Description", article.content.main_content.as_deref());

        if data.height.is_some()
            || data.weight.is_some()
            || data.eye_color.is_some()
            || data.hair_color.is_some()
            || !data.distinguishing_marks.is_empty()
        {
            doc.section("Physical Appearance");
            doc.field("Height", data.height.as_deref());
            doc.field("Weight", data.weight.as_deref());
            doc.field("Eyes", data.eye_color.as_deref());
            doc.field("Hair", data.hair_color.as_deref());
            doc.inline_list("Distinguishing marks", &data.distinguishing_marks);
        }

        if !data.skills.is_empty() || !data.abilities.is_empty() || !data.personality_traits.is_empty() {
            doc.section("Abilities & Traits");
            doc.inline_list("Skills", &data.skills);
            doc.inline_list("Abilities", &data.abilities);
            doc.inline_list("Personality", &data.personality_traits);
        }

        if !data.goals.is_empty() || !data.fears.is_empty() || !data.secrets.is_empty() {
            doc.section("Story Elements");
            doc.inline_list("Goals", &data.goals);
            doc.inline_list("Fears", &data.fears);
            doc.inline_list("Secrets", &data.secrets);
        }

        if !data.important_dates.is_empty() {
            doc.section("Important Dates");
            for date in &data.important_dates {
                let mut line = format!("- {}: {}", date.date, date.event);
                if let Some(location) = &date.location {
                    line.push_str(&format!(" ({location})"));
                }
                if let Some(description) = &date.description {
                    line.push_str(&format!(". {description}"));
                }
                doc.line(line);
            }
        }

        if !data.relationships.is_empty() {
            doc.section("Relationships");
            for rel in &data.relationships {
                let mut line = format!(
                    "- {} ({}, {})",
                    rel.person_name, rel.relationship_type, rel.status
                );
                if let Some(description) = &rel.description {
                    line.push_str(&format!(": {description}"));
                }
                doc.line(line);
            }
        }

        doc.list_section("Notable Possessions", &data.notable_possessions);

        doc.section("Basic Details");
        doc.field("Race", data.race.as_deref());
        doc.field("Gender", data.gender.map(|g| g.label()));
        doc.field("Age", data.age);
        doc.field("Status", Some(data.life_status.label()));
        doc.field("Social class", data.social_class.as_deref());
        doc.field("Wealth", data.wealth.as_deref());

        if data.birth_date.is_some()
            || data.birthplace.is_some()
            || data.death_date.is_some()
            || data.current_location.is_some()
        {
            doc.section("Life Events");
            doc.field("Born", data.birth_date.as_deref());
            doc.field("Birthplace", data.birthplace.as_deref());
            doc.field("Died", data.death_date.as_deref());
            doc.field("Current location", data.current_location.as_deref());
        }

        if !data.organizations.is_empty() || !data.titles.is_empty() {
            doc.section("Affiliations");
            doc.inline_list("Organizations", &data.organizations);
            doc.inline_list("Titles", &data.titles);
        }

        render_footer(&mut doc, article, "Additional Information");
        doc.finish()
    }
}
