use mythos_core::article::Article;
use mythos_core::settlement::SettlementData;

use super::{group_thousands, render_footer, render_header, Doc};

pub const NO_SETTLEMENT_DATA: &str = "No settlement data available";

/// View for location articles.
#[derive(Debug, Clone, Copy)]
pub struct SettlementView<'a> {
    article: &'a Article,
    data: Option<&'a SettlementData>,
}

impl<'a> SettlementView<'a> {
    pub fn new(article: &'a Article, data: Option<&'a SettlementData>) -> Self {
        Self { article, data }
    }

    pub fn render(&self) -> String {
        let Some(data) = self.data else {
            return NO_SETTLEMENT_DATA.to_string();
        };
        let article = self.article;
        let mut doc = Doc::new();
        render_header(
            &mut doc,
            article,
            &[data.settlement_type.label(), article.visibility.label()],
        );

        doc.text_section("Description", article.content.main_content.as_deref());

        doc.section("Economic Information");
        doc.field("Population", data.population.map(group_thousands));
        doc.field("Primary industry", data.primary_industry.as_deref());
        doc.field("Wealth level", data.wealth_level.as_deref());
        doc.inline_list("Trade goods", &data.trade_goods);
        doc.inline_list("Secondary industries", &data.secondary_industries);

        doc.list_section("Notable Features", &data.notable_features);

        if data.predominant_race.is_some()
            || !data.languages_spoken.is_empty()
            || !data.religions.is_empty()
            || !data.festivals.is_empty()
        {
            doc.section("Cultural Information");
            doc.field("Predominant race", data.predominant_race.as_deref());
            doc.inline_list("Languages", &data.languages_spoken);
            doc.inline_list("Religions", &data.religions);
            doc.inline_list("Festivals", &data.festivals);
        }

        doc.text_section("Defenses", data.defenses.as_deref());

        doc.section("Basic Details");
        doc.field("Type", Some(data.settlement_type.label()));
        doc.field("Government", data.government_type.map(|g| g.label()));
        doc.field("Ruler", data.ruler_name.as_deref());
        doc.field("Founded", data.founded_date.as_deref());

        if data.region.is_some()
            || data.climate.is_some()
            || data.terrain.is_some()
            || data.coordinates.is_some()
        {
            doc.section("Geography");
            doc.field("Region", data.region.as_deref());
            doc.field("Climate", data.climate.as_deref());
            doc.field("Terrain", data.terrain.as_deref());
            doc.field(
                "Coordinates",
                data.coordinates.map(|c| format!("{:.4}, {:.4}", c.lat, c.lng)),
            );
        }

        doc.list_section("Nearby Settlements", &data.nearby_settlements);

        render_footer(&mut doc, article, "Additional Information");
        doc.finish()
    }
}
