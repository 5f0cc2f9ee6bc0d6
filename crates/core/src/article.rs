//! Articles and the article variant model.
//!
//! An article's kind is the closed [`ArticleType`] set. The kind and its
//! optional structured payload travel together as one [`ArticleBody`]
//! variant, so a settlement payload can only ever sit on a location and a
//! person payload only on a character.
//!
//! On the wire the body is flat (`article_type`, `settlement_data`,
//! `person_data` next to the shared fields). Decoding is lenient: unknown
//! tags become [`ArticleBody::Unrecognized`] and payloads attached to the
//! wrong kind are dropped. Request validation goes through the strict
//! [`ArticleBody::try_from_parts`] instead.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::image::Image;
use crate::person::PersonData;
use crate::settlement::SettlementData;
use crate::types::{DbId, Timestamp};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_TAGS: usize = 20;
pub const MAX_TAG_LEN: usize = 50;
pub const MAX_BLOCK_LEN: usize = 100_000;
pub const MAX_SPOTIFY_URL_LEN: usize = 500;

crate::string_enum! {
    /// The fixed set of article kinds.
    pub enum ArticleType {
        General => "general",
        Character => "character",
        Location => "location",
        Item => "item",
        Lore => "lore",
        Event => "event",
        Organization => "organization",
    }
}

impl Default for ArticleType {
    fn default() -> Self {
        ArticleType::General
    }
}

crate::string_enum! {
    pub enum Visibility {
        /// Open to anyone.
        Public => "public",
        /// Visible to every identified viewer.
        Private => "private",
        /// Only visible to the author.
        Unlisted => "unlisted",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

impl Visibility {
    /// Whether `viewer` may see an article with this visibility written by `author_id`.
    pub fn is_visible_to(&self, author_id: Option<DbId>, viewer: Option<DbId>) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::Private => viewer.is_some(),
            Visibility::Unlisted => viewer.is_some() && viewer == author_id,
        }
    }
}

/// The shared rich-text blocks of an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleContent {
    pub main_content: Option<String>,
    pub sidebar_content: Option<String>,
    pub footer_content: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ArticleContent {
    /// Word count across the main, sidebar and footer blocks.
    pub fn word_count(&self) -> usize {
        [&self.main_content, &self.sidebar_content, &self.footer_content]
            .into_iter()
            .flatten()
            .map(|block| block.split_whitespace().count())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Variant body
// ---------------------------------------------------------------------------

/// An article's kind together with the payload that kind may carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BodyParts", into = "BodyParts")]
pub enum ArticleBody {
    General,
    Character(Option<PersonData>),
    Location(Option<SettlementData>),
    Item,
    Lore,
    Event,
    Organization,
    /// A tag outside the known set, kept verbatim.
    Unrecognized(String),
}

impl Default for ArticleBody {
    fn default() -> Self {
        ArticleBody::General
    }
}

/// Flat wire representation of an [`ArticleBody`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyParts {
    #[serde(default = "default_type_tag")]
    pub article_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_data: Option<SettlementData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_data: Option<PersonData>,
}

fn default_type_tag() -> String {
    ArticleType::General.as_str().to_string()
}

impl ArticleBody {
    /// Body of the given kind with no payload.
    pub fn empty(kind: ArticleType) -> Self {
        match kind {
            ArticleType::General => ArticleBody::General,
            ArticleType::Character => ArticleBody::Character(None),
            ArticleType::Location => ArticleBody::Location(None),
            ArticleType::Item => ArticleBody::Item,
            ArticleType::Lore => ArticleBody::Lore,
            ArticleType::Event => ArticleBody::Event,
            ArticleType::Organization => ArticleBody::Organization,
        }
    }

    /// The kind, or `None` for an unrecognized tag.
    pub fn article_type(&self) -> Option<ArticleType> {
        match self {
            ArticleBody::General => Some(ArticleType::General),
            ArticleBody::Character(_) => Some(ArticleType::Character),
            ArticleBody::Location(_) => Some(ArticleType::Location),
            ArticleBody::Item => Some(ArticleType::Item),
            ArticleBody::Lore => Some(ArticleType::Lore),
            ArticleBody::Event => Some(ArticleType::Event),
            ArticleBody::Organization => Some(ArticleType::Organization),
            ArticleBody::Unrecognized(_) => None,
        }
    }

    /// The wire tag, including unrecognized ones.
    pub fn type_tag(&self) -> &str {
        match self {
            ArticleBody::Unrecognized(tag) => tag,
            other => other
                .article_type()
                .map(|kind| kind.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn settlement(&self) -> Option<&SettlementData> {
        match self {
            ArticleBody::Location(data) => data.as_ref(),
            _ => None,
        }
    }

    pub fn person(&self) -> Option<&PersonData> {
        match self {
            ArticleBody::Character(data) => data.as_ref(),
            _ => None,
        }
    }

    /// Build a body from wire parts, rejecting unknown tags and payloads
    /// attached to a kind that cannot carry them.
    pub fn try_from_parts(
        article_type: &str,
        settlement_data: Option<SettlementData>,
        person_data: Option<PersonData>,
    ) -> Result<Self, CoreError> {
        let kind: ArticleType = article_type.parse()?;
        if settlement_data.is_some() && kind != ArticleType::Location {
            return Err(CoreError::Validation(format!(
                "settlement_data is only allowed on location articles, not '{kind}'"
            )));
        }
        if person_data.is_some() && kind != ArticleType::Character {
            return Err(CoreError::Validation(format!(
                "person_data is only allowed on character articles, not '{kind}'"
            )));
        }
        Ok(match kind {
            ArticleType::Location => ArticleBody::Location(settlement_data),
            ArticleType::Character => ArticleBody::Character(person_data),
            other => ArticleBody::empty(other),
        })
    }

    /// Build a body from wire parts without failing.
    pub fn from_parts_lenient(
        article_type: &str,
        settlement_data: Option<SettlementData>,
        person_data: Option<PersonData>,
    ) -> Self {
        match article_type.parse::<ArticleType>() {
            Ok(ArticleType::Location) => ArticleBody::Location(settlement_data),
            Ok(ArticleType::Character) => ArticleBody::Character(person_data),
            Ok(other) => ArticleBody::empty(other),
            Err(_) => ArticleBody::Unrecognized(article_type.to_string()),
        }
    }

    /// Split into flat wire parts.
    pub fn into_parts(self) -> BodyParts {
        let article_type = self.type_tag().to_string();
        let (settlement_data, person_data) = match self {
            ArticleBody::Location(data) => (data, None),
            ArticleBody::Character(data) => (None, data),
            _ => (None, None),
        };
        BodyParts {
            article_type,
            settlement_data,
            person_data,
        }
    }

    /// Change kind, keeping the payload only if the new kind can carry it.
    pub fn retype(self, kind: ArticleType) -> Self {
        match (self, kind) {
            (body @ ArticleBody::Location(_), ArticleType::Location) => body,
            (body @ ArticleBody::Character(_), ArticleType::Character) => body,
            (_, kind) => ArticleBody::empty(kind),
        }
    }

    /// Apply the type/payload part of an update on top of this body.
    ///
    /// A payload in the update replaces the current one and must match the
    /// resulting kind. Without one, the current payload survives if the
    /// resulting kind can still carry it.
    pub fn apply_update(
        self,
        article_type: Option<&str>,
        settlement_data: Option<SettlementData>,
        person_data: Option<PersonData>,
    ) -> Result<Self, CoreError> {
        let kind: ArticleType = match article_type {
            Some(tag) => tag.parse()?,
            None => match self.article_type() {
                Some(kind) => kind,
                None => self.type_tag().parse()?,
            },
        };
        let base = self.retype(kind);
        let explicit = ArticleBody::try_from_parts(kind.as_str(), settlement_data, person_data)?;
        Ok(match explicit {
            ArticleBody::Location(Some(data)) => ArticleBody::Location(Some(data)),
            ArticleBody::Character(Some(data)) => ArticleBody::Character(Some(data)),
            _ => base,
        })
    }
}

impl From<BodyParts> for ArticleBody {
    fn from(parts: BodyParts) -> Self {
        ArticleBody::from_parts_lenient(&parts.article_type, parts.settlement_data, parts.person_data)
    }
}

impl From<ArticleBody> for BodyParts {
    fn from(body: ArticleBody) -> Self {
        body.into_parts()
    }
}

// ---------------------------------------------------------------------------
// Article and request payloads
// ---------------------------------------------------------------------------

/// An article as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: ArticleContent,
    #[serde(flatten)]
    pub body: ArticleBody,
    #[serde(default)]
    pub visibility: Visibility,
    pub author_id: Option<DbId>,
    pub project_id: DbId,
    pub header_image_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<Image>,
    pub spotify_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Article {
    pub fn article_type(&self) -> Option<ArticleType> {
        self.body.article_type()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// DTO for creating an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCreate {
    pub title: String,
    #[serde(default)]
    pub content: Option<ArticleContent>,
    #[serde(default = "default_type_tag")]
    pub article_type: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub project_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_data: Option<SettlementData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_data: Option<PersonData>,
}

impl ArticleCreate {
    /// A create payload for `body` in `project_id` with default visibility.
    pub fn new(project_id: DbId, title: impl Into<String>, body: ArticleBody) -> Self {
        let parts = body.into_parts();
        Self {
            title: title.into(),
            content: None,
            article_type: parts.article_type,
            visibility: Visibility::default(),
            project_id,
            author_id: None,
            header_image_id: None,
            spotify_url: None,
            settlement_data: parts.settlement_data,
            person_data: parts.person_data,
        }
    }

    /// Strictly decoded variant body of this payload.
    pub fn body(&self) -> Result<ArticleBody, CoreError> {
        ArticleBody::try_from_parts(
            &self.article_type,
            self.settlement_data.clone(),
            self.person_data.clone(),
        )
    }
}

/// DTO for updating an article. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ArticleContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_data: Option<SettlementData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_data: Option<PersonData>,
}

impl ArticleUpdate {
    /// Set the type and payload fields from a body.
    pub fn with_body(mut self, body: ArticleBody) -> Self {
        let parts = body.into_parts();
        self.article_type = Some(parts.article_type);
        self.settlement_data = parts.settlement_data;
        self.person_data = parts.person_data;
        self
    }
}

/// Query parameters for the article list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<DbId>,
    /// The viewing user; drives visibility filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl ArticleListParams {
    pub fn for_project(project_id: DbId) -> Self {
        Self {
            project_id: Some(project_id),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an article title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate article tags (each non-empty, <= 50 chars, max 20 tags).
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_TAGS} tags is allowed"
        )));
    }
    for tag in tags {
        if tag.trim().is_empty() {
            return Err(CoreError::Validation("Tags must not be empty".into()));
        }
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(CoreError::Validation(format!(
                "Each tag must be at most {MAX_TAG_LEN} characters"
            )));
        }
    }
    Ok(())
}

/// Validate every content block and the tag list.
pub fn validate_content(content: &ArticleContent) -> Result<(), CoreError> {
    let blocks = [
        ("main_content", &content.main_content),
        ("sidebar_content", &content.sidebar_content),
        ("footer_content", &content.footer_content),
        ("summary", &content.summary),
    ];
    for (name, block) in blocks {
        if let Some(text) = block {
            if text.chars().count() > MAX_BLOCK_LEN {
                return Err(CoreError::Validation(format!(
                    "{name} must be at most {MAX_BLOCK_LEN} characters"
                )));
            }
        }
    }
    validate_tags(&content.tags)
}

/// Validate an optional mood-music link.
pub fn validate_spotify_url(url: &str) -> Result<(), CoreError> {
    if url.len() > MAX_SPOTIFY_URL_LEN {
        return Err(CoreError::Validation(format!(
            "spotify_url must be at most {MAX_SPOTIFY_URL_LEN} characters"
        )));
    }
    if !url.is_empty()
        && !(url.starts_with("https://") || url.starts_with("http://") || url.starts_with("spotify:"))
    {
        return Err(CoreError::Validation(
            "spotify_url must be an http(s) or spotify: link".into(),
        ));
    }
    Ok(())
}

/// Validate a create payload and return its strictly decoded body.
pub fn validate_create_article(input: &ArticleCreate) -> Result<ArticleBody, CoreError> {
    validate_title(&input.title)?;
    if let Some(ref content) = input.content {
        validate_content(content)?;
    }
    if let Some(ref url) = input.spotify_url {
        validate_spotify_url(url)?;
    }
    input.body()
}

/// Validate the scalar fields of an update payload.
///
/// Type and payload consistency is checked when the update is applied to the
/// stored body (see [`ArticleBody::apply_update`]).
pub fn validate_update_article(input: &ArticleUpdate) -> Result<(), CoreError> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref content) = input.content {
        validate_content(content)?;
    }
    if let Some(ref url) = input.spotify_url {
        validate_spotify_url(url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn article_json(article_type: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "title": "Harrowgate",
            "content": {"main_content": "A walled town.", "tags": ["north"]},
            "article_type": article_type,
            "visibility": "public",
            "author_id": 3,
            "project_id": 9,
            "header_image_id": null,
            "spotify_url": null,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })
    }

    // -- decoding ------------------------------------------------------------

    #[test]
    fn location_decodes_with_settlement_payload() {
        let mut json = article_json("location");
        json["settlement_data"] = serde_json::json!({"settlement_type": "town", "population": 1200});
        let article: Article = serde_json::from_value(json).unwrap();
        assert_matches!(&article.body, ArticleBody::Location(Some(data)) if data.population == Some(1200));
        assert_eq!(article.content.tags, vec!["north"]);
    }

    #[test]
    fn location_without_payload_decodes_to_empty_location() {
        let article: Article = serde_json::from_value(article_json("location")).unwrap();
        assert_eq!(article.body, ArticleBody::Location(None));
    }

    #[test]
    fn mismatched_payload_is_dropped_on_decode() {
        let mut json = article_json("lore");
        json["settlement_data"] = serde_json::json!({"settlement_type": "city"});
        let article: Article = serde_json::from_value(json).unwrap();
        assert_eq!(article.body, ArticleBody::Lore);
        assert!(article.body.settlement().is_none());
    }

    #[test]
    fn unknown_type_decodes_as_unrecognized() {
        let article: Article = serde_json::from_value(article_json("prophecy")).unwrap();
        assert_eq!(article.body, ArticleBody::Unrecognized("prophecy".into()));
        assert_eq!(article.body.type_tag(), "prophecy");
        assert!(article.article_type().is_none());
    }

    #[test]
    fn null_content_decodes_as_default() {
        let mut json = article_json("general");
        json["content"] = serde_json::Value::Null;
        let article: Article = serde_json::from_value(json).unwrap();
        assert_eq!(article.content, ArticleContent::default());
    }

    #[test]
    fn serialization_is_flat() {
        let mut json = article_json("character");
        json["person_data"] = serde_json::json!({"race": "elf"});
        let article: Article = serde_json::from_value(json).unwrap();
        let out = serde_json::to_value(&article).unwrap();
        assert_eq!(out["article_type"], "character");
        assert_eq!(out["person_data"]["race"], "elf");
        assert!(out.get("settlement_data").is_none());
        assert!(out.get("body").is_none());
    }

    // -- strict parts --------------------------------------------------------

    #[test]
    fn strict_parts_reject_wrong_payload() {
        let result = ArticleBody::try_from_parts("item", None, Some(PersonData::default()));
        assert_matches!(result, Err(CoreError::Validation(_)));
        let result = ArticleBody::try_from_parts("character", Some(SettlementData::default()), None);
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn strict_parts_reject_unknown_type() {
        assert!(ArticleBody::try_from_parts("prophecy", None, None).is_err());
    }

    #[test]
    fn strict_parts_accept_matching_payload() {
        let body =
            ArticleBody::try_from_parts("location", Some(SettlementData::default()), None).unwrap();
        assert!(body.settlement().is_some());
    }

    // -- update merge ----------------------------------------------------------

    #[test]
    fn update_keeps_payload_when_type_unchanged() {
        let current = ArticleBody::Location(Some(SettlementData {
            population: Some(50),
            ..Default::default()
        }));
        let next = current.clone().apply_update(None, None, None).unwrap();
        assert_eq!(next, current);
    }

    #[test]
    fn update_drops_payload_when_type_changes() {
        let current = ArticleBody::Location(Some(SettlementData::default()));
        let next = current.apply_update(Some("lore"), None, None).unwrap();
        assert_eq!(next, ArticleBody::Lore);
    }

    #[test]
    fn update_replaces_payload() {
        let current = ArticleBody::Character(Some(PersonData::default()));
        let replacement = PersonData {
            race: Some("dwarf".into()),
            ..Default::default()
        };
        let next = current
            .apply_update(None, None, Some(replacement.clone()))
            .unwrap();
        assert_eq!(next, ArticleBody::Character(Some(replacement)));
    }

    #[test]
    fn update_rejects_payload_for_other_type() {
        let current = ArticleBody::General;
        let result = current.apply_update(None, Some(SettlementData::default()), None);
        assert!(result.is_err());
    }

    // -- visibility ----------------------------------------------------------

    #[test]
    fn visibility_rules() {
        assert!(Visibility::Public.is_visible_to(Some(1), None));
        assert!(!Visibility::Private.is_visible_to(Some(1), None));
        assert!(Visibility::Private.is_visible_to(Some(1), Some(2)));
        assert!(Visibility::Unlisted.is_visible_to(Some(1), Some(1)));
        assert!(!Visibility::Unlisted.is_visible_to(Some(1), Some(2)));
        assert!(!Visibility::Unlisted.is_visible_to(None, None));
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn title_rules() {
        assert!(validate_title("The Sundering").is_ok());
        assert!(validate_title("  ").is_err());
        assert!(validate_title(&"t".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn tag_rules() {
        assert!(validate_tags(&["war".into(), "history".into()]).is_ok());
        assert!(validate_tags(&["".into()]).is_err());
        let many: Vec<String> = (0..=MAX_TAGS).map(|i| format!("tag-{i}")).collect();
        assert!(validate_tags(&many).is_err());
    }

    #[test]
    fn spotify_url_rules() {
        assert!(validate_spotify_url("https://open.spotify.com/track/abc").is_ok());
        assert!(validate_spotify_url("spotify:track:abc").is_ok());
        assert!(validate_spotify_url("").is_ok());
        assert!(validate_spotify_url("ftp://music").is_err());
    }

    #[test]
    fn create_payload_roundtrips_body() {
        let body = ArticleBody::Location(Some(SettlementData::default()));
        let input = ArticleCreate::new(4, "Port Vell", body.clone());
        assert_eq!(input.article_type, "location");
        assert_eq!(validate_create_article(&input).unwrap(), body);
    }

    #[test]
    fn word_count_spans_blocks() {
        let content = ArticleContent {
            main_content: Some("one two three".into()),
            footer_content: Some("four".into()),
            ..Default::default()
        };
        assert_eq!(content.word_count(), 4);
    }
}
