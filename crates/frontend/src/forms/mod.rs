//! Article editing forms.
//!
//! Forms hold local edit state only. Every form shares the fields in
//! [`CommonFields`]; the settlement and person forms add their payload's
//! fields on top. Values arrive as strings (from a prompt or a `--set`
//! flag) and are parsed per field.

mod generic;
mod person;
mod settlement;

pub use generic::GenericForm;
pub use person::PersonForm;
pub use settlement::SettlementForm;

use std::str::FromStr;

use mythos_client::{ClientError, Queries};
use mythos_core::article::{
    validate_content, validate_spotify_url, validate_title, Article, ArticleBody, ArticleContent,
    ArticleCreate, ArticleUpdate, Visibility,
};
use mythos_core::types::DbId;

use crate::error::FormError;

/// A validated form result, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleSubmission {
    Create(ArticleCreate),
    Update { id: DbId, input: ArticleUpdate },
}

impl ArticleSubmission {
    /// Send through the cached queries so affected entries are invalidated.
    pub async fn send(&self, queries: &Queries) -> Result<Article, ClientError> {
        match self {
            ArticleSubmission::Create(input) => queries.create_article(input).await,
            ArticleSubmission::Update { id, input } => queries.update_article(*id, input).await,
        }
    }
}

/// Where a form's submission goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    New {
        project_id: Option<DbId>,
        author_id: Option<DbId>,
    },
    Existing {
        article_id: DbId,
    },
}

impl FormTarget {
    pub fn for_article(
        article: Option<&Article>,
        project_id: Option<DbId>,
        author_id: Option<DbId>,
    ) -> Self {
        match article {
            Some(article) => FormTarget::Existing {
                article_id: article.id,
            },
            None => FormTarget::New {
                project_id,
                author_id,
            },
        }
    }
}

/// Validate the shared fields and build the payload for `target`.
///
/// Updates of an article whose kind is not recognised leave the kind
/// untouched; the server would reject the unknown tag.
pub(crate) fn build_submission(
    target: FormTarget,
    common: &CommonFields,
    body: ArticleBody,
    header_image_id: Option<DbId>,
) -> Result<ArticleSubmission, FormError> {
    common.validate()?;
    match target {
        FormTarget::Existing { article_id } => {
            let mut input = ArticleUpdate {
                title: Some(common.title.clone()),
                content: Some(common.content.clone()),
                visibility: Some(common.visibility),
                header_image_id,
                spotify_url: common.spotify_url(),
                ..Default::default()
            };
            if !matches!(body, ArticleBody::Unrecognized(_)) {
                input = input.with_body(body);
            }
            Ok(ArticleSubmission::Update {
                id: article_id,
                input,
            })
        }
        FormTarget::New {
            project_id,
            author_id,
        } => {
            let project_id = project_id.ok_or(FormError::MissingProject)?;
            let mut input = ArticleCreate::new(project_id, common.title.clone(), body);
            input.content = Some(common.content.clone());
            input.visibility = common.visibility;
            input.author_id = author_id;
            input.header_image_id = header_image_id;
            input.spotify_url = common.spotify_url();
            Ok(ArticleSubmission::Create(input))
        }
    }
}

/// How a field is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Number,
    /// One of a fixed set of values.
    Choice(Vec<String>),
    /// A list edited with `add` / `remove`.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub(crate) fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    pub(crate) fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub(crate) fn long(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::LongText)
    }

    pub(crate) fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub(crate) fn list(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::List)
    }

    pub(crate) fn choice<S: Into<String>>(
        name: &'static str,
        label: &'static str,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        let options = options.into_iter().map(Into::into).collect();
        Self::new(name, label, FieldKind::Choice(options))
    }
}

/// Fields every article form edits.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonFields {
    pub title: String,
    pub content: ArticleContent,
    pub visibility: Visibility,
    pub spotify_url: String,
}

impl CommonFields {
    pub fn from_article(article: Option<&Article>) -> Self {
        match article {
            Some(article) => Self {
                title: article.title.clone(),
                content: article.content.clone(),
                visibility: article.visibility,
                spotify_url: article.spotify_url.clone().unwrap_or_default(),
            },
            None => Self {
                title: String::new(),
                content: ArticleContent::default(),
                visibility: Visibility::default(),
                spotify_url: String::new(),
            },
        }
    }

    pub fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                required: true,
                ..FieldSpec::text("title", "Title")
            },
            FieldSpec::choice("visibility", "Visibility", Visibility::tags()),
            FieldSpec::long("summary", "Summary"),
            FieldSpec::long("main_content", "Main content"),
            FieldSpec::long("sidebar_content", "Sidebar content"),
            FieldSpec::long("footer_content", "Footer content"),
            FieldSpec::text("spotify_url", "Mood music (Spotify link)"),
            FieldSpec::list("tags", "Tags"),
        ]
    }

    /// Set a shared field. `Ok(false)` means the field is not a shared one.
    pub fn set(&mut self, field: &str, value: &str) -> Result<bool, FormError> {
        match field {
            "title" => self.title = value.to_string(),
            "visibility" => self.visibility = parse_choice(field, value)?,
            "spotify_url" => self.spotify_url = value.trim().to_string(),
            "summary" => self.content.summary = optional_text(value),
            "main_content" => self.content.main_content = optional_text(value),
            "sidebar_content" => self.content.sidebar_content = optional_text(value),
            "footer_content" => self.content.footer_content = optional_text(value),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Add a tag. Tags are trimmed and kept unique; blank input is ignored.
    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim();
        if !tag.is_empty() && !self.content.tags.iter().any(|t| t == tag) {
            self.content.tags.push(tag.to_string());
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.content.tags.retain(|t| t != tag);
    }

    pub fn spotify_url(&self) -> Option<String> {
        (!self.spotify_url.is_empty()).then(|| self.spotify_url.clone())
    }

    /// Check the shared fields before submit.
    pub fn validate(&self) -> Result<(), FormError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        validate_spotify_url(&self.spotify_url)?;
        Ok(())
    }
}

/// Empty input clears an optional text field.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Parse a tag of a closed enum; the error lists the valid tags.
pub(crate) fn parse_choice<T>(field: &str, value: &str) -> Result<T, FormError>
where
    T: FromStr<Err = mythos_core::error::CoreError>,
{
    T::from_str(value).map_err(|e| match e {
        mythos_core::error::CoreError::Validation(message) => FormError::invalid(field, message),
        other => FormError::invalid(field, other.to_string()),
    })
}

/// Like [`parse_choice`], but empty input clears the field.
pub(crate) fn parse_optional_choice<T>(field: &str, value: &str) -> Result<Option<T>, FormError>
where
    T: FromStr<Err = mythos_core::error::CoreError>,
{
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_choice(field, value).map(Some)
}

/// Parse an optional number; empty input clears the field.
pub(crate) fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<Option<T>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| FormError::invalid(field, format!("'{value}' is not a number")))
}

/// Push a trimmed, non-blank item onto a list.
pub(crate) fn push_item(list: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if !item.is_empty() {
        list.push(item.to_string());
    }
}

/// Remove every occurrence of `item` from a list.
pub(crate) fn remove_item(list: &mut Vec<String>, item: &str) {
    list.retain(|existing| existing != item);
}
