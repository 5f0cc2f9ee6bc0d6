use mythos_core::article::{Article, ArticleBody, ArticleType};
use mythos_core::image::Image;
use mythos_core::types::DbId;

use super::{build_submission, ArticleSubmission, CommonFields, FieldSpec, FormTarget};
use crate::error::FormError;

/// Kinds edited with the generic form.
pub const GENERIC_KINDS: &[ArticleType] = &[
    ArticleType::General,
    ArticleType::Item,
    ArticleType::Lore,
    ArticleType::Event,
    ArticleType::Organization,
];

/// Form for articles without a structured payload. Also picks the header
/// image from the project's images.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericForm {
    pub target: FormTarget,
    pub common: CommonFields,
    pub body: ArticleBody,
    pub header_image_id: Option<DbId>,
    images: Vec<Image>,
}

impl GenericForm {
    pub fn new(target: FormTarget, article: Option<&Article>, body: ArticleBody, images: Vec<Image>) -> Self {
        Self {
            target,
            common: CommonFields::from_article(article),
            body,
            header_image_id: article.and_then(|a| a.header_image_id),
            images,
        }
    }

    /// Images offered as header image.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = CommonFields::specs();
        fields.insert(
            1,
            FieldSpec::choice(
                "article_type",
                "Type",
                GENERIC_KINDS.iter().map(|kind| kind.as_str()),
            ),
        );
        fields.push(FieldSpec::choice(
            "header_image_id",
            "Header image",
            self.images.iter().map(|image| image.id.to_string()),
        ));
        fields
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        if self.common.set(field, value)? {
            return Ok(());
        }
        match field {
            "article_type" => {
                let kind: ArticleType = super::parse_choice(field, value)?;
                if !GENERIC_KINDS.contains(&kind) {
                    return Err(FormError::invalid(
                        field,
                        format!("{kind} articles have their own form"),
                    ));
                }
                self.body = ArticleBody::empty(kind);
            }
            "header_image_id" => {
                let id: Option<DbId> = super::parse_number(field, value)?;
                if let Some(id) = id {
                    if !self.images.iter().any(|image| image.id == id) {
                        return Err(FormError::invalid(
                            field,
                            format!("no image with id {id} in this project"),
                        ));
                    }
                }
                self.header_image_id = id;
            }
            _ => return Err(FormError::unknown(field)),
        }
        Ok(())
    }

    pub fn add(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        match field {
            "tags" => self.common.add_tag(item),
            _ => return Err(FormError::unknown(field)),
        }
        Ok(())
    }

    pub fn remove(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        match field {
            "tags" => self.common.remove_tag(item),
            _ => return Err(FormError::unknown(field)),
        }
        Ok(())
    }

    pub fn submission(&self) -> Result<ArticleSubmission, FormError> {
        build_submission(
            self.target,
            &self.common,
            self.body.clone(),
            self.header_image_id,
        )
    }
}
