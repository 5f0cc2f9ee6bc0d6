//! Picks the form and view for an article from its kind.
//!
//! Locations get the settlement form and view, characters the person form
//! and view, and every other kind (including tags this build does not
//! know) the generic ones. Existing payloads are handed over unchanged.

use mythos_core::article::{Article, ArticleBody, ArticleType};
use mythos_core::image::Image;
use mythos_core::types::DbId;

use crate::error::FormError;
use crate::forms::{FieldSpec, FormTarget, GenericForm, PersonForm, SettlementForm};
use crate::views::{GenericView, PersonView, SettlementView};

pub use crate::forms::ArticleSubmission;

/// What the caller supplies besides the article itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormContext {
    /// Images of the project, offered as header image by the generic form.
    pub images: Vec<Image>,
    /// Set while a submission is in flight; submitting is refused meanwhile.
    pub is_loading: bool,
    /// Project new articles are created in.
    pub project_id: Option<DbId>,
    /// Author recorded on new articles.
    pub author_id: Option<DbId>,
}

/// How a form was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Submitted(ArticleSubmission),
    Cancelled,
}

/// The form picked for an article's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FormVariant {
    Settlement(SettlementForm),
    Person(PersonForm),
    Generic(GenericForm),
}

/// Which layout a form or view uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Settlement,
    Person,
    Generic,
}

/// An article form together with its loading flag.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleForm {
    variant: FormVariant,
    is_loading: bool,
}

impl ArticleForm {
    /// Choose a form. The kind comes from `article` when editing, else from
    /// `requested`, else `general`.
    pub fn dispatch(article: Option<&Article>, requested: Option<ArticleType>, ctx: FormContext) -> Self {
        let body = match article {
            Some(article) => article.body.clone(),
            None => ArticleBody::empty(requested.unwrap_or_default()),
        };
        let target = FormTarget::for_article(article, ctx.project_id, ctx.author_id);
        tracing::debug!(kind = body.type_tag(), editing = article.is_some(), "Dispatching article form");

        let variant = match body {
            ArticleBody::Location(data) => {
                FormVariant::Settlement(SettlementForm::new(target, article, data))
            }
            ArticleBody::Character(data) => {
                FormVariant::Person(PersonForm::new(target, article, data))
            }
            other => FormVariant::Generic(GenericForm::new(target, article, other, ctx.images)),
        };
        Self {
            variant,
            is_loading: ctx.is_loading,
        }
    }

    pub fn variant(&self) -> &FormVariant {
        &self.variant
    }

    pub fn variant_mut(&mut self) -> &mut FormVariant {
        &mut self.variant
    }

    pub fn kind(&self) -> Layout {
        match self.variant {
            FormVariant::Settlement(_) => Layout::Settlement,
            FormVariant::Person(_) => Layout::Person,
            FormVariant::Generic(_) => Layout::Generic,
        }
    }

    pub fn fields(&self) -> Vec<FieldSpec> {
        match &self.variant {
            FormVariant::Settlement(form) => form.fields(),
            FormVariant::Person(form) => form.fields(),
            FormVariant::Generic(form) => form.fields(),
        }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        match &mut self.variant {
            FormVariant::Settlement(form) => form.set(field, value),
            FormVariant::Person(form) => form.set(field, value),
            FormVariant::Generic(form) => form.set(field, value),
        }
    }

    pub fn add(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        match &mut self.variant {
            FormVariant::Settlement(form) => form.add(field, item),
            FormVariant::Person(form) => form.add(field, item),
            FormVariant::Generic(form) => form.add(field, item),
        }
    }

    pub fn remove(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        match &mut self.variant {
            FormVariant::Settlement(form) => form.remove(field, item),
            FormVariant::Person(form) => form.remove(field, item),
            FormVariant::Generic(form) => form.remove(field, item),
        }
    }

    /// Validate and build the payload. Refused while a previous submission
    /// is still loading.
    pub fn submit(&self) -> Result<ArticleSubmission, FormError> {
        if self.is_loading {
            return Err(FormError::Busy);
        }
        match &self.variant {
            FormVariant::Settlement(form) => form.submission(),
            FormVariant::Person(form) => form.submission(),
            FormVariant::Generic(form) => form.submission(),
        }
    }

    pub fn cancel(self) -> FormOutcome {
        FormOutcome::Cancelled
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

/// The read-only view picked for an article's kind.
#[derive(Debug, Clone, Copy)]
pub enum ArticleView<'a> {
    Settlement(SettlementView<'a>),
    Person(PersonView<'a>),
    Generic(GenericView<'a>),
}

impl<'a> ArticleView<'a> {
    pub fn dispatch(article: &'a Article) -> Self {
        match &article.body {
            ArticleBody::Location(data) => {
                ArticleView::Settlement(SettlementView::new(article, data.as_ref()))
            }
            ArticleBody::Character(data) => {
                ArticleView::Person(PersonView::new(article, data.as_ref()))
            }
            _ => ArticleView::Generic(GenericView::new(article)),
        }
    }

    pub fn kind(&self) -> Layout {
        match self {
            ArticleView::Settlement(_) => Layout::Settlement,
            ArticleView::Person(_) => Layout::Person,
            ArticleView::Generic(_) => Layout::Generic,
        }
    }

    pub fn render(&self) -> String {
        match self {
            ArticleView::Settlement(view) => view.render(),
            ArticleView::Person(view) => view.render(),
            ArticleView::Generic(view) => view.render(),
        }
    }
}
