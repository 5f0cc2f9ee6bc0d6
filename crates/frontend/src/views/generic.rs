use mythos_core::article::Article;

use super::{render_footer, render_header, type_badge, Doc, NO_CONTENT};

/// View for articles without a structured payload.
#[derive(Debug, Clone, Copy)]
pub struct GenericView<'a> {
    article: &'a Article,
}

impl<'a> GenericView<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self { article }
    }

    pub fn render(&self) -> String {
        let article = self.article;
        let mut doc = Doc::new();
        render_header(
            &mut doc,
            article,
            &[type_badge(article), article.visibility.label()],
        );

        doc.section("Content");
        match article.content.main_content.as_deref() {
            Some(text) if !text.trim().is_empty() => doc.line(text),
            _ => doc.line(NO_CONTENT),
        }

        render_footer(&mut doc, article, "Details");
        doc.finish()
    }
}
