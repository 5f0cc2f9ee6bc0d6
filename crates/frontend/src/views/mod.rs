//! Read-only article views, rendered as plain text.

mod generic;
mod person;
mod settlement;
mod spotify;

pub use generic::GenericView;
pub use person::{PersonView, NO_PERSON_DATA};
pub use settlement::{SettlementView, NO_SETTLEMENT_DATA};
pub use spotify::spotify_embed_url;

use std::fmt::{Display, Write};

use mythos_core::article::Article;
use mythos_core::naming::humanize;

pub const NO_CONTENT: &str = "No content available.";
pub const INVALID_SPOTIFY_URL: &str = "Invalid Spotify URL provided. Please check the URL format.";

/// Small text builder shared by the views.
#[derive(Debug, Default)]
pub(crate) struct Doc {
    out: String,
}

impl Doc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, text: &str) {
        let _ = writeln!(self.out, "# {text}");
    }

    pub fn section(&mut self, title: &str) {
        let _ = writeln!(self.out, "\n## {title}");
    }

    pub fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.out, "{text}");
    }

    pub fn badges(&mut self, badges: &[String]) {
        let joined: Vec<String> = badges.iter().map(|b| format!("[{b}]")).collect();
        self.line(joined.join(" "));
    }

    /// `label: value`, skipped when there is no value.
    pub fn field<T: Display>(&mut self, label: &str, value: Option<T>) {
        if let Some(value) = value {
            let _ = writeln!(self.out, "{label}: {value}");
        }
    }

    /// A bulleted list under its own heading, skipped when empty.
    pub fn list_section(&mut self, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.section(title);
        for item in items {
            let _ = writeln!(self.out, "- {item}");
        }
    }

    /// `label: a, b, c`, skipped when empty.
    pub fn inline_list(&mut self, label: &str, items: &[String]) {
        if !items.is_empty() {
            self.field(label, Some(items.join(", ")));
        }
    }

    /// A heading followed by a text block, skipped when the block is empty.
    pub fn text_section(&mut self, title: &str, text: Option<&str>) {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            self.section(title);
            self.line(text);
        }
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Human label of an article's kind, e.g. `Location`.
pub(crate) fn type_badge(article: &Article) -> String {
    humanize(article.body.type_tag())
}

/// Title, badges, header image and summary.
pub(crate) fn render_header(doc: &mut Doc, article: &Article, badges: &[String]) {
    doc.title(&article.title);
    doc.badges(badges);
    if let Some(image) = &article.header_image {
        let alt = image.alt_text.as_deref().unwrap_or(&image.original_filename);
        doc.line(format!("Header image: {alt} (image {})", image.id));
    }
    if let Some(summary) = article.content.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        doc.line("");
        doc.line(summary);
    }
}

/// Mood music, sidebar, tags and footer.
pub(crate) fn render_footer(doc: &mut Doc, article: &Article, sidebar_title: &str) {
    if let Some(url) = article.spotify_url.as_deref().filter(|u| !u.is_empty()) {
        doc.section("Mood Music");
        match spotify_embed_url(url) {
            Some(embed) => doc.line(embed),
            None => doc.line(INVALID_SPOTIFY_URL),
        }
    }
    doc.text_section(sidebar_title, article.content.sidebar_content.as_deref());
    doc.list_section("Tags", &article.content.tags);
    if let Some(footer) = article.content.footer_content.as_deref().filter(|f| !f.trim().is_empty()) {
        doc.line("");
        doc.line("---");
        doc.line(footer);
    }
}

/// `1234567` -> `1,234,567`.
pub(crate) fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
