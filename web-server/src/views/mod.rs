//! HTML views
//!
//! Pages are plain server-rendered HTML: a sidebar with the three
//! prediction pages and one form per domain.

mod form;
mod layout;

pub use form::form_page;
pub use layout::not_found_page;

use health_assistant_core::Outcome;

/// Escape text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Positive prediction
    Risk,
    /// Negative prediction
    Clear,
    /// Rejected input or failed prediction
    Error,
    /// Model not available
    Warning,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Risk => "notice notice-risk",
            NoticeKind::Clear => "notice notice-clear",
            NoticeKind::Error => "notice notice-error",
            NoticeKind::Warning => "notice notice-warning",
        }
    }
}

/// Message box shown above or below the form
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub messages: Vec<String>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self { kind, messages: vec![message.into()] }
    }

    pub fn outcome(outcome: &Outcome) -> Self {
        let kind = if outcome.is_positive { NoticeKind::Risk } else { NoticeKind::Clear };
        Self::new(kind, outcome.message.clone())
    }

    fn render(&self) -> String {
        let mut html = format!("<div class=\"{}\" role=\"alert\">", self.kind.css_class());
        for message in &self.messages {
            html.push_str("<p>");
            html.push_str(&escape(message));
            html.push_str("</p>");
        }
        html.push_str("</div>");
        html
    }
}
