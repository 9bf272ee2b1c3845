//! Markup Builder
//!
//! A minimal HTML writer. Text goes through [`escape_html`] unless the
//! builder runs in [`RenderMode::Verbatim`]; attribute values are always
//! escaped.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How untrusted text is embedded into markup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Escape markup-significant characters in text
    #[default]
    Escaped,
    /// Embed text byte-for-byte (legacy behavior; allows markup injection)
    Verbatim,
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "escaped" => Ok(RenderMode::Escaped),
            "verbatim" => Ok(RenderMode::Verbatim),
            other => Err(format!("Unknown render mode: {}. Use: escaped, verbatim", other)),
        }
    }
}

/// Escape `& < > " '` for use in HTML text or attribute values.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Incremental HTML writer
#[derive(Debug)]
pub struct Markup {
    buf: String,
    mode: RenderMode,
}

impl Markup {
    pub fn new(mode: RenderMode) -> Self {
        Self {
            buf: String::new(),
            mode,
        }
    }

    pub fn with_capacity(mode: RenderMode, capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            mode,
        }
    }

    /// Write an opening tag
    pub fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self
    }

    /// Write a tag that has no closing counterpart (`img`, `br`, ...)
    pub fn void(&mut self, tag: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Write text content, escaped according to the builder's mode
    pub fn text(&mut self, text: &str) -> &mut Self {
        match self.mode {
            RenderMode::Escaped => self.buf.push_str(&escape_html(text)),
            RenderMode::Verbatim => self.buf.push_str(text),
        }
        self
    }

    /// Write trusted markup as-is
    pub fn raw(&mut self, html: &str) -> &mut Self {
        self.buf.push_str(html);
        self
    }

    /// `<tag attrs>text</tag>`
    pub fn element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.open(tag, attrs).text(text).close(tag)
    }

    pub fn finish(self) -> String {
        self.buf
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_html(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }
}
