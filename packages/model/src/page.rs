//! Page metadata and slug derivation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Backend row id of a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        PageId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accent color applied across a rendered page.
///
/// Stored as a CSS color string, in practice a `#rrggbb` hex value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColor(String);

impl ThemeColor {
    /// Color used when a page never picked one.
    pub const DEFAULT: &'static str = "#3b82f6";

    /// Blank input falls back to [`ThemeColor::DEFAULT`].
    pub fn new(color: impl Into<String>) -> Self {
        let color = color.into();
        if color.trim().is_empty() {
            ThemeColor(Self::DEFAULT.to_string())
        } else {
            ThemeColor(color)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ThemeColor {
    fn default() -> Self {
        ThemeColor(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page-level fields, section list excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// `None` until the first save creates the backend row.
    pub id: Option<PageId>,
    pub title: String,
    /// URL path component the page publishes under.
    pub slug: String,
    pub published: bool,
    pub theme_color: ThemeColor,
    pub created_at: Option<DateTime<Utc>>,
}

impl PageMeta {
    /// Metadata of a page that has never been saved.
    pub fn draft() -> Self {
        PageMeta {
            id: None,
            title: String::new(),
            slug: String::new(),
            published: false,
            theme_color: ThemeColor::default(),
            created_at: None,
        }
    }
}

/// Derive a URL slug from a page title.
///
/// Lowercases, strips diacritics, keeps ASCII letters and digits, and
/// joins words with single dashes. Everything else is dropped.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        for lowered in ch.to_lowercase() {
            match lowered {
                'a'..='z' | '0'..='9' => slug.push(lowered),
                c if c.is_whitespace() || c == '-' => {
                    if !slug.is_empty() && !slug.ends_with('-') {
                        slug.push('-');
                    }
                }
                _ => {}
            }
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
