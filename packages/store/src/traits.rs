//! # Storage Traits
//!
//! The contract between the editing session and whatever holds the
//! data. Both traits are object safe; sessions hold `Arc<dyn PageStore>`
//! and `Arc<dyn ObjectStore>` and never know which backend is behind
//! them.

use async_trait::async_trait;
use uuid::Uuid;
use vitrine_model::{PageId, PageMeta, Section, SectionContent, ThemeColor};

use crate::error::StoreError;

/// A page row together with its section rows, already in display order
#[derive(Debug, Clone)]
pub struct PageRecord {
    pub meta: PageMeta,
    pub sections: Vec<Section>,
}

/// Fields for a page row that does not exist yet
#[derive(Debug, Clone)]
pub struct NewPage {
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub theme_color: ThemeColor,
}

/// Partial update to a page row. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PageChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub published: Option<bool>,
    pub theme_color: Option<ThemeColor>,
}

/// Section fields as stored, detached from row identity
#[derive(Debug, Clone)]
pub struct SectionRow {
    pub content: SectionContent,
    pub order: i32,
}

impl From<&Section> for SectionRow {
    fn from(section: &Section) -> Self {
        Self {
            content: section.content.clone(),
            order: section.order,
        }
    }
}

/// Page and section persistence
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Load one page with its sections.
    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError>;

    /// Look a published page up by its slug.
    ///
    /// Missing and unpublished slugs both come back as `Ok(None)`; a
    /// draft page is invisible here no matter how its slug is guessed.
    async fn load_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, StoreError>;

    /// Every page, newest first.
    async fn list_pages(&self) -> Result<Vec<PageMeta>, StoreError>;

    /// Create a page row and return its stored form, id and timestamp set.
    async fn create_page(&self, page: NewPage) -> Result<PageMeta, StoreError>;

    async fn update_page(&self, id: &PageId, changes: PageChanges) -> Result<(), StoreError>;

    /// Remove a page row and its section rows.
    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError>;

    /// Insert a section row and return its new row id.
    async fn insert_section(&self, page: &PageId, row: SectionRow) -> Result<String, StoreError>;

    async fn update_section(&self, id: &str, row: SectionRow) -> Result<(), StoreError>;

    /// Remove a section row. Rows that are already gone are a no-op.
    async fn delete_section(&self, id: &str) -> Result<(), StoreError>;
}

/// Uploaded image storage
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store a blob under a fresh name and return its public URL.
    ///
    /// `filename` only contributes its extension; the stored name is
    /// generated so repeated uploads never collide.
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;
}

/// Fresh object name keeping the original extension.
pub(crate) fn object_name(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("{}.{}", Uuid::new_v4(), ext),
        _ => Uuid::new_v4().to_string(),
    }
}
