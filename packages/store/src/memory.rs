//! # In-Memory Store
//!
//! Process-local backend for tests and offline work. Rows get fresh
//! uuid ids on insert, so a draft saved here round-trips exactly like
//! one saved against the hosted backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use vitrine_model::{PageId, PageMeta, Section, SectionContent, SectionId, ThemeColor};

use crate::error::StoreError;
use crate::traits::{
    object_name, NewPage, ObjectStore, PageChanges, PageRecord, PageStore, SectionRow,
};

struct StoredPage {
    id: String,
    title: String,
    slug: String,
    published: bool,
    theme_color: ThemeColor,
    created_at: DateTime<Utc>,
    // Creation order; breaks created_at ties so listing stays stable.
    seq: u64,
}

struct StoredSection {
    id: String,
    page_id: String,
    content: SectionContent,
    order: i32,
    // Insertion order; breaks position ties the way row age does.
    seq: u64,
}

#[derive(Default)]
struct Tables {
    pages: HashMap<String, StoredPage>,
    sections: Vec<StoredSection>,
    objects: HashMap<String, Vec<u8>>,
    seq: u64,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn sections_of(&self, page_id: &str) -> Vec<Section> {
        let mut rows: Vec<&StoredSection> = self
            .sections
            .iter()
            .filter(|row| row.page_id == page_id)
            .collect();
        rows.sort_by_key(|row| (row.order, row.seq));
        rows.iter()
            .map(|row| Section {
                id: SectionId::Persisted(row.id.clone()),
                content: row.content.clone(),
                order: row.order,
            })
            .collect()
    }

    fn slug_in_use(&self, slug: &str, excluding: Option<&str>) -> bool {
        self.pages
            .values()
            .any(|page| page.slug == slug && Some(page.id.as_str()) != excluding)
    }
}

fn meta_of(page: &StoredPage) -> PageMeta {
    PageMeta {
        id: Some(PageId::new(page.id.clone())),
        title: page.title.clone(),
        slug: page.slug.clone(),
        published: page.published,
        theme_color: page.theme_color.clone(),
        created_at: Some(page.created_at),
    }
}

/// In-memory [`PageStore`] and [`ObjectStore`]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Bytes stored under an uploaded object's name, for assertions.
    pub async fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.tables.read().await.objects.get(name).cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn load_page(&self, id: &PageId) -> Result<PageRecord, StoreError> {
        let tables = self.tables.read().await;
        let page = tables
            .pages
            .get(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(PageRecord {
            meta: meta_of(page),
            sections: tables.sections_of(&page.id),
        })
    }

    async fn load_page_by_slug(&self, slug: &str) -> Result<Option<PageRecord>, StoreError> {
        let tables = self.tables.read().await;
        let page = tables
            .pages
            .values()
            .find(|page| page.slug == slug && page.published);
        Ok(page.map(|page| PageRecord {
            meta: meta_of(page),
            sections: tables.sections_of(&page.id),
        }))
    }

    async fn list_pages(&self) -> Result<Vec<PageMeta>, StoreError> {
        let tables = self.tables.read().await;
        let mut pages: Vec<&StoredPage> = tables.pages.values().collect();
        pages.sort_by_key(|page| std::cmp::Reverse((page.created_at, page.seq)));
        Ok(pages.into_iter().map(meta_of).collect())
    }

    async fn create_page(&self, page: NewPage) -> Result<PageMeta, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.slug_in_use(&page.slug, None) {
            return Err(StoreError::SlugTaken(page.slug));
        }

        let stored = StoredPage {
            id: Uuid::new_v4().to_string(),
            title: page.title,
            slug: page.slug,
            published: page.published,
            theme_color: page.theme_color,
            created_at: Utc::now(),
            seq: tables.next_seq(),
        };
        let meta = meta_of(&stored);
        tables.pages.insert(stored.id.clone(), stored);
        Ok(meta)
    }

    async fn update_page(&self, id: &PageId, changes: PageChanges) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let slug_collision = match &changes.slug {
            Some(slug) if tables.slug_in_use(slug, Some(id.as_str())) => Some(slug.clone()),
            _ => None,
        };

        let page = tables
            .pages
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if let Some(slug) = slug_collision {
            return Err(StoreError::SlugTaken(slug));
        }
        if let Some(title) = changes.title {
            page.title = title;
        }
        if let Some(slug) = changes.slug {
            page.slug = slug;
        }
        if let Some(published) = changes.published {
            page.published = published;
        }
        if let Some(theme_color) = changes.theme_color {
            page.theme_color = theme_color;
        }
        Ok(())
    }

    async fn delete_page(&self, id: &PageId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.pages.remove(id.as_str());
        tables.sections.retain(|row| row.page_id != id.as_str());
        Ok(())
    }

    async fn insert_section(&self, page: &PageId, row: SectionRow) -> Result<String, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.pages.contains_key(page.as_str()) {
            return Err(StoreError::NotFound(page.clone()));
        }

        let id = Uuid::new_v4().to_string();
        let seq = tables.next_seq();
        tables.sections.push(StoredSection {
            id: id.clone(),
            page_id: page.as_str().to_string(),
            content: row.content,
            order: row.order,
            seq,
        });
        Ok(id)
    }

    async fn update_section(&self, id: &str, row: SectionRow) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .sections
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or_else(|| StoreError::SectionNotFound(id.to_string()))?;
        stored.content = row.content;
        stored.order = row.order;
        Ok(())
    }

    async fn delete_section(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.sections.retain(|row| row.id != id);
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        let name = object_name(filename);
        let mut tables = self.tables.write().await;
        tables.objects.insert(name.clone(), bytes);
        Ok(format!("memory://page-images/{}", name))
    }
}
