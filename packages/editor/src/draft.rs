//! # Page Draft
//!
//! The editing state of one page: metadata plus the staged section list.
//!
//! A draft never talks to a backend. Loading fills it from stored rows,
//! mutations rearrange it in memory, and a save reconciles it back by
//! section identity. Sections removed from the draft keep their row ids
//! in a side list so the save knows what to delete.
//!
//! ## Lifecycle
//!
//! ```text
//! New / Open → Mutate → Preview → Save
//!     ↓          ↓         ↓        ↓
//!   Meta     Sections    VDOM    Backend
//! ```

use vitrine_model::{into_display_order, slugify, PageMeta, Section, SectionId, ThemeColor};

use crate::mutations::{Mutation, MutationError};

/// Editable page
#[derive(Debug, Clone)]
pub struct PageDraft {
    meta: PageMeta,
    sections: Vec<Section>,
    /// Row ids of persisted sections removed since load.
    removed: Vec<String>,
    /// Next ordinal for [`SectionId::Unsaved`].
    next_unsaved: u64,
    /// Increments on each applied mutation.
    version: u64,
    dirty: bool,
}

impl PageDraft {
    /// Draft of a page that has never been saved.
    pub fn new() -> Self {
        Self {
            meta: PageMeta::draft(),
            sections: Vec::new(),
            removed: Vec::new(),
            next_unsaved: 0,
            version: 0,
            dirty: false,
        }
    }

    /// Draft filled from stored rows. Staging order starts out as display
    /// order, whatever order the rows arrived in.
    pub fn from_parts(meta: PageMeta, sections: Vec<Section>) -> Self {
        Self {
            meta,
            sections: into_display_order(sections),
            removed: Vec::new(),
            next_unsaved: 0,
            version: 0,
            dirty: false,
        }
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Sections in staging order. Use [`PageDraft::display_sections`] for
    /// render order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Sections in display order: ascending `order`, ties keep list position.
    pub fn display_sections(&self) -> Vec<&Section> {
        vitrine_model::sort_for_display(&self.sections)
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| &section.id == id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the page title. While the page has never been saved, the slug
    /// follows the title; after that the slug only changes explicitly.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.meta.title = title.into();
        if self.meta.id.is_none() {
            self.meta.slug = slugify(&self.meta.title);
        }
        self.dirty = true;
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.meta.slug = slug.into();
        self.dirty = true;
    }

    pub fn set_published(&mut self, published: bool) {
        self.meta.published = published;
        self.dirty = true;
    }

    pub fn set_theme_color(&mut self, color: ThemeColor) {
        self.meta.theme_color = color;
        self.dirty = true;
    }

    /// Apply a mutation. Validation failures leave the draft untouched and
    /// do not bump the version.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        mutation.apply_to(self)?;
        self.version += 1;
        self.dirty = true;
        Ok(())
    }

    /// Row ids awaiting deletion on the next save.
    pub fn removed_section_ids(&self) -> &[String] {
        &self.removed
    }

    /// Drain the pending deletions. Called once the rows are gone.
    pub fn take_removed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.removed)
    }

    /// Adopt the stored page row after the first save.
    ///
    /// From here on the slug no longer follows the title.
    pub fn assign_page(&mut self, meta: PageMeta) {
        self.meta = meta;
    }

    /// Swap an unsaved id for the row id the backend assigned.
    pub fn assign_persisted(&mut self, unsaved: &SectionId, row_id: impl Into<String>) {
        let row_id = row_id.into();
        for section in &mut self.sections {
            if &section.id == unsaved {
                section.id = SectionId::Persisted(row_id);
                return;
            }
        }
    }

    /// Mark the draft clean after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn sections_mut(&mut self) -> &mut Vec<Section> {
        &mut self.sections
    }

    pub(crate) fn alloc_unsaved(&mut self) -> SectionId {
        let id = SectionId::Unsaved(self.next_unsaved);
        self.next_unsaved += 1;
        id
    }

    pub(crate) fn note_removed(&mut self, row_id: String) {
        self.removed.push(row_id);
    }
}

impl Default for PageDraft {
    fn default() -> Self {
        Self::new()
    }
}
