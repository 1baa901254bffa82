//! # Editor Session
//!
//! One page open for editing: the staged draft plus the stores behind
//! it. Mutations and field edits stage locally and render instantly;
//! nothing touches the backend until [`EditorSession::save`], which
//! reconciles the whole staged state in one pass.

use std::sync::Arc;

use tracing::{debug, info, warn};
use vitrine_editor::{render_editor, ContentEdit, EditError, Mutation, MutationError, PageDraft};
use vitrine_model::{PageId, SectionContent, SectionId, ThemeColor};
use vitrine_renderer::{render_page, RenderOptions, VNode};
use vitrine_store::{NewPage, ObjectStore, PageChanges, PageStore, SectionRow, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    // Surfaced verbatim in the editor UI.
    #[error("Título e slug são obrigatórios.")]
    MissingRequiredFields,

    #[error("Section {0} is not a hero section")]
    NotAHeroSection(SectionId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// A page being edited against a pair of stores
pub struct EditorSession {
    store: Arc<dyn PageStore>,
    objects: Arc<dyn ObjectStore>,
    draft: PageDraft,
}

impl EditorSession {
    /// Start over a page that does not exist yet.
    pub fn new_page(store: Arc<dyn PageStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            objects,
            draft: PageDraft::new(),
        }
    }

    /// Open an existing page for editing.
    pub async fn open(
        store: Arc<dyn PageStore>,
        objects: Arc<dyn ObjectStore>,
        id: &PageId,
    ) -> Result<Self, SessionError> {
        let record = store.load_page(id).await?;
        debug!(%id, sections = record.sections.len(), "opened page");
        Ok(Self {
            store,
            objects,
            draft: PageDraft::from_parts(record.meta, record.sections),
        })
    }

    pub fn draft(&self) -> &PageDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.set_title(title);
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.draft.set_slug(slug);
    }

    pub fn set_published(&mut self, published: bool) {
        self.draft.set_published(published);
    }

    pub fn set_theme_color(&mut self, color: ThemeColor) {
        self.draft.set_theme_color(color);
    }

    /// Stage a structural mutation.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), SessionError> {
        self.draft.apply(mutation)?;
        Ok(())
    }

    /// Stage a single-field edit against one section.
    pub fn edit_section(&mut self, id: &SectionId, edit: ContentEdit) -> Result<(), SessionError> {
        let section = self
            .draft
            .section(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        let content = edit.apply(&section.content)?;
        self.draft.apply(Mutation::UpdateContent {
            id: id.clone(),
            content,
        })?;
        Ok(())
    }

    /// Preview tree for the staged draft, banner and inert buttons included.
    pub fn preview(&self) -> VNode {
        let options = RenderOptions::preview(self.draft.meta().theme_color.clone());
        render_page(self.draft.meta(), self.draft.sections(), &options)
    }

    /// Editing panel for one staged section.
    pub fn editor_panel(&self, id: &SectionId) -> Option<VNode> {
        self.draft.section(id).map(render_editor)
    }

    /// Editing panels for every staged section, stacked in display order.
    pub fn editor_panels(&self) -> VNode {
        let panels = self
            .draft
            .display_sections()
            .into_iter()
            .map(render_editor)
            .collect();
        VNode::element("div")
            .with_attr("class", "vitrine-editor")
            .with_children(panels)
    }

    /// Upload a background image for a hero section and stage its URL.
    ///
    /// The section is checked before any bytes move, so a failed upload
    /// leaves the draft exactly as it was.
    pub async fn upload_hero_background(
        &mut self,
        id: &SectionId,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SessionError> {
        let section = self
            .draft
            .section(id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        if !matches!(section.content, SectionContent::Hero(_)) {
            return Err(SessionError::NotAHeroSection(id.clone()));
        }

        let url = match self.objects.upload(filename, bytes, content_type).await {
            Ok(url) => url,
            Err(err) => {
                warn!(%id, "background upload failed");
                return Err(err.into());
            }
        };
        self.edit_section(id, ContentEdit::SetBackgroundImage(url.clone()))?;
        Ok(url)
    }

    /// Push the staged draft to the backend and return the page id.
    ///
    /// Page row first (created on the first save), then every staged
    /// section: unsaved rows insert and adopt their new id, persisted
    /// rows update in place. Queued deletions go last. Title and slug
    /// must be non-blank before anything is sent.
    pub async fn save(&mut self) -> Result<PageId, SessionError> {
        let title = self.draft.meta().title.trim().to_string();
        let slug = self.draft.meta().slug.trim().to_string();
        if title.is_empty() || slug.is_empty() {
            return Err(SessionError::MissingRequiredFields);
        }

        let page_id = match self.draft.meta().id.clone() {
            Some(id) => {
                let changes = PageChanges {
                    title: Some(title),
                    slug: Some(slug),
                    published: Some(self.draft.meta().published),
                    theme_color: Some(self.draft.meta().theme_color.clone()),
                };
                self.store.update_page(&id, changes).await?;
                id
            }
            None => {
                let meta = self
                    .store
                    .create_page(NewPage {
                        title,
                        slug,
                        published: self.draft.meta().published,
                        theme_color: self.draft.meta().theme_color.clone(),
                    })
                    .await?;
                let id = meta.id.clone().ok_or_else(|| StoreError::Api {
                    status: 0,
                    message: "created page came back without an id".to_string(),
                })?;
                self.draft.assign_page(meta);
                id
            }
        };

        let staged: Vec<(SectionId, SectionRow)> = self
            .draft
            .sections()
            .iter()
            .map(|section| (section.id.clone(), SectionRow::from(section)))
            .collect();
        for (id, row) in staged {
            match &id {
                SectionId::Unsaved(_) => {
                    let row_id = self.store.insert_section(&page_id, row).await?;
                    self.draft.assign_persisted(&id, row_id);
                }
                SectionId::Persisted(row_id) => {
                    self.store.update_section(row_id, row).await?;
                }
            }
        }

        for row_id in self.draft.take_removed() {
            self.store.delete_section(&row_id).await?;
        }

        self.draft.mark_clean();
        info!(id = %page_id, "saved page");
        Ok(page_id)
    }
}
