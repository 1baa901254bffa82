//! # Public Rendering
//!
//! Slug resolution and the standalone document a visitor receives.

use vitrine_model::{PageMeta, Section};
use vitrine_renderer::{render_document, render_page, HtmlOptions, RenderOptions, VNode};
use vitrine_store::{PageStore, StoreError};

/// A published page as a visitor sees it
#[derive(Debug, Clone)]
pub struct PublicPage {
    pub meta: PageMeta,
    pub sections: Vec<Section>,
}

impl PublicPage {
    /// Render the page tree with purchase links live.
    pub fn render(&self) -> VNode {
        let options = RenderOptions::public(self.meta.theme_color.clone());
        render_page(&self.meta, &self.sections, &options)
    }

    /// Render the complete standalone HTML document.
    pub fn render_html(&self, options: HtmlOptions) -> String {
        let description = format!("{} - Página de vendas", self.meta.title);
        render_document(&self.render(), &self.meta.title, &description, options)
    }
}

/// Resolve a slug to its published page.
///
/// Unpublished and missing slugs both come back `None`; a visitor
/// cannot tell a draft from a page that never existed.
pub async fn resolve_public(
    store: &dyn PageStore,
    slug: &str,
) -> Result<Option<PublicPage>, StoreError> {
    let record = store.load_page_by_slug(slug).await?;
    Ok(record.map(|record| PublicPage {
        meta: record.meta,
        sections: record.sections,
    }))
}
