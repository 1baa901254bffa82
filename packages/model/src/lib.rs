//! Vitrine content model
//!
//! The shared vocabulary of the workspace: pages, sections, and the
//! typed content records behind each section variant.
//!
//! A page is a flat, ordered list of sections. Each section carries a
//! variant tag and a content record that is open at the storage
//! boundary: whatever JSON the backend holds decodes into a record,
//! with every missing or malformed field replaced by its neutral
//! value. Rendering fallbacks live in [`fallback`] so the renderer and
//! the editor agree on the substitute copy.
//!
//! Nothing in this crate performs IO. Persistence is `vitrine-store`,
//! rendering is `vitrine-renderer`.

pub mod fallback;
pub mod page;
pub mod section;

pub use page::{slugify, PageId, PageMeta, ThemeColor};
pub use section::{
    into_display_order, sort_for_display, CarouselContent, CarouselImage, FaqContent, FaqItem,
    HeroContent, PriceButton, PriceContent, Section, SectionContent, SectionId, SectionKind,
    TextContent,
};
