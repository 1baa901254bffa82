//! # Vitrine Renderer
//!
//! Renders a page's section list to a virtual DOM tree, and virtual DOM
//! trees to HTML.
//!
//! ## Determinism Contract
//!
//! **INVARIANT: Rendering is fully deterministic.**
//!
//! For any sections + RenderOptions, `render_page()` MUST produce identical
//! output on every invocation:
//!
//! - Same sections → same VNode tree (byte-for-byte identical HTML)
//! - Attribute and style maps are ordered, so printing never leaks map
//!   iteration order
//! - No time/random/environment dependence
//! - Sections print in ascending `order`; equal orders keep list position
//!
//! ## Fallback Discipline
//!
//! Rendering never fails and never mutates content. A blank field displays
//! its substitute copy from `vitrine_model::fallback`; the stored value
//! stays blank. Sections of a kind this build does not recognize render as
//! nothing.
//!
//! ## Preview vs Public
//!
//! The two modes differ only in the banner above the page and in purchase
//! links being inert. Everything else renders identically, so what an
//! author previews is what a visitor gets.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_renderer::{render_page, render_html, HtmlOptions, RenderOptions};
//!
//! let options = RenderOptions::public(meta.theme_color.clone());
//! let tree = render_page(&meta, &sections, &options);
//! let html = render_html(&tree, HtmlOptions::default());
//! ```

pub mod html;
pub mod render;
pub mod vdom;

#[cfg(test)]
mod tests_render;

pub use html::{render_document, render_html, HtmlOptions};
pub use render::{render_page, render_section, RenderOptions};
pub use vdom::VNode;
