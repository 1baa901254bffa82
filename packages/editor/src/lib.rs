//! # Vitrine Editor
//!
//! Draft editing engine for sales pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: pages + typed section content        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: draft lifecycle + mutations         │
//! │  - Stage every change before any save       │
//! │  - Apply mutations with validation          │
//! │  - Field-level edits behind editor forms    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: sections → VDOM preview           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Draft is source of truth**: Nothing touches the backend until save
//! 2. **Validate then apply**: A rejected mutation leaves the draft untouched
//! 3. **Identity decides persistence**: Unsaved sections insert, persisted
//!    sections update, removed persisted sections delete
//! 4. **Whole-record edits**: A field edit produces the full replacement
//!    content, never a partial patch
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrine_editor::{ContentEdit, Mutation, PageDraft};
//! use vitrine_model::SectionKind;
//!
//! let mut draft = PageDraft::new();
//! draft.set_title("Guia de Corrida");
//!
//! draft.apply(Mutation::AddSection { kind: SectionKind::Price })?;
//!
//! let id = draft.sections()[0].id.clone();
//! let next = ContentEdit::SetPrice("R$ 49,90".to_string())
//!     .apply(&draft.sections()[0].content)?;
//! draft.apply(Mutation::UpdateContent { id, content: next })?;
//! ```

mod draft;
mod edits;
mod forms;
mod mutations;

pub use draft::PageDraft;
pub use edits::{ContentEdit, EditError};
pub use forms::{parse_form_event, render_editor, FormEvent};
pub use mutations::{Mutation, MutationError};

// Re-export common types for convenience
pub use vitrine_model::{Section, SectionContent, SectionId, SectionKind};
pub use vitrine_renderer::VNode;
