//! # Vitrine Store
//!
//! Persistence for pages, their sections, and uploaded images.
//!
//! Two backends sit behind the same traits:
//!
//! - [`MemoryStore`] keeps everything in process. Tests and local runs
//!   use it; saved drafts behave exactly as they do against the hosted
//!   backend, fresh row ids included.
//! - [`RestStore`] talks to a PostgREST-compatible API (`/rest/v1`
//!   tables plus `/storage/v1` object buckets).
//!
//! ## Contracts
//!
//! - Section rows come back in display order (`order`, then row age).
//! - Looking a slug up only ever returns published pages. Missing and
//!   unpublished slugs are both `Ok(None)`, not errors.
//! - Deleting a page removes its section rows with it.
//! - Deleting a section that is already gone is a no-op.

pub mod error;
pub mod memory;
pub mod rest;
pub mod traits;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use traits::{NewPage, ObjectStore, PageChanges, PageRecord, PageStore, SectionRow};
