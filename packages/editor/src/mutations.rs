//! # Draft Mutations
//!
//! High-level semantic operations on a page draft.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents one author action
//! 2. **Validated**: All mutations validate before touching the draft
//! 3. **Minimal**: No redundant or overly generic operations
//!
//! ## Mutation Semantics
//!
//! ### AddSection
//! - Appends with starter content and the next display position
//! - New sections carry an unsaved id until the first save
//!
//! ### UpdateContent
//! - Atomic replacement of the whole content record
//! - The variant of a section never changes after creation
//!
//! ### RemoveSection
//! - Drops the section from the draft
//! - Persisted sections queue their row id for deletion on save
//! - Remaining positions keep their values; gaps are fine
//!
//! ### MoveSection
//! - Relocates within display order, then renumbers all positions 0..n
//! - Target indexes past the end clamp to the end

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_model::{Section, SectionContent, SectionId, SectionKind};

use crate::draft::PageDraft;

/// Semantic draft operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Append a new section with starter content
    AddSection { kind: SectionKind },

    /// Replace a section's content record (atomic replacement)
    UpdateContent {
        id: SectionId,
        content: SectionContent,
    },

    /// Remove a section from the draft
    RemoveSection { id: SectionId },

    /// Move a section to an index within display order
    MoveSection { id: SectionId, to_index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    #[error("Section holds {expected} content, got {got}")]
    KindMismatch { expected: String, got: String },
}

impl Mutation {
    /// Validate without applying
    pub fn validate(&self, draft: &PageDraft) -> Result<(), MutationError> {
        match self {
            Mutation::AddSection { .. } => Ok(()),

            Mutation::UpdateContent { id, content } => {
                let section = find_section(draft, id)?;
                if section.kind_str() != content.kind_str() {
                    return Err(MutationError::KindMismatch {
                        expected: section.kind_str().to_string(),
                        got: content.kind_str().to_string(),
                    });
                }
                Ok(())
            }

            Mutation::RemoveSection { id } => {
                find_section(draft, id)?;
                Ok(())
            }

            Mutation::MoveSection { id, .. } => {
                find_section(draft, id)?;
                Ok(())
            }
        }
    }

    /// Apply to a draft with validation
    pub(crate) fn apply_to(&self, draft: &mut PageDraft) -> Result<(), MutationError> {
        self.validate(draft)?;

        match self {
            Mutation::AddSection { kind } => Self::apply_add(draft, *kind),
            Mutation::UpdateContent { id, content } => Self::apply_update(draft, id, content),
            Mutation::RemoveSection { id } => Self::apply_remove(draft, id),
            Mutation::MoveSection { id, to_index } => Self::apply_move(draft, id, *to_index),
        }
    }

    fn apply_add(draft: &mut PageDraft, kind: SectionKind) -> Result<(), MutationError> {
        let id = draft.alloc_unsaved();
        let order = draft.sections().len() as i32;
        draft.sections_mut().push(Section {
            id,
            content: SectionContent::starter(kind),
            order,
        });
        Ok(())
    }

    fn apply_update(
        draft: &mut PageDraft,
        id: &SectionId,
        content: &SectionContent,
    ) -> Result<(), MutationError> {
        let section = draft
            .sections_mut()
            .iter_mut()
            .find(|section| &section.id == id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        section.content = content.clone();
        Ok(())
    }

    fn apply_remove(draft: &mut PageDraft, id: &SectionId) -> Result<(), MutationError> {
        let sections = draft.sections_mut();
        let position = sections
            .iter()
            .position(|section| &section.id == id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        let removed = sections.remove(position);
        if let Some(row_id) = removed.id.persisted() {
            draft.note_removed(row_id.to_string());
        }
        Ok(())
    }

    fn apply_move(draft: &mut PageDraft, id: &SectionId, to_index: usize) -> Result<(), MutationError> {
        let sections = draft.sections_mut();

        // Current display order as indexes into the staging list.
        let mut display: Vec<usize> = (0..sections.len()).collect();
        display.sort_by_key(|&index| sections[index].order);

        let from = display
            .iter()
            .position(|&index| sections[index].id == *id)
            .ok_or_else(|| MutationError::SectionNotFound(id.clone()))?;
        let moved = display.remove(from);
        let target = to_index.min(display.len());
        display.insert(target, moved);

        // Renumber to dense positions and keep the staging list in
        // display order so later ties stay predictable.
        let mut reordered: Vec<Section> = display
            .into_iter()
            .map(|index| sections[index].clone())
            .collect();
        for (position, section) in reordered.iter_mut().enumerate() {
            section.order = position as i32;
        }
        *sections = reordered;
        Ok(())
    }
}

fn find_section<'a>(draft: &'a PageDraft, id: &SectionId) -> Result<&'a Section, MutationError> {
    draft
        .section(id)
        .ok_or_else(|| MutationError::SectionNotFound(id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateContent {
            id: SectionId::Persisted("row-123".to_string()),
            content: SectionContent::starter(SectionKind::Text),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_missing_section() {
        let draft = PageDraft::new();
        let mutation = Mutation::RemoveSection {
            id: SectionId::Persisted("missing".to_string()),
        };

        assert!(mutation.validate(&draft).is_err());
    }
}
