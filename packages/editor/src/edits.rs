//! # Field Edits
//!
//! One keystroke-level edit to a section's content record.
//!
//! An edit never mutates in place: [`ContentEdit::apply`] takes the current
//! record and returns the full replacement, which then goes through
//! [`crate::Mutation::UpdateContent`]. List edits target entries by index,
//! matching the row the editor form rendered them in.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vitrine_model::{CarouselImage, FaqItem, PriceButton, SectionContent};

/// Single-field edit to a content record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ContentEdit {
    // Any variant
    SetTitle(String),

    // Hero
    SetSubtitle(String),
    SetBackgroundImage(String),
    ClearBackgroundImage,

    // Text and price
    SetBody(String),

    // Price
    SetPrice(String),
    SetNote(String),
    PushButton,
    SetButtonText { index: usize, text: String },
    SetButtonLink { index: usize, link: String },
    RemoveButton { index: usize },

    // Carousel
    PushImage,
    SetImageUrl { index: usize, url: String },
    SetImageTitle { index: usize, title: String },
    SetImageSubtitle { index: usize, subtitle: String },
    RemoveImage { index: usize },

    // Faq
    PushItem,
    SetQuestion { index: usize, question: String },
    SetAnswer { index: usize, answer: String },
    RemoveItem { index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("{field} does not apply to {kind} sections")]
    FieldMismatch { field: &'static str, kind: String },

    #[error("Entry {index} out of range (len {len})")]
    EntryOutOfRange { index: usize, len: usize },

    #[error("Sections of kind {0} cannot be edited")]
    NotEditable(String),

    #[error("Unrecognized form control: {0}")]
    UnknownControl(String),
}

impl ContentEdit {
    /// Apply to a content record, producing the full replacement record.
    pub fn apply(&self, content: &SectionContent) -> Result<SectionContent, EditError> {
        if let SectionContent::Unknown { kind, .. } = content {
            return Err(EditError::NotEditable(kind.clone()));
        }

        let mut next = content.clone();
        match (self, &mut next) {
            (ContentEdit::SetTitle(value), SectionContent::Hero(c)) => c.title = value.clone(),
            (ContentEdit::SetTitle(value), SectionContent::Text(c)) => c.title = value.clone(),
            (ContentEdit::SetTitle(value), SectionContent::Price(c)) => c.title = value.clone(),
            (ContentEdit::SetTitle(value), SectionContent::Carousel(c)) => c.title = value.clone(),
            (ContentEdit::SetTitle(value), SectionContent::Faq(c)) => c.title = value.clone(),

            (ContentEdit::SetSubtitle(value), SectionContent::Hero(c)) => {
                c.subtitle = value.clone()
            }
            (ContentEdit::SetBackgroundImage(url), SectionContent::Hero(c)) => {
                c.background_image = Some(url.clone())
            }
            (ContentEdit::ClearBackgroundImage, SectionContent::Hero(c)) => {
                c.background_image = None
            }

            (ContentEdit::SetBody(value), SectionContent::Text(c)) => c.body = value.clone(),
            (ContentEdit::SetBody(value), SectionContent::Price(c)) => c.body = value.clone(),
            (ContentEdit::SetPrice(value), SectionContent::Price(c)) => c.price = value.clone(),
            (ContentEdit::SetNote(value), SectionContent::Price(c)) => c.note = value.clone(),

            (ContentEdit::PushButton, SectionContent::Price(c)) => {
                c.buttons.push(PriceButton::default())
            }
            (ContentEdit::SetButtonText { index, text }, SectionContent::Price(c)) => {
                entry_mut(&mut c.buttons, *index)?.text = text.clone()
            }
            (ContentEdit::SetButtonLink { index, link }, SectionContent::Price(c)) => {
                entry_mut(&mut c.buttons, *index)?.link = link.clone()
            }
            (ContentEdit::RemoveButton { index }, SectionContent::Price(c)) => {
                remove_entry(&mut c.buttons, *index)?;
            }

            (ContentEdit::PushImage, SectionContent::Carousel(c)) => {
                c.images.push(CarouselImage::default())
            }
            (ContentEdit::SetImageUrl { index, url }, SectionContent::Carousel(c)) => {
                entry_mut(&mut c.images, *index)?.url = url.clone()
            }
            (ContentEdit::SetImageTitle { index, title }, SectionContent::Carousel(c)) => {
                entry_mut(&mut c.images, *index)?.title = title.clone()
            }
            (ContentEdit::SetImageSubtitle { index, subtitle }, SectionContent::Carousel(c)) => {
                entry_mut(&mut c.images, *index)?.subtitle = subtitle.clone()
            }
            (ContentEdit::RemoveImage { index }, SectionContent::Carousel(c)) => {
                remove_entry(&mut c.images, *index)?;
            }

            (ContentEdit::PushItem, SectionContent::Faq(c)) => c.items.push(FaqItem::default()),
            (ContentEdit::SetQuestion { index, question }, SectionContent::Faq(c)) => {
                entry_mut(&mut c.items, *index)?.question = question.clone()
            }
            (ContentEdit::SetAnswer { index, answer }, SectionContent::Faq(c)) => {
                entry_mut(&mut c.items, *index)?.answer = answer.clone()
            }
            (ContentEdit::RemoveItem { index }, SectionContent::Faq(c)) => {
                remove_entry(&mut c.items, *index)?;
            }

            (edit, other) => {
                return Err(EditError::FieldMismatch {
                    field: edit.field_name(),
                    kind: other.kind_str().to_string(),
                })
            }
        }
        Ok(next)
    }

    fn field_name(&self) -> &'static str {
        match self {
            ContentEdit::SetTitle(_) => "title",
            ContentEdit::SetSubtitle(_) => "subtitle",
            ContentEdit::SetBackgroundImage(_) | ContentEdit::ClearBackgroundImage => {
                "background image"
            }
            ContentEdit::SetBody(_) => "body",
            ContentEdit::SetPrice(_) => "price",
            ContentEdit::SetNote(_) => "note",
            ContentEdit::PushButton
            | ContentEdit::SetButtonText { .. }
            | ContentEdit::SetButtonLink { .. }
            | ContentEdit::RemoveButton { .. } => "buttons",
            ContentEdit::PushImage
            | ContentEdit::SetImageUrl { .. }
            | ContentEdit::SetImageTitle { .. }
            | ContentEdit::SetImageSubtitle { .. }
            | ContentEdit::RemoveImage { .. } => "images",
            ContentEdit::PushItem
            | ContentEdit::SetQuestion { .. }
            | ContentEdit::SetAnswer { .. }
            | ContentEdit::RemoveItem { .. } => "items",
        }
    }
}

fn entry_mut<T>(entries: &mut [T], index: usize) -> Result<&mut T, EditError> {
    let len = entries.len();
    entries
        .get_mut(index)
        .ok_or(EditError::EntryOutOfRange { index, len })
}

fn remove_entry<T>(entries: &mut Vec<T>, index: usize) -> Result<T, EditError> {
    if index >= entries.len() {
        return Err(EditError::EntryOutOfRange {
            index,
            len: entries.len(),
        });
    }
    Ok(entries.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_model::SectionKind;

    #[test]
    fn edit_returns_replacement_without_touching_original() {
        let original = SectionContent::starter(SectionKind::Text);
        let edited = ContentEdit::SetTitle("Novo título".to_string())
            .apply(&original)
            .unwrap();

        match (&original, &edited) {
            (SectionContent::Text(before), SectionContent::Text(after)) => {
                assert_eq!(before.title, "Seção de Texto");
                assert_eq!(after.title, "Novo título");
                assert_eq!(after.body, before.body);
            }
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn field_on_wrong_variant_is_rejected() {
        let hero = SectionContent::starter(SectionKind::Hero);
        let err = ContentEdit::SetPrice("R$ 10,00".to_string())
            .apply(&hero)
            .unwrap_err();
        assert_eq!(
            err,
            EditError::FieldMismatch {
                field: "price",
                kind: "hero".to_string()
            }
        );
    }

    #[test]
    fn list_edits_bound_check_their_index() {
        let faq = SectionContent::starter(SectionKind::Faq);
        let err = ContentEdit::SetQuestion {
            index: 5,
            question: "?".to_string(),
        }
        .apply(&faq)
        .unwrap_err();
        assert_eq!(err, EditError::EntryOutOfRange { index: 5, len: 1 });
    }

    #[test]
    fn push_appends_blank_entries() {
        let price = SectionContent::starter(SectionKind::Price);
        let edited = ContentEdit::PushButton.apply(&price).unwrap();
        match edited {
            SectionContent::Price(content) => {
                assert_eq!(content.buttons.len(), 2);
                assert_eq!(content.buttons[1], PriceButton::default());
            }
            _ => panic!("expected price content"),
        }
    }

    #[test]
    fn unknown_sections_reject_all_edits() {
        let unknown = SectionContent::decode("video", serde_json::json!({}));
        let err = ContentEdit::SetTitle("x".to_string())
            .apply(&unknown)
            .unwrap_err();
        assert_eq!(err, EditError::NotEditable("video".to_string()));
    }

    #[test]
    fn background_image_set_and_clear() {
        let hero = SectionContent::starter(SectionKind::Hero);
        let with_image = ContentEdit::SetBackgroundImage("https://cdn.example.com/bg.png".to_string())
            .apply(&hero)
            .unwrap();
        let cleared = ContentEdit::ClearBackgroundImage.apply(&with_image).unwrap();

        match (with_image, cleared) {
            (SectionContent::Hero(set), SectionContent::Hero(clear)) => {
                assert_eq!(set.background_image.as_deref(), Some("https://cdn.example.com/bg.png"));
                assert_eq!(clear.background_image, None);
            }
            _ => panic!("expected hero content"),
        }
    }
}
