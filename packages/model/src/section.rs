//! Sections and their typed content records.
//!
//! Content blobs arrive from storage as free-form JSON. [`SectionContent::decode`]
//! never rejects one: every field is read independently and replaced by its
//! neutral value (empty string, empty list, `None`) when missing or of the
//! wrong shape. Variants this build does not recognize survive as
//! [`SectionContent::Unknown`] and round-trip through a save byte-for-byte.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a section across the save boundary.
///
/// Sections created in a draft carry an `Unsaved` ordinal until the first
/// save assigns them a backend row id. A `Persisted` id never changes;
/// saving an existing section updates its row in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionId {
    /// Created in the current draft, not yet known to the backend.
    Unsaved(u64),
    /// Backend row id.
    Persisted(String),
}

impl SectionId {
    pub fn is_unsaved(&self) -> bool {
        matches!(self, SectionId::Unsaved(_))
    }

    /// Backend row id, if this section has been saved before.
    pub fn persisted(&self) -> Option<&str> {
        match self {
            SectionId::Unsaved(_) => None,
            SectionId::Persisted(id) => Some(id),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Unsaved(n) => write!(f, "unsaved:{}", n),
            SectionId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// The five section variants a page can be composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Text,
    Price,
    Carousel,
    Faq,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Hero,
        SectionKind::Text,
        SectionKind::Price,
        SectionKind::Carousel,
        SectionKind::Faq,
    ];

    /// Wire tag stored in the `section_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::Text => "text",
            SectionKind::Price => "price",
            SectionKind::Carousel => "carousel",
            SectionKind::Faq => "faq",
        }
    }

    pub fn parse(tag: &str) -> Option<SectionKind> {
        match tag {
            "hero" => Some(SectionKind::Hero),
            "text" => Some(SectionKind::Text),
            "price" => Some(SectionKind::Price),
            "carousel" => Some(SectionKind::Carousel),
            "faq" => Some(SectionKind::Faq),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening banner of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroContent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    /// Public URL of an uploaded image. `None` when never set or cleared.
    #[serde(rename = "backgroundImage", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

/// Free-form prose block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextContent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(rename = "content", skip_serializing_if = "String::is_empty")]
    pub body: String,
}

/// Call-to-action link on a price section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceButton {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,
}

/// Offer block: price display plus any number of purchase buttons.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceContent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(rename = "content", skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub price: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    pub buttons: Vec<PriceButton>,
}

/// One slide of a carousel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarouselImage {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarouselContent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub images: Vec<CarouselImage>,
}

/// One question/answer pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FaqItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub question: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FaqContent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub items: Vec<FaqItem>,
}

/// Content record of a section, tagged by variant.
///
/// `Unknown` carries variants from newer builds or hand-edited rows. They
/// render as nothing and are written back unchanged on save.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Hero(HeroContent),
    Text(TextContent),
    Price(PriceContent),
    Carousel(CarouselContent),
    Faq(FaqContent),
    Unknown { kind: String, data: Value },
}

impl SectionContent {
    /// Variant of this content, `None` for unrecognized kinds.
    pub fn kind(&self) -> Option<SectionKind> {
        match self {
            SectionContent::Hero(_) => Some(SectionKind::Hero),
            SectionContent::Text(_) => Some(SectionKind::Text),
            SectionContent::Price(_) => Some(SectionKind::Price),
            SectionContent::Carousel(_) => Some(SectionKind::Carousel),
            SectionContent::Faq(_) => Some(SectionKind::Faq),
            SectionContent::Unknown { .. } => None,
        }
    }

    /// Wire tag, including unrecognized ones.
    pub fn kind_str(&self) -> &str {
        match self {
            SectionContent::Unknown { kind, .. } => kind,
            known => known.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Content a freshly added section starts with.
    pub fn starter(kind: SectionKind) -> SectionContent {
        match kind {
            SectionKind::Hero => SectionContent::Hero(HeroContent {
                title: "Título Principal".to_string(),
                subtitle: "Subtítulo".to_string(),
                background_image: None,
            }),
            SectionKind::Text => SectionContent::Text(TextContent {
                title: "Seção de Texto".to_string(),
                body: "Conteúdo da seção...".to_string(),
            }),
            SectionKind::Price => SectionContent::Price(PriceContent {
                title: "Preço e Compra".to_string(),
                price: "R$ 97,00".to_string(),
                buttons: vec![PriceButton {
                    text: "Comprar Agora".to_string(),
                    link: "#".to_string(),
                }],
                ..PriceContent::default()
            }),
            SectionKind::Carousel => SectionContent::Carousel(CarouselContent {
                title: "Galeria de Imagens".to_string(),
                images: Vec::new(),
            }),
            SectionKind::Faq => SectionContent::Faq(FaqContent {
                title: "Perguntas Frequentes".to_string(),
                items: vec![FaqItem {
                    question: "Pergunta exemplo?".to_string(),
                    answer: "Resposta exemplo.".to_string(),
                }],
            }),
        }
    }

    /// All-neutral record for a variant.
    pub fn empty(kind: SectionKind) -> SectionContent {
        match kind {
            SectionKind::Hero => SectionContent::Hero(HeroContent::default()),
            SectionKind::Text => SectionContent::Text(TextContent::default()),
            SectionKind::Price => SectionContent::Price(PriceContent::default()),
            SectionKind::Carousel => SectionContent::Carousel(CarouselContent::default()),
            SectionKind::Faq => SectionContent::Faq(FaqContent::default()),
        }
    }

    /// Decode a stored content blob. Never fails: each field falls back
    /// independently, and unrecognized variants are carried as-is.
    pub fn decode(kind: &str, data: Value) -> SectionContent {
        match SectionKind::parse(kind) {
            Some(SectionKind::Hero) => SectionContent::Hero(HeroContent {
                title: text_field(&data, "title"),
                subtitle: text_field(&data, "subtitle"),
                background_image: optional_text(&data, "backgroundImage"),
            }),
            Some(SectionKind::Text) => SectionContent::Text(TextContent {
                title: text_field(&data, "title"),
                body: text_field(&data, "content"),
            }),
            Some(SectionKind::Price) => SectionContent::Price(PriceContent {
                title: text_field(&data, "title"),
                body: text_field(&data, "content"),
                price: text_field(&data, "price"),
                note: text_field(&data, "note"),
                buttons: list_field(&data, "buttons", |entry| PriceButton {
                    text: text_field(entry, "text"),
                    link: text_field(entry, "link"),
                }),
            }),
            Some(SectionKind::Carousel) => SectionContent::Carousel(CarouselContent {
                title: text_field(&data, "title"),
                images: list_field(&data, "images", |entry| CarouselImage {
                    url: text_field(entry, "url"),
                    title: text_field(entry, "title"),
                    subtitle: text_field(entry, "subtitle"),
                }),
            }),
            Some(SectionKind::Faq) => SectionContent::Faq(FaqContent {
                title: text_field(&data, "title"),
                items: list_field(&data, "items", |entry| FaqItem {
                    question: text_field(entry, "question"),
                    answer: text_field(entry, "answer"),
                }),
            }),
            None => SectionContent::Unknown {
                kind: kind.to_string(),
                data,
            },
        }
    }

    /// Content blob for storage. Unknown variants hand back the blob they
    /// were loaded with.
    pub fn encode(&self) -> Value {
        match self {
            SectionContent::Hero(c) => to_blob(c),
            SectionContent::Text(c) => to_blob(c),
            SectionContent::Price(c) => to_blob(c),
            SectionContent::Carousel(c) => to_blob(c),
            SectionContent::Faq(c) => to_blob(c),
            SectionContent::Unknown { data, .. } => data.clone(),
        }
    }
}

impl Serialize for SectionContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SectionContent", 2)?;
        state.serialize_field("kind", self.kind_str())?;
        state.serialize_field("data", &self.encode())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for SectionContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            kind: String,
            #[serde(default)]
            data: Value,
        }
        let wire = Wire::deserialize(deserializer)?;
        Ok(SectionContent::decode(&wire.kind, wire.data))
    }
}

/// String field with empty-string fallback.
fn text_field(data: &Value, key: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional string field. Empty string and `null` both mean absent.
fn optional_text(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// List field with empty-list fallback.
fn list_field<T>(data: &Value, key: &str, decode_entry: impl Fn(&Value) -> T) -> Vec<T> {
    data.get(key)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(decode_entry).collect())
        .unwrap_or_default()
}

// Record structs serialize infallibly (string and list fields only).
fn to_blob<T: Serialize>(record: &T) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

/// One building block of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub content: SectionContent,
    /// Display position. Lower renders first; ties keep list order.
    pub order: i32,
}

impl Section {
    pub fn kind_str(&self) -> &str {
        self.content.kind_str()
    }
}

/// Sections in display order: ascending `order`, ties in list order.
pub fn sort_for_display(sections: &[Section]) -> Vec<&Section> {
    let mut sorted: Vec<&Section> = sections.iter().collect();
    sorted.sort_by_key(|section| section.order);
    sorted
}

/// Owning variant of [`sort_for_display`].
pub fn into_display_order(mut sections: Vec<Section>) -> Vec<Section> {
    sections.sort_by_key(|section| section.order);
    sections
}
