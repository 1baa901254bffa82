//! # Editor Forms
//!
//! The per-section editing panel and its event grammar.
//!
//! [`render_editor`] builds a form tree for one section; controls carry
//! `name` / `data-action` tokens, and [`parse_form_event`] turns a token
//! plus the control's value back into a [`FormEvent`]. Render and parse
//! agree on the grammar, so a form round-trips without a schema anywhere
//! else.
//!
//! Control grammar:
//!
//! ```text
//! title | subtitle | body | price | note     plain fields
//! <list>.add                                 append a blank entry
//! <list>.<index>.<field>                     edit one entry field
//! <list>.<index>.remove                      drop one entry
//! background.upload | background.clear       hero background image
//! remove-section                             drop the whole section
//! ```

use vitrine_model::{
    CarouselContent, FaqContent, HeroContent, PriceContent, Section, SectionContent, TextContent,
};
use vitrine_renderer::VNode;

use crate::edits::{ContentEdit, EditError};

/// One event coming back from an editor form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Field edit to run through [`ContentEdit::apply`]
    Edit(ContentEdit),

    /// Remove the whole section
    RemoveSection,

    /// Pick a file and upload it as the hero background
    UploadBackground,
}

/// Decode a form control token and its value into an event.
pub fn parse_form_event(control: &str, value: &str) -> Result<FormEvent, EditError> {
    let event = match control {
        "remove-section" => FormEvent::RemoveSection,
        "background.upload" => FormEvent::UploadBackground,
        "background.clear" => FormEvent::Edit(ContentEdit::ClearBackgroundImage),
        "title" => FormEvent::Edit(ContentEdit::SetTitle(value.to_string())),
        "subtitle" => FormEvent::Edit(ContentEdit::SetSubtitle(value.to_string())),
        "body" => FormEvent::Edit(ContentEdit::SetBody(value.to_string())),
        "price" => FormEvent::Edit(ContentEdit::SetPrice(value.to_string())),
        "note" => FormEvent::Edit(ContentEdit::SetNote(value.to_string())),
        "buttons.add" => FormEvent::Edit(ContentEdit::PushButton),
        "images.add" => FormEvent::Edit(ContentEdit::PushImage),
        "items.add" => FormEvent::Edit(ContentEdit::PushItem),
        entry => parse_entry_control(entry, value)?,
    };
    Ok(event)
}

fn parse_entry_control(control: &str, value: &str) -> Result<FormEvent, EditError> {
    let unknown = || EditError::UnknownControl(control.to_string());

    let mut parts = control.splitn(3, '.');
    let list = parts.next().ok_or_else(unknown)?;
    let index: usize = parts
        .next()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(unknown)?;
    let field = parts.next().ok_or_else(unknown)?;

    let edit = match (list, field) {
        ("buttons", "text") => ContentEdit::SetButtonText {
            index,
            text: value.to_string(),
        },
        ("buttons", "link") => ContentEdit::SetButtonLink {
            index,
            link: value.to_string(),
        },
        ("buttons", "remove") => ContentEdit::RemoveButton { index },

        ("images", "url") => ContentEdit::SetImageUrl {
            index,
            url: value.to_string(),
        },
        ("images", "title") => ContentEdit::SetImageTitle {
            index,
            title: value.to_string(),
        },
        ("images", "subtitle") => ContentEdit::SetImageSubtitle {
            index,
            subtitle: value.to_string(),
        },
        ("images", "remove") => ContentEdit::RemoveImage { index },

        ("items", "question") => ContentEdit::SetQuestion {
            index,
            question: value.to_string(),
        },
        ("items", "answer") => ContentEdit::SetAnswer {
            index,
            answer: value.to_string(),
        },
        ("items", "remove") => ContentEdit::RemoveItem { index },

        _ => return Err(unknown()),
    };
    Ok(FormEvent::Edit(edit))
}

/// Editing panel for one section: header with the variant label and a
/// remove control, then the variant's fields showing raw values.
pub fn render_editor(section: &Section) -> VNode {
    let body = match &section.content {
        SectionContent::Hero(content) => hero_form(content),
        SectionContent::Text(content) => text_form(content),
        SectionContent::Price(content) => price_form(content),
        SectionContent::Carousel(content) => carousel_form(content),
        SectionContent::Faq(content) => faq_form(content),
        SectionContent::Unknown { .. } => VNode::element("p")
            .with_attr("class", "vitrine-editor-unsupported")
            .with_child(VNode::text("Tipo de seção não suportado")),
    };

    VNode::element("div")
        .with_attr("class", "vitrine-editor-card")
        .with_attr("data-section-id", section.id.to_string())
        .with_child(
            VNode::element("header")
                .with_child(
                    VNode::element("h4").with_child(VNode::text(header_title(section.kind_str()))),
                )
                .with_child(action_button("remove-section", "Remover")),
        )
        .with_child(body)
}

fn header_title(kind: &str) -> &'static str {
    match kind {
        "hero" => "Seção Hero",
        "text" => "Seção de Texto",
        "price" => "Seção de Preço",
        "carousel" => "Carrossel de Imagens",
        "faq" => "Perguntas Frequentes",
        _ => "Seção",
    }
}

fn hero_form(content: &HeroContent) -> VNode {
    let background = match &content.background_image {
        Some(url) => VNode::element("div")
            .with_attr("class", "vitrine-editor-background")
            .with_child(
                VNode::element("img")
                    .with_attr("src", url)
                    .with_attr("alt", "Background"),
            )
            .with_child(action_button("background.clear", "Remover imagem")),
        None => VNode::element("div")
            .with_attr("class", "vitrine-editor-background")
            .with_child(VNode::element("p").with_child(VNode::text(
                "Clique para adicionar uma imagem de background",
            )))
            .with_child(
                VNode::element("input")
                    .with_attr("type", "file")
                    .with_attr("accept", "image/*")
                    .with_attr("name", "background.upload"),
            )
            .with_child(action_button("background.upload", "Escolher Imagem")),
    };

    VNode::element("div")
        .with_attr("class", "vitrine-editor-form")
        .with_child(labeled_input(
            "Título Principal",
            "title",
            "Título do seu e-book",
            &content.title,
        ))
        .with_child(labeled_textarea(
            "Subtítulo",
            "subtitle",
            "Descrição complementar",
            &content.subtitle,
        ))
        .with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-editor-field")
                .with_child(VNode::element("label").with_child(VNode::text("Imagem de Background")))
                .with_child(background),
        )
}

fn text_form(content: &TextContent) -> VNode {
    VNode::element("div")
        .with_attr("class", "vitrine-editor-form")
        .with_child(labeled_input(
            "Título da Seção",
            "title",
            "Título da seção",
            &content.title,
        ))
        .with_child(labeled_textarea(
            "Conteúdo",
            "body",
            "Escreva o conteúdo da seção...",
            &content.body,
        ))
}

fn price_form(content: &PriceContent) -> VNode {
    let mut buttons = VNode::element("div")
        .with_attr("class", "vitrine-editor-list")
        .with_child(VNode::element("label").with_child(VNode::text("Botões de Compra")));
    for (index, button) in content.buttons.iter().enumerate() {
        buttons = buttons.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-editor-entry")
                .with_child(entry_input(
                    &format!("buttons.{}.text", index),
                    "COMPRAR AGORA",
                    &button.text,
                ))
                .with_child(entry_input(
                    &format!("buttons.{}.link", index),
                    "Link do botão",
                    &button.link,
                ))
                .with_child(action_button(&format!("buttons.{}.remove", index), "Remover")),
        );
    }
    buttons = buttons.with_child(action_button("buttons.add", "Adicionar Botão"));

    VNode::element("div")
        .with_attr("class", "vitrine-editor-form")
        .with_child(labeled_input(
            "Título da Seção",
            "title",
            "Oferta Especial!",
            &content.title,
        ))
        .with_child(labeled_textarea(
            "Conteúdo da Seção",
            "body",
            "Descreva os benefícios e o valor da oferta...",
            &content.body,
        ))
        .with_child(labeled_input("Preço", "price", "R$ 97,00", &content.price))
        .with_child(labeled_textarea(
            "Observação",
            "note",
            "Oferta válida por tempo limitado...",
            &content.note,
        ))
        .with_child(buttons)
}

fn carousel_form(content: &CarouselContent) -> VNode {
    let mut images = VNode::element("div")
        .with_attr("class", "vitrine-editor-list")
        .with_child(VNode::element("label").with_child(VNode::text("Imagens")));
    for (index, image) in content.images.iter().enumerate() {
        images = images.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-editor-entry")
                .with_child(entry_input(
                    &format!("images.{}.url", index),
                    "https://exemplo.com/imagem.jpg",
                    &image.url,
                ))
                .with_child(entry_input(
                    &format!("images.{}.title", index),
                    "Título da imagem",
                    &image.title,
                ))
                .with_child(entry_input(
                    &format!("images.{}.subtitle", index),
                    "Subtítulo da imagem",
                    &image.subtitle,
                ))
                .with_child(action_button(&format!("images.{}.remove", index), "Remover")),
        );
    }
    images = images.with_child(action_button("images.add", "Adicionar Imagem"));

    VNode::element("div")
        .with_attr("class", "vitrine-editor-form")
        .with_child(labeled_input(
            "Título da Seção",
            "title",
            "Galeria de Imagens",
            &content.title,
        ))
        .with_child(images)
}

fn faq_form(content: &FaqContent) -> VNode {
    let mut items = VNode::element("div")
        .with_attr("class", "vitrine-editor-list")
        .with_child(VNode::element("label").with_child(VNode::text("Perguntas e Respostas")));
    for (index, item) in content.items.iter().enumerate() {
        items = items.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-editor-entry")
                .with_child(entry_input(
                    &format!("items.{}.question", index),
                    "Qual é sua pergunta?",
                    &item.question,
                ))
                .with_child(entry_textarea(
                    &format!("items.{}.answer", index),
                    "Resposta para a pergunta...",
                    &item.answer,
                ))
                .with_child(action_button(&format!("items.{}.remove", index), "Remover")),
        );
    }
    items = items.with_child(action_button("items.add", "Adicionar Pergunta"));

    VNode::element("div")
        .with_attr("class", "vitrine-editor-form")
        .with_child(labeled_input(
            "Título da Seção",
            "title",
            "Perguntas Frequentes",
            &content.title,
        ))
        .with_child(items)
}

fn labeled_input(label: &str, control: &str, placeholder: &str, value: &str) -> VNode {
    VNode::element("div")
        .with_attr("class", "vitrine-editor-field")
        .with_child(VNode::element("label").with_child(VNode::text(label)))
        .with_child(entry_input(control, placeholder, value))
}

fn labeled_textarea(label: &str, control: &str, placeholder: &str, value: &str) -> VNode {
    VNode::element("div")
        .with_attr("class", "vitrine-editor-field")
        .with_child(VNode::element("label").with_child(VNode::text(label)))
        .with_child(entry_textarea(control, placeholder, value))
}

fn entry_input(control: &str, placeholder: &str, value: &str) -> VNode {
    VNode::element("input")
        .with_attr("type", "text")
        .with_attr("name", control)
        .with_attr("placeholder", placeholder)
        .with_attr("value", value)
}

// Textareas carry their value as child text, not a value attribute.
fn entry_textarea(control: &str, placeholder: &str, value: &str) -> VNode {
    VNode::element("textarea")
        .with_attr("name", control)
        .with_attr("placeholder", placeholder)
        .with_child(VNode::text(value))
}

fn action_button(action: &str, label: &str) -> VNode {
    VNode::element("button")
        .with_attr("type", "button")
        .with_attr("data-action", action)
        .with_child(VNode::text(label))
}
