//! Section and page rendering.

use tracing::{debug, instrument};

use crate::vdom::VNode;
use vitrine_model::fallback::{self, or_fallback};
use vitrine_model::{
    sort_for_display, CarouselContent, FaqContent, HeroContent, PageMeta, PriceContent, Section,
    SectionContent, SectionId, TextContent, ThemeColor,
};

/// How a page should be rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Preview mode shows the banner and keeps purchase links inert.
    pub is_preview: bool,
    /// Accent color for headings, prices and buttons.
    pub theme: ThemeColor,
}

impl RenderOptions {
    pub fn preview(theme: ThemeColor) -> Self {
        RenderOptions {
            is_preview: true,
            theme,
        }
    }

    pub fn public(theme: ThemeColor) -> Self {
        RenderOptions {
            is_preview: false,
            theme,
        }
    }
}

/// Render one section. Unknown kinds render as nothing.
pub fn render_section(section: &Section, options: &RenderOptions) -> Option<VNode> {
    match &section.content {
        SectionContent::Hero(content) => Some(render_hero(content, options)),
        SectionContent::Text(content) => Some(render_text(content, options)),
        SectionContent::Price(content) => Some(render_price(content, options)),
        SectionContent::Carousel(content) => Some(render_carousel(content, options)),
        SectionContent::Faq(content) => Some(render_faq(content, &section.id, options)),
        SectionContent::Unknown { kind, .. } => {
            debug!(kind = kind.as_str(), "skipping section of unknown kind");
            None
        }
    }
}

/// Render a whole page: optional preview banner, sections in display
/// order, a placeholder when the page has no sections yet, footer.
#[instrument(skip_all, fields(sections = sections.len(), preview = options.is_preview))]
pub fn render_page(meta: &PageMeta, sections: &[Section], options: &RenderOptions) -> VNode {
    debug!(title = meta.title.as_str(), "rendering page");

    let mut root = VNode::element("div").with_attr("class", "vitrine-page");

    if options.is_preview {
        root = root.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-preview-banner")
                .with_style("background-color", options.theme.as_str())
                .with_child(VNode::text(fallback::PREVIEW_BANNER)),
        );
    }

    let mut main = VNode::element("main");
    for section in sort_for_display(sections) {
        if let Some(node) = render_section(section, options) {
            main = main.with_child(node);
        }
    }
    if sections.is_empty() {
        main = main.with_child(
            VNode::element("section")
                .with_attr("class", "vitrine-empty-page")
                .with_child(heading(
                    "h1",
                    or_fallback(&meta.title, fallback::PAGE_TITLE),
                    options,
                ))
                .with_child(
                    VNode::element("p").with_child(VNode::text(fallback::PAGE_EMPTY_HINT)),
                ),
        );
    }

    root.with_child(main).with_child(
        VNode::element("footer")
            .with_attr("class", "vitrine-footer")
            .with_child(VNode::element("p").with_child(VNode::text(fallback::FOOTER))),
    )
}

fn heading(tag: &str, text: &str, options: &RenderOptions) -> VNode {
    VNode::element(tag)
        .with_style("color", options.theme.as_str())
        .with_child(VNode::text(text))
}

fn render_hero(content: &HeroContent, options: &RenderOptions) -> VNode {
    VNode::element("section")
        .with_attr("class", "vitrine-hero")
        .with_style("background", hero_wash(options.theme.as_str()))
        .with_child(heading(
            "h1",
            or_fallback(&content.title, fallback::HERO_TITLE),
            options,
        ))
        .with_child(
            VNode::element("p")
                .with_attr("class", "vitrine-hero-subtitle")
                .with_child(VNode::text(or_fallback(
                    &content.subtitle,
                    fallback::HERO_SUBTITLE,
                ))),
        )
}

// Hex theme colors take an alpha suffix for the wash; anything else is
// used at full strength.
fn hero_wash(theme: &str) -> String {
    if theme.starts_with('#') && theme.len() == 7 {
        format!("linear-gradient(to right, {theme}1a, {theme}0d)")
    } else {
        format!("linear-gradient(to right, {theme}, {theme})")
    }
}

fn render_text(content: &TextContent, options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_attr("class", "vitrine-text");
    if !content.title.is_empty() {
        section = section.with_child(heading("h2", &content.title, options));
    }
    section.with_child(
        VNode::element("p")
            .with_style("white-space", "pre-wrap")
            .with_child(VNode::text(or_fallback(&content.body, fallback::TEXT_BODY))),
    )
}

fn render_price(content: &PriceContent, options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_attr("class", "vitrine-price");
    if !content.title.is_empty() {
        section = section.with_child(heading("h2", &content.title, options));
    }
    if !content.body.is_empty() {
        section = section.with_child(
            VNode::element("p")
                .with_attr("class", "vitrine-price-body")
                .with_style("white-space", "pre-wrap")
                .with_child(VNode::text(&content.body)),
        );
    }

    let mut card = VNode::element("div")
        .with_attr("class", "vitrine-price-card")
        .with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-price-amount")
                .with_style("color", options.theme.as_str())
                .with_child(VNode::text(or_fallback(&content.price, fallback::PRICE))),
        );
    for button in &content.buttons {
        card = card.with_child(render_buy_button(
            &button.text,
            &button.link,
            options,
        ));
    }

    section.with_child(card)
}

fn render_buy_button(text: &str, link: &str, options: &RenderOptions) -> VNode {
    let mut anchor = VNode::element("a")
        .with_attr("class", "vitrine-cta")
        .with_style("background-color", options.theme.as_str())
        .with_child(VNode::text(or_fallback(text, fallback::BUTTON_TEXT)));
    if options.is_preview {
        anchor = anchor.with_attr("href", "#").with_attr("data-disabled", "true");
    } else {
        anchor = anchor
            .with_attr("href", link)
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener");
    }
    anchor
}

fn render_carousel(content: &CarouselContent, options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_attr("class", "vitrine-carousel");
    if !content.title.is_empty() {
        section = section.with_child(heading("h2", &content.title, options));
    }

    if content.images.is_empty() {
        return section.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-carousel-empty")
                .with_child(VNode::text(fallback::CAROUSEL_EMPTY)),
        );
    }

    let mut track = VNode::element("div").with_attr("class", "vitrine-carousel-track");
    for (index, image) in content.images.iter().enumerate() {
        let mut slide = VNode::element("figure")
            .with_attr("class", "vitrine-carousel-slide")
            .with_attr("data-index", index.to_string());
        if !image.url.is_empty() {
            slide = slide.with_child(
                VNode::element("img")
                    .with_attr("src", &image.url)
                    .with_attr("alt", or_fallback(&image.title, fallback::IMAGE_ALT))
                    .with_attr(
                        "onerror",
                        format!("this.onerror=null;this.src='{}'", fallback::IMAGE_PLACEHOLDER),
                    ),
            );
        }
        if !image.title.is_empty() {
            slide = slide.with_child(VNode::element("h3").with_child(VNode::text(&image.title)));
        }
        if !image.subtitle.is_empty() {
            slide = slide.with_child(
                VNode::element("figcaption").with_child(VNode::text(&image.subtitle)),
            );
        }
        track = track.with_child(slide);
    }

    section.with_child(
        VNode::element("div")
            .with_attr("class", "vitrine-carousel-viewport")
            .with_attr("role", "region")
            .with_attr("aria-roledescription", "carousel")
            .with_child(track)
            .with_child(carousel_control("prev", "Imagem anterior"))
            .with_child(carousel_control("next", "Próxima imagem")),
    )
}

fn carousel_control(direction: &str, label: &str) -> VNode {
    VNode::element("button")
        .with_attr("type", "button")
        .with_attr("class", format!("vitrine-carousel-{}", direction))
        .with_attr("aria-label", label)
        .with_child(VNode::text(if direction == "prev" { "‹" } else { "›" }))
}

fn render_faq(content: &FaqContent, section_id: &SectionId, options: &RenderOptions) -> VNode {
    let mut section = VNode::element("section").with_attr("class", "vitrine-faq");
    if !content.title.is_empty() {
        section = section.with_child(heading("h2", &content.title, options));
    }

    if content.items.is_empty() {
        return section.with_child(
            VNode::element("div")
                .with_attr("class", "vitrine-faq-empty")
                .with_child(VNode::text(fallback::FAQ_EMPTY)),
        );
    }

    // Sharing a name keeps at most one entry open per section.
    let group = format!("faq-{}", section_id);
    let mut list = VNode::element("div").with_attr("class", "vitrine-faq-list");
    for item in &content.items {
        list = list.with_child(
            VNode::element("details")
                .with_attr("name", group.clone())
                .with_child(VNode::element("summary").with_child(VNode::text(or_fallback(
                    &item.question,
                    fallback::FAQ_QUESTION,
                ))))
                .with_child(
                    VNode::element("p")
                        .with_style("white-space", "pre-wrap")
                        .with_child(VNode::text(or_fallback(
                            &item.answer,
                            fallback::FAQ_ANSWER,
                        ))),
                ),
        );
    }

    section.with_child(list)
}
