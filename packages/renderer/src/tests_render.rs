//! Rendering tests for all section variants and the page shell.
//! Covers fallback substitution, preview gating, ordering, and determinism.

use crate::html::{render_html, HtmlOptions};
use crate::render::{render_page, render_section, RenderOptions};
use serde_json::json;
use vitrine_model::{
    CarouselContent, CarouselImage, FaqContent, FaqItem, PageMeta, PriceButton, PriceContent,
    Section, SectionContent, SectionId, SectionKind, TextContent, ThemeColor,
};

fn section(content: SectionContent, order: i32) -> Section {
    Section {
        id: SectionId::Persisted(format!("s-{}", order)),
        content,
        order,
    }
}

fn preview() -> RenderOptions {
    RenderOptions::preview(ThemeColor::default())
}

fn public() -> RenderOptions {
    RenderOptions::public(ThemeColor::default())
}

fn meta_titled(title: &str) -> PageMeta {
    PageMeta {
        title: title.to_string(),
        ..PageMeta::draft()
    }
}

mod section_tests {
    use super::*;

    #[test]
    fn empty_price_section_shows_fallback_price_and_no_buttons() {
        let content = SectionContent::decode("price", json!({}));
        let node = render_section(&section(content, 0), &public()).expect("price renders");

        let amount = &node.find_all("div")[1];
        assert_eq!(amount.attr("class"), Some("vitrine-price-amount"));
        assert_eq!(amount.text_content(), "R$ 97,00");
        assert!(node.find_all("a").is_empty());
    }

    #[test]
    fn price_buttons_are_inert_in_preview() {
        let content = SectionContent::Price(PriceContent {
            buttons: vec![PriceButton {
                text: "Garantir minha vaga".to_string(),
                link: "https://pay.example.com/x".to_string(),
            }],
            ..PriceContent::default()
        });
        let sec = section(content, 0);

        let previewed = render_section(&sec, &preview()).unwrap();
        let anchor = previewed.find_all("a")[0];
        assert_eq!(anchor.attr("href"), Some("#"));
        assert_eq!(anchor.attr("data-disabled"), Some("true"));
        assert_eq!(anchor.attr("target"), None);

        let published = render_section(&sec, &public()).unwrap();
        let anchor = published.find_all("a")[0];
        assert_eq!(anchor.attr("href"), Some("https://pay.example.com/x"));
        assert_eq!(anchor.attr("target"), Some("_blank"));
        assert_eq!(anchor.attr("rel"), Some("noopener"));
        assert_eq!(anchor.text_content(), "Garantir minha vaga");
    }

    #[test]
    fn blank_button_text_falls_back() {
        let content = SectionContent::Price(PriceContent {
            buttons: vec![PriceButton::default()],
            ..PriceContent::default()
        });
        let node = render_section(&section(content, 0), &public()).unwrap();
        assert_eq!(node.find_all("a")[0].text_content(), "Comprar Agora");
    }

    #[test]
    fn price_body_renders_only_when_present() {
        let without = render_section(
            &section(SectionContent::Price(PriceContent::default()), 0),
            &public(),
        )
        .unwrap();
        assert!(without
            .find_all("p")
            .iter()
            .all(|p| p.attr("class") != Some("vitrine-price-body")));

        let with_body = render_section(
            &section(
                SectionContent::Price(PriceContent {
                    body: "Acesso vitalício".to_string(),
                    ..PriceContent::default()
                }),
                0,
            ),
            &public(),
        )
        .unwrap();
        let body = with_body.find_all("p")[0];
        assert_eq!(body.attr("class"), Some("vitrine-price-body"));
        assert_eq!(body.text_content(), "Acesso vitalício");
    }

    #[test]
    fn hero_falls_back_title_and_subtitle() {
        let node = render_section(
            &section(SectionContent::decode("hero", json!({})), 0),
            &public(),
        )
        .unwrap();
        assert_eq!(node.find_all("h1")[0].text_content(), "Título Principal");
        assert_eq!(node.find_all("p")[0].text_content(), "Subtítulo descritivo");
    }

    #[test]
    fn hero_wash_uses_theme_color() {
        let options = RenderOptions::public(ThemeColor::new("#22c55e"));
        let node = render_section(
            &section(SectionContent::empty(SectionKind::Hero), 0),
            &options,
        )
        .unwrap();
        let background = node.style("background").unwrap();
        assert!(background.contains("#22c55e1a"));
        assert!(background.contains("#22c55e0d"));
    }

    #[test]
    fn text_section_hides_empty_title_and_falls_back_body() {
        let node = render_section(
            &section(SectionContent::Text(TextContent::default()), 0),
            &public(),
        )
        .unwrap();
        assert!(node.find_all("h2").is_empty());
        let body = node.find_all("p")[0];
        assert_eq!(body.text_content(), "Conteúdo da seção...");
        assert_eq!(body.style("white-space"), Some("pre-wrap"));
    }

    #[test]
    fn text_section_title_renders_when_present() {
        let node = render_section(
            &section(
                SectionContent::Text(TextContent {
                    title: "Sobre o autor".to_string(),
                    body: "Linha 1\nLinha 2".to_string(),
                }),
                0,
            ),
            &public(),
        )
        .unwrap();
        assert_eq!(node.find_all("h2")[0].text_content(), "Sobre o autor");
        assert_eq!(node.find_all("p")[0].text_content(), "Linha 1\nLinha 2");
    }

    #[test]
    fn empty_carousel_shows_placeholder_message() {
        let node = render_section(
            &section(SectionContent::Carousel(CarouselContent::default()), 0),
            &public(),
        )
        .unwrap();
        assert_eq!(node.text_content(), "Nenhuma imagem adicionada ainda");
        assert!(node.find_all("img").is_empty());
    }

    #[test]
    fn absent_list_renders_exactly_like_an_empty_one() {
        for kind in ["carousel", "faq"] {
            let absent = SectionContent::decode(kind, json!({ "title": "Galeria" }));
            let empty = SectionContent::decode(
                kind,
                json!({ "title": "Galeria", "images": [], "items": [] }),
            );

            let from_absent = render_section(&section(absent, 0), &public());
            let from_empty = render_section(&section(empty, 0), &public());
            assert_eq!(from_absent, from_empty);
        }
    }

    #[test]
    fn carousel_images_fall_back_alt_and_swap_on_error() {
        let content = SectionContent::Carousel(CarouselContent {
            title: String::new(),
            images: vec![
                CarouselImage {
                    url: "https://cdn.example.com/capa.png".to_string(),
                    ..CarouselImage::default()
                },
                CarouselImage::default(),
            ],
        });
        let node = render_section(&section(content, 0), &public()).unwrap();

        // A slide without a url renders no img at all.
        let images = node.find_all("img");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].attr("alt"), Some("Imagem"));
        assert!(images[0].attr("onerror").unwrap().contains("/placeholder.svg"));

        let slides = node.find_all("figure");
        assert_eq!(slides.len(), 2);

        let controls = node.find_all("button");
        assert_eq!(controls.len(), 2);
        assert_eq!(controls[0].attr("aria-label"), Some("Imagem anterior"));
        assert_eq!(controls[1].attr("aria-label"), Some("Próxima imagem"));
    }

    #[test]
    fn faq_entries_share_one_accordion_group() {
        let content = SectionContent::Faq(FaqContent {
            title: String::new(),
            items: vec![
                FaqItem {
                    question: "Como recebo o e-book?".to_string(),
                    answer: String::new(),
                },
                FaqItem::default(),
            ],
        });
        let node = render_section(&section(content, 3), &public()).unwrap();

        let entries = node.find_all("details");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].attr("name"), entries[1].attr("name"));
        assert_eq!(
            entries[0].find_all("summary")[0].text_content(),
            "Como recebo o e-book?"
        );
        assert_eq!(entries[0].find_all("p")[0].text_content(), "Resposta não definida");
        assert_eq!(
            entries[1].find_all("summary")[0].text_content(),
            "Pergunta sem título"
        );
    }

    #[test]
    fn empty_faq_shows_placeholder_message() {
        let node = render_section(
            &section(SectionContent::Faq(FaqContent::default()), 0),
            &public(),
        )
        .unwrap();
        assert_eq!(node.text_content(), "Nenhuma pergunta adicionada ainda");
        assert!(node.find_all("details").is_empty());
    }

    #[test]
    fn unknown_section_renders_nothing() {
        let content = SectionContent::decode("video", json!({ "videoUrl": "x" }));
        assert_eq!(render_section(&section(content, 0), &public()), None);
    }
}

mod page_tests {
    use super::*;

    #[test]
    fn sections_render_in_order_with_stable_ties() {
        let sections = vec![
            text_titled("terceira", 2),
            text_titled("primeira", 0),
            text_titled("quarta", 2),
            text_titled("segunda", 1),
        ];
        let page = render_page(&meta_titled("Página"), &sections, &public());

        let titles: Vec<String> = page
            .find_all("h2")
            .iter()
            .map(|h| h.text_content())
            .collect();
        assert_eq!(titles, vec!["primeira", "segunda", "terceira", "quarta"]);
    }

    #[test]
    fn preview_banner_appears_only_in_preview() {
        let sections = vec![text_titled("uma", 0)];

        let previewed = render_page(&meta_titled("Página"), &sections, &preview());
        let banner = previewed.children()[0].clone();
        assert_eq!(banner.attr("class"), Some("vitrine-preview-banner"));
        assert_eq!(
            banner.text_content(),
            "Modo Preview - Esta é uma visualização da sua página de vendas"
        );

        let published = render_page(&meta_titled("Página"), &sections, &public());
        assert_eq!(published.children()[0].tag(), Some("main"));
    }

    #[test]
    fn empty_page_shows_title_fallback_and_hint() {
        let page = render_page(&meta_titled(""), &[], &public());
        assert_eq!(page.find_all("h1")[0].text_content(), "Título da Página");
        assert!(page
            .text_content()
            .contains("Adicione seções para construir sua página de vendas"));

        let titled = render_page(&meta_titled("Guia de Corrida"), &[], &public());
        assert_eq!(titled.find_all("h1")[0].text_content(), "Guia de Corrida");
    }

    #[test]
    fn page_of_only_unknown_sections_is_not_treated_as_empty() {
        let sections = vec![section(
            SectionContent::decode("video", json!({})),
            0,
        )];
        let page = render_page(&meta_titled("Página"), &sections, &public());

        let main = page.find_all("main")[0];
        assert!(main.children().is_empty());
        assert!(!page.text_content().contains("Adicione seções"));
    }

    #[test]
    fn footer_always_present() {
        let page = render_page(&meta_titled(""), &[], &public());
        let footer = page.find_all("footer")[0];
        assert_eq!(
            footer.text_content(),
            "© 2024 E-book Sales. Todos os direitos reservados."
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let sections = vec![
            section(SectionContent::starter(SectionKind::Hero), 0),
            section(SectionContent::starter(SectionKind::Price), 1),
            section(SectionContent::starter(SectionKind::Faq), 2),
        ];
        let meta = meta_titled("Página");

        let first = render_page(&meta, &sections, &preview());
        let second = render_page(&meta, &sections, &preview());
        assert_eq!(first, second);
        assert_eq!(
            render_html(&first, HtmlOptions::default()),
            render_html(&second, HtmlOptions::default())
        );
    }

    #[test]
    fn page_html_escapes_user_content() {
        let sections = vec![text_titled("<script>alert(1)</script>", 0)];
        let page = render_page(&meta_titled("Página"), &sections, &public());
        let html = render_html(&page, HtmlOptions::compact());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    fn text_titled(title: &str, order: i32) -> Section {
        section(
            SectionContent::Text(TextContent {
                title: title.to_string(),
                body: String::new(),
            }),
            order,
        )
    }
}
