//! Substitute copy shown wherever a content field is empty.
//!
//! The renderer keys every fallback off emptiness, so an empty string and a
//! missing field display identically. Editors always show the raw value.

pub const HERO_TITLE: &str = "Título Principal";
pub const HERO_SUBTITLE: &str = "Subtítulo descritivo";

pub const TEXT_BODY: &str = "Conteúdo da seção...";

pub const PRICE: &str = "R$ 97,00";
pub const BUTTON_TEXT: &str = "Comprar Agora";

pub const IMAGE_ALT: &str = "Imagem";
pub const CAROUSEL_EMPTY: &str = "Nenhuma imagem adicionada ainda";
/// Swapped in by the browser when a slide image fails to load.
pub const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

pub const FAQ_QUESTION: &str = "Pergunta sem título";
pub const FAQ_ANSWER: &str = "Resposta não definida";
pub const FAQ_EMPTY: &str = "Nenhuma pergunta adicionada ainda";

pub const PAGE_TITLE: &str = "Título da Página";
pub const PAGE_EMPTY_HINT: &str = "Adicione seções para construir sua página de vendas";

pub const PREVIEW_BANNER: &str = "Modo Preview - Esta é uma visualização da sua página de vendas";
pub const FOOTER: &str = "© 2024 E-book Sales. Todos os direitos reservados.";

/// The value itself when non-empty, the fallback otherwise.
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_yields_fallback() {
        assert_eq!(or_fallback("", PRICE), "R$ 97,00");
        assert_eq!(or_fallback("R$ 49,90", PRICE), "R$ 49,90");
    }
}
