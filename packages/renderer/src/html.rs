//! HTML printing for virtual DOM trees.

use crate::vdom::VNode;

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    /// Single-line output, handy for byte comparisons.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            indent: String::new(),
        }
    }
}

struct Context {
    options: HtmlOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        let indent = self.options.indent.clone();
        for _ in 0..self.depth {
            self.add(&indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Print a virtual DOM tree as HTML.
pub fn render_html(node: &VNode, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

/// Print a complete standalone document around a rendered page tree.
pub fn render_document(body: &VNode, title: &str, description: &str, options: HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"pt-BR\">");
    ctx.indent();

    write_head(title, description, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    write_node(body, &mut ctx);
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn write_head(title: &str, description: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));
    ctx.add_line(&format!(
        "<meta name=\"description\" content=\"{}\">",
        escape_html(description)
    ));
    ctx.add_line(&format!(
        "<meta property=\"og:title\" content=\"{}\">",
        escape_html(title)
    ));
    ctx.add_line(&format!(
        "<meta property=\"og:description\" content=\"{}\">",
        escape_html(description)
    ));
    ctx.add_line("<meta property=\"og:type\" content=\"website\">");

    ctx.dedent();
    ctx.add_line("</head>");
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => write_element(tag, attributes, styles, children, ctx),
        VNode::Text { content } => {
            // Text flows inline; the enclosing element handles layout.
            ctx.add(&escape_html(content));
        }
    }
}

fn write_element(
    tag: &str,
    attributes: &std::collections::BTreeMap<String, String>,
    styles: &std::collections::BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) {
    // Opening tag
    if ctx.options.pretty {
        ctx.add_indent();
    }
    ctx.add(&format!("<{}", tag));

    for (name, value) in attributes {
        ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        ctx.add(" style=\"");
        for (key, value) in styles {
            ctx.add(&format!("{}: {}; ", key, value));
        }
        ctx.add("\"");
    }

    // Void tags
    if children.is_empty() && is_void(tag) {
        ctx.add(" />");
        if ctx.options.pretty {
            ctx.add("\n");
        }
        return;
    }

    ctx.add(">");

    // Children
    if !children.is_empty() {
        let block = has_element_children(children);
        if ctx.options.pretty && block {
            ctx.add("\n");
        }
        ctx.indent();

        for child in children {
            write_node(child, ctx);
        }

        ctx.dedent();
        if ctx.options.pretty && block {
            ctx.add_indent();
        }
    }

    // Closing tag
    ctx.add(&format!("</{}>", tag));
    if ctx.options.pretty {
        ctx.add("\n");
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attribute_values() {
        let node = VNode::element("p")
            .with_attr("title", "a \"b\" & c")
            .with_child(VNode::text("<script>alert(1)</script>"));
        let html = render_html(&node, HtmlOptions::compact());
        assert_eq!(
            html,
            "<p title=\"a &quot;b&quot; &amp; c\">&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn void_tags_self_close() {
        let node = VNode::element("img").with_attr("src", "/a.png");
        assert_eq!(render_html(&node, HtmlOptions::compact()), "<img src=\"/a.png\" />");
    }

    #[test]
    fn styles_print_in_sorted_order() {
        let node = VNode::element("div")
            .with_style("color", "#111")
            .with_style("background", "#222");
        assert_eq!(
            render_html(&node, HtmlOptions::compact()),
            "<div style=\"background: #222; color: #111; \"></div>"
        );
    }

    #[test]
    fn pretty_output_indents_element_children() {
        let node = VNode::element("div").with_child(VNode::element("p").with_child(VNode::text("oi")));
        let html = render_html(&node, HtmlOptions::default());
        assert_eq!(html, "<div>\n  <p>oi</p>\n</div>\n");
    }

    #[test]
    fn document_head_carries_title_and_description() {
        let body = VNode::element("div");
        let html = render_document(&body, "Guia & Dicas", "Guia & Dicas - Página de vendas", HtmlOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Guia &amp; Dicas</title>"));
        assert!(html.contains("property=\"og:type\" content=\"website\""));
    }
}
