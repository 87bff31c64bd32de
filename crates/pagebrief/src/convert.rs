//! HTML to visible-text extraction

use scraper::{Html, Node};

/// Elements whose text is never visible on the rendered page
const SKIP_ELEMENTS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "iframe", "svg",
];

/// Elements that start a new line in the extracted text
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "section", "article",
    "main", "header", "footer", "blockquote", "pre", "table", "ul", "ol", "dl", "dt", "dd",
];

/// Table cells, separated from their neighbours by a space
const CELL_ELEMENTS: &[&str] = &["td", "th"];

/// Check if content is HTML based on content type and body
pub fn is_html(content_type: Option<&str>, body: &str) -> bool {
    if let Some(ct) = content_type {
        let ct_lower = ct.to_lowercase();
        if ct_lower.contains("text/html") || ct_lower.contains("application/xhtml") {
            return true;
        }
    }

    let trimmed = body.trim_start();
    let head: String = trimmed.chars().take(14).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Extract visible text from an HTML document
///
/// Text nodes are concatenated in document order. Structure is flattened:
/// block elements only contribute a line break, markup never survives.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut output = String::new();

    for node in document.root_element().descendants() {
        match node.value() {
            Node::Element(element) => {
                if BLOCK_ELEMENTS.contains(&element.name()) {
                    output.push('\n');
                } else if CELL_ELEMENTS.contains(&element.name()) {
                    output.push(' ');
                }
            }
            Node::Text(text) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| SKIP_ELEMENTS.contains(&el.name()))
                });
                if !hidden {
                    output.push_str(text);
                }
            }
            _ => {}
        }
    }

    clean_whitespace(&output)
}

/// Clean whitespace: collapse runs, trim, keep max 2 newlines
pub fn clean_whitespace(s: &str) -> String {
    let mut result = String::new();
    let mut last_was_space = false;
    let mut newline_count = 0;

    for c in s.chars() {
        if c == '\n' {
            if last_was_space && result.ends_with(' ') {
                result.pop();
            }
            newline_count += 1;
            last_was_space = true;
            if newline_count <= 2 {
                result.push(c);
            }
        } else if c.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            newline_count = 0;
            last_was_space = false;
            result.push(c);
        }
    }

    result.trim().to_string()
}
