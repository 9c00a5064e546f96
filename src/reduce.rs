//! Boils a fetched HTML document down to the visible text a language model
//! can work with.

use scraper::{ElementRef, Html, Node};

/// Hard ceiling on reduced-page length, in characters. Keeps prompts inside
/// model context windows; recipe content sits near the top of a page, so the
/// tail is the safe part to lose.
pub const MAX_REDUCED_LEN: usize = 50_000;

/// Tags whose entire subtree is boilerplate for our purposes.
const EXCLUDED_TAGS: [&str; 6] = ["script", "style", "svg", "nav", "footer", "header"];

/// Reduces an HTML document to newline-separated visible text.
///
/// Subtrees under [`EXCLUDED_TAGS`] are dropped wholesale, every remaining
/// text node becomes one trimmed line, and the result is cut at
/// [`MAX_REDUCED_LEN`] characters. Malformed markup is parsed leniently, so
/// this never fails; the worst case is an empty string.
pub fn reduce(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();
    collect_text(&document.root_element(), &mut lines);
    truncate_chars(lines.join("\n"), MAX_REDUCED_LEN)
}

fn collect_text(element: &ElementRef, lines: &mut Vec<String>) {
    let tag_name = element.value().name().to_lowercase();
    if EXCLUDED_TAGS.contains(&tag_name.as_str()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    lines.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, lines);
                }
            }
            _ => {}
        }
    }
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(idx);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_visible_text_as_lines() {
        let html = "<html><body><h1>Apple Pie</h1><p>Peel the apples.</p></body></html>";
        assert_eq!(reduce(html), "Apple Pie\nPeel the apples.");
    }

    #[test]
    fn drops_boilerplate_subtrees() {
        let html = r#"<html><body>
            <nav><a href="/">Home</a><a href="/recipes">Recipes</a></nav>
            <header><h2>Site name</h2></header>
            <script>var tracking = true;</script>
            <style>.ad { color: red; }</style>
            <svg><title>logo</title></svg>
            <main><p>Whisk the eggs.</p></main>
            <footer>Copyright 2024</footer>
        </body></html>"#;

        let reduced = reduce(html);
        assert_eq!(reduced, "Whisk the eggs.");
        assert!(!reduced.contains("tracking"));
        assert!(!reduced.contains("Copyright"));
    }

    #[test]
    fn survives_malformed_markup() {
        let html = "<div><p>Broken <b>markup<p>second</div> trailing";
        let reduced = reduce(html);
        assert!(reduced.contains("Broken"));
        assert!(reduced.contains("second"));
    }

    #[test]
    fn truncates_at_character_limit() {
        let html = format!("<p>{}</p>", "x".repeat(MAX_REDUCED_LEN + 5_000));
        let reduced = reduce(&html);
        assert_eq!(reduced.chars().count(), MAX_REDUCED_LEN);
    }

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let html = format!("<p>{}</p>", "é".repeat(MAX_REDUCED_LEN + 100));
        let reduced = reduce(&html);
        assert_eq!(reduced.chars().count(), MAX_REDUCED_LEN);
        assert!(reduced.chars().all(|c| c == 'é'));
    }

    #[test]
    fn empty_page_reduces_to_empty_string() {
        assert_eq!(reduce(""), "");
        assert_eq!(reduce("<html><body></body></html>"), "");
    }
}
