//! Paragraph text extraction from fetched HTML.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("static selector"));

/// Concatenate the text of every `<p>` element in `html`.
///
/// Whitespace inside each paragraph is collapsed to single spaces, empty
/// paragraphs are dropped, and the rest are joined with one space.
pub fn paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| normalize_whitespace(p.text()))
        .filter(|text| !text.is_empty())
        .collect();
    paragraphs.join(" ")
}

fn normalize_whitespace<'a>(fragments: impl Iterator<Item = &'a str>) -> String {
    fragments
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
