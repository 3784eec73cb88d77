//! DOM-based extractor: parses the document with a real HTML parser and
//! walks `a[href]` in document order. Useful as a correctness oracle for
//! the lexical scanner, and as a fallback for markup the scanner's
//! tokenizer mangles. Shares the scanner's resolution path so the two
//! backends stay cross-comparable.

use linklist_core::{LinkExtractor, PageContext, Result};

use crate::resolve;

pub struct DomExtractor;

impl DomExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DomExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for DomExtractor {
    fn name(&self) -> &'static str {
        "dom"
    }

    fn extract_links(&self, html: &str, ctx: &PageContext) -> Result<Vec<String>> {
        let doc = html_scraper::Html::parse_document(html);
        let sel = match html_scraper::Selector::parse("a[href]") {
            Ok(s) => s,
            Err(_) => return Ok(Vec::new()),
        };

        // The parser already strips script/style/comment content and
        // decodes entities in attribute values, so no sanitize pass here.
        let mut out = Vec::new();
        for el in doc.select(&sel) {
            let href = match el.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            if href.is_empty() {
                continue;
            }
            out.push(resolve::resolve(href, ctx)?);
        }
        Ok(out)
    }
}
