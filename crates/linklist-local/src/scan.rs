//! Lexical anchor-scan extractor.
//!
//! This is a best-effort scanner, not a conforming HTML parser: it finds
//! anchor open tags in sanitized markup, isolates each tag's `href` value
//! across quoting conventions, decodes character escapes, and resolves the
//! result against the page context. For a full-parser alternative see
//! [`crate::dom`].

use linklist_core::{AnchorPolicy, Error, LinkExtractor, PageContext, Result};
use regex::Regex;

use crate::resolve;
use crate::sanitize::sanitize;

pub struct ScanExtractor {
    policy: AnchorPolicy,
    anchor_re: Regex,
    hex_ref_re: Regex,
}

impl ScanExtractor {
    pub fn new(policy: AnchorPolicy) -> Self {
        Self {
            policy,
            // Anchor open tag: `<`, optional whitespace, `a`, whitespace,
            // then a non-greedy run up to `>`. Declarations may wrap lines.
            anchor_re: Regex::new(r"(?is)<\s*a\s.*?>").unwrap(),
            hex_ref_re: Regex::new(r"&#[xX]([0-9A-Fa-f]+);").unwrap(),
        }
    }

    /// Decode hex numeric character references (`&#x65;`) to literal
    /// characters. Unrepresentable code points are left untouched.
    fn decode_hex_refs(&self, s: &str) -> String {
        self.hex_ref_re
            .replace_all(s, |caps: &regex::Captures| {
                u32::from_str_radix(&caps[1], 16)
                    .ok()
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

/// Isolate the raw href value from one anchor tag's text.
///
/// Handles both `href='VALUE'` / `href="VALUE"` (marker and value split
/// into separate tokens) and unquoted `href=VALUE` (marker and value share
/// one token). Some pages entity-encode the delimiting quotes themselves,
/// so `&quot;` / `&apos;` / `&amp;` are decoded before tokenizing.
fn isolate_href(tag: &str) -> Result<String> {
    let decoded = tag
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");
    let tokens: Vec<&str> = decoded
        .split(|c: char| c == '\'' || c == '"' || c == '>' || c.is_whitespace())
        .collect();

    let marker = tokens
        .iter()
        .position(|t| t.starts_with("href=") || t.ends_with("href="))
        .ok_or_else(|| Error::MalformedAnchor(tag.to_string()))?;

    let token = tokens[marker];
    if let Some(inline) = token.strip_prefix("href=") {
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }
    }
    match tokens.get(marker + 1) {
        Some(next) => Ok(next.to_string()),
        None => Err(Error::MalformedAnchor(tag.to_string())),
    }
}

impl LinkExtractor for ScanExtractor {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn extract_links(&self, html: &str, ctx: &PageContext) -> Result<Vec<String>> {
        let clean = sanitize(html);
        let mut out = Vec::new();
        for m in self.anchor_re.find_iter(&clean) {
            let tag = m.as_str();
            if !tag.contains("href=") {
                continue;
            }
            // Declared-but-empty hrefs carry no link; filtered, not an error.
            if tag.contains("href=\"\"") || tag.contains("href=''") {
                continue;
            }
            let raw = match isolate_href(tag) {
                Ok(v) => v,
                Err(e) => match self.policy {
                    AnchorPolicy::Strict => return Err(e),
                    AnchorPolicy::Permissive => {
                        tracing::warn!(tag, "skipping malformed anchor");
                        continue;
                    }
                },
            };
            if raw.is_empty() {
                continue;
            }
            let decoded = self.decode_hex_refs(&raw);
            out.push(resolve::resolve(&decoded, ctx)?);
        }
        Ok(out)
    }
}
