//! Markup sanitizer: strips script, style, and comment regions before the
//! anchor scan, so their contents cannot be mistaken for anchor markup.

use regex::Regex;

fn strip_once(html: &str) -> String {
    // Non-greedy bodies, spanning newlines; tag names are case-insensitive.
    let script_re = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_re = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    let comment_re = Regex::new(r"(?s)<!--.*?-->").unwrap();

    let out = script_re.replace_all(html, "");
    let out = style_re.replace_all(&out, "");
    comment_re.replace_all(&out, "").into_owned()
}

/// Remove all `<script>…</script>`, `<style>…</style>`, and `<!-- … -->`
/// regions. Pure transform; absence of any matching region is a no-op.
///
/// Runs to a fixed point: stripping a region can splice the surrounding
/// text into a new region (a comment inside a script open tag), and the
/// output must contain no removable region at all. Each pass only ever
/// shrinks the input, so the loop terminates.
pub fn sanitize(html: &str) -> String {
    let mut cur = strip_once(html);
    loop {
        let next = strip_once(&cur);
        if next == cur {
            return cur;
        }
        cur = next;
    }
}
