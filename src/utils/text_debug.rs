// src/utils/text_debug.rs
use regex::Regex;

/// A matched byte range in the statement text and the rule that matched it.
pub type Highlight<'a> = (usize, usize, &'a str);

/// Finds every match of every rule pattern.
pub fn collect_highlights<'a>(text: &str, patterns: &[(&'a str, &Regex)]) -> Vec<Highlight<'a>> {
    let mut highlights = Vec::new();
    for (name, re) in patterns {
        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *name));
        }
    }
    highlights
}

/// Wraps each highlight in `[[rule>>` ... `<<rule]]` markers.
///
/// Highlights are applied in text order; one that overlaps an earlier
/// highlight is dropped so the output stays well nested.
pub fn annotate(text: &str, highlights: &[Highlight<'_>]) -> String {
    let mut sorted = highlights.to_vec();
    sorted.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1)));

    let mut out = String::with_capacity(text.len() + sorted.len() * 32);
    let mut last_pos = 0;

    for (start, end, name) in sorted {
        if start < last_pos {
            tracing::debug!("Skipping overlapping '{}' match at {}-{}", name, start, end);
            continue;
        }
        out.push_str(&text[last_pos..start]);
        out.push_str(&format!("[[{}>>", name));
        out.push_str(&text[start..end]);
        out.push_str(&format!("<<{}]]", name));
        last_pos = end;
    }

    out.push_str(&text[last_pos..]);
    out
}
