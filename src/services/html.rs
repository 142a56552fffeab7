//! Plain-text helpers for rich-text release bodies.

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    // Last, so "&amp;lt;" decodes to "&lt;" and not "<".
    ("&amp;", "&"),
];

/// Removes tags, decodes the common entities and collapses whitespace.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                text.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    text.push_str(rest);

    let mut decoded = text;
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plain-text excerpt of at most `max_chars` characters, cut at a word
/// boundary and suffixed with `...` when shortened.
pub fn truncate_html(html: &str, max_chars: usize) -> String {
    let plain = strip_html(html);

    if plain.chars().count() <= max_chars {
        return plain;
    }

    let truncated: String = plain.chars().take(max_chars).collect();
    match truncated.rfind(' ') {
        Some(last_space) if last_space > 0 => format!("{}...", &truncated[..last_space]),
        _ => format!("{truncated}..."),
    }
}

pub fn is_html_content(content: &str) -> bool {
    content
        .find('<')
        .is_some_and(|open| content[open..].contains('>'))
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps plain text in paragraphs so it renders like rich text.
pub fn plain_text_to_html(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        let html = "<p>Acme &amp; Sons <strong>launch</strong></p>\n<p>new&nbsp;widgets</p>";
        assert_eq!(strip_html(html), "Acme & Sons launch new widgets");
    }

    #[test]
    fn double_escaped_entities_decode_once() {
        assert_eq!(strip_html("a &amp;lt; b"), "a &lt; b");
    }

    #[test]
    fn unclosed_tag_is_kept() {
        assert_eq!(strip_html("1 < 2 is true"), "1 < 2 is true");
    }

    #[test]
    fn truncates_at_word_boundary() {
        let html = "<p>The quick brown fox jumps over the lazy dog</p>";
        assert_eq!(truncate_html(html, 100), "The quick brown fox jumps over the lazy dog");
        assert_eq!(truncate_html(html, 12), "The quick...");
        assert_eq!(truncate_html("<b>Supercalifragilistic</b>", 5), "Super...");
    }

    #[test]
    fn detects_markup() {
        assert!(is_html_content("<p>hi</p>"));
        assert!(!is_html_content("plain text, 1 < 2"));
    }

    #[test]
    fn plain_text_becomes_paragraphs() {
        assert_eq!(
            plain_text_to_html("Hello <world>\n\nSecond\nline"),
            "<p>Hello &lt;world&gt;</p><p>Second<br>line</p>"
        );
    }
}
