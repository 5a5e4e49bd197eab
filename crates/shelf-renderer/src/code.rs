//! Fenced code block output.
//!
//! Each block becomes a `div.code-block` holding a copy button and the
//! `<pre><code>` body. Bodies in a language syntect knows are tokenised into
//! `hl-*` class spans; anything else is escaped verbatim.

use std::fmt::Write;
use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Class prefix for highlighted token spans.
const HIGHLIGHT_CLASS_PREFIX: &str = "hl-";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Language token of a fence info string (`rust,no_run` → `rust`).
fn fence_language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
}

/// Replace every code block in `events` with a single HTML event.
pub(crate) fn render_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut block: Option<(Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match &kind {
                    CodeBlockKind::Fenced(info) => fence_language(info).map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                block = Some((lang, String::new()));
            }
            Event::Text(text) if block.is_some() => {
                if let Some((_, content)) = block.as_mut() {
                    content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, content)) = block.take() {
                    out.push(Event::Html(CowStr::from(code_block_html(
                        lang.as_deref(),
                        &content,
                    ))));
                }
            }
            other => out.push(other),
        }
    }

    out
}

/// HTML for one code block, including its copy button.
fn code_block_html(lang: Option<&str>, content: &str) -> String {
    let mut out = String::with_capacity(content.len() * 2 + 128);
    out.push_str(
        r#"<div class="code-block"><button type="button" class="copy-btn" aria-label="Copy code to clipboard">Copy</button>"#,
    );
    match lang {
        Some(lang) => {
            let _ = write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                highlight(lang, content).unwrap_or_else(|| escape_html(content))
            );
        }
        None => {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        }
    }
    out.push_str("</div>\n");
    out
}

/// Tokenise `content` as `lang`. `None` for unknown languages.
fn highlight(lang: &str, content: &str) -> Option<String> {
    let syntax = SYNTAXES.find_syntax_by_token(lang)?;
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAXES,
        ClassStyle::SpacedPrefixed {
            prefix: HIGHLIGHT_CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(content) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            tracing::debug!(lang, error = %err, "Highlighting failed, emitting plain code");
            return None;
        }
    }
    Some(generator.finalize())
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), Some("rust"));
        assert_eq!(fence_language("rust,no_run"), Some("rust"));
        assert_eq!(fence_language("python title=x"), Some("python"));
        assert_eq!(fence_language(""), None);
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let html = code_block_html(Some("rust"), "fn main() {}\n");

        assert!(html.starts_with(r#"<div class="code-block"><button type="button" class="copy-btn""#));
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains(r#"<span class="hl-"#));
        assert!(html.contains("main"));
        assert!(html.ends_with("</code></pre></div>\n"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let html = code_block_html(Some("nosuchlang"), "<a> & b\n");

        assert!(html.contains(
            r#"<pre><code class="language-nosuchlang">&lt;a&gt; &amp; b
</code></pre>"#
        ));
        assert!(!html.contains("hl-"));
    }

    #[test]
    fn test_plain_block_without_language() {
        let html = code_block_html(None, "x < y\n");

        assert!(html.contains("<pre><code>x &lt; y\n</code></pre>"));
        assert!(html.contains("copy-btn"));
    }

    #[test]
    fn test_render_code_blocks_replaces_events() {
        let events = vec![
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)),
            Event::Text("a\n".into()),
            Event::Text("b\n".into()),
            Event::End(TagEnd::CodeBlock),
            Event::Text("after".into()),
        ];

        let out = render_code_blocks(events);

        assert_eq!(out.len(), 2);
        assert!(matches!(&out[0], Event::Html(html) if html.contains("<pre><code>a\nb\n</code></pre>")));
        assert_eq!(out[1], Event::Text("after".into()));
    }
}
