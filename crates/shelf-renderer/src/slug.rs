//! Heading slugs.

/// Convert heading text to a GitHub-style anchor slug.
///
/// Lower-cases and trims the text, spells `&` out as `and`, strips
/// punctuation (the General Punctuation and Supplemental Punctuation blocks
/// plus ASCII punctuation other than `-`, `_`, `&` and `\`), then joins
/// words with single dashes. Letters of any script are kept.
///
/// # Examples
///
/// ```
/// use shelf_renderer::slugify;
///
/// assert_eq!(slugify("Error Handling & Recovery"), "error-handling-and-recovery");
/// assert_eq!(slugify("What's new?"), "whats-new");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let lower = lower.trim();

    let mut slug = String::with_capacity(lower.len());
    for c in lower.chars() {
        if is_stripped(c) {
            continue;
        }
        if c == '&' {
            push_separator(&mut slug);
            slug.push_str("and");
            push_separator(&mut slug);
        } else if is_separator(c) {
            push_separator(&mut slug);
        } else {
            slug.push(c);
        }
    }

    let slug = slug.strip_prefix('-').unwrap_or(&slug);
    let slug = slug.strip_suffix('-').unwrap_or(slug);
    slug.to_owned()
}

fn push_separator(slug: &mut String) {
    if !slug.ends_with('-') {
        slug.push('-');
    }
}

fn is_separator(c: char) -> bool {
    c == '-' || c.is_whitespace() || c == '\u{feff}'
}

fn is_stripped(c: char) -> bool {
    matches!(c, '\u{2000}'..='\u{206F}' | '\u{2E00}'..='\u{2E7F}')
        || matches!(
            c,
            '\'' | '"'
                | '!'
                | '#'
                | '$'
                | '%'
                | '*'
                | '+'
                | ','
                | '.'
                | '/'
                | ':'
                | ';'
                | '<'
                | '='
                | '?'
                | '>'
                | '@'
                | '['
                | ']'
                | '^'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '('
                | ')'
        )
}
