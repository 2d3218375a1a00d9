//! HTML escaping helpers

/// Escapes text for insertion between tags
///
/// Matches DOM text serialisation: `&`, `<`, `>` and non-breaking space.
/// Quotes are left alone.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes text for a double-quoted attribute value
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
    out
}

/// Renders ` class="..."` or nothing
pub fn class_attr(class: Option<&str>) -> String {
    match class {
        Some(class) if !class.is_empty() => format!(" class=\"{}\"", escape_attr(class)),
        _ => String::new(),
    }
}
