//! Entity escaping for text that ends up inside generated HTML.

/// Escape text for use inside a quoted HTML attribute.
///
/// Produces the same result as replacing, in order, `&` with `&amp;`, `"` with
/// `&quot;`, `'` with `&#39;`, `<` with `&lt;` and `>` with `&gt;`. Escaping the
/// ampersand first is what keeps the entities of the later substitutions intact;
/// a single pass over the characters gives that for free.
///
/// ```
/// use coursebook::html::escape_attribute;
///
/// assert_eq!(escape_attribute(r#"say "hi" & <bye>"#), "say &quot;hi&quot; &amp; &lt;bye&gt;");
/// ```
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Escape text for use as element content.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&#x27;", '\''),
    ("&lt;", '<'),
    ("&gt;", '>'),
];

/// Decode the basic entities produced by [`escape_attribute`] in a single pass,
/// so `&amp;lt;` becomes `&lt;` and not `<`. Anything else is left untouched.
pub fn decode_entities(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = memchr::memchr(b'&', rest.as_bytes()) {
        decoded.push_str(&rest[..start]);
        rest = &rest[start..];

        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, c)) => {
                decoded.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                decoded.push('&');
                rest = &rest[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}
