/// Derive a URL-safe slug from a human title.
///
/// ASCII letters and digits are lowercased and kept, runs of whitespace and
/// hyphens become a single hyphen, everything else is dropped. Leading and
/// trailing hyphens are removed.
///
/// ```
/// use coursebook::model::slugify;
///
/// assert_eq!(slugify("Intro to Rust!"), "intro-to-rust");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}
