//! Cosmetic line breaking for generated HTML fragments.

use memchr::{memchr, memchr_iter};

/// Tags that get a line of their own in formatted output.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "td",
    "tfoot",
    "th",
    "thead",
    "tr",
    "ul",
];

/// Reformat an HTML fragment for readable source.
///
/// A newline is placed before every opening and after every closing block-level
/// tag unless one is already there, runs of three or more newlines shrink to two
/// and the result is trimmed. Tags, attributes and the contents of `<pre>`
/// elements are copied as they are. `format(format(x)) == format(x)`.
///
/// ```
/// use coursebook::html::format;
///
/// assert_eq!(format("<div><p>Hi</p><p>Bye</p></div>"), "<div>\n<p>Hi</p>\n<p>Bye</p>\n</div>");
/// ```
pub fn format(html: &str) -> String {
    let mut output = Output::with_capacity(html.len() + html.len() / 8);
    let mut rest = html;

    while let Some(open) = memchr(b'<', rest.as_bytes()) {
        output.push_text(&rest[..open]);
        rest = &rest[open..];

        let Some(close) = memchr(b'>', rest.as_bytes()) else {
            break;
        };

        // A second `<` before the `>` means the first one was plain text.
        if let Some(nested) = memchr(b'<', &rest.as_bytes()[1..close]) {
            output.push_text(&rest[..=nested]);
            rest = &rest[nested + 1..];
            continue;
        }

        let tag = &rest[..=close];
        rest = &rest[close + 1..];

        match parse_tag(tag) {
            Some((name, false)) if is_block(name) => {
                output.break_line();
                output.push_markup(tag);

                if name.eq_ignore_ascii_case("pre") {
                    let end = find_pre_close(rest).unwrap_or(rest.len());
                    output.push_verbatim(&rest[..end]);
                    rest = &rest[end..];
                }
            }
            Some((name, true)) if is_block(name) => {
                output.push_markup(tag);
                output.break_after();
            }
            _ => output.push_markup(tag),
        }
    }

    output.push_text(rest);
    output.finish()
}

/// Byte offset of the first `</pre`, in any letter case.
fn find_pre_close(html: &str) -> Option<usize> {
    let bytes = html.as_bytes();

    memchr_iter(b'<', bytes).find(|&open| {
        bytes[open..]
            .get(..5)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(b"</pre"))
    })
}

/// Returns the tag name and whether it is a closing tag.
fn parse_tag(tag: &str) -> Option<(&str, bool)> {
    let inner = tag.strip_prefix('<')?;
    let (inner, closing) = match inner.strip_prefix('/') {
        Some(inner) => (inner, true),
        None => (inner, false),
    };

    let end = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    let (name, after) = inner.split_at(end);

    let starts_with_letter = name.starts_with(|c: char| c.is_ascii_alphabetic());
    let terminated = after.starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/');

    (starts_with_letter && terminated).then_some((name, closing))
}

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Whether `line` begins with an opening or closing block-level tag.
pub(crate) fn starts_with_block_tag(line: &str) -> bool {
    if !line.starts_with('<') {
        return false;
    }

    let end = memchr(b'>', line.as_bytes()).map_or(line.len(), |close| close + 1);
    parse_tag(&line[..end]).is_some_and(|(name, _)| is_block(name))
}

struct Output {
    buffer: String,
    /// Length of the run of newlines at the end of `buffer`.
    newlines: usize,
    /// A block just closed; the next content must start on a new line.
    pending_break: bool,
}

impl Output {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            newlines: 0,
            pending_break: false,
        }
    }

    fn push_newline(&mut self) {
        self.buffer.push('\n');
        self.newlines += 1;
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        if self.pending_break {
            self.pending_break = false;
            if !text.starts_with('\n') {
                self.push_newline();
            }
        }

        for c in text.chars() {
            if c == '\n' {
                if self.newlines < 2 {
                    self.push_newline();
                }
            } else {
                self.buffer.push(c);
                self.newlines = 0;
            }
        }
    }

    fn push_markup(&mut self, markup: &str) {
        if self.pending_break {
            self.pending_break = false;
            self.push_newline();
        }

        self.buffer.push_str(markup);
        self.newlines = 0;
    }

    fn push_verbatim(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.newlines = text.len() - text.trim_end_matches('\n').len();
    }

    /// Make sure the next markup starts a line.
    fn break_line(&mut self) {
        self.pending_break = false;

        if !self.buffer.is_empty() && self.newlines == 0 {
            self.push_newline();
        }
    }

    fn break_after(&mut self) {
        self.pending_break = true;
    }

    fn finish(self) -> String {
        String::from(self.buffer.trim())
    }
}
