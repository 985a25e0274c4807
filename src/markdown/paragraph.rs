use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Fragment, Stage, STASH_MARK};
use crate::html::starts_with_block_tag;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("valid blank line pattern"));

const WRAPPABLE_BLOCKS: &str = "h[1-6]|ul|ol|li|blockquote|figure|pre|div|table";

/// A whole line that is one `<p>` around block markup. The opening and closing
/// paragraph tags are only ever removed together.
static WRAPPED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    let blocks = WRAPPABLE_BLOCKS;
    Regex::new(&format!(
        r"(?m)^<p>[ \t]*(<(?:{blocks})\b.*</(?:{blocks})>|<hr\b[^>\n]*>)[ \t]*</p>$"
    ))
    .expect("valid wrapped block pattern")
});

static STASHED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{STASH_MARK}([0-9]+){STASH_MARK}")).expect("valid stash pattern")
});

/// Wraps every non-blank line that is not already a block in `<p>`, then joins
/// blocks back together on blank-line boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct Paragraph;

impl Paragraph {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Paragraph {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let blocks: Vec<String> = BLANK_LINE_RE
            .split(&fragment.buffer)
            .filter_map(|block| {
                let lines: Vec<String> = block
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| wrap_line(&fragment, line))
                    .collect();

                (!lines.is_empty()).then(|| lines.join("\n"))
            })
            .collect();

        fragment.buffer = blocks.join("\n\n");
        fragment
    }
}

/// A line that opens with a placeholder is judged by the markup it stands for,
/// so a stashed code block stays unwrapped while a stashed link does not.
fn wrap_line(fragment: &Fragment, line: &str) -> String {
    let is_block = match leading_stash(fragment, line) {
        Some(html) => starts_with_block_tag(html),
        None => line.starts_with(STASH_MARK) || starts_with_block_tag(line),
    };

    if is_block {
        String::from(line)
    } else {
        format!("<p>{line}</p>")
    }
}

fn leading_stash<'f>(fragment: &'f Fragment, line: &str) -> Option<&'f str> {
    let (index, _) = line.strip_prefix(STASH_MARK)?.split_once(STASH_MARK)?;

    fragment.stashed(index.parse().ok()?)
}

/// Removes `<p>` wrapping that ended up directly around a block element.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cleanup;

impl Cleanup {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Cleanup {
    fn name(&self) -> &str {
        "cleanup"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let cleaned = WRAPPED_BLOCK_RE.replace_all(&fragment.buffer, "$1").into_owned();

        fragment.buffer = cleaned;
        fragment
    }
}

/// Puts stashed blocks back in place of their placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Restore;

impl Restore {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Restore {
    fn name(&self) -> &str {
        "restore"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let restored = STASHED_RE.replace_all(&fragment.buffer, |caps: &Captures<'_>| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| fragment.stashed(index))
                .unwrap_or(&caps[0])
                .to_string()
        });

        fragment.buffer = restored.into_owned();
        fragment
    }
}
