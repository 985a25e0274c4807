use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Fragment, Stage};
use crate::html::{escape_attribute, escape_text};

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```([\w+#.-]*)[^\S\n]*\n([\s\S]*?)```").expect("valid fence pattern")
});

static HEADING_RES: LazyLock<[(Regex, &'static str); 3]> = LazyLock::new(|| {
    [
        (r"(?m)^###[ \t]+(.+?)[ \t]*$", "h3"),
        (r"(?m)^##[ \t]+(.+?)[ \t]*$", "h2"),
        (r"(?m)^#[ \t]+(.+?)[ \t]*$", "h1"),
    ]
    .map(|(pattern, tag)| (Regex::new(pattern).expect("valid heading pattern"), tag))
});

static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>[ \t]?(.*?)[ \t]*$").expect("valid blockquote pattern"));

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]\n]*)\]\(([^)\s]+)\)").expect("valid image pattern")
});

static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:([*+-])|(\d+)\.)[ \t]+(.*?)[ \t]*$").expect("valid list item pattern")
});

const DEFAULT_LANGUAGE: &str = "plaintext";

/// Fenced code blocks become a labelled code container. The rendered block is
/// stashed so no later stage can rewrite the code.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fence;

impl Fence {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Fence {
    fn name(&self) -> &str {
        "fence"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let buffer = std::mem::take(&mut fragment.buffer);
        let replaced = FENCE_RE.replace_all(&buffer, |caps: &Captures<'_>| {
            let language = match &caps[1] {
                "" => DEFAULT_LANGUAGE,
                language => language,
            };
            let html = code_block(language, caps[2].trim());

            format!("\n\n{}\n\n", fragment.stash(html))
        });

        fragment.buffer = replaced.into_owned();
        fragment
    }
}

fn code_block(language: &str, code: &str) -> String {
    format!(
        r#"<div class="code-block"><div class="code-header"><span class="code-lang">{language}</span></div><pre><code class="language-{language}">{code}</code></pre></div>"#
    )
}

/// Line-anchored ATX headings, levels one to three.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heading;

impl Heading {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Heading {
    fn name(&self) -> &str {
        "heading"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        for (pattern, tag) in HEADING_RES.iter() {
            let replacement = format!("<{tag}>$1</{tag}>");
            fragment.buffer = pattern
                .replace_all(&fragment.buffer, replacement.as_str())
                .into_owned();
        }

        fragment
    }
}

/// `> text` lines, one blockquote per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Blockquote;

impl Blockquote {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Blockquote {
    fn name(&self) -> &str {
        "blockquote"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        fragment.buffer = BLOCKQUOTE_RE
            .replace_all(&fragment.buffer, "<blockquote><p>$1</p></blockquote>")
            .into_owned();

        fragment
    }
}

/// `![alt](url)` becomes a captioned figure. The figure is stashed so the inline
/// stages never see its attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Image;

impl Image {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Image {
    fn name(&self) -> &str {
        "image"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let buffer = std::mem::take(&mut fragment.buffer);
        let replaced = IMAGE_RE.replace_all(&buffer, |caps: &Captures<'_>| {
            let alt = &caps[1];
            let html = format!(
                r#"<figure><img src="{}" alt="{}"><figcaption>{}</figcaption></figure>"#,
                escape_attribute(&caps[2]),
                escape_attribute(alt),
                escape_text(alt)
            );

            fragment.stash(html)
        });

        fragment.buffer = replaced.into_owned();
        fragment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Groups consecutive item lines into `<ul>`/`<ol>` blocks.
///
/// Only one level is supported: indented items are flattened into the list
/// they appear in. A change of marker kind closes the current list and opens
/// a new one.
#[derive(Debug, Default, Clone, Copy)]
pub struct List;

impl List {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for List {
    fn name(&self) -> &str {
        "list"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let mut lines = Vec::new();
        let mut open: Option<ListKind> = None;

        for line in fragment.buffer.lines() {
            let Some(caps) = LIST_ITEM_RE.captures(line) else {
                if let Some(kind) = open.take() {
                    lines.push(format!("</{}>", kind.tag()));
                }
                lines.push(String::from(line));
                continue;
            };

            let kind = if caps.get(1).is_some() {
                ListKind::Unordered
            } else {
                ListKind::Ordered
            };

            if open != Some(kind) {
                if let Some(previous) = open {
                    lines.push(format!("</{}>", previous.tag()));
                }
                lines.push(format!("<{}>", kind.tag()));
                open = Some(kind);
            }

            lines.push(format!("<li>{}</li>", &caps[3]));
        }

        if let Some(kind) = open {
            lines.push(format!("</{}>", kind.tag()));
        }

        fragment.buffer = lines.join("\n");
        fragment
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run(stage: impl Stage, input: &str) -> Fragment {
        stage.run(Fragment::new(input))
    }

    #[test]
    fn fence_stashes_code_and_defaults_language() {
        let fragment = run(Fence::new(), "before\n```\n  let x = 1;  \n```\nafter");

        assert_eq!(fragment.buffer, "before\n\n\n\u{FFFC}0\u{FFFC}\n\n\nafter");
        assert_eq!(
            fragment.stashed(0),
            Some(
                r#"<div class="code-block"><div class="code-header"><span class="code-lang">plaintext</span></div><pre><code class="language-plaintext">let x = 1;</code></pre></div>"#
            )
        );
    }

    #[test]
    fn fence_keeps_code_unescaped() {
        let fragment = run(Fence::new(), "```html\n<b>&amp;</b>\n```");

        let html = fragment.stashed(0).expect("code should be stashed");

        assert!(html.contains(r#"<code class="language-html"><b>&amp;</b></code>"#));
    }

    #[test]
    fn fence_without_closing_marker_is_left_alone() {
        let fragment = run(Fence::new(), "```js\nalert(1)");

        assert_eq!(fragment.buffer, "```js\nalert(1)");
        assert_eq!(fragment.stashed(0), None);
    }

    #[test]
    fn headings_are_line_anchored() {
        let fragment = run(Heading::new(), "# One\ntext # not\n## Two\n### Three\n#### Four\n#tag");

        assert_eq!(
            fragment.buffer,
            "<h1>One</h1>\ntext # not\n<h2>Two</h2>\n<h3>Three</h3>\n#### Four\n#tag"
        );
    }

    #[test]
    fn blockquote_wraps_each_line() {
        let fragment = run(Blockquote::new(), "> first\n>second\nplain > not");

        assert_eq!(
            fragment.buffer,
            "<blockquote><p>first</p></blockquote>\n<blockquote><p>second</p></blockquote>\nplain > not"
        );
    }

    #[test]
    fn image_becomes_figure_with_escaped_attributes() {
        let fragment = run(Image::new(), r#"![A "chart"](c.png?a=1&b=2)"#);

        assert_eq!(fragment.buffer, "\u{FFFC}0\u{FFFC}");
        assert_eq!(
            fragment.stashed(0).expect("figure should be stashed"),
            r#"<figure><img src="c.png?a=1&amp;b=2" alt="A &quot;chart&quot;"><figcaption>A "chart"</figcaption></figure>"#
        );
    }

    #[test]
    fn list_groups_consecutive_items() {
        let fragment = run(List::new(), "* a\n- b\n+ c\ntext\n1. one\n10. ten");

        assert_eq!(
            fragment.buffer,
            "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>\ntext\n<ol>\n<li>one</li>\n<li>ten</li>\n</ol>"
        );
    }

    #[test]
    fn list_switches_kind_between_adjacent_items() {
        let fragment = run(List::new(), "- a\n1. b");

        assert_eq!(fragment.buffer, "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>");
    }

    #[test]
    fn nested_items_are_flattened() {
        let fragment = run(List::new(), "* a\n  * b\n* c");

        assert_eq!(fragment.buffer, "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>");
    }

    #[test]
    fn emphasis_at_line_start_is_not_a_list() {
        let fragment = run(List::new(), "*not* a list\n**bold** either");

        assert_eq!(fragment.buffer, "*not* a list\n**bold** either");
    }
}
