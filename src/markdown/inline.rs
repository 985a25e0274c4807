use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::{Fragment, Stage};
use crate::html::escape_attribute;

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").expect("valid link pattern")
});

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid bold pattern"));

static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+)\*").expect("valid italic pattern"));

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid inline code pattern"));

/// `[text](url)`. Only the opening tag is stashed, so the link text still gets
/// inline formatting while the `href` is left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct Link;

impl Link {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        let buffer = std::mem::take(&mut fragment.buffer);
        let replaced = LINK_RE.replace_all(&buffer, |caps: &Captures<'_>| {
            let open = format!(r#"<a href="{}">"#, escape_attribute(&caps[2]));

            format!("{}{}</a>", fragment.stash(open), &caps[1])
        });

        fragment.buffer = replaced.into_owned();
        fragment
    }
}

/// `**text**`
#[derive(Debug, Default, Clone, Copy)]
pub struct Bold;

impl Bold {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Bold {
    fn name(&self) -> &str {
        "bold"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        fragment.buffer = BOLD_RE
            .replace_all(&fragment.buffer, "<strong>$1</strong>")
            .into_owned();

        fragment
    }
}

/// `*text*`. Runs after [`Bold`] so double asterisks are already gone.
#[derive(Debug, Default, Clone, Copy)]
pub struct Italic;

impl Italic {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Italic {
    fn name(&self) -> &str {
        "italic"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        fragment.buffer = ITALIC_RE
            .replace_all(&fragment.buffer, "<em>$1</em>")
            .into_owned();

        fragment
    }
}

/// `` `text` ``
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineCode;

impl InlineCode {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for InlineCode {
    fn name(&self) -> &str {
        "inline-code"
    }

    fn run(&self, mut fragment: Fragment) -> Fragment {
        fragment.buffer = INLINE_CODE_RE
            .replace_all(&fragment.buffer, "<code>$1</code>")
            .into_owned();

        fragment
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::markdown::Restore;

    fn run(stage: impl Stage, input: &str) -> String {
        stage.run(Fragment::new(input)).into_html()
    }

    #[test]
    fn links_escape_their_target() {
        let input = r#"see [the docs](https://x.dev/?q="a"&b) now"#;
        let fragment = Link::new().run(Fragment::new(input));

        assert_eq!(
            Restore::new().run(fragment).into_html(),
            r#"see <a href="https://x.dev/?q=&quot;a&quot;&amp;b">the docs</a> now"#
        );
    }

    #[test]
    fn link_targets_are_hidden_from_emphasis() {
        let fragment = Link::new().run(Fragment::new("[*x*](http://a.com/*b*)"));
        let fragment = Italic::new().run(Bold::new().run(fragment));

        assert_eq!(
            Restore::new().run(fragment).into_html(),
            r#"<a href="http://a.com/*b*"><em>x</em></a>"#
        );
    }

    #[test]
    fn bold_spans_stay_on_one_line() {
        assert_eq!(
            run(Bold::new(), "**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
        assert_eq!(run(Bold::new(), "**a\nb**"), "**a\nb**");
    }

    #[test]
    fn italic_after_bold() {
        let fragment = Bold::new().run(Fragment::new("**strong** and *soft*"));

        assert_eq!(
            Italic::new().run(fragment).into_html(),
            "<strong>strong</strong> and <em>soft</em>"
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(run(InlineCode::new(), "use `cargo` here"), "use <code>cargo</code> here");
        assert_eq!(run(InlineCode::new(), "a `` b"), "a `` b");
    }
}
