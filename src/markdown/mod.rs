//! Compiles the Markdown subset used by legacy lesson content into HTML.
//!
//! The transpiler is an ordered pipeline of [`Stage`]s over a single buffer. Each
//! stage sees the output of the stages before it, so the order is part of the
//! contract:
//!
//! 1. [`Fence`]: fenced code blocks, set aside until [`Restore`]
//! 2. [`Heading`]: `#`, `##`, `###`
//! 3. [`Blockquote`]: `> text`
//! 4. [`Image`]: `![alt](url)`, set aside until [`Restore`]
//! 5. [`List`]: single-level `*`/`-`/`+` and `N.` lists
//! 6. [`Link`], [`Bold`], [`Italic`], [`InlineCode`]
//! 7. [`Paragraph`]: wrap remaining lines in `<p>`
//! 8. [`Cleanup`]: drop `<p>` wrapping around block elements
//! 9. [`Restore`]: splice the stashed markup back in
//!
//! Every stage is total. Input that does not match a pattern, such as an
//! unterminated fence, passes through as text.

mod block;
mod inline;
mod paragraph;

pub use block::{Blockquote, Fence, Heading, Image, List};
pub use inline::{Bold, InlineCode, Italic, Link};
pub use paragraph::{Cleanup, Paragraph, Restore};

use std::{borrow::Borrow, sync::LazyLock};

/// Marks stashed markup in the buffer. Chosen so no stage pattern can match it.
const STASH_MARK: char = '\u{FFFC}';

/// The buffer a pipeline works on, plus the blocks set aside by earlier stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub buffer: String,
    stash: Vec<String>,
}

impl Fragment {
    pub fn new(markdown: &str) -> Self {
        Self {
            buffer: markdown.replace("\r\n", "\n"),
            stash: Vec::new(),
        }
    }

    /// Set finished HTML aside and return the placeholder that stands in for it.
    pub fn stash(&mut self, html: String) -> String {
        let placeholder = format!("{STASH_MARK}{}{STASH_MARK}", self.stash.len());
        self.stash.push(html);

        placeholder
    }

    pub(crate) fn stashed(&self, index: usize) -> Option<&str> {
        self.stash.get(index).map(String::as_str)
    }

    pub fn into_html(self) -> String {
        self.buffer
    }
}

pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, fragment: Fragment) -> Fragment;
}

pub(crate) trait StageExt {
    fn run(self, fragment: Fragment) -> Fragment;
}

impl<I, S> StageExt for I
where
    I: Iterator<Item = S>,
    S: Borrow<Box<dyn Stage>>,
{
    fn run(self, fragment: Fragment) -> Fragment {
        self.fold(fragment, |fragment, stage| stage.borrow().run(fragment))
    }
}

pub struct Transpiler {
    stages: Vec<Box<dyn Stage>>,
}

impl Transpiler {
    /// The standard pipeline, in its documented order.
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(Fence::new()),
                Box::new(Heading::new()),
                Box::new(Blockquote::new()),
                Box::new(Image::new()),
                Box::new(List::new()),
                Box::new(Link::new()),
                Box::new(Bold::new()),
                Box::new(Italic::new()),
                Box::new(InlineCode::new()),
                Box::new(Paragraph::new()),
                Box::new(Cleanup::new()),
                Box::new(Restore::new()),
            ],
        }
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name())
    }

    pub fn transpile(&self, markdown: &str) -> String {
        self.stages.iter().run(Fragment::new(markdown)).into_html()
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new()
    }
}

static TRANSPILER: LazyLock<Transpiler> = LazyLock::new(Transpiler::new);

/// Convert legacy Markdown lesson content into an HTML fragment.
///
/// ```
/// use coursebook::markdown::to_html;
///
/// assert_eq!(to_html("# Hello"), "<h1>Hello</h1>");
/// ```
pub fn to_html(markdown: &str) -> String {
    TRANSPILER.transpile(markdown)
}
