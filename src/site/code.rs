use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::html::{decode_entities, escape_attribute};

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre([^>]*)>\s*<code([^>]*)>(.*?)</code>\s*</pre>")
        .expect("valid code block pattern")
});

/// Put a copy button in front of every `<pre><code>` block.
///
/// The button's `data-code` holds the raw code: entities in the block are decoded
/// first and the result is escaped once for the attribute.
pub fn add_copy_buttons(html: &str) -> String {
    CODE_BLOCK_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let code = decode_entities(&caps[3]);
            format!(
                r#"<button class="copy-btn" type="button" data-code="{}">Copy</button>{}"#,
                escape_attribute(&code),
                &caps[0]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decorates_each_block() {
        let html = "<pre><code>a</code></pre>\n<p>x</p>\n<pre class=\"x\"><code class=\"language-js\">b</code></pre>";

        assert_eq!(
            add_copy_buttons(html),
            "<button class=\"copy-btn\" type=\"button\" data-code=\"a\">Copy</button><pre><code>a</code></pre>\n<p>x</p>\n<button class=\"copy-btn\" type=\"button\" data-code=\"b\">Copy</button><pre class=\"x\"><code class=\"language-js\">b</code></pre>"
        );
    }

    #[test]
    fn data_code_is_escaped_exactly_once() {
        let html = add_copy_buttons("<pre><code>if a &lt; b &amp;&amp; c == \"d\" {}</code></pre>");

        assert!(html.contains(r#"data-code="if a &lt; b &amp;&amp; c == &quot;d&quot; {}""#));
    }

    #[test]
    fn keeps_multiline_code() {
        let html = add_copy_buttons("<pre><code>line 1\nline 2</code></pre>");

        assert!(html.contains("data-code=\"line 1\nline 2\""));
    }

    #[test]
    fn leaves_inline_code_alone() {
        assert_eq!(add_copy_buttons("<p><code>x</code></p>"), "<p><code>x</code></p>");
    }
}
