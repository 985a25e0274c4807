use coursebook::{
    export::json::{deserialize_with, normalize},
    site::{generate_site, SiteGenerator},
};
use regex::Regex;
use std::fs;

mod common;

use common::{lesson, section, step};

fn sidebar(html: &str) -> &str {
    let start = html.find("<nav class=\"sidebar\">").expect("sidebar should exist");
    let end = start + html[start..].find("</nav>").expect("sidebar should be closed");

    &html[start..end]
}

fn hrefs(html: &str) -> Vec<String> {
    let href = Regex::new(r#"href="([^"]*)""#).expect("valid pattern");

    href.captures_iter(html)
        .map(|caps| String::from(&caps[1]))
        .collect()
}

#[test]
fn it_generates_the_demo_site() {
    let course = normalize(&common::demo(), &common::defaults());
    let site = generate_site(&course);

    let filenames: Vec<_> = site.filenames().collect();
    assert_eq!(filenames, ["index.html", "intro.html"]);

    let intro = &site.page("intro.html").expect("lesson page").html;
    assert_eq!(intro.matches("<div class=\"step-content\">").count(), 2);
    let a = intro.find("<h2 class=\"step-title\">A</h2>").expect("step A");
    let b = intro.find("<h2 class=\"step-title\">B</h2>").expect("step B");
    assert!(a < b);
    assert!(intro.contains("<p>Step A</p>"));
    assert!(intro.contains("<p>Step B</p>"));

    let index = &site.page("index.html").expect("index page").html;
    assert!(index.contains(
        "<div class=\"stat\"><span class=\"stat-value\">1</span><span class=\"stat-label\">Sections</span></div>"
    ));
    assert!(index.contains(
        "<div class=\"stat\"><span class=\"stat-value\">1</span><span class=\"stat-label\">Lessons</span></div>"
    ));
    assert!(index.contains(
        "<div class=\"stat\"><span class=\"stat-value\">15</span><span class=\"stat-label\">Minutes</span></div>"
    ));
}

#[test]
fn it_links_every_section_and_lesson_once() {
    let draft = coursebook::model::CourseDraft {
        title: Some(String::from("Navigation")),
        sections: Some(vec![
            section("Part One", vec![lesson("Alpha", vec![]), lesson("Beta", vec![])]),
            section("Part Two", vec![lesson("Gamma", vec![])]),
        ]),
        ..Default::default()
    };
    let course = normalize(&draft, &common::defaults());
    let site = generate_site(&course);

    let links = hrefs(sidebar(&site.pages[0].html));
    assert_eq!(
        links,
        [
            "index.html",
            "index.html#section-part-one",
            "alpha.html",
            "beta.html",
            "index.html#section-part-two",
            "gamma.html",
        ]
    );

    for page in &site.pages {
        assert_eq!(hrefs(sidebar(&page.html)), links);
        assert_eq!(sidebar(&page.html).matches(" active\"").count(), 1);
    }

    let outline = &site.pages[0].html;
    assert!(outline.contains("id=\"section-part-one\""));
    assert!(outline.contains("id=\"section-part-two\""));
}

#[test]
fn it_keeps_step_order_and_content() {
    let steps: Vec<_> = (1..=5)
        .map(|n| step(&format!("Step {n}"), &format!("<p>Body {n}</p>")))
        .collect();
    let draft = coursebook::model::CourseDraft {
        title: Some(String::from("Steps")),
        sections: Some(vec![section("Only", vec![lesson("Many Steps", steps)])]),
        ..Default::default()
    };
    let course = normalize(&draft, &common::defaults());
    let site = generate_site(&course);
    let html = &site.page("many-steps.html").expect("lesson page").html;

    assert_eq!(html.matches("<div class=\"step-content\">").count(), 5);

    let positions: Vec<_> = (1..=5)
        .map(|n| {
            html.find(&format!("<h2 class=\"step-title\">Step {n}</h2>\n<p>Body {n}</p>"))
                .expect("step should be rendered")
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn it_renders_an_imported_course() {
    let json = fs::read_to_string(common::test_dir().join("demo.json")).expect("fixture");
    let course = deserialize_with(&json, &common::defaults()).expect("should deserialize");
    let site = SiteGenerator::new().with_lang("en-GB").generate(&course);

    let index = &site.page("index.html").expect("index page").html;
    assert!(index.contains("<html lang=\"en-GB\">"));
    assert!(index.contains("<body class=\"template-modern\">"));
    assert!(index.contains(".lesson-title { letter-spacing: 1px; }"));
    assert!(index.contains("<span class=\"badge author\">By Ada</span>"));
    assert!(index.contains("<span class=\"stat-value\">20</span>"));

    let intro = &site.page("intro.html").expect("lesson page").html;
    assert!(intro.contains("<span class=\"badge difficulty\">Intermediate</span>"));
    assert!(intro.contains(
        r#"<button class="copy-btn" type="button" data-code="if (a &lt; b) {}">Copy</button><pre><code class="language-js">if (a &lt; b) {}</code></pre>"#
    ));
}
