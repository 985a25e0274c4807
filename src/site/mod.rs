//! Static multi-page HTML site generation.
//!
//! A site is one `index.html` course home plus one page per lesson, named after
//! the lesson slug. Every page carries the same sidebar, stylesheet and copy
//! script. Pages are rendered in parallel and assembled in document order.

mod code;
mod nav;
mod page;
mod theme;

pub use code::add_copy_buttons;
pub use nav::{lesson_filename, section_anchor, Active, NavEntry, NavModel, INDEX_FILE};
pub use theme::{BuiltinThemes, ThemeProvider};

use rayon::prelude::*;
use std::{collections::HashMap, sync::Arc};

use crate::{
    config::{SiteConfig, DEFAULT_FONT_URL},
    debug,
    model::{Course, Template},
};
use page::Shell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub filename: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Site {
    pub pages: Vec<Page>,
}

impl Site {
    pub fn page(&self, filename: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.filename == filename)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.filename.as_str())
    }
}

/// Generate a site with the built-in themes and default settings.
pub fn generate_site(course: &Course) -> Site {
    SiteGenerator::default().generate(course)
}

#[derive(Clone)]
pub struct SiteGenerator {
    themes: Arc<dyn ThemeProvider>,
    font_url: String,
    lang: String,
    template: Option<Template>,
}

impl SiteGenerator {
    pub fn new() -> Self {
        Self {
            themes: Arc::new(BuiltinThemes),
            font_url: String::from(DEFAULT_FONT_URL),
            lang: String::from("en"),
            template: None,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            font_url: config.font_url.clone(),
            lang: config.lang.clone(),
            template: config.template,
            ..Self::new()
        }
    }

    pub fn with_theme_provider(mut self, themes: impl ThemeProvider + 'static) -> Self {
        self.themes = Arc::new(themes);
        self
    }

    pub fn with_font_url(mut self, font_url: impl Into<String>) -> Self {
        self.font_url = font_url.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Use `template` instead of the one chosen by the course.
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn generate(&self, course: &Course) -> Site {
        let template = self.template.unwrap_or(course.template);
        let stylesheet = self.themes.stylesheet(template);
        let shell = Shell {
            lang: &self.lang,
            font_url: &self.font_url,
            stylesheet: &stylesheet,
            custom_css: &course.custom_css,
            course_title: &course.title,
            template: template.as_str(),
        };
        let nav = NavModel::new(course);

        let index = Page {
            filename: String::from(INDEX_FILE),
            html: shell.render(
                &course.title,
                &nav.sidebar(Active::Home),
                &page::index_body(course, &nav),
            ),
        };

        let lessons: Vec<Page> = nav
            .entries()
            .par_iter()
            .enumerate()
            .map(|(position, entry)| Page {
                filename: entry.filename.clone(),
                html: shell.render(
                    &entry.lesson.title,
                    &nav.sidebar(Active::Lesson(position)),
                    &page::lesson_body(&nav, position, entry),
                ),
            })
            .collect();

        assemble(index, lessons)
    }
}

impl Default for SiteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay pages out in document order. A later lesson with the same filename as an
/// earlier one replaces it in place. The course home always keeps `index.html`.
fn assemble(index: Page, lessons: Vec<Page>) -> Site {
    let mut pages = vec![index];
    let mut positions = HashMap::from([(String::from(INDEX_FILE), 0)]);

    for page in lessons {
        match positions.get(&page.filename).copied() {
            Some(0) => {
                debug!(
                    "site";
                    "lesson page {} collides with the course home, skipping it",
                    page.filename
                );
            }
            Some(position) => {
                debug!("site"; "duplicate page {}, keeping the later lesson", page.filename);
                pages[position] = page;
            }
            None => {
                positions.insert(page.filename.clone(), pages.len());
                pages.push(page);
            }
        }
    }

    Site { pages }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        export::normalize,
        model::{CourseDraft, Defaults, LessonDraft, SectionDraft, StepDraft},
    };

    fn lesson(title: &str, slug: Option<&str>, step: &str) -> LessonDraft {
        LessonDraft {
            title: Some(String::from(title)),
            slug: slug.map(String::from),
            steps: Some(vec![StepDraft {
                title: Some(String::from("Only step")),
                content: Some(String::from(step)),
            }]),
            ..Default::default()
        }
    }

    fn course(lessons: Vec<LessonDraft>) -> Course {
        let draft = CourseDraft {
            title: Some(String::from("Course")),
            custom_css: Some(String::from(".custom { color: red; }")),
            sections: Some(vec![SectionDraft {
                title: Some(String::from("Section")),
                lessons: Some(lessons),
                ..Default::default()
            }]),
            ..Default::default()
        };

        normalize(&draft, &Defaults::default())
    }

    #[test]
    fn pages_follow_document_order() {
        let course = course(vec![
            lesson("First", None, "<p>1</p>"),
            lesson("Second", None, "<p>2</p>"),
            lesson("Third", None, "<p>3</p>"),
        ]);
        let site = generate_site(&course);
        let filenames: Vec<_> = site.filenames().collect();

        assert_eq!(filenames, ["index.html", "first.html", "second.html", "third.html"]);
    }

    #[test]
    fn later_lesson_wins_a_slug_collision() {
        let course = course(vec![
            lesson("First", Some("same"), "<p>from first</p>"),
            lesson("Other", None, "<p>other</p>"),
            lesson("Second", Some("same"), "<p>from second</p>"),
        ]);
        let site = generate_site(&course);
        let filenames: Vec<_> = site.filenames().collect();

        assert_eq!(filenames, ["index.html", "same.html", "other.html"]);

        let page = site.page("same.html").expect("page should exist");
        assert!(page.html.contains("from second"));
        assert!(!page.html.contains("from first"));
    }

    #[test]
    fn course_home_keeps_index_html() {
        let course = course(vec![lesson("Index", None, "<p>lesson body</p>")]);
        let site = generate_site(&course);

        assert_eq!(site.pages.len(), 1);
        assert!(site.pages[0].html.contains("course-stats"));
    }

    #[test]
    fn every_page_carries_theme_and_custom_css() {
        let course = course(vec![lesson("First", None, "<p>1</p>")]);
        let site = SiteGenerator::new()
            .with_template(Template::Modern)
            .with_lang("de")
            .generate(&course);

        for page in &site.pages {
            assert!(page.html.starts_with("<!DOCTYPE html>\n<html lang=\"de\">"));
            assert!(page.html.contains("<body class=\"template-modern\">"));
            assert!(page.html.contains("--accent: #38bdf8;"));
            assert!(page.html.contains(".custom { color: red; }"));
            assert!(page.html.contains(".copy-btn"));
            assert!(page.html.contains(DEFAULT_FONT_URL.replace('&', "&amp;").as_str()));
        }
    }

    #[test]
    fn custom_theme_providers_are_used() {
        struct Plain;

        impl ThemeProvider for Plain {
            fn stylesheet(&self, template: Template) -> std::borrow::Cow<'_, str> {
                format!("/* plain {template} */").into()
            }
        }

        let course = course(vec![]);
        let site = SiteGenerator::new().with_theme_provider(Plain).generate(&course);

        assert!(site.pages[0].html.contains("/* plain academic */"));
    }

    #[test]
    fn lessons_link_to_their_neighbours() {
        let course = course(vec![
            lesson("First", None, ""),
            lesson("Second", None, ""),
        ]);
        let site = generate_site(&course);

        let first = &site.page("first.html").expect("page should exist").html;
        assert!(first.contains(r#"<a class="nav-next" href="second.html">Second &rarr;</a>"#));
        assert!(!first.contains("nav-prev"));

        let second = &site.page("second.html").expect("page should exist").html;
        assert!(second.contains(r#"<a class="nav-prev" href="first.html">&larr; First</a>"#));
        assert!(!second.contains("nav-next"));
    }

    #[test]
    fn legacy_content_is_compiled_from_markdown() {
        let draft = LessonDraft {
            title: Some(String::from("Legacy")),
            content: Some(String::from("# Heading\n\n```sh\necho \"hi\" && exit\n```")),
            ..Default::default()
        };
        let site = generate_site(&course(vec![draft]));
        let html = &site.page("legacy.html").expect("page should exist").html;

        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains(r#"data-code="echo &quot;hi&quot; &amp;&amp; exit""#));
        assert!(!html.contains("<div class=\"step-content\">"));
    }

    #[test]
    fn slugs_cannot_break_out_of_attributes() {
        let course = course(vec![
            lesson("First", None, "<p>1</p>"),
            lesson("Evil", Some(r#"x"><script>alert(1)</script>"#), "<p>2</p>"),
        ]);
        let site = generate_site(&course);

        assert_eq!(site.pages.len(), 3);
        for page in &site.pages {
            assert!(!page.html.contains("<script>alert(1)</script>"), "{}", page.html);
        }

        let first = &site.page("first.html").expect("page should exist").html;
        assert!(first.contains(
            r#"<a class="nav-next" href="x&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;.html">"#
        ));
    }
}
