use std::fmt::Write;

use super::nav::{section_anchor, NavEntry, NavModel};
use crate::{
    html::{escape_attribute, escape_text, format},
    markdown::to_html,
    model::{Course, LessonBody},
};

const COPY_SCRIPT: &str = include_str!("copy.js");

/// What every page of a site shares: the head, the stylesheet and the script.
pub(crate) struct Shell<'a> {
    pub lang: &'a str,
    pub font_url: &'a str,
    pub stylesheet: &'a str,
    pub custom_css: &'a str,
    pub course_title: &'a str,
    pub template: &'a str,
}

impl Shell<'_> {
    pub fn render(&self, title: &str, sidebar: &str, main: &str) -> String {
        let page_title = if title == self.course_title || title.is_empty() {
            escape_text(self.course_title)
        } else {
            format!("{} | {}", escape_text(title), escape_text(self.course_title))
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
<link rel="stylesheet" href="{font_url}">
<style>
{stylesheet}
{custom_css}
</style>
</head>
<body class="template-{template}">
<div class="layout">
{sidebar}
<main class="content">
{main}
</main>
</div>
<script>
{COPY_SCRIPT}</script>
</body>
</html>
"#,
            lang = escape_attribute(self.lang),
            font_url = escape_attribute(self.font_url),
            stylesheet = self.stylesheet,
            custom_css = self.custom_css,
            template = self.template,
        )
    }
}

/// Body of the course home page.
pub(crate) fn index_body(course: &Course, nav: &NavModel<'_>) -> String {
    let mut html = String::from("<header class=\"course-header\">\n");
    let _ = writeln!(html, "<h1 class=\"course-title\">{}</h1>", escape_text(&course.title));
    if !course.description.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"course-description\">{}</p>",
            escape_text(&course.description)
        );
    }

    html.push_str("<div class=\"course-meta\">");
    if !course.author.is_empty() {
        let _ = write!(
            html,
            "<span class=\"badge author\">By {}</span>",
            escape_text(&course.author)
        );
    }
    let _ = write!(html, "<span class=\"badge category\">{}</span>", course.category);
    for tag in &course.tags {
        let _ = write!(html, "<span class=\"badge tag\">{}</span>", escape_text(tag));
    }
    html.push_str("</div>\n</header>\n");

    html.push_str("<div class=\"course-stats\">\n");
    for (value, label) in [
        (course.sections.len() as u64, "Sections"),
        (course.lesson_count() as u64, "Lessons"),
        (course.total_minutes(), "Minutes"),
    ] {
        let _ = writeln!(
            html,
            "<div class=\"stat\"><span class=\"stat-value\">{value}</span><span class=\"stat-label\">{label}</span></div>"
        );
    }
    html.push_str("</div>\n");

    html.push_str("<section class=\"course-outline\">\n");
    for (section_index, section) in course.sections.iter().enumerate() {
        let _ = writeln!(
            html,
            "<div class=\"outline-section\" id=\"{}\">\n<h2>{}</h2>",
            escape_attribute(&section_anchor(section_index, section)),
            escape_text(&section.title)
        );

        html.push_str("<ol class=\"outline-lessons\">\n");
        for entry in nav
            .entries()
            .iter()
            .filter(|entry| entry.section_index == section_index)
        {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a> <span class=\"outline-time\">{} min</span></li>",
                escape_attribute(&entry.filename),
                escape_text(&entry.lesson.title),
                entry.lesson.estimated_time
            );
        }
        html.push_str("</ol>\n</div>\n");
    }
    html.push_str("</section>");

    html
}

/// Body of a lesson page. `index` is the lesson's position in the navigation model.
pub(crate) fn lesson_body(nav: &NavModel<'_>, index: usize, entry: &NavEntry<'_>) -> String {
    let lesson = entry.lesson;
    let mut html = String::from("<article class=\"lesson\">\n<header class=\"lesson-header\">\n");

    let _ = writeln!(html, "<h1 class=\"lesson-title\">{}</h1>", escape_text(&lesson.title));
    let _ = writeln!(
        html,
        "<div class=\"lesson-meta\"><span class=\"badge difficulty\">{}</span><span class=\"badge duration\">{} min</span></div>",
        lesson.difficulty, lesson.estimated_time
    );
    html.push_str("</header>\n");

    match lesson.body() {
        LessonBody::Steps(steps) => {
            for step in steps {
                let _ = writeln!(
                    html,
                    "<div class=\"step-content\">\n<h2 class=\"step-title\">{}</h2>\n{}\n</div>",
                    escape_text(&step.title),
                    super::code::add_copy_buttons(&format(&step.content))
                );
            }
        }
        LessonBody::Legacy(content) => {
            let _ = writeln!(
                html,
                "<div class=\"lesson-content\">\n{}\n</div>",
                super::code::add_copy_buttons(&format(&to_html(content)))
            );
        }
    }

    html.push_str("<nav class=\"lesson-nav\">\n");
    if let Some(previous) = nav.previous(index) {
        let _ = writeln!(
            html,
            "<a class=\"nav-prev\" href=\"{}\">&larr; {}</a>",
            escape_attribute(&previous.filename),
            escape_text(&previous.lesson.title)
        );
    }
    if let Some(next) = nav.next(index) {
        let _ = writeln!(
            html,
            "<a class=\"nav-next\" href=\"{}\">{} &rarr;</a>",
            escape_attribute(&next.filename),
            escape_text(&next.lesson.title)
        );
    }
    html.push_str("</nav>\n</article>");

    html
}
