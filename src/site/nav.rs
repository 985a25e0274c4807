//! The navigation model shared by every page of a generated site.

use std::fmt::Write;

use crate::{
    html::{escape_attribute, escape_text},
    model::{Course, Lesson, Section},
};

pub const INDEX_FILE: &str = "index.html";

/// One lesson in reading order, with the section it belongs to.
#[derive(Debug, Clone)]
pub struct NavEntry<'a> {
    pub section_index: usize,
    pub section: &'a Section,
    pub lesson: &'a Lesson,
    pub filename: String,
}

/// Which sidebar link is marked as the current page. Lessons are identified by
/// their position in [`NavModel::entries`], since filenames may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Active {
    Home,
    Lesson(usize),
}

/// Flat, ordered list of every lesson in a course.
#[derive(Debug, Clone)]
pub struct NavModel<'a> {
    course: &'a Course,
    entries: Vec<NavEntry<'a>>,
}

impl<'a> NavModel<'a> {
    pub fn new(course: &'a Course) -> Self {
        let entries = course
            .sections
            .iter()
            .enumerate()
            .flat_map(|(section_index, section)| {
                section.lessons.iter().map(move |lesson| NavEntry {
                    section_index,
                    section,
                    lesson,
                    filename: lesson_filename(lesson),
                })
            })
            .collect();

        Self { course, entries }
    }

    pub fn entries(&self) -> &[NavEntry<'a>] {
        &self.entries
    }

    pub fn previous(&self, index: usize) -> Option<&NavEntry<'a>> {
        index.checked_sub(1).and_then(|index| self.entries.get(index))
    }

    pub fn next(&self, index: usize) -> Option<&NavEntry<'a>> {
        self.entries.get(index + 1)
    }

    /// Render the sidebar. Only the `active` marker differs between pages.
    pub fn sidebar(&self, active: Active) -> String {
        let mut html = String::from("<nav class=\"sidebar\">\n");

        let _ = writeln!(
            html,
            "<a href=\"{INDEX_FILE}\" class=\"{}\">Course Home</a>",
            classes("nav-home", active == Active::Home)
        );

        let mut entries = self.entries.iter().enumerate().peekable();
        for (section_index, section) in self.course.sections.iter().enumerate() {
            html.push_str("<div class=\"nav-section\">\n");
            let _ = writeln!(
                html,
                "<a href=\"{INDEX_FILE}#{}\" class=\"nav-section-title\">{}</a>",
                escape_attribute(&section_anchor(section_index, section)),
                escape_text(&section.title)
            );

            html.push_str("<ul class=\"nav-lessons\">\n");
            while let Some((index, entry)) =
                entries.next_if(|(_, entry)| entry.section_index == section_index)
            {
                let _ = writeln!(
                    html,
                    "<li><a href=\"{}\" class=\"{}\">{}</a></li>",
                    escape_attribute(&entry.filename),
                    classes("nav-lesson", active == Active::Lesson(index)),
                    escape_text(&entry.lesson.title)
                );
            }
            html.push_str("</ul>\n</div>\n");
        }

        html.push_str("</nav>");
        html
    }
}

fn classes(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        String::from(base)
    }
}

/// The slug is used as the file stem as is. Callers escape it wherever it is
/// written into markup.
pub fn lesson_filename(lesson: &Lesson) -> String {
    format!("{}.html", lesson.slug)
}

/// Anchor id of a section block on the index page.
pub fn section_anchor(index: usize, section: &Section) -> String {
    if section.slug.is_empty() {
        format!("section-{}", index + 1)
    } else {
        format!("section-{}", section.slug)
    }
}
