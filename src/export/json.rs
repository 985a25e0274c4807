//! The canonical JSON interchange format.
//!
//! [`normalize`] is the single place where defaults are applied. Everything that
//! consumes a course, the JSON export and the site generator alike, reads the
//! fully-defaulted [`Course`] it returns.

use serde::Deserialize;
use std::collections::HashSet;

use crate::{
    error::Result,
    model::{
        slugify, Course, CourseDraft, Defaults, IdKind, Lesson, LessonDraft, Section,
        SectionDraft, Step, StepDraft, DEFAULT_ESTIMATED_TIME,
    },
};

/// The payload handed to [`deserialize`] could not be turned into a course.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("course payload is not valid JSON")]
    Malformed(#[source] serde_json::Error),
    #[error("course payload has an invalid structure")]
    InvalidStructure(#[source] serde_json::Error),
}

/// Apply every default to a draft, producing a course with no missing field.
///
/// Normalizing a course that was already normalized yields the same course.
pub fn normalize(draft: &CourseDraft, defaults: &Defaults) -> Course {
    let title = draft.title.clone().unwrap_or_default();
    let id = draft
        .id
        .clone()
        .unwrap_or_else(|| defaults.generate_id(IdKind::Course, "", 0, &title));
    let slug = draft.slug.clone().unwrap_or_else(|| slugify(&title));

    let mut lesson_position = 0;
    let sections = draft
        .sections
        .iter()
        .flatten()
        .enumerate()
        .map(|(position, section)| {
            normalize_section(section, &id, position, &mut lesson_position, defaults)
        })
        .collect();

    Course {
        slug,
        description: draft.description.clone().unwrap_or_default(),
        category: draft.category.unwrap_or_default(),
        author: draft.author.clone().unwrap_or_default(),
        tags: dedup_tags(draft.tags.as_deref().unwrap_or_default()),
        sections,
        template: draft.template.unwrap_or_default(),
        custom_css: draft.custom_css.clone().unwrap_or_default(),
        created_at: draft.created_at.unwrap_or(defaults.now),
        updated_at: draft.updated_at.unwrap_or(defaults.now),
        is_free: draft.is_free.unwrap_or(false),
        is_recommended: draft.is_recommended.unwrap_or(false),
        id,
        title,
    }
}

fn normalize_section(
    draft: &SectionDraft,
    course_id: &str,
    position: usize,
    lesson_position: &mut usize,
    defaults: &Defaults,
) -> Section {
    let title = draft.title.clone().unwrap_or_default();
    let id = draft
        .id
        .clone()
        .unwrap_or_else(|| defaults.generate_id(IdKind::Section, course_id, position, &title));

    let lessons = draft
        .lessons
        .iter()
        .flatten()
        .enumerate()
        .map(|(position, lesson)| {
            *lesson_position += 1;
            normalize_lesson(lesson, &id, position, *lesson_position, defaults)
        })
        .collect();

    Section {
        slug: draft.slug.clone().unwrap_or_else(|| slugify(&title)),
        lessons,
        id,
        title,
    }
}

/// `ordinal` is the 1-based position of the lesson in the whole course.
fn normalize_lesson(
    draft: &LessonDraft,
    section_id: &str,
    position: usize,
    ordinal: usize,
    defaults: &Defaults,
) -> Lesson {
    let title = draft.title.clone().unwrap_or_default();
    let id = draft
        .id
        .clone()
        .unwrap_or_else(|| defaults.generate_id(IdKind::Lesson, section_id, position, &title));

    let slug = match draft.slug.clone().unwrap_or_else(|| slugify(&title)) {
        slug if slug.is_empty() => format!("lesson-{ordinal}"),
        slug => slug,
    };

    let estimated_time = match draft.estimated_time {
        Some(minutes) if minutes > 0 => minutes,
        _ => DEFAULT_ESTIMATED_TIME,
    };

    Lesson {
        slug,
        difficulty: draft.difficulty.unwrap_or_default(),
        estimated_time,
        progress: draft.progress.unwrap_or(0).min(100),
        steps: draft.steps.iter().flatten().map(normalize_step).collect(),
        content: draft.content.clone().unwrap_or_default(),
        id,
        title,
    }
}

fn normalize_step(draft: &StepDraft) -> Step {
    Step {
        title: draft.title.clone().unwrap_or_default(),
        content: draft.content.clone().unwrap_or_default(),
    }
}

fn dedup_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    tags.iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Normalize a draft with defaults anchored at the current instant and render it
/// as pretty-printed JSON.
pub fn serialize(draft: &CourseDraft) -> Result<String> {
    serialize_with(draft, &Defaults::now())
}

/// Normalize a draft with the given defaults and render it as pretty-printed JSON.
pub fn serialize_with(draft: &CourseDraft, defaults: &Defaults) -> Result<String> {
    to_json(&normalize(draft, defaults))
}

/// Render an already-normalized course as pretty-printed JSON.
pub fn to_json(course: &Course) -> Result<String> {
    Ok(serde_json::to_string_pretty(course)?)
}

/// Read a course from JSON, applying defaults anchored at the current instant to
/// anything the payload leaves out.
pub fn deserialize(json: &str) -> Result<Course, ImportError> {
    deserialize_with(json, &Defaults::now())
}

/// Syntax is checked before shape, so a truncated payload is always
/// [`ImportError::Malformed`] whatever its first values look like.
pub fn deserialize_with(json: &str, defaults: &Defaults) -> Result<Course, ImportError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(ImportError::Malformed)?;
    let draft = CourseDraft::deserialize(value).map_err(ImportError::InvalidStructure)?;

    Ok(normalize(&draft, defaults))
}
