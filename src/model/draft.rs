use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Course, Lesson, Level, Section, Step, Template};

/// A course document as handed over by the editor: any field may be missing.
///
/// Drafts are turned into a [`Course`] by [`crate::export::json::normalize`],
/// which is the only place defaults are applied.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category: Option<Level>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub sections: Option<Vec<SectionDraft>>,
    pub template: Option<Template>,
    #[serde(rename = "customCSS")]
    pub custom_css: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_free: Option<bool>,
    pub is_recommended: Option<bool>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub lessons: Option<Vec<LessonDraft>>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LessonDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub difficulty: Option<Level>,
    pub estimated_time: Option<u32>,
    pub progress: Option<u8>,
    pub steps: Option<Vec<StepDraft>>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDraft {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<Course> for CourseDraft {
    fn from(course: Course) -> Self {
        Self {
            id: Some(course.id),
            title: Some(course.title),
            slug: Some(course.slug),
            description: Some(course.description),
            category: Some(course.category),
            author: Some(course.author),
            tags: Some(course.tags),
            sections: Some(course.sections.into_iter().map(Into::into).collect()),
            template: Some(course.template),
            custom_css: Some(course.custom_css),
            created_at: Some(course.created_at),
            updated_at: Some(course.updated_at),
            is_free: Some(course.is_free),
            is_recommended: Some(course.is_recommended),
        }
    }
}

impl From<Section> for SectionDraft {
    fn from(section: Section) -> Self {
        Self {
            id: Some(section.id),
            title: Some(section.title),
            slug: Some(section.slug),
            lessons: Some(section.lessons.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<Lesson> for LessonDraft {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: Some(lesson.id),
            title: Some(lesson.title),
            slug: Some(lesson.slug),
            difficulty: Some(lesson.difficulty),
            estimated_time: Some(lesson.estimated_time),
            progress: Some(lesson.progress),
            steps: Some(lesson.steps.into_iter().map(Into::into).collect()),
            content: Some(lesson.content),
        }
    }
}

impl From<Step> for StepDraft {
    fn from(step: Step) -> Self {
        Self {
            title: Some(step.title),
            content: Some(step.content),
        }
    }
}
