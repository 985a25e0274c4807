use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Default estimated time of a lesson, in minutes.
pub const DEFAULT_ESTIMATED_TIME: u32 = 15;

/// Audience level, used both for a course's category and a lesson's difficulty.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three fixed page themes. Themes only change the injected CSS.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Academic,
    Modern,
    Minimal,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Academic, Template::Modern, Template::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Academic => "academic",
            Template::Modern => "modern",
            Template::Minimal => "minimal",
        }
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-defaulted course document.
///
/// Values of this type are produced by [`crate::export::json::normalize`] and are
/// what every exporter reads; no field is ever missing. Field order is the key
/// order of the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: Level,
    pub author: String,
    /// Tags in first-seen order, without duplicates.
    pub tags: Vec<String>,
    pub sections: Vec<Section>,
    pub template: Template,
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_free: bool,
    pub is_recommended: bool,
}

impl Course {
    /// All lessons in document order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.sections.iter().flat_map(|section| section.lessons.iter())
    }

    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(|section| section.lessons.len()).sum()
    }

    /// Sum of the estimated time of every lesson, in minutes.
    pub fn total_minutes(&self) -> u64 {
        self.lessons()
            .map(|lesson| u64::from(lesson.estimated_time))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Lessons in authoring order. The order is carried into every export.
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub difficulty: Level,
    /// Minutes, always positive.
    pub estimated_time: u32,
    /// Completion percentage in `0..=100`.
    pub progress: u8,
    pub steps: Vec<Step>,
    /// Legacy Markdown body, only rendered when `steps` is empty.
    pub content: String,
}

impl Lesson {
    pub fn body(&self) -> LessonBody<'_> {
        if self.steps.is_empty() {
            LessonBody::Legacy(&self.content)
        } else {
            LessonBody::Steps(&self.steps)
        }
    }
}

/// The source a lesson page is rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonBody<'a> {
    Steps(&'a [Step]),
    Legacy(&'a str),
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    /// HTML fragment, opaque apart from formatting.
    pub content: String,
}
