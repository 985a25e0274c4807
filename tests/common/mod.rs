// Each test binary only uses part of these helpers.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use coursebook::model::{CourseDraft, Defaults, LessonDraft, SectionDraft, StepDraft};
use std::path::PathBuf;

pub fn test_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn defaults() -> Defaults {
    Defaults::at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

pub fn step(title: &str, content: &str) -> StepDraft {
    StepDraft {
        title: Some(String::from(title)),
        content: Some(String::from(content)),
    }
}

pub fn lesson(title: &str, steps: Vec<StepDraft>) -> LessonDraft {
    LessonDraft {
        title: Some(String::from(title)),
        steps: Some(steps),
        ..Default::default()
    }
}

pub fn section(title: &str, lessons: Vec<LessonDraft>) -> SectionDraft {
    SectionDraft {
        title: Some(String::from(title)),
        lessons: Some(lessons),
        ..Default::default()
    }
}

/// One section holding a single two-step lesson.
pub fn demo() -> CourseDraft {
    CourseDraft {
        title: Some(String::from("Demo")),
        sections: Some(vec![section(
            "Basics",
            vec![lesson(
                "Intro",
                vec![step("A", "<p>Step A</p>"), step("B", "<p>Step B</p>")],
            )],
        )]),
        ..Default::default()
    }
}
