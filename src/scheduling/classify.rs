//! Event classification from title and description text.

use std::sync::LazyLock;

use regex::Regex;

use super::types::EventCategory;

static EXAM_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(exam|test|midterm|final|quiz)\b").unwrap()
});

static HOMEWORK_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(homework|assignment|problem set|exercise)\b").unwrap()
});

static PROJECT_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(project|presentation|paper|essay|report)\b").unwrap()
});

/// Classify an event from its title and description.
///
/// Whole-word keyword matching over the lower-cased concatenation of both
/// fields; exam keywords take precedence over homework, which takes
/// precedence over project.
pub fn classify(title: &str, description: Option<&str>) -> EventCategory {
    let text = match description {
        Some(desc) => format!("{title} {desc}").to_lowercase(),
        None => title.to_lowercase(),
    };

    if EXAM_WORDS.is_match(&text) {
        EventCategory::Exam
    } else if HOMEWORK_WORDS.is_match(&text) {
        EventCategory::Homework
    } else if PROJECT_WORDS.is_match(&text) {
        EventCategory::Project
    } else {
        EventCategory::General
    }
}
