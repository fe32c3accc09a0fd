//! Pulls structured payloads out of free-form model output.
//!
//! Models wrap JSON in prose and code fences, so extraction is tolerant and
//! a malformed payload degrades to a placeholder instead of failing the
//! request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::models::domain::{Flashcard, QuizQuestion};

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^```(?:json)?|```$").expect("CODE_FENCE is a valid regex"));

// Greedy: runs from the first opening bracket to the last closing one.
static BRACKETED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(\[.*\]|\{.*\})").expect("BRACKETED_SPAN is a valid regex"));

pub const FLASHCARDS_PARSE_ERROR: &str =
    "Could not parse flashcards JSON. Check the model output.";
pub const QUIZ_PARSE_ERROR: &str = "Could not parse quiz JSON. Check the model output.";

/// Strips code fences and returns the first bracketed span. Without one,
/// the fence-stripped text comes back trimmed.
pub fn extract_structured(raw_text: &str) -> String {
    let stripped = CODE_FENCE.replace_all(raw_text.trim(), "");
    let stripped = stripped.trim();

    match BRACKETED_SPAN.captures(stripped).and_then(|c| c.get(1)) {
        Some(span) => span.as_str().to_string(),
        None => stripped.to_string(),
    }
}

/// Extracts and decodes a JSON payload.
pub fn parse_structured<T: DeserializeOwned>(raw_text: &str) -> Result<T, serde_json::Error> {
    let span = extract_structured(raw_text);
    serde_json::from_str(&span)
}

pub fn parse_flashcards(raw_text: &str) -> Vec<Flashcard> {
    match parse_structured::<Vec<Flashcard>>(raw_text) {
        Ok(cards) => cards,
        Err(e) => {
            log::error!("{} ({})", FLASHCARDS_PARSE_ERROR, e);
            flashcards_placeholder()
        }
    }
}

pub fn parse_quiz(raw_text: &str) -> Vec<QuizQuestion> {
    match parse_structured::<Vec<QuizQuestion>>(raw_text) {
        Ok(questions) => questions,
        Err(e) => {
            log::error!("{} ({})", QUIZ_PARSE_ERROR, e);
            quiz_placeholder()
        }
    }
}

pub fn flashcards_placeholder() -> Vec<Flashcard> {
    vec![Flashcard {
        front: "Parsing Error".to_string(),
        back: FLASHCARDS_PARSE_ERROR.to_string(),
    }]
}

pub fn quiz_placeholder() -> Vec<QuizQuestion> {
    vec![QuizQuestion {
        question_text: "Parsing Error".to_string(),
        options: vec!["Error".to_string(); 4],
        answer: "Error".to_string(),
    }]
}
