//! Automatic score suggestion for a submitted answers package and the
//! interpretation of a final score.
//!
//! The suggestion is a starting point for the operator, who sets `points`
//! by hand. The clock drawing (question 9) is never scored automatically.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

const ORIENTATION_WORDS: [&str; 6] = ["дата", "месяц", "год", "день", "город", "учреждение"];
const MEMORY_WORDS: [&str; 5] = ["лист", "церковь", "цветок", "перо", "красный"];
const ANIMALS: [&str; 3] = ["лев", "носорог", "верблюд"];
const FORWARD_DIGITS: &str = "582";
const BACKWARD_DIGITS: &str = "741";
const REPEATED_PHRASE: &str = "никаких если, и или но";
const MAX_TAPS: usize = 6;
const MAX_ANIMALS: usize = 2;

pub const NORMAL_MIN: i32 = 26;
pub const MILD_MIN: i32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Normal,
    MildImpairment,
    PronouncedImpairment,
}

pub fn interpret(points: i32) -> Band {
    if points >= NORMAL_MIN {
        Band::Normal
    } else if points >= MILD_MIN {
        Band::MildImpairment
    } else {
        Band::PronouncedImpairment
    }
}

pub fn suggest_points(package: Option<&JsonValue>) -> i32 {
    let Some(answers) = package.and_then(JsonValue::as_object) else {
        return 0;
    };
    let text = |key: &str| answer_text(answers.get(key)).map(str::to_lowercase);

    let mut score = 0;

    if let Some(ans) = text("1") {
        score += count_present(&ans, &ORIENTATION_WORDS);
    }
    if let Some(ans) = text("2") {
        score += count_present(&ans, &MEMORY_WORDS);
    }
    if text("3").is_some_and(|ans| digits(&ans) == FORWARD_DIGITS) {
        score += 3;
    }
    if text("4").is_some_and(|ans| digits(&ans) == BACKWARD_DIGITS) {
        score += 3;
    }
    if let Some(ans) = text("5") {
        score += ans.matches("tap").count().min(MAX_TAPS);
    }
    if text("6").is_some_and(|ans| ans.contains(REPEATED_PHRASE)) {
        score += 1;
    }
    if let Some(value) = answers.get("7") {
        let found: usize = string_values(value)
            .iter()
            .map(|s| count_present(&s.to_lowercase(), &ANIMALS))
            .sum();
        score += found.min(MAX_ANIMALS);
    }
    if text("8").is_some_and(|ans| ans.contains("фрук")) {
        score += 2;
    }
    if let Some(ans) = text("10") {
        score += count_present(&ans, &MEMORY_WORDS);
    }
    if text("11").is_some_and(|ans| ans.chars().any(|c| c.is_ascii_digit())) {
        score += 1;
    }

    i32::try_from(score).unwrap_or(i32::MAX)
}

/// Text of an answer: the string itself, or the `answer` string of a
/// recorded answer mapping. Empty answers count as missing.
fn answer_text(value: Option<&JsonValue>) -> Option<&str> {
    let text = match value? {
        JsonValue::String(s) => s.as_str(),
        JsonValue::Object(map) => map.get("answer")?.as_str()?,
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn string_values(value: &JsonValue) -> Vec<&str> {
    match value {
        JsonValue::String(s) => vec![s.as_str()],
        JsonValue::Object(map) => map.values().filter_map(JsonValue::as_str).collect(),
        JsonValue::Array(items) => items.iter().filter_map(JsonValue::as_str).collect(),
        _ => Vec::new(),
    }
}

fn count_present(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}

fn digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
