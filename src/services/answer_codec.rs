//! Mapping between the admin edit form (one text field per question) and
//! the stored answers package (a JSON object keyed by question number).
//!
//! Both directions walk [`ANSWER_FIELDS`], so a question added there is
//! decoded and encoded the same way.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeRule {
    /// Initial value is the stored JSON value as is.
    Raw,
    /// Non-string values are shown as their JSON text.
    Stringify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerField {
    pub key: &'static str,
    pub name: &'static str,
    pub label: &'static str,
    pub decode: DecodeRule,
}

const fn field(key: &'static str, name: &'static str, label: &'static str, decode: DecodeRule) -> AnswerField {
    AnswerField {
        key,
        name,
        label,
        decode,
    }
}

/// Editable questions in form order. "2" is unused and "9" holds the
/// drawing, which only the client writes.
pub const ANSWER_FIELDS: [AnswerField; 9] = [
    field("1", "answer_1", "1", DecodeRule::Raw),
    field("3", "answer_3", "3", DecodeRule::Raw),
    field("4", "answer_4", "4", DecodeRule::Raw),
    field("5", "answer_5", "5", DecodeRule::Raw),
    field("6", "answer_6", "6", DecodeRule::Raw),
    field("7", "answer_7", "7 (JSON)", DecodeRule::Stringify),
    field("8", "answer_8", "8", DecodeRule::Raw),
    field("10", "answer_10", "10", DecodeRule::Raw),
    field("11", "answer_11", "11", DecodeRule::Raw),
];

/// What the admin form does with keys it does not edit when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// The saved package holds only the editable keys.
    #[default]
    Replace,
    /// Editable keys are overlaid on the stored package.
    Merge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldInitial {
    pub name: &'static str,
    pub label: &'static str,
    pub value: JsonValue,
    pub display: String,
}

/// Source of submitted form values, looked up by field name.
pub trait AnswerSource {
    fn answer(&self, name: &str) -> Option<&str>;
}

impl AnswerSource for HashMap<String, String> {
    fn answer(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

pub fn decode(package: Option<&JsonValue>) -> Vec<FieldInitial> {
    let stored = package.and_then(JsonValue::as_object);

    ANSWER_FIELDS
        .iter()
        .map(|f| {
            let raw = stored
                .and_then(|m| m.get(f.key))
                .filter(|v| !v.is_null());
            let value = match (raw, f.decode) {
                (None, _) => JsonValue::String(String::new()),
                (Some(v), DecodeRule::Raw) => v.clone(),
                (Some(v), DecodeRule::Stringify) => JsonValue::String(display_text(v)),
            };
            FieldInitial {
                name: f.name,
                label: f.label,
                display: display_text(&value),
                value,
            }
        })
        .collect()
}

pub fn encode(edits: &impl AnswerSource) -> JsonValue {
    JsonValue::Object(encoded_entries(edits))
}

pub fn merge(existing: Option<&JsonValue>, edits: &impl AnswerSource) -> JsonValue {
    let mut package = existing
        .and_then(JsonValue::as_object)
        .cloned()
        .unwrap_or_default();
    package.extend(encoded_entries(edits));
    JsonValue::Object(package)
}

pub fn apply(mode: SaveMode, existing: Option<&JsonValue>, edits: &impl AnswerSource) -> JsonValue {
    match mode {
        SaveMode::Replace => encode(edits),
        SaveMode::Merge => merge(existing, edits),
    }
}

fn encoded_entries(edits: &impl AnswerSource) -> Map<String, JsonValue> {
    ANSWER_FIELDS
        .iter()
        .map(|f| {
            let value = edits.answer(f.name).unwrap_or_default();
            (f.key.to_string(), JsonValue::String(value.to_string()))
        })
        .collect()
}

fn display_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edits(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn displays(fields: &[FieldInitial]) -> Vec<(&'static str, String)> {
        fields.iter().map(|f| (f.name, f.display.clone())).collect()
    }

    #[test]
    fn null_package_decodes_to_empty_strings() {
        let fields = decode(None);
        assert_eq!(fields.len(), 9);
        assert!(fields.iter().all(|f| f.value == json!("") && f.display.is_empty()));

        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "answer_1", "answer_3", "answer_4", "answer_5", "answer_6", "answer_7",
                "answer_8", "answer_10", "answer_11"
            ]
        );
    }

    #[test]
    fn non_object_package_decodes_like_null() {
        let fields = decode(Some(&json!(["unexpected"])));
        assert!(fields.iter().all(|f| f.display.is_empty()));
    }

    #[test]
    fn question_seven_is_always_a_string() {
        let package = json!({ "7": { "0": "лев", "1": "верблюд" } });
        let seven = decode(Some(&package))
            .into_iter()
            .find(|f| f.name == "answer_7")
            .unwrap();
        assert_eq!(seven.value, json!(r#"{"0":"лев","1":"верблюд"}"#));

        let package = json!({ "7": 42 });
        let seven = decode(Some(&package))
            .into_iter()
            .find(|f| f.name == "answer_7")
            .unwrap();
        assert_eq!(seven.value, json!("42"));
    }

    #[test]
    fn audio_answers_keep_their_stored_shape() {
        let package = json!({
            "5": { "answer": "tap", "audio": "/media/audio/a.webm" },
            "6": "legacy text",
        });
        let fields = decode(Some(&package));
        let five = fields.iter().find(|f| f.name == "answer_5").unwrap();
        let six = fields.iter().find(|f| f.name == "answer_6").unwrap();

        assert_eq!(five.value, json!({ "answer": "tap", "audio": "/media/audio/a.webm" }));
        assert!(five.display.contains("/media/audio/a.webm"));
        assert_eq!(six.value, json!("legacy text"));
    }

    #[test]
    fn encode_writes_exactly_the_editable_keys() {
        let package = encode(&edits(&[("answer_1", "  среда "), ("answer_7", "{\"0\":\"лев\"}")]));
        let object = package.as_object().unwrap();

        assert_eq!(object.len(), 9);
        assert_eq!(object["1"], json!("  среда "));
        assert_eq!(object["7"], json!("{\"0\":\"лев\"}"));
        assert_eq!(object["11"], json!(""));
        assert!(!object.contains_key("2"));
        assert!(!object.contains_key("9"));
    }

    #[test]
    fn decode_after_encode_returns_the_edits() {
        let submitted = edits(&[
            ("answer_1", "понедельник"),
            ("answer_3", "5-8-2"),
            ("answer_4", "1 4 7"),
            ("answer_5", "tap tap tap"),
            ("answer_6", ""),
            ("answer_7", "[1, 2]"),
            ("answer_8", "фрукты"),
            ("answer_10", "лист перо"),
            ("answer_11", "3"),
        ]);
        let decoded = decode(Some(&encode(&submitted)));

        for (name, display) in displays(&decoded) {
            assert_eq!(submitted[name], display, "field {name}");
        }
    }

    #[test]
    fn replace_drops_the_drawing_and_unused_keys() {
        let stored = json!({
            "2": "лист церковь",
            "9": "data:image/png;base64,iVBORw0KGgo=",
            "1": "old",
        });
        let saved = apply(SaveMode::Replace, Some(&stored), &edits(&[("answer_1", "new")]));
        let object = saved.as_object().unwrap();

        assert_eq!(object["1"], json!("new"));
        assert!(!object.contains_key("2"));
        assert!(!object.contains_key("9"));
    }

    #[test]
    fn merge_keeps_keys_the_form_does_not_edit() {
        let stored = json!({
            "2": "лист церковь",
            "9": "data:image/png;base64,iVBORw0KGgo=",
            "1": "old",
        });
        let saved = apply(SaveMode::Merge, Some(&stored), &edits(&[("answer_1", "new")]));
        let object = saved.as_object().unwrap();

        assert_eq!(object.len(), 11);
        assert_eq!(object["1"], json!("new"));
        assert_eq!(object["2"], json!("лист церковь"));
        assert_eq!(object["9"], json!("data:image/png;base64,iVBORw0KGgo="));
    }

    #[test]
    fn merge_onto_nothing_equals_encode() {
        let submitted = edits(&[("answer_8", "фрукты")]);
        assert_eq!(merge(None, &submitted), encode(&submitted));
    }
}
