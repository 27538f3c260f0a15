//! HTML previews of media embedded in an answers package, as shown in the
//! admin list and edit views.

use serde_json::Value as JsonValue;

use crate::utils::html::escape;

pub const IMAGE_KEY: &str = "9";
pub const AUDIO_KEYS: [&str; 2] = ["5", "6"];

pub const IMAGE_DATA_URI_PREFIX: &str = "data:image";
pub const NO_IMAGE: &str = "No image";
pub const NO_AUDIO: &str = "No audio recording";

pub fn image_preview(package: Option<&JsonValue>) -> String {
    match answer(package, IMAGE_KEY).and_then(JsonValue::as_str) {
        Some(data) if data.starts_with(IMAGE_DATA_URI_PREFIX) => format!(
            r#"<img src="{}" style="max-height:200px; max-width: 100%;" />"#,
            escape(data)
        ),
        _ => NO_IMAGE.to_string(),
    }
}

pub fn audio_player(package: Option<&JsonValue>) -> String {
    let players: Vec<String> = AUDIO_KEYS
        .iter()
        .filter_map(|key| audio_path(answer(package, key)))
        .map(audio_element)
        .collect();

    if players.is_empty() {
        NO_AUDIO.to_string()
    } else {
        players.concat()
    }
}

/// Path of a recorded answer, i.e. a non-empty `audio` string inside a
/// mapping. Plain string answers carry no recording.
pub fn audio_path(value: Option<&JsonValue>) -> Option<&str> {
    value?
        .as_object()?
        .get("audio")?
        .as_str()
        .filter(|path| !path.is_empty())
}

fn answer<'a>(package: Option<&'a JsonValue>, key: &str) -> Option<&'a JsonValue> {
    package?.as_object()?.get(key)
}

fn audio_element(path: &str) -> String {
    format!(
        "<audio controls style=\"width: 300px;\">\n  \
         <source src=\"{}\" type=\"audio/webm\">\n  \
         Your browser does not support audio.\n</audio>",
        escape(path)
    )
}
