use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use validator::ValidationError;

pub fn validate_answers_package(value: &JsonValue) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        let mut err = ValidationError::new("answers_package_not_object");
        err.message = Some("answers_package must be a JSON object or null".into());
        Err(err)
    }
}

/// Lets `Option<Option<T>>` tell an absent field (`None`) from an explicit
/// `null` (`Some(None)`). Use with `#[serde(default)]`.
pub fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
