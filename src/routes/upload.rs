use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    services::storage_service::base_name,
    AppState,
};

pub const AUDIO_FIELD: &str = "audio";
pub const AUDIO_DIR: &str = "audio";

#[derive(Debug, Serialize, Deserialize)]
pub struct AudioUploadResponse {
    pub audio_path: String,
}

/// Stores the `audio` file part as is. No type or size checks beyond the
/// global body limit.
#[axum::debug_handler]
pub async fn upload_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    while let Some(field) = multipart.next_field().await.map_err(Error::Multipart)? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(|name| base_name(name).to_string()) else {
            continue;
        };
        let data = field.bytes().await.map_err(Error::Multipart)?;

        let stored = state
            .storage
            .save(&format!("{}/{}", AUDIO_DIR, file_name), data)
            .await?;
        let audio_path = state.storage.url(&stored);
        tracing::info!(%audio_path, "Audio uploaded");

        return Ok(Json(AudioUploadResponse { audio_path }));
    }

    tracing::error!("Audio upload without an '{}' file part", AUDIO_FIELD);
    Err(Error::Internal(format!(
        "multipart file part '{}' is missing",
        AUDIO_FIELD
    )))
}
