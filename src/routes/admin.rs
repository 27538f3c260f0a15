use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Form,
};
use validator::Validate;

use crate::{
    dto::admin_dto::{AdminTestEditView, AdminTestForm, AdminTestRow},
    error::Result,
    models::test_record::{NewTestRecord, TestRecordChanges},
    services::answer_codec,
    AppState,
};

#[axum::debug_handler]
pub async fn list_rows(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.test_record_service.list().await?;
    let rows: Vec<AdminTestRow> = records.iter().map(AdminTestRow::from).collect();
    Ok(Json(rows))
}

#[axum::debug_handler]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let record = state.test_record_service.get(id).await?;
    Ok(Json(AdminTestEditView::from(&record)))
}

#[axum::debug_handler]
pub async fn add_test(
    State(state): State<AppState>,
    Form(form): Form<AdminTestForm>,
) -> Result<impl IntoResponse> {
    form.validate()?;
    let points = form.points()?;

    let record = state
        .test_record_service
        .create(NewTestRecord {
            answers_package: Some(answer_codec::encode(&form)),
            points: Some(points),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AdminTestEditView::from(&record))))
}

/// Saves the change form. Depending on the configured save mode the stored
/// package is replaced by the editable keys or merged with them.
#[axum::debug_handler]
pub async fn save_test(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AdminTestForm>,
) -> Result<impl IntoResponse> {
    form.validate()?;
    let points = form.points()?;

    let existing = state.test_record_service.get(id).await?;
    let package = answer_codec::apply(
        state.config.admin_save_mode,
        existing.answers_package.as_ref(),
        &form,
    );

    let record = state
        .test_record_service
        .update(
            id,
            TestRecordChanges {
                answers_package: Some(Some(package)),
                points: Some(Some(points)),
            },
        )
        .await?;

    Ok(Json(AdminTestEditView::from(&record)))
}
