use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::test_record_dto::{CreateTestRecordPayload, TestResultResponse, UpdateTestRecordPayload},
    error::{Error, Result},
    models::test_record::TestRecord,
    AppState,
};

#[utoipa::path(
    get,
    path = "/tests/",
    responses(
        (status = 200, description = "All test records", body = Json<Vec<TestRecord>>)
    )
)]
#[axum::debug_handler]
pub async fn list_tests(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.test_record_service.list().await?;
    Ok(Json(records))
}

#[utoipa::path(
    post,
    path = "/tests/",
    request_body = CreateTestRecordPayload,
    responses(
        (status = 201, description = "Test record created", body = Json<TestRecord>),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_test(
    State(state): State<AppState>,
    Json(payload): Json<CreateTestRecordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let record = state.test_record_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/tests/{id}/",
    params(
        ("id" = i64, Path, description = "Test record ID")
    ),
    responses(
        (status = 200, description = "Test record", body = Json<TestRecord>),
        (status = 404, description = "Test record not found")
    )
)]
#[axum::debug_handler]
pub async fn get_test(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let record = state.test_record_service.get(id).await?;
    Ok(Json(record))
}

/// Serves both PUT and PATCH; only the fields present in the body change.
#[utoipa::path(
    patch,
    path = "/tests/{id}/",
    params(
        ("id" = i64, Path, description = "Test record ID")
    ),
    request_body = UpdateTestRecordPayload,
    responses(
        (status = 200, description = "Test record updated", body = Json<TestRecord>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Test record not found")
    )
)]
#[axum::debug_handler]
pub async fn update_test(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTestRecordPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let record = state.test_record_service.update(id, payload.into()).await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/tests/{id}/",
    params(
        ("id" = i64, Path, description = "Test record ID")
    ),
    responses(
        (status = 204, description = "Test record deleted"),
        (status = 404, description = "Test record not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_test(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    if state.test_record_service.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound(format!("Test record {} not found", id)))
    }
}

#[utoipa::path(
    get,
    path = "/tests/{id}/result/",
    params(
        ("id" = i64, Path, description = "Test record ID")
    ),
    responses(
        (status = 200, description = "Score and its interpretation", body = Json<TestResultResponse>),
        (status = 404, description = "Test record not found")
    )
)]
#[axum::debug_handler]
pub async fn get_test_result(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let record = state.test_record_service.get(id).await?;
    Ok(Json(TestResultResponse::from(&record)))
}
