use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::{Validate, ValidationErrors};

use crate::models::test_record::{NewTestRecord, TestRecord, TestRecordChanges};
use crate::services::scoring_service::{interpret, Band};
use crate::utils::validation::{deserialize_present, validate_answers_package};

/// Body of `POST /tests/`. `id` and `date_of_test` are assigned by the
/// server and ignored when sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTestRecordPayload {
    #[serde(default)]
    pub answers_package: Option<JsonValue>,
    #[serde(default)]
    pub points: Option<i32>,
}

/// Body of `PUT`/`PATCH /tests/{id}/`. Absent fields stay as they are, an
/// explicit `null` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTestRecordPayload {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub answers_package: Option<Option<JsonValue>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub points: Option<Option<i32>>,
}

impl Validate for CreateTestRecordPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        package_errors(self.answers_package.as_ref())
    }
}

impl Validate for UpdateTestRecordPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        package_errors(self.answers_package.as_ref().and_then(Option::as_ref))
    }
}

fn package_errors(package: Option<&JsonValue>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Some(Err(err)) = package.map(validate_answers_package) {
        errors.add("answers_package", err);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl From<CreateTestRecordPayload> for NewTestRecord {
    fn from(payload: CreateTestRecordPayload) -> Self {
        Self {
            answers_package: payload.answers_package,
            points: payload.points,
        }
    }
}

impl From<UpdateTestRecordPayload> for TestRecordChanges {
    fn from(payload: UpdateTestRecordPayload) -> Self {
        Self {
            answers_package: payload.answers_package,
            points: payload.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultResponse {
    pub test_id: i64,
    pub date_of_test: NaiveDate,
    pub points: Option<i32>,
    pub band: Option<Band>,
}

impl From<&TestRecord> for TestResultResponse {
    fn from(record: &TestRecord) -> Self {
        Self {
            test_id: record.id,
            date_of_test: record.date_of_test,
            points: record.points,
            band: record.points.map(interpret),
        }
    }
}
