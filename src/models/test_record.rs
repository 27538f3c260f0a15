use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestRecord {
    pub id: i64,
    pub date_of_test: NaiveDate,
    pub answers_package: Option<JsonValue>,
    pub points: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTestRecord {
    pub answers_package: Option<JsonValue>,
    pub points: Option<i32>,
}

/// Partial update. The outer `Option` says whether the field is touched,
/// the inner one carries the new value (`None` clears the column).
#[derive(Debug, Clone, Default)]
pub struct TestRecordChanges {
    pub answers_package: Option<Option<JsonValue>>,
    pub points: Option<Option<i32>>,
}

impl TestRecordChanges {
    pub fn is_empty(&self) -> bool {
        self.answers_package.is_none() && self.points.is_none()
    }
}
