use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::test_record::TestRecord;
use crate::services::answer_codec::{self, AnswerSource, FieldInitial};
use crate::services::{media_service, scoring_service};

/// Urlencoded body of the admin add/change form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdminTestForm {
    #[validate(required, length(min = 1))]
    pub points: Option<String>,
    pub answer_1: Option<String>,
    pub answer_3: Option<String>,
    pub answer_4: Option<String>,
    pub answer_5: Option<String>,
    pub answer_6: Option<String>,
    pub answer_7: Option<String>,
    pub answer_8: Option<String>,
    pub answer_10: Option<String>,
    pub answer_11: Option<String>,
}

impl AdminTestForm {
    pub fn points(&self) -> Result<i32> {
        let raw = self.points.as_deref().unwrap_or_default().trim();
        raw.parse()
            .map_err(|_| Error::BadRequest(format!("points: '{}' is not a whole number", raw)))
    }
}

impl AnswerSource for AdminTestForm {
    fn answer(&self, name: &str) -> Option<&str> {
        let value = match name {
            "answer_1" => &self.answer_1,
            "answer_3" => &self.answer_3,
            "answer_4" => &self.answer_4,
            "answer_5" => &self.answer_5,
            "answer_6" => &self.answer_6,
            "answer_7" => &self.answer_7,
            "answer_8" => &self.answer_8,
            "answer_10" => &self.answer_10,
            "answer_11" => &self.answer_11,
            _ => return None,
        };
        value.as_deref()
    }
}

/// One row of the admin list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminTestRow {
    pub id: i64,
    pub date_of_test: NaiveDate,
    pub points: Option<i32>,
    pub image_preview: String,
    pub audio_player: String,
}

impl From<&TestRecord> for AdminTestRow {
    fn from(record: &TestRecord) -> Self {
        let package = record.answers_package.as_ref();
        Self {
            id: record.id,
            date_of_test: record.date_of_test,
            points: record.points,
            image_preview: media_service::image_preview(package),
            audio_player: media_service::audio_player(package),
        }
    }
}

/// Admin change view: the editable fields with their initial values and
/// read-only media previews.
#[derive(Debug, Clone, Serialize)]
pub struct AdminTestEditView {
    pub id: i64,
    pub date_of_test: NaiveDate,
    pub points: Option<i32>,
    pub fields: Vec<FieldInitial>,
    pub image_preview: String,
    pub audio_player: String,
    pub suggested_points: i32,
}

impl From<&TestRecord> for AdminTestEditView {
    fn from(record: &TestRecord) -> Self {
        let package = record.answers_package.as_ref();
        Self {
            id: record.id,
            date_of_test: record.date_of_test,
            points: record.points,
            fields: answer_codec::decode(package),
            image_preview: media_service::image_preview(package),
            audio_player: media_service::audio_player(package),
            suggested_points: scoring_service::suggest_points(package),
        }
    }
}
