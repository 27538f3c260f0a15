use chrono::{NaiveDate, Utc};

/// Calendar date (UTC) used to stamp new records.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
