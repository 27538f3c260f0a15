use sqlx::PgPool;

use crate::error::Result;
use crate::models::test_record::{NewTestRecord, TestRecord, TestRecordChanges};
use crate::utils::time::today;

#[derive(Clone)]
pub struct TestRecordService {
    pool: PgPool,
}

impl TestRecordService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, record: NewTestRecord) -> Result<TestRecord> {
        let created = sqlx::query_as::<_, TestRecord>(
            r#"
            INSERT INTO test (date_of_test, answers_package, points)
            VALUES ($1, $2, $3)
            RETURNING id, date_of_test, answers_package, points
            "#,
        )
        .bind(today())
        .bind(record.answers_package)
        .bind(record.points)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(test_id = created.id, "Test record created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<TestRecord> {
        let record = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, date_of_test, answers_package, points
            FROM test
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<TestRecord>> {
        let records = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, date_of_test, answers_package, points
            FROM test
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Applies only the touched fields. `date_of_test` never changes.
    pub async fn update(&self, id: i64, changes: TestRecordChanges) -> Result<TestRecord> {
        if changes.is_empty() {
            return self.get(id).await;
        }

        let set_package = changes.answers_package.is_some();
        let set_points = changes.points.is_some();

        let updated = sqlx::query_as::<_, TestRecord>(
            r#"
            UPDATE test
            SET
                answers_package = CASE WHEN $1 THEN $2 ELSE answers_package END,
                points = CASE WHEN $3 THEN $4 ELSE points END
            WHERE id = $5
            RETURNING id, date_of_test, answers_package, points
            "#,
        )
        .bind(set_package)
        .bind(changes.answers_package.flatten())
        .bind(set_points)
        .bind(changes.points.flatten())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(test_id = id, set_package, set_points, "Test record updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM test WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(test_id = id, "Test record deleted");
        }
        Ok(deleted)
    }
}
