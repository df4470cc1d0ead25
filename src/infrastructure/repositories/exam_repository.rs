use crate::domain::exam::Exam;
use crate::domain::narration::NarrationStatus;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct ExamRepository {
    pool: Arc<DbPool>,
}

impl ExamRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Exam>> {
        let pool = self.pool.as_ref();
        let exams = sqlx::query_as::<_, Exam>(
            r#"
            SELECT id, title, description, created_at, audio_file, short_audio, narration_status
            FROM exams
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(exams)
    }

    pub async fn find_by_id(&self, exam_id: i64) -> AppResult<Option<Exam>> {
        let pool = self.pool.as_ref();
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            SELECT id, title, description, created_at, audio_file, short_audio, narration_status
            FROM exams
            WHERE id = $1
            "#,
        )
        .bind(exam_id)
        .fetch_optional(pool)
        .await?;

        Ok(exam)
    }

    pub async fn create(&self, title: &str, description: &str) -> AppResult<Exam> {
        let pool = self.pool.as_ref();
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at, audio_file, short_audio, narration_status
            "#,
        )
        .bind(title)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(exam)
    }

    /// Full-record update of the user-editable fields
    pub async fn update(&self, exam_id: i64, title: &str, description: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE exams
            SET title = $1, description = $2
            WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(exam_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, exam_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(exam_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Targeted write of the welcome narration path only
    pub async fn set_audio_file(&self, exam_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE exams SET audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(exam_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Targeted write of the listing narration path only
    pub async fn set_short_audio(&self, exam_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE exams SET short_audio = $1 WHERE id = $2")
            .bind(path)
            .bind(exam_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn set_narration_status(
        &self,
        exam_id: i64,
        status: NarrationStatus,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE exams SET narration_status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(exam_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
