use crate::domain::exam::Question;
use crate::domain::narration::NarrationStatus;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct QuestionRepository {
    pool: Arc<DbPool>,
}

impl QuestionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Questions of an exam in playback order
    pub async fn find_by_exam(&self, exam_id: i64) -> AppResult<Vec<Question>> {
        let pool = self.pool.as_ref();
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, exam_id, text, position, audio_file, narration_status
            FROM questions
            WHERE exam_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(exam_id)
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    pub async fn find_by_id(&self, question_id: i64) -> AppResult<Option<Question>> {
        let pool = self.pool.as_ref();
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, exam_id, text, position, audio_file, narration_status
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(pool)
        .await?;

        Ok(question)
    }

    pub async fn create(&self, exam_id: i64, text: &str, position: i32) -> AppResult<Question> {
        let pool = self.pool.as_ref();
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (exam_id, text, position)
            VALUES ($1, $2, $3)
            RETURNING id, exam_id, text, position, audio_file, narration_status
            "#,
        )
        .bind(exam_id)
        .bind(text)
        .bind(position)
        .fetch_one(pool)
        .await?;

        Ok(question)
    }

    pub async fn update(&self, question_id: i64, text: &str, position: i32) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE questions
            SET text = $1, position = $2
            WHERE id = $3
            "#,
        )
        .bind(text)
        .bind(position)
        .bind(question_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, question_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Targeted write of the narration path only
    pub async fn set_audio_file(&self, question_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE questions SET audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(question_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn set_narration_status(
        &self,
        question_id: i64,
        status: NarrationStatus,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE questions SET narration_status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(question_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
