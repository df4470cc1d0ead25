use crate::domain::exam::StudentResponse;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

/// Student answers are append-only: there is no update path.
pub struct ResponseRepository {
    pool: Arc<DbPool>,
}

impl ResponseRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        student_id: i64,
        question_id: i64,
        audio_answer: &str,
    ) -> AppResult<StudentResponse> {
        let pool = self.pool.as_ref();
        let response = sqlx::query_as::<_, StudentResponse>(
            r#"
            INSERT INTO student_responses (student_id, question_id, audio_answer)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, question_id, audio_answer, submitted_at
            "#,
        )
        .bind(student_id)
        .bind(question_id)
        .bind(audio_answer)
        .fetch_one(pool)
        .await?;

        Ok(response)
    }

    pub async fn find_by_question(&self, question_id: i64) -> AppResult<Vec<StudentResponse>> {
        let pool = self.pool.as_ref();
        let responses = sqlx::query_as::<_, StudentResponse>(
            r#"
            SELECT id, student_id, question_id, audio_answer, submitted_at
            FROM student_responses
            WHERE question_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(question_id)
        .fetch_all(pool)
        .await?;

        Ok(responses)
    }
}
