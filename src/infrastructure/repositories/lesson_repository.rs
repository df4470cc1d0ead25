use crate::domain::course::Lesson;
use crate::domain::narration::NarrationStatus;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct LessonRepository {
    pool: Arc<DbPool>,
}

impl LessonRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn find_by_course(&self, course_id: i64) -> AppResult<Vec<Lesson>> {
        let pool = self.pool.as_ref();
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, position, audio_file, narration_status
            FROM lessons
            WHERE course_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(lessons)
    }

    pub async fn find_by_id(&self, lesson_id: i64) -> AppResult<Option<Lesson>> {
        let pool = self.pool.as_ref();
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            SELECT id, course_id, title, position, audio_file, narration_status
            FROM lessons
            WHERE id = $1
            "#,
        )
        .bind(lesson_id)
        .fetch_optional(pool)
        .await?;

        Ok(lesson)
    }

    pub async fn create(&self, course_id: i64, title: &str, position: i32) -> AppResult<Lesson> {
        let pool = self.pool.as_ref();
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"
            INSERT INTO lessons (course_id, title, position)
            VALUES ($1, $2, $3)
            RETURNING id, course_id, title, position, audio_file, narration_status
            "#,
        )
        .bind(course_id)
        .bind(title)
        .bind(position)
        .fetch_one(pool)
        .await?;

        Ok(lesson)
    }

    pub async fn update(&self, lesson_id: i64, title: &str, position: i32) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE lessons
            SET title = $1, position = $2
            WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(position)
        .bind(lesson_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, lesson_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Targeted write of the narration path only
    pub async fn set_audio_file(&self, lesson_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE lessons SET audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(lesson_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn set_narration_status(
        &self,
        lesson_id: i64,
        status: NarrationStatus,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE lessons SET narration_status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(lesson_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
