use crate::domain::course::Course;
use crate::domain::narration::NarrationStatus;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct CourseRepository {
    pool: Arc<DbPool>,
}

impl CourseRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Course>> {
        let pool = self.pool.as_ref();
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, icon, created_at, audio_file, narration_status
            FROM courses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(courses)
    }

    pub async fn find_by_id(&self, course_id: i64) -> AppResult<Option<Course>> {
        let pool = self.pool.as_ref();
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, icon, created_at, audio_file, narration_status
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

        Ok(course)
    }

    pub async fn create(&self, title: &str, description: &str) -> AppResult<Course> {
        let pool = self.pool.as_ref();
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, icon, created_at, audio_file, narration_status
            "#,
        )
        .bind(title)
        .bind(description)
        .fetch_one(pool)
        .await?;

        Ok(course)
    }

    pub async fn update(&self, course_id: i64, title: &str, description: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET title = $1, description = $2
            WHERE id = $3
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(course_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, course_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Targeted write of the icon path only
    pub async fn set_icon(&self, course_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE courses SET icon = $1 WHERE id = $2")
            .bind(path)
            .bind(course_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Targeted write of the intro narration path only
    pub async fn set_audio_file(&self, course_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE courses SET audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(course_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn set_narration_status(
        &self,
        course_id: i64,
        status: NarrationStatus,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE courses SET narration_status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(course_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
