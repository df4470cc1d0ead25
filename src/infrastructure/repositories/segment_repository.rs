use crate::domain::course::{LessonSegment, SegmentKind};
use crate::domain::narration::NarrationStatus;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct SegmentRepository {
    pool: Arc<DbPool>,
}

impl SegmentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Segments of a lesson in playback order
    pub async fn find_by_lesson(&self, lesson_id: i64) -> AppResult<Vec<LessonSegment>> {
        let pool = self.pool.as_ref();
        let segments = sqlx::query_as::<_, LessonSegment>(
            r#"
            SELECT id, lesson_id, position, kind, text, error_text, key_label,
                   audio_file, error_audio_file, narration_status
            FROM lesson_segments
            WHERE lesson_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(lesson_id)
        .fetch_all(pool)
        .await?;

        Ok(segments)
    }

    pub async fn find_by_id(&self, segment_id: i64) -> AppResult<Option<LessonSegment>> {
        let pool = self.pool.as_ref();
        let segment = sqlx::query_as::<_, LessonSegment>(
            r#"
            SELECT id, lesson_id, position, kind, text, error_text, key_label,
                   audio_file, error_audio_file, narration_status
            FROM lesson_segments
            WHERE id = $1
            "#,
        )
        .bind(segment_id)
        .fetch_optional(pool)
        .await?;

        Ok(segment)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        lesson_id: i64,
        position: i32,
        kind: SegmentKind,
        text: &str,
        error_text: Option<&str>,
        key_label: Option<&str>,
    ) -> AppResult<LessonSegment> {
        let pool = self.pool.as_ref();
        let segment = sqlx::query_as::<_, LessonSegment>(
            r#"
            INSERT INTO lesson_segments (lesson_id, position, kind, text, error_text, key_label)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, lesson_id, position, kind, text, error_text, key_label,
                      audio_file, error_audio_file, narration_status
            "#,
        )
        .bind(lesson_id)
        .bind(position)
        .bind(kind.to_string())
        .bind(text)
        .bind(error_text)
        .bind(key_label)
        .fetch_one(pool)
        .await?;

        Ok(segment)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        segment_id: i64,
        position: i32,
        kind: SegmentKind,
        text: &str,
        error_text: Option<&str>,
        key_label: Option<&str>,
    ) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE lesson_segments
            SET position = $1, kind = $2, text = $3, error_text = $4, key_label = $5
            WHERE id = $6
            "#,
        )
        .bind(position)
        .bind(kind.to_string())
        .bind(text)
        .bind(error_text)
        .bind(key_label)
        .bind(segment_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, segment_id: i64) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM lesson_segments WHERE id = $1")
            .bind(segment_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Targeted write of the main narration path only
    pub async fn set_audio_file(&self, segment_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE lesson_segments SET audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(segment_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Targeted write of the error prompt narration path only
    pub async fn set_error_audio_file(&self, segment_id: i64, path: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE lesson_segments SET error_audio_file = $1 WHERE id = $2")
            .bind(path)
            .bind(segment_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn set_narration_status(
        &self,
        segment_id: i64,
        status: NarrationStatus,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE lesson_segments SET narration_status = $1 WHERE id = $2")
            .bind(status.to_string())
            .bind(segment_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
