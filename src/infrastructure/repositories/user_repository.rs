use crate::domain::user::User;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// First provisioned user; anonymous answer submissions fall back to it.
    pub async fn find_first(&self) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC LIMIT 1")
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    pub async fn create_admin(
        &self,
        username: &str,
        email: Option<&str>,
        password_hash: &str,
    ) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, is_admin)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, username, email, password_hash, is_admin, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
