//! Idempotent admin provisioning. Reads ADMIN_USERNAME, ADMIN_EMAIL and
//! ADMIN_PASSWORD from the environment and creates the admin account if it
//! does not exist yet. Safe to run on every deploy.

use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use examvoice_backend::domain::user::hash_password;
use examvoice_backend::infrastructure::db::create_pool;
use examvoice_backend::infrastructure::repositories::UserRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "examvoice_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();

    let username = env::var("ADMIN_USERNAME")
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or("ADMIN_USERNAME must be set")?;
    let password = env::var("ADMIN_PASSWORD")
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or("ADMIN_PASSWORD must be set")?;
    let email = env::var("ADMIN_EMAIL").ok().filter(|value| !value.is_empty());

    let database_url = env::var("DATABASE_URL")?;
    let pool = Arc::new(create_pool(&database_url).await?);

    sqlx::migrate!().run(pool.as_ref()).await?;

    let user_repo = UserRepository::new(pool);

    if user_repo.find_by_username(&username).await?.is_some() {
        tracing::info!(username = %username, "Admin user already exists, nothing to do");
        return Ok(());
    }

    let user = user_repo
        .create_admin(&username, email.as_deref(), &hash_password(&password))
        .await?;
    tracing::info!(username = %user.username, id = user.id, "Admin user created");

    Ok(())
}
