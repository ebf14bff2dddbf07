//! Create the initial admin account and print its bearer token.
//!
//! Reads `ADMIN_NAME` and `ADMIN_EMAIL` alongside the server configuration.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voice_practice_backend::config::Config;
use voice_practice_backend::db::Database;
use voice_practice_backend::models::{Language, Role};
use voice_practice_backend::services::accounts::{validate_email, validate_name};
use voice_practice_backend::services::tokens::{generate_token, hash_token};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string());
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let name = validate_name(&name).context("invalid ADMIN_NAME")?;
    let email = validate_email(&email).context("invalid ADMIN_EMAIL")?;

    let db = Database::connect(&config.database_url, 1).await?;
    db.run_migrations().await?;

    if let Some(existing) = db.get_user_by_email(&email).await? {
        tracing::warn!(
            user_id = %existing.id,
            role = %existing.role,
            "a user with this email already exists, nothing to do"
        );
        return Ok(());
    }

    let token = generate_token();
    let admin = db
        .create_user(&name, &email, Language::English, Role::Admin, &hash_token(&token))
        .await?;

    tracing::info!(user_id = %admin.id, "created admin account");
    println!("{token}");

    Ok(())
}
