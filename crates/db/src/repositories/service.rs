use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Sqlite};

pub async fn create_service(
    pool: &Pool<Sqlite>,
    name: &str,
    description: Option<&str>,
    session_rate_cents: i64,
) -> Result<DbService> {
    tracing::debug!("Creating service: name={}, rate={}", name, session_rate_cents);

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (name, description, session_rate_cents, is_active, created_at)
        VALUES (?1, ?2, ?3, 1, ?4)
        RETURNING id, name, description, session_rate_cents, is_active, created_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(session_rate_cents)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Sqlite>, id: i64) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, session_rate_cents, is_active, created_at
        FROM services
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Sqlite>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, description, session_rate_cents, is_active, created_at
        FROM services
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}
