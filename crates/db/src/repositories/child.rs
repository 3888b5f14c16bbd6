use crate::models::DbChild;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Sqlite};

pub async fn create_child(
    pool: &Pool<Sqlite>,
    first_name: &str,
    last_name: &str,
    birthdate: NaiveDate,
    guardian_email: &str,
) -> Result<DbChild> {
    tracing::debug!("Creating child: {} {}", first_name, last_name);

    let child = sqlx::query_as::<_, DbChild>(
        r#"
        INSERT INTO children (first_name, last_name, birthdate, guardian_email, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, first_name, last_name, birthdate, guardian_email, created_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(birthdate)
    .bind(guardian_email)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(child)
}

pub async fn get_child_by_id(pool: &Pool<Sqlite>, id: i64) -> Result<Option<DbChild>> {
    let child = sqlx::query_as::<_, DbChild>(
        r#"
        SELECT id, first_name, last_name, birthdate, guardian_email, created_at
        FROM children
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(child)
}

pub async fn list_children(pool: &Pool<Sqlite>) -> Result<Vec<DbChild>> {
    let children = sqlx::query_as::<_, DbChild>(
        r#"
        SELECT id, first_name, last_name, birthdate, guardian_email, created_at
        FROM children
        ORDER BY last_name ASC, first_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(children)
}
