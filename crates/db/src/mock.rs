pub mod repositories;

use std::path::Path;

/// Fresh in-memory database with the schema applied.
pub async fn create_test_pool() -> eyre::Result<crate::DbPool> {
    let pool = crate::create_memory_pool().await?;
    crate::schema::initialize_database(&pool).await?;
    Ok(pool)
}

/// File-backed database at `path` with the schema applied. Unlike the in-memory
/// pool it has several connections, so concurrent writers really contend.
pub async fn create_file_test_pool(path: &Path) -> eyre::Result<crate::DbPool> {
    let pool = crate::create_pool(&format!("sqlite://{}", path.display())).await?;
    crate::schema::initialize_database(&pool).await?;
    Ok(pool)
}
