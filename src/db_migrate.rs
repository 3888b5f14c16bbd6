use color_eyre::eyre::Result;
use daycare_db::schema::initialize_database;
use dotenv::dotenv;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://daycare.db".to_string());

    info!("Connecting to {}", database_url);
    let db_pool = daycare_db::create_pool(&database_url).await?;

    initialize_database(&db_pool).await?;
    info!("Database schema initialized");

    Ok(())
}
