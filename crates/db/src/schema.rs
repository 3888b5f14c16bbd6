use eyre::Result;
use sqlx::{Pool, Sqlite};
use tracing::info;

const TABLES: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NULL,
        session_rate_cents INTEGER NOT NULL DEFAULT 0 CHECK (session_rate_cents >= 0),
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS children (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        birthdate TEXT NOT NULL,
        guardian_email TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS schedule_slots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        service_id INTEGER NULL REFERENCES services(id),
        max_capacity INTEGER NOT NULL DEFAULT 1 CHECK (max_capacity >= 1),
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CONSTRAINT valid_time_range CHECK (start_time < end_time)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        child_id INTEGER NOT NULL REFERENCES children(id) ON DELETE CASCADE,
        service_id INTEGER NOT NULL REFERENCES services(id),
        weekly_schedule TEXT NOT NULL,
        start_month INTEGER NOT NULL CHECK (start_month BETWEEN 1 AND 12),
        start_year INTEGER NOT NULL,
        status TEXT NOT NULL DEFAULT 'active'
            CHECK (status IN ('active', 'paused', 'cancelled')),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        subscription_id INTEGER NOT NULL REFERENCES subscriptions(id) ON DELETE CASCADE,
        session_date TEXT NOT NULL,
        session_time TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'scheduled'
            CHECK (status IN ('scheduled', 'completed', 'cancelled', 'no_show')),
        notes TEXT NULL,
        created_at TEXT NOT NULL,
        CONSTRAINT one_session_per_day UNIQUE (subscription_id, session_date)
    )
    "#,
];

const INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_schedule_slots_day ON schedule_slots(day_of_week, is_active)",
    "CREATE INDEX IF NOT EXISTS idx_schedule_slots_service_id ON schedule_slots(service_id)",
    "CREATE INDEX IF NOT EXISTS idx_subscriptions_child_id ON subscriptions(child_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(session_date)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_subscription_date ON sessions(subscription_id, session_date)",
];

pub async fn initialize_database(pool: &Pool<Sqlite>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in TABLES.iter().chain(INDEXES.iter()) {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
