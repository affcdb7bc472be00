use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::error::ScoreResult;
use super::record::{NewScore, ScoreRecord};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const POSTGRES_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS player_score (
        id SERIAL PRIMARY KEY,
        player_name VARCHAR(255) NOT NULL,
        score INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

const SQLITE_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS player_score (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        player_name VARCHAR(255) NOT NULL,
        score INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

const POSTGRES_INSERT: &str = "INSERT INTO player_score (player_name, score) VALUES ($1, $2) \
     RETURNING id, player_name, score, created_at";

const SQLITE_INSERT: &str = "INSERT INTO player_score (player_name, score) VALUES (?, ?) \
     RETURNING id, player_name, score, created_at";

/// Postgres error codes a losing concurrent `CREATE TABLE IF NOT EXISTS` can
/// raise: unique_violation on the catalog and duplicate_table.
const CONCURRENT_CREATE_CODES: &[&str] = &["23505", "42P07"];

/// Connection pool for the `player_score` table. Cloning shares the pool.
#[derive(Clone, Debug)]
pub enum ScoreStore {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl ScoreStore {
    /// Picks the backend from the URL scheme. Postgres pools connect lazily so
    /// the game stays playable while the database is unreachable.
    pub async fn connect(url: &str, max_connections: u32) -> ScoreResult<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            let pool = PgPoolOptions::new()
                .max_connections(max_connections)
                .acquire_timeout(ACQUIRE_TIMEOUT)
                .connect_lazy(url)?;
            return Ok(Self::Postgres(pool));
        }

        if url.starts_with("sqlite:") {
            let options = SqlitePoolOptions::new().acquire_timeout(ACQUIRE_TIMEOUT);
            // Every connection to `:memory:` opens its own empty database, so
            // the pool is pinned to one connection that never expires.
            let options = if url.contains(":memory:") {
                options
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                options.max_connections(max_connections)
            };
            let pool = options.connect(url).await?;
            return Ok(Self::Sqlite(pool));
        }

        Err(sqlx::Error::Configuration(
            format!("unsupported database url: {}", redact(url)).into(),
        )
        .into())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            ScoreStore::Postgres(_) => "postgres",
            ScoreStore::Sqlite(_) => "sqlite",
        }
    }

    pub async fn ensure_schema(&self) -> ScoreResult<()> {
        match self {
            ScoreStore::Postgres(pool) => {
                let mut conn = pool.acquire().await?;
                create_postgres_table(&mut conn).await
            }
            ScoreStore::Sqlite(pool) => {
                let mut conn = pool.acquire().await?;
                sqlx::query(SQLITE_SCHEMA).execute(&mut *conn).await?;
                Ok(())
            }
        }
    }

    /// Creates the table if needed and appends one row on a single pooled
    /// connection, which goes back to the pool on every return path.
    pub async fn save(&self, new_score: &NewScore) -> ScoreResult<ScoreRecord> {
        let record = match self {
            ScoreStore::Postgres(pool) => {
                let mut conn = pool.acquire().await?;
                create_postgres_table(&mut conn).await?;
                sqlx::query_as::<_, ScoreRecord>(POSTGRES_INSERT)
                    .bind(new_score.player_name.as_str())
                    .bind(new_score.score)
                    .fetch_one(&mut *conn)
                    .await?
            }
            ScoreStore::Sqlite(pool) => {
                let mut conn = pool.acquire().await?;
                sqlx::query(SQLITE_SCHEMA).execute(&mut *conn).await?;
                sqlx::query_as::<_, ScoreRecord>(SQLITE_INSERT)
                    .bind(new_score.player_name.as_str())
                    .bind(new_score.score)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };

        debug!("inserted player_score row {}", record.id);
        Ok(record)
    }

    pub async fn close(&self) {
        match self {
            ScoreStore::Postgres(pool) => pool.close().await,
            ScoreStore::Sqlite(pool) => pool.close().await,
        }
    }
}

async fn create_postgres_table(conn: &mut sqlx::PgConnection) -> ScoreResult<()> {
    match sqlx::query(POSTGRES_SCHEMA).execute(&mut *conn).await {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e))
            if e.code()
                .is_some_and(|code| CONCURRENT_CREATE_CODES.iter().any(|c| *c == code)) =>
        {
            debug!("player_score created concurrently: {}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Drops the userinfo part so credentials never reach logs or error bodies.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
