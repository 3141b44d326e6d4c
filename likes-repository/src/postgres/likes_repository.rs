//! PostgreSQL implementation of the likes repository.
//!
//! All likes live in the `likes` table whose primary key is the full
//! (user_id, entity_type, entity_id) tuple, so uniqueness is enforced by the
//! database rather than by callers.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - Schema managed by embedded SQLx migrations
//! - Toggle as a single statement using data-modifying CTEs
use async_trait::async_trait;
use likes_shared::types::{EntityId, EntityType, Like, ToggleOutcome, UserId};
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::{LikesRepository, LikesRepositoryError};

/// Deletes the tuple when present; otherwise inserts it. Both branches run
/// in one statement so two overlapping toggles serialize on the primary key
/// instead of racing between a read and a write.
const TOGGLE_LIKE_SQL: &str = r#"
WITH removed AS (
    DELETE FROM likes
    WHERE user_id = $1 AND entity_type = $2 AND entity_id = $3
    RETURNING 1
), inserted AS (
    INSERT INTO likes (user_id, entity_type, entity_id)
    SELECT $1, $2, $3
    WHERE NOT EXISTS (SELECT 1 FROM removed)
    ON CONFLICT (user_id, entity_type, entity_id) DO NOTHING
    RETURNING 1
)
SELECT
    (SELECT COUNT(*) FROM removed) AS removed,
    (SELECT COUNT(*) FROM inserted) AS inserted
"#;

#[derive(Debug, sqlx::FromRow)]
struct LikeRow {
    user_id: String,
    entity_type: String,
    entity_id: i32,
    liked_at: OffsetDateTime,
}

impl TryFrom<LikeRow> for Like {
    type Error = LikesRepositoryError;

    fn try_from(row: LikeRow) -> Result<Self, Self::Error> {
        let entity_type = row
            .entity_type
            .parse::<EntityType>()
            .map_err(|_| LikesRepositoryError::InvalidEntityType(row.entity_type.clone()))?;
        let user_id = UserId::new(row.user_id.clone())
            .ok_or_else(|| LikesRepositoryError::InvalidUserId(row.user_id.clone()))?;

        Ok(Like {
            user_id,
            entity_type,
            entity_id: row.entity_id,
            liked_at: row.liked_at.unix_timestamp().max(0) as u64,
        })
    }
}

/// PostgreSQL implementation of the likes repository.
pub struct PostgresLikesRepository {
    pool: sqlx::PgPool,
}

impl PostgresLikesRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresLikesRepository)` - Ready-to-use repository instance
    /// * `Err(LikesRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, LikesRepositoryError> {
        Ok(Self { pool })
    }

    /// Connects a new pool to `database_url` and wraps it.
    pub async fn connect(database_url: &str) -> Result<Self, LikesRepositoryError> {
        let pool = sqlx::PgPool::connect(database_url).await?;
        Self::new(pool).await
    }

    /// Applies the embedded migrations under `src/postgres/migrations`.
    pub async fn run_migrations(&self) -> Result<(), LikesRepositoryError> {
        sqlx::migrate!("src/postgres/migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LikesRepository for PostgresLikesRepository {
    async fn exists(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE user_id = $1 AND entity_type = $2 AND entity_id = $3
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(entity_type.as_str())
        .bind(entity_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<(), LikesRepositoryError> {
        let result = sqlx::query(
            "INSERT INTO likes (user_id, entity_type, entity_id) VALUES ($1, $2, $3)",
        )
        .bind(user_id.as_str())
        .bind(entity_type.as_str())
        .bind(entity_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(LikesRepositoryError::ConstraintViolation {
                    entity_type,
                    entity_id,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<bool, LikesRepositoryError> {
        let result = sqlx::query(
            "DELETE FROM likes WHERE user_id = $1 AND entity_type = $2 AND entity_id = $3",
        )
        .bind(user_id.as_str())
        .bind(entity_type.as_str())
        .bind(entity_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        entity_type: Option<EntityType>,
    ) -> Result<Vec<Like>, LikesRepositoryError> {
        let rows: Vec<LikeRow> = sqlx::query_as(
            r#"
            SELECT user_id, entity_type, entity_id, liked_at
            FROM likes
            WHERE user_id = $1 AND ($2::text IS NULL OR entity_type = $2)
            ORDER BY liked_at, entity_type, entity_id
            "#,
        )
        .bind(user_id.as_str())
        .bind(entity_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Like::try_from).collect()
    }

    #[instrument(skip(self, user_id), fields(user_id = %user_id))]
    async fn toggle(
        &self,
        user_id: &UserId,
        entity_type: EntityType,
        entity_id: EntityId,
    ) -> Result<ToggleOutcome, LikesRepositoryError> {
        let (removed, inserted): (i64, i64) = sqlx::query_as(TOGGLE_LIKE_SQL)
            .bind(user_id.as_str())
            .bind(entity_type.as_str())
            .bind(entity_id)
            .fetch_one(&self.pool)
            .await?;

        let outcome = match (removed, inserted) {
            (r, _) if r > 0 => ToggleOutcome::Unliked,
            (_, 0) => {
                // A concurrent toggle inserted the row first; it stays liked.
                debug!("Toggle collided with a concurrent insert");
                ToggleOutcome::Liked
            }
            _ => ToggleOutcome::Liked,
        };

        Ok(outcome)
    }

    /// Checks if the tables are created in the database.
    async fn check_tables_created(&self) -> Result<bool, LikesRepositoryError> {
        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM information_schema.tables WHERE table_name = $1)
            "#,
        )
        .bind("likes")
        .fetch_one(&self.pool)
        .await?;

        Ok(table_exists)
    }
}
