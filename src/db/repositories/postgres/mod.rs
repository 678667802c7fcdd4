//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against a Postgres database with
//! connection pooling (r2d2) and automatic migration execution. Blocking
//! Diesel calls run on the tokio blocking pool.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::{
    Camera, CameraId, CameraStatus, CameraUpdate, NewCamera, NewReport, Priority, Report,
    ReportFilter, ReportId, ReportStatus, ReportUpdate, Statistics,
};
use crate::db::repository::{
    CameraRepository, FullRepository, ReportRepository, RepositoryError, RepositoryResult,
    StatisticsRepository,
};

mod models;
mod schema;

use models::*;
use schema::{cameras, reports, statistics};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("PG_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("PG_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("PG_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("PG_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
        })
    }

    /// Create a new configuration with a database URL and defaults.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Postgres-backed repository.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Build the connection pool and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .build(manager)?;

        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| RepositoryError::internal(format!("migration failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// Run a blocking Diesel operation on the tokio blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(RepositoryError::from)?;
            op(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("blocking task join error: {}", e)))?
    }
}

#[async_trait]
impl ReportRepository for PostgresRepository {
    async fn insert_report(&self, new: &NewReport) -> RepositoryResult<Report> {
        let row = NewReportRow {
            location: new.location.clone(),
            priority: new.priority.to_string(),
            status: new.status.to_string(),
            ai_confidence: new.ai_confidence,
            image_data: new.image_data.clone(),
            image_name: new.image_name.clone(),
        };

        self.with_conn(move |conn| {
            diesel::insert_into(reports::table)
                .values(&row)
                .get_result::<ReportRow>(conn)
                .map_err(RepositoryError::from)?
                .into_domain()
        })
        .await
    }

    async fn fetch_report(&self, id: ReportId) -> RepositoryResult<Report> {
        self.with_conn(move |conn| {
            reports::table
                .find(id.value())
                .first::<ReportRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .ok_or_else(|| RepositoryError::not_found(format!("Report {} not found", id)))?
                .into_domain()
        })
        .await
    }

    async fn list_reports(&self, filter: &ReportFilter) -> RepositoryResult<Vec<Report>> {
        let filter = filter.clone();
        self.with_conn(move |conn| {
            let mut query = reports::table.into_boxed();
            if let Some(status) = filter.status {
                query = query.filter(reports::status.eq(status.to_string()));
            }
            if let Some(priority) = filter.priority {
                query = query.filter(reports::priority.eq(priority.to_string()));
            }
            query = query.order((reports::reported_at.desc(), reports::id.desc()));
            if let Some(limit) = filter.limit {
                query = query.limit(limit);
            }

            query
                .load::<ReportRow>(conn)
                .map_err(RepositoryError::from)?
                .into_iter()
                .map(ReportRow::into_domain)
                .collect()
        })
        .await
    }

    async fn update_report(
        &self,
        id: ReportId,
        changes: &ReportUpdate,
    ) -> RepositoryResult<Report> {
        if changes.is_empty() {
            return self.fetch_report(id).await;
        }

        let changeset = ReportChangeset {
            location: changes.location.clone(),
            priority: changes.priority.map(|p| p.to_string()),
            status: changes.status.map(|s| s.to_string()),
            ai_confidence: changes.ai_confidence,
        };

        self.with_conn(move |conn| {
            diesel::update(reports::table.find(id.value()))
                .set(&changeset)
                .get_result::<ReportRow>(conn)
                .map_err(RepositoryError::from)?
                .into_domain()
        })
        .await
    }

    async fn delete_report(&self, id: ReportId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(reports::table.find(id.value()))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            if deleted == 0 {
                Err(RepositoryError::not_found(format!(
                    "Report {} not found",
                    id
                )))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn count_reports(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            reports::table
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count_reports_with_image(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            reports::table
                .filter(reports::image_data.is_not_null())
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count_reports_detected(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            reports::table
                .filter(reports::ai_confidence.gt(0))
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn average_confidence(&self) -> RepositoryResult<Option<i64>> {
        // Truncating integer mean via SUM/COUNT; avoids NUMERIC round-tripping.
        self.with_conn(|conn| {
            let total: i64 = reports::table
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)?;
            if total == 0 {
                return Ok(None);
            }
            let confidence_sum: Option<i64> = reports::table
                .select(sum(reports::ai_confidence))
                .first(conn)
                .map_err(RepositoryError::from)?;
            Ok(confidence_sum.map(|s| s / total))
        })
        .await
    }

    async fn count_reports_by_status(&self, status: ReportStatus) -> RepositoryResult<i64> {
        self.with_conn(move |conn| {
            reports::table
                .filter(reports::status.eq(status.to_string()))
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count_reports_by_priority(&self, priority: Priority) -> RepositoryResult<i64> {
        self.with_conn(move |conn| {
            reports::table
                .filter(reports::priority.eq(priority.to_string()))
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }
}

#[async_trait]
impl CameraRepository for PostgresRepository {
    async fn insert_camera(&self, new: &NewCamera) -> RepositoryResult<Camera> {
        let row = NewCameraRow {
            name: new.name.clone(),
            location: new.location.clone(),
            status: new.status.to_string(),
            ip_address: new.ip_address.clone(),
        };

        self.with_conn(move |conn| {
            diesel::insert_into(cameras::table)
                .values(&row)
                .get_result::<CameraRow>(conn)
                .map_err(RepositoryError::from)?
                .into_domain()
        })
        .await
    }

    async fn fetch_camera(&self, id: CameraId) -> RepositoryResult<Camera> {
        self.with_conn(move |conn| {
            cameras::table
                .find(id.value())
                .first::<CameraRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .ok_or_else(|| RepositoryError::not_found(format!("Camera {} not found", id)))?
                .into_domain()
        })
        .await
    }

    async fn list_cameras(&self) -> RepositoryResult<Vec<Camera>> {
        self.with_conn(|conn| {
            cameras::table
                .order(cameras::id.asc())
                .load::<CameraRow>(conn)
                .map_err(RepositoryError::from)?
                .into_iter()
                .map(CameraRow::into_domain)
                .collect()
        })
        .await
    }

    async fn update_camera(
        &self,
        id: CameraId,
        changes: &CameraUpdate,
    ) -> RepositoryResult<Camera> {
        if changes.is_empty() {
            return self.fetch_camera(id).await;
        }

        let changeset = CameraChangeset {
            name: changes.name.clone(),
            location: changes.location.clone(),
            status: changes.status.map(|s| s.to_string()),
            ip_address: changes.ip_address.clone(),
        };

        self.with_conn(move |conn| {
            diesel::update(cameras::table.find(id.value()))
                .set(&changeset)
                .get_result::<CameraRow>(conn)
                .map_err(RepositoryError::from)?
                .into_domain()
        })
        .await
    }

    async fn delete_camera(&self, id: CameraId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(cameras::table.find(id.value()))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            if deleted == 0 {
                Err(RepositoryError::not_found(format!(
                    "Camera {} not found",
                    id
                )))
            } else {
                Ok(())
            }
        })
        .await
    }

    async fn count_cameras(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            cameras::table
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn count_active_cameras(&self) -> RepositoryResult<i64> {
        self.with_conn(|conn| {
            cameras::table
                .filter(cameras::status.eq(CameraStatus::Active.to_string()))
                .count()
                .get_result(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }
}

#[async_trait]
impl StatisticsRepository for PostgresRepository {
    async fn fetch_statistics(&self) -> RepositoryResult<Statistics> {
        self.with_conn(|conn| {
            let row: Option<StatisticsRow> = statistics::table
                .find(STATISTICS_ROW_ID)
                .first(conn)
                .optional()
                .map_err(RepositoryError::from)?;
            Ok(row.map(StatisticsRow::into_domain).unwrap_or_default())
        })
        .await
    }

    async fn upsert_statistics(&self, stats: &Statistics) -> RepositoryResult<()> {
        let row = StatisticsRow::from_domain(stats);
        self.with_conn(move |conn| {
            diesel::insert_into(statistics::table)
                .values(&row)
                .on_conflict(statistics::id)
                .do_update()
                .set((
                    statistics::images_analyzed.eq(row.images_analyzed),
                    statistics::waste_detected.eq(row.waste_detected),
                    statistics::average_confidence.eq(row.average_confidence),
                    statistics::detection_rate.eq(row.detection_rate),
                ))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)?;
            Ok(true)
        })
        .await
    }
}
