use super::error::DatabaseError;
use crate::core::client::database::constant::{JOBS_SCHEMA, JOBS_TABLE};
use crate::core::client::database::DatabaseClient;
use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::types::JobStatus;
use crate::types::params::DatabaseArgs;
use crate::utils::metrics::CONVEYOR_METRICS;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use opentelemetry::KeyValue;
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{QueryBuilder, Row};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

const JOB_COLUMNS: &str =
    "id, status, payload, result, failure_reason, attempt_count, webhook_url, version, created_at, updated_at";

/// Postgres store implementation
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect(&config.connection_uri)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_job(row: &PgRow) -> Result<JobItem, DatabaseError> {
        let status: String = row.try_get("status")?;
        let status = JobStatus::from_str(&status)
            .map_err(|_| DatabaseError::FailedToDeserializeRow(format!("Unknown job status: {}", status)))?;
        Ok(JobItem {
            id: row.try_get::<Uuid, _>("id")?,
            status,
            payload: row.try_get::<Value, _>("payload")?,
            result: row.try_get::<Option<Value>, _>("result")?,
            failure_reason: row.try_get::<Option<String>, _>("failure_reason")?,
            attempt_count: row.try_get::<i32, _>("attempt_count")?,
            webhook_url: row.try_get::<Option<String>, _>("webhook_url")?,
            version: row.try_get::<i32, _>("version")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::raw_sql(JOBS_SCHEMA).execute(&self.pool).await?;
        debug!("Jobs schema ensured");
        Ok(())
    }

    /// create_job - Insert a new job record in the store
    /// Returns [`DatabaseError::ItemAlreadyExists`] when the id is taken,
    /// so a duplicate submission cannot silently overwrite a job.
    async fn create_job(&self, job: JobItem) -> Result<JobItem, DatabaseError> {
        let start = Instant::now();
        let result = sqlx::query(
            "INSERT INTO jobs (id, status, payload, result, failure_reason, attempt_count, webhook_url, version, \
             created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) ON CONFLICT (id) DO NOTHING",
        )
        .bind(job.id)
        .bind(job.status.to_string())
        .bind(&job.payload)
        .bind(&job.result)
        .bind(&job.failure_reason)
        .bind(job.attempt_count)
        .bind(&job.webhook_url)
        .bind(job.version)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::ItemAlreadyExists(format!("Job already exists for id {}", job.id)));
        }

        let duration = start.elapsed();
        debug!(duration = %duration.as_millis(), "Job created in store successfully");
        let attributes = [KeyValue::new("db_operation_name", "create_job")];
        CONVEYOR_METRICS.db_calls_response_time.record(duration.as_secs_f64(), &attributes);
        Ok(job)
    }

    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<JobItem>, DatabaseError> {
        let start = Instant::now();
        let row = sqlx::query(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let attributes = [KeyValue::new("db_operation_name", "get_job_by_id")];
        CONVEYOR_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        row.as_ref().map(Self::row_to_job).transpose()
    }

    async fn update_job(&self, current_job: &JobItem, update: JobItemUpdates) -> Result<JobItem, DatabaseError> {
        let start = Instant::now();

        // throw an error if there's no field to be updated
        if update.is_empty() {
            return Err(DatabaseError::NoUpdateFound("No field to be updated, likely a false call".to_string()));
        }

        // version and updated_at are always bumped
        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE jobs SET version = version + 1");
        builder.push(", updated_at = ").push_bind(Utc::now().round_subsecs(0));
        if let Some(status) = update.status {
            builder.push(", status = ").push_bind(status.to_string());
        }
        if let Some(result) = update.result {
            builder.push(", result = ").push_bind(result);
        }
        if let Some(reason) = update.failure_reason {
            builder.push(", failure_reason = ").push_bind(reason);
        }
        if let Some(attempt_count) = update.attempt_count {
            builder.push(", attempt_count = ").push_bind(attempt_count);
        }

        // Optimistic concurrency: the filter only matches the version this
        // caller read, so a concurrent holder makes this a no-match.
        builder.push(" WHERE id = ").push_bind(current_job.id);
        builder.push(" AND version = ").push_bind(current_job.version);
        builder.push(" RETURNING ").push(JOB_COLUMNS);

        let row = builder.build().fetch_optional(&self.pool).await?;

        match row {
            Some(row) => {
                debug!("Job updated successfully");
                let attributes = [KeyValue::new("db_operation_name", "update_job")];
                CONVEYOR_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
                Self::row_to_job(&row)
            }
            None => {
                warn!(version = %current_job.version, "Failed to update job. Job version is likely outdated");
                Err(DatabaseError::UpdateFailed(format!("Failed to update job. Identifier - {}, ", current_job.id)))
            }
        }
    }

    async fn get_stale_jobs(
        &self,
        status: JobStatus,
        stale_after: Duration,
        limit: i64,
    ) -> Result<Vec<JobItem>, DatabaseError> {
        let start = Instant::now();
        let cutoff = Utc::now() - chrono::Duration::seconds(stale_after.as_secs() as i64);

        let rows = sqlx::query(&format!(
            "SELECT {} FROM jobs WHERE status = $1 AND updated_at < $2 ORDER BY updated_at ASC LIMIT $3",
            JOB_COLUMNS
        ))
        .bind(status.to_string())
        .bind(cutoff)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let jobs = rows.iter().map(Self::row_to_job).collect::<Result<Vec<_>, _>>()?;

        debug!(cutoff = %cutoff, stale_count = jobs.len(), "Fetched stale jobs");
        let attributes = [KeyValue::new("db_operation_name", "get_stale_jobs")];
        CONVEYOR_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(jobs)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        let relation: Option<String> =
            sqlx::query_scalar("SELECT to_regclass($1)::text").bind(JOBS_TABLE).fetch_one(&self.pool).await?;
        relation.map(|_| ()).ok_or_else(|| {
            DatabaseError::ConnectionError(format!(
                "relation '{}' is missing, run the setup command against this store first",
                JOBS_TABLE
            ))
        })
    }
}
