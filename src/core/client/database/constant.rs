pub const JOBS_TABLE: &str = "jobs";

/// Schema for the jobs relation. Creates-if-absent semantics only; running
/// this against an initialized store is a no-op.
pub const JOBS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    id              UUID PRIMARY KEY,
    status          TEXT NOT NULL,
    payload         JSONB NOT NULL,
    result          JSONB,
    failure_reason  TEXT,
    attempt_count   INT NOT NULL DEFAULT 0,
    webhook_url     TEXT,
    version         INT NOT NULL DEFAULT 0,
    created_at      TIMESTAMPTZ NOT NULL,
    updated_at      TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS jobs_status_updated_at_idx ON jobs (status, updated_at);
"#;
