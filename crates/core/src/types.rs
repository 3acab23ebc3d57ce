/// All database primary keys are PostgreSQL UUIDs (v4, generated server-side).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
