/// Row id shared by users, projects, articles and images (`BIGSERIAL`).
pub type DbId = i64;

/// `created_at` / `updated_at` values, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
