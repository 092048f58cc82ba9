use axum::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::models::Student;

/// The lookup capability the auth service is defined against. `Backend` is
/// the real thing; `StaticRoster` stands in when there is no database.
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn student_by_code(&self, code: &str) -> anyhow::Result<Option<Student>>;
}

const STUDENTS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS students (
    id         UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name       TEXT NOT NULL,
    age        INTEGER NOT NULL,
    code       TEXT NOT NULL UNIQUE,
    sessions   INTEGER NOT NULL DEFAULT 0,
    scores     DOUBLE PRECISION[] NOT NULL DEFAULT '{}',
    notes      TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Handle to the hosted student database. Construction fails loudly; it
/// does not second-guess the configuration it is given.
pub struct Backend {
    pool: PgPool,
}

impl Backend {
    pub async fn connect(config: &BackendConfig) -> anyhow::Result<Backend> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.connection_string())
            .await?;
        Ok(Backend { pool })
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(STUDENTS_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StudentDirectory for Backend {
    async fn student_by_code(&self, code: &str) -> anyhow::Result<Option<Student>> {
        let student =
            sqlx::query_as::<_, Student>("SELECT * FROM students WHERE code = $1 LIMIT 1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(student)
    }
}

/// Fixed in-memory roster. Doubles as the demo directory for unconfigured
/// deployments and the substitute in tests.
pub struct StaticRoster {
    students: Vec<Student>,
}

impl StaticRoster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn demo() -> Self {
        Self::new(vec![Student {
            id: Uuid::from_u128(1),
            name: "John Doe".to_string(),
            age: 16,
            code: "144".to_string(),
            sessions: 12,
            scores: vec![82.0, 88.0],
            notes: None,
            created_at: None,
        }])
    }
}

#[async_trait]
impl StudentDirectory for StaticRoster {
    async fn student_by_code(&self, code: &str) -> anyhow::Result<Option<Student>> {
        Ok(self.students.iter().find(|s| s.code == code).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roster_resolves_known_codes() {
        let roster = StaticRoster::demo();
        let student = roster.student_by_code("144").await.unwrap();
        assert_eq!(student.map(|s| s.code), Some("144".to_string()));
    }

    #[tokio::test]
    async fn roster_misses_unknown_codes() {
        let roster = StaticRoster::demo();
        assert!(roster.student_by_code("999").await.unwrap().is_none());
        assert!(roster.student_by_code("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn roster_matches_codes_exactly() {
        let roster = StaticRoster::demo();
        assert!(roster.student_by_code(" 144").await.unwrap().is_none());
        assert!(roster.student_by_code("1440").await.unwrap().is_none());
    }
}
