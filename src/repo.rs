use async_trait::async_trait;
use sqlx::mysql::MySqlDatabaseError;
use sqlx::MySqlPool;

use crate::models::{NewStudent, StudentSummary};

/// Storage failures, already translated from driver-specific signals. The
/// services branch only on these kinds.
#[derive(Debug)]
pub enum StoreError {
    /// Unique-constraint violation on `access_username` or `email`.
    DuplicateKey,
    Failure(sqlx::Error),
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert(&self, student: NewStudent) -> Result<i64, StoreError>;
    async fn list_all(&self) -> Result<Vec<StudentSummary>, StoreError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<StudentSummary>, StoreError>;
    async fn get_by_username(&self, username: &str) -> Result<Option<StudentSummary>, StoreError>;
}

/// Issues parameterized queries against the `students` table. Holds the pool
/// by value; sqlx acquires a connection per query and releases it when the
/// future completes, even on error or cancellation.
#[derive(Clone)]
pub struct MySqlStudentRepo {
    pool: MySqlPool,
}

impl MySqlStudentRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for MySqlStudentRepo {
    async fn insert(&self, student: NewStudent) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO students (full_name, access_username, credential_hash, email, note) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&student.full_name)
        .bind(&student.access_username)
        .bind(&student.credential_hash)
        .bind(&student.email)
        .bind(&student.note)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(result.last_insert_id() as i64)
    }

    async fn list_all(&self) -> Result<Vec<StudentSummary>, StoreError> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT id, full_name, access_username, email, note, created_at \
             FROM students ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<StudentSummary>, StoreError> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT id, full_name, access_username, email, note, created_at \
             FROM students WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<StudentSummary>, StoreError> {
        sqlx::query_as::<_, StudentSummary>(
            "SELECT id, full_name, access_username, email, note, created_at \
             FROM students WHERE access_username = ? LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)
    }
}

// MySQL reports a duplicate unique key as ER_DUP_ENTRY (1062), SQLSTATE 23000.
const ER_DUP_ENTRY: u32 = 1062;

fn translate(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        let errno = db
            .try_downcast_ref::<MySqlDatabaseError>()
            .map(|mysql| u32::from(mysql.number()));
        if is_unique_violation(errno, db.code().as_deref()) {
            return StoreError::DuplicateKey;
        }
    }
    StoreError::Failure(err)
}

fn is_unique_violation(errno: Option<u32>, sqlstate: Option<&str>) -> bool {
    match errno {
        Some(number) => number == ER_DUP_ENTRY,
        None => sqlstate == Some("23000"),
    }
}
