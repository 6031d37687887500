use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration request body. Every field is optional at the serde level so
/// that missing fields reach the accumulating validator instead of being
/// rejected during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationInput {
    pub full_name: Option<String>,
    pub access_username: Option<String>,
    pub credential_plaintext: Option<String>,
    pub email: Option<String>,
    pub note: Option<String>,
}

/// Column values for a single insert. Strings are already trimmed and the
/// credential is already hashed by the time this is built.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub full_name: String,
    pub access_username: String,
    pub credential_hash: String,
    pub email: String,
    pub note: Option<String>,
}

/// Read-side projection of a student row. The credential hash is deliberately
/// absent: no read path ever selects it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentSummary {
    pub id: i64,
    pub full_name: String,
    pub access_username: String,
    pub email: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
