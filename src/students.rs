use std::sync::Arc;

use axum::extract::Path;
use axum::{Extension, Json};
use serde::Serialize;

use crate::models::{RegistrationInput, StudentSummary};
use crate::{breaks, creates, proceeds, AppState, Payload, RefStr};

pub async fn register_student(
    Json(input): Json<RegistrationInput>,
    Extension(app): Extension<Arc<AppState>>,
) -> Payload<RegisteredStudent> {
    match app.registration.register(input).await {
        Ok(id) => creates(RegisteredStudent {
            message: "Student registered successfully".to_string(),
            id,
        }),
        Err(err) => breaks(err),
    }
}

pub async fn list_students(
    Extension(app): Extension<Arc<AppState>>,
) -> Payload<StudentList> {
    match app.lookup.list_all().await {
        Ok(students) => proceeds(StudentList {
            total: students.len(),
            students,
        }),
        Err(err) => breaks(err),
    }
}

pub async fn student_by_id(
    Path(id): Path<String>,
    Extension(app): Extension<Arc<AppState>>,
) -> Payload<StudentEnvelope> {
    match app.lookup.get_by_id(&id).await {
        Ok(student) => proceeds(StudentEnvelope { student }),
        Err(err) => breaks(err),
    }
}

pub async fn student_by_username(
    Path(username): Path<String>,
    Extension(app): Extension<Arc<AppState>>,
) -> Payload<StudentEnvelope> {
    match app.lookup.get_by_username(&username).await {
        Ok(student) => proceeds(StudentEnvelope { student }),
        Err(err) => breaks(err),
    }
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "OK",
        message: "Server is up and running",
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredStudent {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentList {
    pub total: usize,
    pub students: Vec<StudentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentEnvelope {
    pub student: StudentSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: RefStr,
    pub message: RefStr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn registered_body_has_message_and_id() {
        let body = serde_json::to_value(RegisteredStudent {
            message: "Student registered successfully".to_string(),
            id: 3,
        })
        .unwrap();
        assert_eq!(body["id"], 3);
        assert_eq!(body["message"], "Student registered successfully");
    }

    #[test]
    fn student_list_body_carries_total() {
        let student = StudentSummary {
            id: 1,
            full_name: "Ana Silva".to_string(),
            access_username: "ana.silva".to_string(),
            email: "ana@example.com".to_string(),
            note: None,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };
        let body = serde_json::to_value(StudentList {
            total: 1,
            students: vec![student],
        })
        .unwrap();
        assert_eq!(body["total"], 1);
        assert_eq!(body["students"][0]["access_username"], "ana.silva");
        assert!(body["students"][0].get("credential_hash").is_none());
    }
}
