use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::Activity;
use crate::services::activity_directory::{ActivityDirectory, DirectoryError};

#[derive(Debug, Deserialize)]
pub struct ParticipantQuery {
    email: String,
}

pub async fn list_activities_handler(
    State(directory): State<Arc<ActivityDirectory>>,
) -> Json<BTreeMap<String, Activity>> {
    Json(directory.list().await)
}

pub async fn signup_handler(
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(directory): State<Arc<ActivityDirectory>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let email = required_email(&query.email)?;

    directory.sign_up(&name, email).await.map_err(|e| {
        warn!(activity = %name, email = %email, "Signup rejected: {}", e);
        error_response(e)
    })?;

    info!(activity = %name, email = %email, "participant_signed_up");
    Ok(Json(serde_json::json!({
        "message": format!("Signed up {} for {}", email, name)
    })))
}

pub async fn unregister_handler(
    Path(name): Path<String>,
    Query(query): Query<ParticipantQuery>,
    State(directory): State<Arc<ActivityDirectory>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let email = required_email(&query.email)?;

    directory.unregister(&name, email).await.map_err(|e| {
        warn!(activity = %name, email = %email, "Unregister rejected: {}", e);
        error_response(e)
    })?;

    info!(activity = %name, email = %email, "participant_unregistered");
    Ok(Json(serde_json::json!({
        "message": format!("Unregistered {} from {}", email, name)
    })))
}

// Format check only; anything non-blank passes through as-is.
fn required_email(raw: &str) -> Result<&str, (StatusCode, Json<Value>)> {
    let email = raw.trim();
    if email.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "detail": "Email is required" })),
        ));
    }
    Ok(email)
}

fn error_response(err: DirectoryError) -> (StatusCode, Json<Value>) {
    let status = match err {
        DirectoryError::AlreadySignedUp => StatusCode::BAD_REQUEST,
        DirectoryError::ActivityNotFound | DirectoryError::ParticipantNotFound => {
            StatusCode::NOT_FOUND
        }
    };
    (status, Json(serde_json::json!({ "detail": err.to_string() })))
}
