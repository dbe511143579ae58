use super::{ActivityDetail, EnrollmentParams};
use crate::db::Enrollment;
use crate::error::RosterError;
use crate::server::router::RosterState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use tracing::debug;

/// All activities keyed by name, ordered by name (BTreeMap keeps the order
/// in the serialized object).
pub(super) async fn list_activities_handler(
    State(state): State<RosterState>,
) -> Result<Json<BTreeMap<String, ActivityDetail>>, RosterError> {
    let rosters = state.db.list_activities().await?;

    let activities = rosters
        .into_iter()
        .map(|roster| {
            (
                roster.activity.name,
                ActivityDetail {
                    description: roster.activity.description,
                    schedule: roster.activity.schedule,
                    max_participants: roster.activity.max_participants,
                    participants: roster.participants,
                },
            )
        })
        .collect();

    Ok(Json(activities))
}

pub(super) async fn signup_handler(
    State(state): State<RosterState>,
    Path(activity_name): Path<String>,
    Query(params): Query<EnrollmentParams>,
) -> Result<Json<Value>, RosterError> {
    debug!(activity = %activity_name, email = %params.email, "signup request");

    let enrollment = Enrollment {
        activity: activity_name.clone(),
        email: params.email.clone(),
    };
    state.db.signup(enrollment).await?;

    Ok(Json(json!({
        "message": format!("Signed up {} for {}", params.email, activity_name)
    })))
}

pub(super) async fn unregister_handler(
    State(state): State<RosterState>,
    Path(activity_name): Path<String>,
    Query(params): Query<EnrollmentParams>,
) -> Result<Json<Value>, RosterError> {
    debug!(activity = %activity_name, email = %params.email, "unregister request");

    let enrollment = Enrollment {
        activity: activity_name.clone(),
        email: params.email.clone(),
    };
    state.db.unregister(enrollment).await?;

    Ok(Json(json!({
        "message": format!("Unregistered {} from {}", params.email, activity_name)
    })))
}
