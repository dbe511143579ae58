use crate::server::router::RosterState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};

pub mod handlers;

/// Wire shape of one activity in the `GET /activities` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

/// Query parameters for signup/unregister. A missing `email` rejects with 400.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentParams {
    pub email: String,
}

pub fn router() -> Router<RosterState> {
    Router::new()
        .route("/activities", get(handlers::list_activities_handler))
        .route(
            "/activities/{activity_name}/signup",
            post(handlers::signup_handler),
        )
        .route(
            "/activities/{activity_name}/unregister",
            delete(handlers::unregister_handler),
        )
}
