use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbActivity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An activity together with its enrolled participant emails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityRoster {
    pub activity: DbActivity,
    pub participants: Vec<String>,
}

/// A (activity name, student email) pair for signup/unregister requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub activity: String,
    pub email: String,
}
