use crate::db::models::{ActivityRoster, DbActivity, Enrollment};
use crate::db::store;
use crate::error::RosterError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug)]
pub enum DbActorMessage {
    /// List all activities with their rosters, ordered by name.
    ListActivities(RpcReplyPort<Result<Vec<ActivityRoster>, RosterError>>),

    /// Sign a student up for an activity.
    Signup(Enrollment, RpcReplyPort<Result<(), RosterError>>),

    /// Remove a student from an activity's roster.
    Unregister(Enrollment, RpcReplyPort<Result<(), RosterError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_activities(&self) -> Result<Vec<ActivityRoster>, RosterError> {
        ractor::call!(self.actor, DbActorMessage::ListActivities).map_err(|e| {
            RosterError::RactorError(format!("DbActor ListActivities RPC failed: {e}"))
        })?
    }

    pub async fn signup(&self, enrollment: Enrollment) -> Result<(), RosterError> {
        ractor::call!(self.actor, DbActorMessage::Signup, enrollment)
            .map_err(|e| RosterError::RactorError(format!("DbActor Signup RPC failed: {e}")))?
    }

    pub async fn unregister(&self, enrollment: Enrollment) -> Result<(), RosterError> {
        ractor::call!(self.actor, DbActorMessage::Unregister, enrollment)
            .map_err(|e| RosterError::RactorError(format!("DbActor Unregister RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let pool = store::connect(database_url.as_str())
            .await
            .map_err(|e| ActorProcessingErr::from(e.to_string()))?;

        store::ensure_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(e.to_string()))?;

        store::seed_initial(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db seeding failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListActivities(reply) => {
                let res = self.list_activities(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Signup(enrollment, reply) => {
                let res = self.signup(&state.pool, enrollment).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Unregister(enrollment, reply) => {
                let res = self.unregister(&state.pool, enrollment).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_activities(&self, pool: &SqlitePool) -> Result<Vec<ActivityRoster>, RosterError> {
        let activities = sqlx::query_as::<_, DbActivity>(
            r"
        SELECT id, name, description, schedule, max_participants, created_at, updated_at
        FROM activities
        ORDER BY name
        ",
        )
        .fetch_all(pool)
        .await?;

        let links = sqlx::query_as::<_, (i64, String)>(
            r"
        SELECT ap.activity_id, p.email
        FROM activity_participants ap
        JOIN participants p ON p.id = ap.participant_id
        ORDER BY ap.activity_id, p.id
        ",
        )
        .fetch_all(pool)
        .await?;

        let mut rosters: HashMap<i64, Vec<String>> = HashMap::new();
        for (activity_id, email) in links {
            rosters.entry(activity_id).or_default().push(email);
        }

        Ok(activities
            .into_iter()
            .map(|activity| {
                let participants = rosters.remove(&activity.id).unwrap_or_default();
                ActivityRoster {
                    activity,
                    participants,
                }
            })
            .collect())
    }

    async fn signup(&self, pool: &SqlitePool, enrollment: Enrollment) -> Result<(), RosterError> {
        let mut tx = pool.begin().await?;

        let activity_id: Option<i64> = sqlx::query_scalar("SELECT id FROM activities WHERE name = ?")
            .bind(&enrollment.activity)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(activity_id) = activity_id else {
            return Err(RosterError::ActivityNotFound(enrollment.activity));
        };

        let already: Option<i64> = sqlx::query_scalar(
            r"
        SELECT p.id
        FROM participants p
        JOIN activity_participants ap ON ap.participant_id = p.id
        WHERE ap.activity_id = ? AND p.email = ?
        ",
        )
        .bind(activity_id)
        .bind(&enrollment.email)
        .fetch_optional(&mut *tx)
        .await?;
        if already.is_some() {
            return Err(RosterError::AlreadySignedUp {
                activity: enrollment.activity,
                email: enrollment.email,
            });
        }

        let now = Utc::now();
        let participant_id: i64 = sqlx::query_scalar(
            r"
        INSERT INTO participants (email, created_at)
        VALUES (?, ?)
        ON CONFLICT(email) DO UPDATE SET email = excluded.email
        RETURNING id
        ",
        )
        .bind(&enrollment.email)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO activity_participants (activity_id, participant_id) VALUES (?, ?)",
        )
        .bind(activity_id)
        .bind(participant_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn unregister(
        &self,
        pool: &SqlitePool,
        enrollment: Enrollment,
    ) -> Result<(), RosterError> {
        let mut tx = pool.begin().await?;

        let activity_id: Option<i64> = sqlx::query_scalar("SELECT id FROM activities WHERE name = ?")
            .bind(&enrollment.activity)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(activity_id) = activity_id else {
            return Err(RosterError::ActivityNotFound(enrollment.activity));
        };

        // Participant rows are kept; only the enrollment link is removed.
        let removed = sqlx::query(
            r"
        DELETE FROM activity_participants
        WHERE activity_id = ?
          AND participant_id = (SELECT id FROM participants WHERE email = ?)
        ",
        )
        .bind(activity_id)
        .bind(&enrollment.email)
        .execute(&mut *tx)
        .await?;
        if removed.rows_affected() == 0 {
            return Err(RosterError::NotSignedUp {
                activity: enrollment.activity,
                email: enrollment.email,
            });
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// Startup fails here when the database is unreachable, the schema cannot be
/// applied, or seeding fails.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, RosterError> {
    let (actor, _jh) = ractor::Actor::spawn(
        Some("DbActor".to_string()),
        DbActor,
        database_url.to_string(),
    )
    .await
    .map_err(|e| RosterError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}
