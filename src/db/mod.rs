//! Database module: models, schema, and seeding for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `seed.rs`: the fixed starter dataset inserted into an empty store
//! - `store.rs`: pool construction, schema application, one-time seeding
//! - `actor.rs`: the actor owning the pool and serving roster operations

pub mod actor;
pub mod models;
pub mod schema;
pub mod seed;
pub mod store;

pub use models::{ActivityRoster, DbActivity, Enrollment};
pub use schema::SQLITE_INIT;
pub use seed::{INITIAL_ACTIVITIES, SeedActivity};
pub use store::{connect, ensure_schema, seed_if_empty, seed_initial};

pub use actor::{DbActorHandle, spawn};
