//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `activities` table (one extracurricular activity per row, unique name)
/// - `participants` table (one student per row, unique email)
/// - `activity_participants` link table (one enrollment per row)
pub const SQLITE_INIT: &str = r"
-- ---------------------------------------------------------------------------
-- Activities (one extracurricular activity per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY NOT NULL,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    schedule TEXT NOT NULL,
    max_participants INTEGER NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Participants (one student per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY NOT NULL,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL -- RFC3339
);

-- ---------------------------------------------------------------------------
-- Enrollments (link table, one (activity, participant) per row)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS activity_participants (
    activity_id INTEGER NOT NULL REFERENCES activities(id),
    participant_id INTEGER NOT NULL REFERENCES participants(id),
    PRIMARY KEY (activity_id, participant_id)
);

CREATE INDEX IF NOT EXISTS idx_activity_participants_participant
    ON activity_participants(participant_id);
";
