mod roster;

pub use roster::{ApiErrorBody, ApiErrorObject, RosterError};
