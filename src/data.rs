use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::error::StoreResult;

pub type DBConnection = Arc<Mutex<Connection>>;

/// Structural validation for draft records, checked before any request is
/// issued to the store.
pub trait Validate {
    fn validate(&self) -> StoreResult<()>;
}
