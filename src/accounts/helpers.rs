use chrono::offset::Utc;
use rusqlite::{params, Connection};

use crate::error::{StoreError, StoreResult};

use super::data::*;

/// Materializes the companion profile row for an identity. Runs on every
/// authenticated request and must stay idempotent.
pub fn ensure_profile(owner: &OwnerID, db_connection: &Connection) -> StoreResult<()> {
    let now = Utc::now().to_rfc3339();
    db_connection.execute(
        "INSERT OR IGNORE INTO profiles (owner_id, display_name, created_at, updated_at)
         VALUES (?1, '', ?2, ?2)",
        params![owner, now],
    )?;

    Ok(())
}

pub fn get_profile_from_db(owner: &OwnerID, db_connection: &Connection) -> StoreResult<Profile> {
    let profile = db_connection.query_row(
        "SELECT owner_id, display_name FROM profiles WHERE owner_id = ?1",
        params![owner],
        |row| {
            Ok(Profile {
                owner_id: row.get(0)?,
                display_name: row.get(1)?,
            })
        },
    )?;

    Ok(profile)
}

pub fn update_display_name(
    owner: &OwnerID,
    display_name: &str,
    db_connection: &Connection,
) -> StoreResult<()> {
    let now = Utc::now().to_rfc3339();
    let changed = db_connection.execute(
        "UPDATE profiles SET display_name = ?1, updated_at = ?2 WHERE owner_id = ?3",
        params![display_name, now, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}

/// Removes the profile row; the four entity tables cascade with it.
pub fn delete_account_from_db(owner: &OwnerID, db_connection: &Connection) -> StoreResult<()> {
    let changed = db_connection.execute(
        "DELETE FROM profiles WHERE owner_id = ?1",
        params![owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}
