use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::Arc;

use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};

use super::data::*;
use super::helpers::*;
use super::identity::Identity;

#[get("/get_profile")]
pub fn get_profile(
    identity: Identity,
    db_connection: &State<DBConnection>,
) -> StoreResult<Json<Profile>> {
    let db_connection = db_connection.lock()?;

    let profile = get_profile_from_db(&identity.0, &db_connection)?;

    Ok(Json(profile))
}

#[post("/set_display_name", format = "json", data = "<request>")]
pub fn set_display_name(
    identity: Identity,
    request: Json<SetDisplayNameRequest>,
    db_connection: &State<DBConnection>,
) -> StoreResult<()> {
    let db_connection = db_connection.lock()?;

    update_display_name(&identity.0, &request.display_name, &db_connection)?;

    Ok(())
}

#[post("/delete_account")]
pub fn delete_account(
    identity: Identity,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        delete_account_from_db(&identity.0, &db_connection)?;
    }

    // Every entity table cascades with the profile row, so every per-table
    // subscription gets a deletion signal.
    for table in [Table::Tasks, Table::TimeBlocks, Table::Goals, Table::Milestones].iter() {
        bus.publish(
            &identity.0,
            ChangeEvent {
                table: *table,
                kind: ChangeKind::Delete,
            },
        );
    }

    Ok(())
}
