use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::Arc;

use crate::accounts::identity::Identity;
use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};

use super::data::*;
use super::helpers::*;

#[get("/get_blocks?<date>")]
pub fn get_blocks(
    identity: Identity,
    date: &str,
    db_connection: &State<DBConnection>,
) -> StoreResult<Json<Vec<(BlockID, TimeBlock)>>> {
    let db_connection = db_connection.lock()?;

    let blocks = get_blocks_for_day(&identity.0, date, &db_connection)?;

    Ok(Json(blocks))
}

#[post("/add_block", format = "json", data = "<block>")]
pub fn add_block(
    identity: Identity,
    block: Json<TimeBlock>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<Json<AddBlockResult>> {
    let block_id = {
        let db_connection = db_connection.lock()?;
        add_block_to_db(&identity.0, &block, &db_connection)?
    };

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::TimeBlocks,
            kind: ChangeKind::Insert,
        },
    );

    Ok(Json(AddBlockResult { block_id }))
}

#[post("/delete_block", format = "json", data = "<request>")]
pub fn delete_block(
    identity: Identity,
    request: Json<DeleteBlockRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        delete_block_from_db(&identity.0, request.block_id, &db_connection)?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::TimeBlocks,
            kind: ChangeKind::Delete,
        },
    );

    Ok(())
}
