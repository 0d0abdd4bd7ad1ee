use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::Arc;

use crate::accounts::identity::Identity;
use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};

use super::data::*;
use super::helpers::*;

#[get("/get_milestones")]
pub fn get_milestones(
    identity: Identity,
    db_connection: &State<DBConnection>,
) -> StoreResult<Json<Vec<(MilestoneID, Milestone)>>> {
    let db_connection = db_connection.lock()?;

    let milestones = get_milestones_from_db(&identity.0, &db_connection)?;

    Ok(Json(milestones))
}

#[post("/add_milestone", format = "json", data = "<milestone>")]
pub fn add_milestone(
    identity: Identity,
    milestone: Json<NewMilestone>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<Json<AddMilestoneResult>> {
    let milestone_id = {
        let db_connection = db_connection.lock()?;
        add_milestone_to_db(&identity.0, &milestone, &db_connection)?
    };

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Milestones,
            kind: ChangeKind::Insert,
        },
    );

    Ok(Json(AddMilestoneResult { milestone_id }))
}

#[post("/set_milestone_completion", format = "json", data = "<request>")]
pub fn set_milestone_completion(
    identity: Identity,
    request: Json<SetMilestoneCompletionRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        update_milestone_completion(
            &identity.0,
            request.milestone_id,
            request.completed,
            &db_connection,
        )?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Milestones,
            kind: ChangeKind::Update,
        },
    );

    Ok(())
}

#[post("/delete_milestone", format = "json", data = "<request>")]
pub fn delete_milestone(
    identity: Identity,
    request: Json<DeleteMilestoneRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        delete_milestone_from_db(&identity.0, request.milestone_id, &db_connection)?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Milestones,
            kind: ChangeKind::Delete,
        },
    );

    Ok(())
}
