use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::Arc;

use crate::accounts::identity::Identity;
use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};

use super::data::*;
use super::helpers::*;

#[get("/get_goals")]
pub fn get_goals(
    identity: Identity,
    db_connection: &State<DBConnection>,
) -> StoreResult<Json<Vec<(GoalID, Goal)>>> {
    let db_connection = db_connection.lock()?;

    let goals = get_goals_from_db(&identity.0, &db_connection)?;

    Ok(Json(goals))
}

#[post("/add_goal", format = "json", data = "<goal>")]
pub fn add_goal(
    identity: Identity,
    goal: Json<NewGoal>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<Json<AddGoalResult>> {
    let goal_id = {
        let db_connection = db_connection.lock()?;
        add_goal_to_db(&identity.0, &goal, &db_connection)?
    };

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Goals,
            kind: ChangeKind::Insert,
        },
    );

    Ok(Json(AddGoalResult { goal_id }))
}

#[post("/set_goal_completion", format = "json", data = "<request>")]
pub fn set_goal_completion(
    identity: Identity,
    request: Json<SetGoalCompletionRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        update_goal_completion(&identity.0, request.goal_id, request.completed, &db_connection)?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Goals,
            kind: ChangeKind::Update,
        },
    );

    Ok(())
}

#[post("/delete_goal", format = "json", data = "<request>")]
pub fn delete_goal(
    identity: Identity,
    request: Json<DeleteGoalRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    let cascaded_milestones = {
        let db_connection = db_connection.lock()?;
        delete_goal_from_db(&identity.0, request.goal_id, &db_connection)?
    };

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Goals,
            kind: ChangeKind::Delete,
        },
    );

    if cascaded_milestones > 0 {
        bus.publish(
            &identity.0,
            ChangeEvent {
                table: Table::Milestones,
                kind: ChangeKind::Delete,
            },
        );
    }

    Ok(())
}
