use rocket::serde::json::Json;
use rocket::{get, post, State};

use std::sync::Arc;

use crate::accounts::identity::Identity;
use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};

use super::data::*;
use super::helpers::*;

#[get("/get_tasks?<date>")]
pub fn get_tasks(
    identity: Identity,
    date: &str,
    db_connection: &State<DBConnection>,
) -> StoreResult<Json<Vec<(TaskID, Task)>>> {
    let db_connection = db_connection.lock()?;

    let tasks = get_tasks_for_day(&identity.0, date, &db_connection)?;

    Ok(Json(tasks))
}

#[post("/add_task", format = "json", data = "<task>")]
pub fn add_task(
    identity: Identity,
    task: Json<NewTask>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<Json<AddTaskResult>> {
    let task_id = {
        let db_connection = db_connection.lock()?;
        add_task_to_db(&identity.0, &task, &db_connection)?
    };

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Tasks,
            kind: ChangeKind::Insert,
        },
    );

    Ok(Json(AddTaskResult { task_id }))
}

#[post("/set_task_completion", format = "json", data = "<request>")]
pub fn set_task_completion(
    identity: Identity,
    request: Json<SetTaskCompletionRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        update_task_completion(&identity.0, request.task_id, request.completed, &db_connection)?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Tasks,
            kind: ChangeKind::Update,
        },
    );

    Ok(())
}

#[post("/delete_task", format = "json", data = "<request>")]
pub fn delete_task(
    identity: Identity,
    request: Json<DeleteTaskRequest>,
    db_connection: &State<DBConnection>,
    bus: &State<Arc<ChangeBus>>,
) -> StoreResult<()> {
    {
        let db_connection = db_connection.lock()?;
        delete_task_from_db(&identity.0, request.task_id, &db_connection)?;
    }

    bus.publish(
        &identity.0,
        ChangeEvent {
            table: Table::Tasks,
            kind: ChangeKind::Delete,
        },
    );

    Ok(())
}
