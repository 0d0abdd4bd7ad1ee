use chrono::offset::Utc;
use rusqlite::{params, Connection};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};

use super::data::*;

pub fn get_tasks_for_day(
    owner: &OwnerID,
    date: &str,
    db_connection: &Connection,
) -> StoreResult<Vec<(TaskID, Task)>> {
    let mut tasks_statement = db_connection.prepare(
        "SELECT id, owner_id, title, completed, task_date, alarm_time FROM tasks
         WHERE owner_id = ?1 AND task_date = ?2
         ORDER BY created_at ASC, id ASC",
    )?;

    let task_rows = tasks_statement.query_map(params![owner, date], |row| {
        Ok((
            row.get::<usize, TaskID>(0)?,
            Task {
                owner_id: row.get(1)?,
                title: row.get(2)?,
                completed: row.get(3)?,
                task_date: row.get(4)?,
                alarm_time: row.get(5)?,
            },
        ))
    })?;

    let mut tasks = vec![];

    for row_result in task_rows {
        tasks.push(row_result?);
    }

    Ok(tasks)
}

pub fn add_task_to_db(
    identity: &OwnerID,
    task: &NewTask,
    db_connection: &Connection,
) -> StoreResult<TaskID> {
    if &task.owner_id != identity {
        return Err(StoreError::PolicyDenied);
    }
    task.validate()?;

    let now = Utc::now().to_rfc3339();
    db_connection.execute(
        "INSERT INTO tasks (owner_id, title, completed, task_date, alarm_time, created_at, updated_at)
         VALUES (?1, ?2, 0, ?3, ?4, ?5, ?5)",
        params![task.owner_id, task.title, task.task_date, task.alarm_time, now],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn update_task_completion(
    owner: &OwnerID,
    task_id: TaskID,
    completed: bool,
    db_connection: &Connection,
) -> StoreResult<()> {
    let now = Utc::now().to_rfc3339();
    let changed = db_connection.execute(
        "UPDATE tasks SET completed = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
        params![completed, now, task_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}

pub fn delete_task_from_db(
    owner: &OwnerID,
    task_id: TaskID,
    db_connection: &Connection,
) -> StoreResult<()> {
    let changed = db_connection.execute(
        "DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2",
        params![task_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}
