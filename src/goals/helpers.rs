use chrono::offset::Utc;
use rusqlite::{params, Connection};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};

use super::data::*;

pub fn get_goals_from_db(
    owner: &OwnerID,
    db_connection: &Connection,
) -> StoreResult<Vec<(GoalID, Goal)>> {
    let mut goals_statement = db_connection.prepare(
        "SELECT id, owner_id, title, description, goal_type, target_date, completed FROM goals
         WHERE owner_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let goal_rows = goals_statement.query_map(params![owner], |row| {
        Ok((
            row.get::<usize, GoalID>(0)?,
            Goal {
                owner_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                goal_type: row.get(4)?,
                target_date: row.get(5)?,
                completed: row.get(6)?,
            },
        ))
    })?;

    let mut goals = vec![];

    for row_result in goal_rows {
        goals.push(row_result?);
    }

    Ok(goals)
}

pub fn add_goal_to_db(
    identity: &OwnerID,
    goal: &NewGoal,
    db_connection: &Connection,
) -> StoreResult<GoalID> {
    if &goal.owner_id != identity {
        return Err(StoreError::PolicyDenied);
    }
    goal.validate()?;

    let now = Utc::now().to_rfc3339();
    db_connection.execute(
        "INSERT INTO goals (owner_id, title, description, goal_type, target_date, completed, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?6)",
        params![
            goal.owner_id,
            goal.title,
            goal.description,
            goal.goal_type,
            goal.target_date,
            now
        ],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn update_goal_completion(
    owner: &OwnerID,
    goal_id: GoalID,
    completed: bool,
    db_connection: &Connection,
) -> StoreResult<()> {
    let now = Utc::now().to_rfc3339();
    let changed = db_connection.execute(
        "UPDATE goals SET completed = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
        params![completed, now, goal_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}

/// Deletes a goal, cascading its milestones. Returns how many milestones
/// went with it so the caller can signal the milestones table as well.
pub fn delete_goal_from_db(
    owner: &OwnerID,
    goal_id: GoalID,
    db_connection: &Connection,
) -> StoreResult<usize> {
    let milestone_count: i64 = db_connection.query_row(
        "SELECT COUNT(*) FROM milestones WHERE owner_id = ?1 AND goal_id = ?2",
        params![owner, goal_id],
        |row| row.get(0),
    )?;

    let changed = db_connection.execute(
        "DELETE FROM goals WHERE id = ?1 AND owner_id = ?2",
        params![goal_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(milestone_count as usize)
}
