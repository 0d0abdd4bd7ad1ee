use chrono::offset::Utc;
use rusqlite::{params, Connection};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};

use super::data::*;

pub fn get_milestones_from_db(
    owner: &OwnerID,
    db_connection: &Connection,
) -> StoreResult<Vec<(MilestoneID, Milestone)>> {
    let mut milestones_statement = db_connection.prepare(
        "SELECT id, owner_id, title, description, completed, target_date, goal_id FROM milestones
         WHERE owner_id = ?1
         ORDER BY created_at DESC, id DESC",
    )?;

    let milestone_rows = milestones_statement.query_map(params![owner], |row| {
        Ok((
            row.get::<usize, MilestoneID>(0)?,
            Milestone {
                owner_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                completed: row.get(4)?,
                target_date: row.get(5)?,
                goal_id: row.get(6)?,
            },
        ))
    })?;

    let mut milestones = vec![];

    for row_result in milestone_rows {
        milestones.push(row_result?);
    }

    Ok(milestones)
}

pub fn add_milestone_to_db(
    identity: &OwnerID,
    milestone: &NewMilestone,
    db_connection: &Connection,
) -> StoreResult<MilestoneID> {
    if &milestone.owner_id != identity {
        return Err(StoreError::PolicyDenied);
    }
    milestone.validate()?;

    // A goal reference must resolve under the caller's own owner predicate.
    // A foreign goal gets the same answer as a missing one.
    if let Some(goal_id) = milestone.goal_id {
        let owned_goals: i64 = db_connection.query_row(
            "SELECT COUNT(*) FROM goals WHERE id = ?1 AND owner_id = ?2",
            params![goal_id, identity],
            |row| row.get(0),
        )?;

        if owned_goals == 0 {
            return Err(StoreError::RowNotFound);
        }
    }

    let now = Utc::now().to_rfc3339();
    db_connection.execute(
        "INSERT INTO milestones (owner_id, title, description, completed, target_date, goal_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, 0, ?4, ?5, ?6, ?6)",
        params![
            milestone.owner_id,
            milestone.title,
            milestone.description,
            milestone.target_date,
            milestone.goal_id,
            now
        ],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn update_milestone_completion(
    owner: &OwnerID,
    milestone_id: MilestoneID,
    completed: bool,
    db_connection: &Connection,
) -> StoreResult<()> {
    let now = Utc::now().to_rfc3339();
    let changed = db_connection.execute(
        "UPDATE milestones SET completed = ?1, updated_at = ?2 WHERE id = ?3 AND owner_id = ?4",
        params![completed, now, milestone_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}

pub fn delete_milestone_from_db(
    owner: &OwnerID,
    milestone_id: MilestoneID,
    db_connection: &Connection,
) -> StoreResult<()> {
    let changed = db_connection.execute(
        "DELETE FROM milestones WHERE id = ?1 AND owner_id = ?2",
        params![milestone_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}
