use chrono::offset::Utc;
use rusqlite::{params, Connection};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};

use super::data::*;

pub fn get_blocks_for_day(
    owner: &OwnerID,
    date: &str,
    db_connection: &Connection,
) -> StoreResult<Vec<(BlockID, TimeBlock)>> {
    let mut blocks_statement = db_connection.prepare(
        "SELECT id, owner_id, title, block_date, start_time, end_time, description
         FROM time_blocks
         WHERE owner_id = ?1 AND block_date = ?2
         ORDER BY start_time ASC, id ASC",
    )?;

    let block_rows = blocks_statement.query_map(params![owner, date], |row| {
        Ok((
            row.get::<usize, BlockID>(0)?,
            TimeBlock {
                owner_id: row.get(1)?,
                title: row.get(2)?,
                block_date: row.get(3)?,
                start_time: row.get(4)?,
                end_time: row.get(5)?,
                description: row.get(6)?,
            },
        ))
    })?;

    let mut blocks = vec![];

    for row_result in block_rows {
        blocks.push(row_result?);
    }

    Ok(blocks)
}

pub fn add_block_to_db(
    identity: &OwnerID,
    block: &TimeBlock,
    db_connection: &Connection,
) -> StoreResult<BlockID> {
    if &block.owner_id != identity {
        return Err(StoreError::PolicyDenied);
    }
    block.validate()?;

    let now = Utc::now().to_rfc3339();
    db_connection.execute(
        "INSERT INTO time_blocks (owner_id, title, block_date, start_time, end_time, description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            block.owner_id,
            block.title,
            block.block_date,
            block.start_time,
            block.end_time,
            block.description,
            now
        ],
    )?;

    Ok(db_connection.last_insert_rowid())
}

pub fn delete_block_from_db(
    owner: &OwnerID,
    block_id: BlockID,
    db_connection: &Connection,
) -> StoreResult<()> {
    let changed = db_connection.execute(
        "DELETE FROM time_blocks WHERE id = ?1 AND owner_id = ?2",
        params![block_id, owner],
    )?;

    if changed == 0 {
        return Err(StoreError::RowNotFound);
    }

    Ok(())
}
