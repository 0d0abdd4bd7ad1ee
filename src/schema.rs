use rusqlite::Connection;

use crate::error::StoreResult;

/// Creates the five tables if they do not exist yet. Safe to run on every
/// startup. Foreign keys must be enabled per connection for the milestone
/// and account cascades to fire.
pub fn create_tables(connection: &Connection) -> StoreResult<()> {
    connection.execute_batch(
        "PRAGMA foreign_keys = ON;

         CREATE TABLE IF NOT EXISTS profiles (
             owner_id TEXT PRIMARY KEY,
             display_name TEXT NOT NULL DEFAULT '',
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS tasks (
             id INTEGER PRIMARY KEY,
             owner_id TEXT NOT NULL REFERENCES profiles(owner_id) ON DELETE CASCADE,
             title TEXT NOT NULL,
             completed INTEGER NOT NULL DEFAULT 0,
             task_date TEXT NOT NULL,
             alarm_time TEXT,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS time_blocks (
             id INTEGER PRIMARY KEY,
             owner_id TEXT NOT NULL REFERENCES profiles(owner_id) ON DELETE CASCADE,
             title TEXT NOT NULL,
             block_date TEXT NOT NULL,
             start_time TEXT NOT NULL,
             end_time TEXT NOT NULL,
             description TEXT,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS goals (
             id INTEGER PRIMARY KEY,
             owner_id TEXT NOT NULL REFERENCES profiles(owner_id) ON DELETE CASCADE,
             title TEXT NOT NULL,
             description TEXT,
             goal_type TEXT NOT NULL,
             target_date TEXT,
             completed INTEGER NOT NULL DEFAULT 0,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );

         CREATE TABLE IF NOT EXISTS milestones (
             id INTEGER PRIMARY KEY,
             owner_id TEXT NOT NULL REFERENCES profiles(owner_id) ON DELETE CASCADE,
             title TEXT NOT NULL,
             description TEXT,
             completed INTEGER NOT NULL DEFAULT 0,
             target_date TEXT,
             goal_id INTEGER REFERENCES goals(id) ON DELETE CASCADE,
             created_at TEXT NOT NULL,
             updated_at TEXT NOT NULL
         );

         CREATE INDEX IF NOT EXISTS idx_tasks_owner_date ON tasks(owner_id, task_date);
         CREATE INDEX IF NOT EXISTS idx_time_blocks_owner_date ON time_blocks(owner_id, block_date);
         CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_id);
         CREATE INDEX IF NOT EXISTS idx_milestones_owner ON milestones(owner_id);",
    )?;

    Ok(())
}
