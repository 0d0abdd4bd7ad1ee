use std::sync::Arc;

use crate::accounts::data::OwnerID;
use crate::blocks;
use crate::blocks::data::TimeBlock;
use crate::data::DBConnection;
use crate::error::StoreResult;
use crate::events::{ChangeBus, ChangeEvent, ChangeKind, Table};
use crate::goals;
use crate::goals::data::{Goal, NewGoal};
use crate::milestones;
use crate::milestones::data::{Milestone, NewMilestone};
use crate::tasks;
use crate::tasks::data::{NewTask, Task};

use super::{CompletionStore, RecordID, RecordStore};

/// In-process record store: the same owner-scoped helpers the endpoints
/// use, behind the synchronizer's trait seam. Successful writes publish on
/// the change bus, so a store's own mutation also rings its subscribers.
#[derive(Clone)]
pub struct DirectStore {
    db_connection: DBConnection,
    bus: Arc<ChangeBus>,
}

impl DirectStore {
    pub fn new(db_connection: DBConnection, bus: Arc<ChangeBus>) -> Self {
        DirectStore { db_connection, bus }
    }

    fn publish(&self, owner: &OwnerID, table: Table, kind: ChangeKind) {
        self.bus.publish(owner, ChangeEvent { table, kind });
    }
}

impl RecordStore<Task> for DirectStore {
    type Filter = String;
    type Draft = NewTask;

    fn fetch(&self, owner: &OwnerID, date: &String) -> StoreResult<Vec<(RecordID, Task)>> {
        let db_connection = self.db_connection.lock()?;
        tasks::helpers::get_tasks_for_day(owner, date, &db_connection)
    }

    fn insert(&self, owner: &OwnerID, draft: &NewTask) -> StoreResult<RecordID> {
        let task_id = {
            let db_connection = self.db_connection.lock()?;
            tasks::helpers::add_task_to_db(owner, draft, &db_connection)?
        };
        self.publish(owner, Table::Tasks, ChangeKind::Insert);

        Ok(task_id)
    }
}

impl CompletionStore<Task> for DirectStore {
    fn set_completed(&self, owner: &OwnerID, id: RecordID, completed: bool) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            tasks::helpers::update_task_completion(owner, id, completed, &db_connection)?;
        }
        self.publish(owner, Table::Tasks, ChangeKind::Update);

        Ok(())
    }
}

impl RecordStore<TimeBlock> for DirectStore {
    type Filter = String;
    type Draft = TimeBlock;

    fn fetch(&self, owner: &OwnerID, date: &String) -> StoreResult<Vec<(RecordID, TimeBlock)>> {
        let db_connection = self.db_connection.lock()?;
        blocks::helpers::get_blocks_for_day(owner, date, &db_connection)
    }

    fn insert(&self, owner: &OwnerID, draft: &TimeBlock) -> StoreResult<RecordID> {
        let block_id = {
            let db_connection = self.db_connection.lock()?;
            blocks::helpers::add_block_to_db(owner, draft, &db_connection)?
        };
        self.publish(owner, Table::TimeBlocks, ChangeKind::Insert);

        Ok(block_id)
    }
}

impl RecordStore<Goal> for DirectStore {
    type Filter = ();
    type Draft = NewGoal;

    fn fetch(&self, owner: &OwnerID, _filter: &()) -> StoreResult<Vec<(RecordID, Goal)>> {
        let db_connection = self.db_connection.lock()?;
        goals::helpers::get_goals_from_db(owner, &db_connection)
    }

    fn insert(&self, owner: &OwnerID, draft: &NewGoal) -> StoreResult<RecordID> {
        let goal_id = {
            let db_connection = self.db_connection.lock()?;
            goals::helpers::add_goal_to_db(owner, draft, &db_connection)?
        };
        self.publish(owner, Table::Goals, ChangeKind::Insert);

        Ok(goal_id)
    }
}

impl CompletionStore<Goal> for DirectStore {
    fn set_completed(&self, owner: &OwnerID, id: RecordID, completed: bool) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            goals::helpers::update_goal_completion(owner, id, completed, &db_connection)?;
        }
        self.publish(owner, Table::Goals, ChangeKind::Update);

        Ok(())
    }
}

impl RecordStore<Milestone> for DirectStore {
    type Filter = ();
    type Draft = NewMilestone;

    fn fetch(&self, owner: &OwnerID, _filter: &()) -> StoreResult<Vec<(RecordID, Milestone)>> {
        let db_connection = self.db_connection.lock()?;
        milestones::helpers::get_milestones_from_db(owner, &db_connection)
    }

    fn insert(&self, owner: &OwnerID, draft: &NewMilestone) -> StoreResult<RecordID> {
        let milestone_id = {
            let db_connection = self.db_connection.lock()?;
            milestones::helpers::add_milestone_to_db(owner, draft, &db_connection)?
        };
        self.publish(owner, Table::Milestones, ChangeKind::Insert);

        Ok(milestone_id)
    }
}

impl CompletionStore<Milestone> for DirectStore {
    fn set_completed(&self, owner: &OwnerID, id: RecordID, completed: bool) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            milestones::helpers::update_milestone_completion(owner, id, completed, &db_connection)?;
        }
        self.publish(owner, Table::Milestones, ChangeKind::Update);

        Ok(())
    }
}

/// Owner-scoped deletion with the matching change signal; a goal deletion
/// additionally signals the milestones that cascaded with it.
impl DirectStore {
    pub fn delete_task(&self, owner: &OwnerID, id: RecordID) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            tasks::helpers::delete_task_from_db(owner, id, &db_connection)?;
        }
        self.publish(owner, Table::Tasks, ChangeKind::Delete);

        Ok(())
    }

    pub fn delete_block(&self, owner: &OwnerID, id: RecordID) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            blocks::helpers::delete_block_from_db(owner, id, &db_connection)?;
        }
        self.publish(owner, Table::TimeBlocks, ChangeKind::Delete);

        Ok(())
    }

    pub fn delete_goal(&self, owner: &OwnerID, id: RecordID) -> StoreResult<()> {
        let cascaded_milestones = {
            let db_connection = self.db_connection.lock()?;
            goals::helpers::delete_goal_from_db(owner, id, &db_connection)?
        };
        self.publish(owner, Table::Goals, ChangeKind::Delete);
        if cascaded_milestones > 0 {
            self.publish(owner, Table::Milestones, ChangeKind::Delete);
        }

        Ok(())
    }

    pub fn delete_milestone(&self, owner: &OwnerID, id: RecordID) -> StoreResult<()> {
        {
            let db_connection = self.db_connection.lock()?;
            milestones::helpers::delete_milestone_from_db(owner, id, &db_connection)?;
        }
        self.publish(owner, Table::Milestones, ChangeKind::Delete);

        Ok(())
    }
}
