use serde::{Deserialize, Serialize};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};
use crate::goals::data::GoalID;
use crate::sync::Completable;

pub type MilestoneID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Milestone {
    pub owner_id: OwnerID,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub target_date: Option<String>,
    pub goal_id: Option<GoalID>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewMilestone {
    pub owner_id: OwnerID,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<String>,
    pub goal_id: Option<GoalID>,
}

impl Validate for NewMilestone {
    fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title"));
        }

        Ok(())
    }
}

impl Completable for Milestone {
    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddMilestoneResult {
    pub milestone_id: MilestoneID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetMilestoneCompletionRequest {
    pub milestone_id: MilestoneID,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteMilestoneRequest {
    pub milestone_id: MilestoneID,
}
