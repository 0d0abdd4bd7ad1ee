use serde::{Deserialize, Serialize};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};
use crate::sync::Completable;

pub type TaskID = i64;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub owner_id: OwnerID,
    pub title: String,
    pub completed: bool,
    pub task_date: String,
    pub alarm_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewTask {
    pub owner_id: OwnerID,
    pub title: String,
    pub task_date: String,
    pub alarm_time: Option<String>,
}

impl Validate for NewTask {
    fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title"));
        }
        if self.task_date.trim().is_empty() {
            return Err(StoreError::Validation("task_date"));
        }

        Ok(())
    }
}

impl Completable for Task {
    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddTaskResult {
    pub task_id: TaskID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetTaskCompletionRequest {
    pub task_id: TaskID,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteTaskRequest {
    pub task_id: TaskID,
}
