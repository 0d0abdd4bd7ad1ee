use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};
use crate::sync::Completable;

pub type GoalID = i64;

/// Set at creation; the client offers no edit path for it afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Yearly,
    Monthly,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Yearly => "yearly",
            GoalType::Monthly => "monthly",
        }
    }
}

impl ToSql for GoalType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for GoalType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "yearly" => Ok(GoalType::Yearly),
            "monthly" => Ok(GoalType::Monthly),
            other => Err(FromSqlError::Other(
                format!("unknown goal type: {}", other).into(),
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub owner_id: OwnerID,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: GoalType,
    pub target_date: Option<String>,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewGoal {
    pub owner_id: OwnerID,
    pub title: String,
    pub description: Option<String>,
    pub goal_type: GoalType,
    pub target_date: Option<String>,
}

impl Validate for NewGoal {
    fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title"));
        }

        Ok(())
    }
}

impl Completable for Goal {
    fn completed(&self) -> bool {
        self.completed
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddGoalResult {
    pub goal_id: GoalID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetGoalCompletionRequest {
    pub goal_id: GoalID,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteGoalRequest {
    pub goal_id: GoalID,
}
