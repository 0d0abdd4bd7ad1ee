use serde::{Deserialize, Serialize};

use crate::accounts::data::OwnerID;
use crate::data::Validate;
use crate::error::{StoreError, StoreResult};

pub type BlockID = i64;

/// A half-open time interval within a day. Overlaps with other blocks are
/// deliberately not rejected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeBlock {
    pub owner_id: OwnerID,
    pub title: String,
    pub block_date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
}

impl Validate for TimeBlock {
    fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() {
            return Err(StoreError::Validation("title"));
        }
        if self.block_date.trim().is_empty() {
            return Err(StoreError::Validation("block_date"));
        }
        if self.start_time.trim().is_empty() {
            return Err(StoreError::Validation("start_time"));
        }
        if self.end_time.trim().is_empty() {
            return Err(StoreError::Validation("end_time"));
        }

        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddBlockResult {
    pub block_id: BlockID,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteBlockRequest {
    pub block_id: BlockID,
}
