use serde::{Deserialize, Serialize};

pub type OwnerID = String;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub owner_id: OwnerID,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SetDisplayNameRequest {
    pub display_name: String,
}
