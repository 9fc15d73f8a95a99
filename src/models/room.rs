use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Recording,
    Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u32,
    pub name: String,
    pub subtitle: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
}
