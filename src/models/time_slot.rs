use serde::{Deserialize, Serialize};

/// Coarse part of the day a slot falls into, used for grouping on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

/// One fixed daily slot, identified by its canonical "HH:MM" start time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub label: String,
    pub period: Period,
}
