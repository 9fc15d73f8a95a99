use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Podcast,
    Lecture,
    Interview,
    Video,
    Meeting,
    Workshop,
}

impl Purpose {
    pub const ALL: [Purpose; 6] = [
        Purpose::Podcast,
        Purpose::Lecture,
        Purpose::Interview,
        Purpose::Video,
        Purpose::Meeting,
        Purpose::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Podcast => "podcast",
            Purpose::Lecture => "lecture",
            Purpose::Interview => "interview",
            Purpose::Video => "video",
            Purpose::Meeting => "meeting",
            Purpose::Workshop => "workshop",
        }
    }

    /// Human readable label shown next to the purpose
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Podcast => "Podcast Recording",
            Purpose::Lecture => "Lecture Capture",
            Purpose::Interview => "Interview Session",
            Purpose::Video => "Video Production",
            Purpose::Meeting => "Team Meeting",
            Purpose::Workshop => "Workshop/Training",
        }
    }
}
