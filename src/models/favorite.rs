// Favorite Model
// Saved badge snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BadgeConfig, BadgeMode};

/// Upper bound on stored favorites; the oldest entries are evicted first
pub const MAX_FAVORITES: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Creation time in milliseconds, unique within the list
    pub id: i64,
    pub name: String,
    pub mode: BadgeMode,
    pub url: String,
    pub config: BadgeConfig,
    pub created_at: DateTime<Utc>,
}
