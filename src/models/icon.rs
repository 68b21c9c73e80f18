// Icon Model
// Named logos offered by the icon picker

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    #[default]
    Popular,
    Tech,
    Social,
    Tools,
    Brands,
}

impl IconCategory {
    pub const ALL: [IconCategory; 5] = [
        IconCategory::Popular,
        IconCategory::Tech,
        IconCategory::Social,
        IconCategory::Tools,
        IconCategory::Brands,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IconEntry {
    /// Slug passed as the `logo` query parameter
    pub name: &'static str,
    pub display: &'static str,
}
