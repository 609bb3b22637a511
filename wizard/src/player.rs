/// Fixed palette cycled by roster position when a player joins without an
/// explicit color.
pub const DEFAULT_COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
];

/// A scorekeeping participant: a display name unique within the game and a
/// cosmetic display color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub color: String,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            color: color.into(),
        }
    }

    pub(crate) fn at_position(name: String, position: usize) -> Self {
        Player {
            color: DEFAULT_COLORS[position % DEFAULT_COLORS.len()].to_owned(),
            name,
        }
    }
}
