use core::fmt;
use serde::{Deserialize, Serialize};

/// Fixed block palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Orange,
    Red,
    Amber,
    Yellow,
    Lime,
    Emerald,
    Cyan,
    Blue,
    Violet,
    Fuchsia,
}

impl Color {
    pub const ALL: [Self; 10] = [
        Self::Orange,
        Self::Red,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Emerald,
        Self::Cyan,
        Self::Blue,
        Self::Violet,
        Self::Fuchsia,
    ];

    /// Color token handed to renderers.
    pub const fn hex(self) -> &'static str {
        use Color::*;
        match self {
            Orange => "#F97316",
            Red => "#EF4444",
            Amber => "#F59E0B",
            Yellow => "#EAB308",
            Lime => "#84CC16",
            Emerald => "#10B981",
            Cyan => "#06B6D4",
            Blue => "#3B82F6",
            Violet => "#8B5CF6",
            Fuchsia => "#D946EF",
        }
    }

    /// Single-letter form used by the text board dump.
    pub const fn symbol(self) -> char {
        use Color::*;
        match self {
            Orange => 'O',
            Red => 'R',
            Amber => 'A',
            Yellow => 'Y',
            Lime => 'L',
            Emerald => 'E',
            Cyan => 'C',
            Blue => 'B',
            Violet => 'V',
            Fuchsia => 'F',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.symbol() == symbol)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Filled(Color),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled(_))
    }

    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Filled(color) => Some(color),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Filled(color) => color.symbol(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}
