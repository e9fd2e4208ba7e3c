//! Line-clear scoring and combo tracking.
//!
//! Each cleared line is worth [`LINE_POINTS`]; clearing three lines at once doubles the clear and
//! four or more triples it. A clear that follows fewer than [`COMBO_WINDOW`] clear-less placements
//! grows the combo, and every combo step adds [`COMBO_POINTS`] on top of the clear.

use serde::{Deserialize, Serialize};

pub const LINE_POINTS: u32 = 10;
pub const COMBO_POINTS: u32 = 10;
pub const COMBO_WINDOW: u32 = 3;

pub const fn line_multiplier(lines: u32) -> u32 {
    match lines {
        0..=2 => 1,
        3 => 2,
        _ => 3,
    }
}

/// Points for clearing `lines` lines at once, before any combo bonus.
pub const fn clear_score(lines: u32) -> u32 {
    lines * LINE_POINTS * line_multiplier(lines)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearScore {
    pub lines: u32,
    pub base: u32,
    pub multiplier: u32,
    pub combo: u32,
    pub combo_bonus: u32,
}

impl ClearScore {
    pub const fn new(lines: u32, combo: u32) -> Self {
        Self {
            lines,
            base: lines * LINE_POINTS,
            multiplier: line_multiplier(lines),
            combo,
            combo_bonus: combo * COMBO_POINTS,
        }
    }

    pub const fn clear_points(&self) -> u32 {
        self.base * self.multiplier
    }

    pub const fn total(&self) -> u32 {
        self.clear_points() + self.combo_bonus
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboTracker {
    combo: u32,
    moves_since_last_clear: u32,
}

impl ComboTracker {
    pub const fn combo(&self) -> u32 {
        self.combo
    }

    pub const fn moves_since_last_clear(&self) -> u32 {
        self.moves_since_last_clear
    }

    /// Placement that cleared nothing. The combo itself is left alone.
    pub fn record_miss(&mut self) {
        self.moves_since_last_clear = self.moves_since_last_clear.saturating_add(1);
    }

    /// Placement that cleared at least one line, returns the new combo.
    ///
    /// The window is checked against the miss counter as it was before this clear.
    pub fn record_clear(&mut self) -> u32 {
        self.combo = if self.moves_since_last_clear < COMBO_WINDOW {
            self.combo.saturating_add(1)
        } else {
            0
        };
        self.moves_since_last_clear = 0;
        self.combo
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
