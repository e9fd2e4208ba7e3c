use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Over,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// What a successful placement did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOutcome {
    pub block: Block,
    pub cleared_rows: Vec<Coord>,
    pub cleared_cols: Vec<Coord>,
    pub points: u32,
    pub combo: u32,
    pub refilled: bool,
    pub new_high_score: Option<u32>,
    pub game_over: bool,
}

impl PlaceOutcome {
    pub fn lines_cleared(&self) -> u32 {
        (self.cleared_rows.len() + self.cleared_cols.len()) as u32
    }

    pub fn has_clear(&self) -> bool {
        self.lines_cleared() > 0
    }
}

/// Owns the grid, the block supply and the score, and enforces the placement rules.
///
/// Blocks come from a [`BlockGenerator`], the high score goes through a [`HighScoreStore`].
#[derive(Clone, Debug)]
pub struct GameEngine<G, S = MemoryStore> {
    generator: G,
    store: S,
    grid: Grid,
    supply: BlockSupply,
    score: u32,
    high_score: u32,
    combo: ComboTracker,
    moves: u32,
    lines_cleared: u32,
    state: EngineState,
}

impl<G: BlockGenerator, S: HighScoreStore> GameEngine<G, S> {
    /// New game waiting for [`GameEngine::start`], with the high score loaded from `store`.
    pub fn new(mut generator: G, store: S) -> Self {
        let supply = BlockSupply::draw(&mut generator);
        Self::assemble(generator, store, Grid::new(), supply, EngineState::Ready)
    }

    /// Active game starting from a prepared position. An exhausted supply is refilled first, which
    /// is the only draw from `generator` before the first placement.
    pub fn with_position(mut generator: G, store: S, grid: Grid, mut supply: BlockSupply) -> Self {
        if supply.is_exhausted() {
            supply.refill(&mut generator);
        }
        let state = if check_game_over(&grid, &supply) {
            EngineState::Over
        } else {
            EngineState::Active
        };
        Self::assemble(generator, store, grid, supply, state)
    }

    fn assemble(
        generator: G,
        mut store: S,
        grid: Grid,
        supply: BlockSupply,
        state: EngineState,
    ) -> Self {
        let high_score = load_high_score(&mut store);
        Self {
            generator,
            store,
            grid,
            supply,
            score: 0,
            high_score,
            combo: ComboTracker::default(),
            moves: 0,
            lines_cleared: 0,
            state,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn supply(&self) -> &BlockSupply {
        &self.supply
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn combo(&self) -> u32 {
        self.combo.combo()
    }

    pub fn moves_since_last_clear(&self) -> u32 {
        self.combo.moves_since_last_clear()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_engine(self)
    }

    pub fn start(&mut self) -> Result<()> {
        match self.state {
            EngineState::Ready => {
                self.state = EngineState::Active;
                log::debug!("Game started");
                Ok(())
            }
            EngineState::Active => Ok(()),
            EngineState::Over => Err(GameError::GameAlreadyOver),
        }
    }

    /// Whether the block in `slot` fits at `(row, col)`. Never changes the game.
    pub fn can_place(&self, slot: usize, row: Offset, col: Offset) -> bool {
        self.supply
            .get(slot)
            .is_some_and(|block| self.grid.can_place(block.shape(), (row, col)))
    }

    /// Cells the block in `slot` would cover at `(row, col)`, for drawing a placement preview.
    pub fn preview(&self, slot: usize, row: Offset, col: Offset) -> Option<Vec<Coord2>> {
        placement_preview(&self.grid, &self.supply, slot, (row, col))
    }

    /// Places the block in `slot` with its top-left matrix cell at `(row, col)`.
    ///
    /// On error nothing changes. On success full rows and columns are cleared and scored, the slot
    /// is emptied (refilling the whole supply once all slots are empty), and the game ends when no
    /// block left in the supply fits anywhere.
    pub fn try_place(&mut self, slot: usize, row: Offset, col: Offset) -> Result<PlaceOutcome> {
        self.check_active()?;
        let block = *self.supply.get(slot).ok_or(GameError::InvalidBlockSlot)?;
        let anchor = (row, col);
        if !self.grid.can_place(block.shape(), anchor) {
            return Err(GameError::InvalidPlacement);
        }

        self.grid.stamp(block.shape(), anchor, block.color());
        self.moves += 1;

        let cleared_rows = self.grid.full_rows();
        let cleared_cols = self.grid.full_cols();
        let lines = (cleared_rows.len() + cleared_cols.len()) as u32;
        let points = if lines == 0 {
            self.combo.record_miss();
            0
        } else {
            self.grid.clear_lines(&cleared_rows, &cleared_cols);
            let clear = ClearScore::new(lines, self.combo.record_clear());
            log::debug!(
                "Cleared rows {:?} and columns {:?}: {} points, combo {}",
                cleared_rows,
                cleared_cols,
                clear.total(),
                clear.combo
            );
            clear.total()
        };
        self.score = self.score.saturating_add(points);
        self.lines_cleared += lines;

        self.supply.take(slot);
        let refilled = self.supply.is_exhausted();
        if refilled {
            self.supply.refill(&mut self.generator);
            log::trace!("Supply refilled: {:?}", self.supply);
        }

        let game_over = check_game_over(&self.grid, &self.supply);
        if game_over {
            self.state = EngineState::Over;
            log::info!("Game over after {} moves, score {}", self.moves, self.score);
        }

        let new_high_score = self.raise_high_score();

        Ok(PlaceOutcome {
            block,
            cleared_rows,
            cleared_cols,
            points,
            combo: self.combo.combo(),
            refilled,
            new_high_score,
            game_over,
        })
    }

    /// Fresh grid and supply with zeroed score and combo. The high score is kept.
    pub fn reset(&mut self) {
        self.grid = Grid::new();
        self.supply.refill(&mut self.generator);
        self.score = 0;
        self.combo.reset();
        self.moves = 0;
        self.lines_cleared = 0;
        self.state = EngineState::Active;
        log::debug!("Game reset");
    }

    fn raise_high_score(&mut self) -> Option<u32> {
        if self.score <= self.high_score {
            return None;
        }

        self.high_score = self.score;
        log::info!("New high score: {}", self.high_score);
        if let Err(err) = self.store.save(self.high_score) {
            log::warn!("Could not save high score {}: {}", self.high_score, err);
        }
        Some(self.high_score)
    }

    fn check_active(&self) -> Result<()> {
        match self.state {
            EngineState::Active => Ok(()),
            EngineState::Ready => Err(GameError::NotStarted),
            EngineState::Over => Err(GameError::GameAlreadyOver),
        }
    }
}

/// Whether no block left in `supply` fits anywhere on `grid`. An empty supply is never game over.
pub fn check_game_over(grid: &Grid, supply: &BlockSupply) -> bool {
    if supply.is_exhausted() {
        return false;
    }

    supply
        .iter()
        .all(|(_, block)| !has_legal_placement(grid, block.shape()))
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::*;

    type TestEngine = GameEngine<ScriptedBlockGenerator, MemoryStore>;

    /// Two empty cells per row and per column along a diagonal band, no 2x2 hole anywhere.
    const BAND: [&str; 8] = [
        "..RRRRRR",
        "R..RRRRR",
        "RR..RRRR",
        "RRR..RRR",
        "RRRR..RR",
        "RRRRR..R",
        "RRRRRR..",
        ".RRRRRR.",
    ];

    const FULL: [&str; 8] = ["RRRRRRRR"; 8];

    /// Pads `rows` with empty rows up to the grid height.
    fn board(rows: &[&str]) -> Grid {
        let mut padded = ["........"; GRID_SIZE as usize];
        padded[..rows.len()].copy_from_slice(rows);
        Grid::from_rows(&padded).unwrap()
    }

    fn supply(shapes: [Option<ShapeId>; SLOT_COUNT]) -> BlockSupply {
        let mut next_id = 100;
        BlockSupply::from(shapes.map(|shape| {
            next_id += 1;
            shape.map(|shape| Block::new(BlockId(next_id), shape, Color::Cyan))
        }))
    }

    fn engine_with(grid: Grid, shapes: [Option<ShapeId>; SLOT_COUNT]) -> TestEngine {
        GameEngine::with_position(
            ScriptedBlockGenerator::repeat(ShapeId::SINGLE, Color::Red),
            MemoryStore::new(),
            grid,
            supply(shapes),
        )
    }

    fn started(generator: ScriptedBlockGenerator) -> TestEngine {
        let mut engine = GameEngine::new(generator, MemoryStore::new());
        engine.start().unwrap();
        engine
    }

    #[derive(Debug, Default)]
    struct BrokenStore {
        save_attempts: u32,
    }

    impl HighScoreStore for BrokenStore {
        type Error = String;

        fn load(&mut self) -> core::result::Result<Option<u32>, String> {
            Err(String::from("disk on fire"))
        }

        fn save(&mut self, _high_score: u32) -> core::result::Result<(), String> {
            self.save_attempts += 1;
            Err(String::from("disk on fire"))
        }
    }

    #[test]
    fn new_engine_waits_for_start() {
        let mut engine =
            GameEngine::new(RandomBlockGenerator::new(1), MemoryStore::with_high_score(90));

        assert_eq!(engine.state(), EngineState::Ready);
        assert_eq!(engine.supply().block_count(), SLOT_COUNT);
        assert_eq!(engine.high_score(), 90);
        assert_eq!(engine.try_place(0, 0, 0), Err(GameError::NotStarted));

        engine.start().unwrap();
        engine.start().unwrap();
        assert_eq!(engine.state(), EngineState::Active);
    }

    #[test]
    fn placement_stamps_color_at_shape_offsets_only() {
        let mut engine = started(ScriptedBlockGenerator::repeat(ShapeId::T, Color::Lime));

        let outcome = engine.try_place(1, 4, 2).unwrap();

        assert_eq!(outcome.block.shape_id(), ShapeId::T);
        assert!(!outcome.has_clear());
        assert_eq!(outcome.points, 0);
        let expected = [(4, 2), (4, 3), (4, 4), (5, 3)];
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let cell = engine.grid().cell_at((row, col));
                if expected.contains(&(row, col)) {
                    assert_eq!(cell, Cell::Filled(Color::Lime));
                } else {
                    assert_eq!(cell, Cell::Empty);
                }
            }
        }
        assert!(engine.supply().get(1).is_none());
        assert_eq!(engine.moves_since_last_clear(), 1);
        assert_eq!(engine.moves(), 1);
    }

    #[test]
    fn rejected_placements_leave_state_untouched() {
        let mut engine = engine_with(
            board(&["R......."]),
            [Some(ShapeId::SQUARE2), None, Some(ShapeId::LINE5_H)],
        );
        let before = engine.snapshot();

        assert_eq!(engine.try_place(0, 0, 0), Err(GameError::InvalidPlacement));
        assert_eq!(engine.try_place(2, 0, 4), Err(GameError::InvalidPlacement));
        assert_eq!(engine.try_place(0, -1, 3), Err(GameError::InvalidPlacement));
        assert_eq!(engine.try_place(1, 3, 3), Err(GameError::InvalidBlockSlot));
        assert_eq!(engine.try_place(SLOT_COUNT, 3, 3), Err(GameError::InvalidBlockSlot));
        assert!(!engine.can_place(0, 0, 0));
        assert!(engine.can_place(0, 1, 0));
        assert!(!engine.can_place(1, 1, 0));

        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn completing_a_row_clears_it_and_scores_ten_plus_combo() {
        let mut engine = engine_with(
            board(&["RRRRRRR."]),
            [Some(ShapeId::SINGLE), Some(ShapeId::SINGLE), None],
        );

        let outcome = engine.try_place(0, 0, 7).unwrap();

        assert_eq!(outcome.cleared_rows, vec![0]);
        assert!(outcome.cleared_cols.is_empty());
        assert_eq!(outcome.combo, 1);
        assert_eq!(outcome.points, clear_score(1) + COMBO_POINTS);
        assert_eq!(engine.score(), 20);
        assert!(engine.grid().is_empty());
        assert_eq!(engine.moves_since_last_clear(), 0);
    }

    #[test]
    fn crossing_row_and_column_clear_independently() {
        let mut engine = engine_with(
            board(&[
                "RRRR.RRR",
                "....R...",
                "....R...",
                "....R...",
                "....R...",
                "....R...",
                "....R...",
                "....R...",
            ]),
            [Some(ShapeId::SINGLE), Some(ShapeId::T), None],
        );

        let outcome = engine.try_place(0, 0, 4).unwrap();

        assert_eq!(outcome.cleared_rows, vec![0]);
        assert_eq!(outcome.cleared_cols, vec![4]);
        assert_eq!(outcome.lines_cleared(), 2);
        assert_eq!(outcome.points, 20 + 10);
        assert!(engine.grid().is_empty());
        assert_eq!(engine.lines_cleared(), 2);
    }

    #[test]
    fn three_line_clear_doubles() {
        let mut engine = engine_with(
            board(&["RRRRR...", "RRRRR...", "RRRRR..."]),
            [Some(ShapeId::SQUARE3), Some(ShapeId::SINGLE), None],
        );

        let outcome = engine.try_place(0, 0, 5).unwrap();

        assert_eq!(outcome.cleared_rows, vec![0, 1, 2]);
        assert_eq!(outcome.points, 60 + 10);
    }

    #[test]
    fn four_line_clear_triples() {
        let mut engine = engine_with(
            board(&["RRRRRRR.", "RRRRRRR.", "RRRRRRR.", "RRRRRRR."]),
            [Some(ShapeId::LINE4_V), Some(ShapeId::SINGLE), None],
        );

        let outcome = engine.try_place(0, 0, 7).unwrap();

        assert_eq!(outcome.lines_cleared(), 4);
        assert_eq!(outcome.points, 40 * 3 + 10);
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn consecutive_clears_grow_combo() {
        let mut engine = engine_with(
            board(&["RRRRRRR.", "RRRRRRR.", "RRRRRRR."]),
            [Some(ShapeId::SINGLE), Some(ShapeId::SINGLE), Some(ShapeId::SINGLE)],
        );

        let combos =
            [0, 1, 2].map(|slot| engine.try_place(slot, slot as Offset, 7).unwrap().combo);

        assert_eq!(combos, [1, 2, 3]);
        assert_eq!(engine.score(), 3 * 10 + (1 + 2 + 3) * 10);

        // misses keep the combo until the next clear decides
        for slot in 0..3 {
            let outcome = engine.try_place(slot, 7, slot as Offset).unwrap();
            assert!(!outcome.has_clear());
        }
        assert_eq!(engine.moves_since_last_clear(), 3);
        assert_eq!(engine.combo(), 3);
    }

    #[test]
    fn clear_after_two_misses_keeps_combo() {
        let mut engine = engine_with(
            board(&["RRRRRRR.", "RRRRRRR."]),
            [Some(ShapeId::SINGLE), Some(ShapeId::SINGLE), Some(ShapeId::SINGLE)],
        );
        assert_eq!(engine.try_place(0, 0, 7).unwrap().combo, 1);
        engine.try_place(1, 5, 0).unwrap();
        engine.try_place(2, 5, 2).unwrap();
        assert_eq!(engine.moves_since_last_clear(), 2);

        let outcome = engine.try_place(0, 1, 7).unwrap();

        assert_eq!(outcome.combo, 2);
        assert_eq!(outcome.points, 10 + 20);
    }

    #[test]
    fn clear_after_three_misses_resets_combo() {
        let mut engine = engine_with(
            board(&["RRRRRRR.", "........", "........", "RRRRRRR."]),
            [Some(ShapeId::SINGLE), Some(ShapeId::SINGLE), Some(ShapeId::SINGLE)],
        );
        assert_eq!(engine.try_place(0, 0, 7).unwrap().combo, 1);
        engine.try_place(1, 5, 0).unwrap();
        engine.try_place(2, 5, 2).unwrap();
        engine.try_place(0, 5, 4).unwrap();
        assert_eq!(engine.moves_since_last_clear(), 3);

        let outcome = engine.try_place(1, 3, 7).unwrap();

        assert_eq!(outcome.cleared_rows, vec![3]);
        assert_eq!(outcome.combo, 0);
        assert_eq!(outcome.points, 10);
    }

    #[test]
    fn supply_refills_after_last_block() {
        let mut engine = started(ScriptedBlockGenerator::new([
            (ShapeId::SINGLE, Color::Red),
            (ShapeId::LINE2_H, Color::Blue),
            (ShapeId::SQUARE2, Color::Amber),
        ]));

        assert!(!engine.try_place(0, 0, 0).unwrap().refilled);
        assert!(!engine.try_place(1, 2, 0).unwrap().refilled);
        assert_eq!(engine.supply().block_count(), 1);

        let outcome = engine.try_place(2, 4, 0).unwrap();

        assert!(outcome.refilled);
        assert_eq!(engine.supply().block_count(), SLOT_COUNT);
        let ids: Vec<_> = engine.supply().iter().map(|(_, block)| block.id()).collect();
        assert_eq!(ids, vec![BlockId(3), BlockId(4), BlockId(5)]);
    }

    #[test]
    fn game_over_when_no_supply_block_fits() {
        let mut engine = engine_with(
            Grid::from_rows(&BAND).unwrap(),
            [Some(ShapeId::SINGLE), Some(ShapeId::SQUARE3), Some(ShapeId::SQUARE2)],
        );
        assert_eq!(engine.state(), EngineState::Active);

        let outcome = engine.try_place(0, 0, 0).unwrap();

        assert!(!outcome.has_clear());
        assert!(outcome.game_over);
        assert_eq!(engine.state(), EngineState::Over);
        assert_eq!(engine.try_place(1, 0, 1), Err(GameError::GameAlreadyOver));
        assert_eq!(engine.start(), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn full_grid_is_game_over_for_any_supply() {
        let grid = Grid::from_rows(&FULL).unwrap();
        for id in ShapeId::all() {
            assert!(check_game_over(&grid, &supply([None, Some(id), None])));
        }

        let engine = engine_with(grid, [Some(ShapeId::SINGLE), None, None]);
        assert!(engine.is_over());
    }

    #[test]
    fn not_over_while_some_block_fits() {
        let grid = Grid::from_rows(&BAND).unwrap();

        let fits = supply([Some(ShapeId::SQUARE3), Some(ShapeId::LINE2_H), None]);
        let stuck = supply([Some(ShapeId::SQUARE3), Some(ShapeId::LINE3_H), None]);

        assert!(!check_game_over(&grid, &fits));
        assert!(check_game_over(&grid, &stuck));
        assert!(!check_game_over(&grid, &BlockSupply::empty()));
    }

    #[test]
    fn reset_restores_fresh_game_but_keeps_high_score() {
        let mut engine = engine_with(
            board(&["RRRRRRR."]),
            [Some(ShapeId::SINGLE), Some(ShapeId::SINGLE), None],
        );
        engine.try_place(0, 0, 7).unwrap();
        engine.try_place(1, 4, 4).unwrap();
        assert_eq!(engine.high_score(), 20);

        engine.reset();

        assert_eq!(engine.score(), 0);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.moves_since_last_clear(), 0);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.lines_cleared(), 0);
        assert_eq!(engine.state(), EngineState::Active);
        assert!(engine.grid().is_empty());
        assert_eq!(engine.supply().block_count(), SLOT_COUNT);
        assert_eq!(engine.high_score(), 20);
    }

    #[test]
    fn reset_revives_a_finished_game() {
        let full = Grid::from_rows(&FULL).unwrap();
        let mut engine = engine_with(full, [Some(ShapeId::SINGLE), None, None]);
        assert!(engine.is_over());

        engine.reset();

        assert!(engine.try_place(0, 0, 0).is_ok());
    }

    #[test]
    fn high_score_saved_only_when_raised() {
        let mut engine = GameEngine::with_position(
            ScriptedBlockGenerator::repeat(ShapeId::SINGLE, Color::Red),
            MemoryStore::with_high_score(25),
            board(&["RRRRRRR.", "RRRRRRR."]),
            BlockSupply::empty(),
        );

        let first = engine.try_place(0, 0, 7).unwrap();
        assert_eq!(first.points, 20);
        assert_eq!(first.new_high_score, None);
        assert_eq!(engine.store().high_score(), Some(25));

        let second = engine.try_place(1, 1, 7).unwrap();
        assert_eq!(second.points, 30);
        assert_eq!(second.new_high_score, Some(50));
        assert_eq!(engine.high_score(), 50);
        assert_eq!(engine.store().high_score(), Some(50));
    }

    #[test]
    fn broken_store_never_blocks_play() {
        let mut engine = GameEngine::with_position(
            ScriptedBlockGenerator::repeat(ShapeId::SINGLE, Color::Red),
            BrokenStore::default(),
            board(&["RRRRRRR."]),
            BlockSupply::empty(),
        );
        assert_eq!(engine.high_score(), 0);

        let outcome = engine.try_place(0, 0, 7).unwrap();

        assert_eq!(outcome.new_high_score, Some(20));
        assert_eq!(engine.high_score(), 20);
        assert_eq!(engine.store().save_attempts, 1);
    }

    #[test]
    fn preview_matches_can_place() {
        let engine = engine_with(board(&["RR......"]), [Some(ShapeId::LINE3_H), None, None]);

        assert_eq!(engine.preview(0, 0, 1), None);
        assert_eq!(engine.preview(0, 0, 2), Some(vec![(0, 2), (0, 3), (0, 4)]));
        assert_eq!(engine.preview(1, 0, 2), None);
        assert!(engine.grid().cell_at((0, 2)).is_empty());
    }

    #[test]
    fn prepared_position_refills_from_script_head() {
        let engine = GameEngine::with_position(
            ScriptedBlockGenerator::new([(ShapeId::SINGLE, Color::Red), (ShapeId::T, Color::Lime)]),
            MemoryStore::new(),
            Grid::new(),
            BlockSupply::empty(),
        );

        let drawn: Vec<_> = engine
            .supply()
            .iter()
            .map(|(_, block)| (block.shape_id(), block.id()))
            .collect();
        assert_eq!(
            drawn,
            vec![
                (ShapeId::SINGLE, BlockId(0)),
                (ShapeId::T, BlockId(1)),
                (ShapeId::SINGLE, BlockId(2)),
            ]
        );
    }

    #[test]
    fn prepared_supply_draws_nothing() {
        let mut engine = GameEngine::with_position(
            ScriptedBlockGenerator::repeat(ShapeId::LINE2_H, Color::Blue),
            MemoryStore::new(),
            Grid::new(),
            supply([Some(ShapeId::SINGLE), None, None]),
        );

        assert!(engine.try_place(0, 0, 0).unwrap().refilled);
        let ids: Vec<_> = engine.supply().iter().map(|(_, block)| block.id()).collect();
        assert_eq!(ids, vec![BlockId(0), BlockId(1), BlockId(2)]);
    }
}
