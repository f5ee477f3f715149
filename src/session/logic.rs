//! Level play: selection, swaps, move accounting and win/loss.

use super::types::{LevelConfig, LevelStatus, SelectOutcome, TurnPhase};
use crate::board::{initialize_grid, Grid, Position, TileColor};
use crate::cascade::CascadeObserver;
use crate::engine::{EngineConfig, EngineError};
use crate::services::{ScoreLedger, ServiceError, SubmissionState, TxHash};
use crate::swap::{validate_and_apply_swap, SwapOutcome, SwapRejection};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// One attempt at one level.
#[derive(Debug, Clone)]
pub struct GameSession {
    levels: Vec<LevelConfig>,
    level_index: usize,
    config: EngineConfig,
    grid: Grid,
    score: u32,
    moves_left: u32,
    status: LevelStatus,
    phase: TurnPhase,
    selected: Option<Position>,
    cleared_by_color: BTreeMap<TileColor, u32>,
    submission: SubmissionState,
}

impl GameSession {
    /// Start `levels[index]` on a freshly generated grid.
    #[instrument(skip(levels, config, rng))]
    pub fn start<R: Rng>(
        levels: Vec<LevelConfig>,
        index: usize,
        config: EngineConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let level = level_at(&levels, index)?;
        let grid = initialize_grid(
            config.grid_size,
            level.initial_frozen_count,
            level.initial_infected_count,
            rng,
        )?;
        Self::with_grid(levels, index, config, grid)
    }

    /// Start `levels[index]` on a caller-supplied grid.
    ///
    /// The grid must match `config.grid_size`, since restarts regenerate at that size.
    pub fn with_grid(
        levels: Vec<LevelConfig>,
        index: usize,
        config: EngineConfig,
        grid: Grid,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if grid.size() != config.grid_size {
            return Err(EngineError::GridSizeMismatch {
                actual: grid.size(),
                expected: config.grid_size,
            });
        }
        let moves_left = level_at(&levels, index)?.moves;
        info!(level = index + 1, moves_left, "level started");
        Ok(Self {
            levels,
            level_index: index,
            config,
            grid,
            score: 0,
            moves_left,
            status: LevelStatus::Playing,
            phase: TurnPhase::Idle,
            selected: None,
            cleared_by_color: BTreeMap::new(),
            submission: SubmissionState::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    /// `Busy` only while `try_swap` runs. Exclusive `&mut` access already keeps a second
    /// swap from starting mid-cascade; the phase makes that state explicit for
    /// frontends that mirror it.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn level(&self) -> &LevelConfig {
        &self.levels[self.level_index]
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cleared_by_color(&self) -> &BTreeMap<TileColor, u32> {
        &self.cleared_by_color
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    fn input_blocked(&self) -> Option<SwapRejection> {
        if self.status != LevelStatus::Playing {
            Some(SwapRejection::LevelOver)
        } else if self.phase == TurnPhase::Busy {
            Some(SwapRejection::Busy)
        } else {
            None
        }
    }

    /// Handle a click on `pos`.
    ///
    /// The first click selects. A second click on an adjacent tile attempts the swap and
    /// clears the selection; any other second click moves the selection there.
    pub fn select_tile<R: Rng, O: CascadeObserver>(
        &mut self,
        pos: Position,
        rng: &mut R,
        observer: &mut O,
    ) -> SelectOutcome {
        if let Some(reason) = self.input_blocked() {
            return SelectOutcome::Ignored(reason);
        }
        if !self.grid.contains(pos) {
            return SelectOutcome::Ignored(SwapRejection::OutOfBounds);
        }
        match self.selected {
            None => {
                self.selected = Some(pos);
                SelectOutcome::Selected(pos)
            }
            Some(first) if first.is_adjacent(&pos) => {
                self.selected = None;
                SelectOutcome::Swapped(Box::new(self.try_swap(first, pos, rng, observer)))
            }
            Some(_) => {
                self.selected = Some(pos);
                SelectOutcome::SelectionMoved(pos)
            }
        }
    }

    /// Attempt a swap and, if it commits, apply its score and move cost.
    ///
    /// The session is `Busy` for the whole swap and cascade and `Idle` again on return,
    /// whatever the outcome.
    pub fn try_swap<R: Rng, O: CascadeObserver>(
        &mut self,
        a: Position,
        b: Position,
        rng: &mut R,
        observer: &mut O,
    ) -> SwapOutcome {
        if let Some(reason) = self.input_blocked() {
            return SwapOutcome::rejected(self.grid.clone(), reason);
        }

        self.phase = TurnPhase::Busy;
        let outcome =
            validate_and_apply_swap(self.grid.clone(), a, b, &self.config, rng, observer);
        if outcome.committed {
            self.grid = outcome.grid.clone();
            self.score = self.score.saturating_add(outcome.score_delta);
            self.moves_left = self.moves_left.saturating_sub(outcome.moves_consumed);
            if let Some(cascade) = &outcome.cascade {
                for (&color, &count) in &cascade.cleared_by_color {
                    *self.cleared_by_color.entry(color).or_insert(0) += count;
                }
            }
            self.update_status();
        }
        self.phase = TurnPhase::Idle;
        outcome
    }

    fn update_status(&mut self) {
        let level = &self.levels[self.level_index];
        let won =
            self.score >= level.target_score && level.tile_targets_met(&self.cleared_by_color);
        if won {
            self.status = LevelStatus::Won;
        } else if self.moves_left == 0 {
            self.status = LevelStatus::Lost;
        }
        if self.status != LevelStatus::Playing {
            info!(
                level = level.id,
                score = self.score,
                moves_left = self.moves_left,
                status = ?self.status,
                "level finished"
            );
        } else {
            debug!(score = self.score, moves_left = self.moves_left, "move applied");
        }
    }

    /// Replay the current level on a new grid.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.load_level(self.level_index, rng)
    }

    /// Move on to the next level.
    pub fn advance_level<R: Rng>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.load_level(self.level_index + 1, rng)
    }

    fn load_level<R: Rng>(&mut self, index: usize, rng: &mut R) -> Result<(), EngineError> {
        let level = level_at(&self.levels, index)?;
        let grid = initialize_grid(
            self.config.grid_size,
            level.initial_frozen_count,
            level.initial_infected_count,
            rng,
        )?;
        info!(level = level.id, "level loaded");
        self.moves_left = level.moves;
        self.level_index = index;
        self.grid = grid;
        self.score = 0;
        self.status = LevelStatus::Playing;
        self.phase = TurnPhase::Idle;
        self.selected = None;
        self.cleared_by_color.clear();
        self.submission.reset();
        Ok(())
    }

    fn ensure_won(&self) -> Result<(), ServiceError> {
        match self.status {
            LevelStatus::Won => Ok(()),
            LevelStatus::Playing => Err(ServiceError::NotEligible("playing")),
            LevelStatus::Lost => Err(ServiceError::NotEligible("lost")),
        }
    }

    /// Submit the final score of a won level.
    pub fn sync_score<L: ScoreLedger>(&mut self, ledger: &mut L) -> Result<TxHash, ServiceError> {
        self.ensure_won()?;
        let level_id = self.level().id;
        self.submission.sync_score(ledger, level_id, self.score)
    }

    /// Mint the achievement of a won level, syncing the score first if needed.
    pub fn mint<L: ScoreLedger>(&mut self, ledger: &mut L) -> Result<TxHash, ServiceError> {
        self.ensure_won()?;
        let level_id = self.level().id;
        self.submission
            .mint_achievement(ledger, level_id, self.score)
    }
}

fn level_at(levels: &[LevelConfig], index: usize) -> Result<&LevelConfig, EngineError> {
    levels.get(index).ok_or(EngineError::UnknownLevel {
        index,
        available: levels.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SimulatedLedger;
    use crate::session::standard_levels;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn swap_grid() -> Grid {
        Grid::from_pattern(&[
            "BPTKABPT", "TKABPTKA", "ABPTKABP", "PTAAKATK", "KABPTKAB", "BPTKABPT", "TKABPTKA",
            "ABPTKABP",
        ])
        .unwrap()
    }

    fn session_with(level: LevelConfig) -> GameSession {
        GameSession::with_grid(vec![level], 0, EngineConfig::headless(), swap_grid()).unwrap()
    }

    #[test]
    fn test_start_standard_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let session =
            GameSession::start(standard_levels(), 3, EngineConfig::headless(), &mut rng).unwrap();
        assert_eq!(session.level().id, 4);
        assert_eq!(session.moves_left(), 30);
        assert_eq!(session.status(), LevelStatus::Playing);
        assert_eq!(session.phase(), TurnPhase::Idle);
        assert_eq!(session.grid().frozen_count(), 12);
        assert_eq!(session.grid().infected_count(), 4);
    }

    #[test]
    fn test_start_unknown_level() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let result = GameSession::start(standard_levels(), 4, EngineConfig::headless(), &mut rng);
        assert!(matches!(
            result,
            Err(EngineError::UnknownLevel {
                index: 4,
                available: 4
            })
        ));
    }

    #[test]
    fn test_selection_moves_on_non_adjacent_click() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(
            session.select_tile(Position::new(0, 0), &mut rng, &mut ()),
            SelectOutcome::Selected(Position::new(0, 0))
        );
        assert_eq!(
            session.select_tile(Position::new(5, 5), &mut rng, &mut ()),
            SelectOutcome::SelectionMoved(Position::new(5, 5))
        );
        assert_eq!(session.selected(), Some(Position::new(5, 5)));
        assert_eq!(session.moves_left(), 25);
    }

    #[test]
    fn test_adjacent_click_swaps_and_clears_selection() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        session.select_tile(Position::new(3, 4), &mut rng, &mut ());
        let outcome = session.select_tile(Position::new(3, 5), &mut rng, &mut ());

        match outcome {
            SelectOutcome::Swapped(swap) => assert!(swap.committed),
            other => panic!("expected a swap, got {:?}", other),
        }
        assert_eq!(session.selected(), None);
        assert_eq!(session.moves_left(), 24);
        assert!(session.score() >= 30);
        assert_eq!(session.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_rejected_swap_costs_nothing() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let before = session.grid().clone();

        let outcome = session.try_swap(Position::new(0, 0), Position::new(0, 1), &mut rng, &mut ());

        assert_eq!(outcome.rejection, Some(SwapRejection::NoMatch));
        assert_eq!(session.grid(), &before);
        assert_eq!(session.moves_left(), 25);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_with_grid_rejects_invalid_config() {
        let config = EngineConfig {
            infection_chance: 1.5,
            ..EngineConfig::headless()
        };
        let result =
            GameSession::with_grid(vec![LevelConfig::new(1, 25, 1000)], 0, config, swap_grid());
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_grid_rejects_size_mismatch() {
        let small = Grid::from_pattern(&["BPTKA", "TKABP", "ABPTK", "PTKAB", "KABPT"]).unwrap();
        let result = GameSession::with_grid(
            vec![LevelConfig::new(1, 25, 1000)],
            0,
            EngineConfig::headless(),
            small.clone(),
        );
        assert_eq!(
            result.err(),
            Some(EngineError::GridSizeMismatch {
                actual: 5,
                expected: 8
            })
        );

        let config = EngineConfig {
            grid_size: 5,
            ..EngineConfig::headless()
        };
        let session =
            GameSession::with_grid(vec![LevelConfig::new(1, 25, 1000)], 0, config, small).unwrap();
        assert_eq!(session.grid().size(), 5);
    }

    #[test]
    fn test_phase_idle_after_every_outcome() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let rejected =
            session.try_swap(Position::new(0, 0), Position::new(0, 1), &mut rng, &mut ());
        assert!(!rejected.committed);
        assert_eq!(session.phase(), TurnPhase::Idle);

        let committed =
            session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());
        assert!(committed.committed);
        assert_eq!(session.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_busy_session_ignores_input() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let before = session.grid().clone();
        session.phase = TurnPhase::Busy;

        assert_eq!(
            session.select_tile(Position::new(3, 4), &mut rng, &mut ()),
            SelectOutcome::Ignored(SwapRejection::Busy)
        );
        let outcome = session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());
        assert_eq!(outcome.rejection, Some(SwapRejection::Busy));
        assert_eq!(session.grid(), &before);
        assert_eq!(session.selected(), None);
        assert_eq!(session.moves_left(), 25);
    }

    #[test]
    fn test_win_when_target_reached() {
        let mut session = session_with(LevelConfig::new(1, 25, 30));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());

        assert_eq!(session.status(), LevelStatus::Won);
        assert_eq!(
            session.select_tile(Position::new(0, 0), &mut rng, &mut ()),
            SelectOutcome::Ignored(SwapRejection::LevelOver)
        );
    }

    #[test]
    fn test_loss_when_moves_run_out() {
        let mut session = session_with(LevelConfig::new(1, 1, 1_000_000));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());

        assert_eq!(session.moves_left(), 0);
        assert_eq!(session.status(), LevelStatus::Lost);
        let outcome = session.try_swap(Position::new(0, 0), Position::new(0, 1), &mut rng, &mut ());
        assert_eq!(outcome.rejection, Some(SwapRejection::LevelOver));
    }

    #[test]
    fn test_tile_target_blocks_win() {
        let level = LevelConfig::new(1, 25, 30).with_target_tiles(TileColor::Blue, 1000);
        let mut session = session_with(level);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());

        assert!(session.score() >= 30);
        assert_eq!(session.status(), LevelStatus::Playing);
        assert!(session.cleared_by_color()[&TileColor::Amber] >= 3);
    }

    #[test]
    fn test_restart_and_advance() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut session =
            GameSession::start(standard_levels(), 0, EngineConfig::headless(), &mut rng).unwrap();

        session.advance_level(&mut rng).unwrap();
        assert_eq!(session.level().id, 2);
        assert_eq!(session.moves_left(), 22);
        assert_eq!(session.grid().frozen_count(), 4);

        session.restart(&mut rng).unwrap();
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.score(), 0);

        session.advance_level(&mut rng).unwrap();
        session.advance_level(&mut rng).unwrap();
        assert!(matches!(
            session.advance_level(&mut rng),
            Err(EngineError::UnknownLevel { index: 4, .. })
        ));
        assert_eq!(session.level().id, 4);
    }

    #[test]
    fn test_sync_requires_win() {
        let mut session = session_with(LevelConfig::new(1, 25, 1000));
        let mut ledger = SimulatedLedger::new(ChaCha8Rng::seed_from_u64(1));
        assert!(matches!(
            session.sync_score(&mut ledger),
            Err(ServiceError::NotEligible("playing"))
        ));
        assert!(ledger.submissions.is_empty());
    }

    #[test]
    fn test_mint_after_win() {
        let mut session = session_with(LevelConfig::new(1, 25, 30));
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        session.try_swap(Position::new(3, 4), Position::new(3, 5), &mut rng, &mut ());
        let mut ledger = SimulatedLedger::new(ChaCha8Rng::seed_from_u64(1));

        let hash = session.mint(&mut ledger).unwrap();

        assert_eq!(ledger.submissions, vec![(1, session.score())]);
        assert_eq!(ledger.mints, vec![1]);
        assert!(session.submission().minted);
        assert_eq!(session.submission().last_tx_hash, Some(hash));
    }
}
