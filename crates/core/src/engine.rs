//! Game engine - owns the grid, the active piece, score, speed and status
//!
//! The engine is driven from outside by two kinds of call sites: a timer that
//! calls [`GameEngine::tick`] once per [`GameEngine::tick_interval_ms`], and an
//! input dispatcher that calls the movement commands. Every method completes
//! synchronously; the engine never schedules anything itself.
//!
//! A tick does, in order:
//! 1. clear every complete row, one at a time from the top, rescanning after
//!    each collapse (each row scores `width` points and shortens the interval);
//! 2. step the active piece down one row;
//! 3. if the step is blocked, lock the piece and spawn a uniformly random one
//!    at the spawn anchor. A spawn that does not fit ends the game.

use crate::config::{ConfigError, EngineConfig};
use crate::grid::{Coord, Grid};
use crate::piece::ActivePiece;
use crate::rng::PieceRandomizer;
use crate::scoring::{calculate_line_score, line_clear_points, next_tick_interval};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{CoreLastEvent, GameAction, PieceKind, Status};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: EngineConfig,
    grid: Grid,
    /// `None` only while the game is over.
    active: Option<ActivePiece>,
    pieces: PieceRandomizer,
    score: u32,
    /// Best score seen by this engine; survives restarts.
    top_score: u32,
    lines: u32,
    tick_interval_ms: u32,
    status: Status,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Last lock/line-clear event (consumed by observers).
    last_event: Option<CoreLastEvent>,
}

impl GameEngine {
    /// Create a running game on an empty grid
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::build(config, seed, grid))
    }

    /// Create a game on a prepared grid.
    ///
    /// The grid's dimensions override the config's. The first spawn is checked
    /// against the prepared cells, so a blocked spawn area starts the game over.
    pub fn with_grid(config: EngineConfig, seed: u32, grid: Grid) -> Result<Self, ConfigError> {
        let config = EngineConfig {
            width: grid.width(),
            height: grid.height(),
            ..config
        };
        config.validate()?;
        Ok(Self::build(config, seed, grid))
    }

    fn build(config: EngineConfig, seed: u32, grid: Grid) -> Self {
        let mut engine = Self {
            config,
            grid,
            active: None,
            pieces: PieceRandomizer::new(seed),
            score: 0,
            top_score: 0,
            lines: 0,
            tick_interval_ms: config.max_interval_ms,
            status: Status::Running,
            episode_id: 0,
            last_event: None,
        };
        engine.spawn_piece();
        engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    /// Rows cleared in the current game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// How long the scheduler should wait before the next tick.
    ///
    /// Re-read after every tick: it shrinks as rows are cleared.
    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Take and clear the last lock/line-clear event.
    pub fn take_last_event(&mut self) -> Option<CoreLastEvent> {
        self.last_event.take()
    }

    /// Main game tick. Returns false when nothing happened (not running).
    pub fn tick(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }

        let lines_cleared = self.clear_complete_rows();

        // Collapsing rows can drop locked cells into the falling piece's space.
        if let Some(piece) = self.active {
            if !piece.fits(&self.grid) {
                self.top_out(lines_cleared);
                return true;
            }
        }

        let Some(mut piece) = self.active else {
            return false;
        };

        if piece.soft_step(&self.grid) {
            self.active = Some(piece);
            if lines_cleared > 0 {
                self.emit_event(false, lines_cleared);
            }
            return true;
        }

        self.lock_and_spawn(piece, lines_cleared);
        true
    }

    /// Remove complete rows top to bottom, one per pass, rescanning after each
    /// collapse since it shifts row indices. Returns the number of rows removed.
    fn clear_complete_rows(&mut self) -> u32 {
        let mut cleared = 0;

        while let Some(y) = self.grid.first_complete_row() {
            if self.grid.collapse_row(y).is_err() {
                break;
            }
            cleared += 1;
            self.lines += 1;
            self.add_score(line_clear_points(self.config.width));
            self.tick_interval_ms = next_tick_interval(self.tick_interval_ms, &self.config);
        }

        cleared
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.top_score {
            self.top_score = self.score;
        }
    }

    /// Spawn a new uniformly random piece at the spawn anchor.
    ///
    /// If its cells are not all legal the game is over and no piece is exposed.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.pieces.draw();
        let piece = ActivePiece::spawn(kind, self.config.width);

        if !piece.fits(&self.grid) {
            self.active = None;
            self.status = Status::GameOver;
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn lock_and_spawn(&mut self, piece: ActivePiece, lines_cleared: u32) {
        // The piece fits by invariant, so this always writes all four cells.
        self.grid.lock_cells(&piece.occupied_cells(), piece.kind());
        self.active = None;
        self.spawn_piece();
        self.emit_event(true, lines_cleared);
    }

    fn top_out(&mut self, lines_cleared: u32) {
        self.active = None;
        self.status = Status::GameOver;
        self.emit_event(false, lines_cleared);
    }

    fn emit_event(&mut self, locked: bool, lines_cleared: u32) {
        self.last_event = Some(CoreLastEvent {
            locked,
            lines_cleared,
            line_clear_score: calculate_line_score(lines_cleared, self.config.width),
            tick_interval_ms: self.tick_interval_ms,
            game_over: self.status.is_game_over(),
        });
    }

    /// Run a movement on a copy of the active piece and commit it on success.
    fn with_active(&mut self, f: impl FnOnce(&mut ActivePiece, &Grid) -> bool) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        let moved = f(&mut piece, &self.grid);
        if moved {
            self.active = Some(piece);
        }
        moved
    }

    pub fn move_left(&mut self) -> bool {
        self.with_active(|piece, grid| piece.move_left(grid))
    }

    pub fn move_right(&mut self) -> bool {
        self.with_active(|piece, grid| piece.move_right(grid))
    }

    /// One row down without locking
    pub fn soft_drop(&mut self) -> bool {
        self.with_active(|piece, grid| piece.soft_step(grid))
    }

    pub fn rotate(&mut self) -> bool {
        self.with_active(|piece, grid| piece.rotate(grid))
    }

    /// Drop the active piece to its resting row, lock it and spawn the next.
    ///
    /// Rows completed by the lock are cleared by the next tick.
    pub fn hard_drop(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.hard_drop(&self.grid);
        self.lock_and_spawn(piece, 0);
        true
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }
        self.status = Status::Paused;
        true
    }

    /// Paused -> Running
    pub fn resume(&mut self) -> bool {
        if !self.status.is_paused() {
            return false;
        }
        self.status = Status::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            Status::GameOver => false,
        }
    }

    /// Fresh grid, zero score, maximum interval, new piece. Top score is kept.
    pub fn restart(&mut self) {
        self.grid = Grid::new(self.config.width, self.config.height);
        self.score = 0;
        self.lines = 0;
        self.tick_interval_ms = self.config.max_interval_ms;
        self.status = Status::Running;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.last_event = None;
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Replace the active piece with `piece` if it is legal on the current grid.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if self.status.is_game_over() || !piece.fits(&self.grid) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Lock `cells` into the grid directly, bypassing descent and spawn.
    ///
    /// Refuses (returns false) if any cell is illegal or overlaps the active piece.
    pub fn insert_locked(&mut self, cells: &[Coord], kind: PieceKind) -> bool {
        if let Some(active) = self.active {
            let occupied = active.occupied_cells();
            if cells.iter().any(|c| occupied.contains(c)) {
                return false;
            }
        }
        self.grid.lock_cells(cells, kind)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.top_score = self.top_score;
        out.lines = self.lines;
        out.status = self.status;
        out.tick_interval_ms = self.tick_interval_ms;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::build(config, 1, Grid::new(config.width, config.height))
    }
}
