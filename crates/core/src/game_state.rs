//! Game state module - the game loop controller
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It owns the Running/Paused/GameOver state machine, the gravity timer, and the
//! lock -> clear -> score -> level -> spawn pipeline.
//!
//! Callers drive it with [`GameState::apply_action`] for every input command and
//! [`GameState::tick`] once per frame, or with [`GameState::step`] which does both.

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_level_with, calculate_line_score_with, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, GameStatus, PieceKind, RotateDirection};
use crate::Board;

/// Result of the most recent lock (consumed by observers such as the logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points awarded for the cleared rows
    pub points: u32,
    pub level_up: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    piece_queue: PieceQueue,
    status: GameStatus,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Number of pieces spawned this episode.
    piece_count: u32,
    last_event: Option<LockEvent>,
    score: u32,
    /// Best score seen in this process; survives restarts.
    high_score: u32,
    level: u32,
    lines: u32,
    drop_timer_ms: u32,
}

impl GameState {
    /// Create a new game and spawn the first piece
    pub fn new(config: GameConfig) -> Self {
        Self::with_board(config, Board::new())
    }

    /// New game with the default rules and the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::default().with_seed(seed))
    }

    /// Start a game on a pre-filled board.
    ///
    /// The first piece is spawned immediately, so a board whose spawn area is
    /// blocked starts in [`GameStatus::GameOver`].
    pub fn with_board(config: GameConfig, board: Board) -> Self {
        let piece_queue = PieceQueue::with_randomizer(config.seed, config.randomizer);
        let level = config.start_level.max(1);

        let mut state = Self {
            config,
            board,
            active: None,
            piece_queue,
            status: GameStatus::Running,
            episode_id: 0,
            piece_count: 0,
            last_event: None,
            score: 0,
            high_score: 0,
            level,
            lines: 0,
            drop_timer_ms: 0,
        };
        state.spawn_piece();
        state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_piece(&self) -> PieceKind {
        self.piece_queue.peek()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    /// Replace the active piece if it fits on the board.
    ///
    /// Used to set up positions directly (tests, benchmarks, puzzles).
    pub fn set_active(&mut self, piece: Tetromino) -> bool {
        if self.status == GameStatus::GameOver || !self.board.is_valid(&piece.cells()) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.piece_queue.peek();
        out.status = self.status;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.gravity_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the queue.
    ///
    /// This is the only place the game can end: if the new piece does not fit
    /// at its spawn position the status becomes GameOver and nothing is placed.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.piece_queue.draw();
        let piece = Tetromino::new(kind);
        self.drop_timer_ms = 0;

        if !self.board.is_valid(&piece.cells()) {
            self.active = None;
            self.status = GameStatus::GameOver;
            info!(
                episode = self.episode_id,
                score = self.score,
                level = self.level,
                lines = self.lines,
                kind = kind.as_str(),
                "game over: spawn blocked"
            );
            return false;
        }

        self.active = Some(piece);
        self.piece_count = self.piece_count.wrapping_add(1);
        true
    }

    /// Current gravity interval based on level
    pub fn gravity_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (x, y) = active.translate(dx, dy);
        if !self.board.is_valid(&active.cells_at(active.rotation, x, y)) {
            return false;
        }

        self.active = Some(active.with(active.rotation, x, y));
        true
    }

    /// Try to rotate the active piece in place.
    ///
    /// No wall kicks: if the rotated cells do not fit, the piece is left as it was.
    pub(crate) fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotation = active.rotate(direction);
        if rotation == active.rotation {
            return false;
        }

        if !self
            .board
            .is_valid(&active.cells_at(rotation, active.x, active.y))
        {
            return false;
        }

        self.active = Some(active.with(rotation, active.x, active.y));
        true
    }

    /// Move down one row, or lock in place if the row below is blocked.
    fn soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Hard drop the active piece to the bottom and lock it.
    /// Returns the number of rows dropped.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let (Some(active), Some(ghost_y)) = (self.active, self.ghost_y()) else {
            return 0;
        };

        let distance = (ghost_y - active.y) as u32;
        self.active = Some(active.with(active.rotation, active.x, ghost_y));
        self.lock_piece();
        distance
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let locked = self.board.lock(&active.cells(), active.kind);
        // The active piece is validated on every move, so this means state was
        // changed behind the controller's back.
        debug_assert!(locked, "active piece overlaps the board at lock time");
        if !locked {
            warn!(?active, "active piece overlaps the board at lock time");
            return;
        }

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;

        let mut points = 0;
        let mut level_up = false;
        if lines_cleared > 0 {
            points = calculate_line_score_with(
                &self.config.line_scores,
                cleared_rows.len(),
                self.level,
            );
            self.score = self.score.saturating_add(points);
            self.high_score = self.high_score.max(self.score);

            self.lines += lines_cleared;
            let level = calculate_level_with(
                self.lines,
                self.config.lines_per_level,
                self.config.start_level,
            );
            if level > self.level {
                level_up = true;
                self.level = level;
                info!(
                    level = self.level,
                    lines = self.lines,
                    gravity_ms = self.gravity_interval_ms(),
                    "level up"
                );
            }
        }

        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            rotation = active.rotation,
            lines_cleared,
            points,
            score = self.score,
            "piece locked"
        );

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared,
            points,
            level_up,
        });

        self.spawn_piece();
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Check if the active piece is resting on something
    pub fn is_grounded(&self) -> bool {
        self.active.is_some() && !self.can_move(0, 1)
    }

    /// Calculate the ghost piece Y position (where a hard drop would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;

        let mut y = active.y;
        while self
            .board
            .is_valid(&active.cells_at(active.rotation, active.x, y + 1))
        {
            y += 1;
        }

        Some(y)
    }

    /// Advance the gravity timer by one frame.
    ///
    /// Returns true when gravity moved or locked the active piece.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Running || self.active.is_none() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms < self.gravity_interval_ms() {
            return false;
        }

        // Carry the overshoot so long frames catch up on the following ticks.
        self.drop_timer_ms -= self.gravity_interval_ms();
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// One frame: apply at most one command, then advance gravity.
    pub fn step(&mut self, input: Option<Command>, elapsed_ms: u32) {
        if let Some(command) = input {
            self.apply_action(command);
        }
        self.tick(elapsed_ms);
    }

    /// Apply a command. Returns true if it changed the game.
    ///
    /// While paused only `Pause` and `Restart` are honored; after game over only
    /// `Restart` is.
    pub fn apply_action(&mut self, command: Command) -> bool {
        match (self.status, command) {
            (_, Command::Restart) => {
                self.restart();
                true
            }
            (GameStatus::Running, Command::Pause) => {
                self.status = GameStatus::Paused;
                true
            }
            (GameStatus::Paused, Command::Pause) => {
                self.status = GameStatus::Running;
                true
            }
            (GameStatus::Running, command) => match command {
                Command::MoveLeft => self.try_move(-1, 0),
                Command::MoveRight => self.try_move(1, 0),
                Command::SoftDrop => self.soft_drop(),
                Command::HardDrop => {
                    if self.active.is_none() {
                        return false;
                    }
                    self.hard_drop();
                    true
                }
                Command::RotateCw | Command::RotateCcw => match command.rotate_direction() {
                    Some(direction) => self.try_rotate(direction),
                    None => false,
                },
                Command::Pause | Command::Restart => false,
            },
            (GameStatus::Paused | GameStatus::GameOver, _) => false,
        }
    }

    /// Start over with an empty board. The high score and rules are kept.
    fn restart(&mut self) {
        let config = self.config.clone().with_seed(self.piece_queue.seed());
        let high_score = self.high_score;
        let next_episode = self.episode_id.wrapping_add(1);

        *self = Self::new(config);
        self.high_score = high_score;
        self.episode_id = next_episode;

        info!(episode = self.episode_id, high_score, "game restarted");
    }

    /// Get the absolute cells of the active piece (for rendering)
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    /// Check if the active piece can move in the given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (x, y) = active.translate(dx, dy);
        self.board
            .is_valid(&active.cells_at(active.rotation, x, y))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
