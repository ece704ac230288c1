//! Core game state and logic
//!
//! [`GameState`] owns the board, the bag, the scoring state and every timer.
//! It is driven by [`GameState::tick`] plus the player operations and is the
//! only place events are produced.

use crate::bag::Bag;
use crate::board::Board;
use crate::mode::{
    ModeConfig, calculate_level, gravity_interval_ms, is_mode_completed, is_time_expired,
};
use crate::piece::Piece;
use crate::score::{ClearType, Score};
use crate::tetromino::{RotationDirection, TetrominoType};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Lock delay settings
pub const LOCK_DELAY_MS: u64 = 500;
pub const MAX_LOCK_RESETS: u32 = 15;
/// Number of pieces shown in the preview
pub const NEXT_QUEUE_LEN: usize = 5;

/// Game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
    /// Mode goal reached, or the time ran out in a mode that ends on time
    Completed,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Completed)
    }
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    Hold,
    Pause,
}

/// Things that happened during a call, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    LineClear {
        clear_type: ClearType,
        score: u64,
        combo: i32,
        back_to_back: bool,
        rows: Vec<usize>,
    },
    HardDrop {
        distance: u32,
    },
    Lock,
    Hold,
    LevelUp {
        level: u32,
    },
    GameOver,
    Completed,
}

/// End-of-game (or mid-game) figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub mode: String,
    pub status: GameStatus,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub pieces: u32,
    pub elapsed_ms: u64,
    pub time: String,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct GameState<R = ChaCha8Rng> {
    /// The game board
    board: Board,
    /// Score tracking
    score: Score,
    mode: ModeConfig,
    /// Piece bag randomizer
    bag: Bag<R>,
    status: GameStatus,
    /// Current falling piece, only `None` after a top out
    current_piece: Option<Piece>,
    /// Held piece (can swap once per piece)
    hold_piece: Option<TetrominoType>,
    /// Whether hold has been used this piece
    hold_used: bool,
    next_queue: VecDeque<TetrominoType>,
    level: u32,
    lines: u32,
    pieces_locked: u32,
    elapsed_ms: u64,
    /// Time banked toward the next gravity step
    gravity_ms: f64,
    lock_active: bool,
    lock_timer_ms: u64,
    /// Number of lock resets used
    lock_resets: u32,
    /// Whether the last successful move of this piece was a rotation
    last_move_rotation: bool,
    /// T-spin flags recorded by that rotation
    last_rotation_t_spin: bool,
    last_rotation_t_spin_mini: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with a random seed
    pub fn new(mode: ModeConfig) -> Self {
        Self::with_seed(mode, rand::random())
    }

    /// Create a new game whose piece sequence is fixed by `seed`
    pub fn with_seed(mode: ModeConfig, seed: u64) -> Self {
        debug!(mode = mode.mode.name(), seed, "new game");
        Self::from_bag(mode, Bag::with_seed(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game drawing pieces from the given random source
    pub fn with_rng(mode: ModeConfig, rng: R) -> Self {
        Self::from_bag(mode, Bag::with_rng(rng))
    }

    fn from_bag(mode: ModeConfig, mut bag: Bag<R>) -> Self {
        let next_queue = (0..NEXT_QUEUE_LEN).map(|_| bag.next()).collect();
        let mut game = Self {
            board: Board::new(),
            score: Score::new(),
            mode,
            bag,
            status: GameStatus::Playing,
            current_piece: None,
            hold_piece: None,
            hold_used: false,
            next_queue,
            level: mode.start_level,
            lines: 0,
            pieces_locked: 0,
            elapsed_ms: 0,
            gravity_ms: 0.0,
            lock_active: false,
            lock_timer_ms: 0,
            lock_resets: 0,
            last_move_rotation: false,
            last_rotation_t_spin: false,
            last_rotation_t_spin_mini: false,
            events: Vec::new(),
        };
        game.spawn_next();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> i32 {
        self.score.combo
    }

    pub fn back_to_back(&self) -> i32 {
        self.score.back_to_back
    }

    pub fn last_clear(&self) -> Option<ClearType> {
        self.score.last_clear
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn hold_piece(&self) -> Option<TetrominoType> {
        self.hold_piece
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    /// The next pieces, front first
    pub fn next_queue(&self) -> Vec<TetrominoType> {
        self.next_queue.iter().copied().collect()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn mode(&self) -> &ModeConfig {
        &self.mode
    }

    /// Row the current piece would land on
    pub fn ghost_row(&self) -> Option<i32> {
        self.current_piece
            .as_ref()
            .map(|piece| piece.ghost_row(&self.board))
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            mode: self.mode.mode.name().to_string(),
            status: self.status,
            score: self.score.points,
            level: self.level,
            lines: self.lines,
            pieces: self.pieces_locked,
            elapsed_ms: self.elapsed_ms,
            time: crate::mode::format_time(self.elapsed_ms),
        }
    }

    /// Process an action, returns whether it did anything
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::SoftDrop => self.soft_drop(),
            Action::HardDrop => {
                let can_act = self.can_act();
                self.hard_drop();
                can_act
            }
            Action::RotateCW => self.rotate_cw(),
            Action::RotateCCW => self.rotate_ccw(),
            Action::Hold => self.hold(),
            Action::Pause => self.toggle_pause(),
        }
    }

    /// Advance game time by `delta_ms`
    pub fn tick(&mut self, delta_ms: u64) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if is_time_expired(&self.mode, self.elapsed_ms) {
            // Completable modes failed their goal in time
            let end = if self.mode.completable {
                GameStatus::GameOver
            } else {
                GameStatus::Completed
            };
            self.finish(end);
            return;
        }

        if self.current_piece.is_none() {
            return;
        }

        if self.lock_active {
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(delta_ms);
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_piece();
            }
            return;
        }

        self.gravity_ms += delta_ms as f64;
        let interval = gravity_interval_ms(self.level);
        // Inclusive: a full interval drops the piece on that tick
        while self.gravity_ms >= interval {
            self.gravity_ms -= interval;
            let Some(piece) = self.current_piece.as_mut() else {
                return;
            };
            if piece.try_shift(&self.board, 1, 0) {
                self.last_move_rotation = false;
                trace!(row = piece.row, "gravity");
            } else {
                self.gravity_ms = 0.0;
                self.start_lock_delay();
                break;
            }
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    fn shift(&mut self, cols: i32) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };
        if !piece.try_shift(&self.board, 0, cols) {
            return false;
        }
        self.last_move_rotation = false;
        self.after_move();
        true
    }

    /// Move down one row for 1 point
    pub fn soft_drop(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };
        if !piece.try_shift(&self.board, 1, 0) {
            return false;
        }
        let resting = piece.is_resting(&self.board);
        self.score.add_soft_drop(1);
        self.last_move_rotation = false;
        self.gravity_ms = 0.0;
        if resting {
            self.start_lock_delay();
        }
        true
    }

    /// Drop to the ghost row for 2 points per row and lock immediately
    pub fn hard_drop(&mut self) {
        if !self.can_act() {
            return;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return;
        };
        let ghost = piece.ghost_row(&self.board);
        let distance = (ghost - piece.row).max(0) as u32;
        piece.row = ghost;
        if distance > 0 {
            self.last_move_rotation = false;
        }
        self.score.add_hard_drop(distance);
        self.emit(GameEvent::HardDrop { distance });
        self.lock_piece();
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(RotationDirection::CounterClockwise)
    }

    fn rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.can_act() {
            return false;
        }
        let Some(piece) = self.current_piece.as_mut() else {
            return false;
        };
        let Some(result) = piece.rotate(direction, &self.board) else {
            return false;
        };
        self.last_move_rotation = true;
        self.last_rotation_t_spin = result.is_t_spin;
        self.last_rotation_t_spin_mini = result.is_t_spin_mini;
        self.after_move();
        true
    }

    /// Swap the current piece with the held one, once per piece
    pub fn hold(&mut self) -> bool {
        if !self.can_act() || self.hold_used {
            return false;
        }
        let Some(current) = self.current_piece.take() else {
            return false;
        };

        match self.hold_piece.replace(current.piece_type) {
            Some(held) => self.spawn(held),
            None => self.spawn_next(),
        }
        self.hold_used = true;
        self.emit(GameEvent::Hold);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver | GameStatus::Completed => return false,
        };
        debug!(status = ?self.status, "pause toggled");
        true
    }

    fn can_act(&self) -> bool {
        self.status == GameStatus::Playing && self.current_piece.is_some()
    }

    /// Lock delay bookkeeping after a successful translation or rotation
    fn after_move(&mut self) {
        if self.lock_active && self.lock_resets < MAX_LOCK_RESETS {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }

        let resting = self
            .current_piece
            .as_ref()
            .is_some_and(|piece| piece.is_resting(&self.board));
        if resting {
            self.start_lock_delay();
        } else {
            self.lock_active = false;
            self.lock_timer_ms = 0;
        }
    }

    fn start_lock_delay(&mut self) {
        if !self.lock_active {
            self.lock_active = true;
            self.lock_timer_ms = 0;
        }
    }

    /// Lock the current piece, score it, and spawn the next one
    fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };

        self.board
            .lock_piece(piece.piece_type, piece.rotation, piece.row, piece.col);
        self.pieces_locked += 1;
        self.emit(GameEvent::Lock);

        let cleared = self.board.clear_lines();
        let (t_spin, t_spin_mini) = if self.last_move_rotation {
            (self.last_rotation_t_spin, self.last_rotation_t_spin_mini)
        } else {
            (false, false)
        };

        let result =
            self.score
                .process_line_clear(cleared.count as u32, self.level, t_spin, t_spin_mini);
        if cleared.count > 0 || result.clear_type == ClearType::TSpinZero {
            debug!(clear = result.clear_type.name(), score = result.score, "line clear");
            self.emit(GameEvent::LineClear {
                clear_type: result.clear_type,
                score: result.score,
                combo: result.combo,
                back_to_back: result.back_to_back,
                rows: cleared.rows,
            });
        }

        self.lines += cleared.count as u32;
        let level = calculate_level(&self.mode, self.mode.start_level, self.lines);
        if level > self.level {
            self.level = level;
            self.emit(GameEvent::LevelUp { level });
        }

        if is_mode_completed(&self.mode, self.level, self.lines, self.elapsed_ms) {
            self.finish(GameStatus::Completed);
            return;
        }

        // Lock out: something was left in the hidden buffer
        if self.board.is_top_row_occupied() {
            self.finish(GameStatus::GameOver);
            return;
        }

        self.spawn_next();
    }

    /// Take the front of the queue and refill its tail
    fn spawn_next(&mut self) {
        let next = self.next_queue.pop_front().unwrap_or_else(|| self.bag.next());
        self.next_queue.push_back(self.bag.next());
        self.spawn(next);
        self.hold_used = false;
    }

    /// Place a fresh piece at the spawn position, topping out if it collides
    fn spawn(&mut self, piece_type: TetrominoType) {
        let piece = Piece::new(piece_type);
        self.current_piece = Some(piece);
        self.reset_piece_state();

        if !piece.fits(&self.board) {
            debug!(?piece_type, "spawn blocked");
            self.finish(GameStatus::GameOver);
        }
    }

    /// Reset per-piece state
    fn reset_piece_state(&mut self) {
        self.gravity_ms = 0.0;
        self.lock_active = false;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.last_move_rotation = false;
        self.last_rotation_t_spin = false;
        self.last_rotation_t_spin_mini = false;
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        debug!(
            ?status,
            score = self.score.points,
            lines = self.lines,
            elapsed_ms = self.elapsed_ms,
            "game finished"
        );
        let event = match status {
            GameStatus::Completed => GameEvent::Completed,
            _ => GameEvent::GameOver,
        };
        self.emit(event);
    }

    fn emit(&mut self, event: GameEvent) {
        debug!(?event, "game event");
        self.events.push(event);
    }
}
