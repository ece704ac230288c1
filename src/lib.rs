//! TETRS engine - the rules of a Guideline falling-block game.
//!
//! Everything here is deterministic and single-threaded: SRS rotation with
//! wall kicks, a 7-bag randomizer, lock delay, hold, T-spin detection and
//! Guideline scoring. A driver calls [`GameState::tick`] with elapsed time
//! and the player operations in between, then drains [`GameEvent`]s.
//!
//! ```
//! use tetrs_engine::{GameMode, GameState, GameStatus};
//!
//! let mut game = GameState::with_seed(GameMode::Sprint.config(), 42);
//! game.move_left();
//! game.rotate_cw();
//! game.hard_drop();
//! game.tick(16);
//! assert_eq!(game.status(), GameStatus::Playing);
//! let events = game.take_events();
//! assert!(!events.is_empty());
//! ```

pub mod bag;
pub mod board;
pub mod game;
pub mod mode;
pub mod piece;
pub mod replay;
pub mod score;
pub mod settings;
pub mod srs;
pub mod tetromino;

pub use bag::Bag;
pub use board::Board;
pub use game::{Action, GameEvent, GameState, GameStatus, GameSummary};
pub use mode::{GameMode, ModeConfig};
pub use piece::Piece;
pub use score::{ClearType, Score};
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
