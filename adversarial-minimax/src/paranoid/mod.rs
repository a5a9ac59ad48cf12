//! There are multiple multiplayer variations to minimax, this module is for the `paranoid`
//! variant.
//!
//! This variant assumes all your opponents are working together to minimize your score.
//! Opponents move one after the other, in increasing agent index, before control comes back to
//! agent 0. The search can run plain minimax or prune with Alpha-Beta, both return the same
//! decision.
//!
//! This variant works by always scoring nodes as 'yourself'.
//! When propagating scores up the tree, it chooses the highest score when its your turn
//! and the lowest score when its the opponent's turn.
//!
//! ```rust
//! use adversarial_minimax::paranoid::{ParanoidSearch, Pruning, SearchOptions};
//! use decorum::N64;
//! use maze_types::{types::ScoreGettableGame, Direction, MazeGame};
//!
//! // One row maze, the maximizer on the left and a single collectible two tiles away
//! let game: MazeGame = "P .".parse().unwrap();
//!
//! // This is the scoring function that we will use to evaluate the leaves
//! fn score_function(game: &MazeGame) -> N64 {
//!     N64::from(game.intrinsic_score())
//! }
//!
//! let search = ParanoidSearch::new(
//!     score_function,
//!     "doc-search",
//!     SearchOptions {
//!         depth: 1,
//!         pruning: Pruning::AlphaBeta,
//!     },
//! );
//!
//! assert_eq!(search.choose_action(&game), Some(Direction::East));
//! ```

mod score;
pub use score::{BoundedScore, Scorable};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod eval;
pub use eval::{next_turn, ParanoidSearch, Pruning, SearchOptions};
