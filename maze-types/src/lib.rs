//! Game state types for the maze.
//!
//! [types] holds the small capability traits that the search and the evaluation functions are
//! written against. [maze] is a concrete engine implementing all of them, and
//! [wire_representation] is its serde friendly form used for JSON fixtures.

pub mod layout;
pub mod maze;
pub mod types;
pub mod wire_representation;

pub use maze::MazeGame;
pub use types::{AgentIndex, Direction, OpponentState, Position, MAXIMIZER};
