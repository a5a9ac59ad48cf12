//! The serde form of a [MazeGame], used for JSON fixtures

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    maze::{self, MazeError, MazeGame},
    types::{Position, PositionGettableGame},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ghost {
    pub position: Position,
    /// Defaults to `position` when missing
    #[serde(default)]
    pub start: Option<Position>,
    #[serde(default)]
    pub scared_timer: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub walls: Vec<Position>,
    #[serde(default)]
    pub food: Vec<Position>,
    #[serde(default)]
    pub capsules: Vec<Position>,
    pub pacman: Position,
    #[serde(default)]
    pub ghosts: Vec<Ghost>,
    #[serde(default)]
    pub score: i64,
}

impl TryFrom<Maze> for MazeGame {
    type Error = MazeError;

    fn try_from(wire: Maze) -> Result<Self, Self::Error> {
        let ghosts = wire
            .ghosts
            .into_iter()
            .map(|g| maze::Ghost {
                position: g.position,
                start: g.start.unwrap_or(g.position),
                scared_timer: g.scared_timer,
            })
            .collect();

        MazeGame::build(
            wire.width,
            wire.height,
            wire.walls.into_iter().collect::<HashSet<_>>(),
            wire.food,
            wire.capsules,
            wire.pacman,
            ghosts,
            wire.score,
        )
    }
}

impl From<&MazeGame> for Maze {
    fn from(game: &MazeGame) -> Self {
        let mut walls: Vec<Position> = game.walls().copied().collect();
        walls.sort();

        Maze {
            width: game.width(),
            height: game.height(),
            walls,
            food: game.food().to_vec(),
            capsules: game.capsules().to_vec(),
            pacman: game.maximizer_position(),
            ghosts: game
                .ghosts()
                .iter()
                .map(|g| Ghost {
                    position: g.position,
                    start: Some(g.start),
                    scared_timer: g.scared_timer,
                })
                .collect(),
            score: game.score(),
        }
    }
}
