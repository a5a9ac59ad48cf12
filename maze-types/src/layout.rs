//! Text layouts, one character per tile, top row first
//!
//! ```text
//! %%%%%%%
//! %P . G%
//! %o%%%.%
//! %%%%%%%
//! ```
//!
//! `%` is a wall, `.` a collectible, `o` a power item, `P` the maximizer and `G` an opponent.
//! Opponents get agent indices in reading order, starting at 1.

use std::{collections::HashSet, str::FromStr};

use itertools::Itertools;

use crate::{
    maze::{Ghost, MazeError, MazeGame},
    types::Position,
};

pub fn parse_layout(layout: &str) -> Result<MazeGame, MazeError> {
    let rows = layout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect_vec();

    let width = rows.first().ok_or(MazeError::EmptyLayout)?.chars().count();
    let height = rows.len();

    let mut walls = HashSet::new();
    let mut food = vec![];
    let mut capsules = vec![];
    let mut pacman = None;
    let mut ghosts = vec![];

    for (row_index, row) in rows.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(MazeError::RaggedRow {
                row: row_index,
                expected: width,
                found,
            });
        }

        let y = (height - 1 - row_index) as i32;
        for (x, tile) in row.chars().enumerate() {
            let position = Position::new(x as i32, y);

            match tile {
                '%' => {
                    walls.insert(position);
                }
                '.' => food.push(position),
                'o' => capsules.push(position),
                'P' => {
                    if pacman.replace(position).is_some() {
                        return Err(MazeError::DuplicateMaximizer(position));
                    }
                }
                'G' => ghosts.push(Ghost {
                    position,
                    start: position,
                    scared_timer: 0,
                }),
                ' ' => {}
                tile => return Err(MazeError::UnknownTile { tile, position }),
            }
        }
    }

    let pacman = pacman.ok_or(MazeError::MissingMaximizer)?;

    MazeGame::build(
        width as i32,
        height as i32,
        walls,
        food,
        capsules,
        pacman,
        ghosts,
        0,
    )
}

impl FromStr for MazeGame {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_layout(s)
    }
}
