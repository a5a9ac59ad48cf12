use std::{collections::HashSet, fmt, sync::Arc};

use itertools::Itertools;
use thiserror::Error;

use crate::types::{
    AgentIndex, CollectibleGettableGame, Direction, OpponentGettableGame, OpponentState,
    Position, PositionGettableGame, ScoreGettableGame, SimulableGame, TurnOrderedGame,
    VictorDeterminableGame, MAXIMIZER,
};

/// Every maximizer move costs this much
pub const TIME_PENALTY: i64 = 1;
pub const COLLECTIBLE_SCORE: i64 = 10;
pub const WIN_BONUS: i64 = 500;
pub const LOSS_PENALTY: i64 = 500;
pub const OPPONENT_CONSUMED_SCORE: i64 = 200;
/// How long opponents stay vulnerable after a power item is consumed
pub const VULNERABLE_TURNS: u32 = 40;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("the layout is empty")]
    EmptyLayout,

    #[error("row {row} has {found} tiles but the first row has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile {tile:?} at {position}")]
    UnknownTile { tile: char, position: Position },

    #[error("the layout has no maximizer")]
    MissingMaximizer,

    #[error("found a second maximizer at {0}")]
    DuplicateMaximizer(Position),

    #[error("{0} is outside of the maze")]
    OutOfBounds(Position),

    #[error("{0} is inside a wall")]
    InsideWall(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub position: Position,
    /// Where the ghost respawns after being consumed
    pub start: Position,
    pub scared_timer: u32,
}

/// A deterministic grid maze. Agent 0 collects food while every other agent is a ghost trying
/// to catch it.
///
/// Transitions never mutate a state, [SimulableGame::apply_action] always clones. The walls are
/// shared between all the states of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGame {
    width: i32,
    height: i32,
    walls: Arc<HashSet<Position>>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    pacman: Position,
    ghosts: Vec<Ghost>,
    score: i64,
    outcome: Outcome,
}

impl MazeGame {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn build(
        width: i32,
        height: i32,
        walls: HashSet<Position>,
        food: Vec<Position>,
        capsules: Vec<Position>,
        pacman: Position,
        ghosts: Vec<Ghost>,
        score: i64,
    ) -> Result<Self, MazeError> {
        let game = Self {
            width,
            height,
            walls: Arc::new(walls),
            food,
            capsules,
            pacman,
            ghosts,
            score,
            outcome: Outcome::InProgress,
        };

        let occupied = game
            .food
            .iter()
            .chain(game.capsules.iter())
            .chain(std::iter::once(&game.pacman))
            .chain(game.ghosts.iter().flat_map(|g| [&g.position, &g.start]));
        for position in occupied {
            if !game.in_bounds(position) {
                return Err(MazeError::OutOfBounds(*position));
            }
            if game.walls.contains(position) {
                return Err(MazeError::InsideWall(*position));
            }
        }

        Ok(game.with_resolved_outcome())
    }

    /// A maze that starts with no food left is already won, and a ghost sitting on the
    /// maximizer has to be resolved before anyone moves
    fn with_resolved_outcome(mut self) -> Self {
        if self.food.is_empty() {
            self.outcome = Outcome::Win;
        } else {
            self.resolve_collisions();
        }

        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn food(&self) -> &[Position] {
        &self.food
    }

    pub fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    pub fn walls(&self) -> impl Iterator<Item = &Position> {
        self.walls.iter()
    }

    pub fn in_bounds(&self, position: &Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub fn is_wall(&self, position: &Position) -> bool {
        !self.in_bounds(position) || self.walls.contains(position)
    }

    fn open_directions(&self, from: Position) -> impl Iterator<Item = Direction> + '_ {
        Direction::moving()
            .into_iter()
            .filter(move |d| !self.is_wall(&from.step(*d)))
    }

    fn agent_position(&self, agent: AgentIndex) -> Option<Position> {
        if agent == MAXIMIZER {
            Some(self.pacman)
        } else {
            self.ghosts.get(agent - 1).map(|g| g.position)
        }
    }

    fn move_maximizer(&mut self, direction: Direction) {
        let target = self.pacman.step(direction);
        if !self.is_wall(&target) {
            self.pacman = target;
        }
        self.score -= TIME_PENALTY;

        if let Some(i) = self.food.iter().position(|f| *f == self.pacman) {
            self.food.remove(i);
            self.score += COLLECTIBLE_SCORE;

            if self.food.is_empty() {
                self.score += WIN_BONUS;
                self.outcome = Outcome::Win;
                return;
            }
        }

        if let Some(i) = self.capsules.iter().position(|c| *c == self.pacman) {
            self.capsules.remove(i);
            for ghost in self.ghosts.iter_mut() {
                ghost.scared_timer = VULNERABLE_TURNS;
            }
        }

        self.resolve_collisions();
    }

    fn move_ghost(&mut self, ghost_index: usize, direction: Direction) {
        let Some(ghost) = self.ghosts.get(ghost_index).copied() else {
            return;
        };

        let target = ghost.position.step(direction);
        let blocked = self.is_wall(&target);

        let ghost = &mut self.ghosts[ghost_index];
        if !blocked {
            ghost.position = target;
        }
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);

        self.resolve_collisions();
    }

    fn resolve_collisions(&mut self) {
        let pacman = self.pacman;
        for ghost in self.ghosts.iter_mut().filter(|g| g.position == pacman) {
            if ghost.scared_timer > 0 {
                self.score += OPPONENT_CONSUMED_SCORE;
                ghost.position = ghost.start;
                ghost.scared_timer = 0;
            } else if self.outcome == Outcome::InProgress {
                self.score -= LOSS_PENALTY;
                self.outcome = Outcome::Loss;
            }
        }
    }
}

impl VictorDeterminableGame for MazeGame {
    fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    fn is_loss(&self) -> bool {
        self.outcome == Outcome::Loss
    }
}

impl TurnOrderedGame for MazeGame {
    fn agent_count(&self) -> usize {
        self.ghosts.len() + 1
    }
}

impl SimulableGame for MazeGame {
    type Action = Direction;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Direction> {
        if self.is_over() {
            return vec![];
        }

        let Some(position) = self.agent_position(agent) else {
            return vec![];
        };

        let mut actions = self.open_directions(position).collect_vec();
        if agent == MAXIMIZER || actions.is_empty() {
            actions.push(Direction::Stop);
        }

        actions
    }

    fn apply_action(&self, agent: AgentIndex, action: Direction) -> Self {
        let mut next = self.clone();
        if next.is_over() {
            return next;
        }

        if agent == MAXIMIZER {
            next.move_maximizer(action);
        } else {
            next.move_ghost(agent - 1, action);
        }

        next
    }
}

impl ScoreGettableGame for MazeGame {
    fn intrinsic_score(&self) -> f64 {
        self.score as f64
    }
}

impl PositionGettableGame for MazeGame {
    fn maximizer_position(&self) -> Position {
        self.pacman
    }
}

impl CollectibleGettableGame for MazeGame {
    fn remaining_collectibles(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn remaining_collectible_count(&self) -> usize {
        self.food.len()
    }

    fn remaining_power_items(&self) -> Vec<Position> {
        self.capsules.clone()
    }
}

impl OpponentGettableGame for MazeGame {
    fn opponent_agents(&self) -> Vec<OpponentState> {
        self.ghosts
            .iter()
            .map(|g| OpponentState {
                position: g.position,
                vulnerability_timer: g.scared_timer,
            })
            .collect()
    }
}

/// Renders the maze back into the layout format, top row first
impl fmt::Display for MazeGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let row: String = (0..self.width)
                .map(|x| {
                    let p = Position::new(x, y);
                    if self.walls.contains(&p) {
                        '%'
                    } else if self.ghosts.iter().any(|g| g.position == p) {
                        'G'
                    } else if self.pacman == p {
                        'P'
                    } else if self.capsules.contains(&p) {
                        'o'
                    } else if self.food.contains(&p) {
                        '.'
                    } else {
                        ' '
                    }
                })
                .collect();
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}
