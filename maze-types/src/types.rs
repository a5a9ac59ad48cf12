use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};

/// Identifies whose turn it is. Index 0 is always the maximizer.
pub type AgentIndex = usize;

/// The agent the search plays for
pub const MAXIMIZER: AgentIndex = 0;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid distance, the sum of the absolute coordinate differences
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Every direction in the order legal actions are reported in
    pub const fn all() -> [Direction; 5] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Stop,
        ]
    }

    /// The four directions that actually change position
    pub const fn moving() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// y grows upward, so North is `+1` on the y axis
    pub const fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Stop => "stop",
        };

        write!(f, "{s}")
    }
}

/// What the evaluation functions can see of an opposing agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentState {
    pub position: Position,
    /// Turns left during which this opponent can be consumed. Zero means it is dangerous
    pub vulnerability_timer: u32,
}

impl OpponentState {
    pub fn is_vulnerable(&self) -> bool {
        self.vulnerability_timer > 0
    }
}

pub trait VictorDeterminableGame {
    fn is_win(&self) -> bool;
    fn is_loss(&self) -> bool;

    fn is_over(&self) -> bool {
        self.is_win() || self.is_loss()
    }
}

pub trait TurnOrderedGame {
    /// Total number of agents, the maximizer included. Always at least 1
    fn agent_count(&self) -> usize;
}

/// Produces successor states. Implementations must never mutate `self`
pub trait SimulableGame: Sized {
    type Action: Copy + Debug + PartialEq;

    /// Legal actions for the given agent in a stable order. An empty list is valid
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    fn apply_action(&self, agent: AgentIndex, action: Self::Action) -> Self;
}

pub trait ScoreGettableGame {
    fn intrinsic_score(&self) -> f64;
}

pub trait PositionGettableGame {
    fn maximizer_position(&self) -> Position;
}

pub trait CollectibleGettableGame {
    fn remaining_collectibles(&self) -> Vec<Position>;

    fn remaining_collectible_count(&self) -> usize {
        self.remaining_collectibles().len()
    }

    fn remaining_power_items(&self) -> Vec<Position>;
}

pub trait OpponentGettableGame {
    fn opponent_agents(&self) -> Vec<OpponentState>;
}
