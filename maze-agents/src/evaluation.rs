use std::{fmt, str::FromStr};

use adversarial_minimax::paranoid::Scorable;
use decorum::N64;
use maze_types::{
    types::{
        CollectibleGettableGame, OpponentGettableGame, PositionGettableGame, ScoreGettableGame,
        VictorDeterminableGame,
    },
    Position,
};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

pub const WIN_SCORE: f64 = 1_000_000.0;
pub const LOSS_SCORE: f64 = -1_000_000.0;

pub const CLOSEST_COLLECTIBLE_WEIGHT: f64 = 1.2;
pub const COLLECTIBLE_COUNT_WEIGHT: f64 = 8.5;
pub const POWER_ITEM_COUNT_WEIGHT: f64 = 19.8;
pub const THREAT_PROXIMITY_WEIGHT: f64 = 2.4;
pub const VULNERABLE_PROXIMITY_WEIGHT: f64 = 3.2;

/// Distance used when there is no dangerous opponent left on the board
pub const NO_THREAT_DISTANCE: u32 = 100_000;
/// Stands in for `1 / 0` when a dangerous opponent shares the maximizer's tile
pub const ZERO_DISTANCE_INVERSE: f64 = 10_000.0;

/// The game's own score, unmodified
pub fn score_evaluation<T>(node: &T) -> N64
where
    T: ScoreGettableGame,
{
    N64::from(node.intrinsic_score())
}

fn closest_distance<'a>(
    from: &Position,
    targets: impl IntoIterator<Item = &'a Position>,
) -> Option<u32> {
    targets
        .into_iter()
        .map(|target| from.manhattan_distance(target))
        .min()
}

/// Blends the game score with how the board looks from the maximizer's tile
///
/// Terminal states short circuit to [WIN_SCORE] or [LOSS_SCORE] before any feature is computed.
/// Every feature is subtracted from the intrinsic score, this includes the distance to the
/// closest vulnerable opponent.
pub fn composite_evaluation<T>(node: &T) -> N64
where
    T: VictorDeterminableGame
        + ScoreGettableGame
        + PositionGettableGame
        + CollectibleGettableGame
        + OpponentGettableGame,
{
    if node.is_win() {
        return N64::from(WIN_SCORE);
    }
    if node.is_loss() {
        return N64::from(LOSS_SCORE);
    }

    let me = node.maximizer_position();

    let closest_collectible = closest_distance(&me, &node.remaining_collectibles()).unwrap_or(0);
    let collectible_count = node.remaining_collectible_count();
    let power_item_count = node.remaining_power_items().len();

    let (vulnerable, dangerous): (Vec<_>, Vec<_>) = node
        .opponent_agents()
        .into_iter()
        .partition(|opponent| opponent.is_vulnerable());

    let threat_distance = closest_distance(&me, dangerous.iter().map(|o| &o.position))
        .unwrap_or(NO_THREAT_DISTANCE);
    let threat_inverse = if threat_distance == 0 {
        ZERO_DISTANCE_INVERSE
    } else {
        1.0 / threat_distance as f64
    };
    let vulnerable_distance =
        closest_distance(&me, vulnerable.iter().map(|o| &o.position)).unwrap_or(0);

    N64::from(
        node.intrinsic_score()
            - CLOSEST_COLLECTIBLE_WEIGHT * closest_collectible as f64
            - COLLECTIBLE_COUNT_WEIGHT * collectible_count as f64
            - POWER_ITEM_COUNT_WEIGHT * power_item_count as f64
            - THREAT_PROXIMITY_WEIGHT * threat_inverse
            - VULNERABLE_PROXIMITY_WEIGHT * vulnerable_distance as f64,
    )
}

/// Selects one of the evaluation functions above, by name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    #[default]
    Baseline,
    Composite,
}

impl FromStr for EvaluationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(EvaluationKind::Baseline),
            "composite" => Ok(EvaluationKind::Composite),
            _ => Err(ConfigError::UnknownEvaluation(s.to_owned())),
        }
    }
}

impl fmt::Display for EvaluationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvaluationKind::Baseline => "baseline",
            EvaluationKind::Composite => "composite",
        };

        write!(f, "{name}")
    }
}

impl<T> Scorable<T, N64> for EvaluationKind
where
    T: VictorDeterminableGame
        + ScoreGettableGame
        + PositionGettableGame
        + CollectibleGettableGame
        + OpponentGettableGame,
{
    fn score(&self, game: &T) -> N64 {
        match self {
            EvaluationKind::Baseline => score_evaluation(game),
            EvaluationKind::Composite => composite_evaluation(game),
        }
    }
}

#[cfg(test)]
mod tests {
    use maze_types::{
        types::{SimulableGame, VictorDeterminableGame},
        Direction, MazeGame, OpponentState,
    };

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Snapshot {
        win: bool,
        loss: bool,
        score: f64,
        me: Position,
        collectibles: Vec<Position>,
        power_items: Vec<Position>,
        opponents: Vec<OpponentState>,
    }

    impl VictorDeterminableGame for Snapshot {
        fn is_win(&self) -> bool {
            self.win
        }

        fn is_loss(&self) -> bool {
            self.loss
        }
    }

    impl ScoreGettableGame for Snapshot {
        fn intrinsic_score(&self) -> f64 {
            self.score
        }
    }

    impl PositionGettableGame for Snapshot {
        fn maximizer_position(&self) -> Position {
            self.me
        }
    }

    impl CollectibleGettableGame for Snapshot {
        fn remaining_collectibles(&self) -> Vec<Position> {
            self.collectibles.clone()
        }

        fn remaining_power_items(&self) -> Vec<Position> {
            self.power_items.clone()
        }
    }

    impl OpponentGettableGame for Snapshot {
        fn opponent_agents(&self) -> Vec<OpponentState> {
            self.opponents.clone()
        }
    }

    fn opponent(x: i32, y: i32, vulnerability_timer: u32) -> OpponentState {
        OpponentState {
            position: Position::new(x, y),
            vulnerability_timer,
        }
    }

    #[test]
    fn test_baseline_is_the_intrinsic_score() {
        let snapshot = Snapshot {
            score: 42.5,
            collectibles: vec![Position::new(3, 3)],
            ..Default::default()
        };

        assert_eq!(score_evaluation(&snapshot), N64::from(42.5));
        assert_eq!(
            EvaluationKind::Baseline.score(&snapshot),
            N64::from(42.5)
        );
    }

    #[test]
    fn test_terminal_states_short_circuit() {
        let won = Snapshot {
            win: true,
            score: -3.0,
            collectibles: vec![Position::new(1, 0)],
            opponents: vec![opponent(0, 0, 0)],
            ..Default::default()
        };
        let lost = Snapshot {
            win: false,
            loss: true,
            score: 900.0,
            ..won.clone()
        };

        assert_eq!(composite_evaluation(&won), N64::from(WIN_SCORE));
        assert_eq!(composite_evaluation(&lost), N64::from(LOSS_SCORE));
    }

    #[test]
    fn test_composite_features() {
        let snapshot = Snapshot {
            score: 10.0,
            me: Position::new(0, 0),
            collectibles: vec![Position::new(3, 0), Position::new(1, 1)],
            power_items: vec![Position::new(4, 4)],
            opponents: vec![opponent(0, 5, 0), opponent(2, 2, 3), opponent(6, 0, 1)],
            ..Default::default()
        };

        let expected = 10.0
            - CLOSEST_COLLECTIBLE_WEIGHT * 2.0
            - COLLECTIBLE_COUNT_WEIGHT * 2.0
            - POWER_ITEM_COUNT_WEIGHT * 1.0
            - THREAT_PROXIMITY_WEIGHT * (1.0 / 5.0)
            - VULNERABLE_PROXIMITY_WEIGHT * 4.0;

        assert_eq!(composite_evaluation(&snapshot), N64::from(expected));
        assert_eq!(
            EvaluationKind::Composite.score(&snapshot),
            N64::from(expected)
        );
    }

    #[test]
    fn test_empty_board_features() {
        let snapshot = Snapshot {
            score: 7.0,
            ..Default::default()
        };

        let expected = 7.0
            - CLOSEST_COLLECTIBLE_WEIGHT * 0.0
            - COLLECTIBLE_COUNT_WEIGHT * 0.0
            - POWER_ITEM_COUNT_WEIGHT * 0.0
            - THREAT_PROXIMITY_WEIGHT * (1.0 / NO_THREAT_DISTANCE as f64)
            - VULNERABLE_PROXIMITY_WEIGHT * 0.0;

        assert_eq!(composite_evaluation(&snapshot), N64::from(expected));
    }

    #[test]
    fn test_dangerous_opponent_on_the_same_tile_does_not_divide_by_zero() {
        let adjacent = Snapshot {
            opponents: vec![opponent(1, 0, 0)],
            ..Default::default()
        };
        let overlapping = Snapshot {
            opponents: vec![opponent(0, 0, 0)],
            ..Default::default()
        };

        let score = composite_evaluation(&overlapping);

        assert_eq!(
            score,
            N64::from(0.0 - THREAT_PROXIMITY_WEIGHT * ZERO_DISTANCE_INVERSE)
        );
        assert!(score < composite_evaluation(&adjacent));
    }

    #[test]
    fn test_farther_vulnerable_opponents_lower_the_score() {
        let close = Snapshot {
            opponents: vec![opponent(2, 0, 10)],
            ..Default::default()
        };
        let far = Snapshot {
            opponents: vec![opponent(6, 0, 10)],
            ..Default::default()
        };

        assert!(composite_evaluation(&far) < composite_evaluation(&close));
    }

    #[test]
    fn test_composite_on_a_maze() {
        let game: MazeGame = "P.o G".parse().unwrap();

        let expected = 0.0
            - CLOSEST_COLLECTIBLE_WEIGHT * 1.0
            - COLLECTIBLE_COUNT_WEIGHT * 1.0
            - POWER_ITEM_COUNT_WEIGHT * 1.0
            - THREAT_PROXIMITY_WEIGHT * (1.0 / 4.0)
            - VULNERABLE_PROXIMITY_WEIGHT * 0.0;

        assert_eq!(composite_evaluation(&game), N64::from(expected));
    }

    #[test]
    fn test_composite_on_a_lost_maze() {
        let game: MazeGame = "PG.".parse().unwrap();
        let caught = game.apply_action(1, Direction::West);

        assert!(caught.is_loss());
        assert_eq!(composite_evaluation(&caught), N64::from(LOSS_SCORE));
        assert_eq!(score_evaluation(&caught), N64::from(-500.0));
    }

    #[test]
    fn test_evaluation_kind_names() {
        assert_eq!(
            "composite".parse::<EvaluationKind>(),
            Ok(EvaluationKind::Composite)
        );
        assert_eq!(
            " Baseline".parse::<EvaluationKind>(),
            Ok(EvaluationKind::Baseline)
        );
        assert_eq!(
            "better".parse::<EvaluationKind>(),
            Err(ConfigError::UnknownEvaluation("better".to_owned()))
        );
        assert_eq!(EvaluationKind::Composite.to_string(), "composite");
    }
}
