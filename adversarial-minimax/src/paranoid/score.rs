use decorum::N64;

/// Scores that have a worst and a best value which no real evaluation can reach
///
/// The search seeds its running best and the Alpha-Beta window with these, so they must compare
/// beyond anything a scoring function returns.
pub trait BoundedScore: Ord + Copy {
    /// Lower than any score a scoring function produces
    fn worst_possible_score() -> Self;

    /// Higher than any score a scoring function produces
    fn best_possible_score() -> Self;
}

impl BoundedScore for N64 {
    fn worst_possible_score() -> Self {
        N64::from(f64::NEG_INFINITY)
    }

    fn best_possible_score() -> Self {
        N64::from(f64::INFINITY)
    }
}

impl BoundedScore for i64 {
    fn worst_possible_score() -> Self {
        i64::MIN
    }

    fn best_possible_score() -> Self {
        i64::MAX
    }
}

impl BoundedScore for i32 {
    fn worst_possible_score() -> Self {
        i32::MIN
    }

    fn best_possible_score() -> Self {
        i32::MAX
    }
}

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait to be able to layer in different scoring approaches
pub trait Scorable<GameType, ScoreType> {
    /// Convert the given GameType into a ScoreType
    fn score(&self, game: &GameType) -> ScoreType;
}

impl<GameType, ScoreType, FnLike: Fn(&GameType) -> ScoreType> Scorable<GameType, ScoreType>
    for FnLike
{
    fn score(&self, game: &GameType) -> ScoreType {
        (self)(game)
    }
}
