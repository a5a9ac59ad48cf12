use std::{fmt::Debug, marker::PhantomData};

use derivative::Derivative;
use maze_types::{
    types::{SimulableGame, TurnOrderedGame, VictorDeterminableGame},
    AgentIndex, MAXIMIZER,
};
use tracing::{info_span, trace};

use crate::{Instruments, SearchInstruments};

use super::{BoundedScore, MinMaxReturn, Scorable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Whether the search is allowed to skip subtrees
pub enum Pruning {
    /// Expand every legal action of every node
    None,
    /// Skip siblings once the Alpha-Beta window closes
    AlphaBeta,
}

#[derive(Debug, Clone, Copy)]
/// Optional properties that can be defined for a [ParanoidSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use adversarial_minimax::paranoid::{Pruning, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 2);
/// assert_eq!(defaults.pruning, Pruning::AlphaBeta);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead. One round is a move from every agent
    ///
    /// Defaults to 2
    pub depth: usize,
    /// Which variant of the search to run
    ///
    /// Defaults to [Pruning::AlphaBeta]
    pub pruning: Pruning,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            pruning: Pruning::AlphaBeta,
        }
    }
}

/// Who moves after `agent`, and at which ply
///
/// The maximizer and the last minimizer each advance the ply by one, the minimizers in between
/// share a ply. Without any minimizer the maximizer's move completes the round by itself.
pub fn next_turn(agent: AgentIndex, ply: usize, agent_count: usize) -> (AgentIndex, usize) {
    if agent_count <= 1 {
        (MAXIMIZER, ply + 2)
    } else if agent == MAXIMIZER {
        (MAXIMIZER + 1, ply + 1)
    } else if agent + 1 >= agent_count {
        (MAXIMIZER, ply + 1)
    } else {
        (agent + 1, ply)
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a scoring function and the search configuration and can be
/// used to run minimax against any game state
///
/// Nothing is kept between searches, every call starts from a fresh tree.
/// It also outputs traces using the [tracing] crate.
pub struct ParanoidSearch<GameType, ScoreType, ScorableType> {
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    /// Used to tell searches apart in traces
    pub name: &'static str,
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType) -> ScoreType>,
}

impl<GameType, ScoreType, ScorableType> ParanoidSearch<GameType, ScoreType, ScorableType>
where
    GameType: VictorDeterminableGame + TurnOrderedGame + SimulableGame + Clone + Debug,
    ScoreType: BoundedScore + Debug,
    ScorableType: Scorable<GameType, ScoreType>,
{
    /// Construct a new `ParanoidSearch`
    pub fn new(score_function: ScorableType, name: &'static str, options: SearchOptions) -> Self {
        Self {
            score_function,
            name,
            options,
            _phantom: PhantomData,
        }
    }

    /// The options this search was built with
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Pick the action agent 0 should take
    ///
    /// Returns `None` when agent 0 has no legal actions at the root, or when the root is already
    /// terminal or the depth is 0.
    pub fn choose_action(&self, game: &GameType) -> Option<GameType::Action> {
        info_span!(
            "paranoid_search",
            search_name = self.name,
            depth = self.options.depth,
            pruning = ?self.options.pruning,
            chosen_score = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let result = self.search(game);

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", format!("{:?}", result.score()).as_str());
            current_span.record(
                "chosen_action",
                format!("{:?}", result.best_action()).as_str(),
            );

            result.best_action()
        })
    }

    /// Runs the variant selected by [SearchOptions::pruning], returning the explored tree
    pub fn search(&self, game: &GameType) -> MinMaxReturn<GameType, ScoreType> {
        self.search_with_instruments(game, &Instruments {})
    }

    /// Same as [ParanoidSearch::search] but reports expansions and leaves to `instruments`
    pub fn search_with_instruments(
        &self,
        game: &GameType,
        instruments: &impl SearchInstruments,
    ) -> MinMaxReturn<GameType, ScoreType> {
        self.search_from_root(game, self.options.pruning, instruments)
    }

    /// Plain minimax, every legal action of every node is expanded
    pub fn full_minimax(&self, game: &GameType) -> MinMaxReturn<GameType, ScoreType> {
        self.search_from_root(game, Pruning::None, &Instruments {})
    }

    /// Minimax with Alpha-Beta pruning. Returns the same score and action as
    /// [ParanoidSearch::full_minimax]
    pub fn alpha_beta(&self, game: &GameType) -> MinMaxReturn<GameType, ScoreType> {
        self.search_from_root(game, Pruning::AlphaBeta, &Instruments {})
    }

    fn search_from_root(
        &self,
        game: &GameType,
        pruning: Pruning,
        instruments: &impl SearchInstruments,
    ) -> MinMaxReturn<GameType, ScoreType> {
        self.minimax(
            game,
            MAXIMIZER,
            0,
            ScoreType::worst_possible_score(),
            ScoreType::best_possible_score(),
            pruning,
            instruments,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        node: &GameType,
        agent: AgentIndex,
        ply: usize,
        alpha: ScoreType,
        beta: ScoreType,
        pruning: Pruning,
        instruments: &impl SearchInstruments,
    ) -> MinMaxReturn<GameType, ScoreType> {
        let mut alpha = alpha;
        let mut beta = beta;

        if node.is_over() || ply >= 2 * self.options.depth {
            instruments.observe_leaf(ply);
            return MinMaxReturn::Leaf {
                score: self.score_function.score(node),
            };
        }

        let possible_actions = node.legal_actions(agent);
        if possible_actions.is_empty() {
            trace!(agent, ply, "no legal actions, scoring the node as a leaf");
            instruments.observe_leaf(ply);
            return MinMaxReturn::Leaf {
                score: self.score_function.score(node),
            };
        }

        instruments.observe_expansion(agent, ply);

        let is_maximizing = agent == MAXIMIZER;
        let (next_agent, next_ply) = next_turn(agent, ply, node.agent_count());

        let mut best = if is_maximizing {
            ScoreType::worst_possible_score()
        } else {
            ScoreType::best_possible_score()
        };
        let mut options: Vec<(GameType::Action, MinMaxReturn<GameType, ScoreType>)> =
            Vec::with_capacity(possible_actions.len());
        let mut alpha_beta_cutoff = false;

        for action in possible_actions {
            let child = node.apply_action(agent, action);
            let child_return = self.minimax(
                &child,
                next_agent,
                next_ply,
                alpha,
                beta,
                pruning,
                instruments,
            );
            let value = *child_return.score();
            options.push((action, child_return));

            if is_maximizing {
                if value > best {
                    best = value;
                }

                alpha = std::cmp::max(alpha, best);
                if pruning == Pruning::AlphaBeta && alpha > beta {
                    trace!(agent, ply, ?alpha, ?beta, "alpha-beta cutoff");
                    alpha_beta_cutoff = true;
                    break;
                }
            } else {
                if value < best {
                    best = value;
                }

                beta = std::cmp::min(beta, best);
                if pruning == Pruning::AlphaBeta && beta < alpha {
                    trace!(agent, ply, ?alpha, ?beta, "alpha-beta cutoff");
                    alpha_beta_cutoff = true;
                    break;
                }
            }
        }

        // Stable sorts, so the first action to reach the best score stays in front
        if is_maximizing {
            options.sort_by_key(|(_, r)| std::cmp::Reverse(*r.score()));
        } else {
            options.sort_by_key(|(_, r)| *r.score());
        }

        MinMaxReturn::Node {
            is_maximizing,
            options,
            moving_agent: agent,
            ply,
            score: best,
            alpha_beta_cutoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        collections::{HashMap, HashSet},
        sync::Arc,
    };

    use itertools::Itertools;
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use crate::LeafCounter;

    use super::*;

    /// An explicit game tree. The state is the list of actions taken so far, and the leaf values
    /// are looked up by that list
    #[derive(Debug, Clone)]
    struct TreeGame {
        agents: usize,
        branching: u8,
        path: Vec<u8>,
        values: Arc<HashMap<Vec<u8>, i64>>,
        wins: Arc<HashSet<Vec<u8>>>,
        dead_ends: Arc<HashSet<Vec<u8>>>,
    }

    impl TreeGame {
        fn new(agents: usize, branching: u8, values: HashMap<Vec<u8>, i64>) -> Self {
            Self {
                agents,
                branching,
                path: vec![],
                values: Arc::new(values),
                wins: Default::default(),
                dead_ends: Default::default(),
            }
        }

        /// Every leaf at `plies` actions deep gets a distinct value, shuffled
        fn shuffled(agents: usize, branching: u8, plies: usize, seed: u64) -> Self {
            let paths = (0..plies)
                .map(|_| 0..branching)
                .multi_cartesian_product()
                .collect_vec();
            let mut values = (0..paths.len() as i64).collect_vec();
            values.shuffle(&mut StdRng::seed_from_u64(seed));

            Self::new(agents, branching, paths.into_iter().zip(values).collect())
        }
    }

    impl VictorDeterminableGame for TreeGame {
        fn is_win(&self) -> bool {
            self.wins.contains(&self.path)
        }

        fn is_loss(&self) -> bool {
            false
        }
    }

    impl TurnOrderedGame for TreeGame {
        fn agent_count(&self) -> usize {
            self.agents
        }
    }

    impl SimulableGame for TreeGame {
        type Action = u8;

        fn legal_actions(&self, _agent: AgentIndex) -> Vec<u8> {
            if self.dead_ends.contains(&self.path) {
                vec![]
            } else {
                (0..self.branching).collect()
            }
        }

        fn apply_action(&self, _agent: AgentIndex, action: u8) -> Self {
            let mut next = self.clone();
            next.path.push(action);
            next
        }
    }

    fn lookup(game: &TreeGame) -> i64 {
        game.values.get(&game.path).copied().unwrap_or(0)
    }

    fn search(
        depth: usize,
        pruning: Pruning,
    ) -> ParanoidSearch<TreeGame, i64, fn(&TreeGame) -> i64> {
        ParanoidSearch::new(lookup, "test", SearchOptions { depth, pruning })
    }

    #[derive(Debug, Default)]
    struct Recorder {
        expansions: RefCell<Vec<(AgentIndex, usize)>>,
        leaves: RefCell<Vec<usize>>,
    }

    impl SearchInstruments for Recorder {
        fn observe_expansion(&self, agent: AgentIndex, ply: usize) {
            self.expansions.borrow_mut().push((agent, ply));
        }

        fn observe_leaf(&self, ply: usize) {
            self.leaves.borrow_mut().push(ply);
        }
    }

    #[test]
    fn test_next_turn() {
        assert_eq!(next_turn(0, 0, 3), (1, 1));
        assert_eq!(next_turn(1, 1, 3), (2, 1));
        assert_eq!(next_turn(2, 1, 3), (0, 2));
        assert_eq!(next_turn(0, 2, 2), (1, 3));
        assert_eq!(next_turn(1, 3, 2), (0, 4));
        assert_eq!(next_turn(0, 0, 1), (0, 2));
    }

    #[test]
    fn test_depth_zero_scores_the_root() {
        let game = TreeGame::new(2, 2, HashMap::from([(vec![], 42)]));

        for pruning in [Pruning::None, Pruning::AlphaBeta] {
            let result = search(0, pruning).search(&game);

            assert!(matches!(result, MinMaxReturn::Leaf { score: 42 }));
            assert_eq!(result.best_action(), None);
            assert_eq!(search(0, pruning).choose_action(&game), None);
        }
    }

    #[test]
    fn test_turn_cycle_with_two_minimizers() {
        let game = TreeGame::new(3, 2, HashMap::new());
        let recorder = Recorder::default();

        search(1, Pruning::None).search_with_instruments(&game, &recorder);

        let expansions = recorder.expansions.into_inner();
        assert_eq!(&expansions[..3], &[(0, 0), (1, 1), (2, 1)]);
        assert_eq!(expansions.len(), 1 + 2 + 4);
        assert!(expansions.iter().all(|(agent, _)| *agent < 3));

        let leaves = recorder.leaves.into_inner();
        assert_eq!(leaves.len(), 8);
        assert!(leaves.iter().all(|ply| *ply == 2));
    }

    #[test]
    fn test_route_follows_agent_order() {
        let game = TreeGame::shuffled(3, 2, 6, 7);
        let result = search(2, Pruning::None).search(&game);

        let agents = result.chosen_route().iter().map(|(a, _)| *a).collect_vec();
        assert_eq!(agents, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_single_agent_gets_one_move_per_round() {
        let game = TreeGame::shuffled(1, 3, 2, 11);
        let result = search(2, Pruning::None).search(&game);

        assert_eq!(result.chosen_route().len(), 2);
        assert_eq!(*result.score(), 8);
    }

    #[test]
    fn test_maximizer_and_minimizer_choices() {
        // max over [min(3, 5), min(2, 9)]
        let values = HashMap::from([
            (vec![0, 0], 3),
            (vec![0, 1], 5),
            (vec![1, 0], 2),
            (vec![1, 1], 9),
        ]);
        let game = TreeGame::new(2, 2, values);
        let result = search(1, Pruning::None).search(&game);

        assert_eq!(*result.score(), 3);
        assert_eq!(result.best_action(), Some(0));
        assert_eq!(result.chosen_route(), vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_alpha_beta_prunes_dominated_subtree() {
        let values = HashMap::from([
            (vec![0, 0], 3),
            (vec![0, 1], 5),
            (vec![1, 0], 2),
            (vec![1, 1], 9),
        ]);
        let game = TreeGame::new(2, 2, values);

        let full_counter = LeafCounter::default();
        let full = search(1, Pruning::None).search_with_instruments(&game, &full_counter);
        let pruned_counter = LeafCounter::default();
        let pruned = search(1, Pruning::AlphaBeta).search_with_instruments(&game, &pruned_counter);

        assert_eq!(full_counter.leaf_count(), 4);
        assert_eq!(pruned_counter.leaf_count(), 3);
        assert_eq!(pruned.leaf_count(), 3);
        assert_eq!(full.score(), pruned.score());
        assert_eq!(full.best_action(), pruned.best_action());

        let pruned_options = pruned.first_options_for_agent(0).unwrap();
        let (_, second_min_node) = pruned_options
            .iter()
            .find(|(action, _)| *action == 1)
            .unwrap();
        assert!(matches!(
            second_min_node,
            MinMaxReturn::Node {
                alpha_beta_cutoff: true,
                ..
            }
        ));
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        for (agents, branching, depth) in [(2, 3, 1), (2, 3, 2), (3, 2, 2), (3, 3, 1), (4, 2, 1)] {
            let plies = agents * depth;
            for seed in 0..5 {
                let game = TreeGame::shuffled(agents, branching, plies, seed);

                let full_counter = LeafCounter::default();
                let full =
                    search(depth, Pruning::None).search_with_instruments(&game, &full_counter);
                let pruned_counter = LeafCounter::default();
                let pruned = search(depth, Pruning::AlphaBeta)
                    .search_with_instruments(&game, &pruned_counter);

                assert_eq!(full.score(), pruned.score());
                assert_eq!(full.best_action(), pruned.best_action());
                assert!(pruned_counter.leaf_count() <= full_counter.leaf_count());
                assert_eq!(
                    full_counter.leaf_count(),
                    (branching as usize).pow(plies as u32)
                );
            }
        }
    }

    #[test]
    fn test_full_minimax_and_alpha_beta_helpers_ignore_configured_pruning() {
        let values = HashMap::from([
            (vec![0, 0], 3),
            (vec![0, 1], 5),
            (vec![1, 0], 2),
            (vec![1, 1], 9),
        ]);
        let game = TreeGame::new(2, 2, values);
        let configured = search(1, Pruning::AlphaBeta);

        let full = configured.full_minimax(&game);
        let pruned = configured.alpha_beta(&game);

        assert_eq!(full.leaf_count(), 4);
        assert_eq!(pruned.leaf_count(), 3);
        assert_eq!(configured.search(&game).leaf_count(), 3);
        assert_eq!(full.score(), pruned.score());
    }

    #[test]
    fn test_ties_keep_the_first_action() {
        let game = TreeGame::new(2, 3, HashMap::new());

        for pruning in [Pruning::None, Pruning::AlphaBeta] {
            let result = search(1, pruning).search(&game);

            assert_eq!(*result.score(), 0);
            assert_eq!(result.best_action(), Some(0));
            assert_eq!(result.chosen_route(), vec![(0, 0), (1, 0)]);
        }
    }

    #[test]
    fn test_ties_between_later_actions() {
        let values = (0..3u8)
            .map(|child| (vec![0, child], 1))
            .chain((0..3u8).map(|child| (vec![1, child], 4)))
            .chain((0..3u8).map(|child| (vec![2, child], 4)))
            .collect();
        let game = TreeGame::new(2, 3, values);

        for pruning in [Pruning::None, Pruning::AlphaBeta] {
            let result = search(1, pruning).search(&game);

            assert_eq!(*result.score(), 4);
            assert_eq!(result.best_action(), Some(1));
        }
    }

    #[test]
    fn test_terminal_states_are_not_expanded() {
        let mut game = TreeGame::new(2, 2, HashMap::from([(vec![1], 100)]));
        game.wins = Arc::new(HashSet::from([vec![1]]));

        let recorder = Recorder::default();
        let result = search(2, Pruning::None).search_with_instruments(&game, &recorder);

        assert_eq!(*result.score(), 100);
        assert_eq!(result.best_action(), Some(1));
        assert_eq!(result.chosen_route(), vec![(0, 1)]);
        assert!(recorder.leaves.borrow().contains(&1));
    }

    #[test]
    fn test_no_legal_actions_is_scored_as_a_leaf() {
        let mut game = TreeGame::new(2, 2, HashMap::from([(vec![], 7), (vec![1], -3)]));
        game.dead_ends = Arc::new(HashSet::from([vec![], vec![1]]));

        let result = search(2, Pruning::AlphaBeta).search(&game);
        assert!(matches!(result, MinMaxReturn::Leaf { score: 7 }));
        assert_eq!(result.best_action(), None);

        game.dead_ends = Arc::new(HashSet::from([vec![1]]));
        let values = HashMap::from([(vec![0, 0], -5), (vec![0, 1], -4), (vec![1], -3)]);
        game.values = Arc::new(values);

        let result = search(1, Pruning::None).search(&game);
        assert_eq!(*result.score(), -3);
        assert_eq!(result.best_action(), Some(1));
    }

    #[test]
    fn test_text_tree_mentions_every_explored_action() {
        let values = HashMap::from([
            (vec![0, 0], 3),
            (vec![0, 1], 5),
            (vec![1, 0], 2),
            (vec![1, 1], 9),
        ]);
        let game = TreeGame::new(2, 2, values);
        let tree = search(1, Pruning::AlphaBeta).search(&game).to_text_tree();

        assert!(tree.contains("root 3"));
        assert!(tree.contains("(pruned)"));
        assert_eq!(tree.matches("agent 1").count(), 3);
    }
}
