use std::fmt::Debug;

use maze_types::{types::SimulableGame, AgentIndex};
use text_trees::StringTreeNode;

#[derive(Debug, Clone)]
/// This is returned from a run of the minimax algorithm
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<GameType, ScoreType>
where
    GameType: SimulableGame + Clone + Debug,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// A 'recursive' look at all the actions under us that were explored
        /// This array is sorted by the score of the action, best first for the agent moving at
        /// this node. Ties keep the order the actions were generated in.
        /// The first element is always the chosen action. It's [MinMaxReturn::score()]
        /// should always equal the score attribute of this node
        options: Vec<(GameType::Action, Self)>,
        /// Which agent was moving at this node
        moving_agent: AgentIndex,
        /// The ply this node sits at
        ply: usize,
        /// The chosen score
        /// This should always match the score of the first element in `options`
        score: ScoreType,
        /// Whether Alpha-Beta stopped expanding this node's remaining actions
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/loss), when we reach the maximum depth,
    /// or when the moving agent has no legal actions
    Leaf {
        #[allow(missing_docs)]
        score: ScoreType,
    },
}

impl<GameType, ScoreType> MinMaxReturn<GameType, ScoreType>
where
    GameType: SimulableGame + Debug + Clone,
    ScoreType: Clone + Debug + PartialOrd + Ord + Copy,
{
    /// Returns the score for this node
    pub fn score(&self) -> &ScoreType {
        match self {
            MinMaxReturn::Node { score, .. } => score,
            MinMaxReturn::Leaf { score } => score,
        }
    }

    /// Returns the action chosen at this node
    /// If we are a leaf node, this will return None
    pub fn best_action(&self) -> Option<GameType::Action> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node { options, .. } => options.first().map(|(action, _)| *action),
        }
    }

    /// Return the first set of options along the chosen route where the given agent is moving
    pub fn first_options_for_agent(
        &self,
        agent: AgentIndex,
    ) -> Option<&Vec<(GameType::Action, Self)>> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                moving_agent,
                options,
                ..
            } => {
                if *moving_agent == agent {
                    Some(options)
                } else {
                    let chosen = options.first()?;
                    chosen.1.first_options_for_agent(agent)
                }
            }
        }
    }

    /// Returns all the actions in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows each of the actions we and our opponents made
    /// during the search
    pub fn chosen_route(&self) -> Vec<(AgentIndex, GameType::Action)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_agent,
                options,
                ..
            } => {
                if let Some(chosen) = options.first() {
                    let mut tail = chosen.1.chosen_route();
                    tail.insert(0, (*moving_agent, chosen.0));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// Counts the leaves that were scored to produce this result
    pub fn leaf_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => options.iter().map(|(_, r)| r.leaf_count()).sum(),
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the chosen score, the moving agent and the chosen action at each level
    pub fn to_text_tree(&self) -> String {
        let tree_node = self.to_text_tree_node("root".to_owned());
        format!("{}", tree_node)
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score } => StringTreeNode::new(format!("{} {:?}", label, score)),
            MinMaxReturn::Node {
                moving_agent,
                options,
                score,
                alpha_beta_cutoff,
                ..
            } => {
                let cutoff = if *alpha_beta_cutoff { " (pruned)" } else { "" };
                let mut node = StringTreeNode::new(format!("{} {:?}{}", label, score, cutoff));
                for (action, result) in options {
                    node.push_node(
                        result.to_text_tree_node(format!("agent {} {:?}", moving_agent, action)),
                    );
                }

                node
            }
        }
    }
}
