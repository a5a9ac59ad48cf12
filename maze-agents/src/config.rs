use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluation::EvaluationKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown evaluation function {0:?}, expected `baseline` or `composite`")]
    UnknownEvaluation(String),

    #[error("depth {0:?} is not an integer")]
    InvalidDepth(String),

    #[error("depth must be at least 1, got {0}")]
    NonPositiveDepth(i64),

    #[error("unknown option {0:?}")]
    UnknownOption(String),

    #[error("expected `key=value`, got {0:?}")]
    MalformedOption(String),
}

/// How an agent is set up. Resolved once when the agent is built and never changed afterwards
///
/// Parses from a comma separated argument string, missing keys keep their defaults:
/// ```
/// use maze_agents::{config::AgentConfig, evaluation::EvaluationKind};
///
/// let config: AgentConfig = "evaluation=composite,depth=3".parse().unwrap();
///
/// assert_eq!(config.evaluation, EvaluationKind::Composite);
/// assert_eq!(config.depth, 3);
/// assert_eq!("".parse::<AgentConfig>().unwrap(), AgentConfig::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAgentConfig")]
pub struct AgentConfig {
    pub evaluation: EvaluationKind,
    /// Full rounds to search, one round is a move from every agent
    pub depth: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            evaluation: EvaluationKind::Baseline,
            depth: 2,
        }
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAgentConfig {
    evaluation: EvaluationKind,
    depth: i64,
}

impl Default for RawAgentConfig {
    fn default() -> Self {
        let defaults = AgentConfig::default();

        Self {
            evaluation: defaults.evaluation,
            depth: defaults.depth as i64,
        }
    }
}

impl TryFrom<RawAgentConfig> for AgentConfig {
    type Error = ConfigError;

    fn try_from(raw: RawAgentConfig) -> Result<Self, Self::Error> {
        if raw.depth <= 0 {
            return Err(ConfigError::NonPositiveDepth(raw.depth));
        }

        Ok(Self {
            evaluation: raw.evaluation,
            depth: raw.depth as usize,
        })
    }
}

impl FromStr for AgentConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut raw = RawAgentConfig::default();

        for option in s.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            let (key, value) = option
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedOption(option.to_owned()))?;
            let value = value.trim();

            match key.trim() {
                "evaluation" => raw.evaluation = value.parse()?,
                "depth" => {
                    raw.depth = value
                        .parse()
                        .map_err(|_| ConfigError::InvalidDepth(value.to_owned()))?
                }
                other => return Err(ConfigError::UnknownOption(other.to_owned())),
            }
        }

        raw.try_into()
    }
}
