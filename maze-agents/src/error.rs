use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("the maximizer has no legal action in this state")]
    NoLegalActions,
}
