//! Decision engines: depth-limited minimax with alpha-beta pruning and a
//! Monte Carlo rollout move selector, both behind the [`Agent`] trait.

mod agent;
pub mod minimax;
pub mod rollout;

pub use agent::Agent;
pub use minimax::{
    adversarial_search, search, MinimaxAgent, MinimaxConfig, SearchResult, SearchStats, WIN_SCORE,
};
pub use rollout::{MoveScore, RolloutAgent, RolloutConfig};
