//! Match orchestration: alternates two engines on a live board, records
//! outcomes and per-move think time, and summarizes a series of games.

pub mod game_loop;
pub mod metrics;
pub mod runner;

pub use game_loop::{play_game, GameRecord, SideTiming};
pub use metrics::{EngineTally, MatchMetrics, Seat};
pub use runner::{Arena, ArenaConfig, EngineSummary, MatchSummary, Verdict};
