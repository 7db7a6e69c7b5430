//! # Connect Four Arena
//!
//! Pits two Connect Four engines against each other: a depth-limited minimax
//! search with alpha-beta pruning and a Monte Carlo rollout move selector.
//! Reports wins, draws and per-move think time over a series of games.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, move legality and win detection
//! - [`ai`] — Agent trait, minimax search, rollout selector
//! - [`arena`] — Game loop, match metrics and summaries
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
