//! Core engine for a distributed Othello move generator.
//!
//! The crate is split into a game-state engine (board, move generation,
//! evaluation, alpha-beta search) and a distribution coordinator that farms
//! root moves out to a pool of worker threads and aggregates their scores.

pub mod board;
pub mod constants;
pub mod coordinator;
pub mod disc;
pub mod error;
pub mod eval;
pub mod message;
pub mod moves;
pub mod search;
pub mod square;
pub mod types;

mod worker;
