//! Application layer - use cases and services

pub mod commands;
pub mod sequence;
pub mod staking;
pub mod swap_bot;

pub use commands::{Cli, Commands};
pub use sequence::{SequenceRunner, Stage};
pub use staking::StakingRunner;
pub use swap_bot::SwapBot;
