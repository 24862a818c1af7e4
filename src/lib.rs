//! Monad testnet swap and staking automation
//! Built with Domain-Driven Design principles

pub mod app;
pub mod config;
pub mod math;
pub mod report;
pub mod exchanges;
pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::{SequenceRunner, StakingRunner, SwapBot};
pub use domain::execution::SubmissionController;
pub use domain::payload::UserCmdPayload;
pub use domain::route::RouteSelector;
pub use domain::sizing::TradeSizer;
