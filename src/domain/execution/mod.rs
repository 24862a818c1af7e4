//! Execution domain - submission, confirmation and bounded retry

mod submission_controller;
mod transaction_executor;

pub use submission_controller::{read_balances, SubmissionController};
pub use transaction_executor::TransactionExecutor;

use alloy::primitives::U256;
use serde::Serialize;

use crate::domain::route::Route;
use crate::domain::sizing::TradeAmount;
use crate::exchanges::types::Confirmation;
use crate::shared::errors::SwapError;

/// Per-iteration state machine:
/// `Idle → RouteSelected → [ApprovalPending →] SwapPending → {Confirmed | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapStage {
    Idle,
    RouteSelected,
    ApprovalPending,
    SwapPending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptOutcome {
    Pending,
    Confirmed,
    Failed,
}

/// One pass through route → amount → (approval) → swap
#[derive(Debug, Clone)]
pub struct TransactionAttempt {
    pub attempt_number: u32,
    /// `None` when the attempt failed before a route could be chosen
    pub route: Option<Route>,
    pub trade: Option<TradeAmount>,
    /// Furthest stage reached
    pub stage: SwapStage,
    pub outcome: AttemptOutcome,
    pub error: Option<SwapError>,
}

impl TransactionAttempt {
    fn new(attempt_number: u32) -> Self {
        Self {
            attempt_number,
            route: None,
            trade: None,
            stage: SwapStage::Idle,
            outcome: AttemptOutcome::Pending,
            error: None,
        }
    }

    fn fail(&mut self, error: SwapError) {
        self.outcome = AttemptOutcome::Failed;
        self.error = Some(error);
    }
}

/// Terminal result of one iteration
#[derive(Debug, Clone)]
pub enum IterationOutcome {
    Confirmed {
        route: Route,
        amount: U256,
        confirmation: Confirmation,
    },
    /// Nothing was feasible; not an error
    NoRoute,
    /// The sized amount rounded down to zero; nothing was sent
    Skipped { route: Route },
    /// Every attempt failed
    Failed { route: Option<Route> },
}

impl IterationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            IterationOutcome::Confirmed { .. } => "confirmed",
            IterationOutcome::NoRoute => "no_route",
            IterationOutcome::Skipped { .. } => "skipped",
            IterationOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, IterationOutcome::Confirmed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct IterationReport {
    pub outcome: IterationOutcome,
    pub attempts: Vec<TransactionAttempt>,
}
