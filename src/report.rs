// src/report.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::execution::{IterationOutcome, IterationReport};
use crate::shared::types::Direction;
use crate::shared::utils::{format_ppm, generate_id};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: u64,
    pub outcome: String,
    pub direction: Option<Direction>,
    pub token: Option<String>,
    /// Base units of the input asset of the last attempt
    pub amount: Option<String>,
    pub percent: Option<String>,
    pub attempts: usize,
    pub tx_hash: Option<String>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub last_error: Option<String>,
}

impl IterationRecord {
    pub fn from_report(iteration: u64, report: &IterationReport) -> Self {
        let last = report.attempts.last();
        let route = match &report.outcome {
            IterationOutcome::Confirmed { route, .. } | IterationOutcome::Skipped { route } => {
                Some(route.clone())
            }
            IterationOutcome::Failed { route } => route.clone(),
            IterationOutcome::NoRoute => None,
        };
        let trade = last.and_then(|a| a.trade);
        let confirmation = match &report.outcome {
            IterationOutcome::Confirmed { confirmation, .. } => Some(confirmation),
            _ => None,
        };
        Self {
            iteration,
            outcome: report.outcome.as_str().to_string(),
            direction: route.as_ref().map(|r| r.direction),
            token: route.map(|r| r.token),
            amount: trade.map(|t| t.amount.to_string()),
            percent: trade.map(|t| format_ppm(t.ppm)),
            attempts: report.attempts.len(),
            tx_hash: confirmation.map(|c| c.tx_hash.to_string()),
            block_number: confirmation.and_then(|c| c.block_number),
            gas_used: confirmation.and_then(|c| c.gas_used),
            last_error: last.and_then(|a| a.error.as_ref()).map(|e| e.to_string()),
        }
    }
}

/// Summary of one swap run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub profile: String,
    pub venue: String,
    pub wallet: String,
    pub planned_iterations: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub iterations: Vec<IterationRecord>,
}

impl RunReport {
    pub fn new(profile: &str, venue: &str, wallet: String, planned_iterations: u64) -> Self {
        Self {
            run_id: generate_id(),
            profile: profile.to_string(),
            venue: venue.to_string(),
            wallet,
            planned_iterations,
            started_at: Utc::now(),
            finished_at: None,
            iterations: Vec::new(),
        }
    }

    pub fn record(&mut self, iteration: u64, report: &IterationReport) {
        self.iterations
            .push(IterationRecord::from_report(iteration, report));
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn count(&self, outcome: &str) -> usize {
        self.iterations.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn log_summary(&self) {
        info!(
            "Run {} ({} via {}) finished: {}/{} iterations confirmed, {} failed, {} skipped, {} without route",
            self.run_id,
            self.profile,
            self.venue,
            self.count("confirmed"),
            self.iterations.len(),
            self.count("failed"),
            self.count("skipped"),
            self.count("no_route"),
        );
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("Report written to {}", path.as_ref().display());
        Ok(())
    }
}
