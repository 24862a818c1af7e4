//! Outer swap loop: randomized iteration count and pacing

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

use crate::domain::execution::{IterationOutcome, SubmissionController};
use crate::exchanges::{create_venue, SwapVenue};
use crate::infrastructure::blockchain::ChainClient;
use crate::report::RunReport;
use crate::shared::types::{Direction, SwapProfile};

pub struct SwapBot<'a> {
    profile: &'a SwapProfile,
    client: &'a dyn ChainClient,
    venue: Box<dyn SwapVenue>,
}

impl<'a> SwapBot<'a> {
    pub fn new(profile: &'a SwapProfile, client: &'a dyn ChainClient) -> Self {
        Self {
            profile,
            client,
            venue: create_venue(&profile.venue),
        }
    }

    /// Run every iteration of one session. Iteration failures are recorded, never returned.
    pub async fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> RunReport {
        let iterations = self.profile.iterations.sample(rng);
        let mut report = RunReport::new(
            &self.profile.name,
            self.venue.label().as_str(),
            self.client.address().to_string(),
            iterations,
        );
        info!(
            "Starting {} session {} for {}: {} iterations",
            self.venue.label().as_str(),
            report.run_id,
            self.client.address(),
            iterations
        );

        let controller = SubmissionController::new(self.profile, self.client, self.venue.as_ref());
        let mut previous: Option<Direction> = None;
        for iteration in 1..=iterations {
            info!("Iteration {}/{}", iteration, iterations);
            let result = controller.run_iteration(previous, rng).await;
            if let IterationOutcome::Confirmed { route, .. } = &result.outcome {
                previous = Some(route.direction);
            }
            report.record(iteration, &result);

            if iteration < iterations {
                let delay_ms = self.profile.delay_ms.sample(rng);
                info!("Waiting {:.1}s before next iteration", delay_ms as f64 / 1000.0);
                sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        report.finish();
        report.log_summary();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{test_profile, USDC, USDT};
    use crate::infrastructure::blockchain::mock_client::ScriptedChainClient;
    use alloy::primitives::U256;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ONE_MON: u64 = 1_000_000_000_000_000_000;

    #[tokio::test]
    async fn test_confirmed_iterations_alternate_direction() {
        let mut profile = test_profile();
        profile.iterations = crate::shared::types::SampleRange::fixed(6);
        let client = ScriptedChainClient::new(U256::from(ONE_MON))
            .with_token(USDT, U256::from(5_000_000u64))
            .with_token(USDC, U256::from(8_000_000u64));
        let bot = SwapBot::new(&profile, &client);
        let mut rng = StdRng::seed_from_u64(31);

        let report = bot.run(&mut rng).await;

        assert_eq!(report.iterations.len(), 6);
        assert_eq!(report.count("confirmed"), 6);
        for pair in report.iterations.windows(2) {
            assert_ne!(pair[0].direction, pair[1].direction);
        }
    }

    #[tokio::test]
    async fn test_failures_never_cut_the_run_short() {
        let profile = test_profile();
        let client = ScriptedChainClient::new(U256::from(ONE_MON)).failing_submit("userCmd");
        let bot = SwapBot::new(&profile, &client);
        let mut rng = StdRng::seed_from_u64(32);

        let report = bot.run(&mut rng).await;

        assert_eq!(report.planned_iterations, 3);
        assert_eq!(report.iterations.len(), 3);
        assert_eq!(report.count("failed"), 3);
        assert!(report.iterations.iter().all(|r| r.attempts == 3));
        assert!(report.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_wallet_runs_without_routes() {
        let profile = test_profile();
        let client = ScriptedChainClient::new(U256::ZERO);
        let bot = SwapBot::new(&profile, &client);
        let mut rng = StdRng::seed_from_u64(33);

        let report = bot.run(&mut rng).await;

        assert_eq!(report.count("no_route"), 3);
        assert!(client.submissions().is_empty());
    }
}
