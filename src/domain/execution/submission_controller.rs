//! One iteration of the swap loop with bounded retry

use alloy::primitives::U256;
use rand::Rng;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::{
    AttemptOutcome, IterationOutcome, IterationReport, SwapStage, TransactionAttempt,
    TransactionExecutor,
};
use crate::domain::route::{BalanceSnapshot, Route, RouteSelector};
use crate::domain::sizing::TradeSizer;
use crate::exchanges::types::{Confirmation, ContractCall};
use crate::exchanges::SwapVenue;
use crate::infrastructure::blockchain::ChainClient;
use crate::shared::errors::{ChainError, SwapError};
use crate::shared::types::{Direction, SwapProfile};
use crate::shared::utils::{format_amount, format_ppm};

/// Native balance plus every configured token balance, in profile order
pub async fn read_balances(
    client: &dyn ChainClient,
    profile: &SwapProfile,
) -> Result<BalanceSnapshot, ChainError> {
    let native = client.native_balance().await?;
    let mut tokens = Vec::with_capacity(profile.tokens.len());
    for token in &profile.tokens {
        let balance = client.token_balance(token.address).await?;
        tokens.push((token.symbol.clone(), balance));
    }
    Ok(BalanceSnapshot { native, tokens })
}

/// Drives a route through approval and swap, retrying under the profile's policy
pub struct SubmissionController<'a> {
    profile: &'a SwapProfile,
    client: &'a dyn ChainClient,
    venue: &'a dyn SwapVenue,
    selector: RouteSelector<'a>,
    sizer: TradeSizer<'a>,
    executor: TransactionExecutor<'a>,
}

impl<'a> SubmissionController<'a> {
    pub fn new(
        profile: &'a SwapProfile,
        client: &'a dyn ChainClient,
        venue: &'a dyn SwapVenue,
    ) -> Self {
        Self {
            profile,
            client,
            venue,
            selector: RouteSelector::new(profile),
            sizer: TradeSizer::new(profile),
            executor: TransactionExecutor::new(client, &profile.explorer_tx_url),
        }
    }

    /// Run one iteration to a terminal outcome. Attempt errors never escape.
    ///
    /// The first attempt selects a route; later attempts keep its direction and
    /// token but re-read balances, re-size the amount and use a fresh nonce.
    pub async fn run_iteration<R: Rng + ?Sized>(
        &self,
        previous: Option<Direction>,
        rng: &mut R,
    ) -> IterationReport {
        let max_attempts = self.profile.retry.max_attempts.max(1);
        let mut attempts = Vec::new();
        let mut pinned: Option<Route> = None;

        for attempt_number in 1..=max_attempts {
            if attempt_number > 1 {
                info!(
                    "Retrying in {} ms (attempt {}/{})",
                    self.profile.retry.delay.as_millis(),
                    attempt_number,
                    max_attempts
                );
                sleep(self.profile.retry.delay).await;
            }
            let mut attempt = TransactionAttempt::new(attempt_number);
            attempt.route = pinned.clone();

            let balances = match read_balances(self.client, self.profile).await {
                Ok(balances) => balances,
                Err(e) => {
                    warn!("Attempt {}/{}: balance read failed: {}", attempt_number, max_attempts, e);
                    attempt.stage = SwapStage::Failed;
                    attempt.fail(e.into());
                    attempts.push(attempt);
                    continue;
                }
            };
            self.log_balances(&balances);

            let route = match &pinned {
                None => self.selector.select(&balances, previous, rng),
                Some(route) => self.selector.refresh(route, &balances),
            };
            let Some(route) = route else {
                info!("No feasible route, nothing to trade this iteration");
                return IterationReport {
                    outcome: IterationOutcome::NoRoute,
                    attempts,
                };
            };
            pinned = Some(route.clone());
            attempt.route = Some(route.clone());
            attempt.stage = SwapStage::RouteSelected;

            let trade = self.sizer.size(&route, rng);
            attempt.trade = Some(trade);
            if trade.is_zero() {
                warn!(
                    "{} of {} rounds to zero, skipping",
                    format_ppm(trade.ppm),
                    route.label(&self.profile.native.symbol)
                );
                return IterationReport {
                    outcome: IterationOutcome::Skipped { route },
                    attempts,
                };
            }
            info!(
                "Route {} via {}: trading {} of balance ({} {})",
                route.label(&self.profile.native.symbol),
                self.venue.label().as_str(),
                format_ppm(trade.ppm),
                format_amount(trade.amount, self.input_decimals(&route)),
                self.input_symbol(&route),
            );

            match self.execute(&route, trade.amount, &mut attempt).await {
                Ok(confirmation) => {
                    attempt.stage = SwapStage::Confirmed;
                    attempt.outcome = AttemptOutcome::Confirmed;
                    attempts.push(attempt);
                    return IterationReport {
                        outcome: IterationOutcome::Confirmed {
                            route,
                            amount: trade.amount,
                            confirmation,
                        },
                        attempts,
                    };
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed during {:?}: {}",
                        attempt_number, max_attempts, attempt.stage, e
                    );
                    attempt.fail(e);
                    attempts.push(attempt);
                }
            }
        }

        error!("Giving up after {} attempts", max_attempts);
        IterationReport {
            outcome: IterationOutcome::Failed { route: pinned },
            attempts,
        }
    }

    /// Quote/build the swap, approve it when selling a token, then send it.
    async fn execute(
        &self,
        route: &Route,
        amount: U256,
        attempt: &mut TransactionAttempt,
    ) -> Result<Confirmation, SwapError> {
        let token = self
            .profile
            .token(&route.token)
            .ok_or_else(|| SwapError::UnknownToken(route.token.clone()))?;

        self.ensure_funds(route, amount).await?;
        let swap = self.venue.swap_call(self.client, route, token, amount).await?;

        if route.direction == Direction::TokenToNative {
            attempt.stage = SwapStage::ApprovalPending;
            debug!("Approving {} {} for {}", amount, token.symbol, self.venue.spender());
            let approval = ContractCall::approve(token.address, self.venue.spender(), amount);
            self.executor
                .send(&approval)
                .await
                .map_err(SwapError::Approval)?;
        }

        attempt.stage = SwapStage::SwapPending;
        Ok(self.executor.send(&swap).await?)
    }

    /// Re-read the input balance right before sending
    async fn ensure_funds(&self, route: &Route, amount: U256) -> Result<(), SwapError> {
        let available = match route.direction {
            Direction::NativeToToken => self.client.native_balance().await?,
            Direction::TokenToNative => {
                let token = self
                    .profile
                    .token(&route.token)
                    .ok_or_else(|| SwapError::UnknownToken(route.token.clone()))?;
                self.client.token_balance(token.address).await?
            }
        };
        if available < amount {
            let decimals = self.input_decimals(route);
            return Err(SwapError::InsufficientBalance {
                symbol: self.input_symbol(route).to_string(),
                needed: format_amount(amount, decimals),
                available: format_amount(available, decimals),
            });
        }
        Ok(())
    }

    fn input_symbol<'r>(&'r self, route: &'r Route) -> &'r str {
        match route.direction {
            Direction::NativeToToken => &self.profile.native.symbol,
            Direction::TokenToNative => &route.token,
        }
    }

    fn input_decimals(&self, route: &Route) -> u8 {
        match route.direction {
            Direction::NativeToToken => self.profile.native.decimals,
            Direction::TokenToNative => self
                .profile
                .token(&route.token)
                .map(|t| t.decimals)
                .unwrap_or(self.profile.native.decimals),
        }
    }

    fn log_balances(&self, balances: &BalanceSnapshot) {
        info!(
            "Balance: {} {}",
            format_amount(balances.native, self.profile.native.decimals),
            self.profile.native.symbol
        );
        for token in &self.profile.tokens {
            info!(
                "Balance: {} {}",
                format_amount(balances.token(&token.symbol), token.decimals),
                token.symbol
            );
        }
    }
}
