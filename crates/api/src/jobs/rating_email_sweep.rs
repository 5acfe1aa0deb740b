//! Daily sweep over orders whose rating invitation is due.
//!
//! Orders are processed one at a time; a failing send is logged and the
//! order stays unmarked so the next run picks it up again. Tokens never
//! appear in logs, only order ids do.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{error, info};

use persistence::repositories::OrderRepository;
use shared::token::RatingToken;

use super::scheduler::{Job, JobFrequency};
use crate::middleware::metrics::record_rating_emails_sent;
use crate::services::{FeatureGate, RatingEmailSender};

/// Outcome counters of one sweep run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Background job that sends due rating invitations.
pub struct RatingEmailSweepJob {
    orders: OrderRepository,
    gate: FeatureGate,
    sender: Arc<dyn RatingEmailSender>,
}

impl RatingEmailSweepJob {
    pub fn new(pool: PgPool, sender: Arc<dyn RatingEmailSender>) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            gate: FeatureGate::new(pool),
            sender,
        }
    }

    /// Run one sweep for the given date.
    ///
    /// Exposed separately from the scheduler so operators and tests can
    /// trigger a run for a specific day.
    pub async fn run_sweep(&self, today: NaiveDate) -> Result<SweepStats, String> {
        let flags = self.gate.flags().await;
        if !flags.rating_system_enabled || !flags.rating_auto_email_enabled {
            info!(
                rating_system_enabled = flags.rating_system_enabled,
                rating_auto_email_enabled = flags.rating_auto_email_enabled,
                "Rating email sweep disabled by feature flags"
            );
            return Ok(SweepStats::default());
        }

        let due = self
            .orders
            .find_due_rating_emails(today)
            .await
            .map_err(|e| format!("Failed to query due rating emails: {}", e))?;

        let mut stats = SweepStats {
            due: due.len(),
            ..SweepStats::default()
        };

        for order in due {
            // Orders created while the rating system was off have no token
            let token = match order.rating_token {
                Some(token) => RatingToken::from(token),
                None => {
                    stats.skipped += 1;
                    continue;
                }
            };

            match self
                .sender
                .send_rating_email(&order.user_email, &order.user_name, &token.expose())
                .await
            {
                Ok(()) => {
                    if let Err(e) = self.orders.mark_rating_email_sent(order.id).await {
                        // The email went out but the flag did not stick; the
                        // customer may receive a duplicate tomorrow.
                        error!(order_id = %order.id, error = %e, "Failed to mark rating email sent");
                        stats.failed += 1;
                    } else {
                        stats.sent += 1;
                    }
                }
                Err(e) => {
                    error!(order_id = %order.id, error = %e, "Failed to send rating email");
                    stats.failed += 1;
                }
            }
        }

        record_rating_emails_sent(stats.sent);
        info!(
            due = stats.due,
            sent = stats.sent,
            failed = stats.failed,
            skipped = stats.skipped,
            "Rating email sweep finished"
        );

        Ok(stats)
    }
}

#[async_trait::async_trait]
impl Job for RatingEmailSweepJob {
    fn name(&self) -> &'static str {
        "rating_email_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let today = Utc::now().date_naive();
        self.run_sweep(today).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_stats_default() {
        let stats = SweepStats::default();
        assert_eq!(stats.due, 0);
        assert_eq!(stats.sent, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_job_frequency_is_daily() {
        let freq = JobFrequency::Daily;
        assert_eq!(freq.duration(), std::time::Duration::from_secs(86400));
    }
}
