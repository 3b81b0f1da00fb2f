use std::sync::Arc;
use std::time::Instant;

use actix::prelude::*;
use chrono::{DateTime, Utc};

use crate::actors::core::{GracefulStop, HealthStatus};
use crate::api::RecentSource;
use crate::display::{ApplyOutcome, DisplayState};
use crate::metrics::Metrics;

use super::{HealthMonitorActor, UpdateHealth};

// ============================================================================
// Poller Actor - one recurring fetch-and-display loop per endpoint
// ============================================================================
//
// Lifecycle:
// 1. On start, runs one fetch cycle immediately, then arms a recurring
//    interval on its own context repeating the cycle at the configured
//    period. The interval and every in-flight cycle future are owned by the
//    actor, so stopping the actor releases them on every exit path.
// 2. Each cycle is tagged with a sequence number allocated at request-issue
//    time. The display store discards responses that arrive after a later
//    cycle has applied, so overlapping cycles cannot clobber newer data.
// 3. A failed cycle leaves the stored list untouched and is swallowed here;
//    it only surfaces as a consecutive-failure count, pushed to the health
//    monitor after every cycle.
//
// ============================================================================

pub struct PollerActor<S: RecentSource> {
    source: Arc<S>,
    state: Arc<DisplayState<S::Record>>,
    health_monitor: Option<Addr<HealthMonitorActor>>,
    metrics: Arc<Metrics>,
    poll_interval: std::time::Duration,
    unhealthy_after: u32,
    next_seq: u64,
    cycles_completed: u64,
    consecutive_failures: u32,
    last_success_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// What one finished cycle reported back to the actor
enum CycleOutcome {
    Applied {
        seq: u64,
        count: usize,
        elapsed: std::time::Duration,
    },
    Stale {
        response_seq: u64,
        last_applied: u64,
        elapsed: std::time::Duration,
    },
    Failed {
        seq: u64,
        error: String,
        elapsed: std::time::Duration,
    },
}

impl<S: RecentSource> PollerActor<S> {
    pub fn new(
        source: Arc<S>,
        state: Arc<DisplayState<S::Record>>,
        health_monitor: Option<Addr<HealthMonitorActor>>,
        metrics: Arc<Metrics>,
        poll_interval: std::time::Duration,
        unhealthy_after: u32,
    ) -> Self {
        Self {
            source,
            state,
            health_monitor,
            metrics,
            poll_interval,
            unhealthy_after,
            next_seq: 0,
            cycles_completed: 0,
            consecutive_failures: 0,
            last_success_at: None,
            last_error: None,
        }
    }

    fn spawn_cycle(&mut self, ctx: &mut Context<Self>) {
        // Sequence numbers are allocated at request-issue time, on the actor
        // context, so they order cycles even when responses overlap.
        self.next_seq += 1;
        let seq = self.next_seq;
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        tracing::debug!(source = source.name(), seq, "Starting fetch cycle");

        let fut = async move {
            let started = Instant::now();
            let result = source.fetch_recent().await;
            let elapsed = started.elapsed();

            match result {
                Ok(records) => {
                    tracing::debug!(
                        source = source.name(),
                        seq,
                        payload = ?records,
                        "Fetched recent records"
                    );

                    match state.apply_snapshot(seq, records) {
                        ApplyOutcome::Applied { count } => CycleOutcome::Applied { seq, count, elapsed },
                        ApplyOutcome::Stale {
                            response_seq,
                            last_applied,
                        } => CycleOutcome::Stale {
                            response_seq,
                            last_applied,
                            elapsed,
                        },
                    }
                }
                Err(error) => CycleOutcome::Failed {
                    seq,
                    error: error.to_string(),
                    elapsed,
                },
            }
        };

        ctx.spawn(
            fut.into_actor(self)
                .map(|outcome, act, _ctx| act.complete_cycle(outcome)),
        );
    }

    fn complete_cycle(&mut self, outcome: CycleOutcome) {
        self.cycles_completed += 1;
        let source = self.source.name();

        match outcome {
            CycleOutcome::Applied { seq, count, elapsed } => {
                self.consecutive_failures = 0;
                self.last_success_at = Some(Utc::now());
                self.last_error = None;
                self.metrics
                    .record_fetch_success(source, elapsed.as_secs_f64(), count);

                tracing::info!(source, seq, count, "✅ Display list refreshed");
            }
            CycleOutcome::Stale {
                response_seq,
                last_applied,
                elapsed,
            } => {
                // The fetch itself succeeded; only the apply was skipped.
                self.consecutive_failures = 0;
                self.last_success_at = Some(Utc::now());
                self.last_error = None;
                self.metrics
                    .record_stale_response(source, elapsed.as_secs_f64());

                tracing::warn!(
                    source,
                    response_seq,
                    last_applied,
                    "⏭️  Discarded stale response"
                );
            }
            CycleOutcome::Failed { seq, error, elapsed } => {
                self.consecutive_failures += 1;
                self.last_error = Some(error.clone());
                self.metrics
                    .record_fetch_failure(source, elapsed.as_secs_f64());

                tracing::error!(
                    source,
                    seq,
                    error = %error,
                    consecutive_failures = self.consecutive_failures,
                    "❌ Fetch cycle failed; keeping previous list"
                );
            }
        }

        self.report_health();
    }

    fn health_status(&self) -> HealthStatus {
        if self.consecutive_failures == 0 {
            HealthStatus::Healthy
        } else if self.consecutive_failures < self.unhealthy_after {
            HealthStatus::Degraded(format!(
                "{} consecutive fetch failures",
                self.consecutive_failures
            ))
        } else {
            HealthStatus::Unhealthy(format!(
                "{} consecutive fetch failures",
                self.consecutive_failures
            ))
        }
    }

    fn report_health(&self) {
        self.metrics
            .set_consecutive_failures(self.source.name(), i64::from(self.consecutive_failures));

        if let Some(ref monitor) = self.health_monitor {
            monitor.do_send(UpdateHealth {
                component: self.source.name().to_string(),
                status: self.health_status(),
                details: self.last_error.clone(),
            });
        }
    }
}

impl<S: RecentSource> Actor for PollerActor<S> {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!(
            source = self.source.name(),
            interval_ms = self.poll_interval.as_millis() as u64,
            "🔄 Poller started"
        );

        // One immediate cycle, then the recurring trigger. The interval is
        // owned by this context and dies with the actor.
        self.spawn_cycle(ctx);
        ctx.run_interval(self.poll_interval, |act, ctx| {
            act.spawn_cycle(ctx);
        });
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        tracing::info!(
            source = self.source.name(),
            "🛑 Poller stopped - recurring trigger released"
        );
    }
}

impl<S: RecentSource> Handler<GracefulStop> for PollerActor<S> {
    type Result = ();

    fn handle(&mut self, _: GracefulStop, ctx: &mut Self::Context) {
        tracing::info!(source = self.source.name(), "Poller received stop signal");
        ctx.stop();
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "PollerStatus")]
pub struct GetPollerStatus;

#[derive(Debug, Clone)]
pub struct PollerStatus {
    pub source: &'static str,
    pub cycles_issued: u64,
    pub cycles_completed: u64,
    pub consecutive_failures: u32,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub status: HealthStatus,
}

impl<S: RecentSource> Handler<GetPollerStatus> for PollerActor<S> {
    type Result = MessageResult<GetPollerStatus>;

    fn handle(&mut self, _: GetPollerStatus, _: &mut Self::Context) -> Self::Result {
        MessageResult(PollerStatus {
            source: self.source.name(),
            cycles_issued: self.next_seq,
            cycles_completed: self.cycles_completed,
            consecutive_failures: self.consecutive_failures,
            last_success_at: self.last_success_at,
            last_error: self.last_error.clone(),
            status: self.health_status(),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
