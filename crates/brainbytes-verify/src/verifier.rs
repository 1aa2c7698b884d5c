use futures_util::future::join_all;

use crate::plan::{Target, VerifyPlan};
use crate::probe::{Probe, ProbeOutcome};

#[derive(Debug, Clone)]
pub struct TargetResult {
    pub target: Target,
    pub outcome: ProbeOutcome,
}

/// Everything probed in one attempt.
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// 1-based.
    pub attempt: u32,
    pub results: Vec<TargetResult>,
}

impl RoundReport {
    pub fn all_healthy(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_healthy())
    }

    pub fn failing(&self) -> impl Iterator<Item = &TargetResult> {
        self.results.iter().filter(|r| !r.outcome.is_healthy())
    }
}

#[derive(Debug, Clone)]
pub enum Verdict {
    Healthy { attempts: u32 },
    Exhausted { last: RoundReport },
}

impl Verdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Verdict::Healthy { .. })
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> u8 {
        if self.is_healthy() {
            0
        } else {
            1
        }
    }
}

async fn run_round<P: Probe + ?Sized>(probe: &P, targets: &[Target], attempt: u32) -> RoundReport {
    let outcomes = join_all(targets.iter().map(|t| probe.probe(t))).await;
    RoundReport {
        attempt,
        results: targets
            .iter()
            .cloned()
            .zip(outcomes)
            .map(|(target, outcome)| TargetResult { target, outcome })
            .collect(),
    }
}

/// Poll until every target is healthy or `max_attempts` rounds have run.
pub async fn verify<P: Probe + ?Sized>(probe: &P, plan: &VerifyPlan) -> Verdict {
    let max = plan.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let report = run_round(probe, &plan.targets, attempt).await;
        for r in &report.results {
            if r.outcome.is_healthy() {
                tracing::info!(
                    attempt,
                    service = %r.target.name,
                    url = %r.target.url,
                    status = ?r.outcome.status,
                    "up"
                );
            } else {
                tracing::warn!(
                    attempt,
                    service = %r.target.name,
                    url = %r.target.url,
                    status = ?r.outcome.status,
                    error = r.outcome.error.as_deref().unwrap_or(""),
                    "not ready"
                );
            }
        }

        if report.all_healthy() {
            return Verdict::Healthy { attempts: attempt };
        }
        if attempt >= max {
            return Verdict::Exhausted { last: report };
        }

        attempt += 1;
        tokio::time::sleep(plan.delay).await;
    }
}
