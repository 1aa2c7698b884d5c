//! Deployment verification CLI. No flags; exits 0 when every service is up,
//! 1 otherwise.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use brainbytes_verify::probe::DEFAULT_PROBE_TIMEOUT;
use brainbytes_verify::{verify, HttpProbe, Verdict, VerifyPlan};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let plan = VerifyPlan::default();
    let probe = match HttpProbe::new(DEFAULT_PROBE_TIMEOUT) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "cannot build probe");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        targets = plan.targets.len(),
        max_attempts = plan.max_attempts,
        delay_ms = plan.delay.as_millis() as u64,
        "verifying deployment"
    );

    let verdict = verify(&probe, &plan).await;
    match &verdict {
        Verdict::Healthy { attempts } => {
            tracing::info!(attempts, "all services healthy");
        }
        Verdict::Exhausted { last } => {
            for r in last.failing() {
                tracing::error!(
                    service = %r.target.name,
                    url = %r.target.url,
                    "service never became healthy"
                );
            }
        }
    }

    ExitCode::from(verdict.exit_code())
}
