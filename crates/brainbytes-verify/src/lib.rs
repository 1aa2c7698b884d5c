//! Deployment verification.
//!
//! Polls a fixed set of service endpoints in rounds until every one answers
//! with a 2xx/3xx status or the attempt budget runs out. All targets in a
//! round are probed concurrently; rounds are sequential with a constant delay.

pub mod plan;
pub mod probe;
pub mod verifier;

pub use plan::{Target, VerifyPlan};
pub use probe::{HttpProbe, Probe, ProbeOutcome};
pub use verifier::{verify, RoundReport, TargetResult, Verdict};
