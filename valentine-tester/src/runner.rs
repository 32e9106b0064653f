use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::{Checks, Scenario, ScenarioCtx};

/// Failures kept per scenario; a broken gate fails thousands of sweep checks.
const MAX_REPORTED_FAILURES: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub key: String,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

pub struct ScenarioRunner<'a> {
    ctx: &'a ScenarioCtx,
}

impl<'a> ScenarioRunner<'a> {
    pub const fn new(ctx: &'a ScenarioCtx) -> Self {
        Self { ctx }
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        if self.ctx.verbose {
            println!(
                "🧪 Running scenario: {} (now {})",
                scenario.name.bright_white(),
                self.ctx.now
            );
        }

        let start = Instant::now();
        let mut checks = Checks::default();
        let outcome = scenario.execute(self.ctx, &mut checks);
        let duration = start.elapsed();

        log::debug!(
            "{}: {} checks, {} failed",
            scenario.key,
            checks.run(),
            checks.failures().len()
        );
        let checks_run = checks.run();
        let mut failures = checks.into_failures();
        if let Err(err) = outcome {
            log::error!("scenario {} aborted: {err:#}", scenario.key);
            failures.insert(0, format!("aborted: {err:#}"));
        }
        let total = failures.len();
        if total > MAX_REPORTED_FAILURES {
            failures.truncate(MAX_REPORTED_FAILURES);
            failures.push(format!("... and {} more", total - MAX_REPORTED_FAILURES));
        }

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            key: scenario.key.to_string(),
            passed: total == 0,
            checks_run,
            failures,
            duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_micros())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_micros(u64::deserialize(deserializer)?))
    }
}
