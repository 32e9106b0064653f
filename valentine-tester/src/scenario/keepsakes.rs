use anyhow::Result;
use chrono::{Timelike, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use valentine_core::{GiftConfig, LOVE_QUOTES, TimeTheme, passphrase_digest, random_quote};

use super::{Checks, ScenarioCtx, sim_engine};

const TEST_PASSPHRASE: &str = "tester phrase";

pub fn keepsakes(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let config = GiftConfig {
        passphrase_sha256: passphrase_digest(TEST_PASSPHRASE),
        ..ctx.config.clone()
    };
    let (engine, _) = sim_engine(config.clone(), ctx.now);
    let secrets = engine.secrets();

    let threshold = config.heart_clicks_for_memory_lane;
    for click in 1..threshold {
        checks.expect_eq("heart clicks", secrets.increment_heart_clicks()?, click);
        checks.check(!secrets.check_heart_easter_egg()?, || {
            format!("memory lane opened after {click} of {threshold} clicks")
        });
    }
    checks.expect_eq("final heart click", secrets.increment_heart_clicks()?, threshold);
    checks.check(secrets.check_heart_easter_egg()?, || {
        "memory lane stayed closed at the threshold".to_string()
    });
    checks.check(secrets.is_memory_lane_unlocked(), || {
        "memory lane flag not persisted".to_string()
    });

    checks.check(!secrets.verify_passphrase("definitely wrong")?, || {
        "wrong passphrase accepted".to_string()
    });
    checks.check(!secrets.has_access(), || "access granted without a match".to_string());
    checks.check(secrets.verify_passphrase("  Tester Phrase ")?, || {
        "padded, capitalised passphrase rejected".to_string()
    });
    checks.check(secrets.has_access(), || "access flag not persisted".to_string());

    check_countdown(ctx, &config, &engine, checks);

    let together = engine.relationship_duration();
    checks.check(together.days >= 0, || format!("negative duration {together:?}"));
    checks.expect_eq("months together", together.months, together.days / 30);
    checks.expect_eq("years together", together.years, together.months / 12);

    let local_hour = ctx.now.with_timezone(&config.offset()).hour();
    let theme = engine.time_theme();
    checks.expect_eq("theme", theme, TimeTheme::for_hour(local_hour));
    checks.expect_eq("night mode", engine.is_night_mode(), theme == TimeTheme::Night);

    let first = random_quote(&mut ChaCha8Rng::seed_from_u64(ctx.seed));
    let again = random_quote(&mut ChaCha8Rng::seed_from_u64(ctx.seed));
    checks.check(LOVE_QUOTES.contains(&first), || format!("unknown quote {first:?}"));
    checks.expect_eq("quote for the same seed", again, first);
    if ctx.verbose {
        println!("  💌 {first}");
    }
    Ok(())
}

fn check_countdown(
    ctx: &ScenarioCtx,
    config: &GiftConfig,
    engine: &super::SimEngine,
    checks: &mut Checks,
) {
    let countdown = engine.countdown_to_meeting();
    let meeting = config
        .meeting_date
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(config.offset()).single())
        .map(|local| local.with_timezone(&Utc));
    let Some(meeting) = meeting else {
        checks.check(false, || "meeting date has no local midnight".to_string());
        return;
    };
    let remaining = meeting.signed_duration_since(ctx.now).num_seconds();
    if remaining <= 0 {
        checks.check(countdown.is_over(), || {
            format!("countdown {countdown:?} after the meeting")
        });
        return;
    }
    let shown = countdown.days * 86_400 + countdown.hours * 3_600 + countdown.minutes * 60;
    checks.check((0..60).contains(&(remaining - shown)), || {
        format!("countdown {countdown:?} is off from {remaining}s remaining")
    });
    checks.check(countdown.hours < 24 && countdown.minutes < 60, || {
        format!("countdown {countdown:?} is not normalised")
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ctx_at(now: chrono::DateTime<Utc>) -> ScenarioCtx {
        ScenarioCtx {
            config: GiftConfig::default(),
            now,
            state_file: None,
            seed: 1337,
            verbose: false,
        }
    }

    #[test]
    fn keepsakes_pass_before_and_after_the_meeting() {
        for now in [
            Utc.with_ymd_and_hms(2026, 2, 14, 16, 45, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 9, 1, 3, 0, 0).unwrap(),
        ] {
            let mut checks = Checks::default();
            keepsakes(&ctx_at(now), &mut checks).unwrap();
            assert!(checks.failures().is_empty(), "{:?}", checks.failures());
        }
    }
}
