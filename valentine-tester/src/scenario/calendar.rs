//! Sweeps of the calendar gate under the different off-season settings.
use anyhow::Result;
use chrono::{Datelike, Duration};
use valentine_core::{DayEntry, VALENTINE_DAYS};

use super::{Checks, ScenarioCtx, SimEngine, local_instant, plain_calendar, sim_engine};

const FEBRUARY_DAYS: u32 = 28;

fn open_flags(engine: &SimEngine) -> Vec<bool> {
    VALENTINE_DAYS.iter().map(|day| engine.is_unlocked(day.id)).collect()
}

fn open_ids(engine: &SimEngine) -> Vec<&'static str> {
    engine.unlocked_days().iter().map(|day| day.id).collect()
}

fn days_until_all(engine: &SimEngine) -> Vec<u32> {
    VALENTINE_DAYS
        .iter()
        .map(|day| engine.days_until_unlock(day.calendar_date))
        .collect()
}

fn season_year(ctx: &ScenarioCtx) -> i32 {
    ctx.now.with_timezone(&ctx.config.offset()).year()
}

/// Every hour of February against the day-of-month rule.
pub fn calendar_sweep(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let config = plain_calendar(&ctx.config);
    let year = season_year(ctx);
    let (engine, clock) = sim_engine(config.clone(), local_instant(&config, year, 2, 1, 0)?);

    for day in 1..=FEBRUARY_DAYS {
        for hour in 0..24 {
            clock.set(local_instant(&config, year, 2, day, hour)?);
            for entry in &VALENTINE_DAYS {
                let expected = day >= entry.calendar_date;
                checks.check(engine.is_unlocked(entry.id) == expected, || {
                    format!(
                        "{} on Feb {day} {hour:02}:00 should be {}",
                        entry.id,
                        if expected { "open" } else { "locked" }
                    )
                });
                checks.expect_eq(
                    &format!("days until {} on Feb {day}", entry.id),
                    engine.days_until_unlock(entry.calendar_date),
                    entry.calendar_date.saturating_sub(day),
                );
            }
        }
    }

    for entry in &VALENTINE_DAYS {
        check_midnight_edge(&engine, &clock, &config, year, entry, checks)?;
    }
    Ok(())
}

fn check_midnight_edge(
    engine: &SimEngine,
    clock: &valentine_core::FixedClock,
    config: &valentine_core::GiftConfig,
    year: i32,
    entry: &DayEntry,
    checks: &mut Checks,
) -> Result<()> {
    let opening = local_instant(config, year, entry.month, entry.calendar_date, 0)?;
    clock.set(opening - Duration::minutes(1));
    checks.check(!engine.is_unlocked(entry.id), || {
        format!("{} open a minute before local midnight", entry.id)
    });
    clock.set(opening);
    checks.check(engine.is_unlocked(entry.id), || {
        format!("{} still locked at local midnight", entry.id)
    });
    Ok(())
}

/// The season year in six-hour steps, anchored to `--now`'s year, then the
/// following February, where the day-of-month rule applies again.
pub fn anchored_season(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let year = season_year(ctx);
    let config = plain_calendar(&ctx.config).with_season_year(Some(year));
    let start = local_instant(&config, year, 1, 1, 0)?;
    let end = local_instant(&config, year + 1, 1, 1, 0)?;
    let (engine, clock) = sim_engine(config.clone(), start);

    let mut previous = open_flags(&engine);
    let mut previous_wait = days_until_all(&engine);
    checks.expect_eq("open on new year's day", open_ids(&engine).len(), 0);

    let mut now = start;
    while now < end {
        now += Duration::hours(6);
        clock.set(now);
        let flags = open_flags(&engine);
        for ((entry, was), is) in VALENTINE_DAYS.iter().zip(&previous).zip(&flags) {
            checks.check(!*was || *is, || format!("{} relocked at {now}", entry.id));
        }
        let wait = days_until_all(&engine);
        for ((entry, before), after) in VALENTINE_DAYS.iter().zip(&previous_wait).zip(&wait) {
            checks.check(after <= before, || {
                format!("days until {} grew from {before} to {after} at {now}", entry.id)
            });
        }
        previous = flags;
        previous_wait = wait;
    }

    clock.set(local_instant(&config, year, 2, 6, 23)?);
    checks.expect_eq("open on the eve of the week", open_ids(&engine).len(), 0);
    clock.set(local_instant(&config, year, 2, 14, 0)?);
    checks.expect_eq("open on Valentine's Day", open_ids(&engine).len(), VALENTINE_DAYS.len());
    clock.set(local_instant(&config, year + 1, 1, 20, 12)?);
    checks.expect_eq("open the next January", open_ids(&engine).len(), VALENTINE_DAYS.len());

    for day in 1..=FEBRUARY_DAYS {
        clock.set(local_instant(&config, year + 1, 2, day, 12)?);
        for entry in &VALENTINE_DAYS {
            checks.expect_eq(
                &format!("{} on Feb {day} after the season", entry.id),
                engine.is_unlocked(entry.id),
                day >= entry.calendar_date,
            );
            checks.expect_eq(
                &format!("days until {} on Feb {day} after the season", entry.id),
                engine.days_until_unlock(entry.calendar_date),
                entry.calendar_date.saturating_sub(day),
            );
        }
    }
    Ok(())
}

pub fn dev_mode(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let year = season_year(ctx);
    let config = plain_calendar(&ctx.config).with_dev_mode(true);
    let (engine, clock) = sim_engine(config.clone(), local_instant(&config, year, 3, 1, 12)?);
    checks.expect_eq("open in March", open_ids(&engine).len(), VALENTINE_DAYS.len());

    clock.set(local_instant(&config, year, 1, 20, 12)?);
    checks.expect_eq("open in January", open_ids(&engine).len(), VALENTINE_DAYS.len());

    clock.set(local_instant(&config, year, 2, 9, 12)?);
    checks.expect_eq(
        "open on Feb 9",
        open_ids(&engine),
        vec!["rose", "propose", "chocolate"],
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use valentine_core::GiftConfig;

    fn ctx(config: GiftConfig) -> ScenarioCtx {
        ScenarioCtx {
            config,
            now: Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap(),
            state_file: None,
            seed: 7,
            verbose: false,
        }
    }

    #[test]
    fn calendar_scenarios_pass_in_ist_and_utc() {
        let utc = GiftConfig {
            utc_offset_minutes: 0,
            ..GiftConfig::default()
        };
        for config in [GiftConfig::default(), utc] {
            for run in [calendar_sweep, anchored_season, dev_mode] {
                let mut checks = Checks::default();
                run(&ctx(config.clone()), &mut checks).unwrap();
                assert!(checks.failures().is_empty(), "{:?}", &checks.failures()[..1]);
            }
        }
    }

    #[test]
    fn sweep_ignores_dev_mode_and_counts_every_check() {
        // Dev mode is stripped, so the sweep still matches the plain rule.
        let mut checks = Checks::default();
        calendar_sweep(&ctx(GiftConfig::default().with_dev_mode(true)), &mut checks).unwrap();
        assert!(checks.failures().is_empty());
        assert_eq!(checks.run(), 28 * 24 * 8 * 2 + 8 * 2);
    }
}
