//! Scenarios that walk a single engine through a visitor's week.
use anyhow::Result;
use chrono::Datelike;
use valentine_core::{ChainAdvance, DEFAULT_ORDER, DayRef, GiftConfig, VALENTINE_DAYS};

use super::{Checks, ScenarioCtx, SimEngine, local_instant, plain_calendar, sim_engine};

fn percent(part: usize) -> u8 {
    u8::try_from((part * 100 + VALENTINE_DAYS.len() / 2) / VALENTINE_DAYS.len()).unwrap_or(100)
}

fn ids(days: &[&valentine_core::DayEntry]) -> Vec<&'static str> {
    days.iter().map(|day| day.id).collect()
}

/// Early February in the year of `--now`, before any day has opened.
fn before_the_week(ctx: &ScenarioCtx) -> Result<(SimEngine, GiftConfig)> {
    let config = plain_calendar(&ctx.config);
    let year = ctx.now.with_timezone(&config.offset()).year();
    let now = local_instant(&config, year, 2, 3, 12)?;
    let (engine, _) = sim_engine(config.clone(), now);
    Ok((engine, config))
}

pub fn smoke(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let (engine, _) = sim_engine(ctx.config.clone(), ctx.now);
    let dashboard = engine.dashboard();
    checks.expect_eq("dashboard cards", dashboard.days.len(), VALENTINE_DAYS.len());

    let mut order = engine.unlock_order();
    order.sort_unstable();
    let mut catalog: Vec<_> = VALENTINE_DAYS.iter().map(|day| day.id).collect();
    catalog.sort_unstable();
    checks.expect_eq("unlock order covers the catalog", order, catalog);
    checks.expect_eq("visited on a new store", engine.visited_days().len(), 0);
    Ok(())
}

pub fn fresh_state(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let (engine, _) = sim_engine(ctx.config.clone(), ctx.now);
    let unlocked = engine.unlocked_days();
    let locked = engine.locked_days();
    checks.expect_eq(
        "unlocked + locked",
        unlocked.len() + locked.len(),
        VALENTINE_DAYS.len(),
    );
    checks.expect_eq("progress", engine.progress_percent(), percent(unlocked.len()));
    checks.expect_eq("unlock order", engine.unlock_order(), DEFAULT_ORDER.to_vec());
    checks.expect_eq("achievements", engine.achievements().len(), 0);

    let dashboard = engine.dashboard();
    for (entry, card) in VALENTINE_DAYS.iter().zip(&dashboard.days) {
        let by_id = engine.is_unlocked(entry.id);
        let by_date = engine.is_unlocked(DayRef::Date(entry.calendar_date));
        checks.expect_eq(&format!("{} by id vs by date", entry.id), by_id, by_date);
        checks.expect_eq(&format!("{} dashboard card", entry.id), card.unlocked, by_id);
    }
    checks.expect_eq(
        "next day to unlock",
        engine.next_day_to_unlock().map(|day| day.id),
        locked.first().map(|day| day.id),
    );
    checks.expect_eq(
        "dashboard next unlock",
        dashboard.next_unlock.map(|next| next.id),
        locked.first().map(|day| day.id),
    );
    if ctx.verbose {
        println!("  🔓 open at {}: {:?}", ctx.now, ids(&unlocked));
    }
    Ok(())
}

pub fn chain_walk(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let (engine, _) = before_the_week(ctx)?;
    let order = engine.unlock_order();
    checks.expect_eq("nothing open before the week", engine.unlocked_days().len(), 0);

    for pair in order.windows(2) {
        let advance = engine.unlock_next(pair[0])?;
        checks.expect_eq(
            &format!("advance from {}", pair[0]),
            advance,
            ChainAdvance::Unlocked(pair[1]),
        );
    }
    if let Some(last) = order.last() {
        checks.expect_eq("end of chain", engine.unlock_next(last)?, ChainAdvance::Exhausted);
    }
    checks.expect_eq(
        "unknown id",
        engine.unlock_next("diwali")?,
        ChainAdvance::NotInChain,
    );
    checks.expect_eq(
        "only the chain head stays locked",
        ids(&engine.locked_days()),
        order.first().copied().into_iter().collect::<Vec<_>>(),
    );
    checks.expect_eq("progress after the walk", engine.progress_percent(), percent(7));
    Ok(())
}

pub fn visit_progress(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let (engine, _) = before_the_week(ctx)?;
    checks.expect_eq("starting progress", engine.progress_percent(), 0);

    for (i, id) in DEFAULT_ORDER.iter().enumerate() {
        checks.check(engine.unlock(id)?, || format!("unlocking {id} changed nothing"));
        checks.expect_eq(&format!("progress after {id}"), engine.progress_percent(), percent(i + 1));
        checks.check(engine.mark_visited(id)?, || format!("first visit to {id} not recorded"));
        checks.check(!engine.mark_visited(id)?, || format!("second visit to {id} recorded"));
        checks.expect_eq(&format!("visits after {id}"), engine.visited_days().len(), i + 1);

        let badges: Vec<_> = engine.achievements().iter().map(|a| a.id).collect();
        let expected: &[&str] = match i + 1 {
            1 => &["first_step", "rose_collector"],
            4 => &[
                "first_step",
                "halfway",
                "rose_collector",
                "chocolate_lover",
                "kiss_master",
            ],
            8 => &[
                "first_step",
                "halfway",
                "completionist",
                "rose_collector",
                "chocolate_lover",
                "kiss_master",
            ],
            _ => continue,
        };
        checks.expect_eq(&format!("badges after {} visits", i + 1), badges, expected.to_vec());
    }
    Ok(())
}
