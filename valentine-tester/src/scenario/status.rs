//! Reads a saved state instead of simulating one.
use anyhow::Result;
use colored::Colorize;
use valentine_core::{Dashboard, FixedClock, KeyValueStore, MemoryStore, UnlockEngine, days};

use super::{Checks, ScenarioCtx};
use crate::file_store::FileStore;

pub fn status(ctx: &ScenarioCtx, checks: &mut Checks) -> Result<()> {
    let clock = FixedClock::new(ctx.now);
    if let Some(path) = &ctx.state_file {
        log::info!("inspecting state in {}", path.display());
        let store = FileStore::new(path);
        // An unreadable file fails the scenario rather than reading as empty.
        store.get(valentine_core::store::UNLOCKS_KEY)?;
        inspect(&UnlockEngine::new(store, clock, ctx.config.clone()), ctx, checks);
    } else {
        inspect(&UnlockEngine::new(MemoryStore::new(), clock, ctx.config.clone()), ctx, checks);
    }
    Ok(())
}

fn inspect<S: KeyValueStore>(
    engine: &UnlockEngine<S, FixedClock>,
    ctx: &ScenarioCtx,
    checks: &mut Checks,
) {
    let dashboard = engine.dashboard();
    let visited = engine.visited_days();
    let open = dashboard.days.iter().filter(|day| day.unlocked).count();

    checks.expect_eq("visited count", dashboard.visited_count, visited.len());
    checks.expect_eq("progress", dashboard.progress_percent, engine.progress_percent());
    checks.expect_eq("open days", open, engine.unlocked_days().len());
    for id in engine.unlock_order().iter().chain(&visited) {
        checks.check(days::is_known_day(id), || format!("unknown day {id} in state"));
    }
    for day in dashboard.days.iter().filter(|day| day.visited) {
        checks.check(visited.contains(&day.id), || {
            format!("{} marked visited on the dashboard only", day.id)
        });
    }

    if ctx.verbose {
        print_dashboard(&dashboard);
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    for day in &dashboard.days {
        let state = if day.unlocked {
            "open".green()
        } else {
            format!("in {} days", day.days_until).yellow()
        };
        let seen = if day.visited { " ✓" } else { "" };
        println!("  {} {:<18} {state}{seen}", day.icon, day.name);
    }
    println!("  progress {}%", dashboard.progress_percent);
    for badge in &dashboard.achievements {
        println!("  {} {}", badge.icon, badge.name);
    }
}
