mod file_store;
mod reports;
mod runner;
mod scenario;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;
use valentine_core::{Clock, GiftConfig, SystemClock};

use runner::{ScenarioResult, ScenarioRunner};
use scenario::{ScenarioCtx, get_scenario, list_scenarios, standard_keys};

#[derive(Debug, Parser)]
#[command(name = "valentine-tester", version)]
#[command(about = "Deterministic QA scenarios for the Valentine week unlock engine")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for every simulated one)
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Instant to evaluate at, RFC 3339 (defaults to the system clock)
    #[arg(long)]
    now: Option<String>,

    /// Force dev mode on regardless of the config file
    #[arg(long)]
    dev_mode: bool,

    /// JSON file holding saved state, read by the `status` scenario
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Gift config JSON (defaults to the built-in config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for random picks
    #[arg(long, default_value_t = 1337)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == "console" || args.output.is_some() {
        announce_banner();
    }

    let start_time = Instant::now();
    let ctx = build_context(&args)?;
    let results = run_scenarios(&ctx, &expand_scenarios(&args.scenarios));
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:16} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "💘 Valentine Engine Tester".bright_magenta().bold());
    println!("{}", "==========================".magenta());
}

fn load_config(path: Option<&Path>) -> Result<GiftConfig> {
    let Some(path) = path else {
        return Ok(GiftConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GiftConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    now.map_or_else(
        || Ok(SystemClock.now()),
        |text| {
            DateTime::parse_from_rfc3339(text)
                .map(|instant| instant.with_timezone(&Utc))
                .with_context(|| format!("--now expects an RFC 3339 timestamp, got {text:?}"))
        },
    )
}

fn build_context(args: &Args) -> Result<ScenarioCtx> {
    let config = load_config(args.config.as_deref())?;
    let dev_mode = config.dev_mode || args.dev_mode;
    let ctx = ScenarioCtx {
        config: config.with_dev_mode(dev_mode),
        now: resolve_now(args.now.as_deref())?,
        state_file: args.state_file.clone(),
        seed: args.seed,
        verbose: args.verbose,
    };
    log::debug!("evaluating at {} with {:?}", ctx.now, ctx.config);
    Ok(ctx)
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in standard_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn run_scenarios(ctx: &ScenarioCtx, scenarios: &[String]) -> Vec<ScenarioResult> {
    let runner = ScenarioRunner::new(ctx);
    let mut results = Vec::new();
    for key in scenarios {
        if let Some(scenario) = get_scenario(key) {
            results.push(runner.run(&scenario));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Valentine Engine Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
