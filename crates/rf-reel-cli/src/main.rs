//! reelspin — run spin/stop cycles against simulated reels
//!
//! Usage:
//!   reelspin                          - one 3-reel cycle, normal cadence
//!   reelspin --reels 5 --spins 10     - ten 5-reel cycles
//!   reelspin --config reels.yaml      - layout/cadence from a file
//!   reelspin --profile turbo --trace  - print each cycle's stage trace

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use rf_reels::{ReelManager, ReelManagerConfig, SpinReport, StopTiming, TimingProfile};
use rf_stage::{StageCategory, StageTrace};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Studio,
}

impl From<Profile> for TimingProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Normal => TimingProfile::Normal,
            Profile::Turbo => TimingProfile::Turbo,
            Profile::Studio => TimingProfile::Studio,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "reelspin", about = "Spin simulated reels and report common symbols")]
struct Cli {
    /// Config file (.json, .yaml, .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of reels
    #[arg(long)]
    reels: Option<usize>,

    /// Visible symbols per reel
    #[arg(long)]
    rows: Option<usize>,

    /// Stop cadence profile
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Delay between reel stop signals (ms), overrides the profile
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Number of spin cycles
    #[arg(short = 'n', long, default_value_t = 1)]
    spins: u32,

    /// How long the reels spin before stopping (ms)
    #[arg(long, default_value_t = 1000)]
    spin_ms: u64,

    /// RNG seed for reproducible strips and stops
    #[arg(long)]
    seed: Option<u64>,

    /// Print each cycle's stage trace as JSON
    #[arg(long)]
    trace: bool,
}

fn build_config(cli: &Cli) -> Result<ReelManagerConfig> {
    let mut config = match &cli.config {
        Some(path) => ReelManagerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ReelManagerConfig::default(),
    };

    if let Some(reels) = cli.reels {
        config.layout.number_of_reels = reels;
    }
    if let Some(rows) = cli.rows {
        config.layout.symbols_per_reel = rows;
    }
    if let Some(profile) = cli.profile {
        config.timing = StopTiming::from_profile(profile.into());
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.timing.reel_stop_interval_ms = interval_ms;
        config.timing.profile = TimingProfile::Custom;
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    config.validate().context("Invalid reel configuration")?;
    Ok(config)
}

fn print_report(report: &SpinReport) {
    println!("Spin #{} ({:.0}ms to settle)", report.spin_id, report.stop_duration_ms);

    let rows = report.grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        let cells: Vec<String> = report
            .grid
            .iter()
            .map(|reel| {
                reel.get(row)
                    .map(|symbol| format!("{:>3}", symbol))
                    .unwrap_or_else(|| "  -".to_string())
            })
            .collect();
        println!("  |{} |", cells.join(" "));
    }

    if report.is_victory() {
        println!("  Victory! Common symbols: {:?}", report.outcome.symbols());
    } else {
        println!("  No common symbols.");
    }
}

/// One line per stage category: event count and time span within the cycle
fn trace_summary(trace: &StageTrace) -> Vec<String> {
    StageCategory::all()
        .into_iter()
        .map(|category| {
            let events = trace.events_by_category(category);
            let first = events.first().map(|e| e.timestamp_ms).unwrap_or(0.0);
            let last = events.last().map(|e| e.timestamp_ms).unwrap_or(0.0);
            format!(
                "  {:<15} {:>3} events  {:>7.1}ms .. {:>7.1}ms",
                category.display_name(),
                events.len(),
                first,
                last
            )
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    log::info!(
        "Starting reelspin: {} reels × {} rows, {}ms stop interval",
        config.layout.number_of_reels,
        config.layout.symbols_per_reel,
        config.timing.reel_stop_interval_ms
    );

    let manager = ReelManager::simulated(config).context("Failed to build reel manager")?;
    let mut victories = 0u32;

    for _ in 0..cli.spins {
        manager.start_spin();
        tokio::time::sleep(Duration::from_millis(cli.spin_ms)).await;

        let Some(report) = manager.stop_spin().await.context("Spin cycle failed")? else {
            continue;
        };
        if report.is_victory() {
            victories += 1;
        }
        print_report(&report);

        if cli.trace {
            if let Some(trace) = manager.last_trace() {
                println!("{}", serde_json::to_string_pretty(&trace)?);
                for line in trace_summary(&trace) {
                    println!("{}", line);
                }
                let validation = trace.validate(manager.reel_count());
                for warning in validation.warnings() {
                    log::warn!("Trace {}: {}", trace.trace_id, warning);
                }
            }
        }
    }

    if cli.spins > 1 {
        println!(
            "\n{} of {} spins had common symbols ({:.1}%)",
            victories,
            cli.spins,
            f64::from(victories) / f64::from(cli.spins) * 100.0
        );
    }

    Ok(())
}
