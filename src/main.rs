//! # Battery Profile Command Line
//!
//! Inspects and exercises the learned battery profiles: draw a curve, ask
//! for a time-remaining estimate, replay a recorded event trace into the
//! learner, or throw a curve away.
//!
//! ```text
//! battery-profile [--config FILE] show   [--id ID] [--charging] [--accuracy] [--smooth] [--json]
//! battery-profile [--config FILE] time   [--id ID] --percent N [--charging]
//! battery-profile [--config FILE] replay [--id ID] [--charging] TRACE
//! battery-profile [--config FILE] reset  [--id ID] [--charging]
//! ```

// Test modules
#[cfg(test)]
mod tests;

use anyhow::{anyhow, bail, Context};
use battery_profile_lib::{
    config::Config,
    point_series::PointSeries,
    profile::{FixedLoad, ManualTimer, MonotonicTimer, ProfileStore},
    renderer::{draw_ascii, format_duration, ValueUnit},
    trace::{self, ReplayLoad},
    Direction, BUCKETS,
};
use chrono::Local;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
enum Command {
    Show {
        accuracy: bool,
        smooth: bool,
        json: bool,
    },
    Time {
        percent: u32,
    },
    Replay {
        trace: PathBuf,
    },
    Reset,
}

#[derive(Debug, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    id: Option<String>,
    charging: bool,
    command: Command,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut config = None;
    let mut id = None;
    let mut charging = false;
    let mut accuracy = false;
    let mut smooth = false;
    let mut json = false;
    let mut percent = None;
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(iter.next().context("--config needs a file")?))
            }
            "--id" => id = Some(iter.next().context("--id needs a value")?),
            "--percent" => {
                let value = iter.next().context("--percent needs a value")?;
                percent = Some(
                    value
                        .parse::<u32>()
                        .with_context(|| format!("bad percentage '{}'", value))?,
                );
            }
            "--charging" => charging = true,
            "--accuracy" => accuracy = true,
            "--smooth" => smooth = true,
            "--json" => json = true,
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("show") | None => Command::Show {
            accuracy,
            smooth,
            json,
        },
        Some("time") => Command::Time {
            percent: percent.context("time needs --percent")?,
        },
        Some("replay") => Command::Replay {
            trace: PathBuf::from(positional.next().context("replay needs a trace file")?),
        },
        Some("reset") => Command::Reset,
        Some(other) => return Err(anyhow!("unknown command '{}'", other)),
    };

    Ok(Args {
        config,
        id,
        charging,
        command,
    })
}

fn show(
    store: &mut ProfileStore,
    config: &Config,
    discharging: bool,
    accuracy: bool,
    smooth: bool,
    json: bool,
) -> anyhow::Result<()> {
    let direction = Direction::from_discharging(discharging);
    let (view, unit) = if accuracy {
        (store.get_data_accuracy_percent(discharging).clone(), ValueUnit::Percent)
    } else {
        (store.get_data_time_percent(discharging).clone(), ValueUnit::Seconds)
    };

    let view = if smooth && !accuracy {
        let mut smoothed = view;
        let curve = store.smoothed_time_curve(discharging);
        for (i, value) in curve.as_slice().iter().enumerate() {
            let data = smoothed.points()[i].data;
            smoothed.set(i, i as u32, *value as u32, data)?;
        }
        smoothed
    } else {
        view
    };

    if json {
        println!("{}", serde_json::to_string_pretty(view.points())?);
        return Ok(());
    }

    let what = if accuracy { "accuracy" } else { "time" };
    println!(
        "{} {} profile for '{}' ({})",
        direction,
        what,
        store.config_id().unwrap_or("?"),
        Local::now().format("%-m/%-d %-I:%M%p")
    );
    draw_ascii(&view, config.chart.rows, unit);
    Ok(())
}

fn time(store: &ProfileStore, discharging: bool, percent: u32) -> anyhow::Result<()> {
    let seconds = store.get_time(percent, discharging)?;
    let accuracy = store.get_accuracy(percent)?;
    let target = if discharging { "empty" } else { "full" };

    println!(
        "{}% -> {}: {} ({} s, accuracy {}%)",
        percent.min(BUCKETS as u32 - 1),
        target,
        format_duration(seconds),
        seconds,
        accuracy
    );
    Ok(())
}

fn reset(store: &ProfileStore, discharging: bool) -> anyhow::Result<()> {
    store
        .delete_data(discharging)
        .context("deleting profile data")?;
    println!(
        "deleted {} profile for '{}'",
        Direction::from_discharging(discharging),
        store.config_id().unwrap_or("?")
    );
    Ok(())
}

/// Replay a trace, starting on AC only when `charging` is set.
fn replay(config: &Config, config_id: &str, trace_path: &Path, charging: bool) -> anyhow::Result<()> {
    let events = trace::load_trace(trace_path)
        .with_context(|| format!("reading trace {}", trace_path.display()))?;

    let timer = ManualTimer::new();
    let load = ReplayLoad::default();
    let mut store = ProfileStore::new(config, charging, Box::new(timer.clone()), Box::new(load.source()));
    store.set_config_id(config_id);

    let mut history = PointSeries::with_limits(config.series.max_points, config.series.max_width);
    let summary = trace::replay(&mut store, &timer, &load, &events, &mut history)?;

    println!(
        "replayed {} events: {} accepted, {} rejected, {} stall corrections",
        events.len(),
        summary.accepted,
        summary.rejected,
        summary.stall_corrections
    );
    if !history.is_empty() {
        println!("percentage history (seconds):");
        draw_ascii(&history, config.chart.rows, ValueUnit::Percent);
    }
    Ok(())
}

/// Open the store for the requested direction and configuration.
///
/// The queries only read the learned curves, so the load is never sampled.
fn open_store(config: &Config, config_id: &str, charging: bool) -> ProfileStore {
    let mut store = ProfileStore::new(
        config,
        charging,
        Box::new(MonotonicTimer::default()),
        Box::new(FixedLoad(0.0)),
    );
    store.set_config_id(config_id);
    store
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let config_id = args.id.unwrap_or_else(|| config.profile.config_id.clone());
    let discharging = !args.charging;

    match args.command {
        Command::Show {
            accuracy,
            smooth,
            json,
        } => {
            let mut store = open_store(&config, &config_id, args.charging);
            show(&mut store, &config, discharging, accuracy, smooth, json)
        }
        Command::Time { percent } => {
            let store = open_store(&config, &config_id, args.charging);
            time(&store, discharging, percent)
        }
        Command::Replay { trace } => replay(&config, &config_id, &trace, args.charging),
        Command::Reset => {
            let store = open_store(&config, &config_id, args.charging);
            reset(&store, discharging)
        }
    }
}
