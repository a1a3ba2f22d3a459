//! # Event Trace Replay
//!
//! The learner is normally fed by a power daemon. A trace is a recording of
//! what that daemon would have delivered, one event per line:
//!
//! ```text
//! # seconds, event, value
//! 0, ac, 0
//! 0, display, on
//! 0, load, 0.4
//! 120, percent, 99
//! 300, percent, 98
//! ```
//!
//! Events are `ac` (0 or 1), `display` (on, standby, suspend, off), `load`
//! (float), `percent` (integer) and `charging` (0 or 1). Blank lines and
//! `#` comments are ignored. Timestamps must not go backwards.
//!
//! Until the first `ac` event the store keeps the adapter state it was
//! built with.

use crate::{
    color,
    error::ProfileError,
    point_series::PointSeries,
    profile::{DisplayMode, ManualTimer, ProfileStore, Registration},
};
use std::{cell::Cell, fs, io, path::Path, rc::Rc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    /// Trace file could not be read
    #[error("trace IO: {0}")]
    Io(#[from] io::Error),

    /// A line could not be understood
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TraceKind {
    Ac(bool),
    Display(DisplayMode),
    Load(f64),
    Percent(u32),
    Charging(bool),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceEvent {
    /// Seconds since the start of the trace
    pub at: u32,
    pub kind: TraceKind,
}

/// Counts of learned and discarded percentage readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub accepted: usize,
    pub rejected: usize,
    pub stall_corrections: usize,
}

/// Shared load figure for a replay, read by the store through a closure.
#[derive(Clone, Debug, Default)]
pub struct ReplayLoad(Rc<Cell<f64>>);

impl ReplayLoad {
    pub fn set(&self, load: f64) {
        self.0.set(load);
    }

    /// A load source for [`ProfileStore::new`] that follows this handle.
    pub fn source(&self) -> impl FnMut() -> f64 {
        let cell = Rc::clone(&self.0);
        move || cell.get()
    }
}

pub fn parse_trace(text: &str) -> Result<Vec<TraceEvent>, TraceError> {
    let mut events = Vec::new();
    let mut last_at = 0;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = parse_event(line).map_err(|reason| TraceError::Parse {
            line: i + 1,
            reason,
        })?;
        if event.at < last_at {
            return Err(TraceError::Parse {
                line: i + 1,
                reason: format!("time {} goes backwards from {}", event.at, last_at),
            });
        }
        last_at = event.at;
        events.push(event);
    }
    Ok(events)
}

pub fn load_trace<P: AsRef<Path>>(path: P) -> Result<Vec<TraceEvent>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}

fn parse_event(line: &str) -> Result<TraceEvent, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [at, name, value] = fields.as_slice() else {
        return Err(format!("expected 3 fields, got {}", fields.len()));
    };

    let at = at
        .parse::<u32>()
        .map_err(|e| format!("bad time '{}': {}", at, e))?;
    let kind = match *name {
        "ac" => TraceKind::Ac(parse_flag(value)?),
        "display" => TraceKind::Display(value.parse()?),
        "load" => TraceKind::Load(
            value
                .parse()
                .map_err(|e| format!("bad load '{}': {}", value, e))?,
        ),
        "percent" => TraceKind::Percent(
            value
                .parse()
                .map_err(|e| format!("bad percentage '{}': {}", value, e))?,
        ),
        "charging" => TraceKind::Charging(parse_flag(value)?),
        other => return Err(format!("unknown event '{}'", other)),
    };
    Ok(TraceEvent { at, kind })
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(format!("expected 0 or 1, got '{}'", other)),
    }
}

/// Drive `store` through `events`.
///
/// `timer` and `load` must be the handles the store was built with. Every
/// percentage reading is also recorded in `history` as
/// `(seconds, percentage, colour)` for display.
pub fn replay(
    store: &mut ProfileStore,
    timer: &ManualTimer,
    load: &ReplayLoad,
    events: &[TraceEvent],
    history: &mut PointSeries,
) -> Result<ReplaySummary, ProfileError> {
    let mut summary = ReplaySummary::default();

    for event in events {
        timer.set_now(event.at as f64);
        match event.kind {
            TraceKind::Ac(on_ac) => store.on_ac_changed(on_ac),
            TraceKind::Display(mode) => store.on_display_mode_changed(mode),
            TraceKind::Load(value) => load.set(value),
            TraceKind::Charging(is_charging) => {
                if store.register_charging(is_charging)? {
                    summary.stall_corrections += 1;
                }
            }
            TraceKind::Percent(percentage) => {
                let (colour, _) = color::curve_colours(store.is_discharging());
                history.add(event.at, percentage, colour);
                match store.register_percentage(percentage)? {
                    Registration::Accepted => summary.accepted += 1,
                    Registration::Rejected(reason) => {
                        log::debug!("{}s: {}% rejected: {:?}", event.at, percentage, reason);
                        summary.rejected += 1;
                    }
                }
            }
        }
    }
    Ok(summary)
}
