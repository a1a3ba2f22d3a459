//! # Battery Profile Core Library
//!
//! This library learns how long a battery takes to move through each
//! percentage point, separately for charging and discharging, and answers
//! "how much time remains" by integrating the learned curve.
//!
//! ## Design Philosophy
//!
//! ### Bounded Memory
//! - **Fixed curves**: Every learned curve is exactly 100 buckets of `f32`,
//!   one per percentage point, allocated once per direction
//! - **Live history decimation**: Percentage history kept for display is
//!   thinned with a time-proportional algorithm once it passes a soft limit,
//!   so a long-running daemon never grows it without bound
//!
//! ### Learning
//! - Each accepted percentage step records the seconds it took
//! - New measurements are blended into old ones with exponential smoothing
//! - Every bucket carries a 0-100 confidence score that only grows slowly
//! - Samples taken with the screen off, under heavy load, or straddling an
//!   AC plug/unplug are thrown away
//!
//! ### Data Flow
//! 1. **Sample**: the caller reports a new percentage via
//!    [`profile::ProfileStore::register_percentage`]
//! 2. **Learn**: the active charge or discharge curve is updated in place
//! 3. **Persist**: both curves of that direction are written to a small CSV file
//! 4. **Predict**: [`profile::ProfileStore::get_time`] sums the curve between
//!    the current percentage and empty (or full)
//!
//! ## Core Types
//!
//! - [`Point`]: one `(x, y, data)` sample owned by a [`point_series::PointSeries`]
//! - [`PointField`]: selects which point field a float curve is copied through
//! - [`Direction`]: charging or discharging

use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod error;
pub mod float_series;
pub mod point_series;
pub mod profile;
pub mod renderer;
pub mod trace;

/// Number of percentage buckets in every learned curve.
pub const BUCKETS: usize = 100;

/// A single discrete sample.
///
/// - `x`: time or ordinal coordinate, non-decreasing inside a live series
/// - `y`: the sampled value (elapsed seconds, percentage, ...)
/// - `data`: auxiliary payload, an accuracy score or a packed render colour
///
/// # Example
/// ```
/// use battery_profile_lib::Point;
///
/// let p = Point { x: 12, y: 95, data: 0xff0000 };
/// assert_eq!(p.y, 95);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Time or bucket index
    pub x: u32,
    /// Sampled value
    pub y: u32,
    /// Accuracy or colour
    pub data: u32,
}

/// Which field of a [`Point`] a float curve is packed into.
///
/// A persisted profile file carries two curves in one series:
/// the learned time in `y` and the accuracy in `data`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointField {
    Y,
    Data,
}

/// Direction of the battery, selects which pair of curves is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Charging,
    Discharging,
}

impl Direction {
    pub fn from_discharging(discharging: bool) -> Self {
        if discharging {
            Direction::Discharging
        } else {
            Direction::Charging
        }
    }

    /// File name suffix used for the persisted curve.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Charging => "charging",
            Direction::Discharging => "discharging",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
