//! # Battery Profile Learning
//!
//! [`ProfileStore`] learns, for one hardware configuration at a time, how
//! many seconds the battery spends on each percentage point while charging
//! and while discharging, and predicts the time to empty or full by summing
//! those buckets.
//!
//! ## Inputs
//! - [`ProfileStore::on_ac_changed`]: AC adapter plugged or unplugged
//! - [`ProfileStore::on_display_mode_changed`]: screen power state
//! - [`ProfileStore::register_percentage`]: a new percentage reading
//! - [`ProfileStore::register_charging`]: the charger stopped or started
//!
//! ## Sample Filtering
//! A reading is learned only when all of these hold:
//! - it is not the first reading after construction or an AC change, since
//!   that interval straddles an unknown amount of the previous step
//! - the system load was low enough to give an accuracy of at least
//!   `min_accuracy`
//! - the screen is fully on, since screen-off drain is not typical use
//! - when charging, the percentage is above zero
//!
//! ## Storage
//! Each direction is persisted to its own file,
//! `<data_dir>/profile-<config_id>-<direction>.csv`, with 100 lines of
//! `"bucket, seconds, accuracy"`. Every accepted reading rewrites the file
//! for its direction synchronously; a failed write is logged and the
//! in-memory curve carries on.

use crate::{
    color,
    config::Config,
    error::{ProfileError, SeriesError},
    float_series::FloatSeries,
    point_series::PointSeries,
    Direction, Point, PointField, BUCKETS,
};
use std::{
    cell::Cell,
    fs,
    path::PathBuf,
    rc::Rc,
    str::FromStr,
    time::Instant,
};

/// Measures seconds since the last restart.
pub trait ElapsedTimer {
    fn elapsed_secs(&self) -> f64;
    fn restart(&mut self);
}

/// Wall-clock timer backed by [`Instant`].
#[derive(Debug)]
pub struct MonotonicTimer {
    started: Instant,
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl ElapsedTimer for MonotonicTimer {
    fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    fn restart(&mut self) {
        self.started = Instant::now();
    }
}

/// Timer driven by hand, for replaying recorded traces.
///
/// Clones share the same clock, so a caller can keep one handle and give
/// another to the store.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    now: Rc<Cell<f64>>,
    started: Rc<Cell<f64>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now.get()
    }

    pub fn set_now(&self, secs: f64) {
        self.now.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }
}

impl ElapsedTimer for ManualTimer {
    fn elapsed_secs(&self) -> f64 {
        self.now.get() - self.started.get()
    }

    fn restart(&mut self) {
        self.started.set(self.now.get());
    }
}

/// Reports the current system load.
pub trait LoadSource {
    fn current_load(&mut self) -> f64;
}

impl<F: FnMut() -> f64> LoadSource for F {
    fn current_load(&mut self) -> f64 {
        self()
    }
}

/// A load that never changes.
#[derive(Clone, Copy, Debug)]
pub struct FixedLoad(pub f64);

impl LoadSource for FixedLoad {
    fn current_load(&mut self) -> f64 {
        self.0
    }
}

/// One-minute load average from `/proc/loadavg`.
#[derive(Clone, Debug)]
pub struct LoadAverage {
    path: PathBuf,
}

impl Default for LoadAverage {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/proc/loadavg"),
        }
    }
}

impl LoadAverage {
    /// Read a file laid out like `/proc/loadavg`.
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl LoadSource for LoadAverage {
    fn current_load(&mut self) -> f64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| text.split_whitespace().next()?.parse().ok())
            .unwrap_or(0.0)
    }
}

/// Display power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    On,
    Standby,
    Suspend,
    Off,
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(DisplayMode::On),
            "standby" => Ok(DisplayMode::Standby),
            "suspend" => Ok(DisplayMode::Suspend),
            "off" => Ok(DisplayMode::Off),
            other => Err(format!("unknown display mode '{}'", other)),
        }
    }
}

/// Outcome of [`ProfileStore::register_percentage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Accepted,
    Rejected(RejectReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// First reading after a reset, spans an unknown interval
    FirstSample,
    /// System load too high for a trustworthy measurement
    LowAccuracy,
    /// Screen is blanked
    ScreenOff,
    /// Zero percent has no bucket on the charge curve
    ZeroWhileCharging,
}

/// Single-pole blend of `old` and `new`, `weight` percent going to `old`.
pub fn exponential_average(old: f32, new: f32, weight: u32) -> f32 {
    let w = weight as f32 / 100.0;
    old * w + new * (1.0 - w)
}

/// Turn a load figure into a 0-100 measurement accuracy.
fn measurement_accuracy(load: f64) -> u32 {
    if load > 0.01 {
        (100.0 / load).min(100.0) as u32
    } else {
        100
    }
}

fn clamp_percentage(percentage: u32) -> usize {
    if percentage > 99 {
        log::debug!("percentage = {}, correcting to 99%", percentage);
        99
    } else {
        percentage as usize
    }
}

/// Copy a curve into a presentation series, colouring unmeasured buckets.
fn fill_view(view: &mut PointSeries, curve: &FloatSeries, discharging: bool) {
    let (measured, never_observed) = color::curve_colours(discharging);
    for (i, (point, &value)) in view
        .points_mut()
        .iter_mut()
        .zip(curve.as_slice())
        .enumerate()
    {
        let data = if value > 0.0 { measured } else { never_observed };
        *point = Point {
            x: i as u32,
            y: value as u32,
            data,
        };
    }
}

/// Learned charge and discharge profiles for one hardware configuration.
pub struct ProfileStore {
    data_dir: PathBuf,
    smooth_save_percent: u32,
    min_accuracy: u32,
    smooth_kernel: FloatSeries,

    timer: Box<dyn ElapsedTimer>,
    load: Box<dyn LoadSource>,

    data_charge: FloatSeries,
    data_discharge: FloatSeries,
    accuracy_charge: FloatSeries,
    accuracy_discharge: FloatSeries,

    // presentation views, refreshed on every read
    present_data: PointSeries,
    present_accuracy: PointSeries,

    discharging: bool,
    lcd_on: bool,
    data_valid: bool,
    last_percentage: usize,
    config_id: Option<String>,
}

impl ProfileStore {
    /// Create a store with no config id loaded yet.
    ///
    /// `on_ac` is the adapter state at startup.
    pub fn new(
        config: &Config,
        on_ac: bool,
        timer: Box<dyn ElapsedTimer>,
        load: Box<dyn LoadSource>,
    ) -> Self {
        log::debug!("{}", if on_ac { "on AC" } else { "on battery" });
        Self {
            data_dir: config.profile.resolved_data_dir(),
            smooth_save_percent: config.profile.smooth_save_percent,
            min_accuracy: config.profile.min_accuracy,
            smooth_kernel: FloatSeries::gaussian_kernel(
                config.chart.smooth_kernel_length,
                config.chart.smooth_sigma,
            ),
            timer,
            load,
            data_charge: FloatSeries::new(BUCKETS),
            data_discharge: FloatSeries::new(BUCKETS),
            accuracy_charge: FloatSeries::new(BUCKETS),
            accuracy_discharge: FloatSeries::new(BUCKETS),
            present_data: PointSeries::with_fixed_size(BUCKETS),
            present_accuracy: PointSeries::with_fixed_size(BUCKETS),
            discharging: !on_ac,
            lcd_on: true,
            data_valid: false,
            last_percentage: 100,
            config_id: None,
        }
    }

    pub fn config_id(&self) -> Option<&str> {
        self.config_id.as_deref()
    }

    pub fn is_discharging(&self) -> bool {
        self.discharging
    }

    pub fn is_lcd_on(&self) -> bool {
        self.lcd_on
    }

    pub fn is_data_valid(&self) -> bool {
        self.data_valid
    }

    /// Bucket of the last learned reading, 100 until one is learned.
    pub fn last_percentage(&self) -> usize {
        self.last_percentage
    }

    pub fn data_curve(&self, discharging: bool) -> &FloatSeries {
        if discharging {
            &self.data_discharge
        } else {
            &self.data_charge
        }
    }

    pub fn accuracy_curve(&self, discharging: bool) -> &FloatSeries {
        if discharging {
            &self.accuracy_discharge
        } else {
            &self.accuracy_charge
        }
    }

    fn curves_mut(&mut self, discharging: bool) -> (&mut FloatSeries, &mut FloatSeries) {
        if discharging {
            (&mut self.data_discharge, &mut self.accuracy_discharge)
        } else {
            (&mut self.data_charge, &mut self.accuracy_charge)
        }
    }

    /// Path of the persisted curve for a direction.
    pub fn data_file(&self, discharging: bool) -> Option<PathBuf> {
        let config_id = self.config_id.as_ref()?;
        let direction = Direction::from_discharging(discharging);
        Some(
            self.data_dir
                .join(format!("profile-{}-{}.csv", config_id, direction)),
        )
    }

    fn require_config_id(&self) -> Result<(), ProfileError> {
        if self.config_id.is_none() {
            log::warn!("no config id set!");
            return Err(ProfileError::NoConfigId);
        }
        Ok(())
    }

    pub fn on_ac_changed(&mut self, on_ac: bool) {
        // we might be halfway through a percentage change
        self.data_valid = false;
        self.discharging = !on_ac;
        log::debug!("{}", if on_ac { "on AC" } else { "on battery" });
        self.timer.restart();
    }

    pub fn on_display_mode_changed(&mut self, mode: DisplayMode) {
        log::debug!("display mode changed: {:?}", mode);
        self.lcd_on = mode == DisplayMode::On;
    }

    /// Learn from a new percentage reading.
    ///
    /// A percentage that maps past the last bucket is a contract violation.
    pub fn register_percentage(&mut self, percentage: u32) -> Result<Registration, ProfileError> {
        let load = self.load.current_load();
        let accuracy = measurement_accuracy(load);

        let elapsed = self.timer.elapsed_secs();
        self.timer.restart();

        log::debug!(
            "elapsed is {} for {} at load {} (accuracy:{})",
            elapsed,
            percentage,
            load,
            accuracy
        );

        if !self.data_valid {
            log::debug!("data is not valid, will process next");
            self.data_valid = true;
            return Ok(Registration::Rejected(RejectReason::FirstSample));
        }

        if accuracy < self.min_accuracy {
            log::debug!("not accurate enough");
            return Ok(Registration::Rejected(RejectReason::LowAccuracy));
        }

        if !self.lcd_on {
            log::debug!("screen blanked, so not representative - ignoring");
            return Ok(Registration::Rejected(RejectReason::ScreenOff));
        }

        // discharging covers 99..0, charging 1..100 shifted down one bucket
        let index = if self.discharging {
            percentage as usize
        } else {
            if percentage == 0 {
                log::debug!("ignoring percentage zero when charging");
                return Ok(Registration::Rejected(RejectReason::ZeroWhileCharging));
            }
            percentage as usize - 1
        };
        if index >= BUCKETS {
            return Err(SeriesError::OutOfRange {
                index,
                len: BUCKETS,
            }
            .into());
        }

        self.last_percentage = index;
        self.save_percentage(index, elapsed as u32, accuracy)?;
        Ok(Registration::Accepted)
    }

    /// Blend one measurement into the active curves and persist them.
    pub fn save_percentage(
        &mut self,
        index: usize,
        elapsed: u32,
        measurement_accuracy: u32,
    ) -> Result<(), ProfileError> {
        let weight = self.smooth_save_percent;
        let discharging = self.discharging;
        let (data, accuracy) = self.curves_mut(discharging);

        let old = data.get(index)?;
        let value = if old == 0.0 {
            elapsed as f32
        } else {
            // converge on a common value
            exponential_average(old, elapsed as f32, weight)
        };
        data.set(index, value)?;

        // gain at most 20 per reading
        let confidence = accuracy.get(index)? + (measurement_accuracy / 5) as f32;
        accuracy.set(index, confidence.min(100.0))?;

        self.persist(discharging);
        Ok(())
    }

    /// Stall correction for batteries that stop charging short of full.
    ///
    /// When charging ends while the store still thinks it is charging, every
    /// bucket from the last learned one upward is set to zero time at full
    /// accuracy. Returns whether the correction ran.
    pub fn register_charging(&mut self, is_charging: bool) -> Result<bool, ProfileError> {
        if is_charging {
            return Ok(false);
        }
        if self.discharging {
            // adapter pulled half way through charging, nothing to fix
            return Ok(false);
        }

        if self.last_percentage != 100 {
            for i in self.last_percentage..BUCKETS {
                self.data_charge.set(i, 0.0)?;
                self.accuracy_charge.set(i, 100.0)?;
                log::debug!("set percentage {} to zero", i);
            }
            self.persist(false);
        }
        Ok(true)
    }

    /// Predicted seconds to empty (discharging) or to full (charging).
    pub fn get_time(&self, percentage: u32, discharging: bool) -> Result<u32, ProfileError> {
        self.require_config_id()?;
        let percentage = clamp_percentage(percentage);

        let time = if discharging {
            self.data_discharge.compute_integral(0, percentage)?
        } else {
            self.data_charge.compute_integral(percentage, BUCKETS - 1)?
        };
        Ok(time as u32)
    }

    /// Confidence 0-100 for a bucket of the active direction.
    pub fn get_accuracy(&self, percentage: u32) -> Result<u32, ProfileError> {
        self.require_config_id()?;
        let percentage = clamp_percentage(percentage);
        let curve = self.accuracy_curve(self.discharging);
        Ok(curve.get(percentage)? as u32)
    }

    /// Time curve as `(bucket, seconds, colour)` points.
    pub fn get_data_time_percent(&mut self, discharging: bool) -> &PointSeries {
        let curve = if discharging {
            &self.data_discharge
        } else {
            &self.data_charge
        };
        fill_view(&mut self.present_data, curve, discharging);
        &self.present_data
    }

    /// Accuracy curve as `(bucket, accuracy, colour)` points.
    pub fn get_data_accuracy_percent(&mut self, discharging: bool) -> &PointSeries {
        let curve = if discharging {
            &self.accuracy_discharge
        } else {
            &self.accuracy_charge
        };
        fill_view(&mut self.present_accuracy, curve, discharging);
        &self.present_accuracy
    }

    /// Time curve convolved with the configured Gaussian kernel.
    pub fn smoothed_time_curve(&self, discharging: bool) -> FloatSeries {
        self.data_curve(discharging).convolve(&self.smooth_kernel)
    }

    /// Switch to another hardware configuration.
    ///
    /// Reloads both directions from disk, bootstrapping blank files where none
    /// exist. Returns false when `config_id` is already active.
    pub fn set_config_id(&mut self, config_id: &str) -> bool {
        log::debug!("config_id = {}", config_id);
        if self.config_id.as_deref() == Some(config_id) {
            return false;
        }
        self.config_id = Some(config_id.to_string());

        self.load_data(true);
        self.load_data(false);

        if log::log_enabled!(log::Level::Debug) {
            self.log_reference_times();
        }
        true
    }

    /// Remove the persisted curve for a direction.
    pub fn delete_data(&self, discharging: bool) -> Result<(), ProfileError> {
        self.require_config_id()?;
        let path = self.data_file(discharging).ok_or(ProfileError::NoConfigId)?;
        fs::remove_file(&path).map_err(|err| {
            log::warn!("could not delete '{}'", path.display());
            ProfileError::Io(err)
        })
    }

    fn load_data(&mut self, discharging: bool) {
        let Some(path) = self.data_file(discharging) else {
            log::warn!("no config id set!");
            return;
        };

        let mut packed = PointSeries::with_fixed_size(BUCKETS);
        log::debug!("loading battery data from '{}'", path.display());

        if packed.load_from_file(&path).is_err() {
            if let Err(err) = fs::create_dir_all(&self.data_dir) {
                log::warn!("cannot create '{}': {}", self.data_dir.display(), err);
            }

            log::debug!("no data found, generating initial (poor) data");
            for (i, point) in packed.points_mut().iter_mut().enumerate() {
                // no time learned and no confidence in it
                *point = Point {
                    x: i as u32,
                    y: 0,
                    data: 0,
                };
            }
            if packed.save_to_file(&path).is_err() {
                log::warn!(
                    "saving state failed. You will not get accurate time remaining calculations"
                );
            }
        }

        // x is only a counter
        let (data, accuracy) = self.curves_mut(discharging);
        let loaded = data
            .from_point_series(&packed, PointField::Y)
            .and_then(|_| accuracy.from_point_series(&packed, PointField::Data));
        if let Err(err) = loaded {
            log::warn!("could not unpack {} profile: {}", path.display(), err);
        }
    }

    fn save_data(&self, discharging: bool) -> Result<(), ProfileError> {
        let path = self.data_file(discharging).ok_or(ProfileError::NoConfigId)?;

        let mut packed = PointSeries::with_fixed_size(BUCKETS);
        for i in 0..BUCKETS {
            packed.set(i, i as u32, 0, 0)?;
        }
        self.data_curve(discharging)
            .to_point_series(&mut packed, PointField::Y)?;
        self.accuracy_curve(discharging)
            .to_point_series(&mut packed, PointField::Data)?;

        packed.save_to_file(&path)?;
        Ok(())
    }

    // TODO: defer the write to an idle point instead of every accepted sample
    fn persist(&self, discharging: bool) {
        if let Err(err) = self.save_data(discharging) {
            log::warn!(
                "could not save {} profile: {}",
                Direction::from_discharging(discharging),
                err
            );
        }
    }

    fn log_reference_times(&self) {
        log::debug!("reference times");
        let references = [
            (99, true, "99-0"),
            (50, true, "50-0"),
            (0, false, "0-99"),
            (50, false, "50-99"),
        ];
        for (percentage, discharging, label) in references {
            if let Ok(time) = self.get_time(percentage, discharging) {
                log::debug!("{}\t{} minutes", label, time / 60);
            }
        }
    }
}
