//! # End-to-end Learning Scenarios
//!
//! Drives a [`ProfileStore`] the way the power daemon would and checks what
//! ends up on disk and in the estimates. Every test works in its own
//! temporary data directory.

use battery_profile_lib::{
    config::Config,
    point_series::PointSeries,
    profile::{FixedLoad, ManualTimer, ProfileStore, Registration},
    trace::{self, ReplayLoad},
    BUCKETS,
};
use std::fs;
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.profile.data_dir = Some(dir.path().to_path_buf());
    config
}

fn store_with_timer(config: &Config, on_ac: bool) -> (ProfileStore, ManualTimer) {
    let timer = ManualTimer::new();
    let store = ProfileStore::new(config, on_ac, Box::new(timer.clone()), Box::new(FixedLoad(0.2)));
    (store, timer)
}

/// A steady discharge from 80% down to 70% at five minutes a step.
///
/// The first reading only arms the learner, the remaining ten each fill one
/// bucket, and the time to empty from 75% counts the buckets at or below it.
#[test]
fn steady_discharge_predicts_time_to_empty() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let (mut store, timer) = store_with_timer(&config, false);
    store.set_config_id("laptop");

    for percentage in (70..=80).rev() {
        timer.advance(300.0);
        store.register_percentage(percentage).unwrap();
    }

    for i in 70..80 {
        assert_eq!(store.data_curve(true).get(i).unwrap(), 300.0, "bucket {}", i);
    }
    assert_eq!(store.data_curve(true).get(80).unwrap(), 0.0);

    // buckets 70..=75 learned, 0..70 still empty
    assert_eq!(store.get_time(75, true).unwrap(), 6 * 300);
    assert_eq!(store.get_accuracy(75).unwrap(), 20);
}

/// Learned curves survive a restart through the CSV files.
#[test]
fn learned_curve_is_reloaded_by_a_new_store() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    {
        let (mut store, timer) = store_with_timer(&config, false);
        store.set_config_id("laptop");
        timer.advance(10.0);
        store.register_percentage(50).unwrap();
        timer.advance(240.0);
        assert_eq!(store.register_percentage(49).unwrap(), Registration::Accepted);
    }

    let (mut store, _) = store_with_timer(&config, false);
    store.set_config_id("laptop");
    assert_eq!(store.data_curve(true).get(49).unwrap(), 240.0);
    assert_eq!(store.accuracy_curve(true).get(49).unwrap(), 20.0);

    let contents = fs::read_to_string(dir.path().join("profile-laptop-discharging.csv")).unwrap();
    assert_eq!(contents.lines().count(), BUCKETS);
    assert_eq!(contents.lines().nth(49), Some("49, 240, 20"));
}

/// A battery that stops charging at 96% has its top buckets zeroed.
#[test]
fn charge_stall_zeroes_remaining_buckets() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let (mut store, timer) = store_with_timer(&config, true);
    store.set_config_id("laptop");

    for percentage in 94..=96 {
        timer.advance(120.0);
        store.register_percentage(percentage).unwrap();
    }
    assert_eq!(store.last_percentage(), 95);
    assert!(store.register_charging(false).unwrap());

    let data = store.data_curve(false);
    let accuracy = store.accuracy_curve(false);
    assert_eq!(data.get(94).unwrap(), 120.0);
    for i in 95..BUCKETS {
        assert_eq!(data.get(i).unwrap(), 0.0);
        assert_eq!(accuracy.get(i).unwrap(), 100.0);
    }
    // nothing left to charge once the stall point is reached
    assert_eq!(store.get_time(95, false).unwrap(), 0);
    assert_eq!(store.get_time(94, false).unwrap(), 120);
}

/// Hand-edited profiles with gaps still line up with their buckets.
#[test]
fn profile_with_blank_lines_keeps_bucket_positions() {
    let dir = TempDir::new().unwrap();
    let mut contents = String::new();
    for i in 0..BUCKETS {
        if i == 3 {
            contents.push('\n');
        } else {
            contents.push_str(&format!("{}, {}, 50\n", i, i * 10));
        }
    }
    fs::write(dir.path().join("profile-edited-discharging.csv"), contents).unwrap();

    let config = config_in(&dir);
    let (mut store, _) = store_with_timer(&config, false);
    store.set_config_id("edited");

    let curve = store.data_curve(true);
    assert_eq!(curve.get(2).unwrap(), 20.0);
    assert_eq!(curve.get(3).unwrap(), 0.0);
    assert_eq!(curve.get(4).unwrap(), 40.0);
    assert_eq!(store.accuracy_curve(true).get(4).unwrap(), 50.0);
}

/// Configurations are learned independently.
#[test]
fn switching_config_id_swaps_curves() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let (mut store, timer) = store_with_timer(&config, false);

    store.set_config_id("one-battery");
    timer.advance(1.0);
    store.register_percentage(60).unwrap();
    timer.advance(90.0);
    store.register_percentage(59).unwrap();

    assert!(store.set_config_id("two-batteries"));
    assert_eq!(store.data_curve(true).get(59).unwrap(), 0.0);

    assert!(store.set_config_id("one-battery"));
    assert_eq!(store.data_curve(true).get(59).unwrap(), 90.0);
    assert!(!store.set_config_id("one-battery"));
}

/// A recorded evening of use replayed from a trace file.
#[test]
fn trace_file_replay_feeds_store_and_history() {
    let dir = TempDir::new().unwrap();
    let trace_path = dir.path().join("evening.trace");
    fs::write(
        &trace_path,
        "# unplugged after dinner\n\
         0, ac, 0\n\
         0, load, 0.5\n\
         60, percent, 97\n\
         360, percent, 96\n\
         400, display, off\n\
         660, percent, 95\n\
         700, display, on\n\
         960, percent, 94\n",
    )
    .unwrap();

    let config = config_in(&dir);
    let timer = ManualTimer::new();
    let load = ReplayLoad::default();
    let mut store = ProfileStore::new(&config, true, Box::new(timer.clone()), Box::new(load.source()));
    store.set_config_id("trace");

    let events = trace::load_trace(&trace_path).unwrap();
    let mut history = PointSeries::with_limits(120, 3600);
    let summary = trace::replay(&mut store, &timer, &load, &events, &mut history).unwrap();

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.rejected, 2);
    assert_eq!(store.data_curve(true).get(96).unwrap(), 300.0);
    assert_eq!(store.data_curve(true).get(95).unwrap(), 0.0);
    assert_eq!(store.data_curve(true).get(94).unwrap(), 300.0);
    assert_eq!(history.len(), 4);
}
