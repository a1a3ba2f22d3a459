//! # Discrete Point Series
//!
//! [`PointSeries`] is an ordered list of [`Point`]s used in two distinct ways:
//!
//! ### Growable (live sampling)
//! Samples arrive through [`PointSeries::add`], which run-length compresses
//! flat stretches, drops a meaningless leading run of zeros and keeps the
//! series inside its `max_points` / `max_width` soft limits by decimation.
//! Points arrive in ascending `x`; decimation and trimming rely on that and
//! never re-sort.
//!
//! ### Fixed size (interchange)
//! [`PointSeries::with_fixed_size`] freezes the length up front. Fixed series
//! are the packing format between [`crate::float_series::FloatSeries`] curves
//! and the CSV profile files, and the presentation views handed to renderers.
//!
//! ## File Format
//! One point per line, `"x, y, data"`, unsigned decimal integers. Lines of
//! three characters or fewer are skipped on read.

use crate::{error::SeriesError, Point};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Default soft limit on the number of live points.
pub const DEFAULT_MAX_POINTS: usize = 120;

/// Default soft limit on the x-span of live points (ten minutes of seconds).
pub const DEFAULT_MAX_WIDTH: u32 = 10 * 60;

#[derive(Clone, Debug)]
pub struct PointSeries {
    points: Vec<Point>,
    /// Length frozen, append forbidden
    fixed_size: bool,
    /// Appended to at least once, can no longer be frozen
    variable_size: bool,
    /// A non-zero sample has been seen by `add`
    has_data: bool,
    max_points: usize,
    max_width: u32,
}

impl Default for PointSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl PointSeries {
    /// Empty growable series with the default limits.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_POINTS, DEFAULT_MAX_WIDTH)
    }

    /// Empty growable series with explicit live-sampling limits.
    pub fn with_limits(max_points: usize, max_width: u32) -> Self {
        Self {
            points: Vec::new(),
            fixed_size: false,
            variable_size: false,
            has_data: false,
            max_points,
            max_width,
        }
    }

    /// Series of `size` zeroed points with a frozen length.
    pub fn with_fixed_size(size: usize) -> Self {
        let mut series = Self::new();
        series.fixed_size = true;
        series.points = vec![Point::default(); size];
        series
    }

    /// Freeze the series, padding it with `size` zeroed points.
    ///
    /// Fails once anything has been appended.
    pub fn set_fixed_size(&mut self, size: usize) -> Result<(), SeriesError> {
        if self.variable_size {
            return Err(SeriesError::VariableSizeInUse);
        }
        self.fixed_size = true;
        self.points
            .extend(std::iter::repeat(Point::default()).take(size));
        Ok(())
    }

    pub fn set_max_points(&mut self, max_points: usize) {
        self.max_points = max_points;
    }

    pub fn set_max_width(&mut self, max_width: u32) {
        self.max_width = max_width;
    }

    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Point at `i`; out-of-range access is logged and yields `None`.
    pub fn get(&self, i: usize) -> Option<&Point> {
        let point = self.points.get(i);
        if point.is_none() {
            log::warn!("out of bounds {} of {}", i, self.points.len());
        }
        point
    }

    /// Overwrite an existing point in place.
    pub fn set(&mut self, i: usize, x: u32, y: u32, data: u32) -> Result<(), SeriesError> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(i)
            .ok_or(SeriesError::OutOfRange { index: i, len })?;
        *point = Point { x, y, data };
        Ok(())
    }

    /// Push a point onto a growable series.
    pub fn append(&mut self, x: u32, y: u32, data: u32) -> Result<(), SeriesError> {
        if self.fixed_size {
            return Err(SeriesError::FixedSize);
        }
        self.variable_size = true;
        self.points.push(Point { x, y, data });
        Ok(())
    }

    /// Record a live sample.
    ///
    /// Returns false when the series is fixed size or when the sample is part
    /// of the leading zero run that is never stored.
    pub fn add(&mut self, x: u32, y: u32, data: u32) -> bool {
        if self.fixed_size {
            return false;
        }

        // no point storing leading zeros
        if !self.has_data && y == 0 {
            return false;
        }
        self.has_data = true;
        self.variable_size = true;

        let length = self.points.len();
        if length > 3 {
            let last_two_flat =
                self.points[length - 1].y == y && self.points[length - 2].y == y;
            if last_two_flat {
                // slide the last point along instead of adding one
                self.points[length - 1].x = x;
            } else {
                self.points.push(Point { x, y, data });
                if y == 0 {
                    // drop straight down then run flat, never a diagonal into zero
                    self.points.push(Point { x, y, data });
                }
                log::debug!("using {} elements", self.points.len());
            }
        } else {
            self.points.push(Point { x, y, data });
        }

        self.check_max_and_size();
        true
    }

    fn check_max_and_size(&mut self) {
        if self.points.len() > self.max_points {
            log::debug!("too many points ({}/{})", self.points.len(), self.max_points);
            self.limit_x_size(self.max_points / 2);
        }

        if self.points.len() > 2 {
            let first = self.points[0].x;
            let last = self.points[self.points.len() - 1].x;
            let span = last.saturating_sub(first);
            if span > self.max_width {
                log::debug!("too much time ({}/{})", span, self.max_width);
                self.limit_x_width(self.max_width / 2);
            }
        }
    }

    /// Decimate down to roughly `max_num` points by time division.
    ///
    /// The x-range up to the last point is split into `max_num` slots and only
    /// the first point reaching each slot survives, so dense stretches lose
    /// proportionally more points than sparse ones. Does nothing when the
    /// series is already shorter than `max_num`.
    pub fn limit_x_size(&mut self, max_num: usize) -> bool {
        if self.points.len() < max_num {
            log::debug!("no limit possible as under limit");
            return false;
        }
        let Some(last) = self.points.last() else {
            return false;
        };

        let div = last.x as f32 / max_num as f32;
        log::debug!("using a x division of {}", div);

        let mut running_count = 0.0f32;
        self.points.retain(|point| {
            if point.x as f32 >= running_count {
                running_count += div;
                true
            } else {
                false
            }
        });
        true
    }

    /// Drop points from the head until the span to the last point is within
    /// `max_width`.
    pub fn limit_x_width(&mut self, max_width: u32) -> bool {
        let Some(last) = self.points.last() else {
            return false;
        };
        let last_x = last.x;

        let stale = self
            .points
            .iter()
            .take_while(|point| last_x.saturating_sub(point.x) > max_width)
            .count();
        if stale > 0 {
            log::debug!("removing {} points from start of list", stale);
            self.points.drain(..stale);
        }
        true
    }

    /// Linear interpolation of `y` at `x_intersect`.
    ///
    /// The result never exceeds the `y` of the first point past `x_intersect`.
    /// A single point is returned as-is, past the end yields the last `y`, and
    /// an empty series yields `0`.
    pub fn interpolate(&self, x_intersect: u32) -> u32 {
        let mut last: Option<&Point> = None;
        for point in &self.points {
            if point.x > x_intersect {
                return interpolate_points(point, last, x_intersect);
            }
            last = Some(point);
        }
        last.map_or(0, |point| point.y)
    }

    /// Swap `x` and `y` of every point.
    pub fn invert(&mut self) {
        for point in &mut self.points {
            std::mem::swap(&mut point.x, &mut point.y);
        }
    }

    pub fn sort_by_x(&mut self) {
        self.points.sort_by_key(|point| point.x);
    }

    pub fn sort_by_y(&mut self) {
        self.points.sort_by_key(|point| point.y);
    }

    /// Overwrite `to` element-wise with `from`; lengths must match.
    pub fn copy(from: &PointSeries, to: &mut PointSeries) -> Result<(), SeriesError> {
        if from.len() != to.len() {
            log::debug!("arrays are not the same length");
            return Err(SeriesError::LengthMismatch {
                expected: to.len(),
                actual: from.len(),
            });
        }
        to.points.copy_from_slice(&from.points);
        Ok(())
    }

    /// Append every point of `from` to `to`.
    pub fn copy_append(from: &PointSeries, to: &mut PointSeries) -> Result<(), SeriesError> {
        for point in &from.points {
            to.append(point.x, point.y, point.data)?;
        }
        Ok(())
    }

    /// Overwrite the `data` field of every point.
    pub fn set_data(&mut self, data: u32) {
        for point in &mut self.points {
            point.data = data;
        }
    }

    /// Drop every point and return to the freshly-constructed state,
    /// default soft limits included.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Dump every point at debug level.
    pub fn log_points(&self) {
        for (i, point) in self.points.iter().enumerate() {
            log::debug!("({}) x={},\ty={},\tdata={}", i, point.x, point.y, point.data);
        }
    }

    /// Fill a fixed-size series from a CSV file.
    ///
    /// Line `i` of the file lands at index `i`. Short or malformed lines leave
    /// that point untouched.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SeriesError> {
        if !self.fixed_size {
            return Err(SeriesError::NotFixedSize);
        }
        let contents = read_contents(path.as_ref())?;

        for (i, line) in contents.split('\n').enumerate() {
            if line.len() <= 3 {
                continue;
            }
            let Some(point) = parse_line(line) else {
                log::debug!("skipping malformed line {}: {:?}", i, line);
                continue;
            };
            if self.set(i, point.x, point.y, point.data).is_err() {
                log::warn!("line {} past fixed length {}", i, self.points.len());
            }
        }
        Ok(())
    }

    /// Append every well-formed line of a CSV file to a growable series.
    pub fn append_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SeriesError> {
        if self.fixed_size {
            return Err(SeriesError::FixedSize);
        }
        let contents = read_contents(path.as_ref())?;

        for line in contents.split('\n').filter(|line| line.len() > 3) {
            if let Some(point) = parse_line(line) {
                self.append(point.x, point.y, point.data)?;
            }
        }
        Ok(())
    }

    /// Write every point as one `"x, y, data"` line.
    ///
    /// The file is written next to `path` and renamed over it, so a failed
    /// write leaves any previous file intact.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SeriesError> {
        let path = path.as_ref();
        let mut contents = String::with_capacity(self.points.len() * 12);
        for point in &self.points {
            contents.push_str(&format!("{}, {}, {}\n", point.x, point.y, point.data));
        }

        write_replacing(path, contents.as_bytes()).map_err(|err| {
            log::warn!("cannot write file {}", path.display());
            SeriesError::Io(err)
        })
    }
}

fn interpolate_points(this: &Point, last: Option<&Point>, x_intersect: u32) -> u32 {
    let Some(last) = last else {
        return this.y;
    };

    let dx = this.x as f32 - last.x as f32;
    let dy = this.y as f32 - last.y as f32;
    let m = dy / dx;

    // y-intercept is truncated to a whole value before use
    let c = (this.y as f32 - m * this.x as f32) as i64;
    let y = (m * x_intersect as f32) as i64 + c;

    // never extend the curve above the known later point
    y.clamp(0, this.y as i64) as u32
}

fn parse_line(line: &str) -> Option<Point> {
    let mut fields = line.split(',').map(|field| field.trim().parse::<u32>());
    let x = fields.next()?.ok()?;
    let y = fields.next()?.ok()?;
    let data = fields.next()?.ok()?;
    Some(Point { x, y, data })
}

fn write_replacing(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

fn read_contents(path: &Path) -> Result<String, SeriesError> {
    fs::read_to_string(path).map_err(|err| {
        log::warn!("cannot open file {}", path.display());
        SeriesError::Io(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    fn series_from(points: &[(u32, u32)]) -> PointSeries {
        let mut series = PointSeries::new();
        for &(x, y) in points {
            series.append(x, y, 0).unwrap();
        }
        series
    }

    #[test]
    fn test_append_to_fixed_fails() {
        let mut series = PointSeries::with_fixed_size(3);
        assert!(matches!(series.append(1, 2, 3), Err(SeriesError::FixedSize)));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_set_fixed_size_after_append_fails() {
        let mut series = PointSeries::new();
        series.append(0, 1, 0).unwrap();
        assert!(matches!(
            series.set_fixed_size(10),
            Err(SeriesError::VariableSizeInUse)
        ));
        assert!(!series.is_fixed_size());
    }

    #[test]
    fn test_set_fixed_size_pads_with_zeros() {
        let mut series = PointSeries::new();
        series.set_fixed_size(4).unwrap();
        assert_eq!(series.len(), 4);
        assert!(series.points().iter().all(|p| *p == Point::default()));
        assert!(!series.add(1, 1, 1));
    }

    #[test]
    fn test_get_and_set() {
        let mut series = PointSeries::with_fixed_size(2);
        series.set(1, 4, 5, 6).unwrap();
        assert_eq!(series.get(1), Some(&Point { x: 4, y: 5, data: 6 }));
        assert_eq!(series.get(2), None);
        assert!(series.set(2, 0, 0, 0).is_err());
    }

    #[test]
    fn test_add_short_series_always_appends() {
        let mut series = PointSeries::new();
        for x in 0..4 {
            assert!(series.add(x, 7, 0));
        }
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn test_add_slides_flat_segment() {
        let mut series = series_from(&[(0, 9), (1, 8), (2, 7), (3, 6)]);
        for x in 1..=5 {
            series.add(x + 3, 5, 0);
        }
        // two points to establish the run, then slide
        assert_eq!(series.len(), 6);
        assert_eq!(series.points().last().unwrap().x, 8);
        assert_eq!(series.points().last().unwrap().y, 5);
    }

    #[test]
    fn test_add_run_length_sequence() {
        let mut series = series_from(&[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let inputs = [(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)];
        let mut lengths = Vec::new();
        for (x, y) in inputs {
            series.add(x, y, 0);
            lengths.push(series.len());
        }
        assert_eq!(lengths, vec![5, 6, 6, 6, 6]);
        assert_eq!(series.points().last().unwrap().x, 5);
    }

    #[test]
    fn test_add_zero_doubles_point() {
        let mut series = series_from(&[(0, 9), (1, 8), (2, 7), (3, 6)]);
        series.add(4, 5, 0);
        series.add(5, 0, 0);
        let points = series.points();
        assert_eq!(series.len(), 7);
        assert_eq!(points[5], points[6]);
        assert_eq!(points[6].y, 0);
    }

    #[test]
    fn test_add_suppresses_leading_zeros() {
        let mut series = PointSeries::new();
        assert!(!series.add(0, 0, 0));
        assert!(!series.add(1, 0, 0));
        assert!(series.is_empty());
        assert!(series.add(2, 3, 0));
        assert!(series.add(3, 0, 0));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_add_enforces_max_points() {
        let mut series = PointSeries::with_limits(10, 10_000);
        for x in 0..50 {
            series.add(x, x + 1, 0);
            assert!(series.len() <= 10);
        }
    }

    #[test]
    fn test_add_enforces_max_width() {
        let mut series = PointSeries::with_limits(1000, 100);
        for x in 0..50 {
            series.add(x * 10, x + 1, 0);
        }
        let points = series.points();
        let span = points.last().unwrap().x - points[0].x;
        assert!(span <= 100, "span {} too wide", span);
    }

    #[test]
    fn test_limit_x_size_time_proportional() {
        // dense head, sparse tail
        let mut series = series_from(&[
            (0, 1),
            (1, 1),
            (2, 1),
            (3, 1),
            (4, 1),
            (50, 1),
            (100, 1),
        ]);
        assert!(series.limit_x_size(4));
        let xs: Vec<u32> = series.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 50, 100]);
    }

    #[test]
    fn test_limit_x_size_under_limit_noop() {
        let mut series = series_from(&[(0, 1), (1, 1)]);
        assert!(!series.limit_x_size(5));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_limit_x_size_never_empties() {
        for max_num in 0..6 {
            let mut series = series_from(&[(3, 1), (4, 1), (5, 1), (9, 1)]);
            let before = series.len();
            series.limit_x_size(max_num);
            assert!(series.len() <= before);
            assert!(!series.is_empty());
        }
    }

    #[test]
    fn test_limit_x_width_trims_head() {
        let mut series = series_from(&[(0, 1), (10, 1), (20, 1), (30, 1)]);
        series.limit_x_width(15);
        let xs: Vec<u32> = series.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![20, 30]);
    }

    #[test]
    fn test_interpolate_clamps_to_upper_point() {
        let series = series_from(&[(0, 10), (5, 20), (10, 15)]);
        assert_eq!(series.interpolate(7), 15);
    }

    #[test]
    fn test_interpolate_rising() {
        let series = series_from(&[(0, 10), (10, 20)]);
        assert_eq!(series.interpolate(5), 15);
        assert_eq!(series.interpolate(0), 10);
    }

    #[test]
    fn test_interpolate_single_point() {
        let series = series_from(&[(5, 42)]);
        for x in [0, 5, 6, 1000] {
            assert_eq!(series.interpolate(x), 42);
        }
    }

    #[test]
    fn test_interpolate_past_end_and_empty() {
        let series = series_from(&[(0, 10), (5, 20)]);
        assert_eq!(series.interpolate(99), 20);
        assert_eq!(PointSeries::new().interpolate(3), 0);
    }

    #[test]
    fn test_interpolate_never_above_upper() {
        let series = series_from(&[(0, 50), (10, 5), (20, 80), (30, 0)]);
        for x in 0..30 {
            let upper = series.points().iter().find(|p| p.x > x).unwrap().y;
            assert!(series.interpolate(x) <= upper);
        }
    }

    #[test]
    fn test_invert_and_sort() {
        let mut series = series_from(&[(3, 1), (1, 3), (2, 2)]);
        series.sort_by_x();
        let xs: Vec<u32> = series.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1, 2, 3]);

        series.invert();
        assert_eq!(series.points()[0], Point { x: 3, y: 1, data: 0 });

        series.sort_by_y();
        let ys: Vec<u32> = series.points().iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1, 2, 3]);
    }

    #[test]
    fn test_copy_requires_equal_length() {
        let from = series_from(&[(1, 2), (3, 4)]);
        let mut to = PointSeries::with_fixed_size(2);
        PointSeries::copy(&from, &mut to).unwrap();
        assert_eq!(to.points(), from.points());

        let mut short = PointSeries::with_fixed_size(1);
        assert!(PointSeries::copy(&from, &mut short).is_err());
    }

    #[test]
    fn test_copy_append_and_set_data() {
        let from = series_from(&[(1, 2), (3, 4)]);
        let mut to = series_from(&[(0, 0)]);
        PointSeries::copy_append(&from, &mut to).unwrap();
        assert_eq!(to.len(), 3);

        to.set_data(0xff);
        assert!(to.points().iter().all(|p| p.data == 0xff));
    }

    #[test]
    fn test_clear_resets_state() {
        let mut series = PointSeries::with_fixed_size(3);
        series.clear();
        assert!(series.is_empty());
        assert!(series.append(1, 1, 1).is_ok());
    }

    #[test]
    fn test_clear_restores_default_limits() {
        let mut series = PointSeries::with_limits(4, 10);
        series.clear();
        for i in 0..50 {
            assert!(series.add(i * 2, i + 1, 0));
        }
        // the limits of 4 points over 10 seconds would have thinned this out
        assert_eq!(series.len(), 50);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.csv");

        let mut series = PointSeries::with_fixed_size(100);
        for i in 0..100 {
            series.set(i, i as u32, (i * 3) as u32, (i % 7) as u32).unwrap();
        }
        series.save_to_file(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 100);
        assert_eq!(text.lines().nth(2), Some("2, 6, 2"));

        let mut loaded = PointSeries::with_fixed_size(100);
        loaded.load_from_file(&path).unwrap();
        assert_eq!(loaded.points(), series.points());
    }

    #[test]
    fn test_save_replaces_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.csv");
        fs::write(&path, "0, 1, 2\n1, 3, 4\n2, 5, 6\n").unwrap();

        let mut series = PointSeries::with_fixed_size(1);
        series.set(0, 7, 8, 9).unwrap();
        series.save_to_file(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "7, 8, 9\n");
        // no stray temporary files left beside it
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_save_keeps_existing_data() {
        let dir = TempDir::new().unwrap();
        // a directory sitting where the file should go cannot be replaced
        let target = dir.path().join("profile.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "100 lines of history\n").unwrap();

        let series = PointSeries::with_fixed_size(100);
        let err = series.save_to_file(&target).unwrap_err();
        assert!(!err.is_contract_violation());

        assert!(target.is_dir());
        assert_eq!(
            fs::read_to_string(target.join("keep")).unwrap(),
            "100 lines of history\n"
        );
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("profile.csv")]);
    }

    #[test]
    fn test_load_skips_blank_and_short_lines() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "0, 10, 1\n\n2, 30, 3\nab\n4, 50, 5\ngarbage line\n").unwrap();

        let mut series = PointSeries::with_fixed_size(100);
        series.load_from_file(file.path()).unwrap();

        assert_eq!(series.points()[0], Point { x: 0, y: 10, data: 1 });
        assert_eq!(series.points()[1], Point::default());
        assert_eq!(series.points()[2], Point { x: 2, y: 30, data: 3 });
        assert_eq!(series.points()[3], Point::default());
        assert_eq!(series.points()[4], Point { x: 4, y: 50, data: 5 });
        assert_eq!(series.points()[5], Point::default());
        assert!(series.points()[6..].iter().all(|p| *p == Point::default()));
    }

    #[test]
    fn test_load_requires_fixed_size() {
        let file = NamedTempFile::new().unwrap();
        let mut series = PointSeries::new();
        assert!(matches!(
            series.load_from_file(file.path()),
            Err(SeriesError::NotFixedSize)
        ));
    }

    #[test]
    fn test_load_missing_file_is_environmental() {
        let dir = TempDir::new().unwrap();
        let mut series = PointSeries::with_fixed_size(10);
        let err = series.load_from_file(dir.path().join("nope.csv")).unwrap_err();
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_append_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "1, 2, 3\n\n4, 5, 6\n").unwrap();

        let mut series = series_from(&[(0, 0)]);
        series.append_from_file(file.path()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[2], Point { x: 4, y: 5, data: 6 });

        let mut fixed = PointSeries::with_fixed_size(2);
        assert!(fixed.append_from_file(file.path()).is_err());
    }
}
