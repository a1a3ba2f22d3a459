//! # Fixed-Length Float Curves
//!
//! [`FloatSeries`] is a zero-initialised vector of `f32` with bounds-checked
//! access. The profile learner keeps four of them (time and accuracy, for each
//! direction), each indexed by percentage bucket.
//!
//! Besides plain access it offers the small amount of signal processing the
//! learner needs: a sum, a discrete Gaussian kernel, an edge-clamped
//! convolution and an inclusive definite integral.

use crate::{error::SeriesError, point_series::PointSeries, PointField};

#[derive(Clone, Debug, PartialEq)]
pub struct FloatSeries {
    values: Vec<f32>,
}

impl FloatSeries {
    /// Create a series of `length` zeros.
    pub fn new(length: usize) -> Self {
        Self {
            values: vec![0.0; length],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value at `i`, or [`SeriesError::OutOfRange`] past the end.
    pub fn get(&self, i: usize) -> Result<f32, SeriesError> {
        self.values
            .get(i)
            .copied()
            .ok_or(SeriesError::OutOfRange {
                index: i,
                len: self.values.len(),
            })
    }

    /// Overwrite the value at `i`.
    pub fn set(&mut self, i: usize, value: f32) -> Result<(), SeriesError> {
        let len = self.values.len();
        match self.values.get_mut(i) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SeriesError::OutOfRange { index: i, len }),
        }
    }

    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Standard normal density at `x` for deviation `sigma`.
    pub fn gaussian_value(x: f32, sigma: f32) -> f32 {
        let tau = 2.0 * std::f32::consts::PI;
        (1.0 / (tau.sqrt() * sigma)) * (-(x * x) / (2.0 * sigma * sigma)).exp()
    }

    /// Build a Gaussian kernel of `length` taps centred on `length / 2`.
    ///
    /// Only the rising half is evaluated; the tail is mirrored from it. Odd
    /// lengths give a symmetric kernel, even lengths come out one tap lopsided.
    pub fn gaussian_kernel(length: usize, sigma: f32) -> Self {
        let mut kernel = Self::new(length);
        let half_length = length / 2 + 1;

        for i in 0..half_length.min(length) {
            let distance = (half_length - (i + 1)) as f32;
            kernel.values[i] = Self::gaussian_value(distance, sigma);
        }

        // reflect rather than recompute
        for i in half_length..length {
            kernel.values[i] = kernel.values[length - (i + 1)];
        }
        kernel
    }

    /// Convolve `self` with `kernel`, returning a series of the same length.
    ///
    /// Samples needed beyond either edge replicate the edge value rather than
    /// reading as zero. Cost is `O(len * kernel.len())`, so keep kernels short.
    pub fn convolve(&self, kernel: &FloatSeries) -> FloatSeries {
        let length = self.values.len();
        let mut result = Self::new(length);
        if length == 0 {
            return result;
        }

        let offset = (kernel.len() / 2) as isize;
        let last = (length - 1) as isize;
        for (i, out) in result.values.iter_mut().enumerate() {
            *out = kernel
                .values
                .iter()
                .enumerate()
                .map(|(j, k)| {
                    let index = (i as isize + j as isize - offset).clamp(0, last);
                    self.values[index as usize] * k
                })
                .sum();
        }
        result
    }

    /// Inclusive sum of `values[x1..=x2]`.
    ///
    /// A degenerate interval (`x1 == x2`) has no area and yields `0.0`.
    pub fn compute_integral(&self, x1: usize, x2: usize) -> Result<f32, SeriesError> {
        if x2 < x1 {
            return Err(SeriesError::InvalidInterval { x1, x2 });
        }
        if x2 >= self.values.len() {
            return Err(SeriesError::OutOfRange {
                index: x2,
                len: self.values.len(),
            });
        }
        if x1 == x2 {
            return Ok(0.0);
        }
        Ok(self.values[x1..=x2].iter().sum())
    }

    /// Copy every value into one field of an equal-length point series.
    ///
    /// Values are truncated to whole numbers on the way out.
    pub fn to_point_series(
        &self,
        dst: &mut PointSeries,
        field: PointField,
    ) -> Result<(), SeriesError> {
        if dst.len() != self.len() {
            return Err(SeriesError::LengthMismatch {
                expected: self.len(),
                actual: dst.len(),
            });
        }
        for (point, &value) in dst.points_mut().iter_mut().zip(&self.values) {
            match field {
                PointField::Y => point.y = value as u32,
                PointField::Data => point.data = value as u32,
            }
        }
        Ok(())
    }

    /// Fill every value from one field of an equal-length point series.
    pub fn from_point_series(
        &mut self,
        src: &PointSeries,
        field: PointField,
    ) -> Result<(), SeriesError> {
        if src.len() != self.len() {
            return Err(SeriesError::LengthMismatch {
                expected: self.len(),
                actual: src.len(),
            });
        }
        for (value, point) in self.values.iter_mut().zip(src.points()) {
            *value = match field {
                PointField::Y => point.y as f32,
                PointField::Data => point.data as f32,
            };
        }
        Ok(())
    }

    /// Dump every value at debug level.
    pub fn log_values(&self) {
        for (i, value) in self.values.iter().enumerate() {
            log::debug!("[{}]\tval={}", i, value);
        }
    }
}
