//! # Curve Visualization
//!
//! Renders a [`PointSeries`] to an ASCII chart for terminal output. Each point
//! becomes one column; its `y` picks the row. Points whose colour is one of
//! the "never observed" shades are drawn faintly so gaps in the learned curve
//! stand out.

use crate::{color, point_series::PointSeries};

/// Width reserved for the Y-axis labels
const Y_AXIS_WIDTH: usize = 7;

/// How the Y values of a chart should be labelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueUnit {
    Seconds,
    Percent,
}

/// Format a value for the Y axis.
fn format_value(value: u32, unit: ValueUnit) -> String {
    match unit {
        ValueUnit::Percent => format!("{}%", value),
        ValueUnit::Seconds => format_duration(value),
    }
}

/// Compact human duration, e.g. `45s`, `12m`, `2h05`.
pub fn format_duration(secs: u32) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h{:02}", secs / 3600, (secs % 3600) / 60)
    }
}

/// Calculate the value range of the series, never an empty range
fn calculate_display_bounds(series: &PointSeries) -> (u32, u32) {
    let (min, max) = series
        .points()
        .iter()
        .fold((u32::MAX, 0), |(min, max), p| (min.min(p.y), max.max(p.y)));
    if min > max {
        (0, 1)
    } else if min == max {
        (min, min + 1)
    } else {
        (min, max)
    }
}

fn is_unobserved(colour: u32) -> bool {
    colour == color::DARK_RED || colour == color::DARK_BLUE
}

/// Render the series as a chart of `rows` text rows.
pub fn render_ascii(series: &PointSeries, rows: usize, unit: ValueUnit) -> String {
    let rows = rows.max(2);
    let columns = series.len();
    let (min, max) = calculate_display_bounds(series);

    let value_to_row = |value: u32| {
        let normalized = (value - min) as f32 / (max - min) as f32;
        ((1.0 - normalized) * (rows as f32 - 1.0)).round() as usize
    };

    let mut grid = vec![vec![' '; columns + Y_AXIS_WIDTH]; rows];

    // labels on the top, middle and bottom rows
    for value in [max, min + (max - min) / 2, min] {
        let row = value_to_row(value);
        let label = format!("{:>width$}", format_value(value, unit), width = Y_AXIS_WIDTH - 1);
        for (i, ch) in label.chars().take(Y_AXIS_WIDTH - 1).enumerate() {
            grid[row][i] = ch;
        }
    }
    for line in grid.iter_mut() {
        line[Y_AXIS_WIDTH - 1] = '│';
    }

    for (column, point) in series.points().iter().enumerate() {
        let row = value_to_row(point.y);
        grid[row][column + Y_AXIS_WIDTH] = if is_unobserved(point.data) {
            '·'
        } else {
            '•'
        };
    }

    let mut out = String::new();
    for line in grid {
        out.push_str(line.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    // x-axis with a tick every ten columns
    let padding = " ".repeat(Y_AXIS_WIDTH);
    let ticks: String = (0..columns)
        .map(|i| if i % 10 == 0 { '|' } else { ' ' })
        .collect();
    out.push_str(&format!("{}{}\n", padding, ticks.trim_end()));

    if let (Some(first), Some(last)) = (series.points().first(), series.points().last()) {
        let left = first.x.to_string();
        let right = last.x.to_string();
        let gap = columns.saturating_sub(left.len() + right.len()).max(1);
        out.push_str(&format!("{}{}{}{}\n", padding, left, " ".repeat(gap), right));
    }
    out
}

/// Render the series to the terminal.
pub fn draw_ascii(series: &PointSeries, rows: usize, unit: ValueUnit) {
    print!("{}", render_ascii(series, rows, unit));
}
