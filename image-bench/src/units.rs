use anyhow::{Context, Result};
use std::time::Duration;

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Converts a size as printed by `docker images` (e.g. "123MB" or
/// "1.23GB") into megabytes, rounded to two decimals.
///
/// Only the gigabyte and megabyte suffixes are understood. Anything else,
/// including kilobyte sized images, is rejected.
pub fn parse_size_mb(size: &str) -> Result<f64> {
    let parse = |number: String| {
        number
            .trim()
            .parse::<f64>()
            .with_context(|| format!("unrecognized image size {:?}", size))
    };

    let size_mb = if size.contains("GB") {
        parse(size.replace("GB", ""))? * 1024.0
    } else {
        parse(size.replace("MB", ""))?
    };

    Ok(round_to(size_mb, 2))
}

/// Renders a duration as `"Xm Y.Ys"`, or `"Y.Ys"` below one minute.
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    let minutes = (seconds / 60.0).floor() as u64;
    let seconds = round_to(seconds % 60.0, 1);

    if minutes > 0 {
        format!("{}m {:.1}s", minutes, seconds)
    } else {
        format!("{:.1}s", seconds)
    }
}

pub fn format_megabytes(size_mb: f64) -> String {
    if size_mb.fract() == 0.0 {
        format!("{:.1}", size_mb)
    } else {
        format!("{}", size_mb)
    }
}
