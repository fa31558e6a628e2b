//! Message formatting for timing reports
//!
//! Durations are shown in milliseconds below one second, with fewer decimal
//! places as the value grows, and in seconds from one second up.

use std::time::Duration;

use colored::Colorize;

/// Format a report line such as `it took 0.50 ms`.
///
/// | seconds            | output               |
/// |--------------------|----------------------|
/// | `< 0.001`          | `{label} took 0.0500 ms` |
/// | `0.001 ..< 0.1`    | `{label} took 5.00 ms`   |
/// | `0.1 ..< 1`        | `{label} took 500 ms`    |
/// | `>= 1`             | `{label} took 1.5 s`     |
pub fn format_message(label: &str, seconds: f64) -> String {
    let ms = seconds * 1000.0;
    if seconds < 0.001 {
        format!("{} took {:.4} ms", label, ms)
    } else if seconds < 0.1 {
        format!("{} took {:.2} ms", label, ms)
    } else if seconds < 1.0 {
        format!("{} took {:.0} ms", label, ms)
    } else {
        format!("{} took {:.1} s", label, seconds)
    }
}

pub fn format_duration(label: &str, elapsed: Duration) -> String {
    format_message(label, elapsed.as_secs_f64())
}

/// Report line as written to the diagnostic stream.
pub(crate) fn render(label: &str, seconds: f64, color: bool) -> String {
    if color {
        format_message(&label.bold().to_string(), seconds)
    } else {
        format_message(label, seconds)
    }
}
