use std::time::Duration;

/// Format a position as `M:SS`. Minutes are not padded and grow past 59.
pub fn format_time(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total`, with `0:00` standing in for an unknown total.
pub fn progress_text(elapsed: Duration, total: Option<Duration>) -> String {
    format!(
        "{} / {}",
        format_time(elapsed),
        format_time(total.unwrap_or_default())
    )
}

/// Fraction of the track played, for the progress gauge.
pub fn progress_ratio(elapsed: Duration, total: Option<Duration>) -> f64 {
    match total {
        Some(t) if !t.is_zero() => (elapsed.as_secs_f64() / t.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
