//! Time helpers: converting accumulated seconds into presentable units.

/// Accumulated seconds as whole minutes, rounded down.
pub fn minutes_played(secs: f64) -> i64 {
    (secs.max(0.0) / 60.0) as i64
}

/// Format accumulated seconds as "HH:MM:SS" for plugin UIs.
pub fn format_seconds(secs: f64) -> String {
    let total = secs.max(0.0).round() as i64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
