//! Display strings for the tracker card

use std::time::Duration;

/// `"523 m"` below one kilometre, `"1.61 km"` from there on
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

/// Zero-padded `HH:MM:SS`; hours keep counting past 99
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Speed readout, e.g. `"1.5 mph"`
pub fn format_speed(mph: f32) -> String {
    format!("{:.1} mph", mph)
}
