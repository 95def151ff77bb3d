// Display helpers shared by every screen.

/// Whole degrees with the unit, e.g. `215°C`.
pub fn format_temp(temp: f64) -> String {
    format!("{}°C", round_display(temp))
}

/// Whole percent, e.g. `65%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", round_display(value))
}

/// `1h 20m` for durations of an hour or more, `45m` otherwise.
pub fn format_minutes(minutes: u32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    if h > 0 { format!("{h}h {m}m") } else { format!("{m}m") }
}

/// Rounds half away from zero and drops the fraction. Non-finite input renders as 0.
pub fn round_display(value: f64) -> i64 {
    if value.is_finite() { value.round() as i64 } else { 0 }
}

/// Shortens `text` to at most `max_chars` characters, ending with an ellipsis
/// when anything was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}
