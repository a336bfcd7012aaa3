//! Display formatting for amounts, durations, and sizes.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `$6,000` style amount, rounded to whole units.
pub fn money(value: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 { format!("-${grouped}") } else { format!("${grouped}") }
}

/// `2h 5m`.
pub fn hours_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Vehicle-card elapsed label: `45 min` under an hour, `2h 5m` after.
pub fn elapsed_label(minutes: i64) -> String {
    if minutes < 60 {
        format!("{} min", minutes.max(0))
    } else {
        hours_minutes(minutes)
    }
}

/// Backend-provided hours, trimmed of a useless `.0`.
pub fn hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}h")
    } else {
        format!("{value:.1}h")
    }
}

/// `812 B`, `12.4 KB`, `1.2 MB`.
pub fn bytes(len: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let len_f = len as f64;
    if len < 1024 {
        format!("{len} B")
    } else if len < 1024 * 1024 {
        format!("{:.1} KB", len_f / 1024.0)
    } else {
        format!("{:.1} MB", len_f / (1024.0 * 1024.0))
    }
}
