/// Render elapsed seconds as a zero-padded `HH:MM:SS` duration.
///
/// Hours are not wrapped at 24, so a day-long session reads `24:00:00`
/// rather than rolling back to midnight.
pub fn format_hms(elapsed_secs: u64) -> String {
    let hours = elapsed_secs / 3600;
    let minutes = (elapsed_secs % 3600) / 60;
    let seconds = elapsed_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// First two characters of the email's local part, upper-cased
pub fn initials(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or_default()
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Whole minutes for a session, rounding halves up
pub fn rounded_minutes(duration_secs: u64) -> u64 {
    duration_secs / 60 + u64::from(duration_secs % 60 >= 30)
}
