use chrono::{DateTime, TimeZone, Utc};

/// Whole days elapsed between `then` and `now`.
///
/// Partial days are truncated. Timestamps in the future count as 0.
pub fn days_since(then: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    now.signed_duration_since(*then).num_days().max(0)
}

/// Human label for a key's last use: "N/A", "today" or "N days ago"
pub fn last_used_human(last_used: Option<&DateTime<Utc>>, days: i64) -> String {
    match (last_used, days) {
        (None, _) => "N/A".to_string(),
        (Some(_), 0) => "today".to_string(),
        (Some(_), n) => format!("{} days ago", n),
    }
}

/// Format a time the way Unix `date` does.
///
/// chrono has no zone abbreviations, so the zone is "UTC" for a zero
/// offset and the numeric offset ("-04:00") otherwise.
pub fn unix_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let dt = dt.fixed_offset();
    let zone = if dt.offset().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        dt.format("%:z").to_string()
    };
    format!(
        "{} {} {}",
        dt.format("%a %b %e %H:%M:%S"),
        zone,
        dt.format("%Y")
    )
}
