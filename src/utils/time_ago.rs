use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = MINUTE * 60;
const DAY: i64 = HOUR * 24;
const WEEK: i64 = DAY * 7;
const MONTH: i64 = DAY * 30;
const YEAR: i64 = DAY * 365;

/// Parses the `created_at` strings the content backend returns.
///
/// Accepts RFC 3339, the space separated form Postgres emits (with or without
/// an offset, offsets may omit minutes) and bare dates. Values without an
/// offset are read as UTC. Anything else yields `None`.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let with_t = value.replacen(' ', "T", 1);
    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_t) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative label for `instant` as seen from `now`, e.g. `5 minutes ago`.
pub fn relative_label(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(instant).num_seconds();
    let suffix = if delta < 0 { "from now" } else { "ago" };
    let seconds = delta.abs();

    let (value, unit) = if seconds < MINUTE {
        (seconds, "second")
    } else if seconds < HOUR {
        (rounded_div(seconds, MINUTE), "minute")
    } else if seconds < DAY {
        (rounded_div(seconds, HOUR), "hour")
    } else if seconds < WEEK {
        (rounded_div(seconds, DAY), "day")
    } else if seconds < MONTH {
        (rounded_div(seconds, WEEK), "week")
    } else if seconds < YEAR {
        (rounded_div(seconds, MONTH), "month")
    } else {
        (rounded_div(seconds, YEAR), "year")
    };

    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} {suffix}")
}

fn rounded_div(value: i64, unit: i64) -> i64 {
    (value + unit / 2) / unit
}
