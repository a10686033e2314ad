// Clock and duration display helpers

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

pub fn fmt_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn fmt_time_short<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%H:%M").to_string()
}

pub fn fmt_hrs_mins(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:2}h {:2}m", hours, minutes)
}

pub fn fmt_days_hrs_mins_short(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    if days > 0 {
        format!("{:2}d {:2}h", days, hours)
    } else if hours > 0 {
        format!("{:2}h {:2}m", hours, minutes)
    } else {
        format!("{:2}m", minutes)
    }
}
