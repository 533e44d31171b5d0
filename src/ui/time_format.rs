use chrono::{DateTime, Duration, TimeZone};
use chrono_humanize::HumanTime;

/// Format a thread's last activity for the list, relative to `now`.
/// - <5min: humanized ("now", "2 minutes ago")
/// - Today: "9:39 PM"
/// - Yesterday: "Yesterday, 9:39 PM"
/// - Older: "6/16/25, 8:30 AM"
pub fn format_last_activity<Tz: TimeZone>(at: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let at = at.with_timezone(&now.timezone());
    let since = now.clone().signed_duration_since(at.clone());
    if since < Duration::minutes(5) {
        HumanTime::from(-since).to_string()
    } else if at.date_naive() == now.date_naive() {
        at.format("%-I:%M %p").to_string()
    } else if at.date_naive() == (now.clone() - Duration::days(1)).date_naive() {
        format!("Yesterday, {}", at.format("%-I:%M %p"))
    } else {
        at.format("%-m/%-d/%y, %-I:%M %p").to_string()
    }
}
