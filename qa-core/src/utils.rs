// ABOUTME: Display helpers shared by the admin panel and the CLI
// ABOUTME: Formats question timestamps as d/m/yyyy HH:MM in a configured timezone

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;

/// Offset between the Gregorian and Buddhist (Thai solar) calendars
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Format `ts` as `d/m/yyyy HH:MM` in `tz`. Day and month are not padded.
pub fn format_date(ts: DateTime<Utc>, tz: Tz, buddhist_era: bool) -> String {
    let local = ts.with_timezone(&tz);
    let year = if buddhist_era {
        local.year() + BUDDHIST_ERA_OFFSET
    } else {
        local.year()
    };
    format!(
        "{}/{}/{} {:02}:{:02}",
        local.day(),
        local.month(),
        year,
        local.hour(),
        local.minute()
    )
}
