use chrono::{DateTime, FixedOffset, NaiveDate};
use js_sys::Date;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn now_ms() -> f64 {
    Date::now()
}

/// "3:05" style call duration
pub fn format_duration(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// "just now", "4 min ago", "2 h ago", else the date
pub fn format_relative(timestamp: &DateTime<FixedOffset>, now_ms: f64) -> String {
    let elapsed_secs = ((now_ms / 1000.0) as i64 - timestamp.timestamp()).max(0);
    match elapsed_secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{} min ago", elapsed_secs / 60),
        3600..=86_399 => format!("{} h ago", elapsed_secs / 3600),
        _ => timestamp.format("%b %-d").to_string(),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// "+12.5%" / "-3.0%" for period-over-period changes
pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(185), "3:05");
        assert_eq!(format_duration(3_725), "1:02:05");
    }

    #[wasm_bindgen_test]
    fn test_format_relative() {
        let ts = DateTime::parse_from_rfc3339("2026-10-17T10:00:00Z").unwrap();
        let base = ts.timestamp() as f64 * 1000.0;
        assert_eq!(format_relative(&ts, base + 5_000.0), "just now");
        assert_eq!(format_relative(&ts, base + 240_000.0), "4 min ago");
        assert_eq!(format_relative(&ts, base + 7_200_000.0), "2 h ago");
        assert_eq!(format_relative(&ts, base + 172_800_000.0), "Oct 17");
    }

    #[wasm_bindgen_test]
    fn test_format_change() {
        assert_eq!(format_change(12.54), "+12.5%");
        assert_eq!(format_change(-3.0), "-3.0%");
    }

    #[wasm_bindgen_test]
    fn test_today_is_valid() {
        assert!(today().year_ce().1 >= 2024);
    }
}
