use chrono::{DateTime, NaiveDate, Utc};

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}

/// Today's local date according to the browser clock
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Current instant from the browser clock
pub fn now_utc() -> DateTime<Utc> {
    let millis = js_sys::Date::now() as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Parse the value of an `<input type="date">` (YYYY-MM-DD)
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Value for an `<input type="date">`
pub fn date_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date for display (e.g., "March 8, 2025")
pub fn format_date_for_display(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

/// Local wall-clock time of an instant, e.g. "19:03"
pub fn format_time_of_day(instant: DateTime<Utc>) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(instant.timestamp_millis() as f64));
    format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("2025-03-08"), NaiveDate::from_ymd_opt(2025, 3, 8));
        assert_eq!(parse_date_input(" 2025-12-31 "), NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(parse_date_input("2025-13-01"), None);
        assert_eq!(parse_date_input(""), None);
    }

    #[wasm_bindgen_test]
    fn test_format_date_for_display() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 8).unwrap();
        assert_eq!(format_date_for_display(date), "March 8, 2025");
        assert_eq!(date_input_value(date), "2025-03-08");
    }

    #[wasm_bindgen_test]
    fn test_today_round_trips_through_input_value() {
        let today = today();
        assert_eq!(parse_date_input(&date_input_value(today)), Some(today));
    }
}
