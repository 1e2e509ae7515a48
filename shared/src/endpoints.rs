//! Backend paths used by the attendance screens.

use chrono::NaiveDate;

use crate::PeriodId;

pub const ADMIN_ATTENDANCE_CODE: &str = "/api/admin/attendance/code";
pub const ADMIN_ATTENDANCE_STATUS: &str = "/api/admin/attendance/status";
pub const ADMIN_PERIODS: &str = "/api/admin/periods";
pub const CHECK_IN: &str = "/api/v1/attendance/check-in";
pub const TODAY_ATTENDANCE: &str = "/api/v1/attendance/today";
pub const MY_ATTENDANCE: &str = "/api/v1/members/me/attendance";

pub fn admin_attendance_by_date(date: NaiveDate) -> String {
    format!("/api/admin/attendance/{}", date.format("%Y-%m-%d"))
}

pub fn period_attendance(period_id: PeriodId) -> String {
    format!("{}/{}/attendance", ADMIN_PERIODS, period_id)
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_path_is_iso_formatted() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        assert_eq!(admin_attendance_by_date(date), "/api/admin/attendance/2025-04-05");
    }

    #[test]
    fn test_period_path() {
        assert_eq!(period_attendance(17), "/api/admin/periods/17/attendance");
    }

    #[test]
    fn test_url_join() {
        assert_eq!(url("http://localhost:8080", CHECK_IN), "http://localhost:8080/api/v1/attendance/check-in");
        assert_eq!(url("https://club.example/", TODAY_ATTENDANCE), "https://club.example/api/v1/attendance/today");
    }
}
