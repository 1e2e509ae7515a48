use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod board;
pub mod check_in;
pub mod config;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod issuer;
pub mod status;

pub use board::{PendingChange, PeriodQuery, StatusBoard, StatusChangeError, ViewMode};
pub use check_in::{CheckIn, CheckInError, CheckInPhase, CodeInput, CODE_LENGTH};
pub use config::AttendanceConfig;
pub use envelope::ApiEnvelope;
pub use error::ApiError;
pub use issuer::{ActiveCode, CodeIssuer, Countdown, CycleOutcome, IssuerError, IssuerPhase};
pub use status::{derive_final_status, sort_by_attendance_rate};

/// Member identifier as issued by the backend
pub type MemberId = i64;

/// Membership period identifier as issued by the backend
pub type PeriodId = i64;

/// One of the two daily check-in windows. Serialized as the integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    First,
    Second,
}

impl Round {
    pub const ALL: [Round; 2] = [Round::First, Round::Second];

    pub fn number(self) -> u8 {
        match self {
            Round::First => 1,
            Round::Second => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Round::First => "Round 1",
            Round::Second => "Round 2",
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = RoundError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::First),
            2 => Ok(Round::Second),
            other => Err(RoundError(other)),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> Self {
        round.number()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid round {0}, expected 1 or 2")]
pub struct RoundError(pub u8);

/// Recorded state of a single round for one member on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    Present,
    Absent,
    /// Any status string this client does not know about
    #[serde(other)]
    Unrecognized,
}

impl RoundStatus {
    pub fn label(self) -> &'static str {
        match self {
            RoundStatus::Present => "Present",
            RoundStatus::Absent => "Absent",
            RoundStatus::Unrecognized => "Unknown",
        }
    }

    /// Statuses an admin is allowed to set
    pub fn is_settable(self) -> bool {
        matches!(self, RoundStatus::Present | RoundStatus::Absent)
    }
}

/// Status derived from both rounds of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalStatus {
    Present,
    Late,
    EarlyLeave,
    Absent,
    #[serde(other)]
    Unrecorded,
}

impl FinalStatus {
    pub fn label(self) -> &'static str {
        match self {
            FinalStatus::Present => "Present",
            FinalStatus::Late => "Late",
            FinalStatus::EarlyLeave => "Early leave",
            FinalStatus::Absent => "Absent",
            FinalStatus::Unrecorded => "Unrecorded",
        }
    }

    /// CSS modifier used by the attendance tables
    pub fn css_class(self) -> &'static str {
        match self {
            FinalStatus::Present => "status present",
            FinalStatus::Late => "status late",
            FinalStatus::EarlyLeave => "status early-leave",
            FinalStatus::Absent => "status absent",
            FinalStatus::Unrecorded => "status unrecorded",
        }
    }
}

/// Label for a round cell, including the unset case
pub fn round_status_label(status: Option<RoundStatus>) -> &'static str {
    status.map(RoundStatus::label).unwrap_or("Not recorded")
}

/// Request body for generating an attendance code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    pub round: Round,
}

/// Code returned by the backend after generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub code: String,
    /// Seconds until the code expires, counted from issuance
    pub expires_in: u32,
}

/// Request body for redeeming an attendance code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub code: String,
}

/// Today's round statuses for the signed-in member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendance {
    #[serde(default)]
    pub round1_status: Option<RoundStatus>,
    #[serde(default)]
    pub round2_status: Option<RoundStatus>,
}

impl TodayAttendance {
    pub fn final_status(&self) -> FinalStatus {
        derive_final_status(self.round1_status, self.round2_status, None)
    }

    pub fn round_status(&self, round: Round) -> Option<RoundStatus> {
        match round {
            Round::First => self.round1_status,
            Round::Second => self.round2_status,
        }
    }
}

/// One member's attendance on one date, as listed for admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceStatus {
    pub member_id: MemberId,
    #[serde(alias = "name")]
    pub member_name: String,
    #[serde(default)]
    pub round1_status: Option<RoundStatus>,
    #[serde(default)]
    pub round2_status: Option<RoundStatus>,
    /// Value computed by the backend, used only when the rounds are inconclusive
    #[serde(default)]
    pub final_status: Option<FinalStatus>,
}

impl DailyAttendanceStatus {
    pub fn final_status(&self) -> FinalStatus {
        derive_final_status(self.round1_status, self.round2_status, self.final_status)
    }

    pub fn round_status(&self, round: Round) -> Option<RoundStatus> {
        match round {
            Round::First => self.round1_status,
            Round::Second => self.round2_status,
        }
    }
}

/// Aggregated attendance of one member over a membership period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMemberAttendanceSummary {
    pub member_id: MemberId,
    #[serde(alias = "name")]
    pub member_name: String,
    pub total_exercise_days: u32,
    pub present_days: u32,
    pub late_days: u32,
    pub early_leave_days: u32,
    pub absent_days: u32,
    /// Percentage in the range 0.0..=100.0
    pub attendance_rate: f64,
}

impl PeriodMemberAttendanceSummary {
    pub fn recorded_days(&self) -> u32 {
        self.present_days
            .saturating_add(self.late_days)
            .saturating_add(self.early_leave_days)
            .saturating_add(self.absent_days)
    }

    /// The four counters never exceed the number of exercise days
    pub fn is_consistent(&self) -> bool {
        self.recorded_days() <= self.total_exercise_days
    }
}

/// Membership period offered in the admin period selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPeriod {
    pub id: PeriodId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Request body for correcting a round status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub round: Round,
    pub status: RoundStatus,
}

/// Summary counters shown above each period in a member's history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceSummary {
    pub total_exercise_days: u32,
    pub present_days: u32,
    pub late_days: u32,
    pub early_leave_days: u32,
    pub absent_days: u32,
    pub attendance_rate: f64,
}

/// One date inside a member's attendance history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub round1_status: Option<RoundStatus>,
    #[serde(default)]
    pub round2_status: Option<RoundStatus>,
    #[serde(default)]
    pub final_status: Option<FinalStatus>,
}

impl DailyAttendanceRecord {
    pub fn final_status(&self) -> FinalStatus {
        derive_final_status(self.round1_status, self.round2_status, self.final_status)
    }
}

/// A member's attendance for one membership period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodAttendanceHistory {
    pub period_id: PeriodId,
    pub period_name: String,
    #[serde(default)]
    pub summary: AttendanceSummary,
    #[serde(default)]
    pub records: Vec<DailyAttendanceRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_serializes_as_integer() {
        let request = GenerateCodeRequest { round: Round::Second };
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"round":2}"#);

        let parsed: GenerateCodeRequest = serde_json::from_str(r#"{"round":1}"#).unwrap();
        assert_eq!(parsed.round, Round::First);

        assert!(serde_json::from_str::<GenerateCodeRequest>(r#"{"round":3}"#).is_err());
    }

    #[test]
    fn test_generated_code_uses_camel_case() {
        let code: GeneratedCode =
            serde_json::from_str(r#"{"code":"042917","expiresIn":180}"#).unwrap();
        assert_eq!(code.code, "042917");
        assert_eq!(code.expires_in, 180);
    }

    #[test]
    fn test_daily_status_tolerates_missing_and_unknown_rounds() {
        let json = r#"[
            {"memberId": 7, "memberName": "Kim", "round1Status": "ABSENT"},
            {"memberId": 8, "name": "Lee", "round1Status": "EXCUSED", "round2Status": null, "finalStatus": "LATE"}
        ]"#;
        let rows: Vec<DailyAttendanceStatus> = serde_json::from_str(json).unwrap();

        assert_eq!(rows[0].round1_status, Some(RoundStatus::Absent));
        assert_eq!(rows[0].round2_status, None);
        assert_eq!(rows[0].final_status(), FinalStatus::Late);

        assert_eq!(rows[1].member_name, "Lee");
        assert_eq!(rows[1].round1_status, Some(RoundStatus::Unrecognized));
        assert_eq!(rows[1].final_status(), FinalStatus::Late);
    }

    #[test]
    fn test_status_update_request_body() {
        let request = StatusUpdateRequest {
            member_id: 12,
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            round: Round::First,
            status: RoundStatus::Absent,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"memberId": 12, "date": "2025-03-08", "round": 1, "status": "ABSENT"})
        );
    }

    #[test]
    fn test_period_summary_consistency() {
        let mut summary = PeriodMemberAttendanceSummary {
            member_id: 1,
            member_name: "Park".to_string(),
            total_exercise_days: 10,
            present_days: 6,
            late_days: 2,
            early_leave_days: 1,
            absent_days: 1,
            attendance_rate: 60.0,
        };
        assert!(summary.is_consistent());
        assert_eq!(summary.recorded_days(), 10);

        summary.absent_days = 2;
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_oversized_counters_do_not_overflow() {
        let summary = PeriodMemberAttendanceSummary {
            member_id: 2,
            member_name: "Lee".to_string(),
            total_exercise_days: 10,
            present_days: u32::MAX,
            late_days: 5,
            early_leave_days: 0,
            absent_days: 1,
            attendance_rate: 100.0,
        };
        assert_eq!(summary.recorded_days(), u32::MAX);
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_history_parses_grouped_periods() {
        let json = r#"[{
            "periodId": 3,
            "periodName": "Spring 2025",
            "summary": {"totalExerciseDays": 2, "presentDays": 1, "absentDays": 1, "attendanceRate": 50.0},
            "records": [
                {"date": "2025-03-01", "round1Status": "PRESENT", "round2Status": "PRESENT"},
                {"date": "2025-03-08", "round1Status": "ABSENT", "round2Status": "ABSENT"}
            ]
        }]"#;
        let history: Vec<PeriodAttendanceHistory> = serde_json::from_str(json).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].summary.late_days, 0);
        assert_eq!(history[0].records[0].final_status(), FinalStatus::Present);
        assert_eq!(history[0].records[1].final_status(), FinalStatus::Absent);
    }

    #[test]
    fn test_today_attendance_defaults_to_unset() {
        let today: TodayAttendance = serde_json::from_str("{}").unwrap();
        assert_eq!(today.round_status(Round::First), None);
        assert_eq!(today.final_status(), FinalStatus::Present);
    }
}
