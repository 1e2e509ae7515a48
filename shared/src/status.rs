use crate::{FinalStatus, PeriodMemberAttendanceSummary, RoundStatus};

/// Combine the two round statuses of a day into its final status.
///
/// An unset round counts as `Present`. When either round carries a status this
/// client does not recognize, the backend's own final status is used, and
/// `Unrecorded` when the backend sent none.
pub fn derive_final_status(
    round1: Option<RoundStatus>,
    round2: Option<RoundStatus>,
    reported: Option<FinalStatus>,
) -> FinalStatus {
    use RoundStatus::{Absent, Present};

    match (round1.unwrap_or(Present), round2.unwrap_or(Present)) {
        (Present, Present) => FinalStatus::Present,
        (Present, Absent) => FinalStatus::EarlyLeave,
        (Absent, Present) => FinalStatus::Late,
        (Absent, Absent) => FinalStatus::Absent,
        _ => reported.unwrap_or(FinalStatus::Unrecorded),
    }
}

/// Highest attendance rate first. Equal rates keep their incoming order.
pub fn sort_by_attendance_rate(summaries: &mut [PeriodMemberAttendanceSummary]) {
    summaries.sort_by(|a, b| b.attendance_rate.total_cmp(&a.attendance_rate));
}
