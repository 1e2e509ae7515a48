//! Admin attendance board: per-date rows or per-period summaries, plus the
//! staged status correction that must be confirmed before it is sent.

use chrono::NaiveDate;
use thiserror::Error;

use crate::status::sort_by_attendance_rate;
use crate::{
    round_status_label, DailyAttendanceStatus, MemberId, PeriodId, PeriodMemberAttendanceSummary,
    Round, RoundStatus, StatusUpdateRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ByDate(NaiveDate),
    /// `None` until the admin picks a period
    ByPeriod(Option<PeriodId>),
}

/// What selecting a period requires from the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodQuery {
    /// Nothing selected; the list is empty and no request is needed
    Empty,
    Fetch(PeriodId),
}

/// A status correction waiting for the admin's confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub member_id: MemberId,
    pub member_name: String,
    pub date: NaiveDate,
    pub round: Round,
    pub from: Option<RoundStatus>,
    pub to: RoundStatus,
}

impl PendingChange {
    /// e.g. `Round 1: Present → Absent`
    pub fn describe(&self) -> String {
        format!(
            "{}: {} → {}",
            self.round.label(),
            round_status_label(self.from),
            self.to.label()
        )
    }

    pub fn to_request(&self) -> StatusUpdateRequest {
        StatusUpdateRequest {
            member_id: self.member_id,
            date: self.date,
            round: self.round,
            status: self.to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusChangeError {
    #[error("Statuses can only be changed in the daily view")]
    NotInDateMode,
    #[error("Member {0} is not on this day's list")]
    MemberNotFound(MemberId),
    #[error("That status cannot be set")]
    UnsupportedStatus,
    #[error("The status is already {0}")]
    Unchanged(&'static str),
    #[error("Another change is still being saved")]
    ChangeInProgress,
    #[error("There is no change to confirm")]
    NoPendingChange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBoard {
    mode: ViewMode,
    daily: Vec<DailyAttendanceStatus>,
    period: Vec<PeriodMemberAttendanceSummary>,
    pending: Option<PendingChange>,
    loading: bool,
    saving: bool,
    error: Option<String>,
}

impl StatusBoard {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            mode: ViewMode::ByDate(date),
            daily: Vec::new(),
            period: Vec::new(),
            pending: None,
            loading: false,
            saving: false,
            error: None,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn daily(&self) -> &[DailyAttendanceStatus] {
        &self.daily
    }

    pub fn period(&self) -> &[PeriodMemberAttendanceSummary] {
        &self.period
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        match self.mode {
            ViewMode::ByDate(date) => Some(date),
            ViewMode::ByPeriod(_) => None,
        }
    }

    pub fn selected_period(&self) -> Option<PeriodId> {
        match self.mode {
            ViewMode::ByPeriod(period) => period,
            ViewMode::ByDate(_) => None,
        }
    }

    /// Switch to the daily view; the caller fetches `date` next.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.mode = ViewMode::ByDate(date);
        self.period.clear();
        self.pending = None;
        self.loading = true;
        self.error = None;
    }

    /// Switch to the period view.
    pub fn select_period(&mut self, period_id: Option<PeriodId>) -> PeriodQuery {
        self.mode = ViewMode::ByPeriod(period_id);
        self.daily.clear();
        self.pending = None;
        self.error = None;
        match period_id {
            Some(id) => {
                self.loading = true;
                PeriodQuery::Fetch(id)
            }
            None => {
                self.period.clear();
                self.loading = false;
                PeriodQuery::Empty
            }
        }
    }

    /// Store rows for `date`. Responses for a view that is no longer selected
    /// are dropped.
    pub fn apply_daily(&mut self, date: NaiveDate, rows: Vec<DailyAttendanceStatus>) -> bool {
        if self.mode != ViewMode::ByDate(date) {
            return false;
        }
        self.daily = rows;
        self.period.clear();
        self.loading = false;
        true
    }

    /// Store summaries for `period_id`, highest attendance rate first.
    pub fn apply_period(
        &mut self,
        period_id: PeriodId,
        mut rows: Vec<PeriodMemberAttendanceSummary>,
    ) -> bool {
        if self.mode != ViewMode::ByPeriod(Some(period_id)) {
            return false;
        }
        sort_by_attendance_rate(&mut rows);
        self.period = rows;
        self.daily.clear();
        self.loading = false;
        true
    }

    /// A load for `view` failed. Ignored when `view` is no longer selected.
    pub fn fail_load(&mut self, view: ViewMode, message: impl Into<String>) -> bool {
        if self.mode != view {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    /// Stage a change of one round for one member on the selected date.
    pub fn stage_change(
        &mut self,
        member_id: MemberId,
        round: Round,
        to: RoundStatus,
    ) -> Result<&PendingChange, StatusChangeError> {
        if self.saving {
            return Err(StatusChangeError::ChangeInProgress);
        }
        let ViewMode::ByDate(date) = self.mode else {
            return Err(StatusChangeError::NotInDateMode);
        };
        if !to.is_settable() {
            return Err(StatusChangeError::UnsupportedStatus);
        }
        let row = self
            .daily
            .iter()
            .find(|row| row.member_id == member_id)
            .ok_or(StatusChangeError::MemberNotFound(member_id))?;

        let from = row.round_status(round);
        if from == Some(to) {
            return Err(StatusChangeError::Unchanged(to.label()));
        }

        Ok(self.pending.insert(PendingChange {
            member_id,
            member_name: row.member_name.clone(),
            date,
            round,
            from,
            to,
        }))
    }

    pub fn cancel_change(&mut self) {
        self.pending = None;
    }

    /// Confirm the staged change and return the request to send.
    pub fn confirm_change(&mut self) -> Result<StatusUpdateRequest, StatusChangeError> {
        if self.saving {
            return Err(StatusChangeError::ChangeInProgress);
        }
        let pending = self.pending.take().ok_or(StatusChangeError::NoPendingChange)?;
        self.saving = true;
        self.error = None;
        Ok(pending.to_request())
    }

    /// The change made while `confirmed` was shown was stored. Returns the
    /// view to fetch again in full, or `None` when the admin has since moved
    /// to another view (which issued its own load) or the view needs no request.
    pub fn complete_change(&mut self, confirmed: ViewMode) -> Option<ViewMode> {
        self.saving = false;
        if self.mode != confirmed || self.mode == ViewMode::ByPeriod(None) {
            return None;
        }
        self.loading = true;
        Some(self.mode)
    }

    pub fn fail_change(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()
    }

    fn row(member_id: MemberId, round1: Option<RoundStatus>) -> DailyAttendanceStatus {
        DailyAttendanceStatus {
            member_id,
            member_name: format!("member-{}", member_id),
            round1_status: round1,
            round2_status: Some(RoundStatus::Present),
            final_status: None,
        }
    }

    fn summary(member_id: MemberId, attendance_rate: f64) -> PeriodMemberAttendanceSummary {
        PeriodMemberAttendanceSummary {
            member_id,
            member_name: format!("member-{}", member_id),
            total_exercise_days: 10,
            present_days: 5,
            late_days: 0,
            early_leave_days: 0,
            absent_days: 5,
            attendance_rate,
        }
    }

    fn board_with_rows() -> StatusBoard {
        let mut board = StatusBoard::new(date());
        board.select_date(date());
        assert!(board.apply_daily(date(), vec![row(1, None), row(2, Some(RoundStatus::Absent))]));
        board
    }

    #[test]
    fn test_date_view_clears_period_list() {
        let mut board = StatusBoard::new(date());
        assert_eq!(board.select_period(Some(4)), PeriodQuery::Fetch(4));
        assert!(board.apply_period(4, vec![summary(1, 50.0)]));
        assert_eq!(board.period().len(), 1);

        board.select_date(date());
        assert!(board.period().is_empty());
        assert!(board.is_loading());
        assert!(board.apply_daily(date(), vec![row(1, None)]));
        assert!(board.period().is_empty());
        assert_eq!(board.daily().len(), 1);
        assert!(!board.is_loading());
    }

    #[test]
    fn test_period_view_clears_daily_list() {
        let mut board = board_with_rows();
        assert_eq!(board.select_period(Some(9)), PeriodQuery::Fetch(9));
        assert!(board.daily().is_empty());

        assert!(board.apply_period(9, vec![summary(1, 40.0), summary(2, 95.5), summary(3, 70.0)]));
        assert!(board.daily().is_empty());
        let rates: Vec<f64> = board.period().iter().map(|s| s.attendance_rate).collect();
        assert_eq!(rates, vec![95.5, 70.0, 40.0]);
    }

    #[test]
    fn test_no_period_selected_needs_no_request() {
        let mut board = StatusBoard::new(date());
        board.select_period(Some(2));
        board.apply_period(2, vec![summary(1, 10.0)]);

        assert_eq!(board.select_period(None), PeriodQuery::Empty);
        assert!(board.period().is_empty());
        assert!(!board.is_loading());
        assert_eq!(board.selected_period(), None);
    }

    #[test]
    fn test_stale_responses_are_dropped() {
        let mut board = StatusBoard::new(date());
        board.select_period(Some(3));
        board.select_date(date());

        assert!(!board.apply_period(3, vec![summary(1, 10.0)]));
        assert!(board.period().is_empty());

        let other_day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert!(!board.apply_daily(other_day, vec![row(1, None)]));
        assert!(board.daily().is_empty());
    }

    #[test]
    fn test_change_is_staged_until_confirmed() {
        let mut board = board_with_rows();
        let pending = board.stage_change(1, Round::First, RoundStatus::Absent).unwrap();
        assert_eq!(pending.describe(), "Round 1: Not recorded → Absent");
        assert_eq!(pending.member_name, "member-1");

        let request = board.confirm_change().unwrap();
        assert_eq!(
            request,
            StatusUpdateRequest {
                member_id: 1,
                date: date(),
                round: Round::First,
                status: RoundStatus::Absent,
            }
        );
        assert!(board.pending().is_none());
        assert!(board.is_saving());
        assert_eq!(
            board.stage_change(2, Round::First, RoundStatus::Present).unwrap_err(),
            StatusChangeError::ChangeInProgress
        );

        assert_eq!(board.complete_change(ViewMode::ByDate(date())), Some(ViewMode::ByDate(date())));
        assert!(!board.is_saving());
        assert!(board.is_loading());
        assert!(board.apply_daily(date(), vec![row(1, Some(RoundStatus::Absent))]));
        assert!(!board.is_loading());
    }

    #[test]
    fn test_saved_change_after_date_switch_does_not_hang_loading() {
        let mut board = board_with_rows();
        board.stage_change(1, Round::First, RoundStatus::Absent).unwrap();
        board.confirm_change().unwrap();

        let next_day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        board.select_date(next_day);
        assert!(board.apply_daily(next_day, vec![row(3, None)]));

        assert_eq!(board.complete_change(ViewMode::ByDate(date())), None);
        assert!(!board.is_saving());
        assert!(!board.is_loading());

        // A refetch of the old date that still arrives is dropped
        assert!(!board.apply_daily(date(), vec![row(1, None)]));
        assert!(!board.is_loading());
        assert_eq!(board.daily()[0].member_id, 3);
    }

    #[test]
    fn test_saved_change_with_no_period_selected_needs_no_refetch() {
        let mut board = board_with_rows();
        board.stage_change(1, Round::First, RoundStatus::Absent).unwrap();
        board.confirm_change().unwrap();
        board.select_period(None);

        assert_eq!(board.complete_change(ViewMode::ByDate(date())), None);
        assert_eq!(board.mode(), ViewMode::ByPeriod(None));
        assert!(!board.is_loading());
        assert!(!board.is_saving());
    }

    #[test]
    fn test_stale_load_failure_is_ignored() {
        let mut board = StatusBoard::new(date());
        board.select_date(date());
        board.select_period(Some(5));

        assert!(!board.fail_load(ViewMode::ByDate(date()), "Server unavailable"));
        assert_eq!(board.error(), None);
        assert!(board.is_loading());

        assert!(board.fail_load(ViewMode::ByPeriod(Some(5)), "Server unavailable"));
        assert_eq!(board.error(), Some("Server unavailable"));
        assert!(!board.is_loading());
    }

    #[test]
    fn test_cancelled_change_sends_nothing() {
        let mut board = board_with_rows();
        board.stage_change(2, Round::First, RoundStatus::Present).unwrap();
        board.cancel_change();

        assert_eq!(board.confirm_change(), Err(StatusChangeError::NoPendingChange));
        assert!(!board.is_saving());
    }

    #[test]
    fn test_invalid_changes_are_rejected() {
        let mut board = board_with_rows();
        assert_eq!(
            board.stage_change(2, Round::First, RoundStatus::Absent).unwrap_err(),
            StatusChangeError::Unchanged("Absent")
        );
        assert_eq!(
            board.stage_change(99, Round::First, RoundStatus::Absent).unwrap_err(),
            StatusChangeError::MemberNotFound(99)
        );
        assert_eq!(
            board.stage_change(1, Round::First, RoundStatus::Unrecognized).unwrap_err(),
            StatusChangeError::UnsupportedStatus
        );

        board.select_period(None);
        assert_eq!(
            board.stage_change(1, Round::First, RoundStatus::Absent).unwrap_err(),
            StatusChangeError::NotInDateMode
        );
    }

    #[test]
    fn test_failed_change_keeps_rows() {
        let mut board = board_with_rows();
        board.stage_change(1, Round::Second, RoundStatus::Absent).unwrap();
        board.confirm_change().unwrap();
        board.fail_change("Member is not active in this period");

        assert!(!board.is_saving());
        assert_eq!(board.error(), Some("Member is not active in this period"));
        assert_eq!(board.daily().len(), 2);
    }
}
