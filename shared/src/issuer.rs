//! Admin side of the attendance code lifecycle.
//!
//! `CodeIssuer` is a plain state machine. The caller asks it whether a request
//! may be sent (`begin_generate`, `begin_invalidate`), performs the request,
//! and reports the outcome back (`complete_*` / `fail_*`). Nothing here talks
//! to the network or owns a timer.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::{GeneratedCode, Round};

/// Whole-second countdown for an issued code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn start(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Advance by one second. Returns the new remaining value, or `None` when
    /// the countdown had already reached zero.
    pub fn tick(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.remaining)
    }

    /// `m:ss`
    pub fn display(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

/// Client copy of the code currently accepted by the backend
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCode {
    pub code: String,
    pub round: Round,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub countdown: Countdown,
}

impl ActiveCode {
    pub fn new(generated: GeneratedCode, round: Round, issued_at: DateTime<Utc>) -> Self {
        Self {
            code: generated.code,
            round,
            issued_at,
            expires_at: issued_at + Duration::seconds(i64::from(generated.expires_in)),
            countdown: Countdown::start(generated.expires_in),
        }
    }

    pub fn digits(&self) -> Vec<char> {
        self.code.chars().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssuerPhase {
    #[default]
    Idle,
    Generating,
    Displaying,
    Invalidating,
}

/// How the previous code went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Invalidated,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuerError {
    #[error("Select a round first")]
    NoRoundSelected,
    #[error("An attendance code is already active")]
    CodeAlreadyActive,
    #[error("A request is already in progress")]
    RequestInFlight,
    #[error("There is no active attendance code")]
    NoActiveCode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeIssuer {
    selected_round: Option<Round>,
    phase: IssuerPhase,
    active: Option<ActiveCode>,
    confirming_end: bool,
    last_outcome: Option<CycleOutcome>,
    error: Option<String>,
    cycle: u64,
}

impl CodeIssuer {
    pub fn phase(&self) -> IssuerPhase {
        self.phase
    }

    pub fn selected_round(&self) -> Option<Round> {
        self.selected_round
    }

    pub fn active_code(&self) -> Option<&ActiveCode> {
        self.active.as_ref()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.active.as_ref().map(|active| active.countdown.remaining())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    pub fn is_confirming_end(&self) -> bool {
        self.confirming_end
    }

    /// Incremented for every code that reaches the display state
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn can_select_round(&self) -> bool {
        self.phase == IssuerPhase::Idle
    }

    pub fn can_generate(&self) -> bool {
        self.generate_request().is_ok()
    }

    pub fn can_end(&self) -> bool {
        self.phase == IssuerPhase::Displaying && self.active.is_some()
    }

    /// The countdown is live and the page should warn before unloading.
    pub fn is_counting(&self) -> bool {
        matches!(self.phase, IssuerPhase::Displaying | IssuerPhase::Invalidating)
            && self
                .active
                .as_ref()
                .is_some_and(|active| !active.countdown.is_finished())
    }

    pub fn select_round(&mut self, round: Round) -> Result<(), IssuerError> {
        match self.phase {
            IssuerPhase::Idle => {
                self.selected_round = Some(round);
                self.error = None;
                Ok(())
            }
            IssuerPhase::Generating => Err(IssuerError::RequestInFlight),
            IssuerPhase::Displaying | IssuerPhase::Invalidating => {
                Err(IssuerError::CodeAlreadyActive)
            }
        }
    }

    /// Check whether a generate request may be sent, without changing state.
    pub fn generate_request(&self) -> Result<Round, IssuerError> {
        match self.phase {
            IssuerPhase::Generating => Err(IssuerError::RequestInFlight),
            IssuerPhase::Displaying | IssuerPhase::Invalidating => {
                Err(IssuerError::CodeAlreadyActive)
            }
            IssuerPhase::Idle => self.selected_round.ok_or(IssuerError::NoRoundSelected),
        }
    }

    /// Enter `Generating` and return the round to request a code for.
    pub fn begin_generate(&mut self) -> Result<Round, IssuerError> {
        match self.generate_request() {
            Ok(round) => {
                self.phase = IssuerPhase::Generating;
                self.error = None;
                self.last_outcome = None;
                Ok(round)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Store the code returned by the backend. Ignored unless a generate
    /// request is outstanding.
    pub fn complete_generate(&mut self, generated: GeneratedCode, issued_at: DateTime<Utc>) -> bool {
        if self.phase != IssuerPhase::Generating {
            return false;
        }
        let Some(round) = self.selected_round else {
            self.phase = IssuerPhase::Idle;
            return false;
        };

        let active = ActiveCode::new(generated, round, issued_at);
        if active.countdown.is_finished() {
            self.phase = IssuerPhase::Idle;
            self.last_outcome = Some(CycleOutcome::Expired);
            return true;
        }

        self.active = Some(active);
        self.phase = IssuerPhase::Displaying;
        self.cycle += 1;
        true
    }

    pub fn fail_generate(&mut self, message: impl Into<String>) {
        if self.phase == IssuerPhase::Generating {
            self.phase = IssuerPhase::Idle;
            self.error = Some(message.into());
        }
    }

    /// One second elapsed. Returns the new remaining value while a code is
    /// counting down; at zero the code is dropped locally without asking the
    /// backend to invalidate it.
    pub fn tick(&mut self) -> Option<u32> {
        if !matches!(self.phase, IssuerPhase::Displaying | IssuerPhase::Invalidating) {
            return None;
        }
        let remaining = self.active.as_mut()?.countdown.tick()?;
        if remaining == 0 && self.phase == IssuerPhase::Displaying {
            self.expire();
        }
        Some(remaining)
    }

    /// Ask for confirmation before ending attendance.
    pub fn request_end(&mut self) -> Result<(), IssuerError> {
        if !self.can_end() {
            return Err(IssuerError::NoActiveCode);
        }
        self.confirming_end = true;
        Ok(())
    }

    pub fn cancel_end(&mut self) {
        self.confirming_end = false;
    }

    /// Enter `Invalidating`; the caller then sends the delete request.
    pub fn begin_invalidate(&mut self) -> Result<(), IssuerError> {
        self.confirming_end = false;
        match self.phase {
            IssuerPhase::Displaying if self.active.is_some() => {
                self.phase = IssuerPhase::Invalidating;
                self.error = None;
                Ok(())
            }
            IssuerPhase::Generating | IssuerPhase::Invalidating => {
                Err(IssuerError::RequestInFlight)
            }
            _ => Err(IssuerError::NoActiveCode),
        }
    }

    pub fn complete_invalidate(&mut self) {
        if self.phase != IssuerPhase::Invalidating {
            return;
        }
        self.active = None;
        self.phase = IssuerPhase::Idle;
        self.last_outcome = Some(CycleOutcome::Invalidated);
    }

    pub fn fail_invalidate(&mut self, message: impl Into<String>) {
        if self.phase != IssuerPhase::Invalidating {
            return;
        }
        self.error = Some(message.into());
        self.phase = IssuerPhase::Displaying;
        if self
            .active
            .as_ref()
            .is_some_and(|active| active.countdown.is_finished())
        {
            self.expire();
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn expire(&mut self) {
        self.active = None;
        self.confirming_end = false;
        self.phase = IssuerPhase::Idle;
        self.last_outcome = Some(CycleOutcome::Expired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 19, 0, 0).unwrap()
    }

    fn generated(expires_in: u32) -> GeneratedCode {
        GeneratedCode {
            code: "482019".to_string(),
            expires_in,
        }
    }

    fn displaying(expires_in: u32) -> CodeIssuer {
        let mut issuer = CodeIssuer::default();
        issuer.select_round(Round::First).unwrap();
        issuer.begin_generate().unwrap();
        assert!(issuer.complete_generate(generated(expires_in), issued_at()));
        issuer
    }

    #[test]
    fn test_countdown_runs_to_zero_and_stops() {
        let mut countdown = Countdown::start(3);
        let mut seen = vec![countdown.remaining()];
        while let Some(remaining) = countdown.tick() {
            seen.push(remaining);
        }

        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert!(countdown.is_finished());
        assert_eq!(countdown.tick(), None);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_countdown_display() {
        assert_eq!(Countdown::start(180).display(), "3:00");
        assert_eq!(Countdown::start(65).display(), "1:05");
        assert_eq!(Countdown::start(9).display(), "0:09");
    }

    #[test]
    fn test_generate_requires_round() {
        let mut issuer = CodeIssuer::default();
        assert_eq!(issuer.begin_generate(), Err(IssuerError::NoRoundSelected));
        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.error(), Some("Select a round first"));
    }

    #[test]
    fn test_generate_lifecycle() {
        let mut issuer = CodeIssuer::default();
        issuer.select_round(Round::Second).unwrap();
        assert_eq!(issuer.begin_generate(), Ok(Round::Second));
        assert_eq!(issuer.phase(), IssuerPhase::Generating);
        assert!(!issuer.can_select_round());

        assert!(issuer.complete_generate(generated(120), issued_at()));
        assert_eq!(issuer.phase(), IssuerPhase::Displaying);
        assert_eq!(issuer.cycle(), 1);

        let active = issuer.active_code().unwrap();
        assert_eq!(active.round, Round::Second);
        assert_eq!(active.digits(), vec!['4', '8', '2', '0', '1', '9']);
        assert_eq!(active.expires_at, issued_at() + Duration::seconds(120));
        assert!(issuer.is_counting());
    }

    #[test]
    fn test_second_generate_is_rejected_while_displaying() {
        let mut issuer = displaying(60);
        let before = issuer.active_code().cloned();

        assert_eq!(issuer.begin_generate(), Err(IssuerError::CodeAlreadyActive));
        assert!(!issuer.can_generate());
        assert_eq!(issuer.phase(), IssuerPhase::Displaying);
        assert_eq!(issuer.active_code().cloned(), before);
    }

    #[test]
    fn test_generate_rejected_while_in_flight() {
        let mut issuer = CodeIssuer::default();
        issuer.select_round(Round::First).unwrap();
        issuer.begin_generate().unwrap();

        assert_eq!(issuer.begin_generate(), Err(IssuerError::RequestInFlight));
        assert_eq!(issuer.select_round(Round::Second), Err(IssuerError::RequestInFlight));
    }

    #[test]
    fn test_generate_failure_returns_to_idle() {
        let mut issuer = CodeIssuer::default();
        issuer.select_round(Round::First).unwrap();
        issuer.begin_generate().unwrap();
        issuer.fail_generate("Code already active for round 1");

        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.error(), Some("Code already active for round 1"));
        assert!(issuer.active_code().is_none());
        assert!(issuer.can_generate());
    }

    #[test]
    fn test_stale_generate_response_is_ignored() {
        let mut issuer = CodeIssuer::default();
        assert!(!issuer.complete_generate(generated(60), issued_at()));
        assert!(issuer.active_code().is_none());
    }

    #[test]
    fn test_expiry_drops_code_without_invalidate() {
        let mut issuer = displaying(3);
        let mut seen = vec![issuer.remaining_seconds().unwrap()];
        while let Some(remaining) = issuer.tick() {
            seen.push(remaining);
        }

        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.last_outcome(), Some(CycleOutcome::Expired));
        assert!(issuer.active_code().is_none());
        assert!(!issuer.is_counting());
        assert_eq!(issuer.tick(), None);
        assert!(issuer.can_generate());
    }

    #[test]
    fn test_zero_lifetime_code_expires_immediately() {
        let mut issuer = CodeIssuer::default();
        issuer.select_round(Round::First).unwrap();
        issuer.begin_generate().unwrap();
        issuer.complete_generate(generated(0), issued_at());

        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.last_outcome(), Some(CycleOutcome::Expired));
    }

    #[test]
    fn test_end_requires_confirmation() {
        let mut issuer = displaying(60);
        issuer.request_end().unwrap();
        assert!(issuer.is_confirming_end());

        issuer.cancel_end();
        assert!(!issuer.is_confirming_end());
        assert_eq!(issuer.phase(), IssuerPhase::Displaying);

        issuer.request_end().unwrap();
        issuer.begin_invalidate().unwrap();
        assert!(!issuer.is_confirming_end());
        assert_eq!(issuer.phase(), IssuerPhase::Invalidating);
        assert!(issuer.is_counting());

        issuer.complete_invalidate();
        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.last_outcome(), Some(CycleOutcome::Invalidated));
        assert!(!issuer.is_counting());
    }

    #[test]
    fn test_end_without_code_is_rejected() {
        let mut issuer = CodeIssuer::default();
        assert_eq!(issuer.request_end(), Err(IssuerError::NoActiveCode));
        assert_eq!(issuer.begin_invalidate(), Err(IssuerError::NoActiveCode));
    }

    #[test]
    fn test_failed_invalidate_keeps_code() {
        let mut issuer = displaying(60);
        issuer.begin_invalidate().unwrap();
        assert_eq!(issuer.begin_invalidate(), Err(IssuerError::RequestInFlight));

        issuer.fail_invalidate("Server unavailable");
        assert_eq!(issuer.phase(), IssuerPhase::Displaying);
        assert_eq!(issuer.error(), Some("Server unavailable"));
        assert!(issuer.active_code().is_some());
    }

    #[test]
    fn test_failed_invalidate_after_countdown_ran_out_expires() {
        let mut issuer = displaying(1);
        issuer.begin_invalidate().unwrap();
        assert_eq!(issuer.tick(), Some(0));
        assert_eq!(issuer.phase(), IssuerPhase::Invalidating);

        issuer.fail_invalidate("timeout");
        assert_eq!(issuer.phase(), IssuerPhase::Idle);
        assert_eq!(issuer.last_outcome(), Some(CycleOutcome::Expired));
    }
}
