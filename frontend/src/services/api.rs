use chrono::NaiveDate;
use gloo::net::http::{Request, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::endpoints;
use shared::{
    ApiEnvelope, ApiError, CheckInRequest, DailyAttendanceStatus, GenerateCodeRequest,
    GeneratedCode, MembershipPeriod, PeriodAttendanceHistory, PeriodId,
    PeriodMemberAttendanceSummary, Round, StatusUpdateRequest, TodayAttendance,
};
use yew::Callback;

use super::auth::AuthSession;
use super::config::ClientConfig;
use super::logging::Logger;

/// API client for communicating with the club backend.
///
/// Every request carries the current bearer token. A `401` from any endpoint
/// clears the session and fires `on_unauthorized` before the error is returned.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    session: AuthSession,
    on_unauthorized: Callback<()>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: AuthSession, on_unauthorized: Callback<()>) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            session,
            on_unauthorized,
        }
    }

    /// Generate a code for the given round
    pub async fn generate_code(&self, round: Round) -> Result<GeneratedCode, ApiError> {
        let request = self
            .authorized(Request::post(&self.url(endpoints::ADMIN_ATTENDANCE_CODE)))
            .json(&GenerateCodeRequest { round });
        self.fetch(request).await
    }

    /// End the currently active code
    pub async fn invalidate_code(&self) -> Result<(), ApiError> {
        let request = self
            .authorized(Request::delete(&self.url(endpoints::ADMIN_ATTENDANCE_CODE)))
            .build();
        self.acknowledge(request).await
    }

    /// Attendance rows of every member for one date
    pub async fn attendance_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<DailyAttendanceStatus>, ApiError> {
        let url = self.url(&endpoints::admin_attendance_by_date(date));
        let request = self.authorized(Request::get(&url)).build();
        self.fetch(request).await
    }

    /// Membership periods available for the period view
    pub async fn periods(&self) -> Result<Vec<MembershipPeriod>, ApiError> {
        let request = self
            .authorized(Request::get(&self.url(endpoints::ADMIN_PERIODS)))
            .build();
        self.fetch(request).await
    }

    /// Per-member summaries for one membership period
    pub async fn period_attendance(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<PeriodMemberAttendanceSummary>, ApiError> {
        let url = self.url(&endpoints::period_attendance(period_id));
        let request = self.authorized(Request::get(&url)).build();
        self.fetch(request).await
    }

    /// Correct one round status for one member
    pub async fn update_status(&self, update: &StatusUpdateRequest) -> Result<(), ApiError> {
        let request = self
            .authorized(Request::put(&self.url(endpoints::ADMIN_ATTENDANCE_STATUS)))
            .json(update);
        self.acknowledge(request).await
    }

    /// Redeem an attendance code as the signed-in member
    pub async fn check_in(&self, code: &str) -> Result<(), ApiError> {
        let request = self
            .authorized(Request::post(&self.url(endpoints::CHECK_IN)))
            .json(&CheckInRequest {
                code: code.to_string(),
            });
        self.acknowledge(request).await
    }

    /// Today's round statuses of the signed-in member
    pub async fn today_attendance(&self) -> Result<TodayAttendance, ApiError> {
        let request = self
            .authorized(Request::get(&self.url(endpoints::TODAY_ATTENDANCE)))
            .build();
        self.fetch(request).await
    }

    /// Attendance history of the signed-in member, grouped by period
    pub async fn my_attendance(&self) -> Result<Vec<PeriodAttendanceHistory>, ApiError> {
        let request = self
            .authorized(Request::get(&self.url(endpoints::MY_ATTENDANCE)))
            .build();
        self.fetch(request).await
    }

    fn url(&self, path: &str) -> String {
        endpoints::url(&self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => builder.header("Authorization", &bearer),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo::net::Error>,
    ) -> Result<T, ApiError> {
        let (status, envelope) = self.send::<T>(request).await?;
        envelope.into_result(status)
    }

    async fn acknowledge(
        &self,
        request: Result<Request, gloo::net::Error>,
    ) -> Result<(), ApiError> {
        let (status, envelope) = self.send::<IgnoredAny>(request).await?;
        envelope.into_ack(status)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo::net::Error>,
    ) -> Result<(u16, ApiEnvelope<T>), ApiError> {
        let request = request.map_err(|e| ApiError::Network(format!("Failed to build request: {}", e)))?;
        let method = request.method();
        let url = request.url();

        let response = request.send().await.map_err(|e| {
            Logger::error_with_component("api-client", &format!("{:?} {} failed: {}", method, url, e));
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let ok = response.ok();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        if !ok {
            Logger::warn_with_component("api-client", &format!("{:?} {} returned {}", method, url, status));
            return Err(self.intercept(ApiError::from_response(status, &body)));
        }

        let envelope = serde_json::from_str::<ApiEnvelope<T>>(&body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))?;
        Ok((status, envelope))
    }

    fn intercept(&self, error: ApiError) -> ApiError {
        if error.is_unauthorized() {
            Logger::warn_with_component("api-client", "Received 401, signing out");
            self.session.clear();
            self.on_unauthorized.emit(());
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::Identity;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    fn client(signed_out: Rc<Cell<u32>>) -> ApiClient {
        let config = ClientConfig {
            token_storage_key: "api-test.accessToken".to_string(),
            identity_storage_key: "api-test.member".to_string(),
            ..ClientConfig::default()
        };
        let session = AuthSession::new(&config);
        let on_unauthorized = Callback::from(move |_| signed_out.set(signed_out.get() + 1));
        ApiClient::new(&config, session, on_unauthorized)
    }

    #[wasm_bindgen_test]
    fn test_unauthorized_clears_session() {
        let signed_out = Rc::new(Cell::new(0));
        let client = client(signed_out.clone());
        let identity = Identity { name: "Park".to_string() };
        client.session.sign_in("token-1", &identity).unwrap();

        let error = client.intercept(ApiError::from_response(401, ""));

        assert!(error.is_unauthorized());
        assert!(!client.session.is_signed_in());
        assert_eq!(client.session.identity(), None);
        assert_eq!(signed_out.get(), 1);
    }

    #[wasm_bindgen_test]
    fn test_other_errors_keep_session() {
        let signed_out = Rc::new(Cell::new(0));
        let client = client(signed_out.clone());
        let identity = Identity { name: "Choi".to_string() };
        client.session.sign_in("token-2", &identity).unwrap();

        let error = client.intercept(ApiError::from_response(
            400,
            r#"{"isSuccess":false,"message":"Invalid or expired code"}"#,
        ));

        assert_eq!(error.user_message(), "Invalid or expired code");
        assert!(client.session.is_signed_in());
        assert_eq!(signed_out.get(), 0);
        client.session.clear();
    }

    #[wasm_bindgen_test]
    fn test_requests_carry_bearer_token() {
        let client = client(Rc::new(Cell::new(0)));
        let identity = Identity { name: "Jung".to_string() };
        client.session.sign_in("token-3", &identity).unwrap();

        let request = client
            .authorized(Request::get(&client.url(endpoints::TODAY_ATTENDANCE)))
            .build()
            .unwrap();

        assert_eq!(request.headers().get("Authorization"), Some("Bearer token-3".to_string()));
        assert!(request.url().ends_with("/api/v1/attendance/today"));
        client.session.clear();
    }
}
