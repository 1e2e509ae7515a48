use shared::AttendanceConfig;

use super::logging::LogLevel;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Client-wide settings, fixed at build time
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin, overridable with `CLUB_API_BASE_URL`
    pub api_base_url: String,
    /// Local storage key of the raw bearer token
    pub token_storage_key: String,
    /// Local storage key of the signed-in member's identity
    pub identity_storage_key: String,
    pub log_level: LogLevel,
    pub attendance: AttendanceConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("CLUB_API_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            token_storage_key: "accessToken".to_string(),
            identity_storage_key: "member".to_string(),
            log_level: LogLevel::from_build_env(),
            attendance: AttendanceConfig::default(),
        }
    }
}
