use serde::{Deserialize, Serialize};

/// Timing and wording of the attendance screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceConfig {
    /// Countdown resolution for an issued code
    pub tick_interval_ms: u32,
    /// How long a successful check-in stays on screen before the input resets
    pub success_pause_ms: u32,
    /// Shown when a check-in fails without a server message
    pub check_in_fallback_message: String,
    /// Shown when code generation fails without a server message
    pub generate_fallback_message: String,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            success_pause_ms: 2000,
            check_in_fallback_message: "Check-in failed. Please check the code and try again."
                .to_string(),
            generate_fallback_message: "Could not generate an attendance code.".to_string(),
        }
    }
}
