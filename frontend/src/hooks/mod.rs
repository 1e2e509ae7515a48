pub mod use_attendance_board;
pub mod use_check_in;
pub mod use_code_issuer;
pub mod use_leave_guard;
pub mod use_member_attendance;
pub mod use_timer;
