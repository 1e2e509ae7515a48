pub mod admin_page;
pub mod attendance_board;
pub mod check_in_panel;
pub mod code_input;
pub mod code_issuer_panel;
pub mod confirm_modal;
pub mod daily_status_table;
pub mod header;
pub mod member_history;
pub mod member_page;
pub mod period_summary_table;
pub mod sign_in;
pub mod today_status;
