pub mod api;
pub mod auth;
pub mod config;
pub mod date_utils;
pub mod logging;
