pub mod app_config;
pub mod auth_config;
pub mod sheets_config;
