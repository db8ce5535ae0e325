pub mod auth;
pub mod credentials;
pub mod domain;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod token_capture;
