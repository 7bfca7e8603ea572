pub mod access_gate;
pub mod form_mapping;
pub mod form_publisher;
pub mod http_helpers;
pub mod identity;
pub mod question_source;
pub mod quiz_compiler;
pub mod quiz_service;
pub mod sheet_url;
pub mod sheets_client;
