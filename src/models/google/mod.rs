pub mod forms;
pub mod oauth;
pub mod sheets;
