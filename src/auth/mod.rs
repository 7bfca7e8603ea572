pub mod claims;
pub mod google_oauth;
pub mod jwt;
pub mod service_account;
pub mod session;

pub use claims::Claims;
pub use google_oauth::GoogleOAuthClient;
pub use jwt::JwtService;
pub use service_account::ServiceAccountTokenSource;
pub use session::AuthenticatedUser;
