use async_trait::async_trait;

use crate::{auth::Claims, errors::AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user_email(&self) -> AppResult<String>;
}

/// Identity established by the OAuth callback and carried in the session.
pub struct SessionIdentity {
    claims: Claims,
}

impl SessionIdentity {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user_email(&self) -> AppResult<String> {
        Ok(self.claims.email.clone())
    }
}
