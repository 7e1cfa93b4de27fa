//! Trait abstraction for the auth client to enable mocking in tests

use async_trait::async_trait;

use super::client::{AuthClient, AuthError, ServerReply};

/// Trait for auth service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClientTrait: Send + Sync {
    /// Ask the service to send a password-reset email
    async fn request_password_reset(&self, email: &str) -> Result<ServerReply, AuthError>;
}

#[async_trait]
impl AuthClientTrait for AuthClient {
    async fn request_password_reset(&self, email: &str) -> Result<ServerReply, AuthError> {
        AuthClient::request_password_reset(self, email).await
    }
}
