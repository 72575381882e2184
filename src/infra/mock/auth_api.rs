use std::cell::Cell;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::auth::{Role, Session, SessionUser};
use crate::usecase::ports::api::{Ack, ApiError, ApiResult};
use crate::usecase::ports::auth::AuthApi;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Development auth service: any credentials are accepted.
#[derive(Debug, Default)]
pub struct MockAuthApi {
    seq: Cell<u64>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_token(&self) -> String {
        let seq = self.seq.get() + 1;
        self.seq.set(seq);
        format!("mock_token_{}_{seq}", Utc::now().timestamp_millis())
    }
}

/// `"jane.doe@x"` becomes `"Jane.doe"`.
fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn check_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[async_trait(?Send)]
impl AuthApi for MockAuthApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<Ack<Session>> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let role = if email.contains("admin") {
            Role::Admin
        } else {
            Role::User
        };
        let session = Session {
            user: SessionUser {
                id: "1".to_string(),
                name: display_name(email),
                email: email.to_string(),
                role,
            },
            token: self.issue_token(),
        };
        Ok(Ack::new(session, "Login successful"))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<Ack<Session>> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::validation("All fields are required"));
        }
        check_password(password)?;

        let session = Session {
            user: SessionUser {
                id: Utc::now().timestamp_millis().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role: Role::User,
            },
            token: self.issue_token(),
        };
        Ok(Ack::new(session, "Registration successful"))
    }

    async fn request_password_reset(&self, email: &str) -> ApiResult<Ack<()>> {
        if email.trim().is_empty() {
            return Err(ApiError::validation("Email is required"));
        }
        Ok(Ack::new((), "Password reset link sent to your email"))
    }

    async fn reset_password(&self, token: &str, password: &str) -> ApiResult<Ack<()>> {
        if token.trim().is_empty() {
            return Err(ApiError::validation("Invalid or expired reset token"));
        }
        check_password(password)?;
        Ok(Ack::new((), "Password has been reset successfully"))
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::usecase::ports::api::ApiErrorKind;

    #[test]
    fn login_derives_name_and_role_from_email() {
        let api = MockAuthApi::new();
        let ack = block_on(api.login("admin.jo@example.com", "secret")).expect("login");
        assert_eq!(ack.data.user.name, "Admin.jo");
        assert_eq!(ack.data.user.role, Role::Admin);
        assert!(ack.data.token.starts_with("mock_token_"));

        let ack = block_on(api.login("mia@example.com", "x")).expect("login");
        assert_eq!(ack.data.user.role, Role::User);
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let api = MockAuthApi::new();
        let first = block_on(api.login("a@b.c", "pw")).expect("login").data.token;
        let second = block_on(api.login("a@b.c", "pw")).expect("login").data.token;
        assert_ne!(first, second);
    }

    #[test]
    fn login_requires_credentials() {
        let err = block_on(MockAuthApi::new().login("", "pw")).expect_err("missing email");
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message.as_deref(), Some("Email and password are required"));
    }

    #[test]
    fn register_enforces_password_length() {
        let err = block_on(MockAuthApi::new().register("Ann", "ann@x.io", "12345"))
            .expect_err("short password");
        assert_eq!(
            err.message.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn reset_password_requires_token() {
        let api = MockAuthApi::new();
        assert!(block_on(api.reset_password("", "secret1")).is_err());
        assert!(block_on(api.reset_password("tok", "secret1")).is_ok());
        assert!(block_on(api.request_password_reset("  ")).is_err());
    }
}
