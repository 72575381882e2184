use std::cell::RefCell;

use async_trait::async_trait;

use crate::domain::entities::auth::{has_permission, Permission, Session, SessionUser};
use crate::usecase::ports::api::{Ack, ApiError, ApiResult};

#[async_trait(?Send)]
pub trait AuthApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<Ack<Session>>;
    async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<Ack<Session>>;
    async fn request_password_reset(&self, email: &str) -> ApiResult<Ack<()>>;
    async fn reset_password(&self, token: &str, password: &str) -> ApiResult<Ack<()>>;
}

/// Session holder handed to every service that needs the caller's identity.
#[derive(Debug, Default)]
pub struct AuthContext {
    session: RefCell<Option<Session>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RefCell::new(Some(session)),
        }
    }

    pub fn sign_in(&self, session: Session) {
        tracing::info!(user = %session.user.email, role = session.user.role.as_str(), "signed in");
        *self.session.borrow_mut() = Some(session);
    }

    pub fn sign_out(&self) {
        if let Some(session) = self.session.borrow_mut().take() {
            tracing::info!(user = %session.user.email, "signed out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn update_user(&self, update: impl FnOnce(&mut SessionUser)) {
        if let Some(session) = self.session.borrow_mut().as_mut() {
            update(&mut session.user);
        }
    }

    /// Fails with `Unauthorized` without a session and `Forbidden` when the
    /// session's role lacks `permission`.
    pub fn authorize(&self, permission: Option<Permission>) -> ApiResult<SessionUser> {
        let user = self.user().ok_or_else(ApiError::unauthorized)?;
        match permission {
            Some(permission) if !has_permission(user.role, permission) => {
                tracing::warn!(user = %user.email, ?permission, "permission denied");
                Err(ApiError::forbidden())
            }
            _ => Ok(user),
        }
    }
}
