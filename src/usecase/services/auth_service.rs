use std::rc::Rc;

use crate::domain::entities::auth::SessionUser;
use crate::domain::entities::notice::Notice;
use crate::usecase::ports::api::{ApiError, ApiResult};
use crate::usecase::ports::auth::{AuthApi, AuthContext};
use crate::usecase::ports::notifier::Notifier;

/// Drives the sign-in screens: calls the auth service, keeps the shared
/// `AuthContext` in sync and reports the outcome as a notice.
pub struct AuthService {
    api: Rc<dyn AuthApi>,
    context: Rc<AuthContext>,
    notifier: Rc<dyn Notifier>,
}

impl AuthService {
    pub fn new(api: Rc<dyn AuthApi>, context: Rc<AuthContext>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            api,
            context,
            notifier,
        }
    }

    pub fn context(&self) -> &Rc<AuthContext> {
        &self.context
    }

    fn report_failure(&self, fallback: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{fallback}");
        self.notifier.notify(Notice::error(err.message_or(fallback)));
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<SessionUser> {
        match self.api.login(email, password).await {
            Ok(ack) => {
                let message = ack.message_or("Login successful");
                let user = ack.data.user.clone();
                self.context.sign_in(ack.data);
                self.notifier.notify(Notice::success(message));
                Ok(user)
            }
            Err(err) => {
                self.report_failure("Login failed", &err);
                Err(err)
            }
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> ApiResult<SessionUser> {
        match self.api.register(name, email, password).await {
            Ok(ack) => {
                let message = ack.message_or("Registration successful");
                let user = ack.data.user.clone();
                self.context.sign_in(ack.data);
                self.notifier.notify(Notice::success(message));
                Ok(user)
            }
            Err(err) => {
                self.report_failure("Registration failed", &err);
                Err(err)
            }
        }
    }

    pub async fn request_password_reset(&self, email: &str) -> ApiResult<()> {
        match self.api.request_password_reset(email).await {
            Ok(ack) => {
                self.notifier
                    .notify(Notice::success(ack.message_or("Password reset link sent")));
                Ok(())
            }
            Err(err) => {
                self.report_failure("Failed to send reset link", &err);
                Err(err)
            }
        }
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> ApiResult<()> {
        match self.api.reset_password(token, password).await {
            Ok(ack) => {
                self.notifier
                    .notify(Notice::success(ack.message_or("Password has been reset")));
                Ok(())
            }
            Err(err) => {
                self.report_failure("Failed to reset password", &err);
                Err(err)
            }
        }
    }

    pub fn update_profile(&self, name: &str) -> ApiResult<SessionUser> {
        self.context.authorize(None)?;
        let name = name.trim();
        if name.is_empty() {
            let err = ApiError::validation("Please enter your name");
            self.report_failure("Failed to update profile", &err);
            return Err(err);
        }
        self.context.update_user(|user| user.name = name.to_string());
        self.notifier
            .notify(Notice::success("Profile updated successfully"));
        self.context.authorize(None)
    }

    pub fn logout(&self) {
        self.context.sign_out();
        self.notifier.notify(Notice::info("You have been logged out"));
    }
}
