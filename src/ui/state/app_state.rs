use dioxus::prelude::*;

use crate::domain::entities::auth::{can_access_route, Route, SessionUser};
use crate::domain::entities::notice::Notice;

pub const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Appends a toast, dropping the oldest ones beyond `MAX_TOASTS`.
pub fn push_toast(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > MAX_TOASTS {
        let overflow = toasts.len() - MAX_TOASTS;
        toasts.drain(..overflow);
    }
}

pub fn dismiss_toast(toasts: &mut Vec<Toast>, id: u64) {
    toasts.retain(|toast| toast.id != id);
}

/// The route actually shown for `requested`: guests are sent to the login
/// screen, signed-in users away from the auth screens and from pages their
/// role cannot open.
pub fn resolve_route(user: Option<&SessionUser>, requested: Route) -> Route {
    match user {
        None if requested.is_public() => requested,
        None => Route::Login,
        Some(_) if requested.is_public() => Route::Dashboard,
        Some(user) if can_access_route(user.role, requested) => requested,
        Some(_) => Route::Dashboard,
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub route: Signal<Route>,
    pub user: Signal<Option<SessionUser>>,
    pub toasts: Signal<Vec<Toast>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: use_signal(|| Route::Login),
            user: use_signal(|| None::<SessionUser>),
            toasts: use_signal(Vec::<Toast>::new),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        let current = self.user.read().clone();
        let target = resolve_route(current.as_ref(), route);
        if target != route {
            tracing::debug!(requested = route.path(), shown = target.path(), "route redirected");
        }
        self.route.set(target);
    }

    pub fn signed_in(&mut self, user: SessionUser) {
        self.user.set(Some(user));
        self.route.set(Route::Dashboard);
    }

    pub fn signed_out(&mut self) {
        self.user.set(None);
        self.route.set(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::auth::Role;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: "1".to_string(),
            name: "Mia".to_string(),
            email: "mia@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn guests_only_reach_public_routes() {
        assert_eq!(resolve_route(None, Route::Register), Route::Register);
        assert_eq!(resolve_route(None, Route::Users), Route::Login);
    }

    #[test]
    fn signed_in_users_skip_auth_screens() {
        assert_eq!(resolve_route(Some(&user(Role::User)), Route::Login), Route::Dashboard);
    }

    #[test]
    fn missing_permission_falls_back_to_dashboard() {
        assert_eq!(resolve_route(Some(&user(Role::User)), Route::Users), Route::Dashboard);
        assert_eq!(resolve_route(Some(&user(Role::Admin)), Route::Users), Route::Users);
    }

    #[test]
    fn toast_stack_keeps_latest() {
        let mut toasts = Vec::new();
        for id in 0..6 {
            push_toast(&mut toasts, Toast { id, notice: Notice::info("x") });
        }
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts[0].id, 2);

        dismiss_toast(&mut toasts, 3);
        assert!(toasts.iter().all(|toast| toast.id != 3));
    }
}
