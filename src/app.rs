use std::rc::Rc;

use anyhow::Context;
use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::domain::entities::auth::Route;
use crate::infra::mock::auth_api::MockAuthApi;
use crate::infra::sqlite::store::{today, SqliteStore};
use crate::ui::components::layout::{Header, Sidebar};
use crate::ui::components::toast_stack::ToastStack;
use crate::ui::notifications::ToastNotifier;
use crate::ui::pages::account::{ProfilePage, SettingsPage};
use crate::ui::pages::auth::{LoginPage, RegisterPage, ResetPasswordPage};
use crate::ui::pages::dashboard::DashboardPage;
use crate::ui::pages::products::ProductsPage;
use crate::ui::pages::users::UsersPage;
use crate::ui::state::app_state::{resolve_route, AppState};
use crate::usecase::ports::auth::AuthContext;
use crate::usecase::ports::notifier::Notifier;
use crate::usecase::services::auth_service::AuthService;

/// Long-lived services shared with every page through context.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<AppConfig>,
    pub store: Rc<SqliteStore>,
    pub auth: Rc<AuthService>,
    pub notifier: Rc<dyn Notifier>,
}

impl Services {
    pub fn bootstrap(config: AppConfig, notifier: Rc<dyn Notifier>) -> anyhow::Result<Self> {
        let store = SqliteStore::open(config.store_path.as_deref(), today())
            .context("failed to open the backing store")?;
        let auth = AuthService::new(
            Rc::new(MockAuthApi::new()),
            Rc::new(AuthContext::new()),
            notifier.clone(),
        );
        Ok(Self {
            config: Rc::new(config),
            store: Rc::new(store),
            auth: Rc::new(auth),
            notifier,
        })
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.store, &other.store)
            && Rc::ptr_eq(&self.auth, &other.auth)
            && Rc::ptr_eq(&self.notifier, &other.notifier)
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let state = AppState::new();
    use_context_provider(|| state);

    let services = use_hook(|| {
        let notifier: Rc<dyn Notifier> = Rc::new(ToastNotifier::new(state.toasts));
        Services::bootstrap(config.clone(), notifier).map_err(|err| {
            tracing::error!(error = %format!("{err:#}"), "startup failed");
            format!("{err:#}")
        })
    });

    match services {
        Ok(services) => rsx! { Shell { services } },
        Err(message) => rsx! {
            div {
                style: "padding: 24px;",
                h3 { "Unable to start {config.web_name}" }
                p { "{message}" }
            }
        },
    }
}

#[component]
fn Shell(services: Services) -> Element {
    use_context_provider(|| services.clone());
    let mut state = use_context::<AppState>();
    let user = state.user.read().clone();
    let route = resolve_route(user.as_ref(), (state.route)());

    let page = match route {
        Route::Login => rsx! { LoginPage {} },
        Route::Register => rsx! { RegisterPage {} },
        Route::ResetPassword => rsx! { ResetPasswordPage {} },
        Route::Dashboard => rsx! { DashboardPage {} },
        Route::Users => rsx! { UsersPage {} },
        Route::Products => rsx! { ProductsPage {} },
        Route::Profile => rsx! { ProfilePage {} },
        Route::Settings => rsx! { SettingsPage {} },
    };

    let Some(user) = user else {
        return rsx! {
            div { style: "min-height: 100vh; background: #f0f2f5; padding: 1px;", {page} }
            ToastStack { toasts: state.toasts }
        };
    };

    let auth = services.auth.clone();
    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: sans-serif;",
            Sidebar {
                web_name: services.config.web_name.clone(),
                user: user.clone(),
                current: route,
                on_navigate: move |target| state.navigate(target),
            }
            div {
                style: "flex: 1; display: flex; flex-direction: column; background: #f0f2f5; min-width: 0;",
                Header {
                    title: route.label().to_string(),
                    user,
                    on_logout: move |_| {
                        auth.logout();
                        state.signed_out();
                    },
                }
                main { style: "flex: 1; padding: 16px; overflow: auto;", {page} }
            }
        }
        ToastStack { toasts: state.toasts }
    }
}
