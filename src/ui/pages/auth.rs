use dioxus::prelude::*;

use crate::app::Services;
use crate::domain::entities::auth::Route;
use crate::domain::entities::notice::Notice;
use crate::ui::components::form_modal::TextField;
use crate::ui::state::app_state::AppState;

const CARD_STYLE: &str = "width: 360px; margin: 80px auto; background: #fff; border-radius: 10px; padding: 28px; box-shadow: 0 10px 30px rgba(0,0,0,0.12); display: flex; flex-direction: column; gap: 12px;";
const SUBMIT_STYLE: &str = "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 8px 14px; border-radius: 6px; cursor: pointer;";
const LINK_STYLE: &str = "border: none; background: transparent; color: #1677ff; cursor: pointer; padding: 0;";

#[component]
fn AuthLinks(first: Route, second: Route) -> Element {
    let mut app_state = use_context::<AppState>();
    rsx! {
        div {
            style: "display: flex; justify-content: space-between;",
            button { style: LINK_STYLE, onclick: move |_| app_state.navigate(first), "{first.label()}" }
            button { style: LINK_STYLE, onclick: move |_| app_state.navigate(second), "{second.label()}" }
        }
    }
}

#[component]
pub fn LoginPage() -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |_: MouseEvent| {
        let auth = services.auth.clone();
        busy.set(true);
        spawn(async move {
            if let Ok(user) = auth.login(&email(), &password()).await {
                app_state.signed_in(user);
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: CARD_STYLE,
            h2 { style: "margin: 0;", "Sign in" }
            TextField { label: "Email".to_string(), value: email(), error: None, on_input: move |v| email.set(v) }
            TextField {
                label: "Password".to_string(),
                value: password(),
                error: None,
                kind: "password".to_string(),
                on_input: move |v| password.set(v),
            }
            button { style: SUBMIT_STYLE, disabled: busy(), onclick: submit, "Sign in" }
            span { style: "color: #888; font-size: 12px;", "Emails containing \"admin\" sign in with the admin role." }
            AuthLinks { first: Route::Register, second: Route::ResetPassword }
        }
    }
}

#[component]
pub fn RegisterPage() -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<AppState>();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let mismatch = !confirm.read().is_empty() && *confirm.read() != *password.read();
    let confirm_error = mismatch.then(|| "Passwords do not match".to_string());

    let submit = move |_: MouseEvent| {
        if confirm() != password() {
            services.notifier.notify(Notice::warning("Passwords do not match"));
            return;
        }
        let auth = services.auth.clone();
        busy.set(true);
        spawn(async move {
            if let Ok(user) = auth.register(&name(), &email(), &password()).await {
                app_state.signed_in(user);
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: CARD_STYLE,
            h2 { style: "margin: 0;", "Create account" }
            TextField { label: "Name".to_string(), value: name(), error: None, on_input: move |v| name.set(v) }
            TextField { label: "Email".to_string(), value: email(), error: None, on_input: move |v| email.set(v) }
            TextField {
                label: "Password".to_string(),
                value: password(),
                error: None,
                kind: "password".to_string(),
                on_input: move |v| password.set(v),
            }
            TextField {
                label: "Confirm password".to_string(),
                value: confirm(),
                error: confirm_error,
                kind: "password".to_string(),
                on_input: move |v| confirm.set(v),
            }
            button { style: SUBMIT_STYLE, disabled: busy(), onclick: submit, "Register" }
            AuthLinks { first: Route::Login, second: Route::ResetPassword }
        }
    }
}

#[component]
pub fn ResetPasswordPage() -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut token = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut link_sent = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let auth = services.auth.clone();
    let request = move |_: MouseEvent| {
        let auth = auth.clone();
        busy.set(true);
        spawn(async move {
            if auth.request_password_reset(&email()).await.is_ok() {
                link_sent.set(true);
            }
            busy.set(false);
        });
    };
    let auth = services.auth.clone();
    let reset = move |_: MouseEvent| {
        let auth = auth.clone();
        busy.set(true);
        spawn(async move {
            if auth.reset_password(&token(), &password()).await.is_ok() {
                app_state.navigate(Route::Login);
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            style: CARD_STYLE,
            h2 { style: "margin: 0;", "Reset password" }
            if link_sent() {
                TextField { label: "Reset token".to_string(), value: token(), error: None, on_input: move |v| token.set(v) }
                TextField {
                    label: "New password".to_string(),
                    value: password(),
                    error: None,
                    kind: "password".to_string(),
                    on_input: move |v| password.set(v),
                }
                button { style: SUBMIT_STYLE, disabled: busy(), onclick: reset, "Reset password" }
            } else {
                TextField { label: "Email".to_string(), value: email(), error: None, on_input: move |v| email.set(v) }
                button { style: SUBMIT_STYLE, disabled: busy(), onclick: request, "Send reset link" }
            }
            AuthLinks { first: Route::Login, second: Route::Register }
        }
    }
}
