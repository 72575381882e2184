use dioxus::prelude::*;

use crate::app::Services;
use crate::domain::entities::auth::{has_permission, Permission};
use crate::domain::entities::notice::Notice;
use crate::ui::components::form_modal::TextField;
use crate::ui::state::app_state::AppState;

const CARD_STYLE: &str = "background: #fff; border: 1px solid #e5e5e5; border-radius: 8px; padding: 20px; display: flex; flex-direction: column; gap: 12px; max-width: 480px;";
const SAVE_STYLE: &str = "align-self: flex-start; border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;";

#[component]
pub fn ProfilePage() -> Element {
    let services = use_context::<Services>();
    let mut app_state = use_context::<AppState>();
    let mut name = use_signal(|| {
        app_state
            .user
            .read()
            .as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_default()
    });
    let Some(user) = app_state.user.read().clone() else {
        return rsx! {};
    };

    let save = move |_: MouseEvent| {
        if let Ok(updated) = services.auth.update_profile(&name()) {
            app_state.user.set(Some(updated));
        }
    };

    rsx! {
        div {
            style: CARD_STYLE,
            h3 { style: "margin: 0;", "Profile" }
            TextField { label: "Name".to_string(), value: name(), error: None, on_input: move |v| name.set(v) }
            div { span { style: "color: #888;", "Email: " } "{user.email}" }
            div { span { style: "color: #888;", "Role: " } "{user.role.as_str()}" }
            button { style: SAVE_STYLE, onclick: save, "Save" }
        }
    }
}

#[component]
pub fn SettingsPage() -> Element {
    let services = use_context::<Services>();
    let app_state = use_context::<AppState>();
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);

    let can_change_password = app_state
        .user
        .read()
        .as_ref()
        .is_some_and(|user| has_permission(user.role, Permission::ChangePassword));
    let config = services.config.clone();
    let store = config
        .store_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "in memory".to_string());

    let change_password = move |_: MouseEvent| {
        if password() != confirm() {
            services.notifier.notify(Notice::warning("Passwords do not match"));
            return;
        }
        let auth = services.auth.clone();
        let token = auth.context().token().unwrap_or_default();
        spawn(async move {
            if auth.reset_password(&token, &password()).await.is_ok() {
                password.set(String::new());
                confirm.set(String::new());
            }
        });
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 16px;",
            div {
                style: CARD_STYLE,
                h3 { style: "margin: 0;", "Application" }
                div { span { style: "color: #888;", "Name: " } "{config.web_name}" }
                div { span { style: "color: #888;", "Rows per page: " } "{config.per_page}" }
                div { span { style: "color: #888;", "Store: " } "{store}" }
            }
            if can_change_password {
                div {
                    style: CARD_STYLE,
                    h3 { style: "margin: 0;", "Change password" }
                    TextField {
                        label: "New password".to_string(),
                        value: password(),
                        error: None,
                        kind: "password".to_string(),
                        on_input: move |v| password.set(v),
                    }
                    TextField {
                        label: "Confirm password".to_string(),
                        value: confirm(),
                        error: None,
                        kind: "password".to_string(),
                        on_input: move |v| confirm.set(v),
                    }
                    button { style: SAVE_STYLE, onclick: change_password, "Update password" }
                }
            }
        }
    }
}
