use dioxus::prelude::*;

use crate::domain::entities::notice::NoticeKind;
use crate::ui::state::app_state::{dismiss_toast, Toast};

fn accent(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "#52c41a",
        NoticeKind::Info => "#1677ff",
        NoticeKind::Warning => "#faad14",
        NoticeKind::Error => "#ff4d4f",
    }
}

#[component]
pub fn ToastStack(mut toasts: Signal<Vec<Toast>>) -> Element {
    let list = toasts.read().clone();
    rsx! {
        div {
            style: "position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 2000; width: 320px;",
            for toast in list {
                div {
                    key: "{toast.id}",
                    style: "background: #fff; border-left: 4px solid {accent(toast.notice.kind)}; border-radius: 6px; padding: 10px 12px; box-shadow: 0 6px 16px rgba(0,0,0,0.12); display: flex; gap: 8px;",
                    div {
                        style: "flex: 1;",
                        div { style: "font-weight: 600;", "{toast.notice.title}" }
                        if let Some(description) = toast.notice.description.clone() {
                            div { style: "color: #555;", "{description}" }
                        }
                    }
                    button {
                        style: "border: none; background: transparent; cursor: pointer; color: #888;",
                        onclick: move |_| dismiss_toast(&mut toasts.write(), toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
