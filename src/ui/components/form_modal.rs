use dioxus::prelude::*;

use crate::usecase::ports::options::SelectOption;

const FIELD_STYLE: &str = "border: 1px solid #bbb; border-radius: 6px; padding: 6px 8px; width: 100%; box-sizing: border-box;";

#[component]
pub fn FormModal(
    title: String,
    open: bool,
    busy: bool,
    on_ok: EventHandler<()>,
    on_cancel: EventHandler<()>,
    children: Element,
) -> Element {
    if !open {
        return rsx! {};
    }
    let ok_label = if busy { "Saving..." } else { "OK" };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1500;",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "background: #fff; border-radius: 10px; width: 480px; max-height: 85vh; overflow-y: auto; padding: 20px; box-shadow: 0 16px 40px rgba(0,0,0,0.25);",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin: 0 0 16px;", "{title}" }
                div { style: "display: flex; flex-direction: column; gap: 12px;", {children} }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px; margin-top: 20px;",
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        style: "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        disabled: busy,
                        onclick: move |_| on_ok.call(()),
                        "{ok_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn FieldShell(label: String, error: Option<String>, children: Element) -> Element {
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px;",
            span { style: "font-weight: 500;", "{label}" }
            {children}
            if let Some(error) = error {
                span { style: "color: #ff4d4f; font-size: 12px;", "{error}" }
            }
        }
    }
}

#[component]
pub fn TextField(
    label: String,
    value: String,
    error: Option<String>,
    #[props(default = "text".to_string())] kind: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        FieldShell {
            label,
            error,
            input {
                style: FIELD_STYLE,
                r#type: "{kind}",
                value: "{value}",
                oninput: move |event| on_input.call(event.value()),
            }
        }
    }
}

#[component]
pub fn TextAreaField(label: String, value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        FieldShell {
            label,
            error: None,
            textarea {
                style: "{FIELD_STYLE} min-height: 72px;",
                value: "{value}",
                oninput: move |event| on_input.call(event.value()),
            }
        }
    }
}

#[component]
pub fn SelectField(
    label: String,
    value: String,
    options: Vec<SelectOption>,
    error: Option<String>,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        FieldShell {
            label,
            error,
            select {
                style: FIELD_STYLE,
                value: "{value}",
                onchange: move |event| on_change.call(event.value()),
                option { value: "", disabled: true, selected: value.is_empty(), "Select..." }
                for option in options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: option.value == value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}
