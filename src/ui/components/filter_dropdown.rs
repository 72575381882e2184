use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::domain::entities::search::{SearchOperator, CONDITION_OPERATORS};
use crate::ui::filters::descriptor::{ColumnFilter, DateMode, FilterKind};
use crate::ui::filters::dropdown::{Advanced, FilterDropdown};
use crate::usecase::ports::options::{load_options, SelectOption};

const PANEL_STYLE: &str = "position: absolute; top: 100%; left: 0; min-width: 220px; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200; padding: 8px; display: flex; flex-direction: column; gap: 8px;";
const INPUT_STYLE: &str = "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; width: 100%; box-sizing: border-box;";
const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const PRIMARY_BUTTON_STYLE: &str = "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Filter icon in a column header plus its dropdown panel.
#[component]
pub fn ColumnFilterButton(filter: ColumnFilter) -> Element {
    let mut dropdown = use_signal(|| FilterDropdown::new(filter.clone()));
    let is_open = dropdown.read().is_open();
    let active = !dropdown.read().selected_keys().is_empty();
    let icon = filter.filter_icon().unwrap_or_default();
    let icon_color = if active { "#1677ff" } else { "#888" };

    rsx! {
        span {
            style: "position: relative; display: inline-block; margin-left: 6px;",
            button {
                style: "border: none; background: transparent; cursor: pointer; color: {icon_color};",
                onclick: move |event| {
                    event.stop_propagation();
                    let mut dropdown = dropdown.write();
                    if dropdown.is_open() {
                        dropdown.close();
                    } else {
                        dropdown.open();
                    }
                },
                "{icon}"
            }
            if is_open {
                div {
                    style: PANEL_STYLE,
                    onclick: move |event| event.stop_propagation(),
                    FilterControl { dropdown }
                    div {
                        style: "display: flex; justify-content: flex-end; gap: 6px;",
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| dropdown.write().close(),
                            "Close"
                        }
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| dropdown.write().reset(),
                            "Reset"
                        }
                        button {
                            style: PRIMARY_BUTTON_STYLE,
                            onclick: move |_| {
                                dropdown.write().search();
                            },
                            "Search"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FilterControl(dropdown: Signal<FilterDropdown>) -> Element {
    let filter = dropdown.read().filter().clone();
    let placeholder = filter.placeholder_text().unwrap_or("Search...").to_string();

    match filter.kind() {
        FilterKind::Input => rsx! { TextControl { dropdown, placeholder } },
        FilterKind::Select { options } => rsx! {
            OptionList { dropdown, options: options.clone() }
        },
        FilterKind::AsyncSelect { .. } => rsx! { AsyncOptionList { dropdown, placeholder } },
        FilterKind::NumberRange {
            min_placeholder,
            max_placeholder,
        } => rsx! {
            NumberRangeControl {
                dropdown,
                min_placeholder: min_placeholder.clone().unwrap_or_else(|| "Min".to_string()),
                max_placeholder: max_placeholder.clone().unwrap_or_else(|| "Max".to_string()),
            }
        },
        FilterKind::DateTime { mode: DateMode::Single } => rsx! { SingleDateControl { dropdown } },
        FilterKind::DateTime { mode: DateMode::Range } => rsx! { DateRangeControl { dropdown } },
        FilterKind::NumberRangeAdvanced => rsx! { AdvancedNumberControl { dropdown } },
        FilterKind::DateTimeAdvanced => rsx! { AdvancedDateControl { dropdown } },
    }
}

#[component]
fn TextControl(mut dropdown: Signal<FilterDropdown>, placeholder: String) -> Element {
    let text = dropdown.read().text().to_string();
    rsx! {
        input {
            style: INPUT_STYLE,
            placeholder: "{placeholder}",
            value: "{text}",
            oninput: move |event| dropdown.write().set_text(event.value()),
            onkeydown: move |event| {
                if event.key() == Key::Enter {
                    dropdown.write().search();
                }
            },
        }
    }
}

#[component]
fn OptionList(mut dropdown: Signal<FilterDropdown>, options: Vec<SelectOption>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; max-height: 240px; overflow-y: auto;",
            {options.into_iter().map(|option| {
                let chosen = dropdown.read().is_chosen(&option.value);
                let background = if chosen { "#eef4ff" } else { "transparent" };
                let value = option.value.clone();
                rsx! {
                    div {
                        key: "{option.value}",
                        style: "padding: 6px 8px; cursor: pointer; border-radius: 4px; background: {background};",
                        onclick: move |_| dropdown.write().choose(&value),
                        "{option.label}"
                    }
                }
            })}
        }
    }
}

#[component]
fn AsyncOptionList(dropdown: Signal<FilterDropdown>, placeholder: String) -> Element {
    let mut keyword = use_signal(String::new);
    let options = use_resource(move || {
        let loader = match dropdown.peek().filter().kind() {
            FilterKind::AsyncSelect { loader } => Some(loader.clone()),
            _ => None,
        };
        let keyword = keyword();
        async move {
            match loader {
                Some(loader) => load_options(loader.as_ref(), &keyword).await,
                None => Vec::new(),
            }
        }
    });

    let loaded = options.cloned();
    rsx! {
        input {
            style: INPUT_STYLE,
            placeholder: "{placeholder}",
            value: "{keyword}",
            oninput: move |event| keyword.set(event.value()),
        }
        {match loaded {
            None => rsx! { span { style: "color: #888;", "Loading..." } },
            Some(list) if list.is_empty() => rsx! { span { style: "color: #888;", "No options" } },
            Some(list) => rsx! { OptionList { dropdown, options: list } },
        }}
    }
}

#[component]
fn NumberRangeControl(
    mut dropdown: Signal<FilterDropdown>,
    min_placeholder: String,
    max_placeholder: String,
) -> Element {
    let (min, max) = dropdown.read().number_range();
    rsx! {
        div {
            style: "display: flex; gap: 6px; align-items: center;",
            input {
                style: INPUT_STYLE,
                r#type: "number",
                placeholder: "{min_placeholder}",
                value: "{show(min)}",
                oninput: move |event| {
                    let (_, max) = dropdown.read().number_range();
                    dropdown.write().set_number_range(parse_number(&event.value()), max);
                },
            }
            span { "~" }
            input {
                style: INPUT_STYLE,
                r#type: "number",
                placeholder: "{max_placeholder}",
                value: "{show(max)}",
                oninput: move |event| {
                    let (min, _) = dropdown.read().number_range();
                    dropdown.write().set_number_range(min, parse_number(&event.value()));
                },
            }
        }
    }
}

#[component]
fn SingleDateControl(mut dropdown: Signal<FilterDropdown>) -> Element {
    let date = dropdown.read().date();
    rsx! {
        input {
            style: INPUT_STYLE,
            r#type: "date",
            value: "{show(date)}",
            oninput: move |event| dropdown.write().set_date(parse_date(&event.value())),
        }
    }
}

#[component]
fn DateRangeControl(mut dropdown: Signal<FilterDropdown>) -> Element {
    let (from, to) = dropdown.read().date_range();
    rsx! {
        div {
            style: "display: flex; gap: 6px; align-items: center;",
            input {
                style: INPUT_STYLE,
                r#type: "date",
                value: "{show(from)}",
                oninput: move |event| {
                    let (_, to) = dropdown.read().date_range();
                    dropdown.write().set_date_range(parse_date(&event.value()), to);
                },
            }
            span { "~" }
            input {
                style: INPUT_STYLE,
                r#type: "date",
                value: "{show(to)}",
                oninput: move |event| {
                    let (from, _) = dropdown.read().date_range();
                    dropdown.write().set_date_range(from, parse_date(&event.value()));
                },
            }
        }
    }
}

#[component]
fn ConditionSelect(condition: SearchOperator, on_change: EventHandler<SearchOperator>) -> Element {
    rsx! {
        select {
            style: INPUT_STYLE,
            value: "{condition.as_str()}",
            onchange: move |event| {
                if let Some(operator) = SearchOperator::parse(&event.value()) {
                    on_change.call(operator);
                }
            },
            {CONDITION_OPERATORS.iter().map(|operator| rsx! {
                option {
                    key: "{operator.as_str()}",
                    value: "{operator.as_str()}",
                    selected: *operator == condition,
                    "{operator.label()}"
                }
            })}
        }
    }
}

#[component]
fn AdvancedNumberControl(mut dropdown: Signal<FilterDropdown>) -> Element {
    let advanced = dropdown.read().advanced_number();
    let second = dropdown.read().shows_second_value();
    let first_placeholder = if second { "From" } else { "Value" };
    let mut update = move |change: &dyn Fn(&mut Advanced<f64>)| {
        let mut next = dropdown.read().advanced_number();
        change(&mut next);
        dropdown.write().set_advanced_number(&next);
    };

    rsx! {
        ConditionSelect {
            condition: advanced.condition,
            on_change: move |operator| update(&|next: &mut Advanced<f64>| next.condition = operator),
        }
        input {
            style: INPUT_STYLE,
            r#type: "number",
            placeholder: first_placeholder,
            value: "{show(advanced.value)}",
            oninput: move |event| {
                let value = parse_number(&event.value());
                update(&|next: &mut Advanced<f64>| next.value = value)
            },
        }
        if second {
            input {
                style: INPUT_STYLE,
                r#type: "number",
                placeholder: "To",
                value: "{show(advanced.value2)}",
                oninput: move |event| {
                    let value = parse_number(&event.value());
                    update(&|next: &mut Advanced<f64>| next.value2 = value)
                },
            }
        }
    }
}

#[component]
fn AdvancedDateControl(mut dropdown: Signal<FilterDropdown>) -> Element {
    let advanced = dropdown.read().advanced_date();
    let second = dropdown.read().shows_second_value();
    let first_placeholder = if second { "From" } else { "Value" };
    let mut update = move |change: &dyn Fn(&mut Advanced<NaiveDate>)| {
        let mut next = dropdown.read().advanced_date();
        change(&mut next);
        dropdown.write().set_advanced_date(&next);
    };

    rsx! {
        ConditionSelect {
            condition: advanced.condition,
            on_change: move |operator| update(&|next: &mut Advanced<NaiveDate>| next.condition = operator),
        }
        input {
            style: INPUT_STYLE,
            r#type: "date",
            title: first_placeholder,
            value: "{show(advanced.value)}",
            oninput: move |event| {
                let value = parse_date(&event.value());
                update(&|next: &mut Advanced<NaiveDate>| next.value = value)
            },
        }
        if second {
            input {
                style: INPUT_STYLE,
                r#type: "date",
                value: "{show(advanced.value2)}",
                oninput: move |event| {
                    let value = parse_date(&event.value());
                    update(&|next: &mut Advanced<NaiveDate>| next.value2 = value)
                },
            }
        }
    }
}
