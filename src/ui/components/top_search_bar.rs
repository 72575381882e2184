use chrono::NaiveDate;
use dioxus::prelude::*;

use crate::domain::entities::search::{FilterValue, SearchUpdates};
use crate::ui::filters::top_search::{TopSearchBar, TopSearchConfig, TopSearchKind};

const INPUT_STYLE: &str = "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px; min-width: 160px;";
const BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;";
const PRIMARY_BUTTON_STYLE: &str = "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;";

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn date_range(bar: &TopSearchBar, data_index: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match bar.value(data_index) {
        Some(FilterValue::DateRange(from, to)) => (*from, *to),
        _ => (None, None),
    }
}

fn text_of(bar: &TopSearchBar, data_index: &str) -> String {
    bar.value(data_index).map(|v| v.to_string()).unwrap_or_default()
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Search fields above the table; renders nothing without configs.
#[component]
pub fn TopSearch(configs: Vec<TopSearchConfig>, on_submit: EventHandler<SearchUpdates>) -> Element {
    let mut bar = use_signal(|| TopSearchBar::new(configs.clone()));
    if bar.read().is_empty() {
        return rsx! {};
    }
    let fields = bar.read().configs().to_vec();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 8px; align-items: center; padding: 8px 0;",
            for config in fields {
                TopSearchField { key: "{config.data_index}", config: config.clone(), bar }
            }
            button {
                style: PRIMARY_BUTTON_STYLE,
                onclick: move |_| on_submit.call(bar.read().submit()),
                "Search"
            }
            button {
                style: BUTTON_STYLE,
                onclick: move |_| {
                    let updates = bar.write().reset();
                    on_submit.call(updates);
                },
                "Reset"
            }
        }
    }
}

#[component]
fn TopSearchField(config: TopSearchConfig, mut bar: Signal<TopSearchBar>) -> Element {
    let data_index = config.data_index.clone();
    let placeholder = config.placeholder.clone().unwrap_or_default();
    let current = text_of(&bar.read(), &data_index);

    match config.kind {
        TopSearchKind::Input => rsx! {
            input {
                style: INPUT_STYLE,
                placeholder: "{placeholder}",
                value: "{current}",
                oninput: move |event| {
                    bar.write().set_value(&data_index, Some(FilterValue::Text(event.value())));
                },
            }
        },
        TopSearchKind::Select => rsx! {
            select {
                style: INPUT_STYLE,
                value: "{current}",
                onchange: move |event| {
                    let value = event.value();
                    let value = (!value.is_empty()).then_some(FilterValue::Text(value));
                    bar.write().set_value(&data_index, value);
                },
                option { value: "", "{placeholder}" }
                for option in config.options.iter() {
                    option {
                        key: "{option.value}",
                        value: "{option.value}",
                        selected: option.value == current,
                        "{option.label}"
                    }
                }
            }
        },
        TopSearchKind::Date => rsx! {
            input {
                style: INPUT_STYLE,
                r#type: "date",
                value: "{current}",
                oninput: move |event| {
                    let date = parse_date(&event.value()).map(FilterValue::Date);
                    bar.write().set_value(&data_index, date);
                },
            }
        },
        TopSearchKind::DateRange => {
            let (from, to) = date_range(&bar.read(), &data_index);
            let to_index = data_index.clone();
            rsx! {
                span {
                    style: "display: inline-flex; gap: 4px; align-items: center;",
                    input {
                        style: INPUT_STYLE,
                        r#type: "date",
                        value: "{date_text(from)}",
                        oninput: move |event| {
                            let (_, to) = date_range(&bar.read(), &data_index);
                            let from = parse_date(&event.value());
                            bar.write().set_value(&data_index, Some(FilterValue::DateRange(from, to)));
                        },
                    }
                    span { "~" }
                    input {
                        style: INPUT_STYLE,
                        r#type: "date",
                        value: "{date_text(to)}",
                        oninput: move |event| {
                            let (from, _) = date_range(&bar.read(), &to_index);
                            let to = parse_date(&event.value());
                            bar.write().set_value(&to_index, Some(FilterValue::DateRange(from, to)));
                        },
                    }
                }
            }
        }
    }
}
