use dioxus::prelude::*;

use crate::domain::entities::page::PaginationConfig;
use crate::ui::components::filter_dropdown::ColumnFilterButton;
use crate::ui::filters::descriptor::{Align, ColumnFilter, TableColumn};

const HEADER_CELL_STYLE: &str = "position: sticky; top: 0; background: #fafafa; border-bottom: 1px solid #e5e5e5; padding: 8px 10px; font-weight: 600; white-space: nowrap;";
const CELL_STYLE: &str = "border-bottom: 1px solid #f0f0f0; padding: 8px 10px;";
const LINK_STYLE: &str = "border: none; background: transparent; color: #1677ff; cursor: pointer; padding: 0 4px;";
const PAGER_BUTTON_STYLE: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

/// Render-ready column header; the cell text comes from `table_rows`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnHeader {
    pub title: String,
    pub data_index: String,
    pub align: Align,
    pub width: Option<u32>,
    pub filter: Option<ColumnFilter>,
}

impl<T> From<&TableColumn<T>> for ColumnHeader {
    fn from(column: &TableColumn<T>) -> Self {
        Self {
            title: column.title.clone(),
            data_index: column.data_index.clone(),
            align: column.align,
            width: column.width,
            filter: column.filter.clone(),
        }
    }
}

pub fn column_headers<T>(columns: &[TableColumn<T>]) -> Vec<ColumnHeader> {
    columns.iter().map(ColumnHeader::from).collect()
}

pub fn table_rows<T>(columns: &[TableColumn<T>], items: &[T]) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| columns.iter().map(|column| (column.render)(item)).collect())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowActions {
    pub view: bool,
    pub edit: bool,
    pub delete: bool,
}

impl RowActions {
    fn any(self) -> bool {
        self.view || self.edit || self.delete
    }
}

#[component]
pub fn DataTable(
    headers: Vec<ColumnHeader>,
    rows: Vec<Vec<String>>,
    loading: bool,
    pagination: PaginationConfig,
    actions: RowActions,
    on_page: EventHandler<u32>,
    on_view: EventHandler<usize>,
    on_edit: EventHandler<usize>,
    on_delete: EventHandler<usize>,
) -> Element {
    let last_page = pagination.last_page();
    let current = pagination.current;
    let total = pagination.total;
    let opacity = if loading { "0.5" } else { "1" };

    rsx! {
        div {
            style: "flex: 1; overflow: auto; border: 1px solid #e5e5e5; border-radius: 8px; background: #fff; opacity: {opacity};",
            table {
                style: "width: 100%; border-collapse: collapse;",
                thead {
                    tr {
                        th { style: HEADER_CELL_STYLE, "No." }
                        for header in headers.iter() {
                            th {
                                key: "{header.data_index}",
                                style: "{HEADER_CELL_STYLE} text-align: {header.align.css()};",
                                width: header.width.map(|w| w.to_string()),
                                "{header.title}"
                                if let Some(filter) = header.filter.clone().filter(|f| f.has_column_filter()) {
                                    ColumnFilterButton { filter }
                                }
                            }
                        }
                        if actions.any() {
                            th { style: HEADER_CELL_STYLE, "Actions" }
                        }
                    }
                }
                tbody {
                    if rows.is_empty() {
                        tr {
                            td {
                                colspan: "{headers.len() + 2}",
                                style: "padding: 24px; text-align: center; color: #888;",
                                if loading { "Loading..." } else { "No data" }
                            }
                        }
                    }
                    for (row_idx, row) in rows.iter().enumerate() {
                        tr {
                            key: "{row_idx}",
                            td { style: CELL_STYLE, "{pagination.row_number(row_idx)}" }
                            for (cell, header) in row.iter().zip(headers.iter()) {
                                td {
                                    style: "{CELL_STYLE} text-align: {header.align.css()};",
                                    "{cell}"
                                }
                            }
                            if actions.any() {
                                td {
                                    style: "{CELL_STYLE} white-space: nowrap;",
                                    if actions.view {
                                        button { style: LINK_STYLE, onclick: move |_| on_view.call(row_idx), "View" }
                                    }
                                    if actions.edit {
                                        button { style: LINK_STYLE, onclick: move |_| on_edit.call(row_idx), "Edit" }
                                    }
                                    if actions.delete {
                                        button {
                                            style: "{LINK_STYLE} color: #ff4d4f;",
                                            onclick: move |_| on_delete.call(row_idx),
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        div {
            style: "display: flex; justify-content: flex-end; align-items: center; gap: 8px; padding: 8px 0;",
            span { style: "color: #666;", "Total {total} items" }
            button {
                style: PAGER_BUTTON_STYLE,
                disabled: loading || current <= 1,
                onclick: move |_| on_page.call(current.saturating_sub(1).max(1)),
                "‹"
            }
            span { "Page {current} / {last_page}" }
            button {
                style: PAGER_BUTTON_STYLE,
                disabled: loading || current >= last_page,
                onclick: move |_| on_page.call((current + 1).min(last_page)),
                "›"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        price: f64,
    }

    #[test]
    fn rows_render_each_column_in_order() {
        let columns = vec![
            TableColumn::new("Name", "name", |item: &Item| item.name.to_string()),
            TableColumn::new("Price", "price", |item: &Item| format!("{:.2}", item.price))
                .align(Align::Right),
        ];
        let items = vec![Item { name: "Lamp", price: 12.5 }];

        assert_eq!(
            table_rows(&columns, &items),
            vec![vec!["Lamp".to_string(), "12.50".to_string()]]
        );
        let headers = column_headers(&columns);
        assert_eq!(headers[1].align, Align::Right);
        assert!(headers[0].filter.is_none());
    }
}
