use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::Services;
use crate::domain::entities::auth::{has_permission, Permission};
use crate::domain::entities::product::{Product, CATEGORIES};
use crate::domain::entities::record::{CrudEntity, Status};
use crate::infra::sqlite::product_api::{CategoryOptions, SqliteProductApi};
use crate::platform::desktop::dialog::confirm_delete;
use crate::ui::components::data_table::{column_headers, table_rows, DataTable, RowActions};
use crate::ui::components::form_modal::{FormModal, SelectField, TextAreaField, TextField};
use crate::ui::components::top_search_bar::TopSearch;
use crate::ui::filters::descriptor::{
    top_search_configs, Align, ColumnFilter, DateMode, SearchDisplayMode, TableColumn,
};
use crate::ui::pages::crud_page::{self, search_handler, Revision};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::options::{OptionLoader, SelectOption};
use crate::usecase::services::crud_controller::{
    CrudConfig, CrudController, ModalMode, ModalState, OperationStatus,
};

fn status_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("Active", Status::Active.as_str()),
        SelectOption::new("Inactive", Status::Inactive.as_str()),
    ]
}

fn category_options() -> Vec<SelectOption> {
    CATEGORIES
        .iter()
        .map(|category| SelectOption::new(*category, *category))
        .collect()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Blank input clears the field; unparsable input keeps the previous value.
fn parse_optional<T: std::str::FromStr>(raw: &str, previous: Option<T>) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok().or(previous)
}

pub fn product_columns(
    controller: Rc<CrudController<Product>>,
    revision: Revision,
    categories: Rc<dyn OptionLoader>,
) -> Vec<TableColumn<Product>> {
    let on_search = || search_handler(controller.clone(), revision);
    vec![
        TableColumn::new("Name", "name", |product: &Product| product.name.clone()).with_filter(
            ColumnFilter::input("name", on_search())
                .placeholder("Search product")
                .show_search(SearchDisplayMode::Both),
        ),
        TableColumn::new("Category", "category", |product: &Product| product.category.clone())
            .with_filter(
                ColumnFilter::async_select("category", categories, on_search())
                    .placeholder("Find category"),
            ),
        TableColumn::new("Price", "price", |product: &Product| money(product.price))
            .align(Align::Right)
            .with_filter(ColumnFilter::number_range_advanced("price", on_search())),
        TableColumn::new("Stock", "stock", |product: &Product| product.stock.to_string())
            .align(Align::Right)
            .with_filter(
                ColumnFilter::number_range("stock", on_search())
                    .range_placeholders("Min stock", "Max stock"),
            ),
        TableColumn::new("Status", "status", |product: &Product| {
            match product.status {
                Status::Active => "Active",
                Status::Inactive => "Inactive",
            }
            .to_string()
        })
        .align(Align::Center)
        .with_filter(
            ColumnFilter::select("status", status_options(), on_search())
                .placeholder("Any status")
                .show_search(SearchDisplayMode::Top),
        ),
        TableColumn::new("Created", "created_on", |product: &Product| {
            product.created_on.to_string()
        })
        .width(140)
        .with_filter(ColumnFilter::date_time_advanced("created_on", on_search())),
        TableColumn::new("Updated", "updated_on", |product: &Product| {
            product
                .updated_on
                .map(|date| date.to_string())
                .unwrap_or_else(|| "-".to_string())
        })
        .width(140)
        .with_filter(ColumnFilter::date_time("updated_on", DateMode::Single, on_search())),
    ]
}

#[component]
pub fn ProductsPage() -> Element {
    let services = use_context::<Services>();
    let app_state = use_context::<AppState>();
    let revision = use_signal(|| 0_u64);

    let controller = use_hook(|| {
        CopyValue::new(Rc::new(CrudController::new(CrudConfig {
            api: Rc::new(SqliteProductApi::new(
                services.store.clone(),
                services.auth.context().clone(),
            )),
            notifier: services.notifier.clone(),
            entity_name: "product".to_string(),
            per_page: services.config.per_page,
            on_view: None,
        })))
    });
    let columns = use_hook(|| {
        let categories: Rc<dyn OptionLoader> = Rc::new(CategoryOptions::new(services.store.clone()));
        Rc::new(product_columns(controller.cloned(), revision, categories))
    });
    use_hook(|| crud_page::mount(&controller.cloned(), revision));

    let _ = revision();
    let ctl = controller.cloned();
    let can_manage = app_state
        .user
        .read()
        .as_ref()
        .is_some_and(|user| has_permission(user.role, Permission::ManageProducts));
    let actions = RowActions {
        view: true,
        edit: can_manage,
        delete: can_manage,
    };

    let data = ctl.data();
    let status = ctl.status();
    let form = ctl.form_values();
    let errors = ctl.form_errors();
    let modal_title = match ctl.modal() {
        ModalState::Open(ModalMode::Edit) => "Edit product",
        _ => "Add product",
    };
    let price_text = form.price.map(|price| price.to_string()).unwrap_or_default();
    let stock_text = form.stock.map(|stock| stock.to_string()).unwrap_or_default();

    let view_data = data.clone();
    let edit_data = data.clone();
    let delete_data = data.clone();

    rsx! {
        div {
            style: "display: flex; flex-direction: column; height: 100%; gap: 8px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                TopSearch {
                    configs: top_search_configs(&columns),
                    on_submit: move |updates| crud_page::bulk_search(&controller.cloned(), revision, updates),
                }
                if can_manage {
                    button {
                        style: "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            controller.cloned().handle_add();
                            crud_page::bump(revision);
                        },
                        "Add product"
                    }
                }
            }
            if let Some(label) = crud_page::filters_label(&ctl.column_searches()) {
                span { style: "color: #666; font-size: 12px;", "{label}" }
            }
            DataTable {
                headers: column_headers(&columns),
                rows: table_rows(&columns, &data),
                loading: ctl.loading(),
                pagination: ctl.pagination(),
                actions,
                on_page: move |page| crud_page::change_page(&controller.cloned(), revision, page),
                on_view: move |idx: usize| {
                    if let Some(product) = view_data.get(idx) {
                        controller.cloned().handle_view(product);
                    }
                },
                on_edit: move |idx: usize| {
                    if let Some(product) = edit_data.get(idx) {
                        crud_page::edit(&controller.cloned(), revision, product.id());
                    }
                },
                on_delete: move |idx: usize| {
                    if let Some(product) = delete_data.get(idx) {
                        if confirm_delete("product", &product.label()) {
                            crud_page::delete(&controller.cloned(), revision, product.id());
                        }
                    }
                },
            }
            FormModal {
                title: modal_title.to_string(),
                open: ctl.is_modal_open(),
                busy: status.submit == OperationStatus::Pending,
                on_ok: move |_| crud_page::submit(&controller.cloned(), revision),
                on_cancel: move |_| {
                    controller.cloned().handle_modal_cancel();
                    crud_page::bump(revision);
                },
                TextField {
                    label: "Name".to_string(),
                    value: form.name.clone(),
                    error: errors.get("name").map(str::to_string),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.name = value)
                    },
                }
                TextField {
                    label: "Price".to_string(),
                    value: price_text,
                    error: errors.get("price").map(str::to_string),
                    kind: "number".to_string(),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| {
                            draft.price = parse_optional(&value, draft.price)
                        })
                    },
                }
                TextField {
                    label: "Stock".to_string(),
                    value: stock_text,
                    error: errors.get("stock").map(str::to_string),
                    kind: "number".to_string(),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| {
                            draft.stock = parse_optional(&value, draft.stock)
                        })
                    },
                }
                SelectField {
                    label: "Category".to_string(),
                    value: form.category.clone(),
                    options: category_options(),
                    error: errors.get("category").map(str::to_string),
                    on_change: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.category = value)
                    },
                }
                SelectField {
                    label: "Status".to_string(),
                    value: form.status.as_str().to_string(),
                    options: status_options(),
                    error: None,
                    on_change: move |value: String| {
                        if let Some(status) = Status::parse(&value) {
                            crud_page::update_form(&controller.cloned(), revision, |draft| draft.status = status)
                        }
                    },
                }
                TextAreaField {
                    label: "Description".to_string(),
                    value: form.description.clone(),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.description = value)
                    },
                }
            }
        }
    }
}
