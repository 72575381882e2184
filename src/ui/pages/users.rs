use std::rc::Rc;

use dioxus::prelude::*;

use crate::app::Services;
use crate::domain::entities::auth::{has_permission, Permission, Role};
use crate::domain::entities::record::{CrudEntity, Status};
use crate::domain::entities::search::SearchOperator;
use crate::domain::entities::user::User;
use crate::infra::sqlite::user_api::SqliteUserApi;
use crate::platform::desktop::dialog::confirm_delete;
use crate::ui::components::data_table::{column_headers, table_rows, DataTable, RowActions};
use crate::ui::components::form_modal::{FormModal, SelectField, TextField};
use crate::ui::components::top_search_bar::TopSearch;
use crate::ui::filters::descriptor::{
    top_search_configs, ColumnFilter, DateMode, SearchDisplayMode, TableColumn,
};
use crate::ui::pages::crud_page::{self, search_handler, Revision};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::options::SelectOption;
use crate::usecase::services::crud_controller::{
    CrudConfig, CrudController, ModalMode, ModalState, OperationStatus,
};

fn role_options() -> Vec<SelectOption> {
    Role::ALL
        .iter()
        .map(|role| SelectOption::new(capitalize(role.as_str()), role.as_str()))
        .collect()
}

fn status_options() -> Vec<SelectOption> {
    Status::ALL
        .iter()
        .map(|status| SelectOption::new(capitalize(status.as_str()), status.as_str()))
        .collect()
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn user_columns(controller: Rc<CrudController<User>>, revision: Revision) -> Vec<TableColumn<User>> {
    let on_search = || search_handler(controller.clone(), revision);
    vec![
        TableColumn::new("Name", "full_name", |user: &User| user.full_name.clone()).with_filter(
            ColumnFilter::input("full_name", on_search())
                .placeholder("Search name")
                .show_search(SearchDisplayMode::Both),
        ),
        TableColumn::new("Username", "username", |user: &User| user.username.clone()),
        TableColumn::new("Email", "email", |user: &User| user.email.clone())
            .with_filter(ColumnFilter::input("email", on_search()).placeholder("Search email")),
        TableColumn::new("Role", "role", |user: &User| capitalize(user.role.as_str())).with_filter(
            ColumnFilter::select("role", role_options(), on_search())
                .placeholder("All roles")
                .show_search(SearchDisplayMode::Both),
        ),
        TableColumn::new("Status", "status", |user: &User| capitalize(user.status.as_str()))
            .with_filter(ColumnFilter::select("status", status_options(), on_search())),
        TableColumn::new("Phone", "phone", |user: &User| user.phone.clone()).with_filter(
            ColumnFilter::input("phone", on_search())
                .operator(SearchOperator::StartWith)
                .placeholder("Phone prefix"),
        ),
        TableColumn::new("Joined", "joined_on", |user: &User| user.joined_on.to_string())
            .width(140)
            .with_filter(ColumnFilter::date_time("joined_on", DateMode::Range, on_search())),
    ]
}

#[component]
pub fn UsersPage() -> Element {
    let services = use_context::<Services>();
    let app_state = use_context::<AppState>();
    let revision = use_signal(|| 0_u64);

    let controller = use_hook(|| {
        CopyValue::new(Rc::new(CrudController::new(CrudConfig {
            api: Rc::new(SqliteUserApi::new(
                services.store.clone(),
                services.auth.context().clone(),
            )),
            notifier: services.notifier.clone(),
            entity_name: "user".to_string(),
            per_page: services.config.per_page,
            on_view: None,
        })))
    });
    let columns = use_hook(|| Rc::new(user_columns(controller.cloned(), revision)));
    use_hook(|| crud_page::mount(&controller.cloned(), revision));

    let _ = revision();
    let ctl = controller.cloned();
    let role = app_state.user.read().as_ref().map(|user| user.role);
    let can = |permission| role.is_some_and(|role| has_permission(role, permission));
    let actions = RowActions {
        view: true,
        edit: can(Permission::EditUser),
        delete: can(Permission::DeleteUser),
    };

    let data = ctl.data();
    let status = ctl.status();
    let form = ctl.form_values();
    let errors = ctl.form_errors();
    let modal_title = match ctl.modal() {
        ModalState::Open(ModalMode::Edit) => "Edit user",
        _ => "Add user",
    };

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
                if can(Permission::CreateUser) {
                    button {
                        style: "border: 1px solid #1677ff; background: #1677ff; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            controller.cloned().handle_add();
                            crud_page::bump(revision);
                        },
                        "Add user"
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
                    if let Some(user) = view_data.get(idx) {
                        controller.cloned().handle_view(user);
                    }
                },
                on_edit: move |idx: usize| {
                    if let Some(user) = edit_data.get(idx) {
                        crud_page::edit(&controller.cloned(), revision, user.id());
                    }
                },
                on_delete: move |idx: usize| {
                    if let Some(user) = delete_data.get(idx) {
                        if confirm_delete("user", &user.label()) {
                            crud_page::delete(&controller.cloned(), revision, user.id());
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
                    label: "Full name".to_string(),
                    value: form.full_name.clone(),
                    error: errors.get("full_name").map(str::to_string),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.full_name = value)
                    },
                }
                TextField {
                    label: "Email".to_string(),
                    value: form.email.clone(),
                    error: errors.get("email").map(str::to_string),
                    kind: "email".to_string(),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.email = value)
                    },
                }
                SelectField {
                    label: "Role".to_string(),
                    value: form.role.map(|role| role.as_str().to_string()).unwrap_or_default(),
                    options: role_options(),
                    error: errors.get("role").map(str::to_string),
                    on_change: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.role = Role::parse(&value))
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
                TextField {
                    label: "Phone".to_string(),
                    value: form.phone.clone(),
                    error: errors.get("phone").map(str::to_string),
                    on_input: move |value: String| {
                        crud_page::update_form(&controller.cloned(), revision, |draft| draft.phone = value)
                    },
                }
            }
        }
    }
}
