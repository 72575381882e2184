use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::domain::entities::form::{FieldErrors, Validate};
use crate::domain::entities::notice::Notice;
use crate::domain::entities::page::{PageRequest, PaginationConfig, TableAction, TableChange};
use crate::domain::entities::record::CrudEntity;
use crate::domain::entities::search::{
    ColumnSearchItem, ColumnSearchValue, ColumnSearches, SearchUpdates,
};
use crate::usecase::ports::api::{ApiError, CrudApi};
use crate::usecase::ports::notifier::Notifier;

pub type ViewHandler<T> = Rc<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStatuses {
    pub fetch: OperationStatus,
    pub load_item: OperationStatus,
    pub submit: OperationStatus,
    pub delete: OperationStatus,
}

impl OperationStatuses {
    pub fn any_pending(&self) -> bool {
        [self.fetch, self.load_item, self.submit, self.delete]
            .contains(&OperationStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalMode),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<D> {
    pub values: D,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone)]
pub struct CrudState<T: CrudEntity> {
    pub data: Vec<T>,
    pub column_searches: ColumnSearches,
    pub pagination: PaginationConfig,
    pub status: OperationStatuses,
    pub modal: ModalState,
    pub editing_item: Option<T>,
    pub form: FormState<T::Draft>,
}

impl<T: CrudEntity> CrudState<T> {
    fn new(per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            column_searches: ColumnSearches::new(),
            pagination: PaginationConfig::first(per_page),
            status: OperationStatuses::default(),
            modal: ModalState::Closed,
            editing_item: None,
            form: FormState::default(),
        }
    }

    fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.editing_item = None;
        self.form = FormState::default();
    }

    fn current_query(&self) -> (u32, u32, Vec<ColumnSearchItem>) {
        (
            self.pagination.current,
            self.pagination.limit,
            self.column_searches.to_vec(),
        )
    }
}

pub struct CrudConfig<T: CrudEntity> {
    pub api: Rc<dyn CrudApi<T>>,
    pub notifier: Rc<dyn Notifier>,
    pub entity_name: String,
    pub per_page: u32,
    pub on_view: Option<ViewHandler<T>>,
}

/// Page-level controller for one entity list: fetching, filtering, paging,
/// the create/edit modal and deletion.
///
/// State sits behind a `RefCell` that is never held across an `.await`, so
/// handlers can be spawned concurrently on a single-threaded executor. Every
/// fetch takes a request token and only the latest one may write `data` and
/// `pagination`.
pub struct CrudController<T: CrudEntity> {
    api: Rc<dyn CrudApi<T>>,
    notifier: Rc<dyn Notifier>,
    entity_name: String,
    per_page: u32,
    on_view: Option<ViewHandler<T>>,
    state: RefCell<CrudState<T>>,
    fetch_seq: Cell<u64>,
}

impl<T: CrudEntity> CrudController<T> {
    pub fn new(config: CrudConfig<T>) -> Self {
        let per_page = config.per_page.max(1);
        Self {
            api: config.api,
            notifier: config.notifier,
            entity_name: config.entity_name,
            per_page,
            on_view: config.on_view,
            state: RefCell::new(CrudState::new(per_page)),
            fetch_seq: Cell::new(0),
        }
    }

    pub fn data(&self) -> Vec<T> {
        self.state.borrow().data.clone()
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.state.borrow().pagination
    }

    pub fn column_searches(&self) -> ColumnSearches {
        self.state.borrow().column_searches.clone()
    }

    pub fn status(&self) -> OperationStatuses {
        self.state.borrow().status
    }

    pub fn loading(&self) -> bool {
        self.status().any_pending()
    }

    pub fn modal(&self) -> ModalState {
        self.state.borrow().modal
    }

    pub fn is_modal_open(&self) -> bool {
        matches!(self.modal(), ModalState::Open(_))
    }

    pub fn editing_item(&self) -> Option<T> {
        self.state.borrow().editing_item.clone()
    }

    pub fn form_values(&self) -> T::Draft {
        self.state.borrow().form.values.clone()
    }

    pub fn form_errors(&self) -> FieldErrors {
        self.state.borrow().form.errors.clone()
    }

    pub fn update_form(&self, update: impl FnOnce(&mut T::Draft)) {
        update(&mut self.state.borrow_mut().form.values);
    }

    /// Error notice naming the entity, with the service message appended.
    fn failure(&self, action: &str, err: &ApiError) -> Notice {
        let base = format!("Failed to {action}");
        match err.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => Notice::error(format!("{base}: {message}")),
            _ => Notice::error(base),
        }
    }

    pub async fn mount(&self) {
        self.fetch_data(1, self.per_page, Vec::new()).await;
    }

    pub async fn fetch_data(&self, page: u32, limit: u32, searches: Vec<ColumnSearchItem>) {
        let token = self.fetch_seq.get() + 1;
        self.fetch_seq.set(token);
        self.state.borrow_mut().status.fetch = OperationStatus::Pending;
        tracing::debug!(
            entity = %self.entity_name,
            page,
            limit,
            filters = searches.len(),
            token,
            "fetching page"
        );

        let result = self
            .api
            .get_all(PageRequest {
                page,
                limit,
                searches,
            })
            .await;

        let latest = self.fetch_seq.get();
        if token != latest {
            tracing::debug!(entity = %self.entity_name, token, latest, "discarding stale page");
            return;
        }

        match result {
            Ok(response) => {
                let mut state = self.state.borrow_mut();
                state.data = response.collection;
                state.pagination = PaginationConfig {
                    current: response.current_page,
                    limit,
                    total: response.total,
                };
                state.status.fetch = OperationStatus::Idle;
            }
            Err(err) if err.is_unsupported() => {
                tracing::warn!(entity = %self.entity_name, "get_all method not provided in api service");
                self.state.borrow_mut().status.fetch = OperationStatus::Idle;
            }
            Err(err) => {
                tracing::warn!(entity = %self.entity_name, error = %err, "page fetch failed");
                self.state.borrow_mut().status.fetch = OperationStatus::Failed;
                self.notifier
                    .notify(self.failure(&format!("load {}s", self.entity_name), &err));
            }
        }
    }

    pub async fn refresh(&self) {
        let (page, limit, searches) = self.state.borrow().current_query();
        self.fetch_data(page, limit, searches).await;
    }

    async fn apply_column_searches(&self, updates: SearchUpdates) {
        let (limit, searches) = {
            let mut state = self.state.borrow_mut();
            state.column_searches.apply(updates);
            (state.pagination.limit, state.column_searches.to_vec())
        };
        self.fetch_data(1, limit, searches).await;
    }

    pub async fn handle_column_search(&self, value: Option<ColumnSearchValue>, column: &str) {
        self.apply_column_searches(vec![(column.to_string(), value)])
            .await;
    }

    pub async fn handle_bulk_column_search(&self, updates: SearchUpdates) {
        self.apply_column_searches(updates).await;
    }

    /// Only page turns refetch; sort and filter callbacks share this handler.
    pub async fn handle_table_change(&self, change: TableChange) {
        if change.action != TableAction::Paginate {
            tracing::debug!(entity = %self.entity_name, action = ?change.action, "ignoring table change");
            return;
        }
        let searches = self.state.borrow().column_searches.to_vec();
        self.fetch_data(change.current, change.page_size, searches)
            .await;
    }

    pub fn handle_add(&self) {
        let mut state = self.state.borrow_mut();
        state.editing_item = None;
        state.form = FormState::default();
        state.modal = ModalState::Open(ModalMode::Create);
    }

    pub async fn handle_edit(&self, id: T::Id) {
        self.state.borrow_mut().status.load_item = OperationStatus::Pending;
        let result = self.api.get_by_id(&id).await;

        match result {
            Ok(item) => {
                let mut state = self.state.borrow_mut();
                state.form = FormState {
                    values: item.to_draft(),
                    errors: FieldErrors::new(),
                };
                state.editing_item = Some(item);
                state.modal = ModalState::Open(ModalMode::Edit);
                state.status.load_item = OperationStatus::Idle;
            }
            Err(err) if err.is_unsupported() => {
                tracing::warn!(entity = %self.entity_name, "get_by_id method not provided in api service");
                self.state.borrow_mut().status.load_item = OperationStatus::Idle;
            }
            Err(err) => {
                tracing::warn!(entity = %self.entity_name, %id, error = %err, "record load failed");
                self.state.borrow_mut().status.load_item = OperationStatus::Failed;
                self.notifier
                    .notify(self.failure(&format!("load {}", self.entity_name), &err));
            }
        }
    }

    /// Re-requests the page and filters active when the delete was issued.
    pub async fn handle_delete(&self, id: T::Id) {
        let (page, limit, searches) = {
            let mut state = self.state.borrow_mut();
            state.status.delete = OperationStatus::Pending;
            state.current_query()
        };

        match self.api.delete(&id).await {
            Ok(ack) => {
                self.state.borrow_mut().status.delete = OperationStatus::Idle;
                self.notifier.notify(Notice::success(
                    ack.message_or(format!("{} deleted successfully", self.entity_name)),
                ));
                self.fetch_data(page, limit, searches).await;
            }
            Err(err) => {
                tracing::warn!(entity = %self.entity_name, %id, error = %err, "delete failed");
                self.state.borrow_mut().status.delete = OperationStatus::Failed;
                self.notifier
                    .notify(self.failure(&format!("delete {}", self.entity_name), &err));
            }
        }
    }

    /// Validation failures stay inline in the form and are not notified.
    pub async fn handle_modal_ok(&self) {
        let (draft, editing_id) = {
            let state = self.state.borrow();
            if state.modal == ModalState::Closed {
                return;
            }
            (
                state.form.values.clone(),
                state.editing_item.as_ref().map(CrudEntity::id),
            )
        };

        if let Err(errors) = draft.validate() {
            tracing::debug!(entity = %self.entity_name, fields = errors.len(), "form rejected");
            self.state.borrow_mut().form.errors = errors;
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            state.form.errors = FieldErrors::new();
            state.status.submit = OperationStatus::Pending;
        }

        let (result, action, verb) = match editing_id {
            Some(id) => (self.api.update(&id, draft).await, "update", "updated"),
            None => (self.api.create(draft).await, "create", "created"),
        };

        match result {
            Ok(ack) => {
                self.notifier.notify(Notice::success(
                    ack.message_or(format!("{} {verb} successfully", self.entity_name)),
                ));
                let (page, limit, searches) = {
                    let mut state = self.state.borrow_mut();
                    state.close_modal();
                    state.status.submit = OperationStatus::Idle;
                    state.current_query()
                };
                self.fetch_data(page, limit, searches).await;
            }
            Err(err) => {
                tracing::warn!(entity = %self.entity_name, action, error = %err, "submit failed");
                self.state.borrow_mut().status.submit = OperationStatus::Failed;
                self.notifier
                    .notify(self.failure(&format!("{action} {}", self.entity_name), &err));
            }
        }
    }

    pub fn handle_modal_cancel(&self) {
        self.state.borrow_mut().close_modal();
    }

    pub fn handle_view(&self, record: &T) {
        match &self.on_view {
            Some(on_view) => on_view(record),
            None => self.notifier.notify(Notice::info(format!(
                "View {}: {}",
                self.entity_name,
                record.label()
            ))),
        }
    }
}
