use std::future::Future;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::domain::entities::page::{TableAction, TableChange};
use crate::domain::entities::record::CrudEntity;
use crate::domain::entities::search::{ColumnSearches, SearchUpdates};
use crate::ui::filters::descriptor::SearchHandler;
use crate::usecase::services::crud_controller::CrudController;

/// Bumped after every controller operation so the page re-reads controller state.
pub type Revision = Signal<u64>;

/// Runs a controller operation. The first bump renders the pending status,
/// which the operation sets before its first await; the second renders the result.
pub fn spawn_refresh(mut revision: Revision, task: impl Future<Output = ()> + 'static) {
    spawn(async move {
        *revision.write() += 1;
        task.await;
        *revision.write() += 1;
    });
}

/// Summary of the column searches a list is currently filtered by.
pub fn filters_label(searches: &ColumnSearches) -> Option<String> {
    if searches.is_empty() {
        return None;
    }
    let fields = searches.fields().collect::<Vec<_>>().join(", ");
    let noun = if searches.len() == 1 { "filter" } else { "filters" };
    Some(format!("{} {noun}: {fields}", searches.len()))
}

pub fn search_handler<T: CrudEntity>(controller: Rc<CrudController<T>>, revision: Revision) -> SearchHandler {
    SearchHandler::new(move |value, column| {
        let controller = controller.clone();
        let column = column.to_string();
        spawn_refresh(revision, async move {
            controller.handle_column_search(value, &column).await;
        });
    })
}

pub fn mount<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision) {
    let controller = controller.clone();
    spawn_refresh(revision, async move { controller.mount().await });
}

pub fn change_page<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision, page: u32) {
    let controller = controller.clone();
    let change = TableChange {
        current: page,
        page_size: controller.pagination().limit,
        action: TableAction::Paginate,
    };
    spawn_refresh(revision, async move { controller.handle_table_change(change).await });
}

pub fn bulk_search<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision, updates: SearchUpdates) {
    let controller = controller.clone();
    spawn_refresh(revision, async move {
        controller.handle_bulk_column_search(updates).await;
    });
}

pub fn edit<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision, id: T::Id) {
    let controller = controller.clone();
    spawn_refresh(revision, async move { controller.handle_edit(id).await });
}

pub fn delete<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision, id: T::Id) {
    let controller = controller.clone();
    spawn_refresh(revision, async move { controller.handle_delete(id).await });
}

pub fn submit<T: CrudEntity>(controller: &Rc<CrudController<T>>, revision: Revision) {
    let controller = controller.clone();
    spawn_refresh(revision, async move { controller.handle_modal_ok().await });
}

/// Applies a form edit and re-renders.
pub fn update_form<T: CrudEntity>(
    controller: &CrudController<T>,
    mut revision: Revision,
    update: impl FnOnce(&mut T::Draft),
) {
    controller.update_form(update);
    *revision.write() += 1;
}

pub fn bump(mut revision: Revision) {
    *revision.write() += 1;
}
