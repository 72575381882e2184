use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use futures::executor::block_on;

use crate::config::{AppConfig, ENV_STORE};
use crate::domain::entities::auth::{Role, Session, SessionUser};
use crate::domain::entities::notice::{Notice, NoticeKind};
use crate::domain::entities::page::PageRequest;
use crate::domain::entities::product::{ProductDraft, CATEGORIES};
use crate::domain::entities::record::Status;
use crate::domain::entities::search::{
    ColumnSearchItem, ColumnSearchValue, FilterValue, SearchOperator,
};
use crate::domain::entities::user::{User, UserDraft};
use crate::infra::sqlite::product_api::{CategoryOptions, SqliteProductApi};
use crate::infra::sqlite::queries::{count_where, PRODUCTS, USERS};
use crate::infra::sqlite::schema::{SEED_PRODUCTS, SEED_USERS};
use crate::infra::sqlite::store::SqliteStore;
use crate::infra::sqlite::user_api::SqliteUserApi;
use crate::usecase::ports::api::{ApiErrorKind, CrudApi};
use crate::usecase::ports::auth::AuthContext;
use crate::usecase::ports::notifier::Notifier;
use crate::usecase::ports::options::load_options;
use crate::usecase::services::crud_controller::{CrudConfig, CrudController, ModalState};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("admin-console-{prefix}-{nanos}"))
}

fn seed_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
}

fn store() -> Rc<SqliteStore> {
    Rc::new(SqliteStore::in_memory(seed_day()).expect("in-memory store should open"))
}

fn session(role: Role) -> Rc<AuthContext> {
    Rc::new(AuthContext::with_session(Session {
        user: SessionUser {
            id: "1".to_string(),
            name: "Tester".to_string(),
            email: "tester@example.com".to_string(),
            role,
        },
        token: "token".to_string(),
    }))
}

fn search(field: &str, value: FilterValue, operator: SearchOperator) -> ColumnSearchItem {
    ColumnSearchItem {
        field: field.to_string(),
        value,
        operator,
    }
}

fn request(page: u32, limit: u32, searches: Vec<ColumnSearchItem>) -> PageRequest {
    PageRequest {
        page,
        limit,
        searches,
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

fn valid_user_draft() -> UserDraft {
    UserDraft {
        username: String::new(),
        full_name: "Ann Lee".to_string(),
        email: "ann.lee@example.com".to_string(),
        role: Some(Role::Moderator),
        status: Status::Active,
        phone: "0912345678".to_string(),
    }
}

#[test]
fn file_store_is_seeded_once() {
    let temp_dir = unique_test_dir("seed-once");
    let store_path = temp_dir.join("nested").join("store.sqlite");

    {
        let store = SqliteStore::open(Some(&store_path), seed_day()).expect("first open");
        let stats = store.dashboard_stats().expect("stats");
        assert_eq!(stats.total_users, SEED_USERS as u64);
        assert_eq!(stats.total_products, SEED_PRODUCTS as u64);
    }

    let store = SqliteStore::open(Some(&store_path), seed_day()).expect("second open");
    assert_eq!(
        count_where(store.conn(), &USERS, "1 = 1").expect("count users"),
        SEED_USERS as u64,
        "reopening must not seed again"
    );
    assert_eq!(
        count_where(store.conn(), &PRODUCTS, "1 = 1").expect("count products"),
        SEED_PRODUCTS as u64
    );

    drop(store);
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn dashboard_stats_follow_seed_data() {
    let stats = store().dashboard_stats().expect("stats");

    let inactive_users = (1..=SEED_USERS).filter(|i| i % 4 == 0).count() as u64;
    let low_stock = (1..=SEED_PRODUCTS).filter(|i| (i * 13) % 120 < 10).count() as u64;
    assert_eq!(stats.active_users, stats.total_users - inactive_users);
    assert_eq!(stats.low_stock_products, low_stock);
    assert!(stats.inventory_value > 0.0);
}

#[test]
fn user_api_filters_and_pages() {
    let api = SqliteUserApi::new(store(), session(Role::Admin));

    let page = block_on(api.get_all(request(
        2,
        4,
        vec![search(
            "role",
            FilterValue::Text("moderator".to_string()),
            SearchOperator::Equal,
        )],
    )))
    .expect("moderators page");

    assert_eq!(page.total, 10);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.last_page, 3);
    assert_eq!(page.collection.len(), 4);
    assert!(page.collection.iter().all(|user| user.role == Role::Moderator));
}

#[test]
fn user_api_matches_names_case_insensitively() {
    let api = SqliteUserApi::new(store(), session(Role::Admin));

    let page = block_on(api.get_all(request(
        1,
        50,
        vec![search(
            "name",
            FilterValue::Text("user 1".to_string()),
            SearchOperator::Contain,
        )],
    )))
    .expect("name search");

    // "User 1" and "User 10" through "User 19".
    assert_eq!(page.total, 11);
}

#[test]
fn user_api_rejects_unknown_search_fields() {
    let api = SqliteUserApi::new(store(), session(Role::Admin));

    let err = block_on(api.get_all(request(
        1,
        10,
        vec![search(
            "password",
            FilterValue::Text("x".to_string()),
            SearchOperator::Equal,
        )],
    )))
    .expect_err("unknown field");

    assert_eq!(err.kind, ApiErrorKind::Validation);
}

#[test]
fn user_api_enforces_session_and_permissions() {
    let store = store();

    let guest = SqliteUserApi::new(store.clone(), Rc::new(AuthContext::new()));
    let err = block_on(guest.get_all(request(1, 10, Vec::new()))).expect_err("no session");
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);

    let user = SqliteUserApi::new(store.clone(), session(Role::User));
    let err = block_on(user.get_all(request(1, 10, Vec::new()))).expect_err("plain user");
    assert_eq!(err.kind, ApiErrorKind::Forbidden);

    let moderator = SqliteUserApi::new(store, session(Role::Moderator));
    assert!(block_on(moderator.get_all(request(1, 10, Vec::new()))).is_ok());
    let err = block_on(moderator.delete(&1)).expect_err("moderators cannot delete users");
    assert_eq!(err.kind, ApiErrorKind::Forbidden);
}

#[test]
fn user_api_crud_round_trip() {
    let api = SqliteUserApi::new(store(), session(Role::Admin));

    let created = block_on(api.create(valid_user_draft())).expect("create");
    assert_eq!(created.message.as_deref(), Some("User created successfully"));
    assert_eq!(created.data.username, "ann.lee");
    assert_eq!(created.data.joined_on, crate::infra::sqlite::store::today());
    let id = created.data.id;

    let draft = UserDraft {
        full_name: "Ann Park".to_string(),
        ..valid_user_draft()
    };
    let updated = block_on(api.update(&id, draft)).expect("update");
    assert_eq!(updated.data.full_name, "Ann Park");
    assert_eq!(
        block_on(api.get_by_id(&id)).expect("reload").full_name,
        "Ann Park"
    );

    block_on(api.delete(&id)).expect("delete");
    let err = block_on(api.get_by_id(&id)).expect_err("deleted user");
    assert_eq!(err.kind, ApiErrorKind::NotFound);
    assert_eq!(err.message.as_deref(), Some("User not found"));
}

#[test]
fn user_api_reports_first_validation_message() {
    let api = SqliteUserApi::new(store(), session(Role::Admin));
    let draft = UserDraft {
        phone: "123".to_string(),
        ..valid_user_draft()
    };

    let err = block_on(api.create(draft)).expect_err("short phone");
    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(
        err.message.as_deref(),
        Some("Phone number must be exactly 10 digits")
    );
}

#[test]
fn product_api_filters_numeric_and_date_ranges() {
    let api = SqliteProductApi::new(store(), session(Role::User));

    let stock = block_on(api.get_all(request(
        1,
        100,
        vec![search(
            "stock",
            FilterValue::NumberRange(Some(10.0), Some(20.0)),
            SearchOperator::Between,
        )],
    )))
    .expect("stock range");
    let expected = (1..=SEED_PRODUCTS)
        .filter(|i| (10..=20).contains(&((i * 13) % 120)))
        .count() as u64;
    assert_eq!(stock.total, expected);
    assert!(stock
        .collection
        .iter()
        .all(|product| (10..=20).contains(&product.stock)));

    let since = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    let recent = block_on(api.get_all(request(
        1,
        100,
        vec![search(
            "created_on",
            FilterValue::DateRange(Some(since), None),
            SearchOperator::Between,
        )],
    )))
    .expect("open-ended date range");
    // created_on is the seed day minus 3 * i days.
    assert_eq!(recent.total, 9);
}

#[test]
fn product_api_matches_categories_with_in() {
    let api = SqliteProductApi::new(store(), session(Role::Admin));

    let page = block_on(api.get_all(request(
        1,
        100,
        vec![search(
            "category",
            FilterValue::List(vec!["Books".to_string(), "Food".to_string()]),
            SearchOperator::In,
        )],
    )))
    .expect("category list");

    assert_eq!(page.total, 20);
    assert!(page
        .collection
        .iter()
        .all(|product| product.category == "Books" || product.category == "Food"));
}

#[test]
fn product_update_stamps_updated_on() {
    let api = SqliteProductApi::new(store(), session(Role::Moderator));
    let before = block_on(api.get_by_id(&1)).expect("seeded product");
    assert!(before.updated_on.is_none());

    let draft = ProductDraft {
        price: Some(42.5),
        ..crate::domain::entities::record::CrudEntity::to_draft(&before)
    };
    let ack = block_on(api.update(&1, draft)).expect("update");

    assert_eq!(ack.message.as_deref(), Some("Product updated successfully"));
    assert_eq!(ack.data.price, 42.5);
    assert_eq!(ack.data.updated_on, Some(crate::infra::sqlite::store::today()));
    assert_eq!(ack.data.created_on, before.created_on);
}

#[test]
fn product_writes_need_manage_permission() {
    let api = SqliteProductApi::new(store(), session(Role::User));

    assert!(block_on(api.get_by_id(&1)).is_ok());
    let err = block_on(api.delete(&1)).expect_err("plain users cannot delete products");
    assert_eq!(err.kind, ApiErrorKind::Forbidden);

    let admin = SqliteProductApi::new(store(), session(Role::Admin));
    let err = block_on(admin.delete(&999)).expect_err("missing product");
    assert_eq!(err.message.as_deref(), Some("Product not found"));
}

#[test]
fn category_options_come_from_the_store() {
    let loader = CategoryOptions::new(store());

    let all = block_on(load_options(&loader, ""));
    assert_eq!(all.len(), CATEGORIES.len());

    let books = block_on(load_options(&loader, "BOO"));
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].value, "Books");
}

#[test]
fn controller_drives_the_user_store_end_to_end() {
    let notifier = Rc::new(RecordingNotifier::default());
    let controller: CrudController<User> = CrudController::new(CrudConfig {
        api: Rc::new(SqliteUserApi::new(store(), session(Role::Admin))),
        notifier: notifier.clone(),
        entity_name: "user".to_string(),
        per_page: 20,
        on_view: None,
    });

    block_on(controller.mount());
    assert_eq!(controller.data().len(), 20);
    assert_eq!(controller.pagination().total, 30);

    controller.handle_add();
    controller.update_form(|draft| *draft = valid_user_draft());
    block_on(controller.handle_modal_ok());
    assert_eq!(controller.modal(), ModalState::Closed);
    assert_eq!(controller.pagination().total, 31);
    assert_eq!(
        notifier.notices.borrow().last().map(|n| (n.kind, n.description.clone())),
        Some((
            NoticeKind::Success,
            Some("User created successfully".to_string())
        ))
    );

    let value =
        ColumnSearchValue::text("User 1", SearchOperator::Contain).expect("text search");
    block_on(controller.handle_column_search(Some(value), "full_name"));
    assert_eq!(controller.pagination().total, 11);
    assert_eq!(controller.pagination().current, 1);

    block_on(controller.handle_column_search(None, "full_name"));
    assert_eq!(controller.pagination().total, 31);
    assert!(controller.column_searches().is_empty());
}

#[test]
fn config_file_and_env_resolve_store_path() {
    let temp_dir = unique_test_dir("config");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let config_path = temp_dir.join("config.json");
    fs::write(
        &config_path,
        r#"{ "web_name": "Shop Admin", "store_path": "/data/shop.sqlite" }"#,
    )
    .expect("should write config");

    let config = AppConfig::load_from(&config_path, |_| None).expect("config");
    assert_eq!(config.web_name, "Shop Admin");
    assert_eq!(config.store_path, Some(PathBuf::from("/data/shop.sqlite")));

    let config = AppConfig::load_from(&config_path, |key| {
        (key == ENV_STORE).then(|| ":memory:".to_string())
    })
    .expect("config with env");
    assert!(config.store_path.is_none());

    let missing = AppConfig::load_from(&temp_dir.join("absent.json"), |_| None).expect("defaults");
    assert_eq!(missing, AppConfig::default());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
