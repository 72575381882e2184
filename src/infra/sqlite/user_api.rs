use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::entities::auth::Permission;
use crate::domain::entities::form::Validate;
use crate::domain::entities::page::{Page, PageRequest};
use crate::domain::entities::user::{User, UserDraft};
use crate::infra::sqlite::queries::{
    build_where_clause, delete_row, find_row, insert_user, map_user, query_rows, update_user, USERS,
};
use crate::infra::sqlite::store::{
    invalid_draft, invalid_filter, store_failure, today, SqliteStore,
};
use crate::usecase::ports::api::{Ack, ApiError, ApiResult, CrudApi};
use crate::usecase::ports::auth::AuthContext;

pub struct SqliteUserApi {
    store: Rc<SqliteStore>,
    auth: Rc<AuthContext>,
}

impl SqliteUserApi {
    pub fn new(store: Rc<SqliteStore>, auth: Rc<AuthContext>) -> Self {
        Self { store, auth }
    }

    fn load(&self, id: i64) -> ApiResult<User> {
        find_row(self.store.conn(), &USERS, id, map_user)
            .map_err(store_failure)?
            .ok_or_else(|| ApiError::not_found("User not found"))
    }
}

/// Falls back to the email's local part when no username was entered.
fn username_for(draft: &UserDraft) -> String {
    let username = draft.username.trim();
    if !username.is_empty() {
        return username.to_string();
    }
    draft
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn apply_draft(user: &mut User, draft: &UserDraft) -> ApiResult<()> {
    user.role = draft
        .role
        .ok_or_else(|| ApiError::validation("Please select a role"))?;
    user.username = username_for(draft);
    user.full_name = draft.full_name.trim().to_string();
    user.email = draft.email.trim().to_string();
    user.status = draft.status;
    user.phone = draft.phone.trim().to_string();
    Ok(())
}

#[async_trait(?Send)]
impl CrudApi<User> for SqliteUserApi {
    async fn get_all(&self, request: PageRequest) -> ApiResult<Page<User>> {
        self.auth.authorize(Some(Permission::ViewUsers))?;
        let filter = build_where_clause(&USERS, &request.searches).map_err(invalid_filter)?;
        let (users, total) = query_rows(
            self.store.conn(),
            &USERS,
            &filter,
            request.limit,
            request.offset(),
            map_user,
        )
        .map_err(store_failure)?;
        Ok(Page::new(users, total, request.page, request.limit))
    }

    async fn get_by_id(&self, id: &i64) -> ApiResult<User> {
        self.auth.authorize(Some(Permission::ViewUsers))?;
        self.load(*id)
    }

    async fn create(&self, draft: UserDraft) -> ApiResult<Ack<User>> {
        self.auth.authorize(Some(Permission::CreateUser))?;
        draft.validate().map_err(invalid_draft)?;

        let role = draft
            .role
            .ok_or_else(|| ApiError::validation("Please select a role"))?;
        let mut user = User {
            id: 0,
            username: String::new(),
            full_name: String::new(),
            email: String::new(),
            role,
            status: draft.status,
            phone: String::new(),
            joined_on: today(),
        };
        apply_draft(&mut user, &draft)?;
        user.id = insert_user(self.store.conn(), &user).map_err(store_failure)?;
        tracing::info!(id = user.id, email = %user.email, "user created");
        Ok(Ack::new(user, "User created successfully"))
    }

    async fn update(&self, id: &i64, draft: UserDraft) -> ApiResult<Ack<User>> {
        self.auth.authorize(Some(Permission::EditUser))?;
        draft.validate().map_err(invalid_draft)?;

        let mut user = self.load(*id)?;
        apply_draft(&mut user, &draft)?;
        if !update_user(self.store.conn(), &user).map_err(store_failure)? {
            return Err(ApiError::not_found("User not found"));
        }
        tracing::info!(id = user.id, "user updated");
        Ok(Ack::new(user, "User updated successfully"))
    }

    async fn delete(&self, id: &i64) -> ApiResult<Ack<()>> {
        self.auth.authorize(Some(Permission::DeleteUser))?;
        if !delete_row(self.store.conn(), &USERS, *id).map_err(store_failure)? {
            return Err(ApiError::not_found("User not found"));
        }
        tracing::info!(id, "user deleted");
        Ok(Ack::new((), "User deleted successfully"))
    }
}
