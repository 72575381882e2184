use std::rc::Rc;

use async_trait::async_trait;

use crate::domain::entities::auth::Permission;
use crate::domain::entities::form::Validate;
use crate::domain::entities::page::{Page, PageRequest};
use crate::domain::entities::product::{Product, ProductDraft};
use crate::infra::sqlite::queries::{
    build_where_clause, delete_row, distinct_values, find_row, insert_product, map_product,
    query_rows, update_product, PRODUCTS,
};
use crate::infra::sqlite::store::{
    invalid_draft, invalid_filter, store_failure, today, SqliteStore,
};
use crate::usecase::ports::api::{Ack, ApiError, ApiResult, CrudApi};
use crate::usecase::ports::auth::AuthContext;
use crate::usecase::ports::options::{OptionLoader, SelectOption};

pub struct SqliteProductApi {
    store: Rc<SqliteStore>,
    auth: Rc<AuthContext>,
}

impl SqliteProductApi {
    pub fn new(store: Rc<SqliteStore>, auth: Rc<AuthContext>) -> Self {
        Self { store, auth }
    }

    fn load(&self, id: i64) -> ApiResult<Product> {
        find_row(self.store.conn(), &PRODUCTS, id, map_product)
            .map_err(store_failure)?
            .ok_or_else(|| ApiError::not_found("Product not found"))
    }
}

fn apply_draft(product: &mut Product, draft: &ProductDraft) -> ApiResult<()> {
    product.price = draft
        .price
        .ok_or_else(|| ApiError::validation("Please enter the price"))?;
    product.name = draft.name.trim().to_string();
    product.stock = draft.stock.unwrap_or(0);
    product.category = draft.category.clone();
    product.description = draft.description.trim().to_string();
    product.status = draft.status;
    Ok(())
}

#[async_trait(?Send)]
impl CrudApi<Product> for SqliteProductApi {
    async fn get_all(&self, request: PageRequest) -> ApiResult<Page<Product>> {
        self.auth.authorize(Some(Permission::ViewProducts))?;
        let filter = build_where_clause(&PRODUCTS, &request.searches).map_err(invalid_filter)?;
        let (products, total) = query_rows(
            self.store.conn(),
            &PRODUCTS,
            &filter,
            request.limit,
            request.offset(),
            map_product,
        )
        .map_err(store_failure)?;
        Ok(Page::new(products, total, request.page, request.limit))
    }

    async fn get_by_id(&self, id: &i64) -> ApiResult<Product> {
        self.auth.authorize(Some(Permission::ViewProducts))?;
        self.load(*id)
    }

    async fn create(&self, draft: ProductDraft) -> ApiResult<Ack<Product>> {
        self.auth.authorize(Some(Permission::ManageProducts))?;
        draft.validate().map_err(invalid_draft)?;

        let mut product = Product {
            id: 0,
            name: String::new(),
            price: 0.0,
            stock: 0,
            category: String::new(),
            description: String::new(),
            status: draft.status,
            created_on: today(),
            updated_on: None,
        };
        apply_draft(&mut product, &draft)?;
        product.id = insert_product(self.store.conn(), &product).map_err(store_failure)?;
        tracing::info!(id = product.id, name = %product.name, "product created");
        Ok(Ack::new(product, "Product created successfully"))
    }

    async fn update(&self, id: &i64, draft: ProductDraft) -> ApiResult<Ack<Product>> {
        self.auth.authorize(Some(Permission::ManageProducts))?;
        draft.validate().map_err(invalid_draft)?;

        let mut product = self.load(*id)?;
        apply_draft(&mut product, &draft)?;
        product.updated_on = Some(today());
        if !update_product(self.store.conn(), &product).map_err(store_failure)? {
            return Err(ApiError::not_found("Product not found"));
        }
        tracing::info!(id = product.id, "product updated");
        Ok(Ack::new(product, "Product updated successfully"))
    }

    async fn delete(&self, id: &i64) -> ApiResult<Ack<()>> {
        self.auth.authorize(Some(Permission::ManageProducts))?;
        if !delete_row(self.store.conn(), &PRODUCTS, *id).map_err(store_failure)? {
            return Err(ApiError::not_found("Product not found"));
        }
        tracing::info!(id, "product deleted");
        Ok(Ack::new((), "Product deleted successfully"))
    }
}

/// Category choices present in the store, for the async category filter.
pub struct CategoryOptions {
    store: Rc<SqliteStore>,
}

impl CategoryOptions {
    pub fn new(store: Rc<SqliteStore>) -> Self {
        Self { store }
    }
}

#[async_trait(?Send)]
impl OptionLoader for CategoryOptions {
    async fn load(&self, keyword: &str) -> anyhow::Result<Vec<SelectOption>> {
        let keyword = keyword.trim().to_lowercase();
        let categories = distinct_values(self.store.conn(), &PRODUCTS, "category")?;
        Ok(categories
            .into_iter()
            .filter(|category| keyword.is_empty() || category.to_lowercase().contains(&keyword))
            .map(|category| SelectOption::new(category.clone(), category))
            .collect())
    }
}
