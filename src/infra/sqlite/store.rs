use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

use crate::domain::entities::form::FieldErrors;
use crate::infra::sqlite::queries::{count_where, FilterError, PRODUCTS, USERS};
use crate::infra::sqlite::schema::{init_store, open_connection, seed_store};
use crate::usecase::ports::api::ApiError;

pub const SERVER_ERROR: &str = "Server error. Please try again later.";

/// Seeded backing store shared by the mock API services.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(store_path: Option<&Path>, today: NaiveDate) -> Result<Self> {
        let mut conn = open_connection(store_path)?;
        init_store(&conn)?;
        seed_store(&mut conn, today)?;
        tracing::info!(
            store = %store_path.map(|p| p.display().to_string()).unwrap_or_else(|| ":memory:".to_string()),
            "store ready"
        );
        Ok(Self { conn })
    }

    pub fn in_memory(today: NaiveDate) -> Result<Self> {
        Self::open(None, today)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let inventory_value: f64 = self
            .conn
            .query_row(
                "SELECT COALESCE(SUM(price * stock), 0.0) FROM products",
                [],
                |row| row.get(0),
            )
            .context("failed to sum inventory value")?;

        Ok(DashboardStats {
            total_users: count_where(&self.conn, &USERS, "1 = 1")?,
            active_users: count_where(&self.conn, &USERS, "status = 'active'")?,
            total_products: count_where(&self.conn, &PRODUCTS, "1 = 1")?,
            low_stock_products: count_where(&self.conn, &PRODUCTS, "stock < 10")?,
            inventory_value,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub total_products: u64,
    pub low_stock_products: u64,
    pub inventory_value: f64,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn store_failure(err: anyhow::Error) -> ApiError {
    tracing::error!(error = ?err, "store operation failed");
    ApiError::server(SERVER_ERROR)
}

pub(crate) fn invalid_filter(err: FilterError) -> ApiError {
    tracing::warn!(error = %err, "rejected search filter");
    ApiError::validation(err.to_string())
}

pub(crate) fn invalid_draft(errors: FieldErrors) -> ApiError {
    let message = errors
        .iter()
        .next()
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| "Invalid data".to_string());
    ApiError::validation(message)
}
