use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection};

use crate::domain::entities::auth::Role;
use crate::domain::entities::product::CATEGORIES;
use crate::domain::entities::record::Status;

pub const SEED_USERS: i64 = 30;
pub const SEED_PRODUCTS: i64 = 50;

/// Opens the store file, or a private in-memory database when `store_path` is `None`.
pub fn open_connection(store_path: Option<&Path>) -> Result<Connection> {
    let conn = match store_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
            }
            Connection::open(path)
                .with_context(|| format!("failed to open store: {}", path.display()))?
        }
        None => Connection::open_in_memory().context("failed to open in-memory store")?,
    };
    Ok(conn)
}

pub fn init_store(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL,
            full_name   TEXT NOT NULL,
            email       TEXT NOT NULL,
            role        TEXT NOT NULL,
            status      TEXT NOT NULL,
            phone       TEXT NOT NULL,
            joined_on   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            price       REAL NOT NULL,
            stock       INTEGER NOT NULL,
            category    TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status      TEXT NOT NULL,
            created_on  TEXT NOT NULL,
            updated_on  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
        ",
    )
    .context("failed to initialize schema")?;
    Ok(())
}

/// Fills empty tables with deterministic demo rows. Existing data is left alone.
pub fn seed_store(conn: &mut Connection, today: NaiveDate) -> Result<()> {
    let tx = conn
        .transaction()
        .context("failed to start seed transaction")?;

    let users: i64 = tx
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .context("failed to count users")?;
    if users == 0 {
        let mut insert_user = tx
            .prepare(
                "INSERT INTO users(username, full_name, email, role, status, phone, joined_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .context("failed to prepare user seed")?;
        for i in 1..=SEED_USERS {
            let role = [Role::Admin, Role::User, Role::Moderator][(i % 3) as usize];
            let status = if i % 4 == 0 { Status::Inactive } else { Status::Active };
            let joined_on =
                NaiveDate::from_ymd_opt(2021 + (i % 4) as i32, (i % 9 + 1) as u32, (i % 28 + 1) as u32)
                    .unwrap_or(today);
            insert_user
                .execute(params![
                    format!("user{i}"),
                    format!("User {i}"),
                    format!("user{i}@example.com"),
                    role.as_str(),
                    status.as_str(),
                    format!("09{i:08}"),
                    joined_on.to_string(),
                ])
                .context("failed to seed user")?;
        }
    }

    let products: i64 = tx
        .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .context("failed to count products")?;
    if products == 0 {
        let mut insert_product = tx
            .prepare(
                "INSERT INTO products(name, price, stock, category, description, status, created_on)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )
            .context("failed to prepare product seed")?;
        for i in 1..=SEED_PRODUCTS {
            let category = CATEGORIES[(i as usize) % CATEGORIES.len()];
            let status = if i % 5 == 0 { Status::Inactive } else { Status::Active };
            let created_on = today.checked_sub_days(Days::new((i * 3) as u64)).unwrap_or(today);
            insert_product
                .execute(params![
                    format!("Product {i}"),
                    ((i * 37) % 500) as f64 + 9.99,
                    (i * 13) % 120,
                    category,
                    format!("Description for product {i}"),
                    status.as_str(),
                    created_on.to_string(),
                ])
                .context("failed to seed product")?;
        }
    }

    tx.commit().context("failed to commit seed data")?;
    if users == 0 || products == 0 {
        tracing::info!(users = users == 0, products = products == 0, "seeded demo data");
    }
    Ok(())
}
