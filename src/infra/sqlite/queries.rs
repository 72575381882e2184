use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, types::Value, Connection, OptionalExtension, Row};

use crate::domain::entities::auth::Role;
use crate::domain::entities::product::Product;
use crate::domain::entities::record::Status;
use crate::domain::entities::search::{ColumnSearchItem, FilterValue, SearchOperator};
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Number,
    Date,
}

/// Maps a searchable field name to its SQL column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub field: &'static str,
    pub sql: &'static str,
    pub kind: ColumnKind,
}

pub struct Table {
    pub name: &'static str,
    pub select: &'static str,
    pub columns: &'static [Column],
}

pub const USERS: Table = Table {
    name: "users",
    select: "SELECT id, username, full_name, email, role, status, phone, joined_on FROM users",
    columns: &[
        Column { field: "id", sql: "id", kind: ColumnKind::Number },
        Column { field: "username", sql: "username", kind: ColumnKind::Text },
        Column { field: "name", sql: "full_name", kind: ColumnKind::Text },
        Column { field: "full_name", sql: "full_name", kind: ColumnKind::Text },
        Column { field: "email", sql: "email", kind: ColumnKind::Text },
        Column { field: "role", sql: "role", kind: ColumnKind::Text },
        Column { field: "status", sql: "status", kind: ColumnKind::Text },
        Column { field: "phone", sql: "phone", kind: ColumnKind::Text },
        Column { field: "joined_on", sql: "joined_on", kind: ColumnKind::Date },
    ],
};

pub const PRODUCTS: Table = Table {
    name: "products",
    select: "SELECT id, name, price, stock, category, description, status, created_on, updated_on
             FROM products",
    columns: &[
        Column { field: "id", sql: "id", kind: ColumnKind::Number },
        Column { field: "name", sql: "name", kind: ColumnKind::Text },
        Column { field: "price", sql: "price", kind: ColumnKind::Number },
        Column { field: "stock", sql: "stock", kind: ColumnKind::Number },
        Column { field: "category", sql: "category", kind: ColumnKind::Text },
        Column { field: "description", sql: "description", kind: ColumnKind::Text },
        Column { field: "status", sql: "status", kind: ColumnKind::Text },
        Column { field: "created_on", sql: "created_on", kind: ColumnKind::Date },
        Column { field: "updated_on", sql: "updated_on", kind: ColumnKind::Date },
    ],
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown search field `{0}`")]
    UnknownField(String),
    #[error("operator `{operator}` is not supported for field `{field}`")]
    Unsupported {
        field: String,
        operator: SearchOperator,
    },
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidValue { field: String, value: String },
}

/// `AND`-joined conditions with their positional parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    pub clauses: Vec<String>,
    pub params: Vec<Value>,
}

impl WhereClause {
    pub fn sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }
}

pub fn build_where_clause(
    table: &Table,
    searches: &[ColumnSearchItem],
) -> Result<WhereClause, FilterError> {
    let mut clause = WhereClause::default();
    for item in searches {
        let column = table
            .columns
            .iter()
            .find(|column| column.field == item.field)
            .ok_or_else(|| FilterError::UnknownField(item.field.clone()))?;
        push_condition(&mut clause, column, item)?;
    }
    Ok(clause)
}

fn push_condition(
    clause: &mut WhereClause,
    column: &Column,
    item: &ColumnSearchItem,
) -> Result<(), FilterError> {
    let col = column.sql;
    let unsupported = || FilterError::Unsupported {
        field: item.field.clone(),
        operator: item.operator,
    };

    match (item.operator, &item.value) {
        (SearchOperator::Contain | SearchOperator::StartWith | SearchOperator::EndWith, value) => {
            let text = escape_like(&value.to_string());
            let pattern = match item.operator {
                SearchOperator::StartWith => format!("{text}%"),
                SearchOperator::EndWith => format!("%{text}"),
                _ => format!("%{text}%"),
            };
            clause.clauses.push(format!("{col} LIKE ? ESCAPE '\\'"));
            clause.params.push(Value::Text(pattern));
        }
        (SearchOperator::Equal | SearchOperator::NotEqual, value) => {
            let sql_op = if item.operator == SearchOperator::Equal { "=" } else { "<>" };
            let collate = if column.kind == ColumnKind::Text { " COLLATE NOCASE" } else { "" };
            clause.clauses.push(format!("{col} {sql_op} ?{collate}"));
            clause.params.push(scalar(column, &item.field, value)?);
        }
        (
            SearchOperator::Lt | SearchOperator::Gt | SearchOperator::Lte | SearchOperator::Gte,
            value,
        ) => {
            clause.clauses.push(format!("{col} {} ?", item.operator.as_str()));
            clause.params.push(scalar(column, &item.field, value)?);
        }
        (SearchOperator::Between, FilterValue::NumberRange(min, max)) => {
            let min = min.map(Value::Real);
            let max = max.map(Value::Real);
            push_range(clause, col, min, max);
        }
        (SearchOperator::Between, FilterValue::DateRange(from, to)) => {
            let from = from.map(|d| Value::Text(d.to_string()));
            let to = to.map(|d| Value::Text(d.to_string()));
            push_range(clause, col, from, to);
        }
        (SearchOperator::In, FilterValue::List(items)) => {
            if items.is_empty() {
                return Ok(());
            }
            let placeholders = std::iter::repeat_n("?", items.len())
                .collect::<Vec<_>>()
                .join(",");
            clause.clauses.push(format!("{col} IN ({placeholders})"));
            for raw in items {
                clause
                    .params
                    .push(scalar(column, &item.field, &FilterValue::Text(raw.clone()))?);
            }
        }
        _ => return Err(unsupported()),
    }
    Ok(())
}

/// Open ends drop their side of the range.
fn push_range(clause: &mut WhereClause, col: &str, low: Option<Value>, high: Option<Value>) {
    match (low, high) {
        (Some(low), Some(high)) => {
            clause.clauses.push(format!("{col} BETWEEN ? AND ?"));
            clause.params.push(low);
            clause.params.push(high);
        }
        (Some(low), None) => {
            clause.clauses.push(format!("{col} >= ?"));
            clause.params.push(low);
        }
        (None, Some(high)) => {
            clause.clauses.push(format!("{col} <= ?"));
            clause.params.push(high);
        }
        (None, None) => {}
    }
}

fn scalar(column: &Column, field: &str, value: &FilterValue) -> Result<Value, FilterError> {
    let invalid = || FilterError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    };
    match (column.kind, value) {
        (ColumnKind::Number, FilterValue::Number(number)) => Ok(Value::Real(*number)),
        (ColumnKind::Number, FilterValue::Text(raw)) => raw
            .trim()
            .parse::<f64>()
            .map(Value::Real)
            .map_err(|_| invalid()),
        (ColumnKind::Date, FilterValue::Date(date)) => Ok(Value::Text(date.to_string())),
        (ColumnKind::Date, FilterValue::Text(raw)) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|date| Value::Text(date.to_string()))
            .map_err(|_| invalid()),
        (ColumnKind::Text, FilterValue::Text(_) | FilterValue::Number(_) | FilterValue::Date(_)) => {
            Ok(Value::Text(value.to_string()))
        }
        _ => Err(invalid()),
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// One page of rows plus the filtered total.
pub fn query_rows<T>(
    conn: &Connection,
    table: &Table,
    filter: &WhereClause,
    limit: u32,
    offset: u64,
    map_row: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<(Vec<T>, u64)> {
    if limit == 0 {
        anyhow::bail!("page limit must be greater than zero")
    }
    let where_sql = filter.sql();

    let count_sql = format!("SELECT COUNT(*) FROM {}{where_sql}", table.name);
    let total: i64 = conn
        .query_row(
            &count_sql,
            rusqlite::params_from_iter(filter.params.iter().cloned()),
            |row| row.get(0),
        )
        .with_context(|| format!("failed to count {}", table.name))?;

    let page_sql = format!("{}{where_sql} ORDER BY id ASC LIMIT ? OFFSET ?", table.select);
    let mut page_params = filter.params.clone();
    page_params.push(Value::Integer(i64::from(limit)));
    page_params.push(Value::Integer(offset as i64));

    let mut stmt = conn
        .prepare(&page_sql)
        .with_context(|| format!("failed to prepare {} page query", table.name))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(page_params), map_row)
        .with_context(|| format!("failed to query {} page", table.name))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("failed to collect {} page", table.name))?;

    Ok((rows, total.max(0) as u64))
}

pub fn find_row<T>(
    conn: &Connection,
    table: &Table,
    id: i64,
    map_row: fn(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Option<T>> {
    conn.query_row(&format!("{} WHERE id = ?1", table.select), [id], map_row)
        .optional()
        .with_context(|| format!("failed to load {} #{id}", table.name))
}

pub fn delete_row(conn: &Connection, table: &Table, id: i64) -> Result<bool> {
    let affected = conn
        .execute(&format!("DELETE FROM {} WHERE id = ?1", table.name), [id])
        .with_context(|| format!("failed to delete {} #{id}", table.name))?;
    Ok(affected > 0)
}

pub fn count_where(conn: &Connection, table: &Table, condition: &str) -> Result<u64> {
    let total: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE {condition}", table.name),
            [],
            |row| row.get(0),
        )
        .with_context(|| format!("failed to count {}", table.name))?;
    Ok(total.max(0) as u64)
}

fn parse_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
    })
}

fn parse_enum<T>(row: &Row<'_>, idx: usize, parse: fn(&str) -> Option<T>) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("unexpected value `{raw}`").into(),
        )
    })
}

pub fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        role: parse_enum(row, 4, Role::parse)?,
        status: parse_enum(row, 5, Status::parse)?,
        phone: row.get(6)?,
        joined_on: parse_date_column(row, 7)?,
    })
}

pub fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    let updated_on = match row.get::<_, Option<String>>(8)? {
        Some(_) => Some(parse_date_column(row, 8)?),
        None => None,
    };
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        stock: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        status: parse_enum(row, 6, Status::parse)?,
        created_on: parse_date_column(row, 7)?,
        updated_on,
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<i64> {
    conn.execute(
        "INSERT INTO users(username, full_name, email, role, status, phone, joined_on)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.username,
            user.full_name,
            user.email,
            user.role.as_str(),
            user.status.as_str(),
            user.phone,
            user.joined_on.to_string(),
        ],
    )
    .context("failed to insert user")?;
    Ok(conn.last_insert_rowid())
}

pub fn update_user(conn: &Connection, user: &User) -> Result<bool> {
    let affected = conn
        .execute(
            "UPDATE users
             SET username = ?1, full_name = ?2, email = ?3, role = ?4, status = ?5, phone = ?6
             WHERE id = ?7",
            params![
                user.username,
                user.full_name,
                user.email,
                user.role.as_str(),
                user.status.as_str(),
                user.phone,
                user.id,
            ],
        )
        .with_context(|| format!("failed to update user #{}", user.id))?;
    Ok(affected > 0)
}

pub fn insert_product(conn: &Connection, product: &Product) -> Result<i64> {
    conn.execute(
        "INSERT INTO products(name, price, stock, category, description, status, created_on, updated_on)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            product.name,
            product.price,
            product.stock,
            product.category,
            product.description,
            product.status.as_str(),
            product.created_on.to_string(),
            product.updated_on.map(|d| d.to_string()),
        ],
    )
    .context("failed to insert product")?;
    Ok(conn.last_insert_rowid())
}

pub fn update_product(conn: &Connection, product: &Product) -> Result<bool> {
    let affected = conn
        .execute(
            "UPDATE products
             SET name = ?1, price = ?2, stock = ?3, category = ?4, description = ?5,
                 status = ?6, updated_on = ?7
             WHERE id = ?8",
            params![
                product.name,
                product.price,
                product.stock,
                product.category,
                product.description,
                product.status.as_str(),
                product.updated_on.map(|d| d.to_string()),
                product.id,
            ],
        )
        .with_context(|| format!("failed to update product #{}", product.id))?;
    Ok(affected > 0)
}

pub fn distinct_values(conn: &Connection, table: &Table, column: &str) -> Result<Vec<String>> {
    let sql_column = table
        .columns
        .iter()
        .find(|c| c.field == column)
        .map(|c| c.sql)
        .with_context(|| format!("unknown column `{column}` on {}", table.name))?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT DISTINCT {sql_column} FROM {} ORDER BY {sql_column} ASC",
            table.name
        ))
        .context("failed to prepare distinct query")?;
    let values = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query distinct values")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect distinct values")?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(field: &str, value: FilterValue, operator: SearchOperator) -> ColumnSearchItem {
        ColumnSearchItem {
            field: field.to_string(),
            value,
            operator,
        }
    }

    #[test]
    fn empty_searches_build_no_where() {
        let clause = build_where_clause(&USERS, &[]).expect("empty clause");
        assert_eq!(clause.sql(), "");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn pattern_operators_escape_like_wildcards() {
        let clause = build_where_clause(
            &USERS,
            &[item("name", FilterValue::Text("50%_off".into()), SearchOperator::StartWith)],
        )
        .expect("clause");
        assert_eq!(clause.clauses, vec!["full_name LIKE ? ESCAPE '\\'".to_string()]);
        assert_eq!(clause.params, vec![Value::Text("50\\%\\_off%".to_string())]);
    }

    #[test]
    fn open_ended_range_uses_single_comparison() {
        let clause = build_where_clause(
            &PRODUCTS,
            &[item("price", FilterValue::NumberRange(None, Some(100.0)), SearchOperator::Between)],
        )
        .expect("clause");
        assert_eq!(clause.clauses, vec!["price <= ?".to_string()]);
        assert_eq!(clause.params, vec![Value::Real(100.0)]);
    }

    #[test]
    fn in_operator_expands_placeholders() {
        let clause = build_where_clause(
            &USERS,
            &[item(
                "role",
                FilterValue::List(vec!["admin".into(), "user".into()]),
                SearchOperator::In,
            )],
        )
        .expect("clause");
        assert_eq!(clause.sql(), " WHERE role IN (?,?)");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = build_where_clause(
            &USERS,
            &[item("salary", FilterValue::Number(1.0), SearchOperator::Gt)],
        )
        .expect_err("unknown field");
        assert_eq!(err, FilterError::UnknownField("salary".to_string()));
    }

    #[test]
    fn non_numeric_text_on_number_column_is_rejected() {
        let err = build_where_clause(
            &PRODUCTS,
            &[item("stock", FilterValue::Text("many".into()), SearchOperator::Equal)],
        )
        .expect_err("invalid number");
        assert!(matches!(err, FilterError::InvalidValue { .. }));
    }

    #[test]
    fn scalar_between_is_unsupported() {
        let err = build_where_clause(
            &PRODUCTS,
            &[item("price", FilterValue::Number(3.0), SearchOperator::Between)],
        )
        .expect_err("between needs a range");
        assert!(matches!(err, FilterError::Unsupported { .. }));
    }
}
