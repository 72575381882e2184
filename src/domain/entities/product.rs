use chrono::NaiveDate;

use crate::domain::entities::form::{require_text, FieldErrors, Validate};
use crate::domain::entities::record::{CrudEntity, Status};

pub const CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Food", "Books", "Home & Garden"];

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub description: String,
    pub status: Status,
    pub created_on: NaiveDate,
    pub updated_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: String,
    pub description: String,
    pub status: Status,
}

impl Validate for ProductDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Please enter the product name");
        match self.price {
            None => errors.add("price", "Please enter the price"),
            Some(price) if !price.is_finite() || price <= 0.0 => {
                errors.add("price", "Price must be greater than zero")
            }
            Some(_) => {}
        }
        if matches!(self.stock, Some(stock) if stock < 0) {
            errors.add("stock", "Stock cannot be negative");
        }
        require_text(&mut errors, "category", &self.category, "Please select a category");
        if !self.category.is_empty() && !CATEGORIES.contains(&self.category.as_str()) {
            errors.add("category", "Unknown category");
        }
        errors.into_result()
    }
}

impl CrudEntity for Product {
    type Id = i64;
    type Draft = ProductDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: Some(self.price),
            stock: Some(self.stock),
            category: self.category.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_be_positive() {
        let draft = ProductDraft {
            name: "Lamp".to_string(),
            price: Some(0.0),
            stock: Some(3),
            category: "Home & Garden".to_string(),
            ..ProductDraft::default()
        };
        let errors = draft.validate().expect_err("zero price should fail");
        assert_eq!(errors.get("price"), Some("Price must be greater than zero"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let draft = ProductDraft {
            name: "Lamp".to_string(),
            price: Some(12.5),
            category: "Toys".to_string(),
            ..ProductDraft::default()
        };
        let errors = draft.validate().expect_err("unknown category should fail");
        assert_eq!(errors.get("category"), Some("Unknown category"));
    }
}
