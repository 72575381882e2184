pub mod product_api;
pub mod queries;
pub mod schema;
pub mod store;
pub mod user_api;
