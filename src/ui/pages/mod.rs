pub mod account;
pub mod auth;
pub mod crud_page;
pub mod dashboard;
pub mod products;
pub mod users;
