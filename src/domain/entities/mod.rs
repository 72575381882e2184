pub mod auth;
pub mod form;
pub mod notice;
pub mod page;
pub mod product;
pub mod record;
pub mod search;
pub mod user;
