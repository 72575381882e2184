pub mod api;
pub mod auth;
pub mod notifier;
pub mod options;
