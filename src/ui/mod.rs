pub mod components;
pub mod filters;
pub mod notifications;
pub mod pages;
pub mod state;
