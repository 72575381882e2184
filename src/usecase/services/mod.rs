pub mod auth_service;
pub mod crud_controller;
