use async_trait::async_trait;

use crate::domain::entities::page::{Page, PageRequest};
use crate::domain::entities::record::CrudEntity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The service does not implement the requested operation.
    Unsupported,
    NotFound,
    Validation,
    Unauthorized,
    Forbidden,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    pub fn unsupported(operation: &str) -> Self {
        Self::new(
            ApiErrorKind::Unsupported,
            format!("{operation} method not provided"),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            ApiErrorKind::Unauthorized,
            "Session expired. Please login again.",
        )
    }

    pub fn forbidden() -> Self {
        Self::new(
            ApiErrorKind::Forbidden,
            "You do not have permission to access this resource.",
        )
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server, message)
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind == ApiErrorKind::Unsupported
    }

    /// The message when present and non-empty, otherwise `fallback`.
    pub fn message_or(&self, fallback: impl Into<String>) -> String {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => fallback.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Successful write response.
#[derive(Debug, Clone, PartialEq)]
pub struct Ack<T> {
    pub data: T,
    pub message: Option<String>,
}

impl<T> Ack<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }

    pub fn message_or(&self, fallback: impl Into<String>) -> String {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => fallback.into(),
        }
    }
}

/// Backing service for a CRUD page. Listing and single-record reads are
/// optional; services without them keep the default `Unsupported` replies.
#[async_trait(?Send)]
pub trait CrudApi<T: CrudEntity> {
    async fn get_all(&self, _request: PageRequest) -> ApiResult<Page<T>> {
        Err(ApiError::unsupported("get_all"))
    }

    async fn get_by_id(&self, _id: &T::Id) -> ApiResult<T> {
        Err(ApiError::unsupported("get_by_id"))
    }

    async fn create(&self, draft: T::Draft) -> ApiResult<Ack<T>>;
    async fn update(&self, id: &T::Id, draft: T::Draft) -> ApiResult<Ack<T>>;
    async fn delete(&self, id: &T::Id) -> ApiResult<Ack<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_or_falls_back_on_blank_messages() {
        let err = ApiError {
            kind: ApiErrorKind::Server,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.message_or("Failed to load Users"), "Failed to load Users");
        assert_eq!(
            ApiError::not_found("User not found").message_or("x"),
            "User not found"
        );
    }

    #[test]
    fn display_names_kind_and_message() {
        assert_eq!(ApiError::not_found("User not found").to_string(), "NotFound: User not found");
        let bare = ApiError {
            kind: ApiErrorKind::Server,
            message: None,
        };
        assert_eq!(bare.to_string(), "Server");
    }

    #[test]
    fn ack_prefers_service_message() {
        let ack = Ack::new((), "deleted");
        assert_eq!(ack.message_or("User deleted successfully"), "deleted");
        let ack = Ack {
            data: (),
            message: None,
        };
        assert_eq!(ack.message_or("User deleted successfully"), "User deleted successfully");
    }
}
