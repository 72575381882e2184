#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.filter(|text| !text.is_empty()),
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, "Success", Some(description.into()))
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, "Info", Some(description.into()))
    }

    pub fn warning(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, "Warning", Some(description.into()))
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, "Error", Some(description.into()))
    }
}
