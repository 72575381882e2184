use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::domain::entities::form::Validate;

/// A record managed through a CRUD page.
pub trait CrudEntity: Clone + Debug + 'static {
    type Id: Clone + PartialEq + Display + Debug + 'static;
    /// Form state used while creating or editing.
    type Draft: Clone + Default + Debug + PartialEq + Validate + 'static;

    fn id(&self) -> Self::Id;
    fn to_draft(&self) -> Self::Draft;

    /// Short label used in messages; the id when nothing better exists.
    fn label(&self) -> String {
        self.id().to_string()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(Status::Active),
            "inactive" => Some(Status::Inactive),
            _ => None,
        }
    }
}
