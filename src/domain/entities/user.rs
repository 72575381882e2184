use chrono::NaiveDate;

use crate::domain::entities::auth::Role;
use crate::domain::entities::form::{is_valid_email, require_text, FieldErrors, Validate};
use crate::domain::entities::record::{CrudEntity, Status};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
    pub phone: String,
    pub joined_on: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Option<Role>,
    pub status: Status,
    pub phone: String,
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "full_name", &self.full_name, "Please enter the full name");
        require_text(&mut errors, "email", &self.email, "Please enter the email");
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.add("email", "Email is invalid");
        }
        if self.role.is_none() {
            errors.add("role", "Please select a role");
        }
        require_text(&mut errors, "phone", &self.phone, "Please enter the phone number");
        let phone = self.phone.trim();
        if !phone.is_empty() && (phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit())) {
            errors.add("phone", "Phone number must be exactly 10 digits");
        }
        errors.into_result()
    }
}

impl CrudEntity for User {
    type Id = i64;
    type Draft = UserDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            role: Some(self.role),
            status: self.status,
            phone: self.phone.clone(),
        }
    }

    fn label(&self) -> String {
        self.full_name.clone()
    }
}
