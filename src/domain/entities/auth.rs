use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Role::Admin),
            "moderator" => Some(Role::Moderator),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewDashboard,
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,
    ViewProducts,
    ManageProducts,
    ViewSettings,
    ManageSettings,
    ChangePassword,
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewUsers,
    Permission::CreateUser,
    Permission::EditUser,
    Permission::DeleteUser,
    Permission::ViewProducts,
    Permission::ManageProducts,
    Permission::ViewSettings,
    Permission::ManageSettings,
    Permission::ChangePassword,
];

// Moderators see everything but cannot manage users.
const MODERATOR_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewUsers,
    Permission::ViewProducts,
    Permission::ManageProducts,
    Permission::ViewSettings,
    Permission::ChangePassword,
];

const USER_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewProducts,
    Permission::ViewSettings,
    Permission::ChangePassword,
];

pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Moderator => MODERATOR_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
    }
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ResetPassword,
    Dashboard,
    Users,
    Products,
    Profile,
    Settings,
}

impl Route {
    pub const MENU: [Route; 5] = [
        Route::Dashboard,
        Route::Users,
        Route::Products,
        Route::Profile,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ResetPassword => "/reset-password",
            Route::Dashboard => "/dashboard",
            Route::Users => "/users/list",
            Route::Products => "/products",
            Route::Profile => "/users/profile",
            Route::Settings => "/settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Register => "Register",
            Route::ResetPassword => "Reset password",
            Route::Dashboard => "Dashboard",
            Route::Users => "Users",
            Route::Products => "Products",
            Route::Profile => "Profile",
            Route::Settings => "Settings",
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::ResetPassword)
    }

    /// Any one of these grants access; an empty list means everyone.
    pub fn required_permissions(self) -> &'static [Permission] {
        match self {
            Route::Dashboard => &[Permission::ViewDashboard],
            Route::Users => &[Permission::ViewUsers],
            Route::Products => &[Permission::ViewProducts],
            Route::Settings => &[Permission::ViewSettings],
            Route::Login | Route::Register | Route::ResetPassword | Route::Profile => &[],
        }
    }
}

pub fn can_access_route(role: Role, route: Route) -> bool {
    let required = route.required_permissions();
    required.is_empty() || has_any_permission(role, required)
}

pub fn accessible_routes(role: Role) -> Vec<Route> {
    Route::MENU
        .into_iter()
        .filter(|route| can_access_route(role, *route))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_permission() {
        assert!(ADMIN_PERMISSIONS
            .iter()
            .all(|permission| has_permission(Role::Admin, *permission)));
        assert!(has_permission(Role::Admin, Permission::DeleteUser));
    }

    #[test]
    fn moderator_cannot_manage_users() {
        assert!(has_permission(Role::Moderator, Permission::ViewUsers));
        assert!(!has_any_permission(
            Role::Moderator,
            &[Permission::CreateUser, Permission::EditUser, Permission::DeleteUser]
        ));
    }

    #[test]
    fn user_menu_hides_user_management() {
        let routes = accessible_routes(Role::User);
        assert!(!routes.contains(&Route::Users));
        assert!(routes.contains(&Route::Profile), "profile has no requirements");
        assert!(routes.contains(&Route::Dashboard));
    }
}
