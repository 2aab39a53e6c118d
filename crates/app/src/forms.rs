//! Form-state objects backing the create/edit forms.
//!
//! One structured object per form, mutated through a single
//! `set_field` handler keyed by input name. Validation delegates to the
//! request DTOs' `validator` rules; failures never reach the network.

use std::collections::HashMap;

use shared_types::{
    AppError, CreateAccountRequest, CreateProjectRequest, LoginRequest, Project, ProjectStatus,
    UpdateAccountRequest, UpdateProjectRequest, User,
};
use validator::Validate;

fn field_errors_of(result: Result<(), validator::ValidationErrors>) -> HashMap<String, String> {
    match result {
        Ok(()) => HashMap::new(),
        Err(errors) => AppError::from(errors).field_errors,
    }
}

/// Credentials form backing the login page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "email" => self.email = value,
            "password" => self.password = value,
            _ => {}
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        field_errors_of(self.to_request().validate())
    }
}

/// Account creation form: register page, admin's create-user form and
/// manager's create-admin form all share it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl AccountForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            "password" => self.password = value,
            "password_confirmation" => self.password_confirmation = value,
            _ => {}
        }
    }

    pub fn to_request(&self) -> CreateAccountRequest {
        CreateAccountRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            password_confirmation: self.password_confirmation.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        field_errors_of(self.to_request().validate())
    }
}

/// Row-scoped edit form for a user or admin account.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditAccountForm {
    pub name: String,
    pub email: String,
}

impl EditAccountForm {
    pub fn from_account(account: &User) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
        }
    }

    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "name" => self.name = value,
            "email" => self.email = value,
            _ => {}
        }
    }

    pub fn to_request(&self) -> UpdateAccountRequest {
        UpdateAccountRequest {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        field_errors_of(self.to_request().validate())
    }
}

/// Project creation form with an assignee set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub user_ids: Vec<i64>,
}

impl ProjectForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "description" => self.description = value,
            "status" => self.status = ProjectStatus::from_str_or_default(&value),
            _ => {}
        }
    }

    /// Add or remove an assignee id.
    pub fn toggle_assignee(&mut self, id: i64) {
        if self.user_ids.contains(&id) {
            self.user_ids.retain(|&u| u != id);
        } else {
            self.user_ids.push(id);
        }
    }

    pub fn to_request(&self) -> CreateProjectRequest {
        CreateProjectRequest {
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            status: self.status,
            user_ids: self.user_ids.clone(),
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        field_errors_of(self.to_request().validate())
    }
}

/// Row-scoped edit form for a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditProjectForm {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl EditProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone().unwrap_or_default(),
            status: project.status,
        }
    }

    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "title" => self.title = value,
            "description" => self.description = value,
            "status" => self.status = ProjectStatus::from_str_or_default(&value),
            _ => {}
        }
    }

    pub fn to_request(&self) -> UpdateProjectRequest {
        UpdateProjectRequest {
            title: self.title.clone(),
            description: if self.description.trim().is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            status: self.status,
        }
    }

    pub fn validate(&self) -> HashMap<String, String> {
        field_errors_of(self.to_request().validate())
    }
}
