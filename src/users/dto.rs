use serde::Deserialize;

use crate::error::ApiError;
use crate::users::repo_types::{NewUser, UserChanges};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn present(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

fn not_blank(field: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(ApiError::Validation(format!("{field} must not be empty")))
        }
        other => Ok(other),
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: present("name", req.name)?,
            email: present("email", req.email)?,
        })
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = ApiError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        if req.name.is_none() && req.email.is_none() {
            return Err(ApiError::Validation(
                "at least one of name or email is required".into(),
            ));
        }
        Ok(Self {
            name: not_blank("name", req.name)?,
            email: not_blank("email", req.email)?,
        })
    }
}
