//! User resources under `/iam/v2`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions};
use crate::types::{BaseModel, ResourceList};

/// A human principal in the organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

pub type UserList = ResourceList<User>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdateReq {
    pub full_name: String,
}

impl ConfluentClient {
    pub fn list_users(&self, options: Option<&PaginationOptions>) -> Result<UserList, Error> {
        let response = self.execute("/iam/v2/users", Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, Error> {
        let path = format!("/iam/v2/users/{user_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn update_user(&self, user_id: &str, update: &UserUpdateReq) -> Result<User, Error> {
        let path = format!("/iam/v2/users/{user_id}");
        let response = self.execute(&path, Method::Patch, Some(update), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn delete_user(&self, user_id: &str) -> Result<(), Error> {
        let path = format!("/iam/v2/users/{user_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[200, 204])
    }
}
