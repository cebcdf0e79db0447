//! Environment resources under `/org/v2`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions};
use crate::types::{BaseModel, ResourceList};

/// An organization environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub display_name: String,
}

pub type EnvironmentList = ResourceList<Environment>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentCreateReq {
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentUpdateReq {
    pub display_name: String,
}

impl ConfluentClient {
    /// List environments. `None` options means no filters and the default
    /// page size.
    pub fn list_environments(
        &self,
        options: Option<&PaginationOptions>,
    ) -> Result<EnvironmentList, Error> {
        let response = self.execute(
            "/org/v2/environments",
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_environment(&self, environment_id: &str) -> Result<Environment, Error> {
        let path = format!("/org/v2/environments/{environment_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_environment(
        &self,
        create: &EnvironmentCreateReq,
    ) -> Result<Environment, Error> {
        let response = self.execute("/org/v2/environments", Method::Post, Some(create), None)?;
        response.expect_status(&[201])?;
        response.json()
    }

    pub fn update_environment(
        &self,
        environment_id: &str,
        update: &EnvironmentUpdateReq,
    ) -> Result<Environment, Error> {
        let path = format!("/org/v2/environments/{environment_id}");
        let response = self.execute(&path, Method::Patch, Some(update), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn delete_environment(&self, environment_id: &str) -> Result<(), Error> {
        let path = format!("/org/v2/environments/{environment_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[200, 204])
    }
}
