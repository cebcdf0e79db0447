//! Role-binding resources under `/iam/v2`.
//!
//! Bindings grant a role to a principal over the resources matched by a CRN
//! pattern (the hierarchical organization/environment/cluster name).

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions, QueryParams};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleBinding {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub crn_pattern: String,
}

pub type RoleBindingList = ResourceList<RoleBinding>;

/// Filters for [`ConfluentClient::list_role_bindings`].
#[derive(Debug, Clone, Default)]
pub struct RoleBindingListOptions {
    pub pagination: PaginationOptions,
    pub principal: Option<String>,
    pub role_name: Option<String>,
    pub crn_pattern: Option<String>,
}

impl QueryParams for RoleBindingListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if let Some(principal) = &self.principal {
            pairs.push(("principal", principal.clone()));
        }
        if let Some(role_name) = &self.role_name {
            pairs.push(("role_name", role_name.clone()));
        }
        if let Some(crn_pattern) = &self.crn_pattern {
            pairs.push(("crn_pattern", crn_pattern.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleBindingCreateReq {
    pub principal: String,
    pub role_name: String,
    pub crn_pattern: String,
}

impl ConfluentClient {
    pub fn list_role_bindings(
        &self,
        options: Option<&RoleBindingListOptions>,
    ) -> Result<RoleBindingList, Error> {
        let response = self.execute(
            "/iam/v2/role-bindings",
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_role_binding(
        &self,
        create: &RoleBindingCreateReq,
    ) -> Result<RoleBinding, Error> {
        let response = self.execute("/iam/v2/role-bindings", Method::Post, Some(create), None)?;
        response.expect_status(&[201])?;
        response.json()
    }

    pub fn delete_role_binding(&self, role_binding_id: &str) -> Result<(), Error> {
        let path = format!("/iam/v2/role-bindings/{role_binding_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[200, 204])
    }
}
