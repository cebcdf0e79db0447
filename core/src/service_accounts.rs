//! Service-account resources under `/iam/v2`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions, QueryParams};
use crate::types::{BaseModel, ResourceList};

/// A machine principal owned by the organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

pub type ServiceAccountList = ResourceList<ServiceAccount>;

/// Filters for [`ConfluentClient::list_service_accounts`].
#[derive(Debug, Clone, Default)]
pub struct ServiceAccountListOptions {
    pub pagination: PaginationOptions,
    /// Each entry becomes its own repeated `display_name` parameter.
    pub display_names: Vec<String>,
}

impl QueryParams for ServiceAccountListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        for name in &self.display_names {
            pairs.push(("display_name", name.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountCreateReq {
    pub display_name: String,
    pub description: String,
}

/// Only the description of a service account can change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountUpdateReq {
    pub description: String,
}

impl ConfluentClient {
    pub fn list_service_accounts(
        &self,
        options: Option<&ServiceAccountListOptions>,
    ) -> Result<ServiceAccountList, Error> {
        let response = self.execute(
            "/iam/v2/service-accounts",
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_service_account(&self, service_account_id: &str) -> Result<ServiceAccount, Error> {
        let path = format!("/iam/v2/service-accounts/{service_account_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_service_account(
        &self,
        create: &ServiceAccountCreateReq,
    ) -> Result<ServiceAccount, Error> {
        let response =
            self.execute("/iam/v2/service-accounts", Method::Post, Some(create), None)?;
        response.expect_status(&[201])?;
        response.json()
    }

    pub fn update_service_account(
        &self,
        service_account_id: &str,
        update: &ServiceAccountUpdateReq,
    ) -> Result<ServiceAccount, Error> {
        let path = format!("/iam/v2/service-accounts/{service_account_id}");
        let response = self.execute(&path, Method::Patch, Some(update), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn delete_service_account(&self, service_account_id: &str) -> Result<(), Error> {
        let path = format!("/iam/v2/service-accounts/{service_account_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[200, 204])
    }
}
