//! API-key resources under `/iam/v2`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions, QueryParams};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeySpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub owner: BaseModel,
    pub resource: BaseModel,
    /// Only populated in the create response; never returned again.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub spec: ApiKeySpec,
}

pub type ApiKeyList = ResourceList<ApiKey>;

/// Filters for [`ConfluentClient::list_api_keys`].
#[derive(Debug, Clone, Default)]
pub struct ApiKeyListOptions {
    pub pagination: PaginationOptions,
    /// Principal id the keys belong to (`spec.owner`).
    pub owner: Option<String>,
    /// Resource id the keys are scoped to (`spec.resource`).
    pub resource: Option<String>,
}

impl QueryParams for ApiKeyListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if let Some(owner) = &self.owner {
            pairs.push(("spec.owner", owner.clone()));
        }
        if let Some(resource) = &self.resource {
            pairs.push(("spec.resource", resource.clone()));
        }
        pairs
    }
}

/// Reference to the owner or scoped resource of a new key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub environment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeySpecReq {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub owner: ApiKeyRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ApiKeyRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyCreateReq {
    pub spec: ApiKeySpecReq,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyUpdateSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyUpdateReq {
    pub spec: ApiKeyUpdateSpec,
}

impl ConfluentClient {
    pub fn list_api_keys(&self, options: Option<&ApiKeyListOptions>) -> Result<ApiKeyList, Error> {
        let response =
            self.execute("/iam/v2/api-keys", Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_api_key(&self, api_key_id: &str) -> Result<ApiKey, Error> {
        let path = format!("/iam/v2/api-keys/{api_key_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// Create a key. The response is the only place the secret ever appears.
    pub fn create_api_key(&self, create: &ApiKeyCreateReq) -> Result<ApiKey, Error> {
        let response = self.execute("/iam/v2/api-keys", Method::Post, Some(create), None)?;
        response.expect_status(&[202])?;
        response.json()
    }

    pub fn update_api_key(
        &self,
        api_key_id: &str,
        update: &ApiKeyUpdateReq,
    ) -> Result<ApiKey, Error> {
        let path = format!("/iam/v2/api-keys/{api_key_id}");
        let response = self.execute(&path, Method::Patch, Some(update), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn delete_api_key(&self, api_key_id: &str) -> Result<(), Error> {
        let path = format!("/iam/v2/api-keys/{api_key_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[204])
    }
}
