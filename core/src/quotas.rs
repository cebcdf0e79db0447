//! Client-quota resources under `/kafka-quotas/v1`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{PaginationOptions, QueryParams};
use crate::types::{BaseModel, ResourceList, SpecWrap};

/// Byte-rate limits enforced by a quota.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaThroughput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ingress_byte_rate: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub egress_byte_rate: String,
}

/// Reference to a cluster, principal, or environment a quota points at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaRef {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub related: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub resource_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQuotaSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<QuotaThroughput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<QuotaRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<QuotaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<QuotaRef>,
}

/// A throughput quota applied to principals on a cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientQuota {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub spec: ClientQuotaSpec,
}

pub type ClientQuotaList = ResourceList<ClientQuota>;

/// Scope for [`ConfluentClient::list_client_quotas`]. The quota API refuses
/// unscoped listings, so these options are mandatory — taken by reference,
/// not wrapped in `Option`.
#[derive(Debug, Clone, Default)]
pub struct ClientQuotaListOptions {
    pub pagination: PaginationOptions,
    /// Cluster the quotas apply to (`spec.cluster`).
    pub cluster: String,
    pub environment: String,
}

impl QueryParams for ClientQuotaListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if !self.cluster.is_empty() {
            pairs.push(("spec.cluster", self.cluster.clone()));
        }
        if !self.environment.is_empty() {
            pairs.push(("environment", self.environment.clone()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQuotaCreateReq {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<QuotaThroughput>,
    pub cluster: QuotaRef,
    pub principals: Vec<QuotaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<QuotaRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQuotaUpdateReq {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput: Option<QuotaThroughput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub principals: Vec<QuotaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<QuotaRef>,
}

impl ConfluentClient {
    pub fn list_client_quotas(
        &self,
        options: &ClientQuotaListOptions,
    ) -> Result<ClientQuotaList, Error> {
        let response = self.execute(
            "/kafka-quotas/v1/client-quotas",
            Method::Get,
            NO_BODY,
            Some(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_client_quota(&self, quota_id: &str) -> Result<ClientQuota, Error> {
        let path = format!("/kafka-quotas/v1/client-quotas/{quota_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn create_client_quota(
        &self,
        create: &ClientQuotaCreateReq,
    ) -> Result<ClientQuota, Error> {
        let body = SpecWrap { spec: create };
        let response = self.execute(
            "/kafka-quotas/v1/client-quotas",
            Method::Post,
            Some(&body),
            None,
        )?;
        response.expect_status(&[202])?;
        response.json()
    }

    pub fn update_client_quota(
        &self,
        quota_id: &str,
        update: &ClientQuotaUpdateReq,
    ) -> Result<ClientQuota, Error> {
        let path = format!("/kafka-quotas/v1/client-quotas/{quota_id}");
        let body = SpecWrap { spec: update };
        let response = self.execute(&path, Method::Patch, Some(&body), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn delete_client_quota(&self, quota_id: &str) -> Result<(), Error> {
        let path = format!("/kafka-quotas/v1/client-quotas/{quota_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, None)?;
        response.expect_status(&[204])
    }
}
