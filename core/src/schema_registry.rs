//! Schema-registry cluster resources under `/srcm/v3`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions, QueryParams};
use crate::types::{BaseModel, CloudProvider, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRegistrySpec {
    pub display_name: String,
    pub cloud: Option<CloudProvider>,
    pub region: String,
    pub http_endpoint: String,
    pub package: String,
    pub environment: BaseModel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistryCluster {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub spec: SchemaRegistrySpec,
}

pub type SchemaRegistryClusterList = ResourceList<SchemaRegistryCluster>;

#[derive(Debug, Clone, Default)]
pub struct SchemaRegistryListOptions {
    pub pagination: PaginationOptions,
    pub environment: Option<String>,
}

impl QueryParams for SchemaRegistryListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if let Some(environment) = &self.environment {
            pairs.push(("environment", environment.clone()));
        }
        pairs
    }
}

impl ConfluentClient {
    pub fn list_schema_registry_clusters(
        &self,
        options: Option<&SchemaRegistryListOptions>,
    ) -> Result<SchemaRegistryClusterList, Error> {
        let response =
            self.execute("/srcm/v3/clusters", Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_schema_registry_cluster(
        &self,
        cluster_id: &str,
        options: Option<&SchemaRegistryListOptions>,
    ) -> Result<SchemaRegistryCluster, Error> {
        let path = format!("/srcm/v3/clusters/{cluster_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }
}
