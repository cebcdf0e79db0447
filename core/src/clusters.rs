//! Kafka cluster resources under `/cmk/v2`.

use serde::{Deserialize, Serialize};

use crate::client::{ConfluentClient, NO_BODY};
use crate::environments::Environment;
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions, QueryParams};
use crate::types::{BaseModel, CloudProvider, ResourceList, SpecWrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterAvailability {
    SingleZone,
    MultiZone,
}

/// Cluster SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterType {
    Basic,
    Standard,
    Dedicated,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaClusterConfig {
    pub kind: Option<ClusterType>,
    pub cku: i32,
    pub zones: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaClusterSpec {
    pub display_name: String,
    pub availability: Option<ClusterAvailability>,
    pub cloud: Option<CloudProvider>,
    pub region: String,
    pub kafka_bootstrap_endpoint: String,
    pub http_endpoint: String,
    pub config: KafkaClusterConfig,
    pub network: BaseModel,
    pub environment: Environment,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaClusterStatus {
    pub phase: String,
    pub cku: i32,
}

/// A provisioned Kafka cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KafkaCluster {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub spec: KafkaClusterSpec,
    #[serde(default)]
    pub status: KafkaClusterStatus,
}

pub type KafkaClusterList = ResourceList<KafkaCluster>;

/// Filters for cluster list/get/delete calls. The control plane scopes
/// clusters by environment, so most operations want `environment` set.
#[derive(Debug, Clone, Default)]
pub struct KafkaClusterListOptions {
    pub pagination: PaginationOptions,
    pub environment: Option<String>,
}

impl QueryParams for KafkaClusterListOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.pagination.extend_pairs(&mut pairs);
        if let Some(environment) = &self.environment {
            pairs.push(("environment", environment.clone()));
        }
        pairs
    }
}

/// Reference to the environment a cluster lives in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterConfigReq {
    pub kind: Option<ClusterType>,
    #[serde(default)]
    pub cku: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaClusterCreateReq {
    pub display_name: String,
    pub availability: ClusterAvailability,
    pub cloud: CloudProvider,
    pub region: String,
    pub config: ClusterConfigReq,
    pub environment: EnvironmentRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KafkaClusterUpdateReq {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ClusterConfigReq>,
    pub environment: EnvironmentRef,
}

impl ConfluentClient {
    pub fn list_kafka_clusters(
        &self,
        options: Option<&KafkaClusterListOptions>,
    ) -> Result<KafkaClusterList, Error> {
        let response = self.execute("/cmk/v2/clusters", Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_kafka_cluster(
        &self,
        cluster_id: &str,
        options: Option<&KafkaClusterListOptions>,
    ) -> Result<KafkaCluster, Error> {
        let path = format!("/cmk/v2/clusters/{cluster_id}");
        let response = self.execute(&path, Method::Get, NO_BODY, as_query(options))?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// Provisioning is asynchronous: the control plane answers 202 and the
    /// cluster's `status.phase` tracks progress.
    pub fn create_kafka_cluster(
        &self,
        create: &KafkaClusterCreateReq,
    ) -> Result<KafkaCluster, Error> {
        let body = SpecWrap { spec: create };
        let response = self.execute("/cmk/v2/clusters", Method::Post, Some(&body), None)?;
        response.expect_status(&[202])?;
        response.json()
    }

    pub fn update_kafka_cluster(
        &self,
        cluster_id: &str,
        update: &KafkaClusterUpdateReq,
    ) -> Result<KafkaCluster, Error> {
        let path = format!("/cmk/v2/clusters/{cluster_id}");
        let body = SpecWrap { spec: update };
        let response = self.execute(&path, Method::Patch, Some(&body), None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// Deleting requires the owning environment, so the options are not
    /// optional here.
    pub fn delete_kafka_cluster(
        &self,
        cluster_id: &str,
        options: &KafkaClusterListOptions,
    ) -> Result<(), Error> {
        let path = format!("/cmk/v2/clusters/{cluster_id}");
        let response = self.execute(&path, Method::Delete, NO_BODY, Some(options))?;
        response.expect_status(&[200, 204])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_nests_under_spec() {
        let create = KafkaClusterCreateReq {
            display_name: "orders".to_string(),
            availability: ClusterAvailability::SingleZone,
            cloud: CloudProvider::Aws,
            region: "us-east-1".to_string(),
            config: ClusterConfigReq {
                kind: Some(ClusterType::Basic),
                cku: 0,
            },
            environment: EnvironmentRef {
                id: "env-123".to_string(),
            },
        };
        let json = serde_json::to_value(SpecWrap { spec: &create }).unwrap();
        assert_eq!(json["spec"]["display_name"], "orders");
        assert_eq!(json["spec"]["availability"], "SINGLE_ZONE");
        assert_eq!(json["spec"]["cloud"], "AWS");
        assert_eq!(json["spec"]["config"]["kind"], "Basic");
        assert_eq!(json["spec"]["environment"]["id"], "env-123");
    }

    #[test]
    fn cluster_decodes_nested_spec_and_status() {
        let raw = r#"{
            "api_version": "cmk/v2",
            "kind": "Cluster",
            "id": "lkc-abc123",
            "spec": {
                "display_name": "orders",
                "availability": "MULTI_ZONE",
                "cloud": "GCP",
                "region": "europe-west1",
                "kafka_bootstrap_endpoint": "SASL_SSL://pkc-1.gcp.confluent.cloud:9092",
                "http_endpoint": "https://pkc-1.gcp.confluent.cloud:443",
                "config": {"kind": "Dedicated", "cku": 2, "zones": ["a", "b"]},
                "environment": {"id": "env-123"}
            },
            "status": {"phase": "PROVISIONED", "cku": 2}
        }"#;
        let cluster: KafkaCluster = serde_json::from_str(raw).unwrap();
        assert_eq!(cluster.base.id, "lkc-abc123");
        assert_eq!(cluster.spec.availability, Some(ClusterAvailability::MultiZone));
        assert_eq!(cluster.spec.config.kind, Some(ClusterType::Dedicated));
        assert_eq!(cluster.spec.config.zones.len(), 2);
        assert_eq!(cluster.status.phase, "PROVISIONED");
    }
}
