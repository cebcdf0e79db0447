//! Cluster-link operations for cross-cluster replication.
//!
//! Links and their mirror topics live under the cluster's own endpoint
//! (`/kafka/v3/clusters/{id}/links`); the cluster document carries no
//! `related` link for them.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::ClusterClient;
use crate::error::Error;
use crate::http::Method;
use crate::types::{BaseModel, ResourceList};

/// A replication link between this cluster and a remote one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterLink {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_cluster_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination_cluster_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub remote_cluster_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_link_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topic_names: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_error: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_error_message: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_state: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
}

pub type ClusterLinkList = ResourceList<ClusterLink>;

/// One configuration entry of a link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub is_read_only: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    pub is_sensitive: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_name: String,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

pub type LinkConfigList = ResourceList<LinkConfig>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorTopicReq {
    pub source_topic_name: String,
    pub mirror_topic_name: String,
}

impl ClusterClient {
    pub fn list_cluster_links(&self) -> Result<ClusterLinkList, Error> {
        let path = format!("/kafka/v3/clusters/{}/links", self.cluster_id());
        let response = self.execute("", &path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn list_cluster_link_configs(&self, link_name: &str) -> Result<LinkConfigList, Error> {
        let path = format!(
            "/kafka/v3/clusters/{}/links/{link_name}/configs",
            self.cluster_id()
        );
        let response = self.execute("", &path, Method::Get, NO_BODY, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// Mirror a topic from the link's source cluster onto this one.
    pub fn create_mirror_topic(
        &self,
        link_name: &str,
        source_topic_name: &str,
        mirror_topic_name: &str,
    ) -> Result<(), Error> {
        let path = format!(
            "/kafka/v3/clusters/{}/links/{link_name}/mirrors",
            self.cluster_id()
        );
        let body = MirrorTopicReq {
            source_topic_name: source_topic_name.to_string(),
            mirror_topic_name: mirror_topic_name.to_string(),
        };
        let response = self.execute("", &path, Method::Post, Some(&body), None)?;
        response.expect_status(&[201])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_list_decodes_state_and_topics() {
        let raw = r#"{
            "kind": "KafkaLinkDataList",
            "data": [{
                "source_cluster_id": "lkc-src",
                "destination_cluster_id": "lkc-dst",
                "link_name": "dr-link",
                "link_id": "link-1",
                "topic_names": ["orders", "payments"],
                "link_state": "ACTIVE"
            }]
        }"#;
        let links: ClusterLinkList = serde_json::from_str(raw).unwrap();
        assert_eq!(links.data.len(), 1);
        assert_eq!(links.data[0].link_name, "dr-link");
        assert_eq!(links.data[0].link_state, "ACTIVE");
        assert_eq!(links.data[0].topic_names, vec!["orders", "payments"]);
    }

    #[test]
    fn link_config_decodes_flags() {
        let raw = r#"{
            "kind": "KafkaLinkConfigDataList",
            "data": [{
                "cluster_id": "lkc-dst",
                "link_name": "dr-link",
                "name": "consumer.offset.sync.enable",
                "value": "true",
                "is_read_only": false,
                "is_default": false,
                "synonyms": ["consumer.offset.sync.enable"]
            }]
        }"#;
        let configs: LinkConfigList = serde_json::from_str(raw).unwrap();
        assert_eq!(configs.data[0].name, "consumer.offset.sync.enable");
        assert!(!configs.data[0].is_read_only);
        assert_eq!(configs.data[0].synonyms.len(), 1);
    }

    #[test]
    fn mirror_request_serializes_both_names() {
        let req = MirrorTopicReq {
            source_topic_name: "orders".to_string(),
            mirror_topic_name: "orders-mirror".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["source_topic_name"], "orders");
        assert_eq!(json["mirror_topic_name"], "orders-mirror");
    }
}
