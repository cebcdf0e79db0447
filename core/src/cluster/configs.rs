//! Broker and topic configuration operations.
//!
//! Broker-wide configs live under the cluster document's `broker_configs`
//! link; per-topic configs hang off the `topics` link.

use serde::{Deserialize, Serialize};

use crate::client::NO_BODY;
use crate::cluster::ClusterClient;
use crate::error::Error;
use crate::http::Method;
use crate::query::{as_query, PaginationOptions};
use crate::types::{BaseModel, ResourceList};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSynonym {
    pub name: String,
    pub value: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KafkaConfig {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_sensitive: bool,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub synonyms: Vec<ConfigSynonym>,
}

pub type KafkaConfigList = ResourceList<KafkaConfig>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdateReq {
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigOp {
    Set,
    Delete,
}

/// One entry of a batch alteration. `DELETE` resets the key to its default,
/// in which case `value` is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigBatchItem {
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub operation: ConfigOp,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdateBatch {
    pub data: Vec<ConfigBatchItem>,
}

impl ClusterClient {
    pub fn list_broker_configs(
        &self,
        options: Option<&PaginationOptions>,
    ) -> Result<KafkaConfigList, Error> {
        let response = self.execute(
            &self.cluster().broker_configs.related,
            "",
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_broker_config(&self, config_name: &str) -> Result<KafkaConfig, Error> {
        let response = self.execute(
            &self.cluster().broker_configs.related,
            config_name,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn update_broker_config(
        &self,
        config_name: &str,
        update: &ConfigUpdateReq,
    ) -> Result<(), Error> {
        let response = self.execute(
            &self.cluster().broker_configs.related,
            config_name,
            Method::Put,
            Some(update),
            None,
        )?;
        response.expect_status(&[204])
    }

    pub fn update_broker_config_batch(&self, batch: &ConfigUpdateBatch) -> Result<(), Error> {
        // The alter action suffixes the collection segment itself, so it is
        // folded into the base rather than joined as a new path segment.
        let base = format!("{}:alter", self.cluster().broker_configs.related);
        let response = self.execute(&base, "", Method::Post, Some(batch), None)?;
        response.expect_status(&[204])
    }

    pub fn reset_broker_config(&self, config_name: &str) -> Result<(), Error> {
        let response = self.execute(
            &self.cluster().broker_configs.related,
            config_name,
            Method::Delete,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[204])
    }

    pub fn list_topic_configs(
        &self,
        topic_name: &str,
        options: Option<&PaginationOptions>,
    ) -> Result<KafkaConfigList, Error> {
        let path = format!("{topic_name}/configs");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Get,
            NO_BODY,
            as_query(options),
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn get_topic_config(
        &self,
        topic_name: &str,
        config_name: &str,
    ) -> Result<KafkaConfig, Error> {
        let path = format!("{topic_name}/configs/{config_name}");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Get,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[200])?;
        response.json()
    }

    pub fn update_topic_config(
        &self,
        topic_name: &str,
        config_name: &str,
        update: &ConfigUpdateReq,
    ) -> Result<(), Error> {
        let path = format!("{topic_name}/configs/{config_name}");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Put,
            Some(update),
            None,
        )?;
        response.expect_status(&[204])
    }

    pub fn update_topic_config_batch(
        &self,
        topic_name: &str,
        batch: &ConfigUpdateBatch,
    ) -> Result<(), Error> {
        let path = format!("{topic_name}/configs:alter");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Post,
            Some(batch),
            None,
        )?;
        response.expect_status(&[204])
    }

    /// Reset a topic config to the cluster default.
    pub fn reset_topic_config(&self, topic_name: &str, config_name: &str) -> Result<(), Error> {
        let path = format!("{topic_name}/configs/{config_name}");
        let response = self.execute(
            &self.cluster().topics.related,
            &path,
            Method::Delete,
            NO_BODY,
            None,
        )?;
        response.expect_status(&[204])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_serializes_operations_in_wire_case() {
        let batch = ConfigUpdateBatch {
            data: vec![
                ConfigBatchItem {
                    name: "retention.ms".to_string(),
                    value: "86400000".to_string(),
                    operation: ConfigOp::Set,
                },
                ConfigBatchItem {
                    name: "cleanup.policy".to_string(),
                    value: String::new(),
                    operation: ConfigOp::Delete,
                },
            ],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["data"][0]["operation"], "SET");
        assert_eq!(json["data"][1]["operation"], "DELETE");
    }

    #[test]
    fn config_decodes_synonyms() {
        let raw = r#"{
            "cluster_id": "lkc-abc",
            "topic_name": "orders",
            "name": "retention.ms",
            "value": "604800000",
            "is_default": true,
            "source": "DEFAULT_CONFIG",
            "synonyms": [
                {"name": "log.retention.ms", "value": "604800000", "source": "DEFAULT_CONFIG"}
            ]
        }"#;
        let config: KafkaConfig = serde_json::from_str(raw).unwrap();
        assert!(config.is_default);
        assert_eq!(config.synonyms.len(), 1);
        assert_eq!(config.synonyms[0].name, "log.retention.ms");
    }
}
