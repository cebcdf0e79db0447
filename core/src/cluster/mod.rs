//! Client for the per-cluster Kafka REST data plane (`/kafka/v3`).
//!
//! Unlike the control plane, the REST API is hypermedia-driven: the cluster
//! document returned at connect time carries `related` links for topics,
//! ACLs, consumer groups and broker configs, and every operation is issued
//! against one of those links. The same request executor drives both
//! clients.

pub mod acls;
pub mod configs;
pub mod consumer_groups;
pub mod linking;
pub mod partitions;
pub mod topics;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::{Authenticator, BasicAuth};
use crate::error::Error;
use crate::http::{HttpResponse, Method};
use crate::query::QueryParams;
use crate::retry::RetryPolicy;
use crate::transport::{Transport, UreqTransport};
use crate::types::BaseModel;

/// A hypermedia link to a sub-resource of the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedResource {
    pub related: String,
}

/// The cluster document served by the REST API, carrying the links the
/// client navigates by.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestCluster {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(default)]
    pub cluster_id: String,
    #[serde(default)]
    pub controller: RelatedResource,
    #[serde(default)]
    pub acls: RelatedResource,
    #[serde(default)]
    pub brokers: RelatedResource,
    #[serde(default)]
    pub broker_configs: RelatedResource,
    #[serde(default)]
    pub consumer_groups: RelatedResource,
    #[serde(default)]
    pub topics: RelatedResource,
    #[serde(default)]
    pub partition_reassignments: RelatedResource,
}

/// Client bound to one Kafka cluster's REST endpoint.
///
/// [`ClusterClient::connect`] fetches the cluster document once; subsequent
/// calls follow its `related` links.
#[derive(Clone)]
pub struct ClusterClient {
    base_url: String,
    cluster_id: String,
    auth: Arc<dyn Authenticator>,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
    cluster: RestCluster,
}

impl ClusterClient {
    /// Connect with basic credentials (a cluster-scoped API key pair).
    /// `cluster_url` is the cluster's HTTP endpoint, e.g.
    /// `https://pkc-xyz.us-east-1.aws.confluent.cloud:443`.
    pub fn connect(
        username: &str,
        password: &str,
        cluster_id: &str,
        cluster_url: &str,
    ) -> Result<Self, Error> {
        Self::connect_with(
            BasicAuth::new(username, password),
            RetryPolicy::default(),
            UreqTransport,
            cluster_id,
            cluster_url,
        )
    }

    /// Connect with an explicit authenticator, retry policy, and transport.
    pub fn connect_with(
        auth: impl Authenticator + 'static,
        retry: RetryPolicy,
        transport: impl Transport + 'static,
        cluster_id: &str,
        cluster_url: &str,
    ) -> Result<Self, Error> {
        let mut client = Self {
            base_url: cluster_url.to_string(),
            cluster_id: cluster_id.to_string(),
            auth: Arc::new(auth),
            retry,
            transport: Arc::new(transport),
            cluster: RestCluster::default(),
        };
        client.cluster = client.fetch_cluster()?;
        Ok(client)
    }

    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    /// The cluster document fetched at connect time.
    pub fn cluster(&self) -> &RestCluster {
        &self.cluster
    }

    fn fetch_cluster(&self) -> Result<RestCluster, Error> {
        let path = format!("/kafka/v3/clusters/{}", self.cluster_id);
        let response = self.execute::<()>("", &path, Method::Get, None, None)?;
        response.expect_status(&[200])?;
        response.json()
    }

    /// Run one request through the shared executor. `base` is usually a
    /// `related` link from the cluster document; when empty, the cluster's
    /// own endpoint is used.
    pub(crate) fn execute<B: Serialize>(
        &self,
        base: &str,
        path: &str,
        method: Method,
        body: Option<&B>,
        params: Option<&dyn QueryParams>,
    ) -> Result<HttpResponse, Error> {
        let base = if base.is_empty() {
            &self.base_url
        } else {
            base
        };
        crate::client::execute(
            base,
            self.auth.as_ref(),
            &self.retry,
            self.transport.as_ref(),
            path,
            method,
            body,
            params,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::auth::NoAuth;
    use crate::http::HttpRequest;
    use crate::transport::TransportError;

    const CLUSTER_URL: &str = "http://localhost:8082";

    struct ScriptedTransport {
        responses: Mutex<VecDeque<HttpResponse>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<HttpResponse>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(script.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted"))
        }
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    fn cluster_document() -> HttpResponse {
        json_response(
            200,
            r#"{
                "kind": "KafkaCluster",
                "cluster_id": "lkc-abc123",
                "topics": {"related": "http://localhost:8082/kafka/v3/clusters/lkc-abc123/topics"},
                "acls": {"related": "http://localhost:8082/kafka/v3/clusters/lkc-abc123/acls"},
                "consumer_groups": {"related": "http://localhost:8082/kafka/v3/clusters/lkc-abc123/consumer-groups"}
            }"#,
        )
    }

    fn connect(transport: Arc<ScriptedTransport>) -> ClusterClient {
        let retry = RetryPolicy {
            max_attempts: 3,
            wait_min: Duration::ZERO,
            wait_max: Duration::ZERO,
        };
        ClusterClient::connect_with(NoAuth, retry, transport, "lkc-abc123", CLUSTER_URL).unwrap()
    }

    #[test]
    fn cluster_document_decodes_related_links() {
        let raw = r#"{
            "kind": "KafkaCluster",
            "cluster_id": "lkc-abc123",
            "topics": {"related": "https://pkc-1.confluent.cloud/kafka/v3/clusters/lkc-abc123/topics"},
            "acls": {"related": "https://pkc-1.confluent.cloud/kafka/v3/clusters/lkc-abc123/acls"},
            "consumer_groups": {"related": "https://pkc-1.confluent.cloud/kafka/v3/clusters/lkc-abc123/consumer-groups"}
        }"#;
        let cluster: RestCluster = serde_json::from_str(raw).unwrap();
        assert_eq!(cluster.cluster_id, "lkc-abc123");
        assert!(cluster.topics.related.ends_with("/topics"));
        assert!(cluster.broker_configs.related.is_empty());
    }

    #[test]
    fn connect_fetches_the_cluster_document_from_the_endpoint() {
        let transport = ScriptedTransport::new(vec![cluster_document()]);
        let client = connect(Arc::clone(&transport));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(
            sent[0].url,
            "http://localhost:8082/kafka/v3/clusters/lkc-abc123"
        );
        assert_eq!(client.cluster_id(), "lkc-abc123");
        assert!(client.cluster().topics.related.ends_with("/topics"));
    }

    #[test]
    fn list_topics_follows_the_related_link() {
        let transport = ScriptedTransport::new(vec![
            cluster_document(),
            json_response(
                200,
                r#"{"kind": "KafkaTopicList", "data": [{"topic_name": "orders"}]}"#,
            ),
        ]);
        let client = connect(Arc::clone(&transport));

        let topics = client.list_topics(None).unwrap();
        assert_eq!(topics.data.len(), 1);
        assert_eq!(topics.data[0].topic_name, "orders");

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[1].url,
            "http://localhost:8082/kafka/v3/clusters/lkc-abc123/topics"
        );
    }

    #[test]
    fn get_topic_joins_the_name_onto_the_related_link() {
        let transport = ScriptedTransport::new(vec![
            cluster_document(),
            json_response(200, r#"{"topic_name": "orders", "partition_count": 6}"#),
        ]);
        let client = connect(Arc::clone(&transport));

        let topic = client.get_topic("orders").unwrap();
        assert_eq!(topic.partition_count, 6);

        let sent = transport.sent();
        assert_eq!(
            sent[1].url,
            "http://localhost:8082/kafka/v3/clusters/lkc-abc123/topics/orders"
        );
    }

    #[test]
    fn link_operations_use_the_cluster_endpoint() {
        let transport = ScriptedTransport::new(vec![
            cluster_document(),
            json_response(
                200,
                r#"{"kind": "KafkaLinkDataList", "data": [{"link_name": "dr-link", "link_state": "ACTIVE"}]}"#,
            ),
            json_response(201, ""),
        ]);
        let client = connect(Arc::clone(&transport));

        let links = client.list_cluster_links().unwrap();
        assert_eq!(links.data[0].link_name, "dr-link");

        client
            .create_mirror_topic("dr-link", "orders", "orders-mirror")
            .unwrap();

        let sent = transport.sent();
        assert_eq!(
            sent[1].url,
            "http://localhost:8082/kafka/v3/clusters/lkc-abc123/links"
        );
        assert_eq!(sent[2].method, Method::Post);
        assert_eq!(
            sent[2].url,
            "http://localhost:8082/kafka/v3/clusters/lkc-abc123/links/dr-link/mirrors"
        );
        let body: serde_json::Value =
            serde_json::from_str(sent[2].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["source_topic_name"], "orders");
        assert_eq!(body["mirror_topic_name"], "orders-mirror");
    }
}
