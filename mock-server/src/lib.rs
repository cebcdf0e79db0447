//! In-process stand-in for the Confluent Cloud control plane.
//!
//! Serves the environment and service-account APIs with the same envelope
//! shapes as the real control plane: paginated lists with absolute `next`
//! links, `{error_code, message}` error bodies, and an optional basic-auth
//! gate. Used by the client crate's integration tests.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Environment {
    pub api_version: String,
    pub kind: String,
    pub id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub api_version: String,
    pub kind: String,
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct CreateEnvironment {
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct UpdateEnvironment {
    pub display_name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceAccount {
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: u16,
    pub message: String,
}

#[derive(Default, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<usize>,
}

#[derive(Serialize, Deserialize)]
pub struct ListPage<T> {
    pub api_version: String,
    pub kind: String,
    pub metadata: PageMetadata,
    pub data: Vec<T>,
}

pub struct ServerState {
    base_url: String,
    auth_header: Option<String>,
    environments: RwLock<BTreeMap<String, Environment>>,
    service_accounts: RwLock<BTreeMap<String, ServiceAccount>>,
}

pub type SharedState = Arc<ServerState>;

type ErrorReply = (StatusCode, Json<ApiError>);

/// Build the router. `base_url` is the externally reachable address, used to
/// mint absolute pagination links. When `auth_header` is set, every route
/// requires a matching `Authorization` header.
pub fn app(base_url: &str, auth_header: Option<&str>) -> Router {
    let state: SharedState = Arc::new(ServerState {
        base_url: base_url.trim_end_matches('/').to_string(),
        auth_header: auth_header.map(str::to_string),
        environments: RwLock::new(BTreeMap::new()),
        service_accounts: RwLock::new(BTreeMap::new()),
    });
    Router::new()
        .route(
            "/org/v2/environments",
            get(list_environments).post(create_environment),
        )
        .route(
            "/org/v2/environments/{id}",
            get(get_environment)
                .patch(update_environment)
                .delete(delete_environment),
        )
        .route(
            "/iam/v2/service-accounts",
            get(list_service_accounts).post(create_service_account),
        )
        .route("/iam/v2/service-accounts/{id}", get(get_service_account))
        .with_state(state)
}

pub async fn run(
    listener: TcpListener,
    base_url: &str,
    auth_header: Option<&str>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(base_url, auth_header)).await
}

fn error_reply(status: StatusCode, message: &str) -> ErrorReply {
    (
        status,
        Json(ApiError {
            error_code: status.as_u16(),
            message: message.to_string(),
        }),
    )
}

fn check_auth(state: &ServerState, headers: &HeaderMap) -> Result<(), ErrorReply> {
    let Some(expected) = &state.auth_header else {
        return Ok(());
    };
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if presented == expected {
        Ok(())
    } else {
        Err(error_reply(StatusCode::UNAUTHORIZED, "invalid credentials"))
    }
}

fn short_id(prefix: &str) -> String {
    let tail = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &tail[..8])
}

struct PageRequest {
    page_size: usize,
    offset: usize,
    filters: Vec<(String, String)>,
}

fn parse_query(raw: Option<&str>) -> PageRequest {
    let mut request = PageRequest {
        page_size: 10,
        offset: 0,
        filters: Vec::new(),
    };
    let Some(raw) = raw else {
        return request;
    };
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            "page_size" => {
                if let Ok(size) = value.parse() {
                    request.page_size = size;
                }
            }
            "page_token" => {
                if let Ok(offset) = value.parse() {
                    request.offset = offset;
                }
            }
            _ => request.filters.push((key.into_owned(), value.into_owned())),
        }
    }
    request
}

/// Slice one page out of the full item set and mint the metadata links. The
/// page token is the plain offset of the next item.
fn paginate<T>(
    state: &ServerState,
    path: &str,
    request: &PageRequest,
    api_version: &str,
    kind: &str,
    items: Vec<T>,
) -> ListPage<T> {
    let total = items.len();
    let first = format!(
        "{}{}?page_size={}",
        state.base_url, path, request.page_size
    );
    let end = (request.offset + request.page_size).min(total);
    let next = (end < total).then(|| {
        format!(
            "{}{}?page_size={}&page_token={}",
            state.base_url, path, request.page_size, end
        )
    });
    let data = items
        .into_iter()
        .skip(request.offset)
        .take(request.page_size)
        .collect();
    ListPage {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
        metadata: PageMetadata {
            first: Some(first),
            next,
            total_size: Some(total),
        },
        data,
    }
}

async fn list_environments(
    State(state): State<SharedState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<ListPage<Environment>>, ErrorReply> {
    check_auth(&state, &headers)?;
    let request = parse_query(query.as_deref());
    let environments: Vec<Environment> =
        state.environments.read().await.values().cloned().collect();
    Ok(Json(paginate(
        &state,
        "/org/v2/environments",
        &request,
        "org/v2",
        "EnvironmentList",
        environments,
    )))
}

async fn create_environment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(input): Json<CreateEnvironment>,
) -> Result<(StatusCode, Json<Environment>), ErrorReply> {
    check_auth(&state, &headers)?;
    let environment = Environment {
        api_version: "org/v2".to_string(),
        kind: "Environment".to_string(),
        id: short_id("env"),
        display_name: input.display_name,
    };
    state
        .environments
        .write()
        .await
        .insert(environment.id.clone(), environment.clone());
    Ok((StatusCode::CREATED, Json(environment)))
}

async fn get_environment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Environment>, ErrorReply> {
    check_auth(&state, &headers)?;
    state
        .environments
        .read()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_reply(StatusCode::NOT_FOUND, "environment not found"))
}

async fn update_environment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateEnvironment>,
) -> Result<Json<Environment>, ErrorReply> {
    check_auth(&state, &headers)?;
    let mut environments = state.environments.write().await;
    let environment = environments
        .get_mut(&id)
        .ok_or_else(|| error_reply(StatusCode::NOT_FOUND, "environment not found"))?;
    if let Some(display_name) = input.display_name {
        environment.display_name = display_name;
    }
    Ok(Json(environment.clone()))
}

async fn delete_environment(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorReply> {
    check_auth(&state, &headers)?;
    state
        .environments
        .write()
        .await
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| error_reply(StatusCode::NOT_FOUND, "environment not found"))
}

async fn list_service_accounts(
    State(state): State<SharedState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Json<ListPage<ServiceAccount>>, ErrorReply> {
    check_auth(&state, &headers)?;
    let request = parse_query(query.as_deref());
    let names: Vec<&str> = request
        .filters
        .iter()
        .filter(|(key, _)| key == "display_name")
        .map(|(_, value)| value.as_str())
        .collect();
    let accounts: Vec<ServiceAccount> = state
        .service_accounts
        .read()
        .await
        .values()
        .filter(|account| names.is_empty() || names.contains(&account.display_name.as_str()))
        .cloned()
        .collect();
    Ok(Json(paginate(
        &state,
        "/iam/v2/service-accounts",
        &request,
        "iam/v2",
        "ServiceAccountList",
        accounts,
    )))
}

async fn create_service_account(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(input): Json<CreateServiceAccount>,
) -> Result<(StatusCode, Json<ServiceAccount>), ErrorReply> {
    check_auth(&state, &headers)?;
    let account = ServiceAccount {
        api_version: "iam/v2".to_string(),
        kind: "ServiceAccount".to_string(),
        id: short_id("sa"),
        display_name: input.display_name,
        description: input.description,
    };
    state
        .service_accounts
        .write()
        .await
        .insert(account.id.clone(), account.clone());
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_service_account(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ServiceAccount>, ErrorReply> {
    check_auth(&state, &headers)?;
    state
        .service_accounts
        .read()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error_reply(StatusCode::NOT_FOUND, "service account not found"))
}
