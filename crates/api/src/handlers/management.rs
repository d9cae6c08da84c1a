use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use splitdns_domain::DomainError;
use tracing::{error, warn};

use super::params::Params;
use crate::state::AppState;

type HandlerResult = Result<String, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
pub struct AddHostParams {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub ip: String,
}

#[derive(Debug, Deserialize)]
pub struct AddDomainParams {
    #[serde(default)]
    pub domain: String,
    #[serde(default, rename = "type")]
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteDomainParams {
    #[serde(default)]
    pub domain: String,
}

fn reject(operation: &'static str, e: DomainError) -> (StatusCode, String) {
    let status = match e {
        DomainError::InvalidDomainName(_)
        | DomainError::InvalidIpAddress(_)
        | DomainError::InvalidClassification(_) => StatusCode::BAD_REQUEST,
        DomainError::ListFetchFailed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!(operation, error = %e, "Management operation failed");
    } else {
        warn!(operation, error = %e, "Management request rejected");
    }

    (status, e.to_string())
}

pub async fn add_host(
    State(state): State<AppState>,
    Params(params): Params<AddHostParams>,
) -> HandlerResult {
    let ip = state
        .add_host
        .execute(&params.host, &params.ip)
        .map_err(|e| reject("add_host", e))?;
    Ok(format!("AddHost {} IP [{}]", params.host, ip))
}

pub async fn add_domain(
    State(state): State<AppState>,
    Params(params): Params<AddDomainParams>,
) -> HandlerResult {
    let tag = state
        .set_classification
        .execute(&params.domain, &params.tag)
        .map_err(|e| reject("add_domain", e))?;
    Ok(format!("AddDomain {} Type [{}]", params.domain, tag))
}

/// Runs the list update inline; the reply is sent once the load finished.
pub async fn update(
    State(state): State<AppState>,
    Params(params): Params<UpdateParams>,
) -> HandlerResult {
    let url = params.url.trim();
    if url.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing url parameter".to_string()));
    }

    let summary = state
        .run_update
        .execute(url)
        .await
        .map_err(|e| reject("update", e))?;
    Ok(format!(
        "Update Url {} applied [{}] skipped [{}]",
        url, summary.applied, summary.skipped
    ))
}

pub async fn delete_domain(
    State(state): State<AppState>,
    Params(params): Params<DeleteDomainParams>,
) -> HandlerResult {
    state
        .delete_classification
        .execute(&params.domain)
        .map_err(|e| reject("delete_domain", e))?;
    Ok(format!("DelDomain {}", params.domain))
}
