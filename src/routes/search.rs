use crate::error::ProxyError;
use crate::models::query::{derive_query, QueryParams};
use crate::services::openlibrary::UpstreamClient;
use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

pub type Upstream = Arc<dyn UpstreamClient + Send + Sync>;

/// Most bytes of an upstream error body that make it into the log.
const LOGGED_BODY_LIMIT: usize = 256;

fn body_excerpt(body: &str) -> &str {
    if body.len() <= LOGGED_BODY_LIMIT {
        return body;
    }
    let mut end = LOGGED_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

pub async fn search_proxy(
    State(upstream): State<Upstream>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ProxyError> {
    let params = QueryParams::from_pairs(pairs);

    let query = derive_query(&params).ok_or_else(|| {
        warn!("Rejected request without usable search parameters");
        ProxyError::InvalidParameters
    })?;

    let response = upstream.fetch(&query).await;

    if !response.is_success() {
        error!(
            "Upstream returned status {} for {} ({} bytes): {}",
            response.status,
            query,
            response.body.len(),
            body_excerpt(&response.body)
        );
        return Err(ProxyError::Upstream {
            status: response.status,
        });
    }

    // Validity probe only; the raw body is what goes back to the caller.
    serde_json::to_string(&response.body)?;

    Ok(([(CONTENT_TYPE, "application/json")], response.body).into_response())
}
