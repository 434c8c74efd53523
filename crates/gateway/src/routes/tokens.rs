//! Token issuance endpoint
//!
//! Unauthenticated: anyone who can reach it can mint a token for any subject.
//! Disable it with `ENABLE_TOKEN_ISSUANCE=false` outside test environments.

use axum::extract::{Query, State};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct GenerateTokenQuery {
    #[serde(rename = "subjectId", alias = "userId")]
    pub subject_id: Option<String>,
}

/// `GET /generate-token?subjectId=<id>`
pub async fn generate_token(
    State(state): State<AppState>,
    Query(query): Query<GenerateTokenQuery>,
) -> ApiResult<String> {
    let subject_id = query
        .subject_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| state.config.default_subject_id.clone());

    let token = state.issuer.issue(&subject_id).map_err(|e| {
        tracing::error!(error = %e, "Failed to issue token");
        ApiError::Internal
    })?;

    tracing::info!(subject_id = %subject_id, "Issued token");
    Ok(token)
}
