//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use medshare_core::types::{Cid, CidStats, Content, PinList};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn parse_cid(raw: &str) -> Result<Cid> {
    raw.parse::<Cid>().map_err(ApiError::from)
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        configured: state.store.is_configured(),
    })
}

/// POST /api/v1/content
pub async fn upload_content(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadContentRequest>,
) -> Result<Json<UploadContentResponse>> {
    let cid = state.store.upload_json(&req.data, req.name.as_deref()).await?;
    let gateway_url = state.store.gateway_url(&cid);

    info!(%cid, "Stored shared record");

    Ok(Json(UploadContentResponse {
        cid: cid.into_inner(),
        gateway_url,
    }))
}

/// GET /api/v1/content/:cid
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<Response> {
    let cid = parse_cid(&cid)?;

    let response = match state.store.get_content(&cid).await? {
        Content::Json { raw, .. } => {
            ([(header::CONTENT_TYPE, "application/json")], raw).into_response()
        }
        Content::Raw { content_type, data } => {
            let content_type =
                content_type.unwrap_or_else(|| medshare_core::DEFAULT_MIME_TYPE.to_string());
            ([(header::CONTENT_TYPE, content_type)], data).into_response()
        }
    };

    debug!(%cid, "Served content");
    Ok(response)
}

/// GET /api/v1/pins
pub async fn list_pins(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PinsQuery>,
) -> Result<Json<PinList>> {
    let filter = query.cid.as_deref().map(parse_cid).transpose()?;
    let list = state.store.pin_list(filter.as_ref()).await?;
    Ok(Json(list))
}

/// GET /api/v1/pins/:cid
pub async fn pin_status(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<Json<PinStatusResponse>> {
    let cid = parse_cid(&cid)?;
    let pinned = state.store.is_pinned(&cid).await;

    Ok(Json(PinStatusResponse {
        cid: cid.into_inner(),
        pinned,
    }))
}

/// DELETE /api/v1/pins/:cid
pub async fn unpin(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<Json<UnpinResponse>> {
    let cid = parse_cid(&cid)?;
    let unpinned = state.store.unpin(&cid).await;

    info!(%cid, unpinned, "Unpin requested");

    Ok(Json(UnpinResponse {
        cid: cid.into_inner(),
        unpinned,
    }))
}

/// GET /api/v1/stats/:cid
pub async fn cid_stats(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<Json<CidStats>> {
    let cid = parse_cid(&cid)?;
    Ok(Json(state.store.cid_stats(&cid).await))
}

/// POST /api/v1/stats
///
/// Malformed CIDs are answered per entry like any other failed lookup.
pub async fn access_logs(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AccessLogsRequest>,
) -> Json<Vec<CidStats>> {
    let cids: Vec<Cid> = req.cids.into_iter().map(Cid::new).collect();
    Json(state.store.access_logs(&cids).await)
}

/// GET /api/v1/gateway/:cid
pub async fn gateway_url(
    State(state): State<Arc<AppState>>,
    Path(cid): Path<String>,
) -> Result<Json<GatewayResponse>> {
    let cid = parse_cid(&cid)?;
    let url = state.store.gateway_url(&cid);

    Ok(Json(GatewayResponse {
        cid: cid.into_inner(),
        url,
    }))
}
