use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use biaslens_core::{build_sitemap, render_sitemap_xml, PageMetadata};
use chrono::Utc;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn sitemap(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, ApiError> {
    let articles = biaslens_db::list_sitemap_articles(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let entries = build_sitemap(&state.site, &articles, Utc::now());
    tracing::debug!(entries = entries.len(), "rendered sitemap");

    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap_xml(&entries),
    )
        .into_response())
}

pub(super) async fn manifest(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/manifest+json")],
        Json(state.site.manifest()),
    )
        .into_response()
}

pub(super) async fn site_metadata(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<PageMetadata>> {
    Json(ApiResponse {
        data: state.site.metadata(),
        meta: ResponseMeta::new(req_id.0),
    })
}
