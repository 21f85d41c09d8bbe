//! CSV download of the breakdown with obligation detail.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use super::{ViewQuery, parse_funding};
use crate::{AppState, error::ApiError};

/// Creates the export routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/funding/{funding}/export", get(export_csv))
}

/// GET /funding/{funding}/export
///
/// Exports the categories matching `q` for `year`, each followed by its
/// obligations.
async fn export_csv(
    State(state): State<AppState>,
    Path(funding): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let funding = parse_funding(&funding)?;
    let year = query.year()?;

    let records = state.source.fetch(funding).await?;
    let artifact = records.export(funding, year, query.search());
    info!(
        %funding,
        year,
        filename = %artifact.filename,
        bytes = artifact.len(),
        "Exported breakdown"
    );

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, artifact.content_disposition()),
        ],
        artifact.bytes,
    ))
}
