//! API route definitions.

use axum::Router;
use chrono::Datelike;
use rao_core::funding::FundingType;
use serde::Deserialize;

use crate::{AppState, error::ApiError};

pub mod dashboard;
pub mod export;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(export::routes())
}

/// Year and search parameters shared by the overview and the export.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Fiscal year; the current calendar year when absent.
    pub year: Option<String>,
    /// Category search text.
    pub q: Option<String>,
}

impl ViewQuery {
    /// Resolves the fiscal year, reading the clock only when none was given.
    pub fn year(&self) -> Result<i32, ApiError> {
        match self.year.as_deref().map(str::trim) {
            None | Some("") => Ok(chrono::Local::now().year()),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::validation(format!("Invalid year: {raw}"))),
        }
    }

    /// The search text, empty when absent.
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Parses the `{funding}` path segment.
pub fn parse_funding(raw: &str) -> Result<FundingType, ApiError> {
    raw.parse::<FundingType>().map_err(ApiError::validation)
}
