//! Error responses.

use askama::Template;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::gbfs::FeedError;

use super::dto::ErrorResponse;
use super::templates::ErrorTemplate;

/// Message returned to clients whenever upstream data is unavailable.
pub const GENERIC_ERROR_MESSAGE: &str = "Error fetching data from the API";

/// Shown on the error page; upstream details stay in the logs.
pub const ERROR_PAGE_MESSAGE: &str = "Apologies, we are having some server issues.";

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Upstream(#[from] FeedError),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show to users.
    fn public_message(&self) -> String {
        match self {
            AppError::BadRequest { message } => message.clone(),
            AppError::Upstream(_) | AppError::Internal { .. } => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::BadRequest { message } => tracing::debug!("bad request: {message}"),
            AppError::Upstream(e) => tracing::error!("{GENERIC_ERROR_MESSAGE}: {e}"),
            AppError::Internal { message } => tracing::error!("internal error: {message}"),
        }
    }

    /// Render as JSON instead of the HTML error page.
    pub fn into_json_response(self) -> Response {
        self.log();
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (self.status(), body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let template = match &self {
            AppError::BadRequest { message } => ErrorTemplate {
                title: "Bad request".to_string(),
                message: message.clone(),
            },
            _ => ErrorTemplate {
                title: "Something went wrong".to_string(),
                message: ERROR_PAGE_MESSAGE.to_string(),
            },
        };

        let html = template.render().unwrap_or_else(|e| {
            tracing::error!("template error: {e}");
            ERROR_PAGE_MESSAGE.to_string()
        });

        (status, Html(html)).into_response()
    }
}

/// JSON-rendering wrapper for API handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_json_response()
    }
}
