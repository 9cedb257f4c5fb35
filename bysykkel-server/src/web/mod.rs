//! Web layer for the station map.
//!
//! Serves the map page, a JSON API of reconciled stations and static
//! assets.

mod dto;
mod error;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use error::{ApiError, AppError, ERROR_PAGE_MESSAGE, GENERIC_ERROR_MESSAGE};
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
