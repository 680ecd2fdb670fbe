//! On-demand HTTP trigger.

mod dto;
mod errors;
mod handlers;
mod router;

pub use dto::{ErrorDetail, ExportResponse};
pub use errors::ApiError;
pub use router::{REQUEST_ID_HEADER, router, serve};
