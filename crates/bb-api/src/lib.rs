//! bb-api: HTTP surface for bb-gateway
//!
//! The endpoints the step-based booking UI talks to: catalog lookups,
//! open slots for a barber and date, and the booking commit. Validation
//! rejections come back as structured responses with a reason; they are
//! expected outcomes, not server failures.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use routes::routes;
pub use server::{start_server, AppState};
