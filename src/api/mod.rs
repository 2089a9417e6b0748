//! HTTP surface.
//!
//! Routes, handlers, and the typed error boundary. `build_router()`
//! returns a composable `Router` over an immutable `ApiContext`;
//! `serve()` binds it and runs until ctrl-c.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::build_router;
pub use server::serve;
pub use types::ApiContext;
