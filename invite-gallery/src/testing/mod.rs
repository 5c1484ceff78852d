//! Testing utilities
//!
//! - [`TestServer`]: wrapper around `axum-test` running the full router
//! - [`GalleryFixture`]: temporary public directory with a catalog
//! - Response assertion helpers

pub mod assertions;
pub mod fixture;
pub mod server;

pub use assertions::*;
pub use fixture::{GalleryFixture, SECRET};
pub use server::TestServer;
