//! HTTP handlers
//!
//! - [`template`]: confined template document route
//! - [`catalog`]: JSON catalog API

pub mod catalog;
pub mod template;
