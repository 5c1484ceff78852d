//! Middleware layers for invite-gallery
//!
//! - Raw template interception for local development

pub mod raw_templates;

pub use raw_templates::{RawTemplatesLayer, RawTemplatesMiddleware};
