//! HTTP handlers for the API routes.

pub mod feed;
