//! HTTP request handlers
//!
//! Handlers are thin: they extract the path, delegate to a service and map
//! the result onto the response shapes in [`crate::web::responses`].

pub mod export;
pub mod health;
pub mod lookup;
pub mod remove;
pub mod root;
