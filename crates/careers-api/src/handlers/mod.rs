//! axum handlers, one module per resource.
//!
//! Every handler is generic over the store and the assistant; the concrete
//! types are fixed once in [`crate::api_router`].

pub mod applicants;
pub mod assist;
pub mod auth;
pub mod dashboard;
pub mod jobs;
pub mod subscribers;
