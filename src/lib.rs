//! AirOnboard: a role-aware onboarding dashboard and policy assistant.
//!
//! - [`store`] loads the JSON dataset and answers every read-only query.
//! - [`assistant`] answers chat questions, locally or through Claude.
//! - [`api`] exposes both over HTTP.

pub mod api;
pub mod assistant;
pub mod config;
pub mod models;
pub mod render;
pub mod store;
