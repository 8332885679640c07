//! Networking modules for the auth REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the browser-side calls and `types` defines the JSON schema
//! shared with the server.

pub mod api;
pub mod types;
