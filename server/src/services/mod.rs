//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own persistence and provider calls so route handlers can
//! stay focused on cookies, redirects, and status codes.

pub mod accounts;
pub mod identity;
pub mod session;
