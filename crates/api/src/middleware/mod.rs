//! HTTP middleware.

pub mod admin_auth;
pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod site_lock;
pub mod trace_id;
