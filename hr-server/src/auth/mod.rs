//! Authentication and authorization
//!
//! - [`JwtService`] - token verification and issuance
//! - [`CurrentUser`] - caller identity with fail-closed accessors
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - route permission layer

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
