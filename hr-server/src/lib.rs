//! HR Server - HR management REST backend
//!
//! # Architecture
//!
//! Every controller is a thin HTTP adapter: it validates the request model,
//! delegates to an injected service port and maps the outcome to the
//! uniform [`ApiResponse`] envelope.
//!
//! # Module layout
//!
//! ```text
//! hr-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, identity extractor, permission layers
//! ├── services/      # service ports, ServiceError, in-memory adapters
//! ├── api/           # HTTP routers and handlers
//! └── utils/         # logger, response helpers, extractors
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use services::{ServiceError, ServiceResult};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger;

/// Security event log on the `security` target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __  ______     _____
   / / / / __ \   / ___/___  ______   _____  _____
  / /_/ / /_/ /   \__ \/ _ \/ ___/ | / / _ \/ ___/
 / __  / _, _/   ___/ /  __/ /   | |/ /  __/ /
/_/ /_/_/ |_|   /____/\___/_/    |___/\___/_/
    "#
    );
}
