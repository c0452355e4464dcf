//! HTTP API layer
//!
//! - `server` - Router assembly and server lifecycle
//! - `routes` - Endpoint handlers
//! - `types` - Shared error response types
//! - `openapi` - OpenAPI spec and Swagger UI
//! - `middleware` - Fallback handling

pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use server::ApiServer;
