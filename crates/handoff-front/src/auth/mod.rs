//! Bearer token capability check guarding the client-facing write routes.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtAuth};
pub use middleware::require_bearer;
