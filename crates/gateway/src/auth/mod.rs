//! Authentication and authorization for the admission pipeline

pub mod authorization;
pub mod identity;
pub mod jwt;
pub mod middleware;

pub use authorization::{authorize, Decision};
pub use identity::Identity;
pub use jwt::{Claims, JwtError, TokenAuthenticator, TokenIssuer};
pub use middleware::authenticate;
