pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{validate_bearer, AuthenticatedUser};
pub use utils::require_user_id;
