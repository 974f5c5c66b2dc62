pub mod auth;

pub use auth::{AdminContext, AuthContext, IdentityContext, SuperAdminContext, ADMIN_TOKEN_HEADER};
