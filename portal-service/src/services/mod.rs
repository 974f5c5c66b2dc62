pub mod admins;
pub mod auth;
pub mod error;
pub mod identity;
pub mod members;
pub mod policy;
pub mod programs;
pub mod token;

pub use admins::AdminManagementService;
pub use auth::{AuthService, LoginOutcome};
pub use error::ServiceError;
pub use identity::{IdentityProvider, IdentityUser, JwtIdentityProvider};
pub use members::MemberService;
pub use programs::ProgramService;
pub use token::{AdminTokenClaims, AdminTokenService};
