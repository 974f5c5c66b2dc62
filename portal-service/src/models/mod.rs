pub mod admin;
pub mod division;
pub mod geography;
pub mod member;
pub mod profile;
pub mod program;
pub mod registration;
pub mod role;

pub use admin::{Admin, AdminDescriptor, AdminResponse};
pub use division::Division;
pub use geography::{Cluster, Panchayath};
pub use member::Member;
pub use profile::Profile;
pub use program::{Program, ProgramChanges};
pub use registration::Registration;
pub use role::{AppRole, RoleSet};
